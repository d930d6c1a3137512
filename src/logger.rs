//! Tagged logger core
//!
//! One `Logger` per tag/subsystem. Every call runs the same synchronous
//! pipeline: level gate, prefix rendering for the environment detected at
//! construction, emission through the injected console sink, then in-order
//! transport dispatch with per-transport failure isolation.
//!
//! ## Usage
//!
//! ```rust
//! use taglog::{Logger, LogLevel};
//!
//! let log = Logger::builder("DB")
//!     .level(LogLevel::Info)
//!     .with_level_prefix(true)
//!     .build();
//!
//! log.info("connected");
//! log.warn(("slow query", 120));
//! log.debug("not emitted, below threshold");
//! ```

use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::console::{ConsoleMethod, ConsoleSink, TerminalSink};
use crate::levels::LogLevel;
use crate::render::render_prefix;
use crate::runtime::{detect, RenderMode};
use crate::transport::Transport;

/// Fixed marker on the logger's own diagnostics, so transport failures are
/// distinguishable from application logs.
const SELF_TAG: &str = "[Logger]";

/// Conversion of a log call's arguments into the per-argument rendered list.
///
/// Implemented for strings and for tuples of `Display` values, which stand in
/// for a variadic argument list: `log.warn(("slow query", 120))` hands the
/// sink and transports `["slow query", "120"]`.
pub trait IntoLogArgs {
    fn into_log_args(self) -> Vec<String>;
}

impl IntoLogArgs for String {
    fn into_log_args(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoLogArgs for &str {
    fn into_log_args(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoLogArgs for Vec<String> {
    fn into_log_args(self) -> Vec<String> {
        self
    }
}

macro_rules! impl_into_log_args_tuple {
    ($($name:ident)+) => {
        impl<$($name: Display),+> IntoLogArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_log_args(self) -> Vec<String> {
                let ($($name,)+) = self;
                vec![$($name.to_string()),+]
            }
        }
    };
}

impl_into_log_args_tuple!(A);
impl_into_log_args_tuple!(A B);
impl_into_log_args_tuple!(A B C);
impl_into_log_args_tuple!(A B C D);
impl_into_log_args_tuple!(A B C D E);
impl_into_log_args_tuple!(A B C D E F);
impl_into_log_args_tuple!(A B C D E F G);
impl_into_log_args_tuple!(A B C D E F G H);

/// Builder for [`Logger`]. Every field has a safe default.
pub struct LoggerBuilder {
    tag: String,
    level: LogLevel,
    transports: Vec<Arc<dyn Transport>>,
    with_timestamp: bool,
    with_level_prefix: bool,
    mode: Option<RenderMode>,
    console: Option<Arc<dyn ConsoleSink>>,
}

impl LoggerBuilder {
    fn new(tag: impl Into<String>) -> Self {
        LoggerBuilder {
            tag: tag.into(),
            level: LogLevel::Debug,
            transports: Vec::new(),
            with_timestamp: false,
            with_level_prefix: false,
            mode: None,
            console: None,
        }
    }

    /// Initial threshold (default: `Debug`).
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Register a transport up front.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Arc::new(transport));
        self
    }

    /// Register an already-shared transport up front.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Include a fresh wall-clock timestamp in every rendered prefix.
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.with_timestamp = enabled;
        self
    }

    /// Include the upper-cased level name in every rendered prefix.
    pub fn with_level_prefix(mut self, enabled: bool) -> Self {
        self.with_level_prefix = enabled;
        self
    }

    /// Override the detected rendering strategy.
    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Override the console sink the logger emits through.
    pub fn console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn build(self) -> Logger {
        let mode = self.mode.unwrap_or_else(detect);
        let console = self.console.unwrap_or_else(|| default_console(mode));
        Logger {
            tag: self.tag,
            level: RwLock::new(self.level),
            transports: RwLock::new(self.transports),
            with_timestamp: self.with_timestamp,
            with_level_prefix: self.with_level_prefix,
            mode,
            console,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_console(mode: RenderMode) -> Arc<dyn ConsoleSink> {
    match mode {
        RenderMode::Browser => Arc::new(crate::console::BrowserSink),
        RenderMode::ReactNative | RenderMode::Terminal => Arc::new(TerminalSink),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_console(_mode: RenderMode) -> Arc<dyn ConsoleSink> {
    Arc::new(TerminalSink)
}

/// Tagged, level-filtered logger.
///
/// The tag, display flags, rendering mode, and console sink are fixed at
/// construction. The threshold can change at any time and the transport list
/// only grows; both sit behind locks so dispatch always iterates a stable
/// snapshot when execution contexts overlap.
pub struct Logger {
    tag: String,
    level: RwLock<LogLevel>,
    transports: RwLock<Vec<Arc<dyn Transport>>>,
    with_timestamp: bool,
    with_level_prefix: bool,
    mode: RenderMode,
    console: Arc<dyn ConsoleSink>,
}

impl Logger {
    /// Logger with default settings: threshold `Debug`, no transports, no
    /// timestamp or level prefix.
    pub fn new(tag: impl Into<String>) -> Self {
        Logger::builder(tag).build()
    }

    pub fn builder(tag: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(tag)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rendering strategy fixed at construction.
    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// Current threshold.
    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Change the threshold; takes effect on the next call.
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Append a transport to the dispatch list. Registration is additive
    /// only; there is no removal.
    pub fn add_transport<T: Transport + 'static>(&self, transport: T) {
        self.transports.write().push(Arc::new(transport));
    }

    /// Append an already-shared transport to the dispatch list.
    pub fn add_shared_transport(&self, transport: Arc<dyn Transport>) {
        self.transports.write().push(transport);
    }

    /// Whether a message at `level` currently passes the gate.
    pub fn has(&self, level: LogLevel) -> bool {
        level.rank() >= self.level().rank()
    }

    pub fn trace<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Trace, args);
    }

    pub fn debug<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Debug, args);
    }

    pub fn info<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Info, args);
    }

    pub fn warn<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Warn, args);
    }

    pub fn error<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Error, args);
    }

    pub fn fatal<A: IntoLogArgs>(&self, args: A) {
        self.write(LogLevel::Fatal, args);
    }

    /// Generic entry point taking the level at runtime.
    pub fn write<A: IntoLogArgs>(&self, level: LogLevel, args: A) {
        if !self.has(level) {
            return;
        }
        self.emit(level, args.into_log_args());
    }

    fn emit(&self, level: LogLevel, args: Vec<String>) {
        // Timestamp is captured per call, never at construction.
        let timestamp = if self.with_timestamp {
            Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
        } else {
            None
        };

        let (prefix, styles) = render_prefix(
            self.mode,
            &self.tag,
            level,
            self.with_level_prefix,
            timestamp.as_deref(),
        );
        self.console
            .emit(level.console_method(), &prefix, &styles, &args);

        self.dispatch(level, &args);
    }

    /// Give every registered transport a chance to observe the event, in
    /// registration order, on a stable snapshot of the list.
    fn dispatch(&self, level: LogLevel, args: &[String]) {
        let snapshot: Vec<Arc<dyn Transport>> = self.transports.read().clone();
        if snapshot.is_empty() {
            return;
        }

        let message = format!("[{}] {}", self.tag, args.join(" "));
        for transport in snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| transport.send(level, &message, args)));
            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(_) => "transport panicked".to_string(),
            };
            // Reported straight to the console sink, never back through the
            // transports, so a failing transport cannot recurse.
            self.console.emit(
                ConsoleMethod::Warn,
                SELF_TAG,
                &[],
                &[format!("Failed to execute transport: {}", failure)],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MemorySink;
    use crate::transport::BufferTransport;
    use anyhow::anyhow;

    fn capture_logger(level: LogLevel) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("DB")
            .level(level)
            .render_mode(RenderMode::Terminal)
            .console(sink.clone())
            .build();
        (logger, sink)
    }

    #[test]
    fn test_gate_suppresses_below_threshold() {
        let (logger, sink) = capture_logger(LogLevel::Warn);
        let buffer = Arc::new(BufferTransport::new());
        logger.add_shared_transport(buffer.clone());

        logger.debug("x");
        assert!(sink.is_empty());
        assert!(buffer.is_empty());

        logger.warn(("slow query", 120));
        assert_eq!(sink.len(), 1);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_transport_receives_flattened_and_raw_args() {
        let (logger, _sink) = capture_logger(LogLevel::Warn);
        let buffer = Arc::new(BufferTransport::new());
        logger.add_shared_transport(buffer.clone());

        logger.warn(("slow query", 120));

        let records = buffer.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].message, "[DB] slow query 120");
        assert_eq!(
            records[0].meta,
            vec!["slow query".to_string(), "120".to_string()]
        );
    }

    #[test]
    fn test_console_line_contains_tag_and_args() {
        let (logger, sink) = capture_logger(LogLevel::Debug);
        logger.warn(("slow query", 120));

        let calls = sink.take();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ConsoleMethod::Warn);
        assert!(calls[0].prefix.contains("DB"));
        assert_eq!(
            calls[0].args,
            vec!["slow query".to_string(), "120".to_string()]
        );
    }

    #[test]
    fn test_none_threshold_suppresses_everything() {
        let (logger, sink) = capture_logger(LogLevel::None);
        for level in LogLevel::all() {
            logger.write(level, "message");
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_has_agrees_with_emission() {
        let (logger, sink) = capture_logger(LogLevel::Info);
        for level in LogLevel::all() {
            let expected = logger.has(level);
            logger.write(level, "probe");
            let emitted = sink.len() == 1;
            let _ = sink.take();
            assert_eq!(expected, emitted, "disagreement at {:?}", level);
        }
    }

    #[test]
    fn test_set_level_takes_effect_on_next_call() {
        let (logger, sink) = capture_logger(LogLevel::Error);
        logger.info("dropped");
        assert!(sink.is_empty());

        logger.set_level(LogLevel::Info);
        logger.info("kept");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_transports_dispatch_in_registration_order() {
        let (logger, _sink) = capture_logger(LogLevel::Debug);
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for id in 0..3 {
            let order = order.clone();
            logger.add_transport(
                move |_: LogLevel, _: &str, _: &[String]| -> anyhow::Result<()> {
                    order.lock().push(id);
                    Ok(())
                },
            );
        }

        logger.info("go");
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_failing_transport_is_isolated_and_reported_once() {
        let (logger, sink) = capture_logger(LogLevel::Debug);
        logger.add_transport(
            |_: LogLevel, _: &str, _: &[String]| -> anyhow::Result<()> { Err(anyhow!("sink down")) },
        );
        let buffer = Arc::new(BufferTransport::new());
        logger.add_shared_transport(buffer.clone());

        logger.info("payload");

        // One application line plus exactly one [Logger] diagnostic.
        let calls = sink.take();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].prefix, "[Logger]");
        assert_eq!(calls[1].method, ConsoleMethod::Warn);
        assert!(calls[1].args[0].contains("sink down"));

        // The working transport registered afterward still got the message.
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_failing_transport_does_not_starve_siblings_over_many_calls() {
        let (logger, _sink) = capture_logger(LogLevel::Debug);
        logger.add_transport(
            |_: LogLevel, _: &str, _: &[String]| -> anyhow::Result<()> { Err(anyhow!("sink down")) },
        );
        let buffer = Arc::new(BufferTransport::new());
        logger.add_shared_transport(buffer.clone());

        for i in 0..100 {
            logger.info(("tick", i));
        }
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_panicking_transport_is_contained() {
        let (logger, sink) = capture_logger(LogLevel::Debug);
        logger.add_transport(|_: LogLevel, _: &str, _: &[String]| -> anyhow::Result<()> {
            panic!("boom")
        });
        let buffer = Arc::new(BufferTransport::new());
        logger.add_shared_transport(buffer.clone());

        logger.error("still alive");
        assert_eq!(buffer.len(), 1);

        let calls = sink.take();
        assert!(calls.iter().any(|c| c.prefix == "[Logger]"));
    }

    #[test]
    fn test_timestamp_fresh_per_call() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("TS")
            .render_mode(RenderMode::Browser)
            .with_timestamp(true)
            .console(sink.clone())
            .build();

        logger.info("first");
        std::thread::sleep(std::time::Duration::from_millis(5));
        logger.info("second");

        let calls = sink.take();
        assert_eq!(calls.len(), 2);
        // Browser mode keeps the timestamp as the last %c segment; the two
        // prefixes must differ because the instants differ.
        assert_ne!(calls[0].prefix, calls[1].prefix);
    }

    #[test]
    fn test_no_timestamp_token_when_disabled() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("TS")
            .render_mode(RenderMode::Browser)
            .console(sink.clone())
            .build();

        logger.info("first");
        let calls = sink.take();
        assert_eq!(calls[0].prefix, "%c[TS]");
        assert_eq!(calls[0].styles.len(), 1);
    }

    #[test]
    fn test_level_prefix_flag() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("P")
            .render_mode(RenderMode::Browser)
            .with_level_prefix(true)
            .console(sink.clone())
            .build();

        logger.fatal("down");
        let calls = sink.take();
        assert!(calls[0].prefix.contains("[FATAL]"));
        // Fatal has no console primitive of its own; it emits as error.
        assert_eq!(calls[0].method, ConsoleMethod::Error);
    }

    #[test]
    fn test_into_log_args_forms() {
        assert_eq!("x".into_log_args(), vec!["x".to_string()]);
        assert_eq!(
            ("a", 1, 2.5).into_log_args(),
            vec!["a".to_string(), "1".to_string(), "2.5".to_string()]
        );
        assert_eq!(
            vec!["a".to_string()].into_log_args(),
            vec!["a".to_string()]
        );
    }
}
