//! Console sink abstraction
//!
//! The host's console primitives are an injected capability rather than a
//! hard-coded call, so the renderer can emit through a terminal writer, the
//! browser console, or an in-memory sink behind the same contract.

use parking_lot::Mutex;
use std::io::{stderr, stdout, ErrorKind, Write};

/// The console primitive a message is emitted through.
///
/// Semantic levels without a matching primitive are remapped before emission
/// (see `LogLevel::console_method`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Debug,
    Info,
    Warn,
    Error,
}

/// Host console-equivalent the renderer emits through.
///
/// `prefix` is the only constructed string; `args` are the caller's original
/// arguments rendered individually so the sink can lay them out natively.
/// `styles` carries the browser-mode style directives matching the `%c`
/// placeholders in the prefix and is empty in terminal mode.
pub trait ConsoleSink: Send + Sync {
    fn emit(&self, method: ConsoleMethod, prefix: &str, styles: &[String], args: &[String]);
}

/// Default sink for terminal/server runtimes.
///
/// Warn and error primitives map to stderr, everything else to stdout,
/// mirroring what host consoles do with their level-specific primitives.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl ConsoleSink for TerminalSink {
    fn emit(&self, method: ConsoleMethod, prefix: &str, _styles: &[String], args: &[String]) {
        let mut line = String::from(prefix);
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        match method {
            ConsoleMethod::Warn | ConsoleMethod::Error => write_safe(&mut stderr(), &line),
            ConsoleMethod::Debug | ConsoleMethod::Info => write_safe(&mut stdout(), &line),
        }
    }
}

/// Write a line, ignoring broken pipes so piped consumers can exit early.
fn write_safe(out: &mut impl Write, line: &str) {
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
        let _ = writeln!(stderr(), "Logger output error: {}", e);
    }
    let _ = out.flush();
}

/// Browser console sink backed by `web_sys::console`.
///
/// The prefix, style directives, and raw arguments are pushed as separate
/// items of one structured console call so the browser applies its `%c`
/// styling and its own object inspection to the arguments.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserSink;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserSink {
    fn emit(&self, method: ConsoleMethod, prefix: &str, styles: &[String], args: &[String]) {
        use wasm_bindgen::JsValue;

        let items = js_sys::Array::new();
        items.push(&JsValue::from_str(prefix));
        for style in styles {
            items.push(&JsValue::from_str(style));
        }
        for arg in args {
            items.push(&JsValue::from_str(arg));
        }
        match method {
            ConsoleMethod::Debug => web_sys::console::debug(&items),
            ConsoleMethod::Info => web_sys::console::info(&items),
            ConsoleMethod::Warn => web_sys::console::warn(&items),
            ConsoleMethod::Error => web_sys::console::error(&items),
        }
    }
}

/// A captured console call, as observed by [`MemorySink`].
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub method: ConsoleMethod,
    pub prefix: String,
    pub styles: Vec<String>,
    pub args: Vec<String>,
}

/// In-memory console sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Mutex<Vec<CapturedCall>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls captured so far.
    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain and return every captured call.
    pub fn take(&self) -> Vec<CapturedCall> {
        std::mem::take(&mut *self.calls.lock())
    }
}

impl ConsoleSink for MemorySink {
    fn emit(&self, method: ConsoleMethod, prefix: &str, styles: &[String], args: &[String]) {
        self.calls.lock().push(CapturedCall {
            method,
            prefix: prefix.to_string(),
            styles: styles.to_vec(),
            args: args.to_vec(),
        });
    }
}
