//! Tagged logging with level filtering and environment-aware rendering
//!
//! This crate provides a per-subsystem `Logger` with:
//! - Standard log levels (Trace/Debug/Info/Warn/Error/Fatal) plus a `None`
//!   suppression threshold
//! - Runtime-environment detection (browser / react-native / terminal),
//!   decided once at construction, selecting the rendering strategy
//! - Dual-format prefixes: `%c` style directives for browser consoles, ANSI
//!   escapes for terminals
//! - Pluggable transports that observe every emitted record, with
//!   per-transport failure isolation
//!
//! ## Usage
//!
//! ```rust
//! use taglog::{Logger, LogLevel};
//!
//! let log = Logger::builder("DB").level(LogLevel::Warn).build();
//!
//! log.debug("filtered out");
//! log.warn(("slow query", 120));
//! ```
//!
//! Transports fan records out to external sinks:
//!
//! ```rust
//! use taglog::{Logger, LogLevel};
//!
//! let log = Logger::new("API");
//! log.add_transport(
//!     |level: LogLevel, message: &str, _meta: &[String]| -> anyhow::Result<()> {
//!         // forward to a file, buffer, or network sink
//!         let _ = (level, message);
//!         Ok(())
//!     },
//! );
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod facade;
pub mod levels;
pub mod logger;
pub mod render;
pub mod rotating;
pub mod runtime;
pub mod transport;

pub use config::LoggerConfig;
pub use console::{ConsoleMethod, ConsoleSink, MemorySink, TerminalSink};
pub use error::Error;
pub use facade::{init_facade, LogFacade};
pub use levels::LogLevel;
pub use logger::{IntoLogArgs, Logger, LoggerBuilder};
pub use rotating::{install_panic_hook, DeployEnv, RotatingFileSink};
pub use runtime::{classify, detect, RenderMode, RuntimeHints};
pub use transport::{BufferTransport, Transport, TransportRecord};

#[cfg(target_arch = "wasm32")]
pub use console::BrowserSink;
