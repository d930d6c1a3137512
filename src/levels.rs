//! Log level definitions for the tagged logger
//!
//! Levels are ordered by severity (Trace < Debug < Info < Warn < Error < Fatal)
//! with `None` acting as a threshold-only sentinel above all real levels.
//! Threshold filtering compares integer ranks, so the declared order and the
//! rank table must stay in sync.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::console::ConsoleMethod;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Suppression sentinel. Valid only as a threshold; setting it silences
    /// every real level. It should never be used as a message level.
    None,
}

impl LogLevel {
    /// Integer rank used for threshold comparison. Strictly increasing in
    /// declaration order; `None` sits above every real level.
    pub fn rank(self) -> u8 {
        match self {
            LogLevel::Trace => 10,
            LogLevel::Debug => 20,
            LogLevel::Info => 30,
            LogLevel::Warn => 40,
            LogLevel::Error => 50,
            LogLevel::Fatal => 60,
            LogLevel::None => 100,
        }
    }

    /// Lower-case wire name, as handed to transports and used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::None => "none",
        }
    }

    /// Upper-case label used in the rendered prefix.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::None => "NONE",
        }
    }

    /// Capitalized name used by the rotating file sink's record format.
    pub fn capitalized(self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
            LogLevel::None => "None",
        }
    }

    /// Map the semantic level onto the nearest console primitive.
    ///
    /// Hosts only offer debug/info/warn/error primitives, so `Fatal` emits
    /// through the error primitive and `Trace`/`None` through the info one.
    /// The displayed label keeps the original level name either way.
    pub fn console_method(self) -> ConsoleMethod {
        match self {
            LogLevel::Debug => ConsoleMethod::Debug,
            LogLevel::Trace | LogLevel::Info | LogLevel::None => ConsoleMethod::Info,
            LogLevel::Warn => ConsoleMethod::Warn,
            LogLevel::Error | LogLevel::Fatal => ConsoleMethod::Error,
        }
    }

    /// All real (emittable) levels in rank order. Excludes the sentinel.
    pub fn all() -> [LogLevel; 6] {
        [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Fatal,
        ]
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    /// Parse from string (case-insensitive). Unknown names fail fast rather
    /// than silently never matching the gate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "none" => Ok(LogLevel::None),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
