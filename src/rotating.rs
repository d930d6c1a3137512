//! Rotating-file production sink
//!
//! A [`Transport`]-compatible sink that persists records under a storage
//! directory with daily rotation, a per-file size cap, and retention pruning.
//! Streams are split the way production deployments expect: `combined.log`
//! receives every record, `error.log` receives error-and-above, and
//! `exceptions.log` receives panic records captured via [`install_panic_hook`].
//!
//! Records are rendered as `[<localized timestamp>] <Capitalized level>:
//! <message>`, with an optional detail block (a backtrace, typically) on the
//! following lines. In the Development environment every record is echoed to
//! the console as well.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Error;
use crate::levels::LogLevel;
use crate::transport::Transport;

/// Rotate when the current file would exceed 20 MB.
const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Keep 14 days of rotated history.
const RETAIN_DAYS: i64 = 14;

/// Deployment environment. Development additionally echoes every persisted
/// record to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnv {
    Development,
    Production,
}

/// One log file with its rotation bookkeeping.
struct Stream {
    name: &'static str,
    file: Option<File>,
    day: NaiveDate,
    written: u64,
}

impl Stream {
    fn new(name: &'static str) -> Self {
        Stream {
            name,
            file: None,
            day: Local::now().date_naive(),
            written: 0,
        }
    }

    fn path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.log", self.name))
    }

    fn write_line(
        &mut self,
        dir: &Path,
        max_size: u64,
        retain_days: i64,
        line: &str,
    ) -> std::io::Result<()> {
        let today = Local::now().date_naive();
        let projected = self.written + line.len() as u64 + 1;
        if self.file.is_some() && (today != self.day || projected > max_size) {
            self.rotate(dir, retain_days)?;
        }

        if self.file.is_none() {
            let path = self.path(dir);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            self.written = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.day = today;
            self.file = Some(file);
        }

        let file = self.file.as_mut().unwrap();
        writeln!(file, "{}", line)?;
        file.flush()?;
        self.written += line.len() as u64 + 1;
        Ok(())
    }

    /// Close the active file, rename it after the day it was written, and
    /// prune rotated files past the retention window.
    fn rotate(&mut self, dir: &Path, retain_days: i64) -> std::io::Result<()> {
        self.file = None;
        let current = self.path(dir);
        if current.exists() {
            let mut target = dir.join(format!("{}-{}.log", self.name, self.day));
            let mut counter = 1;
            while target.exists() {
                target = dir.join(format!("{}-{}-{}.log", self.name, self.day, counter));
                counter += 1;
            }
            fs::rename(&current, &target)?;
        }
        self.written = 0;
        self.prune(dir, retain_days);
        Ok(())
    }

    /// Remove rotated files older than the retention window. Pruning is best
    /// effort; unreadable entries are skipped.
    fn prune(&self, dir: &Path, retain_days: i64) {
        let cutoff = Local::now().date_naive() - chrono::Duration::days(retain_days);
        let prefix = format!("{}-", self.name);
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(name) => name,
                None => continue,
            };
            let date_part = match name.strip_prefix(&prefix) {
                Some(rest) if rest.len() >= 10 => &rest[..10],
                _ => continue,
            };
            if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
                if date < cutoff {
                    let _ = fs::remove_file(entry.path());
                }
            }
        }
    }
}

struct SinkState {
    combined: Stream,
    errors: Stream,
    exceptions: Stream,
}

/// Rotating-file sink; see the module docs for the layout and policies.
pub struct RotatingFileSink {
    dir: PathBuf,
    env: DeployEnv,
    max_file_size: u64,
    retain_days: i64,
    state: Mutex<SinkState>,
}

impl RotatingFileSink {
    /// Create the sink, ensuring the storage directory exists.
    pub fn new(dir: impl Into<PathBuf>, env: DeployEnv) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(RotatingFileSink {
            dir,
            env,
            max_file_size: MAX_FILE_SIZE,
            retain_days: RETAIN_DAYS,
            state: Mutex::new(SinkState {
                combined: Stream::new("combined"),
                errors: Stream::new("error"),
                exceptions: Stream::new("exceptions"),
            }),
        })
    }

    /// Override the per-file size cap (default 20 MB).
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Override the retention window (default 14 days).
    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retain_days = days;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a record. Error-and-above records are additionally written to
    /// the error stream; `detail` (a backtrace, typically) lands on the lines
    /// following the record.
    pub fn append(
        &self,
        level: LogLevel,
        message: &str,
        detail: Option<&str>,
    ) -> std::result::Result<(), Error> {
        let mut line = format!(
            "[{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level.capitalized(),
            message
        );
        if let Some(detail) = detail {
            line.push('\n');
            line.push_str(detail);
        }

        let mut state = self.state.lock();
        self.write_stream(&mut state.combined, &line)?;
        if level.rank() >= LogLevel::Error.rank() {
            self.write_stream(&mut state.errors, &line)?;
        }
        drop(state);

        if self.env == DeployEnv::Development {
            if level.rank() >= LogLevel::Error.rank() {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
        Ok(())
    }

    /// Persist a panic record to the exceptions stream.
    pub fn append_exception(&self, message: &str) -> std::result::Result<(), Error> {
        let line = format!(
            "[{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            LogLevel::Fatal.capitalized(),
            message
        );
        let mut state = self.state.lock();
        self.write_stream(&mut state.exceptions, &line)
    }

    fn write_stream(&self, stream: &mut Stream, line: &str) -> std::result::Result<(), Error> {
        stream
            .write_line(&self.dir, self.max_file_size, self.retain_days, line)
            .map_err(|source| Error::SinkWrite {
                path: stream.path(&self.dir),
                source,
            })
    }
}

impl Transport for RotatingFileSink {
    fn send(&self, level: LogLevel, message: &str, _meta: &[String]) -> Result<()> {
        self.append(level, message, None)?;
        Ok(())
    }
}

/// Route panic reports (the uncaught-exception analog) to the sink's
/// exceptions stream, then fall through to the previous hook.
pub fn install_panic_hook(sink: Arc<RotatingFileSink>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = sink.append_exception(&info.to_string());
        previous(info);
    }));
}
