//! Bridge to the `log` crate facade
//!
//! Lets `log::info!` and friends route through a [`Logger`], so code written
//! against the standard facade shares the tagged rendering and transport
//! pipeline.

use crate::levels::LogLevel;
use crate::logger::Logger;

/// Adapter implementing `log::Log` on top of a [`Logger`].
pub struct LogFacade {
    logger: Logger,
}

impl LogFacade {
    pub fn new(logger: Logger) -> Self {
        LogFacade { logger }
    }
}

fn convert(level: log::Level) -> LogLevel {
    match level {
        log::Level::Trace => LogLevel::Trace,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Info => LogLevel::Info,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Error => LogLevel::Error,
    }
}

impl log::Log for LogFacade {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.logger.has(convert(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.logger
                .write(convert(record.level()), record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Install `logger` as the process-wide `log` facade backend.
///
/// The facade's max level is opened up to `Trace`; the logger's own
/// threshold does the filtering.
pub fn init_facade(logger: Logger) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogFacade::new(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
