//! Error types for the logging crate

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),

    #[error("failed to write log file {path}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
