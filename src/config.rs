//! Logger configuration
//!
//! Serde-backed settings that can be embedded in an application's TOML
//! config. Every field except the tag has a safe default, so a minimal
//! `tag = "APP"` entry is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::levels::LogLevel;
use crate::logger::Logger;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub tag: String,
    #[serde(default = "default_level")]
    pub level: LogLevel,
    #[serde(default)]
    pub with_timestamp: bool,
    #[serde(default)]
    pub with_level_prefix: bool,
}

fn default_level() -> LogLevel {
    LogLevel::Debug
}

impl LoggerConfig {
    pub fn new(tag: impl Into<String>) -> Self {
        LoggerConfig {
            tag: tag.into(),
            level: default_level(),
            with_timestamp: false,
            with_level_prefix: false,
        }
    }

    /// Load from a TOML file. Unknown level names fail here, at the config
    /// boundary, rather than being silently dropped by the gate later.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read logger config from {}", path.display()))?;
        let config: LoggerConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse logger config from {}", path.display()))?;
        Ok(config)
    }

    /// Build a logger from these settings.
    pub fn build(&self) -> Logger {
        Logger::builder(self.tag.clone())
            .level(self.level)
            .with_timestamp(self.with_timestamp)
            .with_level_prefix(self.with_level_prefix)
            .build()
    }
}

impl Logger {
    pub fn from_config(config: &LoggerConfig) -> Logger {
        config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: LoggerConfig = toml::from_str(r#"tag = "APP""#).unwrap();
        assert_eq!(config.tag, "APP");
        assert_eq!(config.level, LogLevel::Debug);
        assert!(!config.with_timestamp);
        assert!(!config.with_level_prefix);
    }

    #[test]
    fn test_full_config_round_trip() {
        let config: LoggerConfig = toml::from_str(
            r#"
            tag = "DB"
            level = "warn"
            with_timestamp = true
            with_level_prefix = true
            "#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(config.with_timestamp);

        let logger = config.build();
        assert_eq!(logger.tag(), "DB");
        assert_eq!(logger.level(), LogLevel::Warn);
        assert!(logger.has(LogLevel::Error));
        assert!(!logger.has(LogLevel::Info));
    }

    #[test]
    fn test_unknown_level_fails_fast() {
        let parsed: std::result::Result<LoggerConfig, _> = toml::from_str(
            r#"
            tag = "DB"
            level = "loud"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = LoggerConfig::load("/nonexistent/taglog.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/taglog.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.toml");
        fs::write(&path, "tag = \"FILE\"\nlevel = \"error\"\n").unwrap();

        let config = LoggerConfig::load(&path).unwrap();
        assert_eq!(config.tag, "FILE");
        assert_eq!(config.level, LogLevel::Error);
    }
}
