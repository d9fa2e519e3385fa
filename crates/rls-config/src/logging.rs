use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::defaults::{default_log_filter_string, default_log_format};

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
    /// Human-readable single line output.
    #[default]
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Logging settings for the integration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive.
    #[serde(default = "default_log_filter_string")]
    pub filter: String,
    /// Output format.
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter_string(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Returns the configured filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.filter.as_str()
    }

    /// Returns the configured output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.format
    }
}
