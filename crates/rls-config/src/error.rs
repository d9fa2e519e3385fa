//! Errors raised while overlaying user settings on the server descriptor.

use thiserror::Error;

/// Errors produced by [`crate::ServerDescriptor::from_settings_json`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings document was not valid JSON for the expected shape.
    #[error("invalid rls settings: {source}")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The settings replaced the launch command with an empty list.
    #[error("rls launch command must contain at least the launcher program")]
    EmptyCommand,
}
