//! Static configuration for the `rls` language server integration.
//!
//! The host editor consumes a [`ServerDescriptor`] once at startup to learn
//! how to launch the server and which documents it serves. Everything here is
//! literal data: building the default descriptor cannot fail, and user
//! settings are overlaid on top of it through
//! [`ServerDescriptor::from_settings_json`].

mod defaults;
mod descriptor;
mod error;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, LAUNCHER_ENV, RLS_LAUNCHER, RLS_LAUNCHER_ARGS, SERVER_NAME,
    default_log_filter, default_log_format, resolve_launcher,
};
pub use descriptor::{LanguageConfig, ServerDescriptor, SettingsMap};
pub use error::ConfigError;
pub use logging::{LogFormat, LogFormatParseError, LoggingConfig};
