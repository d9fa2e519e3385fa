use std::ffi::OsString;

/// Identifier under which the integration registers with the host.
pub const SERVER_NAME: &str = "rls";

/// Launcher program that must be present on the search path.
pub const RLS_LAUNCHER: &str = "rustup";

/// Fixed arguments passed to the launcher to start the server.
pub const RLS_LAUNCHER_ARGS: [&str; 3] = ["run", "nightly", "rls"];

/// Environment variable overriding the launcher program.
pub const LAUNCHER_ENV: &str = "RLS_LAUNCHER";

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

pub(crate) fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Picks the launcher program from an optional override.
///
/// Blank overrides are ignored so an exported-but-empty variable does not
/// produce an unlaunchable descriptor.
#[must_use]
pub fn resolve_launcher(raw_override: Option<OsString>) -> String {
    raw_override
        .map(|value| value.to_string_lossy().trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| RLS_LAUNCHER.to_owned())
}
