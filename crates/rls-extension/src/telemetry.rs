//! Log subscriber installed by [`RlsIntegration::on_load`].
//!
//! Output always goes to stderr because the host may own stdout.
//!
//! [`RlsIntegration::on_load`]: crate::integration::RlsIntegration::on_load

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::{self, SubscriberBuilder, time::UtcTime};

use rls_config::{LogFormat, LoggingConfig};

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

type StderrBuilder = SubscriberBuilder<DefaultFields, Format, EnvFilter, fn() -> io::Stderr>;

/// Proof that the extension's subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format chosen when the subscriber was first installed.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive does not parse.
    #[error("invalid log filter '{directive}': {message}")]
    Filter {
        /// Directive as configured.
        directive: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs the global subscriber on first use.
///
/// The filter is validated on every call. Later calls leave the installed
/// subscriber alone and report the format it was installed with, whatever
/// `config` now says.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable directive and
/// [`TelemetryError::Subscriber`] when the host installed its own
/// subscriber first.
pub fn initialise(config: &LoggingConfig) -> Result<TelemetryHandle, TelemetryError> {
    let filter = parse_filter(config.log_filter())?;
    INSTALLED
        .get_or_try_init(|| install(config.log_format(), filter))
        .map(|format| TelemetryHandle { format: *format })
}

fn parse_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|error| TelemetryError::Filter {
        directive: directive.to_owned(),
        message: error.to_string(),
    })
}

fn stderr_builder(filter: EnvFilter) -> StderrBuilder {
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(io::stderr as fn() -> io::Stderr)
        .with_ansi(io::stderr().is_terminal())
}

fn install(format: LogFormat, filter: EnvFilter) -> Result<LogFormat, TelemetryError> {
    let builder = stderr_builder(filter);

    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(
            builder
                .with_timer(UtcTime::rfc_3339())
                .json()
                .flatten_event(true)
                .finish(),
        ),
        LogFormat::Compact => Box::new(builder.without_time().compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(format)
}
