//! Language-handler surface the host drives through the session lifecycle.

use tracing::{debug, info, warn};

use rls_config::{LoggingConfig, ServerDescriptor};

use crate::client::ExtensionClient;
use crate::errors::ExtensionError;
use crate::host::Window;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::toolchain::{ExecutableLookup, SearchPathLookup, toolchain_available};

const INTEGRATION_TARGET: &str = "rls_extension::integration";

/// The `rls` integration.
///
/// Generic over the executable lookup so the startup gate can be exercised
/// without touching the process `PATH`.
#[derive(Debug, Clone)]
pub struct RlsIntegration<L = SearchPathLookup> {
    descriptor: ServerDescriptor,
    lookup: L,
}

impl RlsIntegration<SearchPathLookup> {
    /// Stock descriptor, looked up on the process `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lookup(ServerDescriptor::rls_default(), SearchPathLookup::from_env())
    }
}

impl Default for RlsIntegration<SearchPathLookup> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ExecutableLookup> RlsIntegration<L> {
    /// Builds an integration from explicit parts.
    #[must_use]
    pub const fn with_lookup(descriptor: ServerDescriptor, lookup: L) -> Self {
        Self { descriptor, lookup }
    }

    /// Server name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Launch descriptor handed to the host.
    #[must_use]
    pub const fn descriptor(&self) -> &ServerDescriptor {
        &self.descriptor
    }

    /// Called once when the host loads the plugin.
    ///
    /// Installs the extension's log subscriber. Hosts that already own a
    /// global `tracing` subscriber skip this hook.
    ///
    /// # Errors
    ///
    /// Returns the [`TelemetryError`] raised while installing the
    /// subscriber.
    pub fn on_load(&self, logging: &LoggingConfig) -> Result<TelemetryHandle, TelemetryError> {
        let handle = telemetry::initialise(logging)?;
        debug!(target: INTEGRATION_TARGET, server = self.name(), "plugin loaded");
        Ok(handle)
    }

    /// Decides whether the host may start the server in `window`.
    ///
    /// When the launcher is missing the window shows a status message and
    /// `false` is returned.
    pub fn on_start(&self, window: &mut dyn Window) -> bool {
        let launcher = self.descriptor.launcher();
        if toolchain_available(&self.lookup, launcher) {
            debug!(target: INTEGRATION_TARGET, window = %window.id(), launcher, "starting server");
            return true;
        }

        let error = ExtensionError::missing_toolchain(launcher, self.descriptor.name());
        info!(target: INTEGRATION_TARGET, window = %window.id(), %error, "server not started");
        window.status_message(&error.to_string());
        false
    }

    /// Registers the notification relay once the session is initialised.
    ///
    /// A repeated call leaves the existing registration in place.
    pub fn on_initialized(&self, client: &mut ExtensionClient) {
        if let Err(error) = client.register_notifications() {
            warn!(target: INTEGRATION_TARGET, %error, "notification relay not registered");
        }
    }

    /// Releases the client state of a session that has shut down.
    pub fn on_session_ended(&self, client: &mut ExtensionClient) {
        let abandoned = client.session_closed();
        if abandoned > 0 {
            info!(target: INTEGRATION_TARGET, abandoned, "dropped requests of ended session");
        }
    }
}
