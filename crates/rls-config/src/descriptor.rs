//! Launch and identification data for the language server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::{RLS_LAUNCHER_ARGS, SERVER_NAME, resolve_launcher};
use crate::error::ConfigError;

/// Free-form JSON object forwarded to the server untouched.
pub type SettingsMap = Map<String, Value>;

/// A language served by the integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    language_id: String,
    scopes: Vec<String>,
    syntaxes: Vec<String>,
}

impl LanguageConfig {
    /// Creates a language entry.
    #[must_use]
    pub fn new(language_id: impl Into<String>, scopes: Vec<String>, syntaxes: Vec<String>) -> Self {
        Self {
            language_id: language_id.into(),
            scopes,
            syntaxes,
        }
    }

    /// LSP language identifier, such as `rust`.
    #[must_use]
    pub const fn language_id(&self) -> &str {
        self.language_id.as_str()
    }

    /// File-type scope selectors, such as `source.rust`.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Host syntax names bound to this language.
    #[must_use]
    pub fn syntaxes(&self) -> &[String] {
        &self.syntaxes
    }
}

/// Describes how the host launches and identifies the server.
///
/// The descriptor is immutable once built. The host keeps it for the
/// lifetime of the editor process and hands it to its session registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    name: String,
    command: Vec<String>,
    tcp_port: Option<u16>,
    languages: Vec<LanguageConfig>,
    enabled: bool,
    initialization_options: SettingsMap,
    settings: SettingsMap,
    env: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsOverlay {
    enabled: Option<bool>,
    command: Option<Vec<String>>,
    initialization_options: Option<SettingsMap>,
    settings: Option<SettingsMap>,
    env: Option<BTreeMap<String, String>>,
}

impl ServerDescriptor {
    /// Builds the stock `rls` descriptor.
    ///
    /// The launcher honours the `RLS_LAUNCHER` environment variable; the
    /// argument list is fixed.
    #[must_use]
    pub fn rls_default() -> Self {
        Self::with_launcher(resolve_launcher(std::env::var_os(crate::LAUNCHER_ENV)))
    }

    /// Builds the stock descriptor around an explicit launcher program.
    #[must_use]
    pub fn with_launcher(launcher: impl Into<String>) -> Self {
        let mut command = vec![launcher.into()];
        command.extend(RLS_LAUNCHER_ARGS.iter().map(|arg| (*arg).to_owned()));
        Self {
            name: SERVER_NAME.to_owned(),
            command,
            tcp_port: None,
            languages: vec![LanguageConfig::new(
                "rust",
                vec![String::from("source.rust")],
                vec![String::from("Rust")],
            )],
            enabled: false,
            initialization_options: SettingsMap::new(),
            settings: SettingsMap::new(),
            env: BTreeMap::new(),
        }
    }

    /// Overlays a JSON settings document on the stock descriptor.
    ///
    /// Recognised keys are `enabled`, `command`, `initialization_options`,
    /// `settings` and `env`; anything else is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::EmptyCommand`] when `command` is an empty list.
    pub fn from_settings_json(input: &str) -> Result<Self, ConfigError> {
        let overlay: SettingsOverlay =
            serde_json::from_str(input).map_err(|source| ConfigError::Parse { source })?;
        Self::rls_default().apply(overlay)
    }

    fn apply(mut self, overlay: SettingsOverlay) -> Result<Self, ConfigError> {
        if let Some(command) = overlay.command {
            if command.is_empty() {
                return Err(ConfigError::EmptyCommand);
            }
            self.command = command;
        }
        if let Some(enabled) = overlay.enabled {
            self.enabled = enabled;
        }
        if let Some(options) = overlay.initialization_options {
            self.initialization_options = options;
        }
        if let Some(settings) = overlay.settings {
            self.settings = settings;
        }
        if let Some(env) = overlay.env {
            self.env = env;
        }
        Ok(self)
    }

    /// Identifier used by the host's session registry.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Full launch command, launcher first.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Launcher program that must be resolvable before the server starts.
    #[must_use]
    pub fn launcher(&self) -> &str {
        self.command.first().map_or("", String::as_str)
    }

    /// TCP port when the server speaks over a socket instead of stdio.
    #[must_use]
    pub const fn tcp_port(&self) -> Option<u16> {
        self.tcp_port
    }

    /// Languages served by the integration.
    #[must_use]
    pub fn languages(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Whether the server starts without the user opting in.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Options sent in the `initialize` request.
    #[must_use]
    pub const fn initialization_options(&self) -> &SettingsMap {
        &self.initialization_options
    }

    /// Settings answered to `workspace/configuration`.
    #[must_use]
    pub const fn settings(&self) -> &SettingsMap {
        &self.settings
    }

    /// Environment variables added to the server process.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Whether the descriptor serves the given scope selector.
    #[must_use]
    pub fn serves_scope(&self, scope: &str) -> bool {
        self.languages
            .iter()
            .flat_map(|language| language.scopes().iter())
            .any(|candidate| scope.starts_with(candidate.as_str()))
    }
}
