//! Startup gate on the launcher toolchain.
//!
//! `rls` is started through `rustup`, so the integration refuses to start
//! when the launcher cannot be found on the executable search path.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

use rls_config::{LAUNCHER_ENV, resolve_launcher};

const TOOLCHAIN_TARGET: &str = "rls_extension::toolchain";

/// Resolves program names to executables.
pub trait ExecutableLookup {
    /// Returns the executable `program` resolves to, if any.
    fn find(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up with `which`.
///
/// The process `PATH` and working directory are used unless overridden.
/// Programs containing a path separator are resolved against the working
/// directory instead of the search path.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLookup {
    search_path: Option<OsString>,
    cwd: Option<PathBuf>,
}

impl SearchPathLookup {
    /// Uses the process `PATH` and working directory.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Uses an explicit search path in the platform's `PATH` syntax.
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
            cwd: None,
        }
    }

    /// Resolves relative program paths against `cwd`.
    #[must_use]
    pub fn relative_to(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl ExecutableLookup for SearchPathLookup {
    fn find(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        let resolved = match (&self.search_path, &self.cwd) {
            (None, None) => which::which(program),
            (search_path, cwd) => {
                let cwd = match cwd {
                    Some(cwd) => cwd.clone(),
                    None => env::current_dir().ok()?,
                };
                let search_path = search_path.clone().or_else(|| env::var_os("PATH"));
                which::which_in(program, search_path, cwd)
            }
        };
        match resolved {
            Ok(path) => Some(path),
            Err(error) => {
                debug!(target: TOOLCHAIN_TARGET, program, %error, "program not found");
                None
            }
        }
    }
}

/// Whether `launcher` resolves through `lookup`.
#[must_use]
pub fn toolchain_available(lookup: &dyn ExecutableLookup, launcher: &str) -> bool {
    let resolved = lookup.find(launcher);
    debug!(
        target: TOOLCHAIN_TARGET,
        launcher,
        resolved = ?resolved,
        "checked launcher availability"
    );
    resolved.is_some()
}

/// Whether the `rustup` launcher (or its `RLS_LAUNCHER` override) is on
/// the process `PATH`.
#[must_use]
pub fn is_toolchain_available() -> bool {
    let launcher = resolve_launcher(env::var_os(LAUNCHER_ENV));
    toolchain_available(&SearchPathLookup::from_env(), &launcher)
}
