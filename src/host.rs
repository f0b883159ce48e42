//! Host environment used to compute option defaults.
//!
//! Everything the catalogue reads from the outside world goes through
//! [`HostEnvironment`], so tests can build catalogues for any platform,
//! environment, and project layout.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::appfile::{AppIdentity, Appfile, NoAppIdentity};

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Whether the HTML summary can be opened after a run.
    ///
    /// Only supported on macOS for now.
    pub fn can_open_summary(self) -> bool {
        matches!(self, Platform::MacOs)
    }
}

/// Snapshot of the process environment relevant to option defaults.
pub struct HostEnvironment {
    vars: HashMap<String, String>,
    project_dir: PathBuf,
    platform: Platform,
    identity: Box<dyn AppIdentity + Send + Sync>,
}

impl HostEnvironment {
    /// An environment rooted at `project_dir` with no variables, the current
    /// platform, and no app identity.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            project_dir: project_dir.into(),
            platform: Platform::current(),
            identity: Box::new(NoAppIdentity),
        }
    }

    /// Capture the real process environment.
    ///
    /// The project directory is the working directory; the app identity comes
    /// from the project's `Appfile` if one exists.
    pub fn detect() -> Self {
        let project_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                log::warn!("Could not determine working directory: {}", e);
                PathBuf::from(".")
            }
        };

        let mut host = Self::new(project_dir);
        // Non-UTF-8 variables can't hold option values; skip them
        host.vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        if let Some(appfile) = Appfile::locate(&host.project_dir) {
            host.identity = Box::new(appfile);
        }
        log::debug!(
            "Host environment: {:?}, project dir {}",
            host.platform,
            host.project_dir.display()
        );
        host
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_app_identity(mut self, identity: impl AppIdentity + Send + Sync + 'static) -> Self {
        self.identity = Box::new(identity);
        self
    }

    /// Value of an environment variable. Empty values count as unset.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn app_identity(&self) -> &dyn AppIdentity {
        self.identity.as_ref()
    }
}

impl fmt::Debug for HostEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostEnvironment")
            .field("vars", &self.vars.len())
            .field("project_dir", &self.project_dir)
            .field("platform", &self.platform)
            .finish()
    }
}
