//! Application identity and the locations derived from it.

use std::env;
use std::path::{Path, PathBuf};

pub const ORGANIZATION: &str = "TripLogger";
pub const APPLICATION: &str = "Trip Logger";

/// Organization + application pair that namespaces settings and the
/// single-instance token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub organization: String,
    pub application: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self::new(ORGANIZATION, APPLICATION)
    }
}

impl AppIdentity {
    pub fn new(organization: &str, application: &str) -> Self {
        Self {
            organization: organization.to_string(),
            application: application.to_string(),
        }
    }

    /// Platform config directory scoped by organization and application,
    /// e.g. `~/.config/TripLogger/Trip Logger` on Linux.
    pub fn config_dir(&self) -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.organization)
            .join(&self.application)
    }

    /// Name of the single-instance token, `<org>_<app>_InstanceLock`.
    pub fn instance_token(&self) -> String {
        format!(
            "{}_{}_InstanceLock",
            sanitize(&self.organization),
            sanitize(&self.application)
        )
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Resolved on-disk locations for one run.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub lock_dir: PathBuf,
}

impl AppPaths {
    /// Paths for `identity`. An explicit config directory (tests, portable
    /// installs) also hosts the instance token.
    pub fn resolve(identity: &AppIdentity, config_dir_override: Option<&Path>) -> Self {
        match config_dir_override {
            Some(dir) => Self {
                config_dir: dir.to_path_buf(),
                lock_dir: dir.to_path_buf(),
            },
            None => Self {
                config_dir: identity.config_dir(),
                lock_dir: dirs::runtime_dir().unwrap_or_else(env::temp_dir),
            },
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yml")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.yml")
    }
}
