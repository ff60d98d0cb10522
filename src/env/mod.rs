//! Deployment environment metadata
//!
//! An environment names the target namespace and the domain used in the
//! deploy summary. Environments live under `$VELA_HOME/envs/<name>.json`
//! with the current environment name in `$VELA_HOME/curenv`. Missing state
//! falls back to the built-in `default` environment; a present but broken
//! env file is an error, since silently defaulting would deploy into the
//! wrong namespace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VelaError, file_read_failed, io_error};

/// Name of the built-in fallback environment
pub const DEFAULT_ENV: &str = "default";

/// File under `$VELA_HOME` holding the current environment name
const CURENV_FILE: &str = "curenv";

/// Directory under `$VELA_HOME` holding one JSON file per environment
const ENVS_DIR: &str = "envs";

/// Target environment for a deploy run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvMeta {
    /// Environment name (e.g. "default", "staging")
    pub name: String,
    /// Namespace every resource in a bundle is scoped to
    pub namespace: String,
    /// Domain used for the application URL in the deploy summary
    pub domain: String,
}

impl Default for EnvMeta {
    fn default() -> Self {
        Self {
            name: DEFAULT_ENV.to_string(),
            namespace: "default".to_string(),
            domain: "localhost".to_string(),
        }
    }
}

/// Get the vela home directory
///
/// Uses `~/.vela`, overridable with the `VELA_HOME` environment variable.
pub fn vela_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("VELA_HOME") {
        return Ok(PathBuf::from(home));
    }

    let base = dirs::home_dir().ok_or_else(|| io_error("Could not determine home directory"))?;
    Ok(base.join(".vela"))
}

impl EnvMeta {
    /// Load the current environment from `$VELA_HOME`
    pub fn load() -> Result<Self> {
        Self::load_from(&vela_home()?)
    }

    /// Load the current environment from an explicit home directory
    pub fn load_from(home: &Path) -> Result<Self> {
        let curenv_path = home.join(CURENV_FILE);
        let name = match std::fs::read_to_string(&curenv_path) {
            Ok(contents) => contents.trim().to_string(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(file_read_failed(
                    curenv_path.display().to_string(),
                    e.to_string(),
                ));
            }
        };

        if name.is_empty() {
            return Ok(Self::default());
        }

        let env_path = home.join(ENVS_DIR).join(format!("{name}.json"));
        let raw = std::fs::read_to_string(&env_path).map_err(|e| VelaError::EnvLoadFailed {
            name: name.clone(),
            reason: format!("{}: {}", env_path.display(), e),
        })?;

        serde_json::from_str(&raw).map_err(|e| VelaError::EnvLoadFailed {
            name,
            reason: e.to_string(),
        })
    }

    /// Persist this environment under the given home and mark it current
    #[allow(dead_code)]
    pub fn save_to(&self, home: &Path) -> Result<()> {
        let envs_dir = home.join(ENVS_DIR);
        std::fs::create_dir_all(&envs_dir)?;

        let env_path = envs_dir.join(format!("{}.json", self.name));
        let raw = serde_json::to_string_pretty(self).map_err(|e| VelaError::EnvLoadFailed {
            name: self.name.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&env_path, raw)?;
        std::fs::write(home.join(CURENV_FILE), &self.name)?;
        Ok(())
    }
}
