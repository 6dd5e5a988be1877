//! Persisted project configuration
//!
//! The configuration is a small declarative record: which services are
//! selected, their published ports, the accumulated environment values
//! and the data path volumes are mounted under. It is read at the start
//! of every command and written back whole with a temp-file-then-rename
//! replace, so the file is never left half-written.
//!
//! devstack is a single-operator tool: there is no file locking, and
//! concurrent invocations against the same project may race on the
//! config and compose files. This is a documented constraint.

use crate::error::{DevstackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "devstack.yaml";
/// Generated compose file name (relative to the working directory)
pub const COMPOSE_FILE_NAME: &str = "docker-compose.devstack.yaml";
/// Generated environment file name (relative to the working directory)
pub const ENV_FILE_NAME: &str = ".env";
/// Environment variable overriding the config file path
pub const CONFIG_ENV_VAR: &str = "DEVSTACK_CONFIG";
/// Environment variable overriding the data path
pub const DATA_ENV_VAR: &str = "DEVSTACK_DATA";

const CONFIG_VERSION: &str = "1.0";

/// Persisted configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Selected services, in insertion order
    #[serde(default)]
    pub services: Vec<String>,
    /// Published host port per selected service
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, u16>,
    /// Accumulated environment values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Filesystem root for per-service data directories
    #[serde(default)]
    pub data_path: PathBuf,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Config {
    /// Create an empty configuration with the given data path
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            services: Vec::new(),
            ports: BTreeMap::new(),
            env: BTreeMap::new(),
            data_path,
        }
    }
}

/// Resolve the config file path from an optional override
///
/// The override comes from `DEVSTACK_CONFIG`, read once in `main` and
/// injected here so the resolution stays testable without touching
/// process environment.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> PathBuf {
    match override_path {
        Some(path) => path,
        None => dirs::config_dir()
            .map(|dir| dir.join("devstack").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
    }
}

/// Resolve the data path from an optional override (`DEVSTACK_DATA`)
pub fn resolve_data_path(override_path: Option<PathBuf>) -> PathBuf {
    match override_path {
        Some(path) => path,
        None => dirs::data_dir()
            .map(|dir| dir.join("devstack"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/devstack")),
    }
}

/// Loads and saves the configuration file
pub struct ConfigStore {
    path: PathBuf,
    default_data_path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the given config path
    pub fn new(path: PathBuf, default_data_path: PathBuf) -> Self {
        Self {
            path,
            default_data_path,
        }
    }

    /// Path of the config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, or an empty default if the file is absent
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return Ok(Config::new(self.default_data_path.clone()));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DevstackError::Config(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| DevstackError::Yaml(format!("Invalid config file: {}", e)))?;

        if config.data_path.as_os_str().is_empty() {
            config.data_path = self.default_data_path.clone();
        }

        Ok(config)
    }

    /// Save the configuration atomically
    ///
    /// Writes to a sibling temp file and renames it over the target, so
    /// a failed write never corrupts an existing valid config.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DevstackError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_yaml::to_string(config)
            .map_err(|e| DevstackError::Yaml(format!("Failed to serialize config: {}", e)))?;

        let tmp_path = self.path.with_extension("yaml.tmp");
        std::fs::write(&tmp_path, content).map_err(|e| {
            DevstackError::Config(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            DevstackError::Config(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Saved config to {}", self.path.display());
        Ok(())
    }
}
