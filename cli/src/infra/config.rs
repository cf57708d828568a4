//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{LifecycleConfig, validate_config_key};

/// Default configuration location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pkg-lifecycle/lifecycle.yaml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_ENV: &str = "PKG_LIFECYCLE_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    /// Resolve the path: explicit flag, then `PKG_LIFECYCLE_CONFIG`, then the default.
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(explicit, std::env::var_os(CONFIG_ENV))
    }

    fn resolve_with(explicit: Option<PathBuf>, env: Option<OsString>) -> Self {
        let path = explicit
            .or_else(|| env.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self { path }
    }

    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<LifecycleConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(LifecycleConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        // An empty file parses as YAML null.
        if content.trim().is_empty() {
            return Ok(LifecycleConfig::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        if value.is_null() {
            return Ok(LifecycleConfig::default());
        }
        // Misspelled keys would otherwise leave their setting at its default.
        if let Some(mapping) = value.as_mapping() {
            for key in mapping.keys().filter_map(serde_yaml::Value::as_str) {
                validate_config_key(key)
                    .with_context(|| format!("invalid configuration ({})", self.path.display()))?;
            }
        }
        serde_yaml::from_value(value)
            .with_context(|| format!("cannot parse {}", self.path.display()))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}
