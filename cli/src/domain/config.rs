//! Domain types and validators for lifecycle configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_UNIT: &str = "neutron-opflex-agent.service";
pub const DEFAULT_GROUP: &str = "opflexep";
pub const DEFAULT_ACCOUNT: &str = "neutron";
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_NATIVE_MACROS_PATH: &str = "/usr/lib/rpm/macros.d/macros.systemd";

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "unit",
    "group",
    "account",
    "strict_provisioning",
    "command_timeout_secs",
    "native_macros_path",
];

pub const UNIT_SUFFIXES: &[&str] = &[".service", ".socket", ".timer", ".target", ".path"];

pub const MAX_POSIX_NAME_LEN: usize = 32;

static POSIX_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_-]*\$?$").ok());

// ── Config schema ────────────────────────────────────────────────────────────

/// Lifecycle configuration, normally read from `/etc/pkg-lifecycle/lifecycle.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Service unit addressed by every unit action.
    pub unit: String,
    /// System group created at pre-install.
    pub group: String,
    /// Account added to `group` at pre-install.
    pub account: String,
    /// Abort the transaction on provisioning failures other than "already exists".
    pub strict_provisioning: bool,
    /// Timeout applied to every external command.
    pub command_timeout_secs: u64,
    /// Presence of this file signals native service-manager packaging support.
    pub native_macros_path: String,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            group: DEFAULT_GROUP.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
            strict_provisioning: false,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            native_macros_path: DEFAULT_NATIVE_MACROS_PATH.to_string(),
        }
    }
}

impl LifecycleConfig {
    /// Apply command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        unit: Option<&str>,
        group: Option<&str>,
        account: Option<&str>,
    ) -> Self {
        if let Some(unit) = unit {
            self.unit = unit.to_string();
        }
        if let Some(group) = group {
            self.group = group.to_string();
        }
        if let Some(account) = account {
            self.account = account.to_string();
        }
        self
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<()> {
        validate_config_value("unit", &self.unit)?;
        validate_config_value("group", &self.group)?;
        validate_config_value("account", &self.account)?;
        validate_config_value("command_timeout_secs", &self.command_timeout_secs.to_string())?;
        validate_config_value("native_macros_path", &self.native_macros_path)?;
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is not valid for it.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    let expected = match key {
        "unit" if !is_valid_unit_name(value) => {
            format!("a unit name ending in one of {}", UNIT_SUFFIXES.join(", "))
        }
        "group" | "account" if !is_valid_posix_name(value) => format!(
            "a POSIX name matching ^[a-z_][a-z0-9_-]*[$]?$ (at most {MAX_POSIX_NAME_LEN} characters)"
        ),
        "strict_provisioning" if value.parse::<bool>().is_err() => "true or false".to_string(),
        "command_timeout_secs" if !value.parse::<u64>().is_ok_and(|t| t > 0) => {
            "a positive number of seconds".to_string()
        }
        "native_macros_path" if !value.starts_with('/') => "an absolute path".to_string(),
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
    .into())
}

/// Whether `name` is an addressable systemd unit name.
#[must_use]
pub fn is_valid_unit_name(name: &str) -> bool {
    let Some(stem) = UNIT_SUFFIXES.iter().find_map(|s| name.strip_suffix(s)) else {
        return false;
    };
    !stem.is_empty()
        && !stem.starts_with('-')
        && name.chars().all(|c| !c.is_whitespace() && c != '/')
}

/// Whether `name` is a valid user or group name.
#[must_use]
pub fn is_valid_posix_name(name: &str) -> bool {
    name.len() <= MAX_POSIX_NAME_LEN && POSIX_NAME.as_ref().is_some_and(|re| re.is_match(name))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
