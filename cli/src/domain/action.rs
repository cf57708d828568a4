//! Operating-system actions a hook may perform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An action against the service manager's unit registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitAction {
    /// Re-read unit files (`daemon-reload`). Not addressed to a unit.
    Reload,
    /// Enable or disable according to distribution preset policy.
    Preset,
    /// Part of the adapter surface; no hook plans it.
    Enable,
    /// Disable the unit; `no_reload` suppresses the implicit manager reload.
    Disable { no_reload: bool },
    /// Part of the adapter surface; no hook plans it.
    Start,
    Stop,
    /// Restart only if the unit is currently running (`try-restart`).
    RestartIfRunning,
}

impl UnitAction {
    /// Whether the action names a unit (everything except a manager reload).
    #[must_use]
    pub fn targets_unit(self) -> bool {
        !matches!(self, Self::Reload)
    }
}

impl fmt::Display for UnitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reload => f.write_str("reload"),
            Self::Preset => f.write_str("preset"),
            Self::Enable => f.write_str("enable"),
            Self::Disable { no_reload: true } => f.write_str("disable (no reload)"),
            Self::Disable { no_reload: false } => f.write_str("disable"),
            Self::Start => f.write_str("start"),
            Self::Stop => f.write_str("stop"),
            Self::RestartIfRunning => f.write_str("restart if running"),
        }
    }
}

/// An action against the account database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountAction {
    /// Create the group as a system group unless it already exists.
    EnsureSystemGroup,
    /// Add the account to the group as a supplementary membership.
    AddUserToGroup,
}

impl fmt::Display for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnsureSystemGroup => f.write_str("ensure system group"),
            Self::AddUserToGroup => f.write_str("add user to group"),
        }
    }
}

/// Any action recorded in a transaction report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Account(AccountAction),
    Unit(UnitAction),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(a) => a.fmt(f),
            Self::Unit(u) => u.fmt(f),
        }
    }
}

impl From<UnitAction> for Action {
    fn from(a: UnitAction) -> Self {
        Self::Unit(a)
    }
}

impl From<AccountAction> for Action {
    fn from(a: AccountAction) -> Self {
        Self::Account(a)
    }
}
