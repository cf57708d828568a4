//! Shared test doubles for application service tests.
//!
//! `RecordingManager` records every mutating service-manager call in order;
//! `FakeAccounts` is an in-memory account database.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use anyhow::Result;

use crate::application::ports::{AccountDatabase, ProgressReporter, ServiceManager};
use crate::domain::{ProvisioningError, UnitError};

// ── Service manager ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCall {
    Reload,
    Preset(String),
    Enable(String),
    Disable(String, bool),
    Start(String),
    Stop(String),
    RestartIfRunning(String),
}

pub struct RecordingManager {
    calls: RefCell<Vec<ManagerCall>>,
    /// systemctl verbs that fail (`reload`, `disable`, `is-active`, ...).
    failing: Vec<String>,
    enablement: String,
    active: String,
}

impl Default for RecordingManager {
    fn default() -> Self {
        Self::with_states("enabled", "active")
    }
}

impl RecordingManager {
    pub fn failing(verbs: &[&str]) -> Self {
        Self {
            failing: verbs.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_states(enablement: &str, active: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failing: Vec::new(),
            enablement: enablement.to_string(),
            active: active.to_string(),
        }
    }

    pub fn calls(&self) -> Vec<ManagerCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, verb: &str, unit: &str, call: ManagerCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        self.outcome(verb, unit)
    }

    fn outcome(&self, verb: &str, unit: &str) -> Result<()> {
        if self.failing.iter().any(|v| v == verb) {
            let command = if unit.is_empty() {
                format!("systemctl {verb}")
            } else {
                format!("systemctl {verb} {unit}")
            };
            return Err(UnitError::CommandFailed {
                command,
                code: 1,
                stderr: "simulated failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ServiceManager for RecordingManager {
    async fn reload(&self) -> Result<()> {
        self.record("reload", "", ManagerCall::Reload)
    }
    async fn preset(&self, unit: &str) -> Result<()> {
        self.record("preset", unit, ManagerCall::Preset(unit.into()))
    }
    async fn enable(&self, unit: &str) -> Result<()> {
        self.record("enable", unit, ManagerCall::Enable(unit.into()))
    }
    async fn disable(&self, unit: &str, no_reload: bool) -> Result<()> {
        self.record("disable", unit, ManagerCall::Disable(unit.into(), no_reload))
    }
    async fn start(&self, unit: &str) -> Result<()> {
        self.record("start", unit, ManagerCall::Start(unit.into()))
    }
    async fn stop(&self, unit: &str) -> Result<()> {
        self.record("stop", unit, ManagerCall::Stop(unit.into()))
    }
    async fn restart_if_running(&self, unit: &str) -> Result<()> {
        self.record("try-restart", unit, ManagerCall::RestartIfRunning(unit.into()))
    }
    async fn active_state(&self, unit: &str) -> Result<String> {
        self.outcome("is-active", unit)?;
        Ok(self.active.clone())
    }
    async fn enablement_state(&self, unit: &str) -> Result<String> {
        self.outcome("is-enabled", unit)?;
        Ok(self.enablement.clone())
    }
}

// ── Account database ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeAccounts {
    /// `create_system_group` reports "already exists" although the lookup said absent.
    pub race_on_create: bool,
    /// `create_system_group` fails with a permission error.
    pub deny_create: bool,
    /// Lookups (`group_exists`, `user_in_group`) fail.
    pub lookup_fails: bool,
    groups: RefCell<HashSet<String>>,
    members: RefCell<HashSet<(String, String)>>,
    create_calls: Cell<usize>,
    membership_calls: Cell<usize>,
}

impl FakeAccounts {
    pub fn seed_member(&self, user: &str, group: &str) {
        self.groups.borrow_mut().insert(group.to_string());
        self.members
            .borrow_mut()
            .insert((user.to_string(), group.to_string()));
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.borrow().contains(group)
    }

    pub fn is_member(&self, user: &str, group: &str) -> bool {
        self.members
            .borrow()
            .contains(&(user.to_string(), group.to_string()))
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn membership_calls(&self) -> usize {
        self.membership_calls.get()
    }

    fn lookup_error() -> ProvisioningError {
        ProvisioningError::Unavailable {
            command: "getent".to_string(),
            reason: "directory service unavailable".to_string(),
        }
    }
}

impl AccountDatabase for FakeAccounts {
    async fn group_exists(&self, group: &str) -> Result<bool, ProvisioningError> {
        if self.lookup_fails {
            return Err(Self::lookup_error());
        }
        Ok(self.has_group(group))
    }

    async fn create_system_group(&self, group: &str) -> Result<(), ProvisioningError> {
        self.create_calls.set(self.create_calls.get() + 1);
        if self.deny_create {
            return Err(ProvisioningError::CommandFailed {
                command: "groupadd".to_string(),
                code: 10,
                stderr: "groupadd: Permission denied.".to_string(),
            });
        }
        if self.race_on_create || !self.groups.borrow_mut().insert(group.to_string()) {
            self.groups.borrow_mut().insert(group.to_string());
            return Err(ProvisioningError::GroupAlreadyExists(group.to_string()));
        }
        Ok(())
    }

    async fn add_user_to_group(&self, user: &str, group: &str) -> Result<(), ProvisioningError> {
        self.membership_calls.set(self.membership_calls.get() + 1);
        if !self.has_group(group) {
            return Err(ProvisioningError::CommandFailed {
                command: "usermod".to_string(),
                code: 6,
                stderr: format!("usermod: group '{group}' does not exist"),
            });
        }
        self.members
            .borrow_mut()
            .insert((user.to_string(), group.to_string()));
        Ok(())
    }

    async fn user_in_group(&self, user: &str, group: &str) -> Result<bool, ProvisioningError> {
        if self.lookup_fails {
            return Err(Self::lookup_error());
        }
        Ok(self.is_member(user, group))
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
