//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{Capability, LifecycleConfig, ProvisioningError};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        (**self).run(program, args).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        (**self).run_with_timeout(program, args, timeout).await
    }
}

// ── Service Manager Port ──────────────────────────────────────────────────────

/// Unit registry operations of the system service manager.
///
/// Every mutating call returns an error when the manager reports failure;
/// callers decide whether the failure is fatal.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Re-read unit files.
    async fn reload(&self) -> Result<()>;
    /// Enable or disable `unit` according to preset policy, without reloading.
    async fn preset(&self, unit: &str) -> Result<()>;
    async fn enable(&self, unit: &str) -> Result<()>;
    /// Disable `unit`; with `no_reload` the manager is not reloaded afterwards.
    async fn disable(&self, unit: &str, no_reload: bool) -> Result<()>;
    async fn start(&self, unit: &str) -> Result<()>;
    async fn stop(&self, unit: &str) -> Result<()>;
    /// Restart `unit` only if it is currently running.
    async fn restart_if_running(&self, unit: &str) -> Result<()>;
    /// Active state as reported by the manager (`active`, `inactive`, `failed`, ...).
    async fn active_state(&self, unit: &str) -> Result<String>;
    /// Enablement state as reported by the manager (`enabled`, `disabled`, ...).
    async fn enablement_state(&self, unit: &str) -> Result<String>;
}

// ── Account Database Port ─────────────────────────────────────────────────────

/// Group and membership operations on the OS account database.
#[allow(async_fn_in_trait)]
pub trait AccountDatabase {
    async fn group_exists(&self, group: &str) -> Result<bool, ProvisioningError>;
    /// Create `group` as a system group.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::GroupAlreadyExists`] when the group exists.
    async fn create_system_group(&self, group: &str) -> Result<(), ProvisioningError>;
    /// Add `user` to `group` as a supplementary membership. Never removes
    /// existing memberships.
    async fn add_user_to_group(&self, user: &str, group: &str) -> Result<(), ProvisioningError>;
    async fn user_in_group(&self, user: &str, group: &str) -> Result<bool, ProvisioningError>;
}

// ── Capability Probe Port ─────────────────────────────────────────────────────

/// Detects whether native service-manager packaging support is present.
pub trait CapabilityProbe {
    fn detect(&self) -> Capability;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading of the lifecycle configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<LifecycleConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> PathBuf;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
