//! Application context: unified state passed to every command handler.
//!
//! Built once per invocation, after configuration is validated and the
//! service-manager capability is known.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CapabilityProbe, ConfigStore};
use crate::domain::{Capability, LifecycleConfig};
use crate::infra::{
    FixedCapability, MacroFileProbe, ShadowAccounts, SystemctlManager, TokioCommandRunner,
};
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Command-line overrides for configured names.
#[derive(Default)]
pub struct ConfigOverrides {
    pub unit: Option<String>,
    pub group: Option<String>,
    pub account: Option<String>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn apply(&self, config: LifecycleConfig) -> LifecycleConfig {
        config.with_overrides(
            self.unit.as_deref(),
            self.group.as_deref(),
            self.account.as_deref(),
        )
    }
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Name overrides.
    pub overrides: ConfigOverrides,
    /// Forced capability; `None` probes the host.
    pub integration: Option<Capability>,
}

impl AppFlags {
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        if self.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective, validated configuration.
    pub config: LifecycleConfig,
    /// Where the configuration was read from.
    pub config_path: PathBuf,
    /// Capability selected for this invocation.
    pub capability: Capability,
    /// systemd adapter.
    pub manager: SystemctlManager<TokioCommandRunner>,
    /// Account database adapter.
    pub accounts: ShadowAccounts<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read, parsed, or
    /// validated.
    pub fn new(flags: &AppFlags, store: &impl ConfigStore) -> Result<Self> {
        let config_path = store.path();
        let config = flags.overrides.apply(store.load()?);
        config
            .validate()
            .with_context(|| format!("invalid configuration ({})", config_path.display()))?;

        let capability = match flags.integration {
            Some(forced) => FixedCapability(forced).detect(),
            None => MacroFileProbe::new(&config.native_macros_path).detect(),
        };
        tracing::debug!(%capability, forced = flags.integration.is_some(), "capability selected");

        let timeout = Duration::from_secs(config.command_timeout_secs);
        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode: flags.mode(),
            config,
            config_path,
            capability,
            manager: SystemctlManager::new(TokioCommandRunner::new(timeout)),
            accounts: ShadowAccounts::new(TokioCommandRunner::new(timeout)),
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }
}
