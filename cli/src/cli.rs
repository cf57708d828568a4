//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::app::{AppContext, AppFlags, ConfigOverrides, OutputFlags};
use crate::commands;
use crate::domain::{Capability, RemainingCount, TransactionPhase};
use crate::infra::YamlConfigStore;

/// Package lifecycle hooks for the opflex agent service
#[derive(Parser)]
#[command(
    name = "pkg-lifecycle",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, global = true, env = "PKG_LIFECYCLE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Service-manager integration to use
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = Integration::Auto,
        env = "PKG_LIFECYCLE_INTEGRATION"
    )]
    pub integration: Integration,

    /// Override the configured unit
    #[arg(long, global = true)]
    pub unit: Option<String>,

    /// Override the configured group
    #[arg(long, global = true)]
    pub group: Option<String>,

    /// Override the configured account
    #[arg(long, global = true)]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// How the service-manager capability is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Integration {
    /// Probe the host
    Auto,
    /// Force native primitives
    Native,
    /// Force the manual fallback sequence
    Fallback,
}

impl Integration {
    /// The forced capability, or `None` when the host should be probed.
    #[must_use]
    pub fn forced(self) -> Option<Capability> {
        match self {
            Self::Auto => None,
            Self::Native => Some(Capability::Native),
            Self::Fallback => Some(Capability::Fallback),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision the system group and account membership (%pre)
    PreInstall {
        /// Remaining-count argument from the packaging tool (recorded only)
        #[arg(default_value = "1", allow_hyphen_values = true)]
        remaining: RemainingCount,
    },

    /// Register the unit after install or upgrade (%post)
    PostInstall {
        /// Versions installed after this transaction
        #[arg(allow_hyphen_values = true)]
        remaining: RemainingCount,
    },

    /// Disable and stop the unit on final removal (%preun)
    PreRemoval {
        /// Versions installed after this transaction
        #[arg(allow_hyphen_values = true)]
        remaining: RemainingCount,
    },

    /// Reload the manager and restart the unit on upgrade (%postun)
    PostRemoval {
        /// Versions installed after this transaction
        #[arg(allow_hyphen_values = true)]
        remaining: RemainingCount,
    },

    /// Run the hook for any phase (accepts pre, post, preun, postun)
    Hook(commands::PhaseArgs),

    /// Show the actions a hook would take without running them
    Plan(commands::PhaseArgs),

    /// Inspect account provisioning and unit state
    Status,

    /// Show or validate configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, or if a hook
    /// fails fatally under strict provisioning.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            config,
            integration,
            unit,
            group,
            account,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            overrides: ConfigOverrides {
                unit,
                group,
                account,
            },
            integration: integration.forced(),
        };

        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Config(cmd) => {
                let store = YamlConfigStore::resolve(config);
                commands::config::run(&flags, &store, cmd)
            }
            Command::PreInstall { remaining } => {
                hook(&flags, config, TransactionPhase::PreInstall, remaining).await
            }
            Command::PostInstall { remaining } => {
                hook(&flags, config, TransactionPhase::PostInstall, remaining).await
            }
            Command::PreRemoval { remaining } => {
                hook(&flags, config, TransactionPhase::PreRemoval, remaining).await
            }
            Command::PostRemoval { remaining } => {
                hook(&flags, config, TransactionPhase::PostRemoval, remaining).await
            }
            Command::Hook(args) => hook(&flags, config, args.phase, args.remaining).await,
            Command::Plan(args) => {
                let app = AppContext::new(&flags, &YamlConfigStore::resolve(config))?;
                commands::plan::run(&app, args.phase, args.remaining)
            }
            Command::Status => {
                let app = AppContext::new(&flags, &YamlConfigStore::resolve(config))?;
                commands::status::run(&app).await
            }
        }
    }
}

async fn hook(
    flags: &AppFlags,
    config: Option<PathBuf>,
    phase: TransactionPhase,
    remaining: RemainingCount,
) -> Result<()> {
    let app = AppContext::new(flags, &YamlConfigStore::resolve(config))?;
    commands::hook::run(&app, phase, remaining).await
}
