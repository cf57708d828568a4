//! `pkg-lifecycle config`: show and validate configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppFlags;
use crate::application::ports::ConfigStore;
use crate::output::{HumanRenderer, OutputContext, json};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file values plus CLI overrides)
    Show,
    /// Check the configuration file; exits 1 if it is invalid
    Validate,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or, for
/// `validate`, if any value is invalid.
pub fn run(flags: &AppFlags, store: &impl ConfigStore, cmd: ConfigCommand) -> Result<()> {
    let path = store.path();
    let config = flags.overrides.apply(store.load()?);
    let ctx = OutputContext::new(flags.output.no_color, flags.output.quiet);

    match cmd {
        ConfigCommand::Show => {
            if flags.output.json {
                return json::print(&config);
            }
            HumanRenderer::new(&ctx).render_config(&config, &path, path.exists());
        }
        ConfigCommand::Validate => {
            config
                .validate()
                .with_context(|| format!("invalid configuration ({})", path.display()))?;
            if flags.output.json {
                return json::print(&serde_json::json!({
                    "valid": true,
                    "path": path.display().to_string(),
                }));
            }
            ctx.success(&format!("{} is valid", path.display()));
        }
    }
    Ok(())
}
