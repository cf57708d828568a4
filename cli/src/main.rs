//! pkg-lifecycle - package transaction hooks for the opflex agent service

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pkg_lifecycle::cli::Cli;
use pkg_lifecycle::output::json;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Package managers capture stdout; keep diagnostics on stderr and quiet
    // unless asked.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        match json::format_error(&format!("{e:#}"), "command_failed") {
            Ok(out) if json_mode => println!("{out}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
