//! Infrastructure implementation of the `ServiceManager` port.
//!
//! `SystemctlManager<R>` routes all systemd calls through a `CommandRunner`.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::UnitError;

const SYSTEMCTL: &str = "systemctl";

/// Infrastructure adapter that drives systemd through `systemctl`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct SystemctlManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemctlManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn invoke(&self, args: &[&str]) -> Result<Output> {
        self.runner
            .run(SYSTEMCTL, args)
            .await
            .with_context(|| format!("running {}", command_line(args)))
    }

    /// Run a mutating verb and map a non-zero exit to [`UnitError`].
    async fn act(&self, args: &[&str]) -> Result<()> {
        let output = self.invoke(args).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(failure(args, &output).into())
    }

    /// `is-active` / `is-enabled` print the state even when exiting non-zero.
    async fn query(&self, verb: &str, unit: &str) -> Result<String> {
        let args = [verb, unit];
        let output = self.invoke(&args).await?;
        let state = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if state.is_empty() {
            return Err(failure(&args, &output).into());
        }
        Ok(state)
    }
}

fn command_line(args: &[&str]) -> String {
    std::iter::once(SYSTEMCTL)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn failure(args: &[&str], output: &Output) -> UnitError {
    UnitError::CommandFailed {
        command: command_line(args),
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl<R: CommandRunner> ServiceManager for SystemctlManager<R> {
    async fn reload(&self) -> Result<()> {
        self.act(&["daemon-reload"]).await
    }

    async fn preset(&self, unit: &str) -> Result<()> {
        self.act(&["--no-reload", "preset", unit]).await
    }

    async fn enable(&self, unit: &str) -> Result<()> {
        self.act(&["enable", unit]).await
    }

    async fn disable(&self, unit: &str, no_reload: bool) -> Result<()> {
        if no_reload {
            self.act(&["--no-reload", "disable", unit]).await
        } else {
            self.act(&["disable", unit]).await
        }
    }

    async fn start(&self, unit: &str) -> Result<()> {
        self.act(&["start", unit]).await
    }

    async fn stop(&self, unit: &str) -> Result<()> {
        self.act(&["stop", unit]).await
    }

    async fn restart_if_running(&self, unit: &str) -> Result<()> {
        self.act(&["try-restart", unit]).await
    }

    async fn active_state(&self, unit: &str) -> Result<String> {
        self.query("is-active", unit).await
    }

    async fn enablement_state(&self, unit: &str) -> Result<String> {
        self.query("is-enabled", unit).await
    }
}
