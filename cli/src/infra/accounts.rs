//! Infrastructure implementation of the `AccountDatabase` port.
//!
//! Uses the shadow-utils tools (`getent`, `groupadd`, `usermod`, `id`) so
//! directory-backed databases behave the same as local files.

use std::process::Output;

use crate::application::ports::{AccountDatabase, CommandRunner};
use crate::domain::ProvisioningError;

/// `getent` exit status: key not found in the database.
const GETENT_NOT_FOUND: i32 = 2;
/// `groupadd` exit status: group name not unique.
const GROUPADD_NAME_IN_USE: i32 = 9;

/// Account database adapter over shadow-utils.
pub struct ShadowAccounts<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ShadowAccounts<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    async fn invoke(&self, program: &str, args: &[&str]) -> Result<Output, ProvisioningError> {
        self.runner
            .run(program, args)
            .await
            .map_err(|e| ProvisioningError::Unavailable {
                command: program.to_string(),
                reason: format!("{e:#}"),
            })
    }
}

fn command_failed(program: &str, output: &Output) -> ProvisioningError {
    ProvisioningError::CommandFailed {
        command: program.to_string(),
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl<R: CommandRunner> AccountDatabase for ShadowAccounts<R> {
    async fn group_exists(&self, group: &str) -> Result<bool, ProvisioningError> {
        let output = self.invoke("getent", &["group", group]).await?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(GETENT_NOT_FOUND) => Ok(false),
            _ => Err(command_failed("getent", &output)),
        }
    }

    async fn create_system_group(&self, group: &str) -> Result<(), ProvisioningError> {
        let output = self.invoke("groupadd", &["-r", group]).await?;
        match output.status.code() {
            Some(0) => Ok(()),
            Some(GROUPADD_NAME_IN_USE) => Err(ProvisioningError::GroupAlreadyExists(group.to_string())),
            _ => Err(command_failed("groupadd", &output)),
        }
    }

    async fn add_user_to_group(&self, user: &str, group: &str) -> Result<(), ProvisioningError> {
        // -a keeps every existing supplementary group.
        let output = self.invoke("usermod", &["-a", "-G", group, user]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(command_failed("usermod", &output))
        }
    }

    async fn user_in_group(&self, user: &str, group: &str) -> Result<bool, ProvisioningError> {
        let output = self.invoke("id", &["-nG", user]).await?;
        if !output.status.success() {
            return Err(command_failed("id", &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .any(|g| g == group))
    }
}
