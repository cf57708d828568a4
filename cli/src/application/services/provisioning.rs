//! Pre-install account provisioning.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{AccountDatabase, ProgressReporter};
use crate::domain::{AccountAction, ActionOutcome, ActionStatus, ProvisioningError, Severity};

/// Ensure `group` exists as a system group and `account` is a member of it.
///
/// Both steps are idempotent. "Already exists" is tolerated, including the
/// race where the group appears between the existence check and the create.
/// Any other failure is recorded with [`Severity::Provisioning`]; the
/// membership step is still attempted afterwards.
pub async fn ensure_account_provisioned(
    accounts: &impl AccountDatabase,
    reporter: &impl ProgressReporter,
    group: &str,
    account: &str,
) -> Vec<ActionOutcome> {
    let group_outcome = ensure_group(accounts, reporter, group).await;
    let membership_outcome = add_membership(accounts, reporter, account, group).await;
    vec![group_outcome, membership_outcome]
}

async fn ensure_group(
    accounts: &impl AccountDatabase,
    reporter: &impl ProgressReporter,
    group: &str,
) -> ActionOutcome {
    reporter.step(&format!("ensuring system group {group}"));

    let exists = match accounts.group_exists(group).await {
        Ok(exists) => exists,
        Err(e) => {
            // Lookup failure is not conclusive; let the create decide.
            tracing::debug!(group, error = %e, "group lookup failed, attempting creation");
            false
        }
    };

    let status = if exists {
        ActionStatus::Skipped {
            reason: "group already exists".to_string(),
        }
    } else {
        match accounts.create_system_group(group).await {
            Ok(()) => ActionStatus::Succeeded,
            Err(ProvisioningError::GroupAlreadyExists(_)) => ActionStatus::Skipped {
                reason: "group already exists".to_string(),
            },
            Err(e) => ActionStatus::Failed {
                message: e.to_string(),
            },
        }
    };

    match &status {
        ActionStatus::Succeeded => {
            tracing::info!(group, "created system group");
            reporter.success(&format!("created system group {group}"));
        }
        ActionStatus::Skipped { .. } => {
            tracing::debug!(group, "system group already present");
            reporter.success(&format!("system group {group} present"));
        }
        ActionStatus::Failed { message } => {
            tracing::warn!(group, error = %message, "system group could not be created");
            reporter.warn(&format!("could not create group {group}: {message}"));
        }
    }

    ActionOutcome {
        action: AccountAction::EnsureSystemGroup.into(),
        target: Some(group.to_string()),
        status,
        severity: Severity::Provisioning,
    }
}

async fn add_membership(
    accounts: &impl AccountDatabase,
    reporter: &impl ProgressReporter,
    account: &str,
    group: &str,
) -> ActionOutcome {
    reporter.step(&format!("adding {account} to {group}"));

    let status = match accounts.add_user_to_group(account, group).await {
        Ok(()) => {
            tracing::debug!(account, group, "membership ensured");
            reporter.success(&format!("{account} is a member of {group}"));
            ActionStatus::Succeeded
        }
        Err(e) => {
            // Install continues, but the agent will run without the group's privileges.
            tracing::warn!(account, group, error = %e, "could not add account to group");
            reporter.warn(&format!("could not add {account} to {group}: {e}"));
            ActionStatus::Failed {
                message: e.to_string(),
            }
        }
    };

    ActionOutcome {
        action: AccountAction::AddUserToGroup.into(),
        target: Some(format!("{account}:{group}")),
        status,
        severity: Severity::Provisioning,
    }
}
