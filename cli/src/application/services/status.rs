//! Application service: inspect what the hooks left behind.
//!
//! Hook failures never fail the package transaction, so a mis-provisioned
//! install only shows up here.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use serde::Serialize;

use crate::application::ports::{AccountDatabase, ServiceManager};
use crate::domain::{Capability, LifecycleConfig};

/// Observed state of the installed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub unit: String,
    pub group: String,
    pub account: String,
    pub capability: Capability,
    /// `None` when the account database could not be queried.
    pub group_exists: Option<bool>,
    pub account_in_group: Option<bool>,
    /// Raw manager states; `None` when the manager could not be queried.
    pub enablement: Option<String>,
    pub active: Option<String>,
}

impl InstallStatus {
    /// Problems an operator should look at, in display order.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        match self.group_exists {
            Some(false) => issues.push(format!("group {} does not exist", self.group)),
            None => issues.push(format!("could not look up group {}", self.group)),
            Some(true) => {}
        }
        match self.account_in_group {
            Some(false) => issues.push(format!(
                "{} is not a member of {}",
                self.account, self.group
            )),
            None => issues.push(format!("could not look up groups of {}", self.account)),
            Some(true) => {}
        }
        match self.active.as_deref() {
            Some("active" | "activating" | "reloading") => {}
            Some(state) => issues.push(format!("{} is {state}", self.unit)),
            None => issues.push(format!("could not query {}", self.unit)),
        }
        issues
    }
}

/// Query the account database and the unit state. Individual query failures are
/// recorded as `None` rather than returned.
pub async fn inspect(
    config: &LifecycleConfig,
    capability: Capability,
    manager: &impl ServiceManager,
    accounts: &impl AccountDatabase,
) -> InstallStatus {
    let group_exists = accounts
        .group_exists(&config.group)
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "group lookup failed"))
        .ok();
    let account_in_group = accounts
        .user_in_group(&config.account, &config.group)
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "membership lookup failed"))
        .ok();
    let enablement = manager
        .enablement_state(&config.unit)
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "is-enabled failed"))
        .ok();
    let active = manager
        .active_state(&config.unit)
        .await
        .inspect_err(|e| tracing::debug!(error = %e, "is-active failed"))
        .ok();

    InstallStatus {
        unit: config.unit.clone(),
        group: config.group.clone(),
        account: config.account.clone(),
        capability,
        group_exists,
        account_in_group,
        enablement,
        active,
    }
}
