//! Per-transaction report of executed actions.
//!
//! Failures never abort a hook on their own. They are collected here so the
//! caller can render them and decide the exit status.

use serde::{Deserialize, Serialize};

use crate::domain::action::Action;
use crate::domain::decision::Capability;
use crate::domain::phase::{RemainingCount, TransactionPhase};

/// Error class an action's failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Service orchestration; always logged and ignored.
    BestEffort,
    /// Account database; surfaced as a warning, fatal under strict provisioning.
    Provisioning,
}

/// What happened to a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ActionStatus {
    Succeeded,
    /// Not needed (e.g. the group already existed).
    Skipped { reason: String },
    Failed { message: String },
}

/// One executed (or skipped) action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: Action,
    /// Unit, group, or `user:group` the action addressed; `None` for a manager reload.
    pub target: Option<String>,
    #[serde(flatten)]
    pub status: ActionStatus,
    pub severity: Severity,
}

impl ActionOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, ActionStatus::Failed { .. })
    }
}

/// Ordered outcomes of one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub phase: TransactionPhase,
    pub remaining: RemainingCount,
    pub capability: Capability,
    pub unit: String,
    pub outcomes: Vec<ActionOutcome>,
}

impl TransactionReport {
    #[must_use]
    pub fn new(
        phase: TransactionPhase,
        remaining: RemainingCount,
        capability: Capability,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            remaining,
            capability,
            unit: unit.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ActionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Actions in the order they were attempted.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.outcomes.iter().map(|o| o.action)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Whether the transaction must be aborted.
    ///
    /// Best-effort failures never abort. Provisioning failures abort only
    /// when `strict_provisioning` is set.
    #[must_use]
    pub fn is_fatal(&self, strict_provisioning: bool) -> bool {
        strict_provisioning
            && self
                .failures()
                .any(|o| o.severity == Severity::Provisioning)
    }
}
