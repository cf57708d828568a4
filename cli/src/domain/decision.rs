//! The package lifecycle state machine.
//!
//! Given a phase and the remaining count, decide which actions run and in what
//! order. Capability detection happens once, outside this module, and selects
//! one [`HookStrategy`]; nothing here branches on the capability again.
//!
//! Pure functions only: no I/O, no async.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::action::{AccountAction, Action, UnitAction};
use crate::domain::phase::{RemainingCount, TransactionPhase};

/// Which service-manager integration is in effect for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// The manager's own packaging primitives are available.
    Native,
    /// Primitives are missing; run the manual sequence.
    Fallback,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Unit-facing decisions for the three service-manager hooks.
///
/// Pre-install is strategy-independent and lives in [`account_plan`].
pub trait HookStrategy {
    /// The capability this strategy implements.
    fn capability(&self) -> Capability;

    /// Post-install / upgrade.
    fn register_unit(&self, remaining: RemainingCount) -> Vec<UnitAction>;

    /// Pre-removal.
    fn deprovision_unit(&self, remaining: RemainingCount) -> Vec<UnitAction>;

    /// Post-removal.
    fn finalize_removal(&self, remaining: RemainingCount) -> Vec<UnitAction>;
}

/// Native primitives: preset on first install, disable-and-stop on final
/// removal, try-restart on upgrade. The manager reloads itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHooks;

impl HookStrategy for NativeHooks {
    fn capability(&self) -> Capability {
        Capability::Native
    }

    fn register_unit(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        if remaining.is_first_install() {
            vec![UnitAction::Preset]
        } else {
            Vec::new()
        }
    }

    fn deprovision_unit(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        if remaining.is_final_removal() {
            vec![UnitAction::Disable { no_reload: true }, UnitAction::Stop]
        } else {
            Vec::new()
        }
    }

    fn finalize_removal(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        if remaining.is_upgrade() {
            vec![UnitAction::RestartIfRunning]
        } else {
            Vec::new()
        }
    }
}

/// Manual sequence used when native primitives are unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualFallback;

impl HookStrategy for ManualFallback {
    fn capability(&self) -> Capability {
        Capability::Fallback
    }

    fn register_unit(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        // Registration from the first install persists across upgrades.
        if remaining.is_first_install() {
            vec![UnitAction::Reload]
        } else {
            Vec::new()
        }
    }

    fn deprovision_unit(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        // On upgrade the running instance must survive until the new version's post-install.
        if remaining.is_final_removal() {
            vec![UnitAction::Disable { no_reload: true }, UnitAction::Stop]
        } else {
            Vec::new()
        }
    }

    fn finalize_removal(&self, remaining: RemainingCount) -> Vec<UnitAction> {
        let mut actions = vec![UnitAction::Reload];
        if remaining.is_upgrade() {
            actions.push(UnitAction::RestartIfRunning);
        }
        actions
    }
}

static NATIVE: NativeHooks = NativeHooks;
static FALLBACK: ManualFallback = ManualFallback;

/// Select the strategy for a detected capability.
#[must_use]
pub fn strategy_for(capability: Capability) -> &'static dyn HookStrategy {
    match capability {
        Capability::Native => &NATIVE,
        Capability::Fallback => &FALLBACK,
    }
}

/// Account actions for pre-install, in execution order.
#[must_use]
pub fn account_plan() -> Vec<AccountAction> {
    vec![AccountAction::EnsureSystemGroup, AccountAction::AddUserToGroup]
}

/// Full ordered plan for one hook invocation.
#[must_use]
pub fn plan(
    strategy: &dyn HookStrategy,
    phase: TransactionPhase,
    remaining: RemainingCount,
) -> Vec<Action> {
    match phase {
        TransactionPhase::PreInstall => account_plan().into_iter().map(Action::from).collect(),
        TransactionPhase::PostInstall => to_actions(strategy.register_unit(remaining)),
        TransactionPhase::PreRemoval => to_actions(strategy.deprovision_unit(remaining)),
        TransactionPhase::PostRemoval => to_actions(strategy.finalize_removal(remaining)),
    }
}

fn to_actions(unit_actions: Vec<UnitAction>) -> Vec<Action> {
    unit_actions.into_iter().map(Action::from).collect()
}
