//! Service-manager hooks: register, deprovision, finalize.
//!
//! The selected [`HookStrategy`] decides which actions run; this module only
//! executes them in order against a [`ServiceManager`]. Every failure here is
//! best-effort: logged, recorded, never propagated.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, ServiceManager};
use crate::domain::{ActionOutcome, ActionStatus, HookStrategy, RemainingCount, Severity, UnitAction};

/// Post-install / upgrade hook.
pub async fn register_unit(
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    strategy: &dyn HookStrategy,
    unit: &str,
    remaining: RemainingCount,
) -> Vec<ActionOutcome> {
    execute(manager, reporter, unit, &strategy.register_unit(remaining)).await
}

/// Pre-removal hook.
pub async fn deprovision_unit(
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    strategy: &dyn HookStrategy,
    unit: &str,
    remaining: RemainingCount,
) -> Vec<ActionOutcome> {
    execute(manager, reporter, unit, &strategy.deprovision_unit(remaining)).await
}

/// Post-removal hook.
pub async fn finalize_removal(
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    strategy: &dyn HookStrategy,
    unit: &str,
    remaining: RemainingCount,
) -> Vec<ActionOutcome> {
    execute(manager, reporter, unit, &strategy.finalize_removal(remaining)).await
}

/// Run `actions` one after another. A failed action does not stop later ones.
pub async fn execute(
    manager: &impl ServiceManager,
    reporter: &impl ProgressReporter,
    unit: &str,
    actions: &[UnitAction],
) -> Vec<ActionOutcome> {
    let mut outcomes = Vec::with_capacity(actions.len());
    for &action in actions {
        let target = action.targets_unit().then(|| unit.to_string());
        let label = describe(action, unit);
        reporter.step(&label);

        let status = match dispatch(manager, unit, action).await {
            Ok(()) => {
                tracing::debug!(%action, unit, "unit action succeeded");
                reporter.success(&label);
                ActionStatus::Succeeded
            }
            Err(e) => {
                tracing::warn!(%action, unit, error = %format!("{e:#}"), "unit action failed, continuing");
                reporter.warn(&format!("{label} failed (ignored): {e}"));
                ActionStatus::Failed {
                    message: format!("{e:#}"),
                }
            }
        };

        outcomes.push(ActionOutcome {
            action: action.into(),
            target,
            status,
            severity: Severity::BestEffort,
        });
    }
    outcomes
}

async fn dispatch(manager: &impl ServiceManager, unit: &str, action: UnitAction) -> Result<()> {
    match action {
        UnitAction::Reload => manager.reload().await,
        UnitAction::Preset => manager.preset(unit).await,
        UnitAction::Enable => manager.enable(unit).await,
        UnitAction::Disable { no_reload } => manager.disable(unit, no_reload).await,
        UnitAction::Start => manager.start(unit).await,
        UnitAction::Stop => manager.stop(unit).await,
        UnitAction::RestartIfRunning => manager.restart_if_running(unit).await,
    }
}

fn describe(action: UnitAction, unit: &str) -> String {
    if action.targets_unit() {
        format!("{action} {unit}")
    } else {
        "reloading service manager configuration".to_string()
    }
}
