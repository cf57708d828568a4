//! `pkg-lifecycle plan`: print the decided actions without executing them.

use anyhow::Result;
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{Action, Capability, RemainingCount, TransactionPhase, plan, strategy_for};
use crate::output::json;

/// JSON shape of a plan.
#[derive(Debug, Serialize)]
pub struct PlanView<'a> {
    pub phase: TransactionPhase,
    pub remaining: RemainingCount,
    pub capability: Capability,
    pub unit: &'a str,
    pub actions: Vec<Action>,
}

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext, phase: TransactionPhase, remaining: RemainingCount) -> Result<()> {
    let actions = plan(strategy_for(app.capability), phase, remaining);

    if app.is_json() {
        return json::print(&PlanView {
            phase,
            remaining,
            capability: app.capability,
            unit: &app.config.unit,
            actions,
        });
    }

    app.renderer()
        .render_plan(phase, remaining, app.capability, &app.config, &actions);
    Ok(())
}
