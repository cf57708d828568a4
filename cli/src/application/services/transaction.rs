//! Application service: run one packaging hook end to end.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use tracing::Instrument;

use crate::application::ports::{AccountDatabase, ProgressReporter, ServiceManager};
use crate::application::services::{provisioning, unit_hooks};
use crate::domain::{
    ActionOutcome, HookStrategy, LifecycleConfig, RemainingCount, TransactionPhase, TransactionReport,
};

/// Collaborators for a single hook invocation.
pub struct HookContext<'a, M, A, R> {
    pub config: &'a LifecycleConfig,
    pub manager: &'a M,
    pub accounts: &'a A,
    pub reporter: &'a R,
    /// Selected once per invocation from the capability probe.
    pub strategy: &'a dyn HookStrategy,
}

/// Execute the hook for `phase` and return what happened.
///
/// Never fails: every action's result is captured in the report. Whether the
/// transaction should be aborted is decided by the caller through
/// [`TransactionReport::is_fatal`].
pub async fn run_hook<M, A, R>(
    ctx: &HookContext<'_, M, A, R>,
    phase: TransactionPhase,
    remaining: RemainingCount,
) -> TransactionReport
where
    M: ServiceManager,
    A: AccountDatabase,
    R: ProgressReporter,
{
    let unit = ctx.config.unit.as_str();
    let capability = ctx.strategy.capability();

    let span = tracing::info_span!("hook", %phase, %remaining, %capability, unit);
    let outcomes = dispatch(ctx, phase, remaining).instrument(span.clone()).await;
    let _guard = span.enter();

    let mut report = TransactionReport::new(phase, remaining, capability, unit);
    for outcome in outcomes {
        report.record(outcome);
    }

    let failures = report.failures().count();
    if failures > 0 {
        tracing::warn!(failures, "hook completed with failures");
    } else {
        tracing::debug!(actions = report.outcomes.len(), "hook completed");
    }
    report
}

async fn dispatch<M, A, R>(
    ctx: &HookContext<'_, M, A, R>,
    phase: TransactionPhase,
    remaining: RemainingCount,
) -> Vec<ActionOutcome>
where
    M: ServiceManager,
    A: AccountDatabase,
    R: ProgressReporter,
{
    let unit = ctx.config.unit.as_str();
    tracing::debug!("running {} hook", phase.scriptlet());
    match phase {
        TransactionPhase::PreInstall => {
            provisioning::ensure_account_provisioned(
                ctx.accounts,
                ctx.reporter,
                &ctx.config.group,
                &ctx.config.account,
            )
            .await
        }
        TransactionPhase::PostInstall => {
            unit_hooks::register_unit(ctx.manager, ctx.reporter, ctx.strategy, unit, remaining)
                .await
        }
        TransactionPhase::PreRemoval => {
            unit_hooks::deprovision_unit(ctx.manager, ctx.reporter, ctx.strategy, unit, remaining)
                .await
        }
        TransactionPhase::PostRemoval => {
            unit_hooks::finalize_removal(ctx.manager, ctx.reporter, ctx.strategy, unit, remaining)
                .await
        }
    }
}
