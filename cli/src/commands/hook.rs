//! Hook commands: `pre-install`, `post-install`, `pre-removal`,
//! `post-removal`, and the generic `hook <PHASE> <N>`.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::transaction::{HookContext, run_hook};
use crate::domain::{RemainingCount, TransactionPhase, TransactionReport, strategy_for};
use crate::output::{NullReporter, TerminalReporter, json};

/// Run one packaging hook and render its report.
///
/// # Errors
///
/// Returns an error only when the report is fatal, i.e. a provisioning
/// action failed and `strict_provisioning` is set.
pub async fn run(app: &AppContext, phase: TransactionPhase, remaining: RemainingCount) -> Result<()> {
    let strict = app.config.strict_provisioning;

    let report = if app.is_json() {
        execute(app, &NullReporter, phase, remaining).await
    } else {
        app.renderer()
            .render_hook_header(phase, remaining, app.capability, &app.config.unit);
        execute(app, &TerminalReporter::new(&app.output), phase, remaining).await
    };

    if app.is_json() {
        json::print(&report)?;
    } else {
        app.renderer().render_report_summary(&report, strict);
    }

    if report.is_fatal(strict) {
        anyhow::bail!(
            "{} hook failed: could not provision {} in group {}",
            phase,
            app.config.account,
            app.config.group
        );
    }
    Ok(())
}

async fn execute(
    app: &AppContext,
    reporter: &impl ProgressReporter,
    phase: TransactionPhase,
    remaining: RemainingCount,
) -> TransactionReport {
    let ctx = HookContext {
        config: &app.config,
        manager: &app.manager,
        accounts: &app.accounts,
        reporter,
        strategy: strategy_for(app.capability),
    };
    run_hook(&ctx, phase, remaining).await
}
