//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::status::InstallStatus;
use crate::domain::{
    Action, Capability, LifecycleConfig, RemainingCount, Severity, TransactionPhase,
    TransactionReport,
};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the line announcing a hook before its actions run.
    pub fn render_hook_header(
        &self,
        phase: TransactionPhase,
        remaining: RemainingCount,
        capability: Capability,
        unit: &str,
    ) {
        self.ctx.header(&format!(
            "{} ({}) N={remaining} {unit} [{capability}]",
            phase,
            phase.scriptlet()
        ));
    }

    /// Render the closing summary of a hook.
    pub fn render_report_summary(&self, report: &TransactionReport, strict: bool) {
        if report.outcomes.is_empty() {
            self.ctx.info("nothing to do");
            return;
        }
        let failures: Vec<_> = report.failures().collect();
        if failures.is_empty() {
            return;
        }

        let provisioning = failures
            .iter()
            .any(|o| o.severity == Severity::Provisioning);
        if report.is_fatal(strict) {
            self.ctx.error(&format!(
                "{} action(s) failed; aborting because strict_provisioning is set",
                failures.len()
            ));
        } else {
            self.ctx.warn(&format!(
                "{} action(s) failed; the package transaction continues",
                failures.len()
            ));
        }
        if provisioning {
            self.ctx.info("Check: getent group / id <account>, then re-run pre-install");
        } else {
            self.ctx
                .info(&format!("Check: systemctl status {}", report.unit));
        }
    }

    /// Render a decided-but-not-executed plan.
    pub fn render_plan(
        &self,
        phase: TransactionPhase,
        remaining: RemainingCount,
        capability: Capability,
        config: &LifecycleConfig,
        actions: &[Action],
    ) {
        self.render_hook_header(phase, remaining, capability, &config.unit);
        if actions.is_empty() {
            self.ctx.info("no actions");
            return;
        }
        for (i, action) in actions.iter().enumerate() {
            let target = match action {
                Action::Account(_) if phase == TransactionPhase::PreInstall => {
                    if i == 0 {
                        config.group.clone()
                    } else {
                        format!("{}:{}", config.account, config.group)
                    }
                }
                Action::Unit(u) if u.targets_unit() => config.unit.clone(),
                _ => String::new(),
            };
            if !self.ctx.quiet {
                println!(
                    "  {}. {action} {}",
                    i + 1,
                    target.style(self.ctx.styles.dim)
                );
            }
        }
    }

    /// Render the result of `status`.
    pub fn render_status(&self, status: &InstallStatus) {
        self.ctx.kv("Unit:", &status.unit);
        self.ctx.kv("Integration:", &status.capability.to_string());
        self.ctx.kv(
            "Enabled:",
            status.enablement.as_deref().unwrap_or("unknown"),
        );
        self.ctx
            .kv("Active:", status.active.as_deref().unwrap_or("unknown"));
        self.ctx.kv(
            "Group:",
            &format!("{} ({})", status.group, yes_no(status.group_exists)),
        );
        self.ctx.kv(
            "Membership:",
            &format!(
                "{} in {} ({})",
                status.account,
                status.group,
                yes_no(status.account_in_group)
            ),
        );

        let issues = status.issues();
        if !self.ctx.quiet {
            println!();
        }
        if issues.is_empty() {
            self.ctx.success("Everything looks good");
        } else {
            for issue in &issues {
                self.ctx.warn(issue);
            }
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &LifecycleConfig, path: &Path, exists: bool) {
        let source = if exists { "" } else { " (not found, defaults)" };
        self.ctx
            .header(&format!("Configuration ({}){source}", path.display()));
        self.ctx.kv("unit:", &config.unit);
        self.ctx.kv("group:", &config.group);
        self.ctx.kv("account:", &config.account);
        self.ctx
            .kv("strict_provisioning:", &config.strict_provisioning.to_string());
        self.ctx.kv(
            "command_timeout_secs:",
            &config.command_timeout_secs.to_string(),
        );
        self.ctx.kv("native_macros_path:", &config.native_macros_path);
    }
}

fn yes_no(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}
