//! End-to-end package transactions against a simulated host.
//!
//! RPM runs an upgrade as: new %pre(2), new %post(2), old %preun(1),
//! old %postun(1). An erase runs %preun(0) then %postun(0).

use pkg_lifecycle::domain::{
    AccountAction, Action, ActionStatus, Capability, TransactionPhase, UnitAction,
};

use crate::helpers::{SimulatedHost, UnitState, hook};

const UNIT: &str = "neutron-opflex-agent.service";

async fn install(host: &SimulatedHost, capability: Capability) {
    hook(host, capability, TransactionPhase::PreInstall, 1).await;
    hook(host, capability, TransactionPhase::PostInstall, 1).await;
}

async fn upgrade(host: &SimulatedHost, capability: Capability) {
    hook(host, capability, TransactionPhase::PreInstall, 2).await;
    hook(host, capability, TransactionPhase::PostInstall, 2).await;
    hook(host, capability, TransactionPhase::PreRemoval, 1).await;
    hook(host, capability, TransactionPhase::PostRemoval, 1).await;
}

async fn erase(host: &SimulatedHost, capability: Capability) {
    hook(host, capability, TransactionPhase::PreRemoval, 0).await;
    hook(host, capability, TransactionPhase::PostRemoval, 0).await;
}

// ── Fresh install ────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_install_native_provisions_and_presets() {
    let host = SimulatedHost::new();
    install(&host, Capability::Native).await;

    assert!(host.has_group("opflexep"));
    assert!(host.is_member("neutron", "opflexep"));
    assert_eq!(
        host.log(),
        vec![
            "groupadd opflexep".to_string(),
            "usermod neutron:opflexep".to_string(),
            format!("preset {UNIT}"),
        ]
    );
    assert!(host.unit(UNIT).enabled);
    assert!(!host.unit(UNIT).active, "install must not start the service");
}

#[tokio::test]
async fn fresh_install_fallback_only_reloads() {
    let host = SimulatedHost::new();
    install(&host, Capability::Fallback).await;

    assert!(host.is_member("neutron", "opflexep"));
    assert_eq!(host.reloads(), 1);
    assert_eq!(host.unit(UNIT), UnitState::default());
}

#[tokio::test]
async fn pre_install_twice_creates_the_group_once() {
    let host = SimulatedHost::new();
    let first = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;
    let second = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;

    assert!(first.is_clean());
    assert!(second.is_clean());
    assert_eq!(first.outcomes[0].status, ActionStatus::Succeeded);
    assert_eq!(
        second.outcomes[0].status,
        ActionStatus::Skipped {
            reason: "group already exists".to_string()
        }
    );
    let groupadds = host.log().iter().filter(|l| l.starts_with("groupadd")).count();
    assert_eq!(groupadds, 1);
    assert!(host.is_member("neutron", "opflexep"));
}

#[tokio::test]
async fn pre_install_keeps_an_existing_group() {
    let host = SimulatedHost::new().with_group("opflexep");
    let report = hook(&host, Capability::Fallback, TransactionPhase::PreInstall, 1).await;

    assert!(report.is_clean());
    assert!(!host.log().iter().any(|l| l.starts_with("groupadd")));
    assert!(host.is_member("neutron", "opflexep"));
}

// ── Upgrade ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upgrade_native_restarts_running_service_once() {
    let host = SimulatedHost::with_running_unit(UNIT).with_group("opflexep");
    upgrade(&host, Capability::Native).await;

    assert_eq!(
        host.log(),
        vec![
            "usermod neutron:opflexep".to_string(),
            format!("try-restart {UNIT}"),
        ]
    );
    assert_eq!(
        host.unit(UNIT),
        UnitState {
            enabled: true,
            active: true
        }
    );
}

#[tokio::test]
async fn upgrade_fallback_reloads_then_restarts() {
    let host = SimulatedHost::with_running_unit(UNIT).with_group("opflexep");
    upgrade(&host, Capability::Fallback).await;

    let log = host.log();
    assert_eq!(
        &log[log.len() - 2..],
        &["reload".to_string(), format!("try-restart {UNIT}")]
    );
    assert!(
        !log.iter().any(|l| l.starts_with("stop") || l.starts_with("disable")),
        "upgrade must not stop or disable: {log:?}"
    );
    assert!(host.unit(UNIT).enabled);
}

// ── Erase ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn erase_native_disables_then_stops_without_reloading() {
    let host = SimulatedHost::with_running_unit(UNIT);
    erase(&host, Capability::Native).await;

    assert_eq!(host.log(), vec![format!("disable {UNIT}"), format!("stop {UNIT}")]);
    assert_eq!(host.unit(UNIT), UnitState::default());
    assert_eq!(host.reloads(), 0);
}

#[tokio::test]
async fn erase_fallback_reloads_after_removal() {
    let host = SimulatedHost::with_running_unit(UNIT);
    erase(&host, Capability::Fallback).await;

    assert_eq!(
        host.log(),
        vec![
            format!("disable {UNIT}"),
            format!("stop {UNIT}"),
            "reload".to_string(),
        ]
    );
    assert_eq!(host.reloads(), 1);
}

#[tokio::test]
async fn erase_leaves_group_and_membership_in_place() {
    let host = SimulatedHost::new();
    install(&host, Capability::Native).await;
    erase(&host, Capability::Native).await;

    assert!(host.has_group("opflexep"));
    assert!(host.is_member("neutron", "opflexep"));
}

// ── Best-effort semantics ────────────────────────────────────────────────────

#[tokio::test]
async fn failed_disable_still_stops_the_unit() {
    let host = SimulatedHost::failing(&["disable"]);
    let report = hook(&host, Capability::Native, TransactionPhase::PreRemoval, 0).await;

    assert_eq!(report.failures().count(), 1);
    assert!(matches!(
        report.outcomes[0].status,
        ActionStatus::Failed { .. }
    ));
    assert_eq!(report.outcomes[1].status, ActionStatus::Succeeded);
    assert_eq!(host.log(), vec![format!("disable {UNIT}"), format!("stop {UNIT}")]);
    assert!(!report.is_fatal(true), "unit failures are never fatal");
}

#[tokio::test]
async fn failed_stop_is_recorded_but_not_fatal() {
    let host = SimulatedHost::failing(&["stop"]);
    let report = hook(&host, Capability::Fallback, TransactionPhase::PreRemoval, 0).await;

    let failed: Vec<_> = report.failures().map(|o| o.action).collect();
    assert_eq!(failed, vec![Action::Unit(UnitAction::Stop)]);
    assert!(!report.is_fatal(false));
    assert!(!report.is_fatal(true));
}

// ── Report contents ──────────────────────────────────────────────────────────

#[tokio::test]
async fn report_records_invocation_and_targets() {
    let host = SimulatedHost::new();
    let report = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;

    assert_eq!(report.phase, TransactionPhase::PreInstall);
    assert_eq!(report.remaining.get(), 1);
    assert_eq!(report.capability, Capability::Native);
    assert_eq!(report.unit, UNIT);
    assert_eq!(
        report.actions().collect::<Vec<_>>(),
        vec![
            Action::Account(AccountAction::EnsureSystemGroup),
            Action::Account(AccountAction::AddUserToGroup),
        ]
    );
    assert_eq!(report.outcomes[0].target.as_deref(), Some("opflexep"));
    assert_eq!(report.outcomes[1].target.as_deref(), Some("neutron:opflexep"));
}

#[tokio::test]
async fn reload_outcome_has_no_target() {
    let host = SimulatedHost::new();
    let report = hook(&host, Capability::Fallback, TransactionPhase::PostRemoval, 0).await;

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].action, Action::Unit(UnitAction::Reload));
    assert_eq!(report.outcomes[0].target, None);
}

#[tokio::test]
async fn upgrade_hooks_with_nothing_to_do_produce_empty_reports() {
    let host = SimulatedHost::with_running_unit(UNIT);
    for (phase, n) in [
        (TransactionPhase::PostInstall, 2),
        (TransactionPhase::PreRemoval, 1),
    ] {
        let report = hook(&host, Capability::Native, phase, n).await;
        assert!(report.outcomes.is_empty(), "{phase} N={n}");
    }
    assert!(host.log().is_empty());
}
