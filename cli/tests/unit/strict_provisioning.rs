//! Provisioning failures: warnings by default, fatal under strict mode.

use pkg_lifecycle::domain::{
    ActionStatus, Capability, LifecycleConfig, Severity, TransactionPhase,
};

use crate::helpers::{SimulatedHost, hook, hook_with};

#[tokio::test]
async fn groupadd_failure_is_a_provisioning_failure() {
    let host = SimulatedHost::failing(&["groupadd"]);
    let report = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;

    let first = &report.outcomes[0];
    assert!(first.is_failure());
    assert_eq!(first.severity, Severity::Provisioning);
    assert!(!report.is_fatal(false));
    assert!(report.is_fatal(true));
}

#[tokio::test]
async fn membership_is_attempted_after_group_failure() {
    let host = SimulatedHost::failing(&["groupadd"]);
    let report = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;

    assert_eq!(report.outcomes.len(), 2);
    assert!(host.log().contains(&"usermod neutron:opflexep".to_string()));
    // The group is missing, so the membership step fails too.
    assert!(matches!(
        report.outcomes[1].status,
        ActionStatus::Failed { .. }
    ));
    assert_eq!(report.failures().count(), 2);
}

#[tokio::test]
async fn membership_failure_alone_is_fatal_under_strict() {
    let host = SimulatedHost::failing(&["usermod"]).with_group("opflexep");
    let report = hook(&host, Capability::Fallback, TransactionPhase::PreInstall, 1).await;

    assert!(matches!(
        report.outcomes[0].status,
        ActionStatus::Skipped { .. }
    ));
    assert!(report.outcomes[1].is_failure());
    assert!(report.is_fatal(true));
}

#[tokio::test]
async fn existing_group_is_never_fatal() {
    let host = SimulatedHost::new().with_group("opflexep");
    let report = hook(&host, Capability::Native, TransactionPhase::PreInstall, 1).await;

    assert!(report.is_clean());
    assert!(!report.is_fatal(true));
}

#[tokio::test]
async fn configured_names_flow_through_to_actions() {
    let config = LifecycleConfig::default().with_overrides(
        Some("agent-ovs.service"),
        Some("opflexgrp"),
        Some("svcuser"),
    );
    let host = SimulatedHost::new();
    hook_with(&host, &config, Capability::Native, TransactionPhase::PreInstall, 1).await;
    hook_with(&host, &config, Capability::Native, TransactionPhase::PostInstall, 1).await;

    assert!(host.is_member("svcuser", "opflexgrp"));
    assert!(host.unit("agent-ovs.service").enabled);
    assert!(!host.has_group("opflexep"));
}
