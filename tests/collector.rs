mod common;

use common::*;
use compliance_inspector::compliance::formatter::format_status_overview;
use compliance_inspector::compliance::{
    CheckSeverity, CheckStatus, Collector, PodPhase, ScanPhase, ScanResult,
};

#[tokio::test]
async fn test_collect_all_healthy_namespace() {
    let cluster = FakeCluster::new(healthy());
    let snapshot = Collector::new(&cluster).collect_all().await.unwrap();

    assert_eq!(snapshot.suites.len(), 1);
    assert_eq!(snapshot.scans.len(), 1);
    assert!(snapshot.operator_status.is_healthy);
    assert!(snapshot.operator_status.issues.is_empty());

    let totals = snapshot.total_counts();
    assert_eq!(totals.total, 5);
    assert_eq!(totals.pass, 3);
    assert_eq!(totals.fail, 1);
    assert_eq!(totals.compliance_percentage(), 75.0);
}

#[tokio::test]
async fn test_failed_check_listing_keeps_scan() {
    let mut data = healthy();
    let broken = scan("ocp4-node", "cis", ScanPhase::Done, ScanResult::Compliant);
    data.scans.push(broken);
    data.failing_check_results.insert("ocp4-node".to_string());

    let cluster = FakeCluster::new(data);
    let snapshot = Collector::new(&cluster).collect_all().await.unwrap();

    assert!(snapshot.scans.contains_key("ocp4-node"));
    assert!(!snapshot.check_results.contains_key("ocp4-node"));
    assert!(snapshot.check_results.contains_key("ocp4-cis"));
    assert!(snapshot.remediations.contains_key("ocp4-node"));
}

#[tokio::test]
async fn test_operator_pod_listing_failure_fails_collection() {
    let mut data = healthy();
    data.operator_pods_fail = true;

    let cluster = FakeCluster::new(data);
    assert!(Collector::new(&cluster).collect_all().await.is_err());
}

#[tokio::test]
async fn test_no_operator_pods_is_one_issue() {
    let mut data = healthy();
    data.operator_pods.clear();

    let cluster = FakeCluster::new(data);
    let health = Collector::new(&cluster).operator_health().await.unwrap();

    assert!(!health.is_healthy);
    assert_eq!(health.issues, vec!["No compliance operator pods found"]);
    assert!(health.operator_pods.is_empty());
}

#[tokio::test]
async fn test_not_ready_operator_pod() {
    let mut data = healthy();
    data.operator_pods = vec![pod("compliance-operator-7d9f", PodPhase::Running, false)];

    let cluster = FakeCluster::new(data);
    let health = Collector::new(&cluster).operator_health().await.unwrap();

    assert!(!health.is_healthy);
    assert_eq!(
        health.issues,
        vec!["Pod compliance-operator-7d9f is not ready"]
    );
}

#[tokio::test]
async fn test_collect_suite() {
    let mut data = healthy();
    let other = scan("rhcos4-e8", "e8", ScanPhase::Running, ScanResult::NotAvailable);
    data.suites.push(suite("e8", &[&other]));
    data.scans.push(other);

    let cluster = FakeCluster::new(data);
    let suite = Collector::new(&cluster).collect_suite("cis").await.unwrap();

    assert_eq!(suite.suite.name, "cis");
    assert_eq!(suite.scans.len(), 1);
    assert_eq!(suite.scans[0].name, "ocp4-cis");
    assert_eq!(suite.check_results["ocp4-cis"].len(), 5);
}

#[tokio::test]
async fn test_collect_missing_suite() {
    let cluster = FakeCluster::new(healthy());
    let err = Collector::new(&cluster)
        .collect_suite("missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_overview_scopes_compliance_to_each_suite() {
    let mut data = healthy();
    let e8 = scan("rhcos4-e8", "e8", ScanPhase::Done, ScanResult::NonCompliant);
    data.suites.push(suite("e8", &[&e8]));
    data.check_results.insert(
        "rhcos4-e8".to_string(),
        vec![
            check("sshd-disable-root", CheckStatus::Fail, CheckSeverity::High),
            check("auditd-enabled", CheckStatus::Fail, CheckSeverity::Medium),
        ],
    );
    data.scans.push(e8);

    let cluster = FakeCluster::new(data);
    let snapshot = Collector::new(&cluster).collect_all().await.unwrap();
    let output = format_status_overview(&snapshot, None);

    assert!(output.contains("**Overall Compliance:** 75.0% (3/4 checks passed)"));
    assert!(output.contains("**Overall Compliance:** 0.0% (0/2 checks passed)"));
    assert!(output.contains("- **Total Checks:** 7"));

    let only_cis = format_status_overview(&snapshot, Some("cis"));
    assert!(only_cis.contains("### cis"));
    assert!(!only_cis.contains("### e8"));
}
