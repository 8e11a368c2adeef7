//! In-memory cluster used by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use compliance_inspector::ComplianceError;
use compliance_inspector::compliance::{
    CheckResult, CheckSeverity, CheckStatus, ClusterAccess, ComplianceScan, ComplianceSuite,
    ContainerStateDetail, ContainerView, EventType, EventView, PodConditionView, PodPhase,
    PodView, Remediation, ResourceKind, ScanPhase, ScanResult, ScanStatusSummary, ScanType,
};

pub const NAMESPACE: &str = "openshift-compliance";

/// Fixed clock for time-based rules.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

#[derive(Debug, Default)]
pub struct FakeData {
    pub suites: Vec<ComplianceSuite>,
    pub scans: Vec<ComplianceScan>,
    pub check_results: HashMap<String, Vec<CheckResult>>,
    pub remediations: HashMap<String, Vec<Remediation>>,
    pub operator_pods: Vec<PodView>,
    pub scanner_pods: HashMap<String, Vec<PodView>>,
    pub events: HashMap<String, Vec<EventView>>,
    pub logs: HashMap<String, String>,
    /// Scans whose check-result listing fails.
    pub failing_check_results: HashSet<String>,
    /// Pods whose logs cannot be read.
    pub failing_logs: HashSet<String>,
    pub operator_pods_fail: bool,
}

/// Serves `FakeData` in [`NAMESPACE`]; every other namespace is empty.
#[derive(Debug, Clone)]
pub struct FakeCluster {
    data: Arc<FakeData>,
    namespace: String,
}

impl FakeCluster {
    pub fn new(data: FakeData) -> Self {
        Self {
            data: Arc::new(data),
            namespace: NAMESPACE.to_string(),
        }
    }

    fn home(&self) -> bool {
        self.namespace == NAMESPACE
    }

    fn not_found(&self, kind: ResourceKind, name: &str) -> ComplianceError {
        ComplianceError::NotFound {
            kind,
            name: name.to_string(),
            namespace: self.namespace.clone(),
        }
    }

    fn broken(kind: ResourceKind, name: &str) -> ComplianceError {
        ComplianceError::InvalidResource {
            kind,
            name: name.to_string(),
            reason: "injected failure".to_string(),
        }
    }
}

impl ClusterAccess for FakeCluster {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn in_namespace(&self, namespace: &str) -> Self {
        Self {
            data: Arc::clone(&self.data),
            namespace: namespace.to_string(),
        }
    }

    async fn list_suites(&self) -> compliance_inspector::Result<Vec<ComplianceSuite>> {
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self.data.suites.clone())
    }

    async fn get_suite(&self, name: &str) -> compliance_inspector::Result<ComplianceSuite> {
        self.list_suites()
            .await?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| self.not_found(ResourceKind::Suite, name))
    }

    async fn list_scans(
        &self,
        suite: Option<&str>,
    ) -> compliance_inspector::Result<Vec<ComplianceScan>> {
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self
            .data
            .scans
            .iter()
            .filter(|scan| suite.is_none() || scan.suite.as_deref() == suite)
            .cloned()
            .collect())
    }

    async fn get_scan(&self, name: &str) -> compliance_inspector::Result<ComplianceScan> {
        self.list_scans(None)
            .await?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| self.not_found(ResourceKind::Scan, name))
    }

    async fn list_check_results(
        &self,
        scan: &str,
        status: Option<CheckStatus>,
    ) -> compliance_inspector::Result<Vec<CheckResult>> {
        if self.data.failing_check_results.contains(scan) {
            return Err(Self::broken(ResourceKind::CheckResult, scan));
        }
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self
            .data
            .check_results
            .get(scan)
            .into_iter()
            .flatten()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    async fn get_check_result(&self, name: &str) -> compliance_inspector::Result<CheckResult> {
        self.data
            .check_results
            .values()
            .flatten()
            .find(|r| self.home() && r.name == name)
            .cloned()
            .ok_or_else(|| self.not_found(ResourceKind::CheckResult, name))
    }

    async fn list_remediations(
        &self,
        scan: Option<&str>,
    ) -> compliance_inspector::Result<Vec<Remediation>> {
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(match scan {
            Some(scan) => self.data.remediations.get(scan).cloned().unwrap_or_default(),
            None => self.data.remediations.values().flatten().cloned().collect(),
        })
    }

    async fn get_remediation(&self, name: &str) -> compliance_inspector::Result<Remediation> {
        self.list_remediations(None)
            .await?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| self.not_found(ResourceKind::Remediation, name))
    }

    async fn list_operator_pods(&self) -> compliance_inspector::Result<Vec<PodView>> {
        if self.data.operator_pods_fail {
            return Err(Self::broken(ResourceKind::Pod, "compliance-operator"));
        }
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self.data.operator_pods.clone())
    }

    async fn list_scanner_pods(&self, scan: &str) -> compliance_inspector::Result<Vec<PodView>> {
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self.data.scanner_pods.get(scan).cloned().unwrap_or_default())
    }

    async fn get_pod(&self, name: &str) -> compliance_inspector::Result<PodView> {
        self.data
            .operator_pods
            .iter()
            .chain(self.data.scanner_pods.values().flatten())
            .find(|p| self.home() && p.name == name)
            .cloned()
            .ok_or_else(|| self.not_found(ResourceKind::Pod, name))
    }

    async fn list_events(
        &self,
        _kind: ResourceKind,
        name: &str,
    ) -> compliance_inspector::Result<Vec<EventView>> {
        if !self.home() {
            return Ok(Vec::new());
        }
        Ok(self.data.events.get(name).cloned().unwrap_or_default())
    }

    async fn pod_logs(&self, pod: &str, tail_lines: i64) -> compliance_inspector::Result<String> {
        if self.data.failing_logs.contains(pod) {
            return Err(Self::broken(ResourceKind::Pod, pod));
        }
        let text = self.data.logs.get(pod).cloned().unwrap_or_default();
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.len().saturating_sub(tail_lines as usize);
        Ok(lines[start..].join("\n"))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn scan(name: &str, suite: &str, phase: ScanPhase, result: ScanResult) -> ComplianceScan {
    ComplianceScan {
        name: name.to_string(),
        suite: Some(suite.to_string()),
        scan_type: ScanType::Platform,
        profile: "xccdf_org.ssgproject.content_profile_cis".to_string(),
        content: "ssg-ocp4-ds.xml".to_string(),
        phase,
        result,
        start_timestamp: Some(now() - chrono::Duration::minutes(5)),
        error_message: None,
        warnings: None,
    }
}

pub fn suite(name: &str, scans: &[&ComplianceScan]) -> ComplianceSuite {
    ComplianceSuite {
        name: name.to_string(),
        phase: ScanPhase::Done,
        result: ScanResult::NonCompliant,
        error_message: None,
        auto_apply_remediations: false,
        schedule: Some("0 1 * * *".to_string()),
        scan_statuses: scans
            .iter()
            .map(|s| ScanStatusSummary {
                name: s.name.clone(),
                phase: s.phase,
                result: s.result,
            })
            .collect(),
    }
}

pub fn check(name: &str, status: CheckStatus, severity: CheckSeverity) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        id: format!("xccdf_org.ssgproject.content_rule_{}", name),
        status,
        severity,
        description: format!("Check {}", name),
        instructions: String::new(),
        rationale: String::new(),
    }
}

pub fn remediation(name: &str, apply: bool) -> Remediation {
    Remediation {
        name: name.to_string(),
        apply,
        application_state: if apply { "Applied" } else { "NotApplied" }.to_string(),
        remediation_type: Some("Configuration".to_string()),
    }
}

pub fn pod(name: &str, phase: PodPhase, ready: bool) -> PodView {
    PodView {
        name: name.to_string(),
        phase,
        reason: None,
        conditions: vec![PodConditionView {
            condition_type: "Ready".to_string(),
            status: if ready { "True" } else { "False" }.to_string(),
            reason: None,
            message: None,
        }],
        containers: vec![ContainerView {
            name: "scanner".to_string(),
            ..Default::default()
        }],
    }
}

pub fn oom_killed(mut pod: PodView) -> PodView {
    pod.containers[0].last_terminated = Some(ContainerStateDetail {
        reason: "OOMKilled".to_string(),
        message: None,
    });
    pod
}

pub fn warning_event(scan: &str, reason: &str, message: &str) -> EventView {
    EventView {
        involved_kind: "ComplianceScan".to_string(),
        involved_name: scan.to_string(),
        event_type: EventType::Warning,
        reason: reason.to_string(),
        message: message.to_string(),
    }
}

/// A healthy namespace: one operator pod, suite `cis` with a finished scan.
pub fn healthy() -> FakeData {
    let done = scan("ocp4-cis", "cis", ScanPhase::Done, ScanResult::NonCompliant);
    let mut data = FakeData {
        suites: vec![suite("cis", &[&done])],
        operator_pods: vec![pod("compliance-operator-7d9f", PodPhase::Running, true)],
        ..Default::default()
    };
    data.check_results.insert(
        "ocp4-cis".to_string(),
        vec![
            check("api-server-tls", CheckStatus::Pass, CheckSeverity::High),
            check("audit-log-path", CheckStatus::Pass, CheckSeverity::Medium),
            check("etcd-encryption", CheckStatus::Pass, CheckSeverity::High),
            check("kubelet-anonymous-auth", CheckStatus::Fail, CheckSeverity::High),
            check("idp-configured", CheckStatus::Manual, CheckSeverity::Low),
        ],
    );
    data.remediations.insert(
        "ocp4-cis".to_string(),
        vec![
            remediation("ocp4-cis-kubelet-anonymous-auth", true),
            remediation("ocp4-cis-audit-profile", false),
        ],
    );
    data.scans.push(done);
    data
}
