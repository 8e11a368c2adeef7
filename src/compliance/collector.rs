//! Snapshot collection.
//!
//! Builds a point-in-time view of suites, scans, per-scan check results and
//! remediations, and operator health. Per-scan fetches run concurrently; a scan
//! whose check results or remediations cannot be listed stays in the snapshot
//! and is only left out of the map that failed.

use super::client::ClusterAccess;
use super::types::{
    CheckResult, CheckStatus, ComplianceScan, ComplianceSuite, PodPhase, PodView, Remediation,
    ScanResult,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use futures_util::future::{join, join_all};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Restart count above which an operator pod is reported.
pub const OPERATOR_RESTART_THRESHOLD: i32 = 5;

/// Everything the status overview needs, read in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSnapshot {
    pub suites: Vec<ComplianceSuite>,
    /// Every scan in the namespace, keyed by name.
    pub scans: BTreeMap<String, ComplianceScan>,
    /// Keyed by scan name. A scan whose listing failed has no entry.
    pub check_results: BTreeMap<String, Vec<CheckResult>>,
    /// Keyed by scan name. A scan whose listing failed has no entry.
    pub remediations: BTreeMap<String, Vec<Remediation>>,
    pub operator_status: OperatorHealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl ComplianceSnapshot {
    /// Check counts across the named scans that have results.
    pub fn counts_for_scans<'a>(&self, scans: impl IntoIterator<Item = &'a str>) -> CheckCounts {
        scans
            .into_iter()
            .filter_map(|scan| self.check_results.get(scan))
            .fold(CheckCounts::default(), |acc, results| {
                acc.merge(&CheckCounts::from_results(results))
            })
    }

    /// Check counts across every scan that has results.
    pub fn total_counts(&self) -> CheckCounts {
        self.check_results
            .values()
            .fold(CheckCounts::default(), |acc, results| {
                acc.merge(&CheckCounts::from_results(results))
            })
    }
}

/// One suite with its scans and their results.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteData {
    pub suite: ComplianceSuite,
    pub scans: Vec<ComplianceScan>,
    pub check_results: BTreeMap<String, Vec<CheckResult>>,
    pub remediations: BTreeMap<String, Vec<Remediation>>,
}

impl SuiteData {
    /// Counts for one scan, or `None` when its results could not be listed.
    pub fn scan_counts(&self, scan: &str) -> Option<CheckCounts> {
        self.check_results
            .get(scan)
            .map(|results| CheckCounts::from_results(results))
    }

    /// Counts across every scan of the suite that has results.
    pub fn total_counts(&self) -> CheckCounts {
        self.check_results
            .values()
            .fold(CheckCounts::default(), |acc, results| {
                acc.merge(&CheckCounts::from_results(results))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperatorHealthStatus {
    pub operator_pods: Vec<PodStatus>,
    pub is_healthy: bool,
    pub issues: Vec<String>,
}

/// Summary of one operator pod.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodStatus {
    pub name: String,
    pub phase: PodPhase,
    pub ready: bool,
    /// Sum of restart counts across containers.
    pub restarts: i32,
}

/// Check results tallied by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckCounts {
    pub pass: usize,
    pub fail: usize,
    pub manual: usize,
    pub error: usize,
    pub info: usize,
    pub total: usize,
}

impl CheckCounts {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.add(result.status);
        }
        counts
    }

    fn add(&mut self, status: CheckStatus) {
        self.total += 1;
        match status {
            CheckStatus::Pass => self.pass += 1,
            CheckStatus::Fail => self.fail += 1,
            CheckStatus::Manual => self.manual += 1,
            CheckStatus::Error => self.error += 1,
            CheckStatus::Info => self.info += 1,
        }
    }

    pub fn merge(self, other: &Self) -> Self {
        Self {
            pass: self.pass + other.pass,
            fail: self.fail + other.fail,
            manual: self.manual + other.manual,
            error: self.error + other.error,
            info: self.info + other.info,
            total: self.total + other.total,
        }
    }

    /// Count for one status.
    pub fn get(&self, status: CheckStatus) -> usize {
        match status {
            CheckStatus::Pass => self.pass,
            CheckStatus::Fail => self.fail,
            CheckStatus::Manual => self.manual,
            CheckStatus::Error => self.error,
            CheckStatus::Info => self.info,
        }
    }

    /// `100 * pass / (pass + fail)`, or 0 when no check passed or failed.
    ///
    /// Manual, error and info results are not part of the base.
    pub fn compliance_percentage(&self) -> f64 {
        let automated = self.pass + self.fail;
        if automated == 0 {
            return 0.0;
        }
        self.pass as f64 / automated as f64 * 100.0
    }
}

/// Tally of scan results, in [`ScanResult::ALL`] order, omitting zero counts.
pub fn count_by_result(results: impl IntoIterator<Item = ScanResult>) -> Vec<(ScanResult, usize)> {
    let results: Vec<_> = results.into_iter().collect();
    ScanResult::ALL
        .iter()
        .map(|wanted| (*wanted, results.iter().filter(|r| *r == wanted).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// Reads snapshots through a [`ClusterAccess`].
pub struct Collector<'a, C: ClusterAccess> {
    client: &'a C,
}

impl<'a, C: ClusterAccess> Collector<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Collect every suite and scan in the namespace.
    ///
    /// Fails if suites, scans or operator pods cannot be listed. Per-scan
    /// failures are logged and leave a gap in the affected map.
    pub async fn collect_all(&self) -> Result<ComplianceSnapshot> {
        let suites = self.client.list_suites().await?;
        let scans = self.client.list_scans(None).await?;

        let (check_results, remediations) = self.collect_scan_children(&scans).await;
        let operator_status = self.operator_health().await?;

        info!(
            "collected {} suites, {} scans ({} with check results, {} with remediations) in {}",
            suites.len(),
            scans.len(),
            check_results.len(),
            remediations.len(),
            self.client.namespace()
        );

        Ok(ComplianceSnapshot {
            suites,
            scans: scans
                .into_iter()
                .map(|scan| (scan.name.clone(), scan))
                .collect(),
            check_results,
            remediations,
            operator_status,
            timestamp: Utc::now(),
        })
    }

    /// Collect one suite and the scans it owns.
    pub async fn collect_suite(&self, name: &str) -> Result<SuiteData> {
        let suite = self.client.get_suite(name).await?;
        let scans = self.client.list_scans(Some(name)).await?;
        let (check_results, remediations) = self.collect_scan_children(&scans).await;

        info!("collected suite {} with {} scans", name, scans.len());

        Ok(SuiteData {
            suite,
            scans,
            check_results,
            remediations,
        })
    }

    async fn collect_scan_children(
        &self,
        scans: &[ComplianceScan],
    ) -> (
        BTreeMap<String, Vec<CheckResult>>,
        BTreeMap<String, Vec<Remediation>>,
    ) {
        let fetches = scans.iter().map(|scan| async move {
            let (checks, remediations) = join(
                self.client.list_check_results(&scan.name, None),
                self.client.list_remediations(Some(&scan.name)),
            )
            .await;
            (scan.name.as_str(), checks, remediations)
        });

        let mut check_results = BTreeMap::new();
        let mut remediations = BTreeMap::new();
        for (scan, checks, fixes) in join_all(fetches).await {
            match checks {
                Ok(checks) => {
                    debug!("scan {}: {} check results", scan, checks.len());
                    check_results.insert(scan.to_string(), checks);
                }
                Err(e) => warn!("omitting check results of scan {}: {}", scan, e),
            }
            match fixes {
                Ok(fixes) => {
                    remediations.insert(scan.to_string(), fixes);
                }
                Err(e) => warn!("omitting remediations of scan {}: {}", scan, e),
            }
        }
        (check_results, remediations)
    }

    /// Health of the operator deployment's pods.
    pub async fn operator_health(&self) -> Result<OperatorHealthStatus> {
        let pods = self.client.list_operator_pods().await?;
        Ok(operator_health_from_pods(&pods))
    }
}

/// Judge operator health from its pods.
///
/// No pods at all is a single issue. Otherwise a pod that is not Running or not
/// Ready makes the operator unhealthy; frequent restarts are reported but do
/// not.
pub fn operator_health_from_pods(pods: &[PodView]) -> OperatorHealthStatus {
    if pods.is_empty() {
        return OperatorHealthStatus {
            operator_pods: Vec::new(),
            is_healthy: false,
            issues: vec!["No compliance operator pods found".to_string()],
        };
    }

    let mut status = OperatorHealthStatus {
        is_healthy: true,
        ..Default::default()
    };

    for pod in pods {
        let summary = PodStatus {
            name: pod.name.clone(),
            phase: pod.phase,
            ready: pod.is_ready(),
            restarts: pod.total_restarts(),
        };

        if summary.phase != PodPhase::Running {
            status.is_healthy = false;
            status
                .issues
                .push(format!("Pod {} is in phase {}", summary.name, summary.phase));
        }
        if !summary.ready {
            status.is_healthy = false;
            status.issues.push(format!("Pod {} is not ready", summary.name));
        }
        if summary.restarts > OPERATOR_RESTART_THRESHOLD {
            status.issues.push(format!(
                "Pod {} has restarted {} times",
                summary.name, summary.restarts
            ));
        }

        status.operator_pods.push(summary);
    }

    status
}
