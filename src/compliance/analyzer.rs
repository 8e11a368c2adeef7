//! Root-cause diagnosis.
//!
//! The analyzer reads scans, their scanner pods and their events through a
//! [`ClusterAccess`], assembles a [`ClusterView`] and runs every registered
//! rule over it. Critical issues land in `issues`, everything else in
//! `warnings`.

use super::client::ClusterAccess;
use super::config::DiagnosisConfig;
use super::query::ResourceKind;
use super::rules::{ClusterView, ScanContext, codes, run_rules};
use super::types::{
    ComplianceScan, DiagnosisResult, Issue, IssueSeverity, IssueType, ScanResult,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use futures_util::future::{join, join_all};
use log::{debug, info, warn};

/// Suggestion returned when no rule fires.
pub const NO_ISSUES_SUGGESTION: &str =
    "No issues detected. Compliance operator appears to be functioning normally.";

/// Runs the diagnosis rules against live cluster state.
pub struct Analyzer<'a, C: ClusterAccess> {
    client: &'a C,
    config: DiagnosisConfig,
    now: Option<DateTime<Utc>>,
}

impl<'a, C: ClusterAccess> Analyzer<'a, C> {
    pub fn new(client: &'a C, config: DiagnosisConfig) -> Self {
        Self {
            client,
            config,
            now: None,
        }
    }

    /// Evaluate time-based rules against a fixed instant instead of the clock.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Diagnose every scan in the namespace.
    pub async fn analyze_all(&self) -> Result<DiagnosisResult> {
        let scans = self.client.list_scans(None).await?;
        let result = self.diagnose(scans).await;
        info!(
            "diagnosis of {}: {} issues, {} warnings",
            self.client.namespace(),
            result.issues.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    /// Diagnose the scans owned by one suite. Fails if the suite does not exist.
    pub async fn analyze_suite(&self, suite: &str) -> Result<DiagnosisResult> {
        self.client.get_suite(suite).await?;
        let scans = self.client.list_scans(Some(suite)).await?;
        let result = self.diagnose(scans).await;
        info!(
            "diagnosis of suite {}: {} issues, {} warnings",
            suite,
            result.issues.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    async fn diagnose(&self, scans: Vec<ComplianceScan>) -> DiagnosisResult {
        let view = self.gather(scans).await;
        partition(run_rules(&view, &self.config))
    }

    /// Reads scanner pods and events for every scan concurrently.
    ///
    /// A scan whose pods or events cannot be listed is still diagnosed; the
    /// rules that need the missing data simply see nothing for it.
    async fn gather(&self, scans: Vec<ComplianceScan>) -> ClusterView {
        let reads = scans.into_iter().map(|scan| async move {
            let (pods, events) = join(
                self.client.list_scanner_pods(&scan.name),
                self.client.list_events(ResourceKind::Scan, &scan.name),
            )
            .await;

            let mut ctx = ScanContext::new(scan);
            match pods {
                Ok(pods) => {
                    debug!("scan {}: {} scanner pods", ctx.scan.name, pods.len());
                    ctx.pods = Some(pods);
                }
                Err(e) => warn!("skipping pod checks for scan {}: {}", ctx.scan.name, e),
            }
            match events {
                Ok(events) => ctx.events = Some(events),
                Err(e) => warn!("skipping event checks for scan {}: {}", ctx.scan.name, e),
            }
            ctx
        });

        let contexts = join_all(reads).await;
        ClusterView::new(self.now.unwrap_or_else(Utc::now), contexts)
    }
}

/// Split issues by severity and add the all-clear suggestion when both are empty.
pub fn partition(all: Vec<Issue>) -> DiagnosisResult {
    let (issues, warnings): (Vec<_>, Vec<_>) = all
        .into_iter()
        .partition(|issue| issue.severity() == IssueSeverity::Critical);

    let mut suggestions = Vec::new();
    if issues.is_empty() && warnings.is_empty() {
        suggestions.push(NO_ISSUES_SUGGESTION.to_string());
    }

    DiagnosisResult {
        issues,
        warnings,
        suggestions,
    }
}

/// Explain why a single scan did not come out compliant.
///
/// Not deduplicated against [`Analyzer::analyze_all`]: a scan with an ERROR
/// result is reported by both.
pub fn analyze_scan_failure(scan: &ComplianceScan) -> Vec<Issue> {
    let mut issues = Vec::new();

    match scan.result {
        ScanResult::Error => {
            let message = scan
                .error_message
                .as_deref()
                .unwrap_or("no error message reported");
            issues.push(Issue::new(
                codes::SCAN_FAILED,
                IssueType::FailedPod,
                IssueSeverity::Critical,
                &scan.name,
                format!("Scan '{}' failed: {}", scan.name, message),
                "Review the error message and check scanner pod logs for more details.",
            ));
        }
        ScanResult::NonCompliant => {
            issues.push(Issue::new(
                codes::SCAN_NON_COMPLIANT,
                IssueType::Misconfiguration,
                IssueSeverity::Warning,
                &scan.name,
                format!("Scan '{}' found compliance violations", scan.name),
                "Review failed checks and apply available remediations. Some checks may require manual remediation.",
            ));
        }
        _ => {}
    }

    issues
}
