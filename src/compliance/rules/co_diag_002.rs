//! CO-DIAG-002: Scan stuck in LAUNCHING.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType, ScanPhase};

/// Rule: scan has been LAUNCHING longer than the launching timeout.
pub struct StuckLaunchingScanRule;

impl DiagnosisRule for StuckLaunchingScanRule {
    fn code(&self) -> &'static str {
        codes::STUCK_LAUNCHING_SCAN
    }

    fn description(&self) -> &'static str {
        "Scan is stuck launching its scanner pods"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, config: &DiagnosisConfig) -> Vec<Issue> {
        view.scans()
            .filter(|scan| scan.phase == ScanPhase::Launching)
            .filter(|scan| {
                view.elapsed_since_start(scan)
                    .is_some_and(|elapsed| elapsed > config.launching_timeout())
            })
            .map(|scan| {
                Issue::new(
                    self.code(),
                    IssueType::StuckScan,
                    self.default_severity(),
                    &scan.name,
                    format!("Scan '{}' stuck in LAUNCHING phase", scan.name),
                    "Check if scanner pods are being created. Look for resource constraints or ImagePullBackOff errors.",
                )
            })
            .collect()
    }
}
