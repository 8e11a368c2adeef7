//! CO-DIAG-004: Scanner pod in the Failed phase.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType, PodPhase};

/// Rule: scanner pod phase is Failed.
pub struct FailedScannerPodRule;

impl DiagnosisRule for FailedScannerPodRule {
    fn code(&self) -> &'static str {
        codes::FAILED_SCANNER_POD
    }

    fn description(&self) -> &'static str {
        "Scanner pod failed"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scanner_pods()
            .filter(|(_, pod)| pod.phase == PodPhase::Failed)
            .map(|(_, pod)| {
                Issue::new(
                    self.code(),
                    IssueType::FailedPod,
                    self.default_severity(),
                    &pod.name,
                    format!(
                        "Scanner pod '{}' failed with reason: {}",
                        pod.name,
                        pod.reason.as_deref().unwrap_or("unknown")
                    ),
                    "Check pod logs for error details. The scanner may have encountered an error during scan execution.",
                )
            })
            .collect()
    }
}
