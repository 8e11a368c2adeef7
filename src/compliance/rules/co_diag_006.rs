//! CO-DIAG-006: Scanner container in CrashLoopBackOff.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType};

/// Rule: a container is crash looping.
pub struct CrashLoopRule;

impl DiagnosisRule for CrashLoopRule {
    fn code(&self) -> &'static str {
        codes::CRASH_LOOP
    }

    fn description(&self) -> &'static str {
        "Scanner container is crash looping"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scanner_pods()
            .filter(|(_, pod)| {
                pod.containers
                    .iter()
                    .filter_map(|c| c.waiting.as_ref())
                    .any(|w| w.reason == "CrashLoopBackOff")
            })
            .map(|(_, pod)| {
                Issue::new(
                    self.code(),
                    IssueType::FailedPod,
                    self.default_severity(),
                    &pod.name,
                    format!("Pod '{}' is crash looping", pod.name),
                    "Check container logs for crash details. The scanner may be encountering a runtime error.",
                )
            })
            .collect()
    }
}
