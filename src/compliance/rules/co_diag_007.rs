//! CO-DIAG-007: Container OOM killed.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType};

/// Rule: a container's last termination was OOMKilled. One issue per container.
pub struct OomKilledRule;

impl DiagnosisRule for OomKilledRule {
    fn code(&self) -> &'static str {
        codes::OOM_KILLED
    }

    fn description(&self) -> &'static str {
        "Container was killed for exceeding its memory limit"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (_, pod) in view.scanner_pods() {
            for container in &pod.containers {
                let oom = container
                    .last_terminated
                    .as_ref()
                    .is_some_and(|t| t.reason == "OOMKilled");
                if !oom {
                    continue;
                }
                issues.push(Issue::new(
                    self.code(),
                    IssueType::OutOfMemory,
                    self.default_severity(),
                    &pod.name,
                    format!(
                        "Container '{}' in pod '{}' was killed due to out of memory",
                        container.name, pod.name
                    ),
                    "Increase memory limits for scanner pods in ScanSetting. The scan requires more memory than allocated.",
                ));
            }
        }

        issues
    }
}
