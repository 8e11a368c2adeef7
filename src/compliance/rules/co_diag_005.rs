//! CO-DIAG-005: Scanner image cannot be pulled.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType};

const IMAGE_PULL_REASONS: &[&str] = &["ImagePullBackOff", "ErrImagePull"];

/// Rule: a container is waiting on an image pull.
pub struct ImagePullFailureRule;

impl DiagnosisRule for ImagePullFailureRule {
    fn code(&self) -> &'static str {
        codes::IMAGE_PULL_FAILURE
    }

    fn description(&self) -> &'static str {
        "Scanner pod cannot pull its image"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scanner_pods()
            .filter_map(|(_, pod)| {
                // first matching container only; one issue per pod
                let waiting = pod
                    .containers
                    .iter()
                    .filter_map(|c| c.waiting.as_ref())
                    .find(|w| IMAGE_PULL_REASONS.contains(&w.reason.as_str()))?;
                Some(Issue::new(
                    self.code(),
                    IssueType::FailedPod,
                    self.default_severity(),
                    &pod.name,
                    format!(
                        "Pod '{}' cannot pull image: {}",
                        pod.name,
                        waiting.message.as_deref().unwrap_or(&waiting.reason)
                    ),
                    "Verify image name and registry credentials. Check network connectivity to image registry.",
                ))
            })
            .collect()
    }
}
