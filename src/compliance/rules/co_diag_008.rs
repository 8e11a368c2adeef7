//! CO-DIAG-008: Container restarting repeatedly.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType};

/// Rule: a container's restart count is above the restart threshold.
pub struct HighRestartCountRule;

impl DiagnosisRule for HighRestartCountRule {
    fn code(&self) -> &'static str {
        codes::HIGH_RESTART_COUNT
    }

    fn description(&self) -> &'static str {
        "Container restart count is high"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Warning
    }

    fn check(&self, view: &ClusterView, config: &DiagnosisConfig) -> Vec<Issue> {
        view.scanner_pods()
            .flat_map(|(_, pod)| {
                pod.containers
                    .iter()
                    .filter(move |c| c.restart_count > config.restart_threshold)
                    .map(move |c| {
                        Issue::new(
                            self.code(),
                            IssueType::FailedPod,
                            self.default_severity(),
                            &pod.name,
                            format!(
                                "Container '{}' in pod '{}' has restarted {} times",
                                c.name, pod.name, c.restart_count
                            ),
                            "Investigate why the container is restarting. Check logs for errors.",
                        )
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ScanContext;
    use super::super::test_support::*;
    use super::*;
    use crate::compliance::analyzer::partition;
    use crate::compliance::types::{ContainerView, PodView};

    fn container(name: &str, restart_count: i32) -> ContainerView {
        ContainerView {
            name: name.to_string(),
            restart_count,
            ..Default::default()
        }
    }

    fn restarting_view() -> ClusterView {
        let pod = PodView {
            name: "ocp4-cis-api-checks-pod".to_string(),
            containers: vec![container("scanner", 6), container("log-collector", 5)],
            ..Default::default()
        };
        view(vec![ScanContext::new(scan("ocp4-cis")).with_pods(vec![pod])])
    }

    #[test]
    fn test_fires_only_above_threshold() {
        let issues = HighRestartCountRule.check(&restarting_view(), &DiagnosisConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), IssueSeverity::Warning);
        assert_eq!(issues[0].resources(), ["ocp4-cis-api-checks-pod".to_string()]);
        assert_eq!(
            issues[0].description(),
            "Container 'scanner' in pod 'ocp4-cis-api-checks-pod' has restarted 6 times"
        );
    }

    #[test]
    fn test_partitioned_as_warning() {
        let result = partition(
            HighRestartCountRule.check(&restarting_view(), &DiagnosisConfig::default()),
        );
        assert!(result.issues.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule(), codes::HIGH_RESTART_COUNT);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = DiagnosisConfig {
            restart_threshold: 4,
            ..Default::default()
        };
        assert_eq!(HighRestartCountRule.check(&restarting_view(), &config).len(), 2);
    }
}
