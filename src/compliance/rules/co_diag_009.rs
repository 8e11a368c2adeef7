//! CO-DIAG-009: Scanner pod cannot be scheduled for lack of resources.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType, PodPhase};

/// Rule: pending pod whose PodScheduled=False condition mentions "Insufficient".
pub struct SchedulingConstraintRule;

impl DiagnosisRule for SchedulingConstraintRule {
    fn code(&self) -> &'static str {
        codes::SCHEDULING_CONSTRAINT
    }

    fn description(&self) -> &'static str {
        "Scanner pod cannot be scheduled due to insufficient resources"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scanner_pods()
            .filter(|(_, pod)| pod.phase == PodPhase::Pending)
            .filter_map(|(_, pod)| {
                let condition = pod.condition("PodScheduled").filter(|c| c.status == "False")?;
                let mentions = |text: &Option<String>| {
                    text.as_deref().is_some_and(|t| t.contains("Insufficient"))
                };
                if !mentions(&condition.reason) && !mentions(&condition.message) {
                    return None;
                }
                Some(Issue::new(
                    self.code(),
                    IssueType::ResourceConstraint,
                    self.default_severity(),
                    &pod.name,
                    format!(
                        "Pod '{}' cannot be scheduled: {}",
                        pod.name,
                        condition.message.as_deref().unwrap_or_default()
                    ),
                    "Increase cluster resources or reduce scanner pod resource requests in ScanSetting.",
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::ScanContext;
    use super::super::test_support::*;
    use super::*;
    use crate::compliance::types::{PodConditionView, PodView};

    fn pending(reason: &str, message: &str) -> PodView {
        PodView {
            name: "ocp4-cis-node-worker-pod".to_string(),
            phase: PodPhase::Pending,
            conditions: vec![PodConditionView {
                condition_type: "PodScheduled".to_string(),
                status: "False".to_string(),
                reason: Some(reason.to_string()),
                message: Some(message.to_string()),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_insufficient_resources() {
        let ctx = ScanContext::new(scan("ocp4-cis-node-worker"))
            .with_pods(vec![pending("Unschedulable", "0/3 nodes are available: 3 Insufficient memory.")]);
        let issues = SchedulingConstraintRule.check(&view(vec![ctx]), &DiagnosisConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type(), IssueType::ResourceConstraint);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let ctx = ScanContext::new(scan("ocp4-cis-node-worker"))
            .with_pods(vec![pending("Unschedulable", "insufficient memory")]);
        let issues = SchedulingConstraintRule.check(&view(vec![ctx]), &DiagnosisConfig::default());
        assert!(issues.is_empty());
    }
}
