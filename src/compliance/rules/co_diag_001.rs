//! CO-DIAG-001: Scan stuck in RUNNING.

use super::{ClusterView, DiagnosisRule, codes, format_elapsed};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType, ScanPhase};

/// Rule: scan has been RUNNING longer than the running timeout.
pub struct StuckRunningScanRule;

impl DiagnosisRule for StuckRunningScanRule {
    fn code(&self) -> &'static str {
        codes::STUCK_RUNNING_SCAN
    }

    fn description(&self) -> &'static str {
        "Scan has been running longer than expected"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, config: &DiagnosisConfig) -> Vec<Issue> {
        view.scans()
            .filter(|scan| scan.phase == ScanPhase::Running)
            .filter_map(|scan| {
                let elapsed = view.elapsed_since_start(scan)?;
                (elapsed > config.running_timeout()).then(|| {
                    Issue::new(
                        self.code(),
                        IssueType::StuckScan,
                        self.default_severity(),
                        &scan.name,
                        format!(
                            "Scan '{}' has been in RUNNING phase for {}",
                            scan.name,
                            format_elapsed(elapsed)
                        ),
                        "Check scanner pod logs and events. The scan may be stuck due to pod failures, resource constraints, or permission issues.",
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
    use chrono::Duration;

    fn running_for(minutes: Option<i64>) -> ClusterView {
        let mut s = scan("ocp4-cis");
        s.phase = ScanPhase::Running;
        s.start_timestamp = minutes.map(|m| now() - Duration::minutes(m));
        view(vec![ScanContext::new(s)])
    }

    #[test]
    fn test_fires_after_thirty_minutes() {
        let issues = StuckRunningScanRule.check(&running_for(Some(31)), &DiagnosisConfig::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type(), IssueType::StuckScan);
        assert_eq!(issues[0].severity(), IssueSeverity::Critical);
        assert_eq!(issues[0].resources(), ["ocp4-cis".to_string()]);
        assert!(issues[0].description().contains("31m"));
    }

    #[test]
    fn test_quiet_before_threshold() {
        let issues = StuckRunningScanRule.check(&running_for(Some(29)), &DiagnosisConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_quiet_without_start_timestamp() {
        let issues = StuckRunningScanRule.check(&running_for(None), &DiagnosisConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let config = DiagnosisConfig {
            running_timeout_minutes: 60,
            ..Default::default()
        };
        assert!(StuckRunningScanRule.check(&running_for(Some(45)), &config).is_empty());
    }

    #[test]
    fn test_out_of_range_threshold_never_fires() {
        let config = DiagnosisConfig {
            running_timeout_minutes: 200_000_000_000_000,
            ..Default::default()
        };
        assert!(StuckRunningScanRule.check(&running_for(Some(45)), &config).is_empty());
    }
}
