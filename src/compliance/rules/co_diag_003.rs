//! CO-DIAG-003: Scan finished with an ERROR result.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{Issue, IssueSeverity, IssueType, ScanResult};

/// Rule: scan result is ERROR.
pub struct ScanErrorResultRule;

impl DiagnosisRule for ScanErrorResultRule {
    fn code(&self) -> &'static str {
        codes::SCAN_ERROR_RESULT
    }

    fn description(&self) -> &'static str {
        "Scan completed with an error result"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scans()
            .filter(|scan| scan.result == ScanResult::Error)
            .map(|scan| {
                let description = match &scan.error_message {
                    Some(message) => format!(
                        "Scan '{}' completed with ERROR result: {}",
                        scan.name, message
                    ),
                    None => format!("Scan '{}' completed with ERROR result", scan.name),
                };
                Issue::new(
                    self.code(),
                    IssueType::FailedPod,
                    self.default_severity(),
                    &scan.name,
                    description,
                    "Review scan logs and error message. Common causes include missing content, invalid profiles, or scanner pod failures.",
                )
            })
            .collect()
    }
}
