//! CO-DIAG-010: Permission errors reported in scan events.

use super::{ClusterView, DiagnosisRule, codes};
use crate::compliance::config::DiagnosisConfig;
use crate::compliance::types::{EventType, Issue, IssueSeverity, IssueType};

/// Substrings that mark an event message as a permission failure. Case-sensitive.
const PERMISSION_KEYWORDS: &[&str] = &[
    "Forbidden",
    "Unauthorized",
    "denied",
    "insufficient permissions",
    "cannot create",
    "cannot get",
    "cannot list",
];

/// Rule: warning event on a scan mentions a permission failure.
pub struct PermissionDeniedRule;

impl PermissionDeniedRule {
    /// First keyword found in `message`, in list order.
    pub fn matching_keyword(message: &str) -> Option<&'static str> {
        PERMISSION_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| message.contains(keyword))
    }
}

impl DiagnosisRule for PermissionDeniedRule {
    fn code(&self) -> &'static str {
        codes::PERMISSION_DENIED
    }

    fn description(&self) -> &'static str {
        "Scan events report a permission failure"
    }

    fn default_severity(&self) -> IssueSeverity {
        IssueSeverity::Critical
    }

    fn check(&self, view: &ClusterView, _config: &DiagnosisConfig) -> Vec<Issue> {
        view.scan_events()
            .filter(|(_, event)| event.event_type == EventType::Warning)
            .filter(|(_, event)| Self::matching_keyword(&event.message).is_some())
            .map(|(scan, event)| {
                Issue::new(
                    self.code(),
                    IssueType::Permission,
                    self.default_severity(),
                    &scan.name,
                    format!("Permission issue in scan '{}': {}", scan.name, event.message),
                    "Check ServiceAccount permissions and RBAC configuration. The compliance operator may not have sufficient permissions.",
                )
                .also_affects(&event.involved_name)
            })
            .collect()
    }
}
