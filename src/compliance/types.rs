//! Core data types for compliance status and diagnosis.
//!
//! Enum values are closed: parsing a wire string that is not one of the known
//! values fails with [`UnknownValue`]. A missing or empty field takes the enum's
//! default, which mirrors what the operator reports before it first updates a
//! status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Wire enums
// ============================================================================

/// A wire string that is not a known value of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {type_name} value '{value}'")]
pub struct UnknownValue {
    pub type_name: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(UnknownValue {
                        type_name: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Lifecycle phase shared by suites and scans.
    ScanPhase, "phase" {
        Pending => "PENDING",
        Launching => "LAUNCHING",
        Running => "RUNNING",
        Aggregating => "AGGREGATING",
        Done => "DONE",
    }
}

wire_enum! {
    /// Outcome shared by suites and scans.
    ScanResult, "result" {
        NotAvailable => "NOT-AVAILABLE",
        Compliant => "COMPLIANT",
        NonCompliant => "NON-COMPLIANT",
        Error => "ERROR",
        Inconsistent => "INCONSISTENT",
        NotApplicable => "NOT-APPLICABLE",
    }
}

wire_enum! {
    /// Outcome of a single compliance check.
    CheckStatus, "check status" {
        Pass => "PASS",
        Fail => "FAIL",
        Manual => "MANUAL",
        Error => "ERROR",
        Info => "INFO",
    }
}

wire_enum! {
    /// What a scan evaluates.
    ScanType, "scan type" {
        Node => "Node",
        Platform => "Platform",
    }
}

impl Default for ScanPhase {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::NotAvailable
    }
}

impl Default for ScanType {
    fn default() -> Self {
        Self::Node
    }
}

/// Deserializes a wire enum, treating an absent or empty string as the default.
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownValue> + Default,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse().map_err(serde::de::Error::custom),
    }
}

/// Severity of a check result. Free-form on the wire, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSeverity {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl CheckSeverity {
    /// Parses a severity, mapping anything unrecognized to `Unknown`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Compliance resources
// ============================================================================

/// Status line of one scan as reported by its suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanStatusSummary {
    pub name: String,
    pub phase: ScanPhase,
    pub result: ScanResult,
}

/// A ComplianceSuite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSuite {
    pub name: String,
    pub phase: ScanPhase,
    pub result: ScanResult,
    pub error_message: Option<String>,
    pub auto_apply_remediations: bool,
    pub schedule: Option<String>,
    /// Child scans in the order the suite lists them.
    pub scan_statuses: Vec<ScanStatusSummary>,
}

/// A ComplianceScan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceScan {
    pub name: String,
    /// Owning suite, from the suite label.
    pub suite: Option<String>,
    pub scan_type: ScanType,
    pub profile: String,
    pub content: String,
    pub phase: ScanPhase,
    pub result: ScanResult,
    pub start_timestamp: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub warnings: Option<String>,
}

/// A ComplianceCheckResult.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub id: String,
    pub status: CheckStatus,
    pub severity: CheckSeverity,
    pub description: String,
    /// Manual fix instructions; only meaningful for failed checks.
    pub instructions: String,
    pub rationale: String,
}

/// A ComplianceRemediation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Remediation {
    pub name: String,
    /// Intent to apply, as set by the user or auto-apply.
    pub apply: bool,
    /// State reported by the operator (`Applied`, `NotApplied`, `Error`, ...).
    pub application_state: String,
    pub remediation_type: Option<String>,
}

impl Remediation {
    pub fn is_applied(&self) -> bool {
        self.application_state.eq_ignore_ascii_case("Applied")
    }
}

// ============================================================================
// Pods and events
// ============================================================================

/// Pod phase. Unlisted phases map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl PodPhase {
    pub fn parse(value: &str) -> Self {
        match value {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `status.conditions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PodConditionView {
    pub condition_type: String,
    /// "True", "False" or "Unknown".
    pub status: String,
    pub reason: Option<String>,
    pub message: Option<String>,
}

/// Reason and message of a waiting or terminated container state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerStateDetail {
    pub reason: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerView {
    pub name: String,
    pub restart_count: i32,
    pub waiting: Option<ContainerStateDetail>,
    pub last_terminated: Option<ContainerStateDetail>,
}

/// Operator or scanner pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PodView {
    pub name: String,
    pub phase: PodPhase,
    /// `status.reason`, set for evicted or failed pods.
    pub reason: Option<String>,
    pub conditions: Vec<PodConditionView>,
    pub containers: Vec<ContainerView>,
}

impl PodView {
    /// True when the `Ready` condition is present and `True`.
    pub fn is_ready(&self) -> bool {
        self.condition("Ready")
            .map(|c| c.status == "True")
            .unwrap_or(false)
    }

    pub fn condition(&self, condition_type: &str) -> Option<&PodConditionView> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }

    pub fn total_restarts(&self) -> i32 {
        self.containers.iter().map(|c| c.restart_count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EventType {
    #[default]
    Normal,
    Warning,
}

/// A core/v1 Event recorded against a compliance object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventView {
    pub involved_kind: String,
    pub involved_name: String,
    pub event_type: EventType,
    pub reason: String,
    pub message: String,
}

// ============================================================================
// Diagnosis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueType {
    StuckScan,
    FailedPod,
    Permission,
    ResourceConstraint,
    OutOfMemory,
    Misconfiguration,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StuckScan => "StuckScan",
            Self::FailedPod => "FailedPod",
            Self::Permission => "Permission",
            Self::ResourceConstraint => "ResourceConstraint",
            Self::OutOfMemory => "OutOfMemory",
            Self::Misconfiguration => "Misconfiguration",
        };
        f.write_str(name)
    }
}

/// Issue severity, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueSeverity {
    Critical,
    Warning,
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        };
        f.write_str(name)
    }
}

/// A diagnosed problem. Always names at least one affected resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    rule: &'static str,
    issue_type: IssueType,
    severity: IssueSeverity,
    description: String,
    resources: Vec<String>,
    suggestion: String,
}

impl Issue {
    pub fn new(
        rule: &'static str,
        issue_type: IssueType,
        severity: IssueSeverity,
        resource: impl Into<String>,
        description: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            issue_type,
            severity,
            description: description.into(),
            resources: vec![resource.into()],
            suggestion: suggestion.into(),
        }
    }

    /// Adds another affected resource.
    pub fn also_affects(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Code of the rule that produced this issue.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    pub fn severity(&self) -> IssueSeverity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

/// Output of a diagnosis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosisResult {
    /// Critical issues.
    pub issues: Vec<Issue>,
    /// Warning and info issues.
    pub warnings: Vec<Issue>,
    pub suggestions: Vec<String>,
}

impl DiagnosisResult {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_round_trips_wire_names() {
        for phase in ScanPhase::ALL {
            assert_eq!(phase.as_str().parse::<ScanPhase>().unwrap(), *phase);
        }
    }

    #[test]
    fn test_unknown_result_is_rejected() {
        let err = "MAYBE".parse::<ScanResult>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized result value 'MAYBE'");
        assert!("non-compliant".parse::<ScanResult>().is_err());
        assert_eq!(
            "NON-COMPLIANT".parse::<ScanResult>().unwrap(),
            ScanResult::NonCompliant
        );
    }

    #[test]
    fn test_check_status_serializes_to_wire() {
        let json = serde_json::to_string(&CheckStatus::Manual).unwrap();
        assert_eq!(json, "\"MANUAL\"");
        let parsed: CheckStatus = serde_json::from_str("\"FAIL\"").unwrap();
        assert_eq!(parsed, CheckStatus::Fail);
        assert!(serde_json::from_str::<CheckStatus>("\"SKIPPED\"").is_err());
    }

    #[test]
    fn test_severity_is_case_insensitive() {
        assert_eq!(CheckSeverity::parse_lenient("HIGH"), CheckSeverity::High);
        assert_eq!(CheckSeverity::parse_lenient(" Medium "), CheckSeverity::Medium);
        assert_eq!(CheckSeverity::parse_lenient("critical"), CheckSeverity::Unknown);
        assert_eq!(CheckSeverity::parse_lenient(""), CheckSeverity::Unknown);
    }

    #[test]
    fn test_pod_readiness_requires_true_ready_condition() {
        let mut pod = PodView {
            name: "compliance-operator-abc".to_string(),
            phase: PodPhase::Running,
            ..Default::default()
        };
        assert!(!pod.is_ready());

        pod.conditions.push(PodConditionView {
            condition_type: "Ready".to_string(),
            status: "False".to_string(),
            ..Default::default()
        });
        assert!(!pod.is_ready());

        pod.conditions[0].status = "True".to_string();
        assert!(pod.is_ready());
    }

    #[test]
    fn test_issue_keeps_resources_in_order() {
        let issue = Issue::new(
            "CO-DIAG-010",
            IssueType::Permission,
            IssueSeverity::Critical,
            "scan-a",
            "denied",
            "check RBAC",
        )
        .also_affects("pod-a");
        assert_eq!(issue.resources(), ["scan-a".to_string(), "pod-a".to_string()]);
        assert_eq!(issue.rule(), "CO-DIAG-010");
    }
}
