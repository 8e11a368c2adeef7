//! Compliance operator inspection.
//!
//! Reads ComplianceSuites, ComplianceScans, check results, remediations,
//! operator/scanner pods and events, then either collects them into a
//! status snapshot or runs diagnosis rules over them.
//!
//! # Example
//!
//! ```rust,ignore
//! use compliance_inspector::compliance::{Analyzer, Collector, ComplianceClient, DiagnosisConfig};
//!
//! let client = ComplianceClient::new("openshift-compliance").await?;
//! let snapshot = Collector::new(&client).collect_all().await?;
//! let diagnosis = Analyzer::new(&client, DiagnosisConfig::default()).analyze_all().await?;
//! ```

pub mod analyzer;
pub mod client;
pub mod collector;
pub mod config;
pub mod formatter;
pub mod logs;
pub mod query;
pub mod rules;
pub mod types;

pub use analyzer::{Analyzer, NO_ISSUES_SUGGESTION, analyze_scan_failure, partition};
pub use client::{ClusterAccess, ComplianceClient, LOG_BUFFER_BYTES};
pub use collector::{
    CheckCounts, Collector, ComplianceSnapshot, OperatorHealthStatus, PodStatus, SuiteData,
    count_by_result, operator_health_from_pods,
};
pub use config::DiagnosisConfig;
pub use logs::{LogFindings, PodLogs, analyze_logs};
pub use query::{EventQuery, LabelKey, LabelQuery, ResourceKind};
pub use rules::{ClusterView, DiagnosisRule, ScanContext, all_rules};
pub use types::{
    CheckResult, CheckSeverity, CheckStatus, ComplianceScan, ComplianceSuite, ContainerStateDetail,
    ContainerView, DiagnosisResult, EventType, EventView, Issue, IssueSeverity, IssueType,
    PodConditionView, PodPhase, PodView, Remediation, ScanPhase, ScanResult, ScanStatusSummary,
    ScanType, UnknownValue,
};
