//! Typed label and field queries.
//!
//! Every selector sent to the API server is built from a known resource kind, a
//! known label key and a validated value. Values that would change the meaning of
//! the selector (commas, `=`, `!`, whitespace, over-long strings) are rejected
//! before any request is made.

use crate::error::{ComplianceError, Result};
use kube::api::ListParams;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a Kubernetes label value.
const MAX_LABEL_VALUE_LEN: usize = 63;

/// Maximum length of a Kubernetes object name (DNS subdomain).
const MAX_OBJECT_NAME_LEN: usize = 253;

static LABEL_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$").unwrap());

static OBJECT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9.]*[a-z0-9])?$").unwrap());

/// API group of the compliance operator's custom resources.
pub const COMPLIANCE_GROUP: &str = "compliance.openshift.io";

/// API version of the compliance operator's custom resources.
pub const COMPLIANCE_VERSION: &str = "v1alpha1";

/// Resource kinds read by the accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Suite,
    Scan,
    CheckResult,
    Remediation,
    Pod,
    Event,
}

impl ResourceKind {
    /// Kubernetes `kind` as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Suite => "ComplianceSuite",
            Self::Scan => "ComplianceScan",
            Self::CheckResult => "ComplianceCheckResult",
            Self::Remediation => "ComplianceRemediation",
            Self::Pod => "Pod",
            Self::Event => "Event",
        }
    }

    /// Plural resource name used in API paths.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Suite => "compliancesuites",
            Self::Scan => "compliancescans",
            Self::CheckResult => "compliancecheckresults",
            Self::Remediation => "complianceremediations",
            Self::Pod => "pods",
            Self::Event => "events",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Label keys the compliance operator stamps on the objects it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKey {
    /// Suite that owns a scan.
    Suite,
    /// Scan that owns a check result, remediation or scanner pod.
    ScanName,
    /// Check status mirrored onto check results.
    CheckStatus,
    /// Workload role of a pod (`scanner`, ...).
    Workload,
    /// Application name of the operator deployment.
    Name,
}

impl LabelKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suite => "compliance.openshift.io/suite",
            Self::ScanName => "compliance.openshift.io/scan-name",
            Self::CheckStatus => "compliance.openshift.io/check-status",
            Self::Workload => "workload",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality-based label query over one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelQuery {
    kind: ResourceKind,
    requirements: Vec<(LabelKey, String)>,
}

impl LabelQuery {
    /// An empty query (matches everything) over `kind`.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            requirements: Vec::new(),
        }
    }

    /// Objects of `kind` owned by the named scan.
    pub fn owned_by_scan(kind: ResourceKind, scan_name: &str) -> Result<Self> {
        Self::new(kind).eq(LabelKey::ScanName, scan_name)
    }

    /// Scans owned by the named suite.
    pub fn scans_of_suite(suite_name: &str) -> Result<Self> {
        Self::new(ResourceKind::Scan).eq(LabelKey::Suite, suite_name)
    }

    /// Scanner pods created for the named scan.
    pub fn scanner_pods(scan_name: &str) -> Result<Self> {
        Self::owned_by_scan(ResourceKind::Pod, scan_name)?.eq(LabelKey::Workload, "scanner")
    }

    /// Pods of the compliance operator deployment.
    pub fn operator_pods() -> Self {
        Self {
            kind: ResourceKind::Pod,
            requirements: vec![(LabelKey::Name, "compliance-operator".to_string())],
        }
    }

    /// Adds a `key=value` requirement after validating `value`.
    pub fn eq(mut self, key: LabelKey, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_label_value(self.kind, &value)?;
        self.requirements.push((key, value));
        Ok(self)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Value required for `key`, if any.
    pub fn value_of(&self, key: LabelKey) -> Option<&str> {
        self.requirements
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Selector string in API server syntax.
    pub fn selector(&self) -> String {
        self.requirements
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn list_params(&self) -> ListParams {
        if self.is_empty() {
            ListParams::default()
        } else {
            ListParams::default().labels(&self.selector())
        }
    }
}

/// Field query selecting the events recorded against one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    involved_kind: ResourceKind,
    involved_name: String,
}

impl EventQuery {
    pub fn for_object(involved_kind: ResourceKind, involved_name: &str) -> Result<Self> {
        validate_object_name(ResourceKind::Event, involved_name)?;
        Ok(Self {
            involved_kind,
            involved_name: involved_name.to_string(),
        })
    }

    pub fn involved_kind(&self) -> ResourceKind {
        self.involved_kind
    }

    pub fn involved_name(&self) -> &str {
        &self.involved_name
    }

    pub fn field_selector(&self) -> String {
        format!(
            "involvedObject.kind={},involvedObject.name={}",
            self.involved_kind.kind(),
            self.involved_name
        )
    }

    pub fn list_params(&self) -> ListParams {
        ListParams::default().fields(&self.field_selector())
    }
}

fn validate_label_value(kind: ResourceKind, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        Some("must not be empty".to_string())
    } else if value.len() > MAX_LABEL_VALUE_LEN {
        Some(format!("longer than {} characters", MAX_LABEL_VALUE_LEN))
    } else if !LABEL_VALUE_RE.is_match(value) {
        Some("must be alphanumeric, '-', '_' or '.', starting and ending alphanumeric".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ComplianceError::InvalidQuery {
            kind,
            field: "label value".to_string(),
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validates a DNS-subdomain object name.
pub(crate) fn validate_object_name(kind: ResourceKind, name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty".to_string())
    } else if name.len() > MAX_OBJECT_NAME_LEN {
        Some(format!("longer than {} characters", MAX_OBJECT_NAME_LEN))
    } else if !OBJECT_NAME_RE.is_match(name) {
        Some("must be lowercase alphanumeric, '-' or '.'".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ComplianceError::InvalidQuery {
            kind,
            field: "object name".to_string(),
            value: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
