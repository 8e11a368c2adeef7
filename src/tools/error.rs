//! Errors returned by the compliance tools.
//!
//! A failed tool call is still a successful request: the error is rendered by
//! [`format_tool_error`] into a JSON document the caller can read, and the
//! transport marks the result as an error.

use crate::error::ComplianceError;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Error categories for tool failures.
///
/// These tell the caller what went wrong and whether retrying with different
/// arguments can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Named resource does not exist
    NotFound,
    /// Arguments were missing or malformed
    ValidationFailed,
    /// The cluster could not be reached or refused the request
    ClusterUnavailable,
    /// A resource was returned in a shape that could not be read
    InvalidResource,
    /// Client setup or other internal failure
    InternalError,
}

impl ErrorCategory {
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "The requested resource was not found",
            Self::ValidationFailed => "Input validation failed",
            Self::ClusterUnavailable => "The Kubernetes API request failed",
            Self::InvalidResource => "A cluster resource could not be parsed",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Returns whether the caller can fix this by changing the request
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound | Self::ValidationFailed)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::ClusterUnavailable => "CLUSTER_UNAVAILABLE",
            Self::InvalidResource => "INVALID_RESOURCE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Self::NotFound => &[
                "Check the resource name and namespace",
                "Use compliance_status_overview to list suites and scans",
            ],
            Self::ValidationFailed => &["Check the tool's input schema with tools/list"],
            Self::ClusterUnavailable => &[
                "Verify the kubeconfig context and cluster connectivity",
                "Check that the service account may read compliance.openshift.io resources",
            ],
            Self::InvalidResource => &["Check the compliance operator version"],
            Self::InternalError => &[],
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error type shared by all compliance tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}

impl ToolError {
    pub(crate) fn invalid(tool: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArguments { .. } | Self::UnknownTool(_) => ErrorCategory::ValidationFailed,
            Self::Compliance(e) => match e {
                ComplianceError::NotFound { .. } => ErrorCategory::NotFound,
                ComplianceError::InvalidQuery { .. } => ErrorCategory::ValidationFailed,
                ComplianceError::Transport { .. } => ErrorCategory::ClusterUnavailable,
                ComplianceError::InvalidResource { .. } => ErrorCategory::InvalidResource,
                ComplianceError::ConfigInference(_)
                | ComplianceError::Kubeconfig(_)
                | ComplianceError::ClientCreation(_) => ErrorCategory::InternalError,
            },
        }
    }
}

/// Render a tool error as a JSON document.
pub fn format_tool_error(tool_name: &str, error: &ToolError) -> String {
    let category = error.category();
    let mut error_obj = json!({
        "error": true,
        "tool": tool_name,
        "category": category,
        "code": category.code(),
        "description": category.description(),
        "message": error.to_string(),
        "recoverable": category.is_recoverable(),
    });

    let suggestions = category.suggestions();
    if !suggestions.is_empty() {
        error_obj["suggestions"] = json!(suggestions);
    }

    serde_json::to_string_pretty(&error_obj).unwrap_or_else(|_| format!("Error: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::ResourceKind;

    #[test]
    fn test_not_found_is_recoverable() {
        let err = ToolError::from(ComplianceError::NotFound {
            kind: ResourceKind::Scan,
            name: "ocp4-cis".to_string(),
            namespace: "openshift-compliance".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.category().is_recoverable());
    }

    #[test]
    fn test_format_tool_error() {
        let err = ToolError::invalid("compliance_logs", "scan_name is required for scanner pod logs");
        let json_str = format_tool_error("compliance_logs", &err);

        let parsed: serde_json::Value = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed["error"], true);
        assert_eq!(parsed["tool"], "compliance_logs");
        assert_eq!(parsed["code"], "VALIDATION_FAILED");
        assert_eq!(parsed["recoverable"], true);
        assert!(parsed["message"]
            .as_str()
            .unwrap()
            .contains("scan_name is required"));
        assert!(parsed["suggestions"].is_array());
    }
}
