//! Check results tool - lists a scan's checks, filtered by status or severity

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;

use super::{ToolError, non_empty, scoped};
use crate::compliance::formatter::format_check_results;
use crate::compliance::{CheckSeverity, CheckStatus, ClusterAccess};

pub(crate) const NAME: &str = "compliance_check_results";

/// Arguments for the check results tool
#[derive(Debug, Deserialize)]
pub struct CheckResultsArgs {
    /// Name of the ComplianceScan whose results to list
    pub scan_name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    /// One of PASS, FAIL, MANUAL, ERROR, INFO
    #[serde(default)]
    pub status_filter: Option<String>,

    /// One of low, medium, high, unknown
    #[serde(default)]
    pub severity_filter: Option<String>,
}

/// Tool listing ComplianceCheckResults of a scan
pub struct CheckResultsTool<C> {
    client: C,
}

impl<C: ClusterAccess> CheckResultsTool<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

/// Status filters match the wire value, ignoring case.
fn parse_status_filter(value: Option<&str>) -> Result<Option<CheckStatus>, ToolError> {
    value
        .map(|v| {
            v.to_uppercase()
                .parse::<CheckStatus>()
                .map_err(|e| ToolError::invalid(NAME, format!("status_filter: {}", e)))
        })
        .transpose()
}

fn parse_severity_filter(value: Option<&str>) -> Result<Option<CheckSeverity>, ToolError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let severity = CheckSeverity::parse_lenient(value);
    // parse_lenient maps garbage to Unknown, so only accept it when asked for
    if severity == CheckSeverity::Unknown && !value.trim().eq_ignore_ascii_case("unknown") {
        return Err(ToolError::invalid(
            NAME,
            format!(
                "severity_filter: '{}' is not one of low, medium, high, unknown",
                value
            ),
        ));
    }
    Ok(Some(severity))
}

impl<C: ClusterAccess> Tool for CheckResultsTool<C> {
    const NAME: &'static str = NAME;

    type Args = CheckResultsArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        let statuses: Vec<&str> = CheckStatus::ALL.iter().map(|s| s.as_str()).collect();
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List check results for a scan with optional filtering".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "scan_name": {
                        "type": "string",
                        "description": "Name of the ComplianceScan"
                    },
                    "namespace": {
                        "type": "string",
                        "description": "Namespace where the compliance operator runs",
                        "default": self.client.namespace()
                    },
                    "status_filter": {
                        "type": "string",
                        "description": "Only return checks with this status",
                        "enum": statuses
                    },
                    "severity_filter": {
                        "type": "string",
                        "description": "Only return checks with this severity",
                        "enum": ["low", "medium", "high", "unknown"]
                    }
                },
                "required": ["scan_name"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        if args.scan_name.is_empty() {
            return Err(ToolError::invalid(NAME, "scan_name is required"));
        }
        let status = parse_status_filter(non_empty(&args.status_filter))?;
        let severity = parse_severity_filter(non_empty(&args.severity_filter))?;
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;

        let mut results = client.list_check_results(&args.scan_name, status).await?;
        if let Some(severity) = severity {
            results.retain(|r| r.severity == severity);
        }

        Ok(format_check_results(&results))
    }
}
