//! Scan details tool - one scan with its scanner pods and failure analysis

use log::warn;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;

use super::{ToolError, non_empty, scoped};
use crate::compliance::formatter::{ScanDetails, format_scan_details};
use crate::compliance::{CheckCounts, ClusterAccess, analyze_scan_failure};

pub(crate) const NAME: &str = "compliance_scan_details";

/// Arguments for the scan details tool
#[derive(Debug, Deserialize)]
pub struct ScanDetailsArgs {
    /// Name of the ComplianceScan
    pub scan_name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Also count the scan's check results by status
    #[serde(default)]
    pub include_check_results: bool,
}

/// Tool describing a single compliance scan
pub struct ScanDetailsTool<C> {
    client: C,
}

impl<C: ClusterAccess> ScanDetailsTool<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: ClusterAccess> Tool for ScanDetailsTool<C> {
    const NAME: &'static str = NAME;

    type Args = ScanDetailsArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get detailed information about a specific compliance scan".to_string(),
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
                    "include_check_results": {
                        "type": "boolean",
                        "description": "Include a summary of check results by status",
                        "default": false
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
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;

        let scan = client.get_scan(&args.scan_name).await?;
        let pods = client.list_scanner_pods(&scan.name).await?;

        // Counts are an optional extra; the scan itself is still worth showing.
        let counts = if args.include_check_results {
            match client.list_check_results(&scan.name, None).await {
                Ok(results) => Some(CheckCounts::from_results(&results)),
                Err(e) => {
                    warn!("failed to list check results for scan {}: {}", scan.name, e);
                    None
                }
            }
        } else {
            None
        };

        let failure = analyze_scan_failure(&scan);

        Ok(format_scan_details(&ScanDetails {
            scan: &scan,
            counts,
            pods: &pods,
            failure: &failure,
        }))
    }
}
