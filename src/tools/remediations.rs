//! Remediations tool - lists ComplianceRemediations

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;

use super::{ToolError, non_empty, scoped};
use crate::compliance::ClusterAccess;
use crate::compliance::formatter::format_remediations;

pub(crate) const NAME: &str = "compliance_remediations";

/// Arguments for the remediations tool
#[derive(Debug, Default, Deserialize)]
pub struct RemediationsArgs {
    /// Only remediations generated by this scan
    #[serde(default)]
    pub scan_name: Option<String>,

    #[serde(default)]
    pub namespace: Option<String>,

    /// Only remediations marked to be applied
    #[serde(default)]
    pub applied_only: bool,
}

/// Tool listing remediations for failed checks
pub struct RemediationsTool<C> {
    client: C,
}

impl<C: ClusterAccess> RemediationsTool<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: ClusterAccess> Tool for RemediationsTool<C> {
    const NAME: &'static str = NAME;

    type Args = RemediationsArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get available remediations for failed checks".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "scan_name": {
                        "type": "string",
                        "description": "Filter by the ComplianceScan that produced the remediation"
                    },
                    "namespace": {
                        "type": "string",
                        "description": "Namespace where the compliance operator runs",
                        "default": self.client.namespace()
                    },
                    "applied_only": {
                        "type": "boolean",
                        "description": "Only show remediations marked to be applied",
                        "default": false
                    }
                }
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;

        let mut remediations = client
            .list_remediations(non_empty(&args.scan_name))
            .await?;
        if args.applied_only {
            remediations.retain(|r| r.apply);
        }

        Ok(format_remediations(&remediations))
    }
}
