//! Status overview tool - operator health, suites and summary totals

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;

use super::{ToolError, non_empty, scoped};
use crate::compliance::formatter::{format_status_overview, format_suite_status};
use crate::compliance::{ClusterAccess, Collector};

pub(crate) const NAME: &str = "compliance_status_overview";

/// Arguments for the status overview tool
#[derive(Debug, Default, Deserialize)]
pub struct StatusOverviewArgs {
    /// Namespace of the compliance operator (defaults to the configured one)
    #[serde(default)]
    pub namespace: Option<String>,

    /// Only show this suite
    #[serde(default)]
    pub suite_name: Option<String>,
}

/// Tool reporting overall compliance operator health and suite status
pub struct StatusOverviewTool<C> {
    client: C,
}

impl<C: ClusterAccess> StatusOverviewTool<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: ClusterAccess> Tool for StatusOverviewTool<C> {
    const NAME: &'static str = NAME;

    type Args = StatusOverviewArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get overall compliance operator health and suite status".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "namespace": {
                        "type": "string",
                        "description": "Namespace where the compliance operator runs",
                        "default": self.client.namespace()
                    },
                    "suite_name": {
                        "type": "string",
                        "description": "Filter by a specific ComplianceSuite name"
                    }
                }
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;
        let collector = Collector::new(&client);

        match non_empty(&args.suite_name) {
            Some(name) => {
                let data = collector.collect_suite(name).await?;
                let health = collector.operator_health().await?;
                Ok(format_suite_status(&data, &health))
            }
            None => {
                let snapshot = collector.collect_all().await?;
                Ok(format_status_overview(&snapshot, None))
            }
        }
    }
}
