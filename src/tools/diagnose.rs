//! Diagnose tool - runs every diagnosis rule against the operator's scans

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;

use super::{ToolError, non_empty, scoped};
use crate::compliance::formatter::format_diagnosis;
use crate::compliance::{Analyzer, ClusterAccess, DiagnosisConfig};

pub(crate) const NAME: &str = "compliance_diagnose";

/// Arguments for the diagnose tool
#[derive(Debug, Default, Deserialize)]
pub struct DiagnoseArgs {
    #[serde(default)]
    pub namespace: Option<String>,

    /// Only diagnose the scans of this suite
    #[serde(default)]
    pub suite_name: Option<String>,
}

/// Tool detecting common compliance operator issues
pub struct DiagnoseTool<C> {
    client: C,
    config: DiagnosisConfig,
}

impl<C: ClusterAccess> DiagnoseTool<C> {
    pub fn new(client: C, config: DiagnosisConfig) -> Self {
        Self { client, config }
    }
}

impl<C: ClusterAccess> Tool for DiagnoseTool<C> {
    const NAME: &'static str = NAME;

    type Args = DiagnoseArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Auto-detect common compliance operator issues".to_string(),
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
                        "description": "Diagnose a specific ComplianceSuite"
                    }
                }
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;
        let analyzer = Analyzer::new(&client, self.config.clone());

        let result = match non_empty(&args.suite_name) {
            Some(suite) => analyzer.analyze_suite(suite).await?,
            None => analyzer.analyze_all().await?,
        };

        Ok(format_diagnosis(&result))
    }
}
