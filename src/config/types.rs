use serde::{Deserialize, Serialize};

use crate::compliance::DiagnosisConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub server: ServerSection,
    pub diagnosis: DiagnosisConfig,
}

/// Which cluster and namespace to inspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Namespace of the compliance operator
    pub namespace: String,
    /// Kubeconfig context; the current context when unset
    pub context: Option<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            namespace: "openshift-compliance".to_string(),
            context: None,
        }
    }
}

/// Where the MCP server listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8350,
        }
    }
}
