use crate::compliance::query::ResourceKind;
use thiserror::Error;

/// Errors raised while reading compliance state from the cluster.
///
/// Nothing here is retried. A failed read is reported to the caller with the
/// operation and resource name attached, and the caller decides what to do.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    NotFound {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },

    #[error("failed to {operation}: {source}")]
    Transport {
        operation: String,
        #[source]
        source: kube::Error,
    },

    #[error("invalid {kind} '{name}': {reason}")]
    InvalidResource {
        kind: ResourceKind,
        name: String,
        reason: String,
    },

    #[error("invalid {field} '{value}' in query for {kind}: {reason}")]
    InvalidQuery {
        kind: ResourceKind,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to infer Kubernetes config: {0}")]
    ConfigInference(#[from] kube::config::InferConfigError),

    #[error("Failed to read kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Failed to create Kubernetes client: {0}")]
    ClientCreation(#[source] kube::Error),
}

impl ComplianceError {
    pub(crate) fn transport(operation: impl Into<String>, source: kube::Error) -> Self {
        Self::Transport {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn not_found(kind: ResourceKind, name: &str, namespace: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// True when the named resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the command-line handlers.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error(transparent)]
    Tool(#[from] crate::tools::ToolError),

    #[error("unknown tool '{0}' (run `compliance-mcp tools` to list them)")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidArgs(String),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
