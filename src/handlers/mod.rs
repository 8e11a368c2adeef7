// Handler modules
pub mod serve;
pub mod tools;

pub use serve::handle_serve;
pub use tools::{handle_list_tools, handle_tool};

use crate::compliance::ComplianceClient;
use crate::config::Config;
use crate::error::Result;
use log::info;

/// Connection settings after merging flags, environment and config file.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub namespace: String,
    pub context: Option<String>,
}

impl ConnectOptions {
    /// `namespace` and `context` come from clap, which already folded in the
    /// environment; anything still unset falls back to the config file.
    pub fn resolve(namespace: Option<String>, context: Option<String>, config: &Config) -> Self {
        Self {
            namespace: namespace
                .filter(|ns| !ns.is_empty())
                .unwrap_or_else(|| config.cluster.namespace.clone()),
            context: context.or_else(|| config.cluster.context.clone()),
        }
    }
}

/// Build a cluster client for the resolved namespace and context.
pub async fn connect(options: &ConnectOptions) -> Result<ComplianceClient> {
    // Install rustls crypto provider (required for TLS connections to K8s API)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let client = match &options.context {
        Some(context) => ComplianceClient::with_context(context, &options.namespace).await?,
        None => ComplianceClient::new(&options.namespace).await?,
    };
    info!(
        "Connected to cluster (context: {}, namespace: {})",
        options.context.as_deref().unwrap_or("current"),
        options.namespace
    );
    Ok(client)
}
