//! Handler for the `serve` command.

use super::{ConnectOptions, connect};
use crate::config::Config;
use crate::error::CliError;
use crate::server::{McpServer, ServerConfig};
use crate::tools::ToolRegistry;
use log::info;

pub async fn handle_serve(
    options: ConnectOptions,
    host: Option<String>,
    port: Option<u16>,
    config: &Config,
) -> Result<(), CliError> {
    let server_config = ServerConfig::new()
        .host(host.unwrap_or_else(|| config.server.host.clone()))
        .port(port.unwrap_or(config.server.port));

    info!("Starting Compliance MCP Server...");
    info!("Namespace: {}", options.namespace);
    info!("Address: {}", server_config.addr());

    let client = connect(&options).await?;
    let registry = ToolRegistry::new(client, config.diagnosis.clone());

    McpServer::new(server_config, registry, options.namespace)
        .run()
        .await?;
    Ok(())
}
