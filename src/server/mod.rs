//! MCP server
//!
//! Serves the compliance tools over MCP's streamable HTTP transport, in its
//! plain request/response form: every JSON-RPC request posted to `/mcp` gets
//! one JSON response, and no event stream is opened.
//!
//! # Usage
//!
//! ```rust,ignore
//! use compliance_inspector::server::{McpServer, ServerConfig};
//!
//! let config = ServerConfig::default().port(8350);
//! let server = McpServer::new(config, registry, "openshift-compliance");
//! server.run().await?;
//! ```

pub mod protocol;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::compliance::ClusterAccess;
use crate::tools::ToolRegistry;

/// Configuration for the MCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host address to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8350,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// State shared by all routes.
pub struct ServerState<C: ClusterAccess + Clone> {
    pub registry: ToolRegistry<C>,
    /// Default namespace, shown on the info page.
    pub namespace: String,
    pub port: u16,
}

/// Router with every endpoint mounted.
pub fn router<C>(state: Arc<ServerState<C>>) -> Router
where
    C: ClusterAccess + Clone + 'static,
{
    Router::new()
        .route("/", get(routes::index::<C>))
        .route("/health", get(routes::health))
        .route("/mcp", post(routes::mcp::<C>))
        .with_state(state)
}

pub struct McpServer<C: ClusterAccess + Clone> {
    config: ServerConfig,
    state: Arc<ServerState<C>>,
}

impl<C> McpServer<C>
where
    C: ClusterAccess + Clone + 'static,
{
    pub fn new(config: ServerConfig, registry: ToolRegistry<C>, namespace: impl Into<String>) -> Self {
        let state = ServerState {
            registry,
            namespace: namespace.into(),
            port: config.port,
        };
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;

        info!("Compliance MCP server listening on http://{}", addr);
        info!("MCP endpoint available at http://{}/mcp", addr);
        info!("Health check available at http://{}/health", addr);

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }

    pub fn addr(&self) -> String {
        self.config.addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
