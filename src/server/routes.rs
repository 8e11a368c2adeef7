//! HTTP routes of the MCP server
//!
//! - `POST /mcp` - JSON-RPC 2.0 endpoint
//! - `GET /health` - liveness check
//! - `GET /` - human-readable info page

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST,
    JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, SERVER_NAME,
};
use super::ServerState;
use crate::compliance::ClusterAccess;
use crate::tools::{format_tool_error, ToolError};

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Info page listing the endpoints and tools.
pub async fn index<C>(State(state): State<Arc<ServerState<C>>>) -> Html<String>
where
    C: ClusterAccess + Clone + 'static,
{
    let mut tools = String::new();
    for def in state.registry.definitions().await {
        tools.push_str(&format!(
            "        <li><strong>{}</strong> - {}</li>\n",
            def.name, def.description
        ));
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{name}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .info {{ background: #f0f0f0; padding: 20px; border-radius: 5px; }}
        code {{ background: #e0e0e0; padding: 2px 6px; border-radius: 3px; }}
    </style>
</head>
<body>
    <h1>{name}</h1>
    <div class="info">
        <p><strong>Status:</strong> Running</p>
        <p><strong>Namespace:</strong> {namespace}</p>
        <p><strong>MCP Endpoint:</strong> <code>http://localhost:{port}/mcp</code></p>
        <p><strong>Health Check:</strong> <code>http://localhost:{port}/health</code></p>
    </div>
    <h2>Available Tools</h2>
    <ul>
{tools}    </ul>
</body>
</html>
"#,
        name = SERVER_NAME,
        namespace = state.namespace,
        port = state.port,
        tools = tools,
    ))
}

/// JSON-RPC endpoint. Notifications get `202 Accepted` with no body.
pub async fn mcp<C>(State(state): State<Arc<ServerState<C>>>, body: Bytes) -> Response
where
    C: ClusterAccess + Clone + 'static,
{
    match handle_message(&state, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Handles one JSON-RPC message. Returns `None` for notifications.
pub async fn handle_message<C>(state: &ServerState<C>, body: &[u8]) -> Option<JsonRpcResponse>
where
    C: ClusterAccess + Clone,
{
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejecting unparseable JSON-RPC body: {}", e);
            return Some(JsonRpcResponse::failure(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ));
        }
    };
    if request.jsonrpc != JSONRPC_VERSION {
        return Some(JsonRpcResponse::failure(
            id,
            INVALID_REQUEST,
            format!("Invalid request: unsupported jsonrpc version '{}'", request.jsonrpc),
        ));
    }

    if request.is_notification() {
        debug!(method = %request.method, "Received notification");
        return None;
    }

    let id = request.id.clone().unwrap_or(Value::Null);
    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result(request.params.as_ref())),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            let tools: Vec<Value> = state
                .registry
                .definitions()
                .await
                .into_iter()
                .map(|def| {
                    json!({
                        "name": def.name,
                        "description": def.description,
                        "inputSchema": def.parameters,
                    })
                })
                .collect();
            JsonRpcResponse::success(id, json!({ "tools": tools }))
        }
        "tools/call" => call_tool(state, id, request.params).await,
        other => JsonRpcResponse::failure(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", other),
        ),
    };

    Some(response)
}

fn initialize_result(params: Option<&Value>) -> Value {
    let version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);

    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn call_tool<C>(state: &ServerState<C>, id: Value, params: Option<Value>) -> JsonRpcResponse
where
    C: ClusterAccess + Clone,
{
    let params = match params.map(serde_json::from_value::<CallToolParams>) {
        Some(Ok(params)) => params,
        Some(Err(e)) => {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e));
        }
        None => {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Invalid params: missing params");
        }
    };

    let arguments = params.arguments.unwrap_or(Value::Null);
    match state.registry.call(&params.name, arguments).await {
        Ok(text) => {
            info!(tool = %params.name, "Tool call succeeded");
            JsonRpcResponse::success(id, tool_result(text, false))
        }
        Err(ToolError::UnknownTool(name)) => {
            JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Unknown tool: {}", name))
        }
        Err(e) => {
            warn!(tool = %params.name, error = %e, "Tool call failed");
            JsonRpcResponse::success(id, tool_result(format_tool_error(&params.name, &e), true))
        }
    }
}

fn tool_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}
