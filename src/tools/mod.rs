//! Compliance tools using Rig's Tool trait
//!
//! Each tool reads compliance state through a [`ClusterAccess`] and returns
//! markdown. They are served over MCP by [`crate::server`] and can be run
//! one-off from the CLI.
//!
//! ## Available Tools
//!
//! ### Status
//! - `StatusOverviewTool` - Operator health, suites and summary totals
//! - `ScanDetailsTool` - One scan with counts, scanner pods and failure analysis
//! - `CheckResultsTool` - Check results of a scan, filtered by status or severity
//! - `RemediationsTool` - Remediations, optionally only those marked for apply
//!
//! ### Troubleshooting
//! - `LogsTool` - Operator or scanner pod logs with keyword analysis
//! - `DiagnoseTool` - Runs every diagnosis rule
//!
//! ## Error Handling Pattern
//!
//! All tools share [`ToolError`]. The registry turns malformed arguments into
//! `ToolError::InvalidArguments`; callers render any error with
//! [`format_tool_error`].

mod check_results;
mod diagnose;
pub mod error;
mod logs;
mod remediations;
mod scan_details;
mod status;

pub use check_results::{CheckResultsArgs, CheckResultsTool};
pub use diagnose::{DiagnoseArgs, DiagnoseTool};
pub use error::{ErrorCategory, ToolError, format_tool_error};
pub use logs::{LogsArgs, LogsTool, PodType};
pub use remediations::{RemediationsArgs, RemediationsTool};
pub use scan_details::{ScanDetailsArgs, ScanDetailsTool};
pub use status::{StatusOverviewArgs, StatusOverviewTool};

use crate::compliance::{ClusterAccess, DiagnosisConfig};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde_json::Value;

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// Client scoped to the requested namespace, or to the default one.
pub(crate) fn scoped<C: ClusterAccess>(
    tool: &str,
    client: &C,
    namespace: Option<&str>,
) -> Result<C, ToolError> {
    let namespace = match namespace.filter(|ns| !ns.is_empty()) {
        Some(ns) => ns,
        None => client.namespace(),
    };
    if namespace.len() > 63 || !NAMESPACE_RE.is_match(namespace) {
        return Err(ToolError::invalid(
            tool,
            format!("'{}' is not a valid namespace name", namespace),
        ));
    }
    Ok(client.in_namespace(namespace))
}

/// Treats a missing or empty string argument as absent.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Names of every tool, in listing order.
pub const TOOL_NAMES: [&str; 6] = [
    status::NAME,
    scan_details::NAME,
    check_results::NAME,
    remediations::NAME,
    logs::NAME,
    diagnose::NAME,
];

/// All compliance tools over one cluster connection.
pub struct ToolRegistry<C: ClusterAccess + Clone> {
    status: StatusOverviewTool<C>,
    scan_details: ScanDetailsTool<C>,
    check_results: CheckResultsTool<C>,
    remediations: RemediationsTool<C>,
    logs: LogsTool<C>,
    diagnose: DiagnoseTool<C>,
}

impl<C: ClusterAccess + Clone> ToolRegistry<C> {
    pub fn new(client: C, config: DiagnosisConfig) -> Self {
        Self {
            status: StatusOverviewTool::new(client.clone()),
            scan_details: ScanDetailsTool::new(client.clone()),
            check_results: CheckResultsTool::new(client.clone()),
            remediations: RemediationsTool::new(client.clone()),
            logs: LogsTool::new(client.clone(), config.log_line_cap),
            diagnose: DiagnoseTool::new(client, config),
        }
    }

    pub async fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            self.status.definition(String::new()).await,
            self.scan_details.definition(String::new()).await,
            self.check_results.definition(String::new()).await,
            self.remediations.definition(String::new()).await,
            self.logs.definition(String::new()).await,
            self.diagnose.definition(String::new()).await,
        ]
    }

    /// Run the named tool with JSON arguments. `null` counts as `{}`.
    pub async fn call(&self, name: &str, args: Value) -> Result<String, ToolError> {
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };
        debug!("calling tool {} with {}", name, args);

        match name {
            status::NAME => dispatch(&self.status, args).await,
            scan_details::NAME => dispatch(&self.scan_details, args).await,
            check_results::NAME => dispatch(&self.check_results, args).await,
            remediations::NAME => dispatch(&self.remediations, args).await,
            logs::NAME => dispatch(&self.logs, args).await,
            diagnose::NAME => dispatch(&self.diagnose, args).await,
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

async fn dispatch<T>(tool: &T, args: Value) -> Result<String, ToolError>
where
    T: Tool<Output = String, Error = ToolError>,
{
    let args: T::Args =
        serde_json::from_value(args).map_err(|e| ToolError::invalid(T::NAME, e.to_string()))?;
    tool.call(args).await
}
