//! Logs tool - fetches operator or scanner pod logs and flags suspicious lines

use futures_util::future::join_all;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use super::{ToolError, non_empty, scoped};
use crate::compliance::formatter::format_pod_logs;
use crate::compliance::{ClusterAccess, PodLogs, analyze_logs};

pub(crate) const NAME: &str = "compliance_logs";

const DEFAULT_TAIL_LINES: i64 = 100;

/// Which pods to read logs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodType {
    Operator,
    Scanner,
}

impl PodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Scanner => "scanner",
        }
    }
}

impl fmt::Display for PodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodType {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Self::Operator),
            "scanner" => Ok(Self::Scanner),
            other => Err(ToolError::invalid(
                NAME,
                format!(
                    "invalid pod_type: {} (must be 'operator' or 'scanner')",
                    other
                ),
            )),
        }
    }
}

fn default_tail_lines() -> i64 {
    DEFAULT_TAIL_LINES
}

fn default_analyze() -> bool {
    true
}

/// Arguments for the logs tool
#[derive(Debug, Deserialize)]
pub struct LogsArgs {
    /// "operator" or "scanner"
    pub pod_type: String,

    /// Required for scanner pods
    #[serde(default)]
    pub scan_name: Option<String>,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default = "default_tail_lines")]
    pub tail_lines: i64,

    /// Pick out error and warning lines
    #[serde(default = "default_analyze")]
    pub analyze: bool,
}

/// Tool fetching and analyzing pod logs
pub struct LogsTool<C> {
    client: C,
    /// Maximum error or warning lines reported per pod
    line_cap: usize,
}

impl<C: ClusterAccess> LogsTool<C> {
    pub fn new(client: C, line_cap: usize) -> Self {
        Self { client, line_cap }
    }
}

impl<C: ClusterAccess> Tool for LogsTool<C> {
    const NAME: &'static str = NAME;

    type Args = LogsArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Fetch and analyze logs from operator and scanner pods".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "pod_type": {
                        "type": "string",
                        "description": "Type of pods to fetch logs from",
                        "enum": ["operator", "scanner"]
                    },
                    "scan_name": {
                        "type": "string",
                        "description": "Scan name, required when pod_type is scanner"
                    },
                    "namespace": {
                        "type": "string",
                        "description": "Namespace where the compliance operator runs",
                        "default": self.client.namespace()
                    },
                    "tail_lines": {
                        "type": "integer",
                        "description": "Number of lines to read from the end of each log",
                        "default": DEFAULT_TAIL_LINES
                    },
                    "analyze": {
                        "type": "boolean",
                        "description": "Analyze logs for errors and warnings",
                        "default": true
                    }
                },
                "required": ["pod_type"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let pod_type: PodType = args.pod_type.parse()?;
        if args.tail_lines <= 0 {
            return Err(ToolError::invalid(NAME, "tail_lines must be positive"));
        }
        let client = scoped(NAME, &self.client, non_empty(&args.namespace))?;

        let pods = match pod_type {
            PodType::Operator => {
                let pods = client.list_operator_pods().await?;
                if pods.is_empty() {
                    return Ok("No operator pods found".to_string());
                }
                pods
            }
            PodType::Scanner => {
                let scan = non_empty(&args.scan_name).ok_or_else(|| {
                    ToolError::invalid(NAME, "scan_name is required for scanner pod logs")
                })?;
                let pods = client.list_scanner_pods(scan).await?;
                if pods.is_empty() {
                    return Ok(format!("No scanner pods found for scan {}", scan));
                }
                pods
            }
        };

        let fetches = pods
            .iter()
            .map(|pod| client.pod_logs(&pod.name, args.tail_lines));
        let logs = join_all(fetches).await;

        let entries: Vec<PodLogs> = pods
            .iter()
            .zip(logs)
            .map(|(pod, result)| {
                let logs = result.map_err(|e| e.to_string());
                let findings = match (&logs, args.analyze) {
                    (Ok(text), true) => Some(analyze_logs(text, self.line_cap)),
                    _ => None,
                };
                PodLogs {
                    pod: pod.name.clone(),
                    logs,
                    findings,
                }
            })
            .collect();

        Ok(format_pod_logs(pod_type.as_str(), &entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_type_parse() {
        assert_eq!("scanner".parse::<PodType>().unwrap(), PodType::Scanner);
        let err = "worker".parse::<PodType>().unwrap_err();
        assert!(err.to_string().contains("invalid pod_type: worker"));
    }

    #[test]
    fn test_args_defaults() {
        let args: LogsArgs = serde_json::from_value(json!({"pod_type": "operator"})).unwrap();
        assert_eq!(args.tail_lines, 100);
        assert!(args.analyze);
        assert!(args.scan_name.is_none());
    }
}
