//! Handlers for the `tool` and `tools` commands.

use super::{ConnectOptions, connect};
use crate::config::Config;
use crate::error::CliError;
use crate::tools::{TOOL_NAMES, ToolRegistry};
use serde_json::Value;

/// Run one tool against the cluster and print its markdown.
pub async fn handle_tool(
    options: ConnectOptions,
    name: &str,
    args: Option<&str>,
    config: &Config,
) -> Result<(), CliError> {
    if !TOOL_NAMES.contains(&name) {
        return Err(CliError::UnknownTool(name.to_string()));
    }
    let args = parse_args(args)?;

    let client = connect(&options).await?;
    let registry = ToolRegistry::new(client, config.diagnosis.clone());

    let output = registry.call(name, args).await?;
    println!("{}", output);
    Ok(())
}

pub fn handle_list_tools() {
    for name in TOOL_NAMES {
        println!("{}", name);
    }
}

fn parse_args(args: Option<&str>) -> Result<Value, CliError> {
    match args {
        None => Ok(Value::Null),
        Some(raw) => {
            let value: Value = serde_json::from_str(raw)
                .map_err(|e| CliError::InvalidArgs(format!("--args is not valid JSON: {}", e)))?;
            if !value.is_object() {
                return Err(CliError::InvalidArgs("--args must be a JSON object".into()));
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(None).unwrap(), Value::Null);
        let value = parse_args(Some(r#"{"scan_name": "ocp4-cis"}"#)).unwrap();
        assert_eq!(value["scan_name"], "ocp4-cis");
        assert!(parse_args(Some("[1, 2]")).is_err());
        assert!(parse_args(Some("{oops")).is_err());
    }
}
