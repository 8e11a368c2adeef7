use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("compliance-mcp").unwrap();
    cmd.env_remove("COMPLIANCE_NAMESPACE")
        .env_remove("KUBE_CONTEXT")
        .env_remove("PORT");
    cmd
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("tool"));
}

#[test]
fn test_tools_lists_names() {
    let config = tempfile::NamedTempFile::new().unwrap();
    cmd()
        .args(["--config", config.path().to_str().unwrap(), "tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compliance_status_overview"))
        .stdout(predicate::str::contains("compliance_diagnose"));
}

#[test]
fn test_unknown_tool_fails_before_connecting() {
    let config = tempfile::NamedTempFile::new().unwrap();
    cmd()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "tool",
            "compliance_apply",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'compliance_apply'"));
}

#[test]
fn test_malformed_config_is_reported() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    config.write_all(b"[server]\nport = \"eighty\"\n").unwrap();
    cmd()
        .args(["--config", config.path().to_str().unwrap(), "tools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
