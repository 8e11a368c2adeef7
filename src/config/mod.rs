pub mod types;

use crate::compliance::config::MAX_TIMEOUT_MINUTES;
use crate::error::ConfigError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub use types::{ClusterConfig, Config, ServerSection};

const CONFIG_FILE_NAME: &str = ".compliance-mcp.toml";

/// Get the global config file path (~/.compliance-mcp.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Load configuration from `path`, or from the global file, or use defaults.
///
/// An explicit path must exist. The global file is optional, but once found
/// it must parse.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => match global_config_path().filter(|p| p.exists()) {
            Some(global) => read_config(&global)?,
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };
    validate(&config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.cluster.namespace.is_empty() {
        return Err(ConfigError::Invalid("cluster.namespace must not be empty".into()));
    }
    let diagnosis = &config.diagnosis;
    if diagnosis.running_timeout_minutes <= 0 || diagnosis.launching_timeout_minutes <= 0 {
        return Err(ConfigError::Invalid(
            "diagnosis timeouts must be positive".into(),
        ));
    }
    if diagnosis.running_timeout_minutes > MAX_TIMEOUT_MINUTES
        || diagnosis.launching_timeout_minutes > MAX_TIMEOUT_MINUTES
    {
        return Err(ConfigError::Invalid(format!(
            "diagnosis timeouts must not exceed {} minutes",
            MAX_TIMEOUT_MINUTES
        )));
    }
    if diagnosis.restart_threshold < 0 {
        return Err(ConfigError::Invalid(
            "diagnosis.restart_threshold must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cluster.namespace, "openshift-compliance");
        assert_eq!(config.server.port, 8350);
        assert_eq!(config.diagnosis.running_timeout_minutes, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(
            r#"
[cluster]
context = "prod"

[diagnosis]
launching_timeout_minutes = 15
ignore_rules = ["CO-DIAG-008"]
"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.cluster.context.as_deref(), Some("prod"));
        assert_eq!(config.cluster.namespace, "openshift-compliance");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.diagnosis.launching_timeout_minutes, 15);
        assert!(config.diagnosis.should_ignore_rule("CO-DIAG-008"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some(Path::new("/nonexistent/compliance.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let file = write_config("[server]\nport = \"eighty\"\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = write_config("[diagnosis]\nrunning_timeout_minutes = 0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_timeout_beyond_one_year() {
        let file = write_config("[diagnosis]\nrunning_timeout_minutes = 200000000000000\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("must not exceed 525600 minutes"));

        let file = write_config("[diagnosis]\nlaunching_timeout_minutes = 525601\n");
        assert!(matches!(
            load_config(Some(file.path())).unwrap_err(),
            ConfigError::Invalid(_)
        ));

        let file = write_config("[diagnosis]\nrunning_timeout_minutes = 525600\n");
        assert!(load_config(Some(file.path())).is_ok());
    }
}
