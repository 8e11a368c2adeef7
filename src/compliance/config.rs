//! Thresholds for compliance diagnosis.

use serde::{Deserialize, Serialize};

/// Configuration for diagnosis rules and log analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// Minutes a scan may stay RUNNING before it counts as stuck (default: 30)
    pub running_timeout_minutes: i64,

    /// Minutes a scan may stay LAUNCHING before it counts as stuck (default: 10)
    pub launching_timeout_minutes: i64,

    /// Container restart count above which a scanner pod is flagged (default: 5)
    pub restart_threshold: i32,

    /// Maximum error and warning lines kept by log analysis (default: 20)
    pub log_line_cap: usize,

    /// Rules to skip (by rule code)
    pub ignore_rules: Vec<String>,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            running_timeout_minutes: 30,
            launching_timeout_minutes: 10,
            restart_threshold: 5,
            log_line_cap: 20,
            ignore_rules: Vec::new(),
        }
    }
}

impl DiagnosisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to ignore.
    pub fn ignore_rule(mut self, rule: impl Into<String>) -> Self {
        self.ignore_rules.push(rule.into());
        self
    }

    /// Check if a rule should be ignored.
    pub fn should_ignore_rule(&self, rule: &str) -> bool {
        self.ignore_rules.iter().any(|r| r == rule)
    }

    pub fn running_timeout(&self) -> chrono::Duration {
        minutes_saturating(self.running_timeout_minutes)
    }

    pub fn launching_timeout(&self) -> chrono::Duration {
        minutes_saturating(self.launching_timeout_minutes)
    }
}

/// Longest timeout accepted from configuration: one year.
pub const MAX_TIMEOUT_MINUTES: i64 = 365 * 24 * 60;

fn minutes_saturating(minutes: i64) -> chrono::Duration {
    chrono::Duration::try_minutes(minutes).unwrap_or(if minutes < 0 {
        chrono::Duration::MIN
    } else {
        chrono::Duration::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DiagnosisConfig = toml::from_str("restart_threshold = 8").unwrap();
        assert_eq!(config.restart_threshold, 8);
        assert_eq!(config.running_timeout_minutes, 30);
        assert_eq!(config.launching_timeout(), chrono::Duration::minutes(10));
    }

    #[test]
    fn test_out_of_range_timeout_saturates() {
        let config = DiagnosisConfig {
            running_timeout_minutes: 200_000_000_000_000,
            ..Default::default()
        };
        assert_eq!(config.running_timeout(), chrono::Duration::MAX);
    }

    #[test]
    fn test_ignore_rule() {
        let config = DiagnosisConfig::new().ignore_rule("CO-DIAG-008");
        assert!(config.should_ignore_rule("CO-DIAG-008"));
        assert!(!config.should_ignore_rule("CO-DIAG-001"));
    }
}
