//! Keyword scan of pod logs.

use serde::Serialize;
use std::collections::HashSet;

const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "failed",
    "fatal",
    "panic",
    "exception",
    "cannot",
    "unable to",
];

const WARNING_KEYWORDS: &[&str] = &["warning", "warn", "deprecated", "retry"];

/// Error and warning lines picked out of a log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogFindings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LogFindings {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Logs read from one pod, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodLogs {
    pub pod: String,
    /// Log text, or the error message if it could not be read.
    pub logs: Result<String, String>,
    /// Present when analysis was requested and the logs were read.
    pub findings: Option<LogFindings>,
}

/// Collects lines containing an error or warning keyword (case-insensitive).
///
/// A line can land in both lists. Duplicate lines are kept once, in first-seen
/// order, and each list is truncated to `cap` entries.
pub fn analyze_logs(text: &str, cap: usize) -> LogFindings {
    let mut findings = LogFindings::default();
    let mut seen_errors = HashSet::new();
    let mut seen_warnings = HashSet::new();

    for line in text.lines() {
        let lower = line.to_lowercase();

        if ERROR_KEYWORDS.iter().any(|k| lower.contains(k)) && seen_errors.insert(line) {
            findings.errors.push(line.to_string());
        }
        if WARNING_KEYWORDS.iter().any(|k| lower.contains(k)) && seen_warnings.insert(line) {
            findings.warnings.push(line.to_string());
        }
    }

    findings.errors.truncate(cap);
    findings.warnings.truncate(cap);
    findings
}
