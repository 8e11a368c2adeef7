use crate::compliance::collector::{
    CheckCounts, ComplianceSnapshot, OperatorHealthStatus, SuiteData, count_by_result,
};
use crate::compliance::logs::PodLogs;
use crate::compliance::types::{
    CheckResult, CheckSeverity, CheckStatus, ComplianceScan, DiagnosisResult, Issue, PodView,
    Remediation,
};

// ============================================================================
// Icons
// ============================================================================

fn status_icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "✅",
        CheckStatus::Fail => "❌",
        CheckStatus::Manual => "⚠️",
        CheckStatus::Error => "🔴",
        CheckStatus::Info => "ℹ️",
    }
}

fn severity_badge(severity: CheckSeverity) -> &'static str {
    match severity {
        CheckSeverity::High => "🔴 HIGH",
        CheckSeverity::Medium => "🟠 MEDIUM",
        CheckSeverity::Low => "🟡 LOW",
        CheckSeverity::Unknown => "",
    }
}

fn check_icon(ok: bool) -> &'static str {
    if ok { "✅" } else { "❌" }
}

// ============================================================================
// Status
// ============================================================================

fn push_operator_health(output: &mut String, health: &OperatorHealthStatus) {
    output.push_str("## Operator Health\n\n");
    if health.is_healthy {
        output.push_str("✅ **Status:** Healthy\n");
    } else {
        output.push_str("❌ **Status:** Unhealthy\n");
    }
    output.push_str(&format!(
        "**Operator Pods:** {}\n",
        health.operator_pods.len()
    ));
    for pod in &health.operator_pods {
        output.push_str(&format!(
            "  - {}: {} {} (Restarts: {})\n",
            pod.name,
            pod.phase,
            check_icon(pod.ready),
            pod.restarts
        ));
    }
    if !health.issues.is_empty() {
        output.push_str("\n**Issues:**\n");
        for issue in &health.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }
}

/// Operator health, suites (optionally just one) and summary totals.
///
/// The caller is responsible for checking that `only_suite` exists.
pub fn format_status_overview(snapshot: &ComplianceSnapshot, only_suite: Option<&str>) -> String {
    let mut output = String::from("# Compliance Operator Status Overview\n\n");
    push_operator_health(&mut output, &snapshot.operator_status);

    output.push_str("\n## Compliance Suites\n\n");
    let suites: Vec<_> = snapshot
        .suites
        .iter()
        .filter(|suite| only_suite.is_none_or(|name| suite.name == name))
        .collect();

    if suites.is_empty() {
        output.push_str("No compliance suites found.\n");
    }
    for suite in suites {
        output.push_str(&format!("### {}\n\n", suite.name));
        output.push_str(&format!("**Phase:** {}\n", suite.phase));
        output.push_str(&format!("**Result:** {}\n", suite.result));
        if let Some(error) = &suite.error_message {
            output.push_str(&format!("**Error:** {}\n", error));
        }

        if !suite.scan_statuses.is_empty() {
            output.push_str(&format!("\n**Scans:** {}\n", suite.scan_statuses.len()));
            for (result, count) in count_by_result(suite.scan_statuses.iter().map(|s| s.result)) {
                output.push_str(&format!("  - {}: {}\n", result, count));
            }

            let counts =
                snapshot.counts_for_scans(suite.scan_statuses.iter().map(|s| s.name.as_str()));
            let automated = counts.pass + counts.fail;
            if automated > 0 {
                output.push_str(&format!(
                    "\n**Overall Compliance:** {:.1}% ({}/{} checks passed)\n",
                    counts.compliance_percentage(),
                    counts.pass,
                    automated
                ));
            }
        }
        output.push('\n');
    }

    let totals = snapshot.total_counts();
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- **Total Suites:** {}\n", snapshot.suites.len()));
    output.push_str(&format!("- **Total Scans:** {}\n", snapshot.scans.len()));
    output.push_str(&format!("- **Total Checks:** {}\n", totals.total));
    output.push_str(&format!("  - Passed: {} ✅\n", totals.pass));
    output.push_str(&format!("  - Failed: {} ❌\n", totals.fail));
    output.push_str(&format!("  - Manual: {} ⚠️\n", totals.manual));

    output
}

/// One suite read by [`Collector::collect_suite`], with its scans and the
/// operator's health.
///
/// [`Collector::collect_suite`]: crate::compliance::Collector::collect_suite
pub fn format_suite_status(data: &SuiteData, health: &OperatorHealthStatus) -> String {
    let suite = &data.suite;
    let mut output = format!("# Suite: {}\n\n", suite.name);
    output.push_str(&format!("**Phase:** {}\n", suite.phase));
    output.push_str(&format!("**Result:** {}\n", suite.result));
    if let Some(error) = &suite.error_message {
        output.push_str(&format!("**Error:** {}\n", error));
    }

    output.push_str(&format!("\n## Scans ({})\n\n", data.scans.len()));
    if data.scans.is_empty() {
        output.push_str("No scans found for this suite.\n");
    }
    for scan in &data.scans {
        output.push_str(&format!(
            "- **{}**: {} ({})",
            scan.name, scan.phase, scan.result
        ));
        match data.scan_counts(&scan.name) {
            Some(counts) if counts.pass + counts.fail > 0 => output.push_str(&format!(
                " - {:.1}% ({}/{} checks passed)\n",
                counts.compliance_percentage(),
                counts.pass,
                counts.pass + counts.fail
            )),
            Some(_) => output.push('\n'),
            None => output.push_str(" - check results unavailable\n"),
        }
    }

    let totals = data.total_counts();
    output.push_str("\n## Summary\n\n");
    output.push_str(&format!("- **Total Checks:** {}\n", totals.total));
    output.push_str(&format!("  - Passed: {} ✅\n", totals.pass));
    output.push_str(&format!("  - Failed: {} ❌\n", totals.fail));
    output.push_str(&format!("  - Manual: {} ⚠️\n", totals.manual));
    if totals.pass + totals.fail > 0 {
        output.push_str(&format!(
            "\n**Suite Compliance:** {:.1}%\n",
            totals.compliance_percentage()
        ));
    }

    output.push('\n');
    push_operator_health(&mut output, health);
    output
}

/// Inputs to [`format_scan_details`].
pub struct ScanDetails<'a> {
    pub scan: &'a ComplianceScan,
    pub counts: Option<CheckCounts>,
    pub pods: &'a [PodView],
    /// Output of single-scan failure analysis.
    pub failure: &'a [Issue],
}

pub fn format_scan_details(details: &ScanDetails<'_>) -> String {
    let scan = details.scan;
    let mut output = format!("# Scan: {}\n\n", scan.name);
    output.push_str(&format!("**Phase:** {}\n", scan.phase));
    output.push_str(&format!("**Result:** {}\n", scan.result));
    output.push_str(&format!("**Scan Type:** {}\n", scan.scan_type));
    output.push_str(&format!("**Profile:** {}\n", scan.profile));
    if let Some(suite) = &scan.suite {
        output.push_str(&format!("**Suite:** {}\n", suite));
    }
    if let Some(started) = scan.start_timestamp {
        output.push_str(&format!(
            "**Started:** {}\n",
            started.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    if let Some(error) = &scan.error_message {
        output.push_str(&format!("\n**Error:** {}\n", error));
    }
    if let Some(warnings) = &scan.warnings {
        output.push_str(&format!("\n**Warnings:** {}\n", warnings));
    }

    if let Some(counts) = &details.counts {
        output.push_str("\n## Check Results\n\n");
        output.push_str(&format!("- Total: {}\n", counts.total));
        output.push_str(&format!("- Pass: {} ✅\n", counts.pass));
        output.push_str(&format!("- Fail: {} ❌\n", counts.fail));
        output.push_str(&format!("- Manual: {} ⚠️\n", counts.manual));
        output.push_str(&format!("- Error: {} 🔴\n", counts.error));
        if counts.pass + counts.fail > 0 {
            output.push_str(&format!(
                "\n**Compliance:** {:.1}%\n",
                counts.compliance_percentage()
            ));
        }
    }

    if !details.pods.is_empty() {
        output.push_str(&format!("\n## Scanner Pods ({})\n\n", details.pods.len()));
        for pod in details.pods {
            output.push_str(&format!("- {} ({})\n", pod.name, pod.phase));
        }
    }

    if !details.failure.is_empty() {
        output.push_str("\n## Failure Analysis\n\n");
        for issue in details.failure {
            output.push_str(&format!(
                "- **{}** {}: {}\n  - Suggestion: {}\n",
                issue.severity(),
                issue.issue_type(),
                issue.description(),
                issue.suggestion()
            ));
        }
    }

    output
}

// ============================================================================
// Checks and remediations
// ============================================================================

/// Check results grouped by status, in [`CheckStatus::ALL`] order.
pub fn format_check_results(results: &[CheckResult]) -> String {
    let mut output = format!("# Check Results ({})\n\n", results.len());
    if results.is_empty() {
        output.push_str("No check results found.\n");
        return output;
    }

    let mut index = 0;
    for status in CheckStatus::ALL {
        let group: Vec<_> = results.iter().filter(|r| r.status == *status).collect();
        if group.is_empty() {
            continue;
        }
        output.push_str(&format!("## {} {} ({})\n\n", status_icon(*status), status, group.len()));

        for result in group {
            index += 1;
            let badge = severity_badge(result.severity);
            if badge.is_empty() {
                output.push_str(&format!("### {}. {}\n\n", index, result.name));
            } else {
                output.push_str(&format!("### {}. {} {}\n\n", index, result.name, badge));
            }
            if !result.description.is_empty() {
                output.push_str(&format!("**Description:** {}\n\n", result.description));
            }
            if result.status == CheckStatus::Fail && !result.instructions.is_empty() {
                output.push_str(&format!(
                    "**Remediation Instructions:**\n{}\n\n",
                    result.instructions
                ));
            }
        }
    }

    output
}

pub fn format_remediations(remediations: &[Remediation]) -> String {
    let mut output = format!("# Remediations ({})\n\n", remediations.len());
    if remediations.is_empty() {
        output.push_str("No remediations found.\n");
        return output;
    }

    let applied = remediations.iter().filter(|r| r.apply).count();
    output.push_str(&format!(
        "**Applied:** {} / {}\n\n",
        applied,
        remediations.len()
    ));

    for (i, remediation) in remediations.iter().enumerate() {
        output.push_str(&format!(
            "## {}. {} {}\n\n",
            i + 1,
            remediation.name,
            check_icon(remediation.apply)
        ));
        let state = if remediation.application_state.is_empty() {
            "Unknown"
        } else {
            remediation.application_state.as_str()
        };
        output.push_str(&format!("**Application State:** {}\n", state));
        if let Some(kind) = &remediation.remediation_type {
            output.push_str(&format!("**Type:** {}\n", kind));
        }
        output.push('\n');
    }

    output
}

// ============================================================================
// Diagnosis and logs
// ============================================================================

pub fn format_diagnosis(result: &DiagnosisResult) -> String {
    let mut output = String::from("# Compliance Operator Diagnosis\n\n");

    if result.is_clean() {
        output.push_str("✅ No critical issues detected.\n\n");
    }

    if !result.issues.is_empty() {
        output.push_str(&format!("## Critical Issues ({})\n\n", result.issues.len()));
        for (i, issue) in result.issues.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n", i + 1, issue.issue_type()));
            output.push_str(&format!("**Severity:** {}\n", issue.severity()));
            output.push_str(&format!("**Rule:** {}\n", issue.rule()));
            output.push_str(&format!("**Description:** {}\n", issue.description()));
            output.push_str(&format!(
                "**Affected Resources:** {}\n",
                issue.resources().join(", ")
            ));
            output.push_str(&format!("**Suggestion:** {}\n\n", issue.suggestion()));
        }
    }

    if !result.warnings.is_empty() {
        output.push_str(&format!("## Warnings ({})\n\n", result.warnings.len()));
        for (i, warning) in result.warnings.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n", i + 1, warning.description()));
            output.push_str(&format!(
                "**Affected Resources:** {}\n",
                warning.resources().join(", ")
            ));
            output.push_str(&format!("**Suggestion:** {}\n\n", warning.suggestion()));
        }
    }

    if !result.suggestions.is_empty() {
        output.push_str("## Suggestions\n\n");
        for suggestion in &result.suggestions {
            output.push_str(&format!("- {}\n", suggestion));
        }
    }

    output
}

/// Logs of several pods, with optional keyword analysis per pod.
pub fn format_pod_logs(pod_type: &str, entries: &[PodLogs]) -> String {
    let mut output = format!("# Logs: {}\n\n", pod_type);

    for entry in entries {
        output.push_str(&format!("## Pod: {}\n\n", entry.pod));

        let logs = match &entry.logs {
            Err(e) => {
                output.push_str(&format!("Error fetching logs: {}\n\n", e));
                continue;
            }
            Ok(logs) if logs.is_empty() => {
                output.push_str("No logs available.\n\n");
                continue;
            }
            Ok(logs) => logs,
        };

        if let Some(findings) = &entry.findings {
            if !findings.errors.is_empty() {
                output.push_str("### Errors Detected:\n");
                for line in &findings.errors {
                    output.push_str(&format!("- {}\n", line));
                }
                output.push('\n');
            }
            if !findings.warnings.is_empty() {
                output.push_str("### Warnings Detected:\n");
                for line in &findings.warnings {
                    output.push_str(&format!("- {}\n", line));
                }
                output.push('\n');
            }
            if findings.is_empty() {
                output.push_str("✅ No obvious errors or warnings detected in logs.\n\n");
            }
        }

        output.push_str("### Raw Logs:\n```\n");
        output.push_str(logs);
        output.push_str("\n```\n\n");
    }

    output
}
