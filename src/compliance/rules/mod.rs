//! Diagnosis rules for compliance operator state.
//!
//! Each rule is implemented as a separate module with a consistent interface.
//! Rules are identified by codes like CO-DIAG-001, CO-DIAG-002, etc. A rule
//! only looks at the [`ClusterView`] it is given; it never talks to the cluster.

mod co_diag_001;
mod co_diag_002;
mod co_diag_003;
mod co_diag_004;
mod co_diag_005;
mod co_diag_006;
mod co_diag_007;
mod co_diag_008;
mod co_diag_009;
mod co_diag_010;

use super::config::DiagnosisConfig;
use super::types::{ComplianceScan, EventView, Issue, IssueSeverity, PodView};
use chrono::{DateTime, Duration, Utc};

// ============================================================================
// Rule Trait
// ============================================================================

/// Trait for diagnosis rules.
pub trait DiagnosisRule: Send + Sync {
    /// Get the rule code (e.g., "CO-DIAG-001").
    fn code(&self) -> &'static str;

    /// Get the rule description.
    fn description(&self) -> &'static str;

    /// Get the severity of the issues this rule raises.
    fn default_severity(&self) -> IssueSeverity;

    /// Inspect the view and return every issue found.
    fn check(&self, view: &ClusterView, config: &DiagnosisConfig) -> Vec<Issue>;
}

/// One scan with the pods and events read for it.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub scan: ComplianceScan,
    /// Scanner pods, or `None` when they could not be listed.
    pub pods: Option<Vec<PodView>>,
    /// Events on the scan, or `None` when they could not be listed.
    pub events: Option<Vec<EventView>>,
}

impl ScanContext {
    pub fn new(scan: ComplianceScan) -> Self {
        Self {
            scan,
            pods: None,
            events: None,
        }
    }

    pub fn with_pods(mut self, pods: Vec<PodView>) -> Self {
        self.pods = Some(pods);
        self
    }

    pub fn with_events(mut self, events: Vec<EventView>) -> Self {
        self.events = Some(events);
        self
    }
}

/// Input to every rule: the scans under diagnosis and the time of the read.
#[derive(Debug, Clone)]
pub struct ClusterView {
    pub now: DateTime<Utc>,
    pub scans: Vec<ScanContext>,
}

impl ClusterView {
    pub fn new(now: DateTime<Utc>, scans: Vec<ScanContext>) -> Self {
        Self { now, scans }
    }

    pub fn scans(&self) -> impl Iterator<Item = &ComplianceScan> {
        self.scans.iter().map(|ctx| &ctx.scan)
    }

    /// Every scanner pod, with the scan it belongs to.
    pub fn scanner_pods(&self) -> impl Iterator<Item = (&ComplianceScan, &PodView)> {
        self.scans.iter().flat_map(|ctx| {
            ctx.pods
                .iter()
                .flatten()
                .map(move |pod| (&ctx.scan, pod))
        })
    }

    /// Every event recorded on a scan, with that scan.
    pub fn scan_events(&self) -> impl Iterator<Item = (&ComplianceScan, &EventView)> {
        self.scans.iter().flat_map(|ctx| {
            ctx.events
                .iter()
                .flatten()
                .map(move |event| (&ctx.scan, event))
        })
    }

    /// Time since `scan` started, if it has a start timestamp.
    pub fn elapsed_since_start(&self, scan: &ComplianceScan) -> Option<Duration> {
        scan.start_timestamp.map(|start| self.now - start)
    }
}

// ============================================================================
// Rule Codes
// ============================================================================

/// Rule code constants.
pub mod codes {
    pub const STUCK_RUNNING_SCAN: &str = "CO-DIAG-001";
    pub const STUCK_LAUNCHING_SCAN: &str = "CO-DIAG-002";
    pub const SCAN_ERROR_RESULT: &str = "CO-DIAG-003";
    pub const FAILED_SCANNER_POD: &str = "CO-DIAG-004";
    pub const IMAGE_PULL_FAILURE: &str = "CO-DIAG-005";
    pub const CRASH_LOOP: &str = "CO-DIAG-006";
    pub const OOM_KILLED: &str = "CO-DIAG-007";
    pub const HIGH_RESTART_COUNT: &str = "CO-DIAG-008";
    pub const SCHEDULING_CONSTRAINT: &str = "CO-DIAG-009";
    pub const PERMISSION_DENIED: &str = "CO-DIAG-010";

    // Raised by single-scan failure analysis, not by registered rules.
    pub const SCAN_FAILED: &str = "CO-SCAN-001";
    pub const SCAN_NON_COMPLIANT: &str = "CO-SCAN-002";
}

// ============================================================================
// Rule Registry
// ============================================================================

/// Get all available diagnosis rules, in evaluation order.
pub fn all_rules() -> Vec<Box<dyn DiagnosisRule>> {
    vec![
        Box::new(co_diag_001::StuckRunningScanRule),
        Box::new(co_diag_002::StuckLaunchingScanRule),
        Box::new(co_diag_003::ScanErrorResultRule),
        Box::new(co_diag_004::FailedScannerPodRule),
        Box::new(co_diag_005::ImagePullFailureRule),
        Box::new(co_diag_006::CrashLoopRule),
        Box::new(co_diag_007::OomKilledRule),
        Box::new(co_diag_008::HighRestartCountRule),
        Box::new(co_diag_009::SchedulingConstraintRule),
        Box::new(co_diag_010::PermissionDeniedRule),
    ]
}

/// Get rule description by code.
pub fn rule_description(code: &str) -> &'static str {
    all_rules()
        .iter()
        .find(|rule| rule.code() == code)
        .map(|rule| rule.description())
        .unwrap_or("Unknown rule")
}

/// Run every registered rule that is not ignored.
pub fn run_rules(view: &ClusterView, config: &DiagnosisConfig) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in all_rules() {
        if config.should_ignore_rule(rule.code()) {
            continue;
        }
        issues.extend(rule.check(view, config));
    }

    issues
}

/// Renders a duration rounded to the minute, e.g. `45m` or `1h5m`.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let minutes = (elapsed.num_seconds() + 30).div_euclid(60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}h{}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

// Re-export rule implementations for direct access
pub use co_diag_001::StuckRunningScanRule;
pub use co_diag_002::StuckLaunchingScanRule;
pub use co_diag_003::ScanErrorResultRule;
pub use co_diag_004::FailedScannerPodRule;
pub use co_diag_005::ImagePullFailureRule;
pub use co_diag_006::CrashLoopRule;
pub use co_diag_007::OomKilledRule;
pub use co_diag_008::HighRestartCountRule;
pub use co_diag_009::SchedulingConstraintRule;
pub use co_diag_010::PermissionDeniedRule;
