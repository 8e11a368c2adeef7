//! Markdown rendering of compliance status and diagnosis.
//!
//! Every function here is pure: it takes data already read from the cluster
//! and returns a string.

mod markdown;

pub use markdown::{
    ScanDetails, format_check_results, format_diagnosis, format_pod_logs, format_remediations,
    format_scan_details, format_status_overview, format_suite_status,
};
