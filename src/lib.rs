//! # Compliance Inspector
//!
//! Read-only status reporting and root-cause diagnosis for the Kubernetes
//! compliance operator.
//!
//! ## Features
//!
//! - **Status Snapshot**: Suites, scans, check results, remediations and operator health in one read
//! - **Diagnosis Rules**: Stuck scans, failed or crash-looping scanner pods, OOM kills, scheduling and permission problems
//! - **Log Analysis**: Operator and scanner logs with error and warning lines picked out
//! - **MCP Server**: Every capability exposed as a tool over JSON-RPC
//!
//! ## Example
//!
//! ```rust,no_run
//! use compliance_inspector::compliance::{Analyzer, ComplianceClient, DiagnosisConfig};
//! use compliance_inspector::compliance::formatter::format_diagnosis;
//!
//! # async fn run() -> compliance_inspector::Result<()> {
//! let client = ComplianceClient::new("openshift-compliance").await?;
//! let diagnosis = Analyzer::new(&client, DiagnosisConfig::default())
//!     .analyze_all()
//!     .await?;
//! println!("{}", format_diagnosis(&diagnosis));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compliance;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod tools;

pub use error::{ComplianceError, Result};
