use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compliance-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and diagnose the Kubernetes compliance operator")]
#[command(long_about = "Reads ComplianceSuites, ComplianceScans, check results, remediations, pods and events from a cluster running the compliance operator. Serves status and diagnosis tools over MCP, or runs a single tool from the command line. Never modifies the cluster.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Namespace of the compliance operator
    #[arg(short, long, global = true, env = "COMPLIANCE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Kubeconfig context to use (defaults to the current context)
    #[arg(long, global = true, env = "KUBE_CONTEXT")]
    pub context: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the compliance tools over MCP (streamable HTTP)
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Run one tool and print its output
    Tool {
        /// Tool name, e.g. compliance_diagnose
        #[arg(value_name = "NAME")]
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, value_name = "JSON")]
        args: Option<String>,
    },

    /// List the available tool names
    Tools,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tool_subcommand() {
        let cli = Cli::parse_from([
            "compliance-mcp",
            "--namespace",
            "compliance",
            "tool",
            "compliance_logs",
            "--args",
            r#"{"pod_type":"operator"}"#,
        ]);
        assert_eq!(cli.namespace.as_deref(), Some("compliance"));
        match cli.command {
            Commands::Tool { name, args } => {
                assert_eq!(name, "compliance_logs");
                assert!(args.unwrap().contains("operator"));
            }
            _ => panic!("expected tool command"),
        }
    }
}
