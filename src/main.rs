use anyhow::Context;
use clap::Parser;
use compliance_inspector::{
    cli::{Cli, Commands},
    config,
    handlers::{self, ConnectOptions},
};
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let config = config::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let options = ConnectOptions::resolve(cli.namespace.clone(), cli.context.clone(), &config);

    match cli.command {
        Commands::Serve { host, port } => {
            handlers::handle_serve(options, host, port, &config).await?
        }
        Commands::Tool { name, args } => {
            handlers::handle_tool(options, &name, args.as_deref(), &config).await?
        }
        Commands::Tools => handlers::handle_list_tools(),
    }

    Ok(())
}
