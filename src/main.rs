// Scour - PII Detection & Redaction Engine
// Copyright (c) 2026 Scour Contributors
// Licensed under the MIT License

use clap::Parser;
use scour::cli::{Cli, Commands};
use scour::config::ScourConfig;
use scour::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ScourConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            process::exit(2);
        }
    };

    let _guard = match init_logging(&config.logging, cli.log_level.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "scour");

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &ScourConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Clean(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
