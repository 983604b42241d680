//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for scour using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Scour - PII detection and redaction for heterogeneous documents
#[derive(Parser, Debug)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(author = "Scour Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "scour.toml", env = "SCOUR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SCOUR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan documents for PII and mask or remove each occurrence
    Clean(commands::clean::CleanArgs),

    /// Validate configuration file and pattern library
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
