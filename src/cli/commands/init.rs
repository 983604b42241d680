//! Init command implementation
//!
//! Generates a starter configuration file.

use crate::config::ScourConfig;
use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "scour.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let content = toml::to_string_pretty(&ScourConfig::default())?;
        std::fs::write(&self.output, content)?;

        println!("✅ Configuration file created: {}", self.output);
        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Point pattern_library at a custom TOML to extend the built-in patterns");
        println!("  3. Run: scour clean --input <file-or-directory>");
        Ok(0)
    }
}
