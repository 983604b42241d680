//! Validate-config command implementation

use crate::config::ScourConfig;
use crate::detection::PatternRegistry;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("🔍 Validating configuration: {config_path}");

        let config = match ScourConfig::from_file(config_path) {
            Ok(config) => config,
            Err(error) => {
                println!("❌ {error:#}");
                return Ok(2);
            }
        };

        if let Err(error) = config.validate() {
            println!("❌ {error:#}");
            return Ok(2);
        }

        // Compile the pattern library the run would use, so regex errors
        // surface here instead of at clean time.
        let registry = match &config.pattern_library {
            Some(path) => PatternRegistry::from_file(path),
            None => PatternRegistry::builtin(),
        };
        match registry {
            Ok(registry) => {
                println!(
                    "✅ Configuration OK ({} compiled patterns, action: {})",
                    registry.all_patterns().len(),
                    config.action
                );
                Ok(0)
            }
            Err(error) => {
                println!("❌ {error:#}");
                Ok(2)
            }
        }
    }
}
