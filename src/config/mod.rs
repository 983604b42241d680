//! Configuration management
//!
//! Configuration loads from a TOML file (`scour.toml` by default), with
//! `SCOUR_*` environment variables overriding file values and CLI flags
//! overriding both.

use crate::redaction::RedactionAction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScourConfig {
    /// What to do with detected PII
    #[serde(default)]
    pub action: RedactionAction,

    /// Run the entity recognizer in addition to pattern detection
    #[serde(default)]
    pub use_entity_recognizer: bool,

    /// Delete embedded picture shapes from slide media
    #[serde(default)]
    pub remove_embedded_images: bool,

    /// Path to a pattern library TOML file overriding the built-in set
    pub pattern_library: Option<PathBuf>,

    /// Patterns below this confidence are skipped
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Audit trail configuration
    #[serde(default)]
    pub audit: AuditConfig,

    /// OCR capability configuration
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_confidence_threshold() -> f32 {
    0.7
}

impl Default for ScourConfig {
    fn default() -> Self {
        Self {
            action: RedactionAction::Mask,
            use_entity_recognizer: false,
            remove_embedded_images: false,
            pattern_library: None,
            confidence_threshold: default_confidence_threshold(),
            audit: AuditConfig::default(),
            ocr: OcrConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ScourConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from defaults;
    /// environment overrides apply either way
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            anyhow::bail!(
                "confidence_threshold must be within 0.0..=1.0, got {}",
                self.confidence_threshold
            );
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("SCOUR_ACTION") {
            self.action = val
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SCOUR_ACTION: {e}"))?;
        }

        if let Ok(val) = std::env::var("SCOUR_USE_ENTITY_RECOGNIZER") {
            self.use_entity_recognizer =
                val.parse().context("Invalid SCOUR_USE_ENTITY_RECOGNIZER value")?;
        }

        if let Ok(val) = std::env::var("SCOUR_REMOVE_EMBEDDED_IMAGES") {
            self.remove_embedded_images =
                val.parse().context("Invalid SCOUR_REMOVE_EMBEDDED_IMAGES value")?;
        }

        if let Ok(val) = std::env::var("SCOUR_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("SCOUR_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold =
                val.parse().context("Invalid SCOUR_CONFIDENCE_THRESHOLD value")?;
        }

        if let Ok(val) = std::env::var("SCOUR_AUDIT_ENABLED") {
            self.audit.enabled = val.parse().context("Invalid SCOUR_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("SCOUR_AUDIT_DIR") {
            self.audit.dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SCOUR_TESSERACT_PATH") {
            self.ocr.tesseract_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SCOUR_LOG_LEVEL") {
            self.logging.level = val;
        }

        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the audit trail
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Directory the trail artifacts are flushed into
    #[serde(default = "default_audit_dir")]
    pub dir: PathBuf,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_dir() -> PathBuf {
    PathBuf::from("./audit")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            dir: default_audit_dir(),
        }
    }
}

/// OCR capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path to the tesseract binary
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from("tesseract")
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional directory for a rotating log file alongside console output
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}
