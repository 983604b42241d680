//! Pattern library for PII detection

use crate::detection::models::PiiType;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// PII category label
    pub category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Pattern name from the library file
    pub name: String,
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub pii_type: PiiType,
    /// Confidence score
    pub confidence: f32,
}

/// Pattern library container
#[derive(Debug, serde::Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Pattern registry for PII detection
///
/// Compiled once at startup, then shared read-only across all detections.
/// Compilation failures are startup errors; a compiled pattern never fails
/// at match time.
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::new();

        for (name, def) in library.patterns {
            let pii_type = Self::parse_category(&def.category).with_context(|| {
                format!("Invalid category in pattern '{}': {}", name, def.category)
            })?;

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str)
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern_str}"))?;

                patterns.push(CompiledPattern {
                    name: name.clone(),
                    regex,
                    pii_type: pii_type.clone(),
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Create a registry with the built-in patterns
    pub fn builtin() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_type(&self, pii_type: &PiiType) -> Vec<&CompiledPattern> {
        self.patterns
            .iter()
            .filter(|p| &p.pii_type == pii_type)
            .collect()
    }

    /// Parse category string to PiiType
    fn parse_category(s: &str) -> Result<PiiType> {
        match s.to_uppercase().as_str() {
            "EMAIL" => Ok(PiiType::Email),
            "PHONE" => Ok(PiiType::Phone),
            "IP_ADDRESS" | "IP" => Ok(PiiType::IpAddress),
            "CREDIT_CARD" => Ok(PiiType::CreditCard),
            "SSN" | "SSN_US" => Ok(PiiType::Ssn),
            "AADHAAR" => Ok(PiiType::Aadhaar),
            "PAN" => Ok(PiiType::Pan),
            "URL" => Ok(PiiType::Url),
            "TITLED_NAME" | "NAME_WITH_TITLE" => Ok(PiiType::TitledName),
            "PERSON_NAME" | "FULL_NAME" | "PERSON" => Ok(PiiType::PersonName),
            "ORGANIZATION" | "ORG" => Ok(PiiType::Organization),
            "LOCATION" => Ok(PiiType::Location),
            "POSTAL_DISTRICT" | "DISTRICT" => Ok(PiiType::PostalDistrict),
            "POSTAL_CODE" | "PINCODE" => Ok(PiiType::PostalCode),
            _ => anyhow::bail!("Unknown PII category: {s}"),
        }
    }
}
