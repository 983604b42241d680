//! Entity recognizer capability
//!
//! Named-entity recognition is an optional, injected capability. The engine
//! works pattern-only when no recognizer is configured, and degrades to
//! pattern-only when a configured recognizer fails.

use crate::detection::models::PiiType;
use anyhow::Result;

/// A named-entity span reported by a recognizer
///
/// Offsets are byte indices into the text passed to
/// [`EntityRecognizer::recognize`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecognizedEntity {
    /// Coarse category label (e.g. PERSON, ORG, GPE)
    pub label: String,
    /// The entity text
    pub text: String,
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

/// Trait for entity-recognition capabilities
///
/// Implementations must be safe for concurrent read-only use; the engine
/// shares one recognizer across all file workers.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize named entities in `text`
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedEntity>>;
}

/// Map a recognizer category label onto the PII type set
///
/// PERSON, ORG and GPE/LOC fold into the closed variants; anything else is
/// carried through as [`PiiType::Other`].
pub fn map_entity_label(label: &str) -> PiiType {
    match label.to_uppercase().as_str() {
        "PERSON" | "PER" => PiiType::PersonName,
        "ORG" | "ORGANIZATION" => PiiType::Organization,
        "GPE" | "LOC" | "LOCATION" => PiiType::Location,
        other => PiiType::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(map_entity_label("PERSON"), PiiType::PersonName);
        assert_eq!(map_entity_label("org"), PiiType::Organization);
        assert_eq!(map_entity_label("GPE"), PiiType::Location);
        assert_eq!(map_entity_label("LOC"), PiiType::Location);
        assert_eq!(
            map_entity_label("NORP"),
            PiiType::Other("NORP".to_string())
        );
    }
}
