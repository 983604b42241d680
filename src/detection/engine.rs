//! Detection engine
//!
//! Runs the pattern library and, when enabled, the entity recognizer over one
//! text unit and merges both outputs into a single deterministically ordered
//! candidate list.

use crate::detection::models::{DetectorSource, Span};
use crate::detection::patterns::PatternRegistry;
use crate::detection::recognizer::{map_entity_label, EntityRecognizer};
use anyhow::Result;
use std::sync::Arc;

/// PII detection engine
///
/// Holds the shared read-only pattern registry and the optional entity
/// recognizer. Detection is a pure function of the input text and the
/// recognizer flag; the engine keeps no per-call state and is safe to share
/// across file workers.
pub struct DetectionEngine {
    registry: Arc<PatternRegistry>,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    confidence_threshold: f32,
}

impl DetectionEngine {
    /// Create an engine with the built-in pattern library
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: Arc::new(PatternRegistry::builtin()?),
            recognizer: None,
            confidence_threshold: 0.7,
        })
    }

    /// Create an engine with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            recognizer: None,
            confidence_threshold: 0.7,
        }
    }

    /// Attach an entity-recognition capability
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Set the confidence threshold below which patterns are skipped
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Whether an entity recognizer is attached
    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Detect candidate PII spans in `text`
    ///
    /// Every library pattern runs left-to-right, non-overlapping, over the
    /// full text. When `use_entity_recognizer` is set and a recognizer is
    /// attached, its entities are merged in as a second source; a recognizer
    /// failure is non-fatal and degrades detection to pattern-only.
    ///
    /// The returned candidates are sorted by start offset ascending, ties
    /// broken by source (pattern before recognizer) and then by PII type
    /// declaration order, so the output is deterministic for a given input.
    pub fn detect(&self, text: &str, use_entity_recognizer: bool) -> Vec<Span> {
        let mut candidates = Vec::new();

        for pattern in self.registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold {
                continue;
            }

            for m in pattern.regex.find_iter(text) {
                match Span::new(
                    pattern.pii_type.clone(),
                    DetectorSource::Pattern,
                    text,
                    m.start(),
                    m.end(),
                ) {
                    Ok(span) => candidates.push(span),
                    // Patterns matching empty strings are a library defect;
                    // skip the degenerate span rather than corrupting a plan.
                    Err(error) => {
                        tracing::warn!(pattern = %pattern.name, %error, "Discarding degenerate match");
                    }
                }
            }
        }

        if use_entity_recognizer {
            if let Some(ref recognizer) = self.recognizer {
                match recognizer.recognize(text) {
                    Ok(entities) => {
                        for entity in entities {
                            match Span::new(
                                map_entity_label(&entity.label),
                                DetectorSource::EntityRecognizer,
                                text,
                                entity.start,
                                entity.end,
                            ) {
                                Ok(span) => candidates.push(span),
                                Err(error) => {
                                    tracing::warn!(
                                        label = %entity.label,
                                        %error,
                                        "Discarding entity span with invalid offsets"
                                    );
                                }
                            }
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Entity recognizer failed, continuing pattern-only");
                    }
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.source.rank().cmp(&b.source.rank()))
                .then(a.pii_type.rank().cmp(&b.pii_type.rank()))
        });

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::PiiType;
    use crate::detection::recognizer::RecognizedEntity;

    struct StubRecognizer {
        entities: Vec<RecognizedEntity>,
    }

    impl EntityRecognizer for StubRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>> {
            Ok(self.entities.clone())
        }
    }

    struct FailingRecognizer;

    impl EntityRecognizer for FailingRecognizer {
        fn recognize(&self, _text: &str) -> Result<Vec<RecognizedEntity>> {
            anyhow::bail!("model not loaded")
        }
    }

    #[test]
    fn test_detect_email() {
        let engine = DetectionEngine::new().unwrap();
        let spans = engine.detect("Contact: john.doe@example.com", false);

        assert!(spans
            .iter()
            .any(|s| s.pii_type == PiiType::Email && s.matched_text == "john.doe@example.com"));
    }

    #[test]
    fn test_detect_empty_text() {
        let engine = DetectionEngine::new().unwrap();
        assert!(engine.detect("", false).is_empty());
    }

    #[test]
    fn test_output_sorted_by_start() {
        let engine = DetectionEngine::new().unwrap();
        let spans = engine.detect("192.168.1.1 called 9876543210 via jane@example.com", false);

        assert!(!spans.is_empty());
        for pair in spans.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn test_pattern_orders_before_recognizer_on_tie() {
        let text = "Jane Smith";
        let recognizer = StubRecognizer {
            entities: vec![RecognizedEntity {
                label: "PERSON".to_string(),
                text: text.to_string(),
                start: 0,
                end: text.len(),
            }],
        };
        let engine = DetectionEngine::new()
            .unwrap()
            .with_recognizer(Arc::new(recognizer));

        let spans = engine.detect(text, true);
        let same_start: Vec<_> = spans.iter().filter(|s| s.start == 0).collect();
        assert!(same_start.len() >= 2);
        assert_eq!(same_start[0].source, DetectorSource::Pattern);
    }

    #[test]
    fn test_recognizer_failure_degrades_to_pattern_only() {
        let engine = DetectionEngine::new()
            .unwrap()
            .with_recognizer(Arc::new(FailingRecognizer));

        let spans = engine.detect("mail me: jane@example.com", true);
        assert!(spans.iter().any(|s| s.pii_type == PiiType::Email));
        assert!(spans
            .iter()
            .all(|s| s.source == DetectorSource::Pattern));
    }

    #[test]
    fn test_recognizer_skipped_when_flag_off() {
        let recognizer = StubRecognizer {
            entities: vec![RecognizedEntity {
                label: "ORG".to_string(),
                text: "Acme".to_string(),
                start: 0,
                end: 4,
            }],
        };
        let engine = DetectionEngine::new()
            .unwrap()
            .with_recognizer(Arc::new(recognizer));

        let spans = engine.detect("Acme", false);
        assert!(spans
            .iter()
            .all(|s| s.source != DetectorSource::EntityRecognizer));
    }

    #[test]
    fn test_invalid_entity_offsets_discarded() {
        let recognizer = StubRecognizer {
            entities: vec![RecognizedEntity {
                label: "PERSON".to_string(),
                text: "ghost".to_string(),
                start: 90,
                end: 120,
            }],
        };
        let engine = DetectionEngine::new()
            .unwrap()
            .with_recognizer(Arc::new(recognizer));

        let spans = engine.detect("short text", true);
        assert!(spans
            .iter()
            .all(|s| s.source != DetectorSource::EntityRecognizer));
    }
}
