//! PII detection
//!
//! The detection layer locates candidate PII spans in raw text. Two detector
//! sources feed it: the precompiled regex pattern library, and an optional
//! injected entity-recognition capability. Both produce [`Span`]s over the
//! same text; the engine merges them into one deterministically ordered
//! candidate list for the span resolver.

pub mod engine;
pub mod models;
pub mod patterns;
pub mod recognizer;

// Re-export main types
pub use engine::DetectionEngine;
pub use models::{DetectorSource, PiiType, Span};
pub use patterns::PatternRegistry;
pub use recognizer::{EntityRecognizer, RecognizedEntity};
