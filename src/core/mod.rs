//! Core orchestration
//!
//! The pipeline drives one document through the detection and redaction
//! stages against the adapter capability set; the router decides which
//! adapter owns a file. Whole-file workers call into this layer
//! concurrently; nothing here holds cross-file state.

pub mod pipeline;
pub mod router;

// Re-export main types
pub use pipeline::{process_document, FileReport, RedactionOptions};
pub use router::{medium_for, normalize_type, MediumKind};
