//! Audit trail
//!
//! Every applied redaction produces one [`AuditEvent`]; the shared
//! [`AuditSink`] collects them across file workers and persists the trail
//! once at end-of-run.

pub mod sink;

// Re-export main types
pub use sink::{AuditArtifacts, AuditEvent, AuditSink};
