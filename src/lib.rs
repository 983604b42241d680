// Scour - PII Detection & Redaction Engine
// Copyright (c) 2026 Scour Contributors
// Licensed under the MIT License

//! # Scour - PII Detection & Redaction Engine
//!
//! Scour scans heterogeneous documents (plain text, spreadsheets,
//! word-processing documents, presentations, PDFs and raster images) for
//! personally identifiable information, then masks or removes each
//! occurrence in place while producing an auditable record of every action
//! taken.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** candidate PII spans with a pluggable detector registry
//!   (precompiled regex patterns plus an optional entity recognizer)
//! - **Resolving** overlapping detections into a non-overlapping, ordered
//!   redaction plan
//! - **Redacting** each medium through a format-agnostic document adapter,
//!   whether the medium is string-addressable or geometry-addressable
//! - **Auditing** every applied redaction through a shared append-only sink
//!
//! ## Architecture
//!
//! Scour follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Orchestration (medium routing, per-document pipeline)
//! - [`detection`] - Pattern library, entity recognizer seam, detection engine
//! - [`redaction`] - Span resolver and redaction transform
//! - [`adapters`] - One document adapter per medium
//! - [`audit`] - Append-only audit trail
//! - [`domain`] - Error taxonomy and result alias
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scour::adapters::PlainTextAdapter;
//! use scour::audit::AuditSink;
//! use scour::core::{process_document, RedactionOptions};
//! use scour::detection::DetectionEngine;
//! use std::path::Path;
//!
//! # fn main() -> scour::domain::Result<()> {
//! let engine = DetectionEngine::new().map_err(|e| scour::domain::ScourError::Other(e.to_string()))?;
//! let audit = AuditSink::new();
//! let mut adapter = PlainTextAdapter::load(Path::new("notes.txt"))?;
//!
//! let report = process_document(
//!     &mut adapter,
//!     &engine,
//!     &RedactionOptions::default(),
//!     &audit,
//!     "notes.txt",
//!     "cleansed/notes.txt",
//!     Path::new("cleansed/notes.txt"),
//! )?;
//!
//! println!("redacted {} spans", report.spans_redacted);
//! audit.flush(Path::new("./audit"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Detection is heuristic
//!
//! Pattern matching and entity recognition are high-recall heuristics, not a
//! guarantee that every occurrence of PII is caught; the audit trail records
//! what was done, not what was missed.

pub mod adapters;
pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod redaction;
