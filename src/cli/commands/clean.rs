//! Clean command implementation
//!
//! Walks the input, routes each file to its medium adapter, and runs the
//! redaction pipeline over every file. Independent files are processed
//! concurrently by blocking workers; the pattern library and detection
//! engine are shared read-only, and the audit sink serializes appends.

use crate::adapters::{
    DocumentAdapter, PlainTextAdapter, RasterAdapter, SpreadsheetAdapter, TesseractCli,
    WordAdapter,
};
use crate::audit::AuditSink;
use crate::config::ScourConfig;
use crate::core::{
    medium_for, normalize_type, process_document, FileReport, MediumKind, RedactionOptions,
};
use crate::detection::{DetectionEngine, PatternRegistry};
use crate::domain::ScourError;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Arguments for the clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Path to a file or directory to cleanse
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for cleansed files
    #[arg(short, long, default_value = "cleansed_output")]
    pub output: PathBuf,

    /// Override the configured action (mask or remove)
    #[arg(short, long)]
    pub action: Option<String>,

    /// Enable entity recognition in addition to pattern detection
    #[arg(long)]
    pub use_ner: bool,

    /// Remove embedded picture shapes from slide media
    #[arg(long)]
    pub remove_images: bool,
}

impl CleanArgs {
    /// Execute the clean command
    pub async fn execute(&self, config: &ScourConfig) -> anyhow::Result<i32> {
        let options = self.merge_options(config)?;

        let registry = match &config.pattern_library {
            Some(path) => PatternRegistry::from_file(path)?,
            None => PatternRegistry::builtin()?,
        };
        let engine = Arc::new(
            DetectionEngine::with_registry(registry)
                .with_confidence_threshold(config.confidence_threshold),
        );

        if options.use_entity_recognizer && !engine.has_recognizer() {
            tracing::warn!("No entity recognizer is configured; detection runs pattern-only");
        }

        let files = collect_files(&self.input)?;
        if files.is_empty() {
            println!("Nothing to process under {}", self.input.display());
            return Ok(0);
        }

        std::fs::create_dir_all(&self.output)?;
        let audit = Arc::new(AuditSink::new());

        let mut workers = JoinSet::new();
        for input_file in files {
            let engine = Arc::clone(&engine);
            let audit = Arc::clone(&audit);
            let output_file = self.output.join(
                input_file
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("unnamed")),
            );
            let tesseract = config.ocr.tesseract_path.clone();

            workers.spawn_blocking(move || {
                let result =
                    process_file(&input_file, &output_file, &engine, &options, &audit, &tesseract);
                (input_file, output_file, result)
            });
        }

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        while let Some(joined) = workers.join_next().await {
            let (input_file, output_file, result) = joined?;
            match result {
                Ok(report) => {
                    succeeded += 1;
                    tracing::info!(
                        input = %input_file.display(),
                        units = report.units_scanned,
                        spans = report.spans_redacted,
                        "File cleansed"
                    );
                    println!(
                        "✅ Cleansed {} → {}",
                        input_file.display(),
                        output_file.display()
                    );
                }
                Err(error) => {
                    failed += 1;
                    tracing::error!(input = %input_file.display(), %error, "File failed");
                    println!("❌ {} ({error})", input_file.display());
                }
            }
        }

        if config.audit.enabled {
            match audit.flush(&config.audit.dir) {
                Ok(artifacts) => {
                    println!(
                        "📋 Audit trail written → {}, {}, {}",
                        artifacts.csv.display(),
                        artifacts.table.display(),
                        artifacts.spreadsheet.display()
                    );
                }
                Err(error) => {
                    tracing::error!(%error, "Failed to persist audit trail");
                }
            }
        }

        println!();
        println!("Done: {succeeded} cleansed, {failed} failed, {} redactions", audit.len());
        Ok(if failed == 0 { 0 } else { 1 })
    }

    fn merge_options(&self, config: &ScourConfig) -> anyhow::Result<RedactionOptions> {
        let action = match &self.action {
            Some(value) => value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid --action: {e}"))?,
            None => config.action,
        };
        Ok(RedactionOptions {
            action,
            use_entity_recognizer: config.use_entity_recognizer || self.use_ner,
            remove_embedded_images: config.remove_embedded_images || self.remove_images,
        })
    }
}

/// Route one file to its adapter and run the pipeline over it
fn process_file(
    input: &Path,
    output: &Path,
    engine: &DetectionEngine,
    options: &RedactionOptions,
    audit: &AuditSink,
    tesseract: &Path,
) -> crate::domain::Result<FileReport> {
    let file_name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let extension = normalize_type(
        input.extension().and_then(|e| e.to_str()).unwrap_or(""),
        file_name,
    );
    let medium = medium_for(&extension)
        .ok_or_else(|| ScourError::UnsupportedMedium(extension.clone()))?;

    let mut adapter: Box<dyn DocumentAdapter> = match medium {
        MediumKind::PlainText => Box::new(PlainTextAdapter::load(input)?),
        MediumKind::Spreadsheet => Box::new(SpreadsheetAdapter::load(input)?),
        MediumKind::Word => Box::new(WordAdapter::load(input)?),
        MediumKind::Raster => {
            let ocr = TesseractCli::new(tesseract);
            Box::new(RasterAdapter::load(input, &ocr)?)
        }
        // The slide and PDF adapters bind their medium through capability
        // traits; no deck or page-engine binding ships with the CLI yet.
        MediumKind::Slides => {
            return Err(ScourError::UnsupportedMedium(
                "pptx (no slide deck binding configured)".to_string(),
            ))
        }
        MediumKind::Pdf => {
            return Err(ScourError::UnsupportedMedium(
                "pdf (no page engine binding configured)".to_string(),
            ))
        }
    };

    process_document(
        adapter.as_mut(),
        engine,
        options,
        audit,
        &input.display().to_string(),
        &output.display().to_string(),
        output,
    )
}

/// Recursively collect regular files under `path`
fn collect_files(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if path.is_file() {
        files.push(path.to_path_buf());
        return Ok(files);
    }

    let mut stack = vec![path.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let entry_path = entry.path();
            if entry_path.is_dir() {
                stack.push(entry_path);
            } else {
                files.push(entry_path);
            }
        }
    }

    files.sort();
    Ok(files)
}
