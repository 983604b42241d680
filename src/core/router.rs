//! Medium routing
//!
//! Maps file types (extensions or MIME strings from upstream metadata) onto
//! the adapter that owns that medium. Types outside the table are reported
//! as unsupported, never attempted.

use std::path::Path;

/// The six media the adapters cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumKind {
    PlainText,
    Spreadsheet,
    Word,
    Slides,
    Pdf,
    Raster,
}

/// Normalize a file type into a bare extension
///
/// Upstream inventories sometimes carry MIME types instead of extensions;
/// both are accepted. Falls back to the filename's extension when the MIME
/// string isn't specific enough.
pub fn normalize_type(file_type: &str, filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if file_type.contains('/') {
        let mime = file_type.to_lowercase();
        if mime.contains("pdf") {
            return "pdf".to_string();
        }
        if mime.contains("word") || mime.contains("wordprocessingml") {
            return "docx".to_string();
        }
        if mime.contains("presentation") || mime.contains("presentationml") {
            return "pptx".to_string();
        }
        if mime.contains("spreadsheet") || mime.contains("excel") || mime.contains("spreadsheetml")
        {
            return "xlsx".to_string();
        }
        return ext;
    }

    file_type.trim_start_matches('.').to_lowercase()
}

/// Medium for a normalized extension
pub fn medium_for(extension: &str) -> Option<MediumKind> {
    match extension {
        "txt" | "csv" | "log" | "json" | "md" => Some(MediumKind::PlainText),
        "xlsx" | "xls" => Some(MediumKind::Spreadsheet),
        "docx" => Some(MediumKind::Word),
        "pptx" => Some(MediumKind::Slides),
        "pdf" => Some(MediumKind::Pdf),
        "png" | "jpg" | "jpeg" => Some(MediumKind::Raster),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("application/pdf", "report.pdf", "pdf")]
    #[test_case(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "memo.docx",
        "docx"
    )]
    #[test_case(
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "deck.pptx",
        "pptx"
    )]
    #[test_case(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "sales.xlsx",
        "xlsx"
    )]
    #[test_case("image/png", "scan.png", "png")]
    #[test_case("PDF", "report.PDF", "pdf")]
    #[test_case(".TXT", "notes.txt", "txt")]
    fn test_normalize(file_type: &str, filename: &str, expected: &str) {
        assert_eq!(normalize_type(file_type, filename), expected);
    }

    #[test]
    fn test_medium_table() {
        assert_eq!(medium_for("txt"), Some(MediumKind::PlainText));
        assert_eq!(medium_for("xlsx"), Some(MediumKind::Spreadsheet));
        assert_eq!(medium_for("docx"), Some(MediumKind::Word));
        assert_eq!(medium_for("pptx"), Some(MediumKind::Slides));
        assert_eq!(medium_for("pdf"), Some(MediumKind::Pdf));
        assert_eq!(medium_for("jpeg"), Some(MediumKind::Raster));
        assert_eq!(medium_for("dwg"), None);
    }
}
