//! PII span data models

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// PII type enumeration
///
/// Closed set of categories the pattern library and entity recognizer can
/// produce, plus an open [`PiiType::Other`] variant for recognizer labels
/// outside the closed set.
///
/// Declaration order doubles as the deterministic tie-break rank when two
/// candidate spans share a start offset and a detector source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiType {
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// IPv4 addresses
    IpAddress,
    /// Payment card numbers
    CreditCard,
    /// US Social Security Numbers
    Ssn,
    /// Indian Aadhaar numbers
    Aadhaar,
    /// Indian PAN card numbers
    Pan,
    /// Web URLs
    Url,
    /// Honorific-prefixed person names (Mr./Mrs./Ms./Dr./Prof.)
    TitledName,
    /// Capitalized person names
    PersonName,
    /// Organization names (entity recognizer)
    Organization,
    /// Geographic locations (entity recognizer)
    Location,
    /// Administrative district references
    PostalDistrict,
    /// Numeric postal codes
    PostalCode,
    /// Embedded picture content (slide shape removal, never span-based)
    Image,
    /// Entity-recognizer category outside the closed set
    Other(String),
}

impl PiiType {
    /// Human-readable label used in audit rows
    pub fn label(&self) -> &str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::IpAddress => "IP_ADDRESS",
            Self::CreditCard => "CREDIT_CARD",
            Self::Ssn => "SSN",
            Self::Aadhaar => "AADHAAR",
            Self::Pan => "PAN",
            Self::Url => "URL",
            Self::TitledName => "TITLED_NAME",
            Self::PersonName => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::PostalDistrict => "POSTAL_DISTRICT",
            Self::PostalCode => "POSTAL_CODE",
            Self::Image => "IMAGE",
            Self::Other(label) => label,
        }
    }

    /// Tie-break rank (declaration order; open variant sorts last)
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Email => 0,
            Self::Phone => 1,
            Self::IpAddress => 2,
            Self::CreditCard => 3,
            Self::Ssn => 4,
            Self::Aadhaar => 5,
            Self::Pan => 6,
            Self::Url => 7,
            Self::TitledName => 8,
            Self::PersonName => 9,
            Self::Organization => 10,
            Self::Location => 11,
            Self::PostalDistrict => 12,
            Self::PostalCode => 13,
            Self::Image => 14,
            Self::Other(_) => u8::MAX,
        }
    }
}

impl std::fmt::Display for PiiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Detector that produced a span
///
/// Used for audit attribution and as the second deterministic sort key;
/// pattern matches order before entity-recognizer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorSource {
    /// Precompiled regex pattern from the pattern library
    Pattern,
    /// Injected entity-recognition capability
    EntityRecognizer,
}

impl DetectorSource {
    /// Label used in audit rows
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::EntityRecognizer => "ner",
        }
    }

    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Pattern => 0,
            Self::EntityRecognizer => 1,
        }
    }
}

impl std::fmt::Display for DetectorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A located PII occurrence within one text unit
///
/// Immutable once created. Offsets are byte indices into the text the span
/// was produced against, and `matched_text` always equals that slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// PII category
    pub pii_type: PiiType,
    /// Byte offset of the first matched byte
    pub start: usize,
    /// Byte offset one past the last matched byte
    pub end: usize,
    /// The matched text, `text[start..end]`
    pub matched_text: String,
    /// Detector attribution
    pub source: DetectorSource,
}

impl Span {
    /// Create a span over `text[start..end]`
    ///
    /// Rejects empty and out-of-bounds ranges and ranges that don't fall on
    /// UTF-8 character boundaries (entity recognizers report offsets against
    /// their own tokenization and can disagree with the source text).
    pub fn new(
        pii_type: PiiType,
        source: DetectorSource,
        text: &str,
        start: usize,
        end: usize,
    ) -> Result<Self> {
        if start >= end {
            bail!("empty span at {start}..{end}");
        }
        if end > text.len() {
            bail!("span {start}..{end} exceeds text length {}", text.len());
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            bail!("span {start}..{end} not on a character boundary");
        }

        Ok(Self {
            pii_type,
            start,
            end,
            matched_text: text[start..end].to_string(),
            source,
        })
    }

    /// Number of bytes covered by this span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans are non-empty by construction
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether this span overlaps `other`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}
