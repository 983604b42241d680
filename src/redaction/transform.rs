//! Redaction transform
//!
//! Rewrites one text unit according to a resolved plan. Untouched regions are
//! copied verbatim and never reordered.

use crate::redaction::resolver::RedactionPlan;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Replacement token for masked spans
///
/// Invariant: the placeholder must not match any pattern-library entry, so
/// masking an already-masked text is a no-op.
pub const MASK_PLACEHOLDER: &str = "[REDACTED]";

/// What to do with each resolved span
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionAction {
    /// Replace the matched text with [`MASK_PLACEHOLDER`]
    #[default]
    Mask,
    /// Delete the matched text
    Remove,
}

impl RedactionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mask => "mask",
            Self::Remove => "remove",
        }
    }
}

impl std::fmt::Display for RedactionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedactionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mask" => Ok(Self::Mask),
            "remove" => Ok(Self::Remove),
            other => Err(format!("invalid action '{other}' (expected mask or remove)")),
        }
    }
}

/// Apply a resolved plan to `text`
///
/// Single forward pass: the gap before each span is copied verbatim, the span
/// itself is replaced by the placeholder (Mask) or dropped (Remove), and the
/// tail after the last span is copied verbatim. Empty input yields empty
/// output; an empty plan returns the text unchanged.
pub fn redact(text: &str, plan: &RedactionPlan, action: RedactionAction) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_idx = 0usize;

    for span in plan {
        out.push_str(&text[last_idx..span.start]);
        match action {
            RedactionAction::Mask => out.push_str(MASK_PLACEHOLDER),
            RedactionAction::Remove => {}
        }
        last_idx = span.end;
    }

    out.push_str(&text[last_idx..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::{DetectorSource, PiiType, Span};
    use crate::redaction::resolver::resolve;

    fn plan_for(text: &str, ranges: &[(usize, usize)]) -> RedactionPlan {
        let candidates = ranges
            .iter()
            .map(|&(s, e)| {
                Span::new(PiiType::Phone, DetectorSource::Pattern, text, s, e).unwrap()
            })
            .collect();
        resolve(candidates)
    }

    #[test]
    fn test_mask_replaces_spans() {
        let text = "call 9876543210 today";
        let plan = plan_for(text, &[(5, 15)]);

        assert_eq!(
            redact(text, &plan, RedactionAction::Mask),
            "call [REDACTED] today"
        );
    }

    #[test]
    fn test_remove_preserves_surrounding_whitespace() {
        let text = "192.168.1.1 called 9876543210";
        let plan = plan_for(text, &[(0, 11), (19, 29)]);

        assert_eq!(redact(text, &plan, RedactionAction::Remove), " called ");
    }

    #[test]
    fn test_remove_length_law() {
        let text = "a 123456 b 654321 c";
        let plan = plan_for(text, &[(2, 8), (11, 17)]);

        let out = redact(text, &plan, RedactionAction::Remove);
        assert_eq!(out.len(), text.len() - plan.covered_len());
    }

    #[test]
    fn test_empty_text() {
        let plan = RedactionPlan::default();
        assert_eq!(redact("", &plan, RedactionAction::Mask), "");
    }

    #[test]
    fn test_empty_plan_returns_text_unchanged() {
        let plan = RedactionPlan::default();
        assert_eq!(redact("hello", &plan, RedactionAction::Mask), "hello");
    }

    #[test]
    fn test_adjacent_spans_masked_separately() {
        let text = "abcdef";
        let plan = plan_for(text, &[(0, 3), (3, 6)]);

        assert_eq!(
            redact(text, &plan, RedactionAction::Mask),
            "[REDACTED][REDACTED]"
        );
    }

    #[test]
    fn test_action_parse_round_trip() {
        assert_eq!("mask".parse::<RedactionAction>(), Ok(RedactionAction::Mask));
        assert_eq!(
            "REMOVE".parse::<RedactionAction>(),
            Ok(RedactionAction::Remove)
        );
        assert!("shred".parse::<RedactionAction>().is_err());
    }
}
