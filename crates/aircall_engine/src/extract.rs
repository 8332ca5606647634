//! Flight-number extraction.
//!
//! Ordered pattern cascade over free text, with an optional
//! completion-assisted fallback. The fallback is advisory: any transport or
//! format failure degrades to "no match" and never reaches the caller.

use crate::llm::CompletionClient;
use crate::prompts;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Cascade order matters: positional forms first, bare identifier last.
/// The first capture of the first matching pattern wins.
static FLIGHT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)flight\s+([A-Za-z]{1,3}\d{1,4})",
        r"(?i)([A-Za-z]{1,3}\d{1,4})\s+flight",
        r"(?i)flight\s+number\s+([A-Za-z]{1,3}\d{1,4})",
        r"(?i)([A-Za-z]{1,3}\d{1,4})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// A full token shaped like an airline code: 1-3 letters then 1-4 digits.
static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{1,3}\d{1,4}$").unwrap());

/// Run the deterministic cascade. Returned casing is whatever the source
/// text used; callers upper-case before any store lookup.
pub fn extract_with_patterns(text: &str) -> Option<String> {
    for pattern in FLIGHT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

pub struct FlightExtractor {
    llm: Option<CompletionClient>,
}

impl FlightExtractor {
    pub fn new(llm: Option<CompletionClient>) -> Self {
        Self { llm }
    }

    /// Extract a flight identifier from `text`, consulting the completion
    /// service only when the pattern cascade finds nothing.
    pub async fn extract(&self, text: &str) -> Option<String> {
        if let Some(found) = extract_with_patterns(text) {
            return Some(found);
        }

        let llm = self.llm.as_ref()?;
        match llm.complete(&prompts::extraction_prompt(text)).await {
            Ok(response) => {
                let extracted = response.trim();
                if BARE_IDENTIFIER.is_match(extracted) {
                    debug!("Completion-assisted extraction found {}", extracted);
                    Some(extracted.to_string())
                } else if extracted != "NONE" {
                    // Model answered in prose; give the cascade one pass
                    // over its output.
                    extract_with_patterns(extracted)
                } else {
                    None
                }
            }
            Err(e) => {
                warn!("Completion-assisted extraction failed: {e:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_following_flight() {
        assert_eq!(
            extract_with_patterns("flight AI123 delayed"),
            Some("AI123".to_string())
        );
    }

    #[test]
    fn test_token_preceding_flight() {
        assert_eq!(
            extract_with_patterns("is the AI456 flight on time?"),
            Some("AI456".to_string())
        );
    }

    #[test]
    fn test_flight_number_phrase() {
        assert_eq!(
            extract_with_patterns("my flight number is AI789"),
            Some("AI789".to_string())
        );
    }

    #[test]
    fn test_bare_identifier_anywhere() {
        assert_eq!(
            extract_with_patterns("any updates on AI234 today?"),
            Some("AI234".to_string())
        );
    }

    #[test]
    fn test_case_insensitive_match_preserves_source_casing() {
        assert_eq!(
            extract_with_patterns("FLIGHT ai123 please"),
            Some("ai123".to_string())
        );
    }

    #[test]
    fn test_no_identifier_returns_none() {
        assert_eq!(extract_with_patterns("I lost my luggage yesterday"), None);
    }

    #[test]
    fn test_bare_pattern_slices_longer_token() {
        // Four leading letters exceed the airline-code shape, but the
        // trailing 3-letter slice still matches the bare pattern.
        assert_eq!(
            extract_with_patterns("case ABCD1234"),
            Some("BCD1234".to_string())
        );
    }

    #[tokio::test]
    async fn test_extractor_without_fallback_returns_none() {
        let extractor = FlightExtractor::new(None);
        assert_eq!(extractor.extract("no flights here").await, None);
    }

    #[tokio::test]
    async fn test_extractor_prefers_patterns_over_fallback() {
        let extractor = FlightExtractor::new(None);
        assert_eq!(
            extractor.extract("flight AI123 delayed").await,
            Some("AI123".to_string())
        );
    }
}
