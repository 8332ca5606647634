//! Transcript categorization and detail extraction.
//!
//! The deterministic scan walks the keyword rules in declaration order and
//! keeps the LAST category whose keyword set matches, so later rules
//! override earlier ones: a transcript mentioning both "baggage" and "seat"
//! resolves to Seat Change. Detail extraction runs independently of the
//! category decision.
//!
//! The completion-assisted path strict-parses the model output into
//! [`CallCategorization`]; on any transport or parse failure it falls back
//! to the keyword scan.

use crate::llm::{extract_json, CompletionClient};
use crate::prompts;
use aircall_common::{
    AircallError, CallCategorization, CallCategory, CallDetails, ResolutionStatus,
};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Keyword rules in declaration order. Later matches win.
const CATEGORY_RULES: [(CallCategory, &[&str]); 7] = [
    (
        CallCategory::FlightBooking,
        &["book", "reserve", "purchase", "buy", "schedule"],
    ),
    (
        CallCategory::FlightCancellation,
        &["cancel", "refund", "money back"],
    ),
    (
        CallCategory::FlightRescheduling,
        &["reschedule", "change", "move", "different date"],
    ),
    (
        CallCategory::BaggageIssue,
        &["baggage", "luggage", "bag", "suitcase", "missing", "lost"],
    ),
    (
        CallCategory::Complaint,
        &["complaint", "unhappy", "disappointed", "poor", "terrible", "bad experience"],
    ),
    (
        CallCategory::SeatChange,
        &["seat", "change seat", "different seat", "window", "aisle"],
    ),
    (
        CallCategory::GeneralInquiry,
        &["status", "check", "information", "time", "when"],
    ),
];

static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{1,3}\d{1,4}").unwrap());

/// Name-introduction patterns, first match wins. These run on the raw
/// transcript: names keep their source casing.
static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"name is ([A-Za-z\s]+),",
        r"name is ([A-Za-z\s]+)\.",
        r"I'm ([A-Za-z\s]+),",
        r"this is ([A-Za-z\s]+),",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub struct Categorizer {
    carrier_code: String,
    llm: Option<CompletionClient>,
}

impl Categorizer {
    pub fn new(carrier_code: impl Into<String>, llm: Option<CompletionClient>) -> Self {
        Self {
            carrier_code: carrier_code.into(),
            llm,
        }
    }

    /// Categorize one transcript. With the enhancement path disabled this
    /// is deterministic and, for the same transcript, idempotent.
    pub async fn categorize(&self, transcript: &str) -> Result<CallCategorization, AircallError> {
        if let Some(llm) = &self.llm {
            match self.enhanced_categorization(llm, transcript).await {
                Ok(parsed) => {
                    debug!("Completion-assisted categorization: {}", parsed.category);
                    return Ok(parsed);
                }
                Err(e) => {
                    warn!("Completion-assisted categorization failed, using keyword scan: {e:#}")
                }
            }
        }

        Ok(self.categorize_with_rules(transcript))
    }

    /// The completion output must parse into the full categorization shape;
    /// raw text is never returned.
    async fn enhanced_categorization(
        &self,
        llm: &CompletionClient,
        transcript: &str,
    ) -> Result<CallCategorization> {
        let text = llm
            .complete(&prompts::categorization_prompt(transcript))
            .await?;
        let parsed: CallCategorization = serde_json::from_str(extract_json(&text))
            .context("completion output does not match the categorization shape")?;
        Ok(parsed)
    }

    /// Deterministic path: keyword scan plus detail extraction.
    pub fn categorize_with_rules(&self, transcript: &str) -> CallCategorization {
        let category = scan_category(transcript);
        let flight_numbers = self.flight_mentions(transcript);
        let call_summary = format!(
            "{} related to flight(s): {}",
            category,
            if flight_numbers.is_empty() {
                "None specified".to_string()
            } else {
                flight_numbers.join(", ")
            }
        );

        CallCategorization {
            category,
            details: CallDetails {
                flight_numbers,
                customer_name: extract_customer_name(transcript),
                resolution_status: resolution_status(transcript),
                call_summary,
            },
        }
    }

    /// Identifier-shaped tokens whose prefix matches the carrier code, in
    /// encounter order, duplicates kept.
    pub fn flight_mentions(&self, transcript: &str) -> Vec<String> {
        let prefix = self.carrier_code.to_uppercase();
        IDENTIFIER_RE
            .find_iter(transcript)
            .map(|m| m.as_str().to_string())
            .filter(|id| id.to_uppercase().starts_with(&prefix))
            .collect()
    }
}

fn scan_category(transcript: &str) -> CallCategory {
    let lower = transcript.to_lowercase();
    let mut determined = CallCategory::GeneralInquiry;
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            determined = category;
        }
    }
    determined
}

fn extract_customer_name(transcript: &str) -> String {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(transcript) {
            return caps[1].trim().to_string();
        }
    }
    "Unknown".to_string()
}

/// Resolved iff the transcript carries both a gratitude phrase and a
/// closing pleasantry.
fn resolution_status(transcript: &str) -> ResolutionStatus {
    let lower = transcript.to_lowercase();
    if lower.contains("thank you") && lower.contains("have a") {
        ResolutionStatus::Resolved
    } else {
        ResolutionStatus::Pending
    }
}
