//! Natural-language query answering over flight records.
//!
//! Total operation: every query produces an answer string. Extraction and
//! lookup misses degrade to guidance messages, the completion-assisted path
//! degrades to intent-templated sentences.

use crate::extract::FlightExtractor;
use crate::llm::CompletionClient;
use crate::prompts;
use crate::store::FlightStore;
use aircall_common::{FlightRecord, QueryAnswer};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Longest completion-assisted answer we accept verbatim.
const MAX_ENHANCED_ANSWER_LEN: usize = 200;

/// Query intents, detected first-match-wins in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    Departure,
    Destination,
    Status,
    TerminalGate,
    General,
}

static DEPARTURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)depart|departure|leave|time").unwrap());
static DESTINATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)destination|arrive|goes to|going to").unwrap());
static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)status|delayed|on time|cancelled").unwrap());
static TERMINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)terminal|gate").unwrap());

/// Classify a query against the keyword groups in priority order.
pub fn classify_intent(query: &str) -> QueryIntent {
    if DEPARTURE_RE.is_match(query) {
        QueryIntent::Departure
    } else if DESTINATION_RE.is_match(query) {
        QueryIntent::Destination
    } else if STATUS_RE.is_match(query) {
        QueryIntent::Status
    } else if TERMINAL_RE.is_match(query) {
        QueryIntent::TerminalGate
    } else {
        QueryIntent::General
    }
}

/// Templated sentence for a classified intent.
pub fn template_answer(intent: QueryIntent, record: &FlightRecord) -> String {
    match intent {
        QueryIntent::Departure => format!(
            "Flight {} departs at {} to {}. Current status: {}.",
            record.flight_number, record.departure_time, record.destination, record.status
        ),
        QueryIntent::Destination => format!(
            "Flight {} is headed to {}. It departs at {}. Current status: {}.",
            record.flight_number, record.destination, record.departure_time, record.status
        ),
        QueryIntent::Status => format!(
            "Flight {} status: {}. It's scheduled to depart at {} to {}.",
            record.flight_number, record.status, record.departure_time, record.destination
        ),
        QueryIntent::TerminalGate => format!(
            "Flight {} departs from Terminal {}, Gate {}. Current status: {}.",
            record.flight_number, record.terminal, record.gate, record.status
        ),
        QueryIntent::General => format!(
            "Flight {} to {} departs at {} from Terminal {}, Gate {}. Current status: {}.",
            record.flight_number,
            record.destination,
            record.departure_time,
            record.terminal,
            record.gate,
            record.status
        ),
    }
}

pub struct QueryResponder {
    extractor: FlightExtractor,
    store: FlightStore,
    llm: Option<CompletionClient>,
}

impl QueryResponder {
    pub fn new(store: FlightStore, llm: Option<CompletionClient>) -> Self {
        Self {
            extractor: FlightExtractor::new(llm.clone()),
            store,
            llm,
        }
    }

    /// Answer a free-text query about a flight. Never fails; every degraded
    /// path yields an explanatory answer.
    pub async fn answer(&self, query: &str) -> QueryAnswer {
        let Some(flight_number) = self.extractor.extract(query).await else {
            return QueryAnswer {
                answer: "I couldn't identify a flight number in your query. \
                         Please specify a flight number like 'AI123'."
                    .to_string(),
            };
        };

        let Some(record) = self.store.lookup(&flight_number) else {
            return QueryAnswer {
                answer: format!("Flight {} not found in database.", flight_number),
            };
        };

        if let Some(llm) = &self.llm {
            match self.enhanced_answer(llm, query, record).await {
                Ok(Some(answer)) => return QueryAnswer { answer },
                Ok(None) => debug!("Completion answer rejected by length bound"),
                Err(e) => warn!("Completion-assisted answering failed: {e:#}"),
            }
        }

        QueryAnswer {
            answer: template_answer(classify_intent(query), record),
        }
    }

    /// Returns Ok(None) when the completion came back but failed the
    /// non-empty / 200-char acceptance bound.
    async fn enhanced_answer(
        &self,
        llm: &CompletionClient,
        query: &str,
        record: &FlightRecord,
    ) -> Result<Option<String>> {
        let record_json = serde_json::to_string(record)?;
        let answer = llm
            .complete(&prompts::answer_prompt(query, &record_json))
            .await?;
        let answer = answer.trim();

        if !answer.is_empty() && answer.len() <= MAX_ENHANCED_ANSWER_LEN {
            Ok(Some(answer.to_string()))
        } else {
            Ok(None)
        }
    }
}
