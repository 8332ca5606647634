//! Fleet-wide KPI aggregation over call transcripts.
//!
//! Runs the categorizer once per transcript in input order and reduces the
//! results into counts, rates, and rankings. A transcript that fails
//! categorization is excluded from every tally; `total_calls` still counts
//! the whole batch.

use crate::categorize::Categorizer;
use aircall_common::{AircallError, CallCategory, FlightMention, KpiReport, ResolutionStatus};
use std::collections::BTreeMap;
use tracing::warn;

/// Placeholder: transcripts carry no timing data, so there is nothing to
/// measure until a timing collaborator exists.
pub const AVERAGE_RESPONSE_TIME_SECS: u32 = 25;

/// How many flights the mention ranking keeps.
const TOP_FLIGHTS: usize = 3;

const POSITIVE_WORDS: [&str; 8] = [
    "thank", "good", "great", "excellent", "helpful", "appreciate", "happy", "satisfied",
];

const NEGATIVE_WORDS: [&str; 9] = [
    "unhappy",
    "disappointed",
    "poor",
    "terrible",
    "bad",
    "issue",
    "problem",
    "complaint",
    "delay",
];

/// Signed score: positive-keyword hits minus negative-keyword hits, each
/// keyword counted at most once per transcript.
pub fn sentiment_score(transcript: &str) -> i32 {
    let lower = transcript.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    positive - negative
}

pub struct KpiAggregator {
    categorizer: Categorizer,
}

impl KpiAggregator {
    pub fn new(categorizer: Categorizer) -> Self {
        Self { categorizer }
    }

    /// Reduce a batch of transcripts into one report. An empty batch is an
    /// explicit error, not a zero-filled report.
    pub async fn compute(&self, transcripts: &[String]) -> Result<KpiReport, AircallError> {
        if transcripts.is_empty() {
            return Err(AircallError::NoTranscripts);
        }

        let total_calls = transcripts.len();

        // Tallied in declaration order so "first encountered maximum" means
        // "earliest declared category" regardless of batch order.
        let mut category_counts: Vec<(CallCategory, usize)> =
            CallCategory::ALL.iter().map(|c| (*c, 0)).collect();
        let mut resolution_count = 0usize;
        let mut flight_mentions: Vec<(String, usize)> = Vec::new();
        let mut sentiments: Vec<i32> = Vec::new();

        for transcript in transcripts {
            let categorization = match self.categorizer.categorize(transcript).await {
                Ok(c) => c,
                Err(e) => {
                    warn!("Skipping transcript that failed categorization: {e}");
                    continue;
                }
            };

            match category_counts
                .iter_mut()
                .find(|(c, _)| *c == categorization.category)
            {
                Some(slot) => slot.1 += 1,
                None => category_counts.push((categorization.category, 1)),
            }

            if categorization.details.resolution_status == ResolutionStatus::Resolved {
                resolution_count += 1;
            }

            // Raw occurrences: a flight mentioned twice in one call counts
            // twice.
            for flight in &categorization.details.flight_numbers {
                match flight_mentions.iter_mut().find(|(f, _)| f == flight) {
                    Some(slot) => slot.1 += 1,
                    None => flight_mentions.push((flight.clone(), 1)),
                }
            }

            sentiments.push(sentiment_score(transcript));
        }

        let resolution_rate = resolution_count as f64 / total_calls as f64 * 100.0;
        let average_sentiment = if sentiments.is_empty() {
            0.0
        } else {
            sentiments.iter().sum::<i32>() as f64 / sentiments.len() as f64
        };

        let mut most_common_issue = "None".to_string();
        let mut best = 0usize;
        for (category, count) in &category_counts {
            if *count > best {
                best = *count;
                most_common_issue = category.to_string();
            }
        }

        // Stable sort keeps encounter order for equal counts.
        flight_mentions.sort_by(|a, b| b.1.cmp(&a.1));
        let most_mentioned_flights = flight_mentions
            .into_iter()
            .take(TOP_FLIGHTS)
            .map(|(flight_number, mentions)| FlightMention {
                flight_number,
                mentions,
            })
            .collect();

        let call_categories: BTreeMap<String, usize> = category_counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(c, n)| (c.to_string(), *n))
            .collect();
        let category_distribution: BTreeMap<String, f64> = call_categories
            .iter()
            .map(|(label, n)| (label.clone(), *n as f64 / total_calls as f64 * 100.0))
            .collect();

        Ok(KpiReport {
            total_calls,
            call_categories,
            resolution_rate,
            average_response_time: AVERAGE_RESPONSE_TIME_SECS,
            average_sentiment,
            most_common_issue,
            most_mentioned_flights,
            category_distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aggregator() -> KpiAggregator {
        KpiAggregator::new(Categorizer::new("AI", None))
    }

    fn batch(transcripts: &[&str]) -> Vec<String> {
        transcripts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_batch_is_an_error() {
        let err = aggregator().compute(&[]).await.unwrap_err();
        assert!(matches!(err, AircallError::NoTranscripts));
    }

    #[tokio::test]
    async fn test_counts_sum_to_total() {
        let transcripts = batch(&[
            "I want to buy a ticket to Delhi",
            "My suitcase is lost",
            "I need a window seat on AI890",
            "I want a refund",
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();

        assert_eq!(report.total_calls, 4);
        assert_eq!(report.call_categories.values().sum::<usize>(), 4);
    }

    #[tokio::test]
    async fn test_distribution_sums_to_one_hundred() {
        let transcripts = batch(&[
            "I want to buy a ticket",
            "My suitcase is lost",
            "I want a refund",
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();

        let total: f64 = report.category_distribution.values().sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[tokio::test]
    async fn test_resolution_rate_half() {
        let transcripts = batch(&[
            "My suitcase is lost. Thank you! Have a great day.",
            "My suitcase is lost. This is not over.",
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();
        assert_relative_eq!(report.resolution_rate, 50.0);
    }

    #[tokio::test]
    async fn test_mentions_count_raw_occurrences() {
        let transcripts = batch(&[
            "AI123 then AI123 again, and AI456 once",
            "AI456 as well",
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();

        assert_eq!(report.most_mentioned_flights.len(), 2);
        // AI123 and AI456 both have two mentions; encounter order breaks
        // the tie.
        assert_eq!(report.most_mentioned_flights[0].flight_number, "AI123");
        assert_eq!(report.most_mentioned_flights[0].mentions, 2);
        assert_eq!(report.most_mentioned_flights[1].flight_number, "AI456");
        assert_eq!(report.most_mentioned_flights[1].mentions, 2);
    }

    #[tokio::test]
    async fn test_top_three_flights_only() {
        let transcripts = batch(&[
            "AI1 AI1 AI1 AI1",
            "AI2 AI2 AI2",
            "AI3 AI3",
            "AI4",
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();

        let flights: Vec<&str> = report
            .most_mentioned_flights
            .iter()
            .map(|m| m.flight_number.as_str())
            .collect();
        assert_eq!(flights, vec!["AI1", "AI2", "AI3"]);
    }

    #[tokio::test]
    async fn test_most_common_issue_tie_breaks_to_earliest_declared() {
        // One booking call, one baggage call: Flight Booking is declared
        // first, so the tie resolves to it.
        let transcripts = batch(&["I want to buy a ticket", "My suitcase is lost"]);
        let report = aggregator().compute(&transcripts).await.unwrap();
        assert_eq!(report.most_common_issue, "Flight Booking");
    }

    #[tokio::test]
    async fn test_average_response_time_is_placeholder() {
        let transcripts = batch(&["My suitcase is lost"]);
        let report = aggregator().compute(&transcripts).await.unwrap();
        assert_eq!(report.average_response_time, AVERAGE_RESPONSE_TIME_SECS);
    }

    #[test]
    fn test_sentiment_counts_each_keyword_once() {
        // "thank" appears twice but counts once; "good" counts once.
        assert_eq!(sentiment_score("Thank you, thank you, this is good"), 2);
    }

    #[test]
    fn test_sentiment_negative() {
        assert_eq!(sentiment_score("Terrible delay, a real problem"), -3);
    }

    #[test]
    fn test_sentiment_neutral_text() {
        assert_eq!(sentiment_score("I would like to change my seat"), 0);
    }

    #[tokio::test]
    async fn test_average_sentiment_mean() {
        let transcripts = batch(&[
            "great and helpful",           // +2
            "terrible problem",            // -2
        ]);
        let report = aggregator().compute(&transcripts).await.unwrap();
        assert_relative_eq!(report.average_sentiment, 0.0);
    }
}
