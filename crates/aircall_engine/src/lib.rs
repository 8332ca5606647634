//! Call-center text-classification and aggregation engines.
//!
//! Four engines in a strict downward flow: the KPI aggregator runs the
//! categorizer, the categorizer and the query responder run the extractor.
//! No engine holds state across calls. The optional completion-service
//! enhancement path is advisory only and degrades to the deterministic
//! path on any failure.

pub mod categorize;
pub mod extract;
pub mod kpi;
pub mod llm;
pub mod prompts;
pub mod respond;
pub mod store;

pub use categorize::Categorizer;
pub use extract::FlightExtractor;
pub use kpi::KpiAggregator;
pub use llm::CompletionClient;
pub use respond::QueryResponder;
pub use store::FlightStore;
