//! Subcommand implementations.
//!
//! Every command builds its engines from the loaded configuration, runs one
//! public operation, and prints the resulting payload as JSON.

use aircall_common::{AircallError, EngineConfig};
use aircall_engine::{Categorizer, CompletionClient, FlightStore, KpiAggregator, QueryResponder};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sample transcripts from the demo call-center corpus.
pub const SAMPLE_TRANSCRIPTS: [&str; 2] = [
    r#"Agent: Air Express customer service, how may I help you?
Customer: Hello, I'm having an issue with my baggage. I arrived on flight AI567 this morning, but one of my bags didn't make it.
Agent: I'm sorry to hear about your missing baggage. Let me help you file a report. Can I have your name and booking reference, please?
Customer: My name is John Smith, and my booking reference is DEF456.
Agent: Thank you, Mr. Smith. I'll need some details about your missing bag. Can you describe it for me?
Customer: It's a large black suitcase with a red tag. It has my contact information on it.
Agent: Got it. I've filed a report for your missing baggage. Your reference number is BG98765. We'll contact you as soon as we locate your bag.
Customer: How long does it usually take?
Agent: Most bags are located within 24-48 hours. We'll send you updates via text message.
Customer: Okay, thank you for your help.
Agent: You're welcome. Is there anything else I can assist you with today?
Customer: No, that's all.
Agent: Thank you for calling Air Express. We apologize for the inconvenience.
"#,
    r#"Agent: Air Express reservations, how may I assist you?
Customer: Hi, I'd like to change my seat assignment on flight AI890 tomorrow.
Agent: I'd be happy to help you with that. May I have your name and booking reference?
Customer: Sarah Johnson, booking reference GHI789.
Agent: Thank you, Ms. Johnson. I can see you're currently assigned to seat 14C, which is an aisle seat. What type of seat would you prefer?
Customer: I'd prefer a window seat, if possible.
Agent: Let me check what's available... I can offer you 12A or 23F, both are window seats.
Customer: I'll take 12A, please.
Agent: Perfect. I've updated your seat assignment to 12A. Your boarding pass has been updated and sent to your email.
Customer: Great, thank you so much!
Agent: You're welcome. Have a pleasant flight tomorrow. Is there anything else I can help you with?
Customer: No, that's all for today.
Agent: Thank you for calling Air Express. Have a wonderful day!
"#,
];

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_config(path: Option<&Path>) -> EngineConfig {
    match path {
        Some(p) => EngineConfig::load_or_default(p),
        None => EngineConfig::default(),
    }
}

fn completion_client(config: &EngineConfig) -> Option<CompletionClient> {
    config
        .llm
        .enabled
        .then(|| CompletionClient::new(config.llm.clone()))
}

fn print_payload<T: Serialize>(payload: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

fn fail(err: &AircallError) -> ! {
    println!("{}", err.to_payload());
    std::process::exit(1);
}

pub fn info(flight_number: &str) -> Result<()> {
    let store = FlightStore::sample();
    match store.lookup(flight_number) {
        Some(record) => print_payload(record),
        None => fail(&AircallError::FlightNotFound(flight_number.to_uppercase())),
    }
}

pub async fn ask(config: &EngineConfig, query: &str) -> Result<()> {
    let responder = QueryResponder::new(FlightStore::sample(), completion_client(config));
    print_payload(&responder.answer(query).await)
}

pub async fn categorize(config: &EngineConfig, file: Option<&Path>) -> Result<()> {
    let transcript = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            buf
        }
    };

    let categorizer = Categorizer::new(&config.carrier_code, completion_client(config));
    match categorizer.categorize(&transcript).await {
        Ok(result) => print_payload(&result),
        Err(err) => fail(&err),
    }
}

pub async fn kpis(config: &EngineConfig, files: &[PathBuf], samples: bool) -> Result<()> {
    let mut transcripts: Vec<String> = Vec::new();
    if samples {
        transcripts.extend(SAMPLE_TRANSCRIPTS.iter().map(|t| t.to_string()));
    }
    for path in files {
        transcripts.push(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read transcript from {}", path.display()))?,
        );
    }

    let aggregator = KpiAggregator::new(Categorizer::new(
        &config.carrier_code,
        completion_client(config),
    ));
    match aggregator.compute(&transcripts).await {
        Ok(report) => print_payload(&report),
        Err(err) => fail(&err),
    }
}
