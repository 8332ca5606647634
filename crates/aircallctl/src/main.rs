//! Aircall Control - CLI for the call-center analytics engines.
//!
//! Each subcommand maps to one public engine operation and prints its JSON
//! payload to stdout. Failures print `{"error": <message>}` and exit 1.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aircallctl")]
#[command(about = "Airline call-center analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the engine configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a flight record by flight number
    Info {
        /// Flight number, e.g. AI123
        flight_number: String,
    },

    /// Answer a natural-language question about a flight
    Ask {
        /// The question, e.g. "What is the status of flight AI123?"
        query: String,
    },

    /// Categorize a call transcript and extract its details
    Categorize {
        /// Read the transcript from a file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Compute call-center KPIs over a batch of transcripts
    Kpis {
        /// Transcript files, one transcript per file
        files: Vec<PathBuf>,

        /// Include the built-in sample transcripts
        #[arg(long)]
        samples: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    commands::init_tracing();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref());

    match cli.command {
        Commands::Info { flight_number } => commands::info(&flight_number),
        Commands::Ask { query } => commands::ask(&config, &query).await,
        Commands::Categorize { file } => commands::categorize(&config, file.as_deref()).await,
        Commands::Kpis { files, samples } => commands::kpis(&config, &files, samples).await,
    }
}
