//! `ingest` command line driver
//!
//! ```text
//! ingest run --blob-root ./buckets [--table users] event1.json event2.json
//! ingest validate payload.json
//! ```
//!
//! `run` plays each trigger event against a filesystem blob store and an
//! in-memory table, then prints the table as JSON. `validate` checks one
//! payload file without storing anything.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ingest", version, about = "Validate and upsert uploaded JSON records")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Process trigger event files against a local bucket directory
    Run {
        /// Directory holding one sub-directory per bucket
        #[arg(long)]
        blob_root: PathBuf,

        /// Destination table (defaults to $DB_NAME)
        #[arg(long)]
        table: Option<String>,

        /// Trigger event files, processed in order
        #[arg(required = true)]
        events: Vec<PathBuf>,
    },
    /// Parse and validate a payload file, printing the canonical record
    Validate {
        /// Payload file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Command::Run {
            blob_root,
            table,
            events,
        } => commands::run(&blob_root, table.as_deref(), &events),
        Command::Validate { file } => commands::validate(&file),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
