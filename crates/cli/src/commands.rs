//! Subcommand implementations

use anyhow::{Context, Result};
use ingest_config::IngestConfig;
use ingest_pipeline::{Ingestor, Outcome, TriggerEvent};
use ingest_storage::{FsBlobStore, MemoryTableStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Play every event file and return the resulting table as pretty JSON
pub fn run(blob_root: &Path, table: Option<&str>, events: &[PathBuf]) -> Result<String> {
    let config = match table {
        Some(name) => IngestConfig::new(name),
        None => IngestConfig::from_env(),
    }
    .context("destination table is not configured")?;

    let store = Arc::new(MemoryTableStore::with_tables([config.table_name()]));
    let table = config.table_name().to_string();
    let ingestor = Ingestor::new(FsBlobStore::new(blob_root), Arc::clone(&store), config);

    let mut stored = 0usize;
    for path in events {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?;

        let event = match TriggerEvent::from_json(&text) {
            Ok(event) => event,
            Err(e) => {
                error!(file = %path.display(), error = %e, "Skipping event file");
                continue;
            }
        };

        if let Outcome::Stored { .. } = ingestor.handle_event(&event) {
            stored += 1;
        }
    }
    info!(events = events.len(), stored, table = %table, "Run complete");

    serde_json::to_string_pretty(&store.scan(&table)).context("rendering table contents")
}

/// Parse and validate one payload file, returning the canonical record as JSON
pub fn validate(file: &Path) -> Result<String> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading payload file {}", file.display()))?;

    let candidate = ingest_core::parse(&text)?;
    let record = ingest_core::validate(candidate)?;
    serde_json::to_string_pretty(&record).context("rendering canonical record")
}
