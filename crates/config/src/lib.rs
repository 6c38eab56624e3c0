//! Process configuration for record ingestion.
//!
//! This crate provides [`IngestConfig`], the one setting the pipeline needs:
//! the name of the destination table. The bootstrap reads it once at startup
//! ([`IngestConfig::from_env`]) and hands it to the orchestrator by value, so
//! nothing below the entry point touches the environment.

#![warn(missing_docs)]

use thiserror::Error;
use tracing::debug;

/// Environment variable naming the destination table.
pub const TABLE_NAME_VAR: &str = "DB_NAME";

/// Errors raised while building an [`IngestConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The environment variable is not set (or not valid unicode).
    #[error("environment variable {var} is not set")]
    MissingVar {
        /// Variable name
        var: String,
    },
    /// The table name is empty or only whitespace.
    #[error("table name must not be empty")]
    Empty,
}

/// Configuration handed to the orchestrator at construction.
///
/// ```ignore
/// use ingest_config::IngestConfig;
///
/// let config = IngestConfig::new("users")?;
/// let from_env = IngestConfig::from_env()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    table_name: String,
}

impl IngestConfig {
    /// Create a configuration for the given destination table.
    ///
    /// Surrounding whitespace is trimmed; a blank name is rejected.
    pub fn new(table_name: impl Into<String>) -> Result<Self, ConfigError> {
        let table_name = table_name.into().trim().to_string();
        if table_name.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(Self { table_name })
    }

    /// Read the table name from [`TABLE_NAME_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the table name through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(TABLE_NAME_VAR).ok_or_else(|| ConfigError::MissingVar {
            var: TABLE_NAME_VAR.to_string(),
        })?;
        let config = Self::new(value)?;
        debug!(table = %config.table_name, "Loaded ingestion config");
        Ok(config)
    }

    /// The destination table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}
