//! Table storage: where canonical records are upserted
//!
//! [`TableStore::put_item`] is a full replace keyed by `email`. The store
//! answers with a [`StoreAcknowledgment`]; the caller decides what counts as
//! success.
//!
//! # MemoryTableStore design
//!
//! - DashMap by table name, one [`Shard`] per table
//! - FxHashMap inside the shard, keyed by `email`
//! - put() only locks the target table's shard
//! - Concurrent puts for the same `email` resolve last-write-wins
//!
//! Tables must exist before they are written to, matching a managed
//! key-value service where the table is provisioned out of band.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ingest_core::{CanonicalRecord, StoreAcknowledgment, EMAIL};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;

/// A stored row: flat string-to-string map
pub type Row = BTreeMap<String, String>;

/// Write access to a keyed table store
pub trait TableStore: Send + Sync {
    /// Insert `record`, or fully replace the row with the same `email`
    ///
    /// Returns the store's acknowledgment. `Err` means the write never got
    /// an acknowledgment (unknown table, store unreachable).
    fn put_item(
        &self,
        table: &str,
        record: &CanonicalRecord,
    ) -> Result<StoreAcknowledgment, StoreError>;
}

impl<T: TableStore + ?Sized> TableStore for Arc<T> {
    fn put_item(
        &self,
        table: &str,
        record: &CanonicalRecord,
    ) -> Result<StoreAcknowledgment, StoreError> {
        (**self).put_item(table, record)
    }
}

/// Rows of one table
///
/// Each table gets its own shard with an FxHashMap for O(1) lookups.
#[derive(Debug, Default)]
pub struct Shard {
    pub(crate) rows: FxHashMap<String, Row>,
}

impl Shard {
    /// Create an empty shard
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the shard holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// In-memory table store
///
/// # Thread Safety
///
/// All operations are thread-safe; writes to different tables never contend.
/// Wrap in `Arc` to share one store between the pipeline and readers.
pub struct MemoryTableStore {
    /// Per-table shards
    shards: DashMap<String, Shard>,
    /// Global write counter, reported in acknowledgments
    version: AtomicU64,
}

impl MemoryTableStore {
    /// Create a store with no tables
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
            version: AtomicU64::new(0),
        }
    }

    /// Create a store with the given tables already provisioned
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for table in tables {
            store.create_table(table);
        }
        store
    }

    /// Provision a table; returns false if it already existed
    pub fn create_table(&self, table: impl Into<String>) -> bool {
        match self.shards.entry(table.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                debug!(table = %slot.key(), "Creating table");
                slot.insert(Shard::new());
                true
            }
        }
    }

    /// Check if a table exists
    pub fn has_table(&self, table: &str) -> bool {
        self.shards.contains_key(table)
    }

    /// Number of writes accepted so far
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    #[inline]
    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Fetch a row by primary key
    pub fn get_item(&self, table: &str, email: &str) -> Option<Row> {
        self.shards
            .get(table)
            .and_then(|shard| shard.rows.get(email).cloned())
    }

    /// Number of rows in a table (0 for unknown tables)
    pub fn item_count(&self, table: &str) -> usize {
        self.shards.get(table).map(|shard| shard.len()).unwrap_or(0)
    }

    /// All rows of a table, ordered by primary key
    pub fn scan(&self, table: &str) -> Vec<Row> {
        let Some(shard) = self.shards.get(table) else {
            return Vec::new();
        };
        let mut rows: Vec<Row> = shard.rows.values().cloned().collect();
        rows.sort_by(|a, b| a.get(EMAIL).cmp(&b.get(EMAIL)));
        rows
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryTableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTableStore")
            .field("table_count", &self.shards.len())
            .field("version", &self.version())
            .finish()
    }
}

impl TableStore for MemoryTableStore {
    fn put_item(
        &self,
        table: &str,
        record: &CanonicalRecord,
    ) -> Result<StoreAcknowledgment, StoreError> {
        let mut shard = self
            .shards
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound {
                table: table.to_string(),
            })?;

        let replaced = shard
            .rows
            .insert(record.email().to_string(), record.as_map().clone())
            .is_some();
        let version = self.next_version();
        drop(shard);

        info!(table, email = record.email(), replaced, version, "Put item");

        Ok(StoreAcknowledgment::ok()
            .with_metadata("request_id", Uuid::new_v4().to_string())
            .with_metadata("version", version.to_string())
            .with_metadata("written_at", Utc::now().to_rfc3339()))
    }
}
