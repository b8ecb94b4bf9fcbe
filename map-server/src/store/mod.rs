//! Map Snapshot Persistence
//!
//! The boundary contract for loading and saving a room's map. Maps are
//! persisted wholesale: one snapshot per room, no partial or delta
//! updates.
//!
//! # Concurrency policy
//!
//! Last-write-wins at snapshot granularity. Concurrent saves from two
//! editor sessions for the same room are NOT merged: the later `save`
//! call (by arrival order at the store) fully replaces the prior
//! content. This is a known limitation of the wholesale-snapshot
//! design, not an accident.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{MapSnapshot, ValidationError};
use thiserror::Error;

pub mod memory;
pub mod redb_store;

pub use memory::MemoryMapStore;
pub use redb_store::RedbMapStore;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No map snapshot for room {0}")]
    NotFound(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Acknowledgment of a completed save
///
/// Saving the same snapshot twice yields the same persisted content and
/// the same shape of ack; only the timestamp differs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAck {
    pub room_id: String,
    pub timestamp: DateTime<Utc>,
}

impl SaveAck {
    pub fn now(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Persistence gateway for room map snapshots
///
/// `save` MUST validate the snapshot before any durable write is
/// attempted; an invalid snapshot never reaches the backing store,
/// not even partially. Transient I/O failures surface to the caller
/// as [`StoreError`]; the store does not retry internally.
#[async_trait]
pub trait MapStore: Send + Sync + 'static {
    /// Load the snapshot for a room. Absent room is [`StoreError::NotFound`].
    async fn load(&self, room_id: &str) -> StoreResult<MapSnapshot>;

    /// Validate, then durably replace the room's snapshot.
    async fn save(&self, room_id: &str, snapshot: MapSnapshot) -> StoreResult<SaveAck>;

    /// Create-if-absent load: an absent room yields an empty snapshot.
    async fn load_or_empty(&self, room_id: &str) -> StoreResult<MapSnapshot> {
        match self.load(room_id).await {
            Err(StoreError::NotFound(_)) => Ok(MapSnapshot::empty(room_id)),
            other => other,
        }
    }
}
