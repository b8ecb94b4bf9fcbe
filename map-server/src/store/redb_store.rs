//! redb-based map snapshot storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `maps` | `room_id` | `MapSnapshot` (JSON) | One snapshot per room |
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns, using
//! copy-on-write with an atomic pointer swap, so the database file is
//! always in a consistent state even across power loss. A failed
//! validation never opens a write transaction at all.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::MapSnapshot;

use super::{MapStore, SaveAck, StoreError, StoreResult};

/// Table for storing snapshots: key = room_id, value = JSON-serialized MapSnapshot
const MAPS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("maps");

/// Map storage backed by redb
#[derive(Clone)]
pub struct RedbMapStore {
    db: Arc<Database>,
}

impl RedbMapStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Create the table if it doesn't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(MAPS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read_snapshot(&self, room_id: &str) -> StoreResult<Option<MapSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MAPS_TABLE)?;
        match table.get(room_id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes.value())?)),
            None => Ok(None),
        }
    }

    fn write_snapshot(&self, room_id: &str, bytes: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(MAPS_TABLE)?;
            table.insert(room_id, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl MapStore for RedbMapStore {
    async fn load(&self, room_id: &str) -> StoreResult<MapSnapshot> {
        self.read_snapshot(room_id)?
            .ok_or_else(|| StoreError::NotFound(room_id.to_string()))
    }

    async fn save(&self, room_id: &str, snapshot: MapSnapshot) -> StoreResult<SaveAck> {
        // Validate before any durable write
        snapshot.validate()?;

        let bytes = serde_json::to_vec(&snapshot)?;
        self.write_snapshot(room_id, &bytes)?;

        tracing::debug!(
            room_id = %room_id,
            elements = snapshot.elements.len(),
            zones = snapshot.zones.len(),
            "Map snapshot saved"
        );

        Ok(SaveAck::now(room_id))
    }
}
