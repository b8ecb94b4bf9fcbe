//! In-memory map store
//!
//! Same contract as the redb store, backed by a `DashMap`. Used by
//! tests and suitable for ephemeral tooling; nothing survives a
//! restart.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use shared::MapSnapshot;

use super::{MapStore, SaveAck, StoreError, StoreResult};

#[derive(Clone, Default)]
pub struct MemoryMapStore {
    maps: Arc<DashMap<String, MapSnapshot>>,
}

impl MemoryMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

#[async_trait]
impl MapStore for MemoryMapStore {
    async fn load(&self, room_id: &str) -> StoreResult<MapSnapshot> {
        self.maps
            .get(room_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(room_id.to_string()))
    }

    async fn save(&self, room_id: &str, snapshot: MapSnapshot) -> StoreResult<SaveAck> {
        snapshot.validate()?;
        self.maps.insert(room_id.to_string(), snapshot);
        Ok(SaveAck::now(room_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{MapElement, Position, Seat};

    #[tokio::test]
    async fn behaves_like_the_durable_store() {
        let store = MemoryMapStore::new();
        assert!(matches!(
            store.load("sala-1").await,
            Err(StoreError::NotFound(_))
        ));

        let snap = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![MapElement::Seat(Seat::circle(
                "s1",
                Position::new(5.0, 5.0),
                10.0,
            ))],
            zones: vec![],
        };
        store.save("sala-1", snap).await.unwrap();
        assert_eq!(store.len(), 1);

        let loaded = store.load("sala-1").await.unwrap();
        assert_eq!(loaded.elements[0].id(), "s1");
    }

    #[tokio::test]
    async fn invalid_snapshot_rejected_without_insert() {
        let store = MemoryMapStore::new();
        let bad = MapSnapshot::empty(""); // empty roomId
        assert!(store.save("sala-1", bad).await.is_err());
        assert!(store.is_empty());
    }
}
