//! Zone Model and Registry

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::snapshot::MapElement;

/// Fill color for elements without a resolvable zone
pub const DEFAULT_ZONE_COLOR: &str = "#ccc";

/// Zone entity (区域：平台、看台、包厢等)
///
/// Lookup/decoration only; zones have no behavior of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            room_id: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Seat count for one zone, in zone display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOccupancy {
    pub zone_id: String,
    pub name: String,
    pub seat_count: usize,
}

/// O(1) zone lookup, built once per snapshot load.
///
/// Immutable after construction; safe to read from concurrent renderers.
/// Iteration preserves the insertion order of the snapshot's `zones`
/// array. A miss is a normal case and means "render with the default
/// color", not an error.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    index: HashMap<String, usize>,
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Build from a snapshot's zone list. Duplicate ids: first wins.
    pub fn from_zones(zones: &[Zone]) -> Self {
        let mut registry = Self::default();
        for zone in zones {
            if !registry.index.contains_key(&zone.id) {
                registry.index.insert(zone.id.clone(), registry.zones.len());
                registry.zones.push(zone.clone());
            }
        }
        registry
    }

    pub fn lookup(&self, zone_id: &str) -> Option<&Zone> {
        self.index.get(zone_id).map(|&i| &self.zones[i])
    }

    pub fn contains(&self, zone_id: &str) -> bool {
        self.index.contains_key(zone_id)
    }

    /// Fill color for an element, falling back to [`DEFAULT_ZONE_COLOR`]
    /// when the element has no zone or the zone is unknown/colorless.
    pub fn color_for(&self, zone_id: Option<&str>) -> &str {
        zone_id
            .and_then(|id| self.lookup(id))
            .and_then(|zone| zone.color.as_deref())
            .unwrap_or(DEFAULT_ZONE_COLOR)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Seats per zone, in zone insertion order.
    ///
    /// Counts are commutative over `elements`; reordering the element
    /// array never changes the result. Seats without a resolvable zone
    /// are not counted.
    pub fn seat_count_by_zone(&self, elements: &[MapElement]) -> Vec<ZoneOccupancy> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for element in elements {
            if let MapElement::Seat(seat) = element
                && let Some(zone_id) = seat.zone_id.as_deref()
                && self.contains(zone_id)
            {
                *counts.entry(zone_id).or_insert(0) += 1;
            }
        }
        self.zones
            .iter()
            .map(|zone| ZoneOccupancy {
                zone_id: zone.id.clone(),
                name: zone.name.clone(),
                seat_count: counts.get(zone.id.as_str()).copied().unwrap_or(0),
            })
            .collect()
    }
}
