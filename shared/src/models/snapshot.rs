//! Map Snapshot and Validation
//!
//! 地图快照是客户端和服务端之间交换的完整序列化表示。
//! 持久化按整体快照进行，不做增量更新。
//!
//! # Wire format
//!
//! The JSON vocabulary follows the existing clients: `contenido` for the
//! element list, `zonas` for the zone list, `roomId` for the room key.
//! Elements are tagged by `type` (`seat` | `table`).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::seat::Seat;
use super::table::Table;
use super::zone::{Zone, ZoneRegistry};

/// A placed map element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapElement {
    Seat(Seat),
    Table(Table),
}

impl MapElement {
    pub fn id(&self) -> &str {
        match self {
            MapElement::Seat(seat) => &seat.id,
            MapElement::Table(table) => &table.id,
        }
    }

    pub fn zone_id(&self) -> Option<&str> {
        match self {
            MapElement::Seat(seat) => seat.zone_id.as_deref(),
            MapElement::Table(table) => table.zone_id.as_deref(),
        }
    }

    pub fn as_seat(&self) -> Option<&Seat> {
        match self {
            MapElement::Seat(seat) => Some(seat),
            MapElement::Table(_) => None,
        }
    }
}

/// Full serialized state of a room's map at a point in time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(rename = "roomId")]
    pub room_id: String,
    #[serde(rename = "contenido", default)]
    pub elements: Vec<MapElement>,
    #[serde(rename = "zonas", default)]
    pub zones: Vec<Zone>,
}

impl MapSnapshot {
    /// Empty map for a room (create-if-absent default)
    pub fn empty(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            elements: Vec::new(),
            zones: Vec::new(),
        }
    }

    /// Build the zone registry for this snapshot
    pub fn registry(&self) -> ZoneRegistry {
        ZoneRegistry::from_zones(&self.zones)
    }

    /// Find an element by id
    pub fn element(&self, id: &str) -> Option<&MapElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Validate the snapshot.
    ///
    /// Checks run in order and short-circuit on the first failure,
    /// naming the first offending element:
    ///
    /// 1. `roomId` present and non-empty
    /// 2. element ids unique
    /// 3. every non-null `zoneId` resolves in `zones`
    /// 4. every seat's shape carries its required size fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_id.trim().is_empty() {
            return Err(ValidationError::missing_room_id());
        }

        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(ValidationError::duplicate_id(element.id()));
            }
        }

        let registry = self.registry();
        for element in &self.elements {
            if let Some(zone_id) = element.zone_id()
                && !registry.contains(zone_id)
            {
                return Err(ValidationError::unknown_zone(element.id()));
            }
        }

        for element in &self.elements {
            if let MapElement::Seat(seat) = element
                && !seat.has_valid_dimensions()
            {
                return Err(ValidationError::invalid_shape(&seat.id));
            }
        }

        Ok(())
    }
}

/// Which validation check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationErrorKind {
    MissingRoomId,
    DuplicateId,
    UnknownZone,
    InvalidShape,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationErrorKind::MissingRoomId => "missing-room-id",
            ValidationErrorKind::DuplicateId => "duplicate-id",
            ValidationErrorKind::UnknownZone => "unknown-zone",
            ValidationErrorKind::InvalidShape => "invalid-shape",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failing check and the element that triggered it.
///
/// Only the first failure is reported, not every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl ValidationError {
    pub fn missing_room_id() -> Self {
        Self {
            kind: ValidationErrorKind::MissingRoomId,
            element_id: None,
        }
    }

    pub fn duplicate_id(element_id: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::DuplicateId,
            element_id: Some(element_id.into()),
        }
    }

    pub fn unknown_zone(element_id: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::UnknownZone,
            element_id: Some(element_id.into()),
        }
    }

    pub fn invalid_shape(element_id: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidShape,
            element_id: Some(element_id.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element_id {
            Some(id) => write!(f, "{} (element {})", self.kind, id),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimensions, Position};

    fn rect_seat(id: &str) -> MapElement {
        MapElement::Seat(Seat::rect(id, Position::new(100.0, 100.0), 20.0, 20.0))
    }

    #[test]
    fn single_rect_seat_no_zones_is_valid() {
        // One rect seat at (100,100), zoneId null, zero zones
        let snapshot = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![rect_seat("s1")],
            zones: vec![],
        };
        assert!(snapshot.validate().is_ok());
        // Null zone renders with the default color
        let registry = snapshot.registry();
        assert_eq!(registry.color_for(None), crate::models::DEFAULT_ZONE_COLOR);
    }

    #[test]
    fn empty_room_id_fails_first() {
        // Even with a broken element list, check 1 fires first
        let snapshot = MapSnapshot {
            room_id: "  ".into(),
            elements: vec![rect_seat("dup"), rect_seat("dup")],
            zones: vec![],
        };
        assert_eq!(
            snapshot.validate().unwrap_err(),
            ValidationError::missing_room_id()
        );
    }

    #[test]
    fn duplicate_element_id_reported_before_zone_check() {
        let mut orphan = Seat::rect("dup", Position::default(), 20.0, 20.0);
        orphan.zone_id = Some("ghost".into());
        let snapshot = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![rect_seat("dup"), MapElement::Seat(orphan)],
            zones: vec![],
        };
        assert_eq!(
            snapshot.validate().unwrap_err(),
            ValidationError::duplicate_id("dup")
        );
    }

    #[test]
    fn unknown_zone_names_the_offending_seat() {
        let mut seat = Seat::rect("s7", Position::default(), 20.0, 20.0);
        seat.zone_id = Some("z1".into());
        let snapshot = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![MapElement::Seat(seat)],
            zones: vec![],
        };
        let err = snapshot.validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownZone);
        assert_eq!(err.element_id.as_deref(), Some("s7"));
    }

    #[test]
    fn table_zone_references_are_checked_too() {
        let mut table = Table::new(
            "t1",
            "Mesa 1",
            Position::default(),
            Dimensions {
                width: 80.0,
                height: 60.0,
            },
        );
        table.zone_id = Some("missing".into());
        let snapshot = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![MapElement::Table(table)],
            zones: vec![],
        };
        assert_eq!(
            snapshot.validate().unwrap_err(),
            ValidationError::unknown_zone("t1")
        );
    }

    #[test]
    fn rect_without_height_is_invalid_shape() {
        let mut seat = Seat::rect("s1", Position::default(), 20.0, 20.0);
        seat.height = None;
        let snapshot = MapSnapshot {
            room_id: "sala-1".into(),
            elements: vec![MapElement::Seat(seat)],
            zones: vec![],
        };
        assert_eq!(
            snapshot.validate().unwrap_err(),
            ValidationError::invalid_shape("s1")
        );
    }

    #[test]
    fn wire_round_trip_keeps_spanish_field_names() {
        let raw = r##"{
            "roomId": "sala-9",
            "contenido": [
                {"type": "seat", "id": "s1", "shape": "circle",
                 "position": {"x": 10, "y": 20}, "radius": 12, "zoneId": "z1"},
                {"type": "table", "id": "t1", "name": "Mesa",
                 "position": {"x": 50, "y": 50},
                 "dimensions": {"width": 80, "height": 60}}
            ],
            "zonas": [{"id": "z1", "name": "Platea", "color": "#aa0000"}]
        }"##;
        let snapshot: MapSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.elements.len(), 2);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("contenido").is_some());
        assert!(json.get("zonas").is_some());
        assert_eq!(json["contenido"][0]["type"], "seat");
    }

    #[test]
    fn unknown_shape_is_a_decode_error_not_a_validation_error() {
        let raw = r#"{
            "roomId": "sala-1",
            "contenido": [{"type": "seat", "id": "s1", "shape": "triangle"}],
            "zonas": []
        }"#;
        assert!(serde_json::from_str::<MapSnapshot>(raw).is_err());
    }
}
