//! Table Model

use serde::{Deserialize, Serialize};

use super::seat::Position;

/// Width/height of a table footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Table entity (桌台)
///
/// Purely spatial: tables carry no reservation semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Position,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

impl Table {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        dimensions: Dimensions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            dimensions,
            zone_id: None,
        }
    }
}
