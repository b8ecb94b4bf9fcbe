//! Zone API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::Zone;

use crate::core::ServerState;
use crate::utils::validation::require_field;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ZonesQuery {
    #[serde(rename = "salaId")]
    pub sala_id: Option<String>,
}

/// GET /zonas?salaId=... - 按场厅列出区域
///
/// Returns the plain zone list sorted by name; a room with no saved map
/// has no zones.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ZonesQuery>,
) -> AppResult<Json<Vec<Zone>>> {
    let sala_id = require_field(query.sala_id, "salaId")?;

    let snapshot = state.store.load_or_empty(&sala_id).await?;
    let mut zones = snapshot.zones;
    zones.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(zones))
}
