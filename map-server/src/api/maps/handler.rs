//! Map API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{MapElement, MapSnapshot, Zone, ZoneOccupancy};

use crate::core::ServerState;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult};

/// GET /mapas/:room_id - 获取场厅地图
///
/// 404 distinguishes "nothing saved yet" from an empty map.
pub async fn get_map(
    State(state): State<ServerState>,
    Path(room_id): Path<String>,
) -> AppResult<Json<AppResponse<MapSnapshot>>> {
    validate_required_text(&room_id, "roomId", MAX_SHORT_TEXT_LEN)?;
    let snapshot = state.store.load(&room_id).await?;
    Ok(Json(AppResponse::success(snapshot)))
}

/// Save payload: the full element list plus the zone list
#[derive(Debug, Deserialize)]
pub struct SaveMapRequest {
    /// Element list. Required; an empty list is a valid (cleared) map.
    #[serde(default)]
    pub contenido: Option<Vec<MapElement>>,
    #[serde(default)]
    pub zonas: Option<Vec<Zone>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMapResponse {
    pub success: bool,
    pub message: String,
    pub room_id: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /mapas/:room_id/save - 整体保存地图
///
/// 校验顺序: roomId → contenido 存在 → 快照校验。
/// 快照校验失败不会产生任何持久化写入。
pub async fn save_map(
    State(state): State<ServerState>,
    Path(room_id): Path<String>,
    Json(payload): Json<SaveMapRequest>,
) -> AppResult<Json<SaveMapResponse>> {
    validate_required_text(&room_id, "roomId", MAX_SHORT_TEXT_LEN)?;

    let contenido = payload
        .contenido
        .ok_or_else(|| AppError::bad_request("contenido is required"))?;

    let snapshot = MapSnapshot {
        room_id: room_id.clone(),
        elements: contenido,
        zones: payload.zonas.unwrap_or_default(),
    };

    let ack = state.store.save(&room_id, snapshot).await?;

    tracing::info!(room_id = %ack.room_id, "Map saved");

    Ok(Json(SaveMapResponse {
        success: true,
        message: "Mapa guardado".to_string(),
        room_id: ack.room_id,
        timestamp: ack.timestamp,
    }))
}

/// GET /mapas/:room_id/ocupacion - 每个区域的座位数
///
/// Zone-selector annotation data, in zone display order.
pub async fn occupancy(
    State(state): State<ServerState>,
    Path(room_id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<ZoneOccupancy>>>> {
    validate_required_text(&room_id, "roomId", MAX_SHORT_TEXT_LEN)?;
    let snapshot = state.store.load(&room_id).await?;
    let occupancy = snapshot.registry().seat_count_by_zone(&snapshot.elements);
    Ok(Json(AppResponse::success(occupancy)))
}
