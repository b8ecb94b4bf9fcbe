//! Seat Lock API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Seat, SeatStatus};

use crate::core::ServerState;
use crate::locks::LockGrant;
use crate::utils::validation::require_field;
use crate::utils::{AppResponse, AppResult};

/// Lock / release payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRequest {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub seat_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl LockRequest {
    fn into_fields(self) -> AppResult<(String, String, String)> {
        Ok((
            require_field(self.room_id, "roomId")?,
            require_field(self.seat_id, "seatId")?,
            require_field(self.session_id, "sessionId")?,
        ))
    }
}

/// POST /seat-locks/lock - 锁定座位 (同会话重复调用延长锁)
///
/// 409 when another session holds the seat.
pub async fn lock(
    State(state): State<ServerState>,
    Json(payload): Json<LockRequest>,
) -> AppResult<Json<AppResponse<LockGrant>>> {
    let (room_id, seat_id, session_id) = payload.into_fields()?;

    let grant = state.locks.acquire(&room_id, &seat_id, &session_id)?;

    tracing::debug!(
        room_id = %room_id,
        seat_id = %seat_id,
        action = ?grant.action,
        "Seat lock granted"
    );

    Ok(Json(AppResponse::success(grant)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseResult {
    pub released: bool,
}

/// POST /seat-locks/release - 释放座位锁 (仅持有会话)
pub async fn release(
    State(state): State<ServerState>,
    Json(payload): Json<LockRequest>,
) -> AppResult<Json<AppResponse<ReleaseResult>>> {
    let (room_id, seat_id, session_id) = payload.into_fields()?;

    let released = state.locks.release(&room_id, &seat_id, &session_id);

    Ok(Json(AppResponse::success(ReleaseResult { released })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    #[serde(default)]
    pub room_id: Option<String>,
    /// Comma-separated seat ids; absent means every seat in the map
    #[serde(default)]
    pub seat_ids: Option<String>,
}

/// Resolved display status of one seat
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStatusEntry {
    pub seat_id: String,
    pub status: SeatStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// GET /seat-locks/status?roomId=...&seatIds=a,b - 查询座位状态
///
/// 每个座位按快照记录 + 当前锁推导: reserved | held | available。
pub async fn status(
    State(state): State<ServerState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<AppResponse<Vec<SeatStatusEntry>>>> {
    let room_id = require_field(query.room_id, "roomId")?;

    let snapshot = state.store.load_or_empty(&room_id).await?;
    let now = Utc::now();

    let seat_ids: Vec<String> = match query.seat_ids.as_deref() {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => snapshot
            .elements
            .iter()
            .filter_map(|e| e.as_seat())
            .map(|s| s.id.clone())
            .collect(),
    };

    let entries = seat_ids
        .into_iter()
        .map(|seat_id| {
            let seat = snapshot.element(&seat_id).and_then(|e| e.as_seat());
            let lock_until = state.locks.active_hold_until(&room_id, &seat_id);
            let (status, expires_at) = resolve(seat, lock_until, now);
            SeatStatusEntry {
                seat_id,
                status,
                expires_at,
            }
        })
        .collect();

    Ok(Json(AppResponse::success(entries)))
}

/// Combine the stored seat record with the live lock table.
///
/// The lock's expiry overrides the snapshot's (possibly stale) stored
/// hold; permanent reservation still dominates both.
fn resolve(
    seat: Option<&Seat>,
    lock_until: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (SeatStatus, Option<DateTime<Utc>>) {
    match seat {
        Some(seat) => {
            let mut effective = seat.clone();
            if lock_until.is_some() {
                effective.temporary_hold_until = lock_until;
            }
            let status = effective.status_at(now);
            let expires_at = match status {
                SeatStatus::Held => effective.temporary_hold_until,
                _ => None,
            };
            (status, expires_at)
        }
        // Seat not in the map: only the lock table can hold it
        None => match lock_until {
            Some(until) if until > now => (SeatStatus::Held, Some(until)),
            _ => (SeatStatus::Available, None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::Position;

    #[test]
    fn lock_overrides_stale_stored_hold() {
        let now = Utc::now();
        let mut seat = Seat::rect("s1", Position::default(), 20.0, 20.0);
        seat.temporary_hold_until = Some(now - Duration::hours(1)); // stale

        let lock_until = Some(now + Duration::minutes(10));
        let (status, expires) = resolve(Some(&seat), lock_until, now);
        assert_eq!(status, SeatStatus::Held);
        assert_eq!(expires, lock_until);
    }

    #[test]
    fn permanent_reservation_dominates_live_lock() {
        let now = Utc::now();
        let mut seat = Seat::rect("s1", Position::default(), 20.0, 20.0);
        seat.reserved_permanently = true;

        let (status, expires) = resolve(Some(&seat), Some(now + Duration::minutes(10)), now);
        assert_eq!(status, SeatStatus::Reserved);
        assert!(expires.is_none());
    }

    #[test]
    fn unknown_seat_resolves_from_lock_alone() {
        let now = Utc::now();
        let (status, _) = resolve(None, Some(now + Duration::minutes(5)), now);
        assert_eq!(status, SeatStatus::Held);

        let (status, _) = resolve(None, None, now);
        assert_eq!(status, SeatStatus::Available);
    }
}
