//! Seat Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Canvas position of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Seat outline shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatShape {
    Rect,
    Circle,
}

/// Editor-assigned base state (原始数据中的 estado 字段)
///
/// Stored with the seat. Distinct from [`SeatStatus`], which is derived
/// per render from the reservation fields and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    #[default]
    Available,
    Blocked,
    Selected,
}

/// Derived display status of a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Held,
    Reserved,
}

/// Seat entity (座位)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    pub shape: SeatShape,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Rect size (required when shape = rect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Circle size (required when shape = circle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub state: SeatState,
    /// Permanent reservation. Dominates any temporary hold.
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub reserved_permanently: bool,
    /// Hold expiry. Malformed values deserialize as absent (fail open).
    #[serde(
        default,
        with = "serde_helpers::lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub temporary_hold_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

impl Seat {
    /// Minimal rect seat with everything else defaulted
    pub fn rect(id: impl Into<String>, position: Position, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            shape: SeatShape::Rect,
            position,
            name: None,
            width: Some(width),
            height: Some(height),
            radius: None,
            state: SeatState::Available,
            reserved_permanently: false,
            temporary_hold_until: None,
            zone_id: None,
        }
    }

    /// Minimal circle seat
    pub fn circle(id: impl Into<String>, position: Position, radius: f64) -> Self {
        Self {
            id: id.into(),
            shape: SeatShape::Circle,
            position,
            name: None,
            width: None,
            height: None,
            radius: Some(radius),
            state: SeatState::Available,
            reserved_permanently: false,
            temporary_hold_until: None,
            zone_id: None,
        }
    }

    /// Resolve the display status at `now`.
    ///
    /// Permanent reservation is terminal and dominates a temporary hold,
    /// even one with a future expiry. Pure; safe to call on every render.
    pub fn status_at(&self, now: DateTime<Utc>) -> SeatStatus {
        if self.reserved_permanently {
            return SeatStatus::Reserved;
        }
        match self.temporary_hold_until {
            Some(until) if until > now => SeatStatus::Held,
            _ => SeatStatus::Available,
        }
    }

    /// Whether the shape carries the size fields it requires,
    /// all finite and positive.
    pub fn has_valid_dimensions(&self) -> bool {
        match self.shape {
            SeatShape::Rect => matches!(
                (self.width, self.height),
                (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
            ),
            SeatShape::Circle => {
                matches!(self.radius, Some(r) if r.is_finite() && r > 0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn seat() -> Seat {
        Seat::rect("s1", Position::new(100.0, 100.0), 20.0, 20.0)
    }

    #[test]
    fn permanent_reservation_dominates_future_hold() {
        let now = Utc::now();
        let mut s = seat();
        s.reserved_permanently = true;
        s.temporary_hold_until = Some(now + Duration::hours(2));
        assert_eq!(s.status_at(now), SeatStatus::Reserved);

        // Also when the hold is long expired
        s.temporary_hold_until = Some(now - Duration::hours(2));
        assert_eq!(s.status_at(now), SeatStatus::Reserved);
    }

    #[test]
    fn future_hold_resolves_held_then_flips_available() {
        let now = Utc::now();
        let mut s = seat();
        s.temporary_hold_until = Some(now + Duration::minutes(15));
        assert_eq!(s.status_at(now), SeatStatus::Held);

        // Once `now` passes the expiry, same record resolves available
        let later = now + Duration::minutes(16);
        assert_eq!(s.status_at(later), SeatStatus::Available);
        // Re-evaluation is idempotent
        assert_eq!(s.status_at(later), SeatStatus::Available);
    }

    #[test]
    fn hold_expiring_exactly_now_is_available() {
        let now = Utc::now();
        let mut s = seat();
        s.temporary_hold_until = Some(now);
        assert_eq!(s.status_at(now), SeatStatus::Available);
    }

    #[test]
    fn no_reservation_data_is_available() {
        assert_eq!(seat().status_at(Utc::now()), SeatStatus::Available);
    }

    #[test]
    fn malformed_hold_timestamp_fails_open() {
        let raw = r#"{
            "id": "s1",
            "shape": "rect",
            "position": {"x": 0, "y": 0},
            "width": 20,
            "height": 20,
            "temporaryHoldUntil": "garbage"
        }"#;
        let s: Seat = serde_json::from_str(raw).unwrap();
        assert!(s.temporary_hold_until.is_none());
        assert_eq!(s.status_at(Utc::now()), SeatStatus::Available);
    }

    #[test]
    fn dimension_check_per_shape() {
        let mut s = seat();
        assert!(s.has_valid_dimensions());
        s.width = None;
        assert!(!s.has_valid_dimensions());
        s.width = Some(-5.0);
        assert!(!s.has_valid_dimensions());

        let mut c = Seat::circle("c1", Position::default(), 10.0);
        assert!(c.has_valid_dimensions());
        c.radius = Some(f64::NAN);
        assert!(!c.has_valid_dimensions());
        // A circle does not need rect fields
        c.radius = Some(10.0);
        c.width = None;
        c.height = None;
        assert!(c.has_valid_dimensions());
    }
}
