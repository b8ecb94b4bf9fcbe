//! Shared types for the seating-map service
//!
//! Pure domain types and logic used by the map server and its clients:
//! the map model (seats, tables, zones), derived seat status, snapshot
//! validation, and the editor session state. No I/O in this crate.

pub mod models;
pub mod session;

// Re-exports
pub use models::{
    Dimensions, MapElement, MapSnapshot, Position, Seat, SeatShape, SeatState, SeatStatus, Table,
    ValidationError, ValidationErrorKind, Zone, ZoneOccupancy, ZoneRegistry, DEFAULT_ZONE_COLOR,
};
pub use session::{EditorSession, SessionError};
pub use serde::{Deserialize, Serialize};
