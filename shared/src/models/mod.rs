//! Map Domain Models
//!
//! # 模块结构
//!
//! - [`seat`] - 座位实体和状态推导
//! - [`table`] - 桌台实体 (纯空间数据)
//! - [`zone`] - 区域实体和 [`ZoneRegistry`]
//! - [`snapshot`] - 地图快照和校验

pub mod seat;
pub mod serde_helpers;
pub mod snapshot;
pub mod table;
pub mod zone;

// Re-exports
pub use seat::{Position, Seat, SeatShape, SeatState, SeatStatus};
pub use snapshot::{MapElement, MapSnapshot, ValidationError, ValidationErrorKind};
pub use table::{Dimensions, Table};
pub use zone::{Zone, ZoneOccupancy, ZoneRegistry, DEFAULT_ZONE_COLOR};
