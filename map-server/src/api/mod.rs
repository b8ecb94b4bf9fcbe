//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`maps`] - 地图快照读写接口
//! - [`zones`] - 区域查询接口
//! - [`seat_locks`] - 座位锁接口

pub mod health;
pub mod maps;
pub mod seat_locks;
pub mod zones;

use axum::Router;

use crate::core::ServerState;

/// Assemble all resource routers
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(maps::router())
        .merge(zones::router())
        .merge(seat_locks::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
