//! Seat Lock API 模块

mod handler;

pub use handler::{LockRequest, SeatStatusEntry};

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/seat-locks", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/lock", post(handler::lock))
        .route("/release", post(handler::release))
        .route("/status", get(handler::status))
}
