//! Zone API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // Single GET route; other methods get 405 from the router
    Router::new().route("/zonas", get(handler::list))
}
