//! Map API 模块

mod handler;

pub use handler::{SaveMapRequest, SaveMapResponse};

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/mapas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{room_id}", get(handler::get_map))
        .route("/{room_id}/save", post(handler::save_map))
        .route("/{room_id}/ocupacion", get(handler::occupancy))
}
