use axum::Router;

use crate::db::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::asset_routes()
}
