pub mod advisor;
mod dto;
pub mod extract;
pub mod handlers;
mod prompts;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::coach_routes()
}
