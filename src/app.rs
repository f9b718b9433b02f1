use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/add_sleep", post(handlers::add_sleep))
        .route("/goal", get(handlers::goal))
        .route("/set_goal", post(handlers::set_goal))
        .route("/api/state", get(handlers::get_state))
        .with_state(state)
}
