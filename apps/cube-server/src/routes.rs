// [apps/cube-server/src/routes.rs]
use crate::handlers::{dispatch, hello, not_found};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello).post(dispatch))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
