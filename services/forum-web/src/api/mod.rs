//! HTTP 接口

pub mod cookies;
pub mod error;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/metrics", get(routes::metrics))
        .route("/signin", post(routes::sign_in))
        .route("/signout", get(routes::sign_out_route))
        .route("/me", get(routes::me))
        .route("/rate", post(routes::rate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
