pub mod demo;
pub mod health;

use axum::http::{header, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::bridge;
use crate::api::state::AppState;

/// `/health` is answered directly; everything else goes to the access-logged
/// handler in `state`.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.server.allowed_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .fallback(bridge::dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// The demo handler only reads bodies and their `Content-Type`.
fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}
