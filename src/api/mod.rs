pub mod errors;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/scans", axum::routing::get(routes::scans::list_recent))
        .route(
            "/api/vulnerabilities",
            axum::routing::get(routes::vulnerabilities::list_ranked),
        )
        .route("/api/stats", axum::routing::get(routes::stats::get_stats))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
