use axum::Json;
use serde_json::{json, Value};

/// Liveness only; deliberately does not touch the record store.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
