use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::errors::DashError;

/// Maps a core failure to the dashboard's error shape, logging it once at
/// the boundary. Store-not-connected is retryable (503); everything else is
/// reported as the operation's fixed 500 message so driver internals never
/// leak to the client.
pub fn error_response(err: &DashError, operation: &str) -> (StatusCode, Json<Value>) {
    match err {
        DashError::StoreUnavailable => {
            warn!(operation, "Request rejected: record store not connected");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "Database not connected"})))
        }
        other => {
            error!(operation, error = %other, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("Failed to fetch {}", operation)})),
            )
        }
    }
}
