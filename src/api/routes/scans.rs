use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::api::errors::error_response;
use crate::api::AppState;
use crate::models::ScanRecord;
use crate::query;

pub async fn list_recent(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScanRecord>>, (StatusCode, Json<Value>)> {
    let store = state.store.get().map_err(|e| error_response(&e, "scans"))?;
    let scans = query::recent_scans(&store, query::RECENT_SCANS_LIMIT)
        .map_err(|e| error_response(&e, "scans"))?;
    Ok(Json(scans))
}
