use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::api::errors::error_response;
use crate::api::AppState;
use crate::stats::{summary_stats, SummaryStats};

pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<SummaryStats>, (StatusCode, Json<Value>)> {
    let store = state.store.get().map_err(|e| error_response(&e, "statistics"))?;
    let stats = summary_stats(&store).map_err(|e| error_response(&e, "statistics"))?;
    Ok(Json(stats))
}
