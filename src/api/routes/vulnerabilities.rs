use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::api::errors::error_response;
use crate::api::AppState;
use crate::models::VulnerabilityRecord;
use crate::query;

pub async fn list_ranked(
    State(state): State<AppState>,
) -> Result<Json<Vec<VulnerabilityRecord>>, (StatusCode, Json<Value>)> {
    let store = state.store.get().map_err(|e| error_response(&e, "vulnerabilities"))?;
    let vulns = query::ranked_vulnerabilities(&store, query::RANKED_VULNERABILITIES_LIMIT)
        .map_err(|e| error_response(&e, "vulnerabilities"))?;
    Ok(Json(vulns))
}
