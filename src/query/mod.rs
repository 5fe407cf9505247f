//! The two read shapes the dashboard needs, with fixed ordering and bounds.
//! Both are pure reads; results are deterministic for a given store state,
//! and an empty collection yields an empty vec, never an error.

use crate::errors::DashError;
use crate::models::{ScanRecord, VulnerabilityRecord};
use crate::store::{Collection, Direction, Filter, Store};

/// Dashboards show recency, not completeness; 50 bounds the payload.
pub const RECENT_SCANS_LIMIT: usize = 50;
pub const RANKED_VULNERABILITIES_LIMIT: usize = 100;

/// Most recent scans first.
pub fn recent_scans(store: &Store, limit: usize) -> Result<Vec<ScanRecord>, DashError> {
    let docs = store.query(
        Collection::Scans,
        &Filter::none(),
        &[("created_at", Direction::Desc)],
        limit,
    )?;
    docs.into_iter()
        .map(|doc| {
            serde_json::from_value(doc)
                .map_err(|e| DashError::Query(format!("Malformed scan record: {}", e)))
        })
        .collect()
}

/// Most severe findings first, ties broken by recency. Severity ordering is
/// the enum's rank; the store guarantees it never degrades to a
/// lexicographic sort of the severity string.
pub fn ranked_vulnerabilities(
    store: &Store,
    limit: usize,
) -> Result<Vec<VulnerabilityRecord>, DashError> {
    let docs = store.query(
        Collection::Vulnerabilities,
        &Filter::none(),
        &[("severity", Direction::Desc), ("created_at", Direction::Desc)],
        limit,
    )?;
    docs.into_iter()
        .map(|doc| {
            serde_json::from_value(doc)
                .map_err(|e| DashError::Query(format!("Malformed vulnerability record: {}", e)))
        })
        .collect()
}
