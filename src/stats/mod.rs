//! Composite summary statistics for the dashboard header.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::DashError;
use crate::models::Severity;
use crate::store::{Collection, Filter, Store};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_scans: u64,
    pub total_vulnerabilities: u64,
    pub critical_count: u64,
    pub high_count: u64,
    pub generated_at: DateTime<Utc>,
}

/// Four independent counts against a store the scanner may be writing to
/// concurrently, so the result is a best-effort snapshot rather than a
/// transactionally consistent view. All-or-nothing: if any count fails, no
/// partial statistics object is returned.
pub fn summary_stats(store: &Store) -> Result<SummaryStats, DashError> {
    let total_scans = store.count(Collection::Scans, &Filter::none())?;
    let total_vulnerabilities = store.count(Collection::Vulnerabilities, &Filter::none())?;
    let critical_count = store.count(
        Collection::Vulnerabilities,
        &Filter::eq("severity", Severity::Critical.as_str()),
    )?;
    let high_count = store.count(
        Collection::Vulnerabilities,
        &Filter::eq("severity", Severity::High.as_str()),
    )?;

    Ok(SummaryStats {
        total_scans,
        total_vulnerabilities,
        critical_count,
        high_count,
        generated_at: Utc::now(),
    })
}
