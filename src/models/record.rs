use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::severity::Severity;

/// One completed reconnaissance run, written by the external scanner.
/// Everything beyond the indexed fields is scanner-defined payload and is
/// carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// One discovered finding against a target. Correlated with a scan's
/// `domain` by convention only; the scanner enforces no referential
/// integrity between the two collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub id: String,
    pub target: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}
