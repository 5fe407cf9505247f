use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    /// The record store connection is not established (or was lost).
    /// Retryable from the caller's perspective; HTTP 503 at the boundary.
    #[error("Database not connected")]
    StoreUnavailable,

    /// An index-backed query or count failed for a reason other than
    /// unavailability. HTTP 500 at the boundary.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
