use tracing::info;

use crate::cli::commands::InitArgs;
use crate::errors::DashError;
use crate::store::Store;

/// Provisions the five collections and their indexes. `open` runs the
/// schema batch itself, and the batch is idempotent, so re-running `init`
/// against an existing database is a no-op.
pub async fn handle_init(args: InitArgs) -> Result<(), DashError> {
    let db_path = args.db.clone();
    let store = tokio::task::spawn_blocking(move || Store::open(&db_path))
        .await
        .map_err(|e| DashError::Internal(format!("Init task failed: {}", e)))??;
    store.ensure_schema()?;

    info!(db = %args.db, "Schema provisioned");
    println!("Schema provisioned: {}", args.db);
    Ok(())
}
