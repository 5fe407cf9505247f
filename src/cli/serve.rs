use tracing::{error, info};

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::errors::DashError;
use crate::store::{SharedStore, Store};

pub async fn handle_serve(args: ServeArgs) -> Result<(), DashError> {
    let shared = SharedStore::new();

    // The listener comes up before the store finishes connecting; requests
    // racing the bootstrap get a 503 rather than queueing behind it.
    let bootstrap = shared.clone();
    let db_path = args.db.clone();
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || Store::open(&db_path)).await {
            Ok(Ok(store)) => {
                info!("Connected to record store");
                bootstrap.attach(store);
            }
            Ok(Err(e)) => {
                error!(error = %e, "Record store connection failed");
                bootstrap.fail(e.to_string());
            }
            Err(e) => {
                error!(error = %e, "Record store bootstrap task failed");
                bootstrap.fail(e.to_string());
            }
        }
    });

    let app = api::build_router(api::AppState { store: shared });

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| DashError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
