use std::sync::{Arc, RwLock};

use crate::errors::DashError;

use super::Store;

/// Bootstrap phase of the process-wide store connection. The server starts
/// accepting requests before the store finishes connecting, so the phase
/// begins `Uninitialized` and transitions exactly once.
enum StorePhase {
    Uninitialized,
    Connected(Store),
    Failed(String),
}

/// Shared handle injected into the query layer and the aggregation
/// reporter. While the phase is not `Connected`, every access fails fast
/// with [`DashError::StoreUnavailable`] instead of queueing or blocking.
#[derive(Clone)]
pub struct SharedStore {
    phase: Arc<RwLock<StorePhase>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self { phase: Arc::new(RwLock::new(StorePhase::Uninitialized)) }
    }

    /// Starts out already connected. Used by tests.
    pub fn with_store(store: Store) -> Self {
        Self { phase: Arc::new(RwLock::new(StorePhase::Connected(store))) }
    }

    /// Completes the bootstrap. Ignored unless the phase is still
    /// `Uninitialized`; the transition is one-way.
    pub fn attach(&self, store: Store) {
        let mut phase = self.phase.write().unwrap();
        if matches!(*phase, StorePhase::Uninitialized) {
            *phase = StorePhase::Connected(store);
        }
    }

    /// Marks the bootstrap as terminally failed.
    pub fn fail(&self, reason: String) {
        let mut phase = self.phase.write().unwrap();
        if matches!(*phase, StorePhase::Uninitialized) {
            *phase = StorePhase::Failed(reason);
        }
    }

    /// Fails fast with `StoreUnavailable` until the bootstrap completes.
    pub fn get(&self) -> Result<Store, DashError> {
        match &*self.phase.read().unwrap() {
            StorePhase::Connected(store) => Ok(store.clone()),
            StorePhase::Uninitialized | StorePhase::Failed(_) => Err(DashError::StoreUnavailable),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(&*self.phase.read().unwrap(), StorePhase::Connected(_))
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}
