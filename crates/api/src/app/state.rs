use std::sync::{Arc, Mutex, PoisonError};

use quickbasket_infra::Store;

/// Shared handle to the single store behind the server.
///
/// Every handler runs its whole read-check-write sequence under the lock, so
/// checkouts within this process are serialized.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Box<dyn Store>>>,
}

impl AppState {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut Box<dyn Store>) -> T) -> T {
        // Mutations are validated before they are applied, so a poisoned
        // lock still guards consistent state.
        let mut guard = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
