//! Shared application state for the metricsink server.
//!
//! The store is opened and its table bound once in `main`, then handed in
//! here; handlers only ever see it through `AppState`.

use std::sync::Arc;

use crate::storage::MetricStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: MetricStore,
}

impl AppState {
    pub fn new(store: MetricStore) -> Self {
        tracing::debug!(table = %store.table(), "app state bound to table");
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &MetricStore {
        &self.inner.store
    }
}
