//! Shared application state for the passbox server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the account manager and the record
//! gateway; there are no module-level singletons.

use std::sync::Arc;

use passbox_core::account::AccountManager;
use passbox_core::record::RecordGateway;
use passbox_storage::DocumentStore;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Account registration and credential verification.
    pub accounts: Arc<AccountManager>,
    /// Authenticated per-URL record storage.
    pub records: Arc<RecordGateway>,
}

impl AppState {
    /// Build the state over a document store, wiring the record gateway
    /// through the account manager it verifies against.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let accounts = Arc::new(AccountManager::new(Arc::clone(&store)));
        let records = Arc::new(RecordGateway::new(store, Arc::clone(&accounts)));
        Self { accounts, records }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
