//! Authenticated per-URL record storage.
//!
//! Records live in the `passwords` collection, at most one per
//! `(hardware_id, url)` pair: `{hardware_id, url, info}`. Every operation
//! verifies credentials through the account manager before touching the
//! store. Writes go through the store's upsert so the pair invariant
//! holds without any locking here.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use passbox_storage::{Document, DocumentStore, Filter};

use crate::account::AccountManager;
use crate::error::RecordError;

/// The collection holding record documents.
const PASSWORDS: &str = "passwords";

/// Authenticated get/set of per-URL info blobs.
pub struct RecordGateway {
    store: Arc<dyn DocumentStore>,
    accounts: Arc<AccountManager>,
}

impl RecordGateway {
    /// Create a gateway over the given store and account manager.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, accounts: Arc<AccountManager>) -> Self {
        Self { store, accounts }
    }

    /// Store `info` for `(hardware_id, url)`, replacing any previous
    /// blob entirely.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::AccountError::InvalidCredentials`] from
    /// verification, or a storage error.
    pub async fn put(
        &self,
        hardware_id: &str,
        url: &str,
        password: &str,
        info: serde_json::Map<String, Value>,
    ) -> Result<(), RecordError> {
        self.accounts.verify(hardware_id, password).await?;

        let mut update = Document::new();
        update.insert("info".to_owned(), Value::Object(info));
        self.store
            .upsert(PASSWORDS, &by_record(hardware_id, url), update)
            .await?;
        debug!(hardware_id, url, "record stored");
        Ok(())
    }

    /// Fetch the info blob stored for `(hardware_id, url)`.
    ///
    /// Anything other than exactly one match is reported as not found —
    /// and reported immediately, before any attempt to read a result.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::AccountError::InvalidCredentials`] from
    /// verification, returns [`RecordError::NotFound`] when no record is
    /// stored for the pair, or a storage error.
    pub async fn get(
        &self,
        hardware_id: &str,
        url: &str,
        password: &str,
    ) -> Result<Value, RecordError> {
        self.accounts.verify(hardware_id, password).await?;

        let mut found = self
            .store
            .find(PASSWORDS, &by_record(hardware_id, url))
            .await?;
        if found.len() != 1 {
            return Err(RecordError::NotFound {
                url: url.to_owned(),
            });
        }

        let mut document = found.remove(0);
        document.remove("info").ok_or_else(|| RecordError::Internal {
            reason: format!("record for '{url}' has no info field"),
        })
    }
}

impl std::fmt::Debug for RecordGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordGateway").finish_non_exhaustive()
    }
}

/// Equality filter on the (hardware ID, URL) pair.
fn by_record(hardware_id: &str, url: &str) -> Filter {
    let mut filter = Filter::new();
    filter.insert("hardware_id".to_owned(), Value::String(hardware_id.to_owned()));
    filter.insert("url".to_owned(), Value::String(url.to_owned()));
    filter
}
