//! Account registration and credential verification.
//!
//! Accounts live in the `accounts` collection, one document per hardware
//! ID: `{hardware_id, password_hash, salt}`. The store's uniqueness is
//! enforced here by a lookup before insert; verification treats anything
//! other than exactly one match as a failure.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use passbox_storage::{DocumentStore, Filter};

use crate::crypto::{digest_eq, generate_salt, salt_hash};
use crate::error::AccountError;

/// The collection holding account documents.
const ACCOUNTS: &str = "accounts";

/// A registered account.
///
/// The password itself is never stored; `password_hash` is the salted
/// SHA-512 digest computed by [`crate::crypto::salt_hash`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Client-supplied identifier, unique per account.
    pub hardware_id: String,
    /// Hex-encoded salted password digest.
    pub password_hash: String,
    /// Per-account random salt, base64.
    pub salt: String,
}

/// Creates accounts and verifies credentials against the store.
pub struct AccountManager {
    store: Arc<dyn DocumentStore>,
}

impl AccountManager {
    /// Create a manager over the given document store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Register a new account for `hardware_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidHardwareId`] for an empty hardware
    /// ID, [`AccountError::Duplicate`] if an account already exists for
    /// it, or a storage error.
    pub async fn register(&self, hardware_id: &str, password: &str) -> Result<(), AccountError> {
        // Placeholder format gate — the contract is "any non-empty string".
        if hardware_id.is_empty() {
            return Err(AccountError::InvalidHardwareId);
        }

        let salt = generate_salt();
        let account = Account {
            hardware_id: hardware_id.to_owned(),
            password_hash: salt_hash(password, &salt),
            salt,
        };

        // The duplicate check and the insert must be one atomic store
        // operation: a lookup followed by a plain insert would let two
        // concurrent registrations both pass the check.
        let inserted = self
            .store
            .insert_unique(ACCOUNTS, &by_hardware_id(hardware_id), to_document(&account)?)
            .await?;
        if !inserted {
            return Err(AccountError::Duplicate);
        }

        debug!(hardware_id, "account registered");
        Ok(())
    }

    /// Verify `password` against the account stored for `hardware_id`.
    ///
    /// Zero matches, more than one match (impossible under `register`'s
    /// invariant, but treated as failure anyway), and a digest mismatch
    /// all collapse into the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] on any verification
    /// failure, or a storage error.
    pub async fn verify(&self, hardware_id: &str, password: &str) -> Result<Account, AccountError> {
        let mut found = self.store.find(ACCOUNTS, &by_hardware_id(hardware_id)).await?;
        if found.len() != 1 {
            return Err(AccountError::InvalidCredentials);
        }

        let document = found.remove(0);
        let account: Account = serde_json::from_value(Value::Object(document))
            .map_err(|e| AccountError::Internal {
                reason: format!("account document decode failed: {e}"),
            })?;

        if !digest_eq(&salt_hash(password, &account.salt), &account.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}

impl std::fmt::Debug for AccountManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountManager").finish_non_exhaustive()
    }
}

/// Equality filter on the hardware ID field.
fn by_hardware_id(hardware_id: &str) -> Filter {
    let mut filter = Filter::new();
    filter.insert("hardware_id".to_owned(), Value::String(hardware_id.to_owned()));
    filter
}

/// Serialize an account into a store document.
fn to_document(account: &Account) -> Result<passbox_storage::Document, AccountError> {
    match serde_json::to_value(account) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AccountError::Internal {
            reason: "account serialized to a non-object".to_owned(),
        }),
        Err(e) => Err(AccountError::Internal {
            reason: format!("account serialization failed: {e}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use passbox_storage::MemoryStore;
    use serde_json::json;

    fn manager_with_store() -> (AccountManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AccountManager::new(Arc::clone(&store) as Arc<dyn DocumentStore>), store)
    }

    #[tokio::test]
    async fn register_then_verify_roundtrip() {
        let (manager, _) = manager_with_store();
        manager.register("dev1", "pw").await.unwrap();

        let account = manager.verify("dev1", "pw").await.unwrap();
        assert_eq!(account.hardware_id, "dev1");
        assert_eq!(account.password_hash, salt_hash("pw", &account.salt));
    }

    #[tokio::test]
    async fn verify_wrong_password_fails() {
        let (manager, _) = manager_with_store();
        manager.register("dev1", "pw").await.unwrap();

        let result = manager.verify("dev1", "wrong").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn verify_unknown_hardware_id_fails() {
        let (manager, _) = manager_with_store();
        let result = manager.verify("ghost", "pw").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let (manager, store) = manager_with_store();
        manager.register("dev1", "pw").await.unwrap();

        let result = manager.register("dev1", "other").await;
        assert!(matches!(result, Err(AccountError::Duplicate)));

        // Exactly one account document for the ID.
        let mut filter = Filter::new();
        filter.insert("hardware_id".to_owned(), json!("dev1"));
        let found = store.find("accounts", &filter).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registration_stores_exactly_one_account() {
        let store = Arc::new(MemoryStore::new());
        let manager = Arc::new(AccountManager::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = Arc::clone(&manager);
            handles.push(tokio::spawn(
                async move { manager.register("dev1", "pw").await },
            ));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);

        // Exactly one account document, and it still verifies.
        let mut filter = Filter::new();
        filter.insert("hardware_id".to_owned(), json!("dev1"));
        let found = store.find("accounts", &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        manager.verify("dev1", "pw").await.unwrap();
    }

    #[tokio::test]
    async fn empty_hardware_id_is_rejected() {
        let (manager, _) = manager_with_store();
        let result = manager.register("", "pw").await;
        assert!(matches!(result, Err(AccountError::InvalidHardwareId)));
    }

    #[tokio::test]
    async fn verify_treats_multiple_matches_as_failure() {
        // Bypass register to plant two documents for the same ID; verify
        // must not pick one arbitrarily.
        let (manager, store) = manager_with_store();
        for _ in 0..2 {
            let salt = generate_salt();
            let doc = json!({
                "hardware_id": "dev1",
                "password_hash": salt_hash("pw", &salt),
                "salt": salt,
            });
            if let Value::Object(doc) = doc {
                store.insert("accounts", doc).await.unwrap();
            }
        }

        let result = manager.verify("dev1", "pw").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn accounts_get_distinct_salts() {
        let (manager, _) = manager_with_store();
        manager.register("dev1", "pw").await.unwrap();
        manager.register("dev2", "pw").await.unwrap();

        let a = manager.verify("dev1", "pw").await.unwrap();
        let b = manager.verify("dev2", "pw").await.unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_hash, b.password_hash);
    }
}
