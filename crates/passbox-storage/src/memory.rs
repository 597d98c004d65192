//! In-memory document store.
//!
//! Collections live in a `BTreeMap` behind a `RwLock`. Nothing is
//! persisted — all data is lost when the process exits. This is the
//! default runtime backend and the backend used by unit and integration
//! tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Document, DocumentStore, Filter, StoreError, matches};

/// An in-memory document store backed by a `BTreeMap` of collections.
///
/// Thread-safe and async-compatible. Cloning is cheap and clones share
/// the same underlying data.
///
/// # Examples
///
/// ```
/// # use passbox_storage::{MemoryStore, DocumentStore, Filter};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let doc = serde_json::json!({"hardware_id": "dev1"});
/// if let serde_json::Value::Object(doc) = doc {
///     store.insert("accounts", doc).await.unwrap();
/// }
/// let found = store.find("accounts", &Filter::new()).await.unwrap();
/// assert_eq!(found.len(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let found = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(found)
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn insert_unique(
        &self,
        collection: &str,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();

        if docs.iter().any(|doc| matches(doc, filter)) {
            return Ok(false);
        }
        docs.push(document);
        Ok(true)
    }

    async fn upsert(
        &self,
        collection: &str,
        filter: &Filter,
        update: Document,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();

        if let Some(existing) = docs.iter_mut().find(|doc| matches(doc, filter)) {
            for (field, value) in update {
                existing.insert(field, value);
            }
        } else {
            let mut document = Document::new();
            for (field, value) in filter {
                document.insert(field.clone(), value.clone());
            }
            for (field, value) in update {
                document.insert(field, value);
            }
            docs.push(document);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    fn filter_eq(field: &str, value: serde_json::Value) -> Filter {
        let mut filter = Filter::new();
        filter.insert(field.to_owned(), value);
        filter
    }

    #[tokio::test]
    async fn find_on_missing_collection_returns_empty() {
        let store = MemoryStore::new();
        let found = store.find("accounts", &Filter::new()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn insert_and_find_roundtrip() {
        let store = MemoryStore::new();
        store
            .insert("accounts", doc(json!({"hardware_id": "dev1"})))
            .await
            .unwrap();

        let found = store
            .find("accounts", &filter_eq("hardware_id", json!("dev1")))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("hardware_id"), Some(&json!("dev1")));
    }

    #[tokio::test]
    async fn find_filters_out_non_matching_documents() {
        let store = MemoryStore::new();
        store
            .insert("accounts", doc(json!({"hardware_id": "dev1"})))
            .await
            .unwrap();
        store
            .insert("accounts", doc(json!({"hardware_id": "dev2"})))
            .await
            .unwrap();

        let found = store
            .find("accounts", &filter_eq("hardware_id", json!("dev2")))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryStore::new();
        store
            .insert("accounts", doc(json!({"hardware_id": "dev1"})))
            .await
            .unwrap();

        let found = store.find("passwords", &Filter::new()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn insert_unique_inserts_when_nothing_matches() {
        let store = MemoryStore::new();
        let inserted = store
            .insert_unique(
                "accounts",
                &filter_eq("hardware_id", json!("dev1")),
                doc(json!({"hardware_id": "dev1"})),
            )
            .await
            .unwrap();
        assert!(inserted);

        let found = store.find("accounts", &Filter::new()).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn insert_unique_rejects_a_matching_document() {
        let store = MemoryStore::new();
        let filter = filter_eq("hardware_id", json!("dev1"));
        store
            .insert_unique("accounts", &filter, doc(json!({"hardware_id": "dev1", "n": 1})))
            .await
            .unwrap();
        let inserted = store
            .insert_unique("accounts", &filter, doc(json!({"hardware_id": "dev1", "n": 2})))
            .await
            .unwrap();
        assert!(!inserted);

        // The first document stands untouched.
        let found = store.find("accounts", &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("n"), Some(&json!(1)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn insert_unique_admits_exactly_one_writer() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for n in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_unique(
                        "accounts",
                        &filter_eq("hardware_id", json!("dev1")),
                        doc(json!({"hardware_id": "dev1", "n": n})),
                    )
                    .await
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);

        let found = store
            .find("accounts", &filter_eq("hardware_id", json!("dev1")))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn upsert_inserts_when_nothing_matches() {
        let store = MemoryStore::new();
        let mut filter = filter_eq("hardware_id", json!("dev1"));
        filter.insert("url".to_owned(), json!("site1"));

        store
            .upsert("passwords", &filter, doc(json!({"info": {"k": "v"}})))
            .await
            .unwrap();

        let found = store.find("passwords", &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("info"), Some(&json!({"k": "v"})));
    }

    #[tokio::test]
    async fn upsert_replaces_updated_field_wholly() {
        let store = MemoryStore::new();
        let filter = filter_eq("hardware_id", json!("dev1"));

        store
            .upsert("passwords", &filter, doc(json!({"info": {"a": 1, "b": 2}})))
            .await
            .unwrap();
        store
            .upsert("passwords", &filter, doc(json!({"info": {"a": 3}})))
            .await
            .unwrap();

        let found = store.find("passwords", &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        // Replaced, not merged: "b" is gone.
        assert_eq!(found[0].get("info"), Some(&json!({"a": 3})));
    }

    #[tokio::test]
    async fn upsert_does_not_touch_other_documents() {
        let store = MemoryStore::new();
        store
            .upsert(
                "passwords",
                &filter_eq("url", json!("site1")),
                doc(json!({"info": 1})),
            )
            .await
            .unwrap();
        store
            .upsert(
                "passwords",
                &filter_eq("url", json!("site2")),
                doc(json!({"info": 2})),
            )
            .await
            .unwrap();

        let all = store.find("passwords", &Filter::new()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store
            .insert("accounts", doc(json!({"hardware_id": "dev1"})))
            .await
            .unwrap();
        let found = clone.find("accounts", &Filter::new()).await.unwrap();
        assert_eq!(found.len(), 1);
    }
}
