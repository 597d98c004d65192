//! Document store abstraction for passbox.
//!
//! This crate defines the [`DocumentStore`] trait — named collections of
//! JSON documents with equality-filter queries, inserts, and upserts. It
//! knows nothing about accounts, passwords, or hashing; the domain logic
//! in `passbox-core` sits on top of it.
//!
//! One implementation is provided:
//!
//! - [`MemoryStore`] — in-memory, the default runtime backend and the
//!   backend used by tests. Data is lost when the process exits.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// An equality filter over top-level document fields.
///
/// A document matches when every filter field is present in the document
/// with an equal value. An empty filter matches every document.
pub type Filter = BTreeMap<String, serde_json::Value>;

/// A pluggable store of named document collections.
///
/// Collections are created implicitly on first write. Implementations
/// must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Return all documents in `collection` matching `filter`.
    ///
    /// A missing collection behaves as an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Query`] if the underlying backend fails.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Append a document to `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the underlying backend fails.
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Insert `document` only if nothing in `collection` matches
    /// `filter`, returning whether the insert happened.
    ///
    /// The match check and the insert are atomic with respect to other
    /// writers — this is the conditional-write primitive that uniqueness
    /// invariants (one account per hardware ID) are built on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the underlying backend fails.
    async fn insert_unique(
        &self,
        collection: &str,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, StoreError>;

    /// Update-or-insert keyed by `filter`.
    ///
    /// If at least one document matches, `update`'s top-level fields are
    /// merged over the first match — each updated field is replaced
    /// wholly, never deep-merged. If nothing matches, a new document is
    /// inserted combining the filter fields with `update`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the underlying backend fails.
    async fn upsert(
        &self,
        collection: &str,
        filter: &Filter,
        update: Document,
    ) -> Result<(), StoreError>;
}

/// Whether `document` satisfies every field of `filter`.
#[must_use]
pub fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, value)| document.get(field) == Some(value))
}
