//! Storage error types.
//!
//! Every variant carries the collection name so a failure can be traced
//! without a debugger.

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to query a collection.
    #[error("failed to query collection '{collection}': {reason}")]
    Query { collection: String, reason: String },

    /// Failed to write to a collection.
    #[error("failed to write to collection '{collection}': {reason}")]
    Write { collection: String, reason: String },
}
