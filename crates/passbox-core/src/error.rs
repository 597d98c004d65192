//! Error types for `passbox-core`.
//!
//! Each variant carries enough context to diagnose the problem without a
//! debugger. Credential errors never include password material — only
//! field names and identifiers.

use passbox_storage::StoreError;

/// Errors from request body validation.
///
/// Messages name the offending field; the wording is part of the API
/// contract and is sent verbatim to clients.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The body contains a field the schema does not declare.
    #[error("Your request has an extra field \"{field}\" and can't be processed.")]
    ExtraField { field: String },

    /// A present field's JSON type does not match the declared kind.
    #[error("Your request's \"{field}\" field is of the wrong type and can't be processed.")]
    TypeMismatch { field: String },

    /// A required schema field is absent from the body.
    #[error("Your request is missing the field \"{field}\" and can't be processed.")]
    MissingField { field: String },

    /// The body is not a JSON object at all.
    #[error("Your request body must be a JSON object and can't be processed.")]
    NotAnObject,
}

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// An account already exists for the hardware ID.
    #[error("An account already exists for this hardware ID.")]
    Duplicate,

    /// Unknown hardware ID or wrong password. The two cases are
    /// deliberately indistinguishable to callers.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// The hardware ID failed the format check.
    #[error("Your hardware ID is not in a valid format.")]
    InvalidHardwareId,

    /// A stored account document could not be decoded.
    #[error("account store error: {reason}")]
    Internal { reason: String },

    /// The document store returned an error.
    #[error("account storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from record operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Credential verification failed before the record was touched.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// No record stored for the (hardware ID, URL) pair.
    #[error("Invalid URL.")]
    NotFound { url: String },

    /// A stored record document could not be decoded.
    #[error("record store error: {reason}")]
    Internal { reason: String },

    /// The document store returned an error.
    #[error("record storage error: {0}")]
    Store(#[from] StoreError),
}
