//! Request body schema validation.
//!
//! A [`Schema`] declares the fields a request body may carry, each with a
//! JSON [`FieldKind`] and an optional flag. Validation walks the body's
//! keys first (extra fields, type mismatches), then the schema's keys
//! (missing required fields), and stops at the first violation. Pure —
//! no side effects.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;

/// The JSON value kinds a schema field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON number (integer or float).
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
}

impl FieldKind {
    /// Whether `value`'s runtime kind equals this declared kind.
    ///
    /// `null` matches no kind: a field that is present but null is a
    /// type mismatch, never a stand-in for "absent".
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// A single field declaration: kind plus whether the field may be absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    kind: FieldKind,
    optional: bool,
}

impl FieldSpec {
    /// A field that must be present.
    #[must_use]
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// A field that may be absent.
    #[must_use]
    pub const fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: true,
        }
    }
}

/// A declared request body schema: field name → [`FieldSpec`].
#[derive(Debug, Clone)]
pub struct Schema {
    fields: BTreeMap<&'static str, FieldSpec>,
}

impl Schema {
    /// Build a schema from `(name, spec)` pairs.
    #[must_use]
    pub fn new<const N: usize>(fields: [(&'static str, FieldSpec); N]) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Check `body` against this schema.
    ///
    /// The first violation found wins: extra fields and type mismatches
    /// are reported from the pass over the body's keys, missing required
    /// fields from the pass over the schema's keys.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the first violation.
    pub fn validate(
        &self,
        body: &serde_json::Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for (field, value) in body {
            let Some(spec) = self.fields.get(field.as_str()) else {
                return Err(ValidationError::ExtraField {
                    field: field.clone(),
                });
            };
            if !spec.kind.matches(value) {
                return Err(ValidationError::TypeMismatch {
                    field: field.clone(),
                });
            }
        }

        for (field, spec) in &self.fields {
            if !spec.optional && !body.contains_key(*field) {
                return Err(ValidationError::MissingField {
                    field: (*field).to_owned(),
                });
            }
        }

        Ok(())
    }
}
