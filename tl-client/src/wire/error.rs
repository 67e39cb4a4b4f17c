//! Decode error types.
//!
//! Every failure is fatal to the decode call that produced it. Errors carry
//! a dotted path (e.g. `stopAreas.stopArea[3].x`) so callers can see exactly
//! which record drifted from the expected shape.

use std::fmt;

/// Error returned when a single wire string cannot be coerced.
///
/// This carries no field name; entity decoders attach one with
/// [`CoercionError::on_field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {raw:?}")]
pub struct CoercionError {
    /// What the raw value should have looked like.
    pub expected: &'static str,
    /// The offending wire text.
    pub raw: String,
}

impl CoercionError {
    pub(crate) fn new(expected: &'static str, raw: &str) -> Self {
        Self {
            expected,
            raw: raw.to_string(),
        }
    }

    /// Promote to a [`DecodeError`] naming the field that held the value.
    pub fn on_field(self, field: &str) -> DecodeError {
        DecodeError::FieldCoercion {
            field: field.to_string(),
            raw: self.raw,
            expected: self.expected,
        }
    }
}

/// Errors from decoding an API payload into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Not valid JSON, or the top-level shape is not the expected envelope.
    #[error("malformed payload: {detail}")]
    MalformedPayload { detail: String },

    /// A leaf value could not be converted to its target type.
    #[error("invalid value {raw:?} for field `{field}`: expected {expected}")]
    FieldCoercion {
        field: String,
        raw: String,
        expected: &'static str,
    },

    /// An array/object field is present but has the wrong JSON kind.
    #[error("structural mismatch at `{path}`: {detail}")]
    StructuralMismatch { path: String, detail: String },
}

impl DecodeError {
    pub(crate) fn malformed(detail: impl fmt::Display) -> Self {
        DecodeError::MalformedPayload {
            detail: detail.to_string(),
        }
    }

    pub(crate) fn mismatch(path: impl Into<String>, detail: impl fmt::Display) -> Self {
        DecodeError::StructuralMismatch {
            path: path.into(),
            detail: detail.to_string(),
        }
    }

    /// Prefix the error's path with the location of the enclosing record.
    ///
    /// Malformed-payload errors have no path and are returned unchanged.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            DecodeError::FieldCoercion {
                field,
                raw,
                expected,
            } => DecodeError::FieldCoercion {
                field: join_path(prefix, &field),
                raw,
                expected,
            },
            DecodeError::StructuralMismatch { path, detail } => DecodeError::StructuralMismatch {
                path: join_path(prefix, &path),
                detail,
            },
            other => other,
        }
    }

    /// The dotted path of the failing field, if the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::FieldCoercion { field, .. } => Some(field),
            DecodeError::StructuralMismatch { path, .. } => Some(path),
            DecodeError::MalformedPayload { .. } => None,
        }
    }
}

fn join_path(prefix: &str, rest: &str) -> String {
    if rest.is_empty() {
        prefix.to_string()
    } else if rest.starts_with('[') {
        format!("{prefix}{rest}")
    } else {
        format!("{prefix}.{rest}")
    }
}
