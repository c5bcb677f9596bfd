//! Error taxonomy for runtime type checking
//!
//! Every checker either returns the validated value or one of these errors.
//! Nothing is retried or suppressed: a failure terminates the caller's
//! current operation and carries enough context to explain itself.
//!
//! - **Mismatch**: a value fails a type's predicate
//! - **FieldMismatch**: a struct field holds a value of the wrong type
//! - **MissingField**: a required struct field is absent
//! - **UnexpectedField**: a struct value carries an undeclared field
//! - **NotStruct**: a value used as a struct is not record-like
//! - **NotEnumMember**: a value is outside an enumeration
//! - **IncompleteMatch**: an action table does not cover every enum member
//! - **InvalidSignature**: a function signature has fewer than two types
//! - **ArityMismatch**: a typed function was called with the wrong argument count

use itertools::Itertools;
use strum::{Display, EnumIter};
use thiserror::Error;

use crate::value::Kind;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TypeError>;

/// A runtime type-checking failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Value does not satisfy a type's predicate
    #[error("expected {expected}, got {value} ({kind})")]
    Mismatch {
        /// Name of the type that rejected the value
        expected: String,
        /// Rendered offending value
        value: String,
        /// Observed kind of the offending value
        kind: Kind,
    },

    /// Struct field holds a value of the wrong type
    #[error("field '{field}' of struct '{structure}' is of type {kind}, but expected {expected}")]
    FieldMismatch {
        structure: String,
        field: String,
        kind: Kind,
        expected: String,
    },

    /// Required struct field is absent
    #[error("missing required field '{field}' of type {expected} in struct '{structure}'")]
    MissingField {
        structure: String,
        field: String,
        expected: String,
    },

    /// Struct value carries a field the definition does not declare
    #[error("unexpected field '{field}' in struct '{structure}'")]
    UnexpectedField { structure: String, field: String },

    /// Value is not record-like at all
    #[error("{value} ({kind}) is not a struct, expected struct '{structure}'")]
    NotStruct {
        structure: String,
        value: String,
        kind: Kind,
    },

    /// Value is not a member of an enumeration
    #[error("'{value}' is not a member of enum '{enumeration}'")]
    NotEnumMember { enumeration: String, value: String },

    /// Action table does not cover every declared member
    #[error(
        "match on enum '{enumeration}' is missing cases: {}",
        .missing.iter().map(|member| format!("'{member}'")).join(", ")
    )]
    IncompleteMatch {
        enumeration: String,
        /// Every uncovered member, in declaration order
        missing: Vec<String>,
    },

    /// Signature has fewer than two types
    #[error("signature must have at least two types, got {len}")]
    InvalidSignature { len: usize },

    /// Typed function called with the wrong number of arguments
    #[error("{signature} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        signature: String,
        expected: usize,
        actual: usize,
    },
}

/// Discriminant of [`TypeError`] for programmatic matching.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Mismatch,
    FieldMismatch,
    MissingField,
    UnexpectedField,
    NotStruct,
    NotEnumMember,
    IncompleteMatch,
    InvalidSignature,
    ArityMismatch,
}

impl TypeError {
    /// Create a mismatch error.
    pub fn mismatch(expected: impl Into<String>, value: impl Into<String>, kind: Kind) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            value: value.into(),
            kind,
        }
    }

    /// Which category this error belongs to.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Mismatch { .. } => ErrorKind::Mismatch,
            Self::FieldMismatch { .. } => ErrorKind::FieldMismatch,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::UnexpectedField { .. } => ErrorKind::UnexpectedField,
            Self::NotStruct { .. } => ErrorKind::NotStruct,
            Self::NotEnumMember { .. } => ErrorKind::NotEnumMember,
            Self::IncompleteMatch { .. } => ErrorKind::IncompleteMatch,
            Self::InvalidSignature { .. } => ErrorKind::InvalidSignature,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
        }
    }

    /// True for failures raised by the struct checker.
    pub const fn is_struct_error(&self) -> bool {
        matches!(
            self,
            Self::FieldMismatch { .. }
                | Self::MissingField { .. }
                | Self::UnexpectedField { .. }
                | Self::NotStruct { .. }
        )
    }
}
