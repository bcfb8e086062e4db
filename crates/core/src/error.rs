//! Error types for opmerge.

use crate::mutation::MutationKind;
use crate::types::ValueType;
use alloc::string::String;
use core::fmt;

/// Result type alias for opmerge operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for mutation validation and reduction.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Mutation kind is not valid for the field's reducer family.
    InvalidOperation {
        field: String,
        kind: MutationKind,
        family: &'static str,
    },
    /// Mutation kind requires a payload but none was given.
    MissingValue {
        field: String,
        kind: MutationKind,
    },
    /// Mutation kind clears a field but a payload was given.
    UnexpectedValue {
        field: String,
        kind: MutationKind,
    },
    /// Value algebra was applied to an operand of the wrong type.
    TypeMismatch {
        expected: ValueType,
        got: Option<ValueType>,
    },
    /// Integer addition overflowed.
    NumericOverflow {
        value_type: ValueType,
    },
    /// Mutation name does not match any known kind.
    UnknownMutationKind {
        name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOperation {
                field,
                kind,
                family,
            } => {
                write!(
                    f,
                    "Invalid operation: {} is not allowed on {} field {}",
                    kind, family, field
                )
            }
            Error::MissingValue { field, kind } => {
                write!(f, "Missing value: {} on field {} requires a value", kind, field)
            }
            Error::UnexpectedValue { field, kind } => {
                write!(f, "Unexpected value: {} on field {} takes no value", kind, field)
            }
            Error::TypeMismatch { expected, got } => match got {
                Some(got) => write!(f, "Type mismatch: expected {}, got {}", expected, got),
                None => write!(f, "Type mismatch: expected {}, got null", expected),
            },
            Error::NumericOverflow { value_type } => {
                write!(f, "Numeric overflow while adding {} values", value_type)
            }
            Error::UnknownMutationKind { name } => {
                write!(f, "Unknown mutation kind: {}", name)
            }
        }
    }
}

impl Error {
    /// Creates an invalid operation error.
    pub fn invalid_operation(
        field: impl Into<String>,
        kind: MutationKind,
        family: &'static str,
    ) -> Self {
        Error::InvalidOperation {
            field: field.into(),
            kind,
            family,
        }
    }

    /// Creates a missing value error.
    pub fn missing_value(field: impl Into<String>, kind: MutationKind) -> Self {
        Error::MissingValue {
            field: field.into(),
            kind,
        }
    }

    /// Creates an unexpected value error.
    pub fn unexpected_value(field: impl Into<String>, kind: MutationKind) -> Self {
        Error::UnexpectedValue {
            field: field.into(),
            kind,
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: ValueType, got: Option<ValueType>) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates a numeric overflow error.
    pub fn numeric_overflow(value_type: ValueType) -> Self {
        Error::NumericOverflow { value_type }
    }

    /// Creates an unknown mutation kind error.
    pub fn unknown_mutation_kind(name: impl Into<String>) -> Self {
        Error::UnknownMutationKind { name: name.into() }
    }
}
