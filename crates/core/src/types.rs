//! Runtime type tags for field values.
//!
//! This module defines the type tag carried by every non-null `FieldValue`.

use core::fmt;

/// Runtime type of a `FieldValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Boolean type (true/false)
    Boolean,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
    /// Reference to another stored object
    Pointer,
    /// Ordered collection of values
    List,
}

impl ValueType {
    /// Returns the lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float64 => "float64",
            ValueType::String => "string",
            ValueType::Pointer => "pointer",
            ValueType::List => "list",
        }
    }

    /// Returns whether values of this type support numeric addition.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int32 | ValueType::Int64 | ValueType::Float64)
    }

    /// Rank used to pick the result type of a numeric addition.
    pub(crate) fn numeric_rank(&self) -> Option<u8> {
        match self {
            ValueType::Int32 => Some(0),
            ValueType::Int64 => Some(1),
            ValueType::Float64 => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
