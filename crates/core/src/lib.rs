//! Opmerge Core - Field values and mutation records for opmerge.
//!
//! This crate provides the foundational types shared by the reduction engine:
//!
//! - `FieldValue`: Runtime values a field can hold (scalars, pointers, lists)
//! - `ValueType`: Runtime type tag of a value
//! - `MutationKind` / `Mutation`: One recorded change to one field
//! - Value algebra: numeric addition and list concat / union / subtract
//! - `Error`: Error types for validation and reduction
//!
//! # Example
//!
//! ```rust
//! use opmerge_core::{FieldValue, Mutation, MutationKind};
//!
//! let m = Mutation::add("tags", FieldValue::list(["rust"]));
//! assert_eq!(m.kind(), MutationKind::Add);
//! assert!(m.validate().is_ok());
//!
//! let merged = FieldValue::list(["a"])
//!     .union_unique(&FieldValue::list(["a", "b"]))
//!     .unwrap();
//! assert_eq!(merged, FieldValue::list(["a", "b"]));
//! ```

#![no_std]

extern crate alloc;

mod algebra;
mod error;
mod mutation;
mod types;
mod value;

pub use error::{Error, Result};
pub use mutation::{FieldKey, Mutation, MutationKind};
pub use types::ValueType;
pub use value::{FieldValue, ObjectRef};
