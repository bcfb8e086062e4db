//! Opmerge Reduce - Pending mutation reduction for object fields.
//!
//! This crate folds the chronological mutations made to an object's fields
//! into the smallest equivalent set of remote operations, and shapes them into
//! request tables that can each be sent as one update call.
//!
//! # Core Concepts
//!
//! - `ReducerFamily`: Which mutation kinds a field accepts and how they merge
//! - `FieldReducer`: Per-field accumulator (`KeyReducer`, `NumberReducer`,
//!   `ListReducer`, `RelationReducer`)
//! - `ObjectContext`: The tracked object, asked for field families and told
//!   about resolved values
//! - `ReductionHub`: Routes mutations to reducers and builds requests
//! - `RequestBatch`: Ordered `RequestTable`s, at most one mutation per field each
//!
//! # Example
//!
//! ```rust
//! use opmerge_core::{FieldValue, Mutation};
//! use opmerge_reduce::{MemoryObject, ReducerFamily, ReductionHub};
//!
//! let object = MemoryObject::new()
//!     .with_field("score", ReducerFamily::Number)
//!     .with_field("tags", ReducerFamily::List);
//! let mut hub = ReductionHub::new(object);
//!
//! hub.append_mutation(Mutation::increment("score", 5i64)).unwrap();
//! hub.append_mutation(Mutation::add("tags", FieldValue::list(["x"]))).unwrap();
//! hub.append_mutation(Mutation::remove("tags", FieldValue::list(["y"]))).unwrap();
//!
//! // Two list deltas on "tags" cannot share one request.
//! let batch = hub.build_request();
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch.tables()[0].len(), 2);
//! assert_eq!(batch.tables()[1].len(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod context;
pub mod family;
pub mod hub;
pub mod reducer;
pub mod request;

pub use context::{MemoryObject, ObjectContext};
pub use family::ReducerFamily;
pub use hub::{ReductionHub, ReductionHubBuilder};
pub use reducer::{FieldReducer, KeyReducer, ListReducer, NumberReducer, Reducer, RelationReducer};
pub use request::{RequestBatch, RequestTable};

// Re-export commonly used types from dependencies
pub use opmerge_core::{Error, FieldKey, FieldValue, Mutation, MutationKind, Result};
