//! Per-field reducers.
//!
//! A reducer accumulates every mutation submitted for one field during a merge
//! epoch and folds them into the smallest set of mutations with the same
//! effect. Each family has its own reducer:
//!
//! - `KeyReducer`: last Set/Delete wins
//! - `NumberReducer`: Set/Delete/Increment folded into at most one mutation
//! - `ListReducer`: one structural Set/Delete plus Add, AddUnique and Remove deltas
//! - `RelationReducer`: AddRelation and RemoveRelation link-set deltas
//!
//! `Reducer` is the closed set of these, stored once per field by the hub.

mod key;
mod list;
mod number;
mod relation;

pub use key::KeyReducer;
pub use list::ListReducer;
pub use number::NumberReducer;
pub use relation::RelationReducer;

use crate::family::ReducerFamily;
use alloc::vec::Vec;
use opmerge_core::{Error, FieldValue, Mutation, Result, ValueType};

/// Merge algebra for the mutations of one field.
pub trait FieldReducer {
    /// Returns the family this reducer implements.
    fn family(&self) -> ReducerFamily;

    /// Returns whether this reducer accepts mutations of the given kind.
    #[inline]
    fn accepts(&self, mutation: &Mutation) -> bool {
        self.family().accepts(mutation.kind())
    }

    /// Folds a mutation into the accumulated state.
    ///
    /// On error the accumulated state is left unchanged.
    fn reduce(&mut self, mutation: Mutation) -> Result<()>;

    /// Returns the held Set/Delete when the field has been resolved to a
    /// concrete value.
    fn resolved(&self) -> Option<&Mutation>;

    /// Returns the residual mutations to send, in the order they must apply.
    fn finalize(&self) -> Vec<Mutation>;
}

/// A reducer of any family.
#[derive(Clone, Debug, PartialEq)]
pub enum Reducer {
    Key(KeyReducer),
    Number(NumberReducer),
    List(ListReducer),
    Relation(RelationReducer),
}

impl Reducer {
    fn inner(&self) -> &dyn FieldReducer {
        match self {
            Reducer::Key(r) => r,
            Reducer::Number(r) => r,
            Reducer::List(r) => r,
            Reducer::Relation(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FieldReducer {
        match self {
            Reducer::Key(r) => r,
            Reducer::Number(r) => r,
            Reducer::List(r) => r,
            Reducer::Relation(r) => r,
        }
    }
}

impl FieldReducer for Reducer {
    fn family(&self) -> ReducerFamily {
        self.inner().family()
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<()> {
        self.inner_mut().reduce(mutation)
    }

    fn resolved(&self) -> Option<&Mutation> {
        self.inner().resolved()
    }

    fn finalize(&self) -> Vec<Mutation> {
        self.inner().finalize()
    }
}

/// Rejects a mutation whose kind is outside the reducer's family, or whose
/// payload does not match its kind.
pub(crate) fn check<R: FieldReducer + ?Sized>(reducer: &R, mutation: &Mutation) -> Result<()> {
    if !reducer.accepts(mutation) {
        return Err(Error::invalid_operation(
            mutation.field(),
            mutation.kind(),
            reducer.family().name(),
        ));
    }
    mutation.validate()
}

/// Returns the payload of a mutation whose kind requires one.
pub(crate) fn payload(mutation: &Mutation) -> Result<&FieldValue> {
    mutation
        .value()
        .ok_or_else(|| Error::missing_value(mutation.field(), mutation.kind()))
}

/// Returns the payload of a list delta, which must be a list.
pub(crate) fn list_payload(mutation: &Mutation) -> Result<&FieldValue> {
    let value = payload(mutation)?;
    match value.value_type() {
        Some(ValueType::List) => Ok(value),
        got => Err(Error::type_mismatch(ValueType::List, got)),
    }
}

/// Empty list, the starting point for deltas folded onto a cleared field.
pub(crate) fn empty_list() -> FieldValue {
    FieldValue::List(Vec::new())
}
