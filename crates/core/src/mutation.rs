//! Field-level mutation records.
//!
//! A `Mutation` describes one pending change to a single field of an object.
//! Mutations are immutable once built; reducers fold them into new ones.

use crate::error::{Error, Result};
use crate::value::FieldValue;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Name of an object field.
pub type FieldKey = String;

/// The kind of change a mutation applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationKind {
    /// Replace the field value
    Set,
    /// Clear the field
    Delete,
    /// Add an amount to a numeric field
    Increment,
    /// Append items to a list field
    Add,
    /// Append items not already present in a list field
    AddUnique,
    /// Link objects into a relation field
    AddRelation,
    /// Remove items from a list field
    Remove,
    /// Unlink objects from a relation field
    RemoveRelation,
}

impl MutationKind {
    /// All kinds, in declaration order.
    pub const ALL: [MutationKind; 8] = [
        MutationKind::Set,
        MutationKind::Delete,
        MutationKind::Increment,
        MutationKind::Add,
        MutationKind::AddUnique,
        MutationKind::AddRelation,
        MutationKind::Remove,
        MutationKind::RemoveRelation,
    ];

    /// Returns the canonical operation name sent to the remote store.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Set => "Set",
            MutationKind::Delete => "Delete",
            MutationKind::Increment => "Increment",
            MutationKind::Add => "Add",
            MutationKind::AddUnique => "AddUnique",
            MutationKind::AddRelation => "AddRelation",
            MutationKind::Remove => "Remove",
            MutationKind::RemoveRelation => "RemoveRelation",
        }
    }

    /// Returns whether a mutation of this kind must carry a value.
    #[inline]
    pub fn requires_value(&self) -> bool {
        !matches!(self, MutationKind::Delete)
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MutationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::unknown_mutation_kind(s))
    }
}

/// One recorded change to one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    kind: MutationKind,
    field: FieldKey,
    value: Option<FieldValue>,
}

impl Mutation {
    /// Creates a mutation without checking the payload.
    ///
    /// Use [`Mutation::validate`] or [`Mutation::checked`] to enforce that
    /// the payload matches the kind.
    pub fn new(kind: MutationKind, field: impl Into<FieldKey>, value: Option<FieldValue>) -> Self {
        Self {
            kind,
            field: field.into(),
            value,
        }
    }

    /// Creates a mutation, rejecting a payload that does not match the kind.
    pub fn checked(
        kind: MutationKind,
        field: impl Into<FieldKey>,
        value: Option<FieldValue>,
    ) -> Result<Self> {
        let mutation = Self::new(kind, field, value);
        mutation.validate()?;
        Ok(mutation)
    }

    /// Creates a Set mutation.
    pub fn set(field: impl Into<FieldKey>, value: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::Set, field, Some(value.into()))
    }

    /// Creates a Delete mutation.
    pub fn delete(field: impl Into<FieldKey>) -> Self {
        Self::new(MutationKind::Delete, field, None)
    }

    /// Creates an Increment mutation.
    pub fn increment(field: impl Into<FieldKey>, amount: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::Increment, field, Some(amount.into()))
    }

    /// Creates an Add mutation.
    pub fn add(field: impl Into<FieldKey>, items: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::Add, field, Some(items.into()))
    }

    /// Creates an AddUnique mutation.
    pub fn add_unique(field: impl Into<FieldKey>, items: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::AddUnique, field, Some(items.into()))
    }

    /// Creates a Remove mutation.
    pub fn remove(field: impl Into<FieldKey>, items: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::Remove, field, Some(items.into()))
    }

    /// Creates an AddRelation mutation.
    pub fn add_relation(field: impl Into<FieldKey>, targets: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::AddRelation, field, Some(targets.into()))
    }

    /// Creates a RemoveRelation mutation.
    pub fn remove_relation(field: impl Into<FieldKey>, targets: impl Into<FieldValue>) -> Self {
        Self::new(MutationKind::RemoveRelation, field, Some(targets.into()))
    }

    /// Returns the mutation kind.
    #[inline]
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Returns the field this mutation applies to.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the payload, if any.
    #[inline]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    /// Returns a mutation of the same kind on the same field with a new payload.
    pub fn with_value(&self, value: FieldValue) -> Self {
        Self::new(self.kind, self.field.clone(), Some(value))
    }

    /// Returns a mutation of another kind on the same field.
    pub fn rekind(&self, kind: MutationKind, value: Option<FieldValue>) -> Self {
        Self::new(kind, self.field.clone(), value)
    }

    /// Checks that the payload is present exactly when the kind needs one.
    pub fn validate(&self) -> Result<()> {
        match (self.kind.requires_value(), &self.value) {
            (true, None) => Err(Error::missing_value(self.field.clone(), self.kind)),
            (false, Some(_)) => Err(Error::unexpected_value(self.field.clone(), self.kind)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in MutationKind::ALL {
            assert_eq!(kind.as_str().parse::<MutationKind>().unwrap(), kind);
        }
        assert_eq!(MutationKind::AddUnique.to_string(), "AddUnique");
    }

    #[test]
    fn test_unknown_kind() {
        let err = "Upsert".parse::<MutationKind>().unwrap_err();
        assert_eq!(err, Error::unknown_mutation_kind("Upsert"));
    }

    #[test]
    fn test_constructors() {
        let m = Mutation::set("title", "hello");
        assert_eq!(m.kind(), MutationKind::Set);
        assert_eq!(m.field(), "title");
        assert_eq!(m.value(), Some(&FieldValue::from("hello")));

        let m = Mutation::delete("title");
        assert_eq!(m.kind(), MutationKind::Delete);
        assert!(m.value().is_none());
    }

    #[test]
    fn test_validate() {
        assert!(Mutation::increment("n", 1i64).validate().is_ok());
        assert!(Mutation::delete("n").validate().is_ok());

        let err = Mutation::new(MutationKind::Add, "tags", None).validate().unwrap_err();
        assert_eq!(err, Error::missing_value("tags", MutationKind::Add));

        let err = Mutation::checked(MutationKind::Delete, "tags", Some(FieldValue::Null))
            .unwrap_err();
        assert_eq!(err, Error::unexpected_value("tags", MutationKind::Delete));
    }

    #[test]
    fn test_rekind_keeps_field() {
        let m = Mutation::increment("n", 2i64);
        let set = m.rekind(MutationKind::Set, Some(FieldValue::Int64(2)));
        assert_eq!(set, Mutation::set("n", 2i64));
        assert_eq!(m.with_value(FieldValue::Int64(5)), Mutation::increment("n", 5i64));
    }
}
