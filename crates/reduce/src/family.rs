//! Reducer families.
//!
//! A family groups the mutation kinds a field accepts together with the merge
//! algebra used to fold them. The family of a field is decided once, by the
//! object's schema, when the field is first touched.

use crate::reducer::{KeyReducer, ListReducer, NumberReducer, Reducer, RelationReducer};
use core::fmt;
use opmerge_core::MutationKind;

/// The merge algebra a field follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReducerFamily {
    /// Scalar or opaque fields: last Set/Delete wins
    Key,
    /// Numeric fields: Set/Delete plus accumulating increments
    Number,
    /// Ordered collections: Set/Delete plus add/unique-add/remove deltas
    List,
    /// Relation links: add/remove link-set deltas
    Relation,
}

const KEY_KINDS: &[MutationKind] = &[MutationKind::Set, MutationKind::Delete];

const NUMBER_KINDS: &[MutationKind] = &[
    MutationKind::Set,
    MutationKind::Delete,
    MutationKind::Increment,
];

const LIST_KINDS: &[MutationKind] = &[
    MutationKind::Set,
    MutationKind::Delete,
    MutationKind::Add,
    MutationKind::AddUnique,
    MutationKind::Remove,
];

const RELATION_KINDS: &[MutationKind] = &[MutationKind::AddRelation, MutationKind::RemoveRelation];

impl ReducerFamily {
    /// Returns the mutation kinds fields of this family accept.
    pub fn valid_kinds(&self) -> &'static [MutationKind] {
        match self {
            ReducerFamily::Key => KEY_KINDS,
            ReducerFamily::Number => NUMBER_KINDS,
            ReducerFamily::List => LIST_KINDS,
            ReducerFamily::Relation => RELATION_KINDS,
        }
    }

    /// Returns whether `kind` is valid for this family.
    #[inline]
    pub fn accepts(&self, kind: MutationKind) -> bool {
        self.valid_kinds().contains(&kind)
    }

    /// Returns the lowercase family name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ReducerFamily::Key => "key",
            ReducerFamily::Number => "number",
            ReducerFamily::List => "list",
            ReducerFamily::Relation => "relation",
        }
    }

    /// Creates an empty reducer of this family.
    pub fn create(&self) -> Reducer {
        match self {
            ReducerFamily::Key => Reducer::Key(KeyReducer::new()),
            ReducerFamily::Number => Reducer::Number(NumberReducer::new()),
            ReducerFamily::List => Reducer::List(ListReducer::new()),
            ReducerFamily::Relation => Reducer::Relation(RelationReducer::new()),
        }
    }
}

impl fmt::Display for ReducerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::FieldReducer;

    #[test]
    fn test_valid_kinds() {
        assert!(ReducerFamily::Key.accepts(MutationKind::Set));
        assert!(!ReducerFamily::Key.accepts(MutationKind::Increment));
        assert!(ReducerFamily::Number.accepts(MutationKind::Increment));
        assert!(!ReducerFamily::Number.accepts(MutationKind::Add));
        assert!(ReducerFamily::List.accepts(MutationKind::AddUnique));
        assert!(!ReducerFamily::List.accepts(MutationKind::AddRelation));
        assert!(ReducerFamily::Relation.accepts(MutationKind::RemoveRelation));
        assert!(!ReducerFamily::Relation.accepts(MutationKind::Set));
    }

    #[test]
    fn test_every_kind_has_a_family() {
        let families = [
            ReducerFamily::Key,
            ReducerFamily::Number,
            ReducerFamily::List,
            ReducerFamily::Relation,
        ];
        for kind in MutationKind::ALL {
            assert!(families.iter().any(|f| f.accepts(kind)), "{} has no family", kind);
        }
    }

    #[test]
    fn test_create_matches_family() {
        for family in [
            ReducerFamily::Key,
            ReducerFamily::Number,
            ReducerFamily::List,
            ReducerFamily::Relation,
        ] {
            let reducer = family.create();
            assert_eq!(reducer.family(), family);
            assert!(reducer.finalize().is_empty());
        }
    }
}
