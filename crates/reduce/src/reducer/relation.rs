//! Reducer for relation fields.

use super::{check, empty_list, payload, FieldReducer};
use crate::family::ReducerFamily;
use alloc::vec;
use alloc::vec::Vec;
use opmerge_core::{FieldValue, Mutation, MutationKind, Result};

/// Accumulates AddRelation and RemoveRelation link-set deltas.
///
/// Each kind keeps its own de-duplicated target list. Linking a target drops
/// it from the pending unlink set and vice versa, so the two deltas can be
/// sent in either order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationReducer {
    add: Option<Mutation>,
    remove: Option<Mutation>,
}

impl RelationReducer {
    /// Creates an empty relation reducer.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Relation payloads may name a single target instead of a list.
fn targets(mutation: &Mutation) -> Result<FieldValue> {
    let value = payload(mutation)?;
    Ok(match value {
        FieldValue::List(_) => value.clone(),
        other => FieldValue::List(vec![other.clone()]),
    })
}

fn link(
    same: &Option<Mutation>,
    opposite: &Option<Mutation>,
    incoming: &Mutation,
) -> Result<(Mutation, Option<Mutation>)> {
    let targets = targets(incoming)?;
    let base = match same.as_ref().and_then(|held| held.value()) {
        Some(value) => value.clone(),
        None => empty_list(),
    };
    let merged = incoming.with_value(base.union_unique(&targets)?);
    let opposite = match opposite {
        Some(held) => match held.value() {
            Some(value) => Some(held.with_value(value.subtract(&targets)?)),
            None => Some(held.clone()),
        },
        None => None,
    };
    Ok((merged, opposite))
}

impl FieldReducer for RelationReducer {
    fn family(&self) -> ReducerFamily {
        ReducerFamily::Relation
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<()> {
        check(&*self, &mutation)?;
        match mutation.kind() {
            MutationKind::AddRelation => {
                let (add, remove) = link(&self.add, &self.remove, &mutation)?;
                self.add = Some(add);
                self.remove = remove;
            }
            MutationKind::RemoveRelation => {
                let (remove, add) = link(&self.remove, &self.add, &mutation)?;
                self.remove = Some(remove);
                self.add = add;
            }
            kind => unreachable!("{} passed the relation kind check", kind),
        }
        Ok(())
    }

    fn resolved(&self) -> Option<&Mutation> {
        None
    }

    fn finalize(&self) -> Vec<Mutation> {
        [&self.add, &self.remove]
            .into_iter()
            .flatten()
            .filter(|m| !m.value().is_some_and(FieldValue::is_empty_list))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opmerge_core::{Error, ObjectRef};

    fn post(id: &str) -> FieldValue {
        FieldValue::Pointer(ObjectRef::new("Post", id))
    }

    #[test]
    fn test_single_target_is_wrapped() {
        let mut reducer = RelationReducer::new();
        reducer.reduce(Mutation::add_relation("likes", post("1"))).unwrap();
        assert_eq!(
            reducer.finalize(),
            vec![Mutation::add_relation("likes", FieldValue::List(vec![post("1")]))]
        );
        assert!(reducer.resolved().is_none());
    }

    #[test]
    fn test_targets_accumulate_without_duplicates() {
        let mut reducer = RelationReducer::new();
        reducer
            .reduce(Mutation::add_relation("likes", FieldValue::List(vec![post("1")])))
            .unwrap();
        reducer
            .reduce(Mutation::add_relation(
                "likes",
                FieldValue::List(vec![post("1"), post("2")]),
            ))
            .unwrap();
        assert_eq!(
            reducer.finalize(),
            vec![Mutation::add_relation(
                "likes",
                FieldValue::List(vec![post("1"), post("2")])
            )]
        );
    }

    #[test]
    fn test_unlink_cancels_pending_link() {
        let mut reducer = RelationReducer::new();
        reducer.reduce(Mutation::add_relation("likes", post("1"))).unwrap();
        reducer.reduce(Mutation::remove_relation("likes", post("1"))).unwrap();
        assert_eq!(
            reducer.finalize(),
            vec![Mutation::remove_relation("likes", FieldValue::List(vec![post("1")]))]
        );
    }

    #[test]
    fn test_link_and_unlink_coexist() {
        let mut reducer = RelationReducer::new();
        reducer.reduce(Mutation::add_relation("likes", post("1"))).unwrap();
        reducer.reduce(Mutation::remove_relation("likes", post("2"))).unwrap();
        assert_eq!(reducer.finalize().len(), 2);
    }

    #[test]
    fn test_rejects_set() {
        let mut reducer = RelationReducer::new();
        let err = reducer.reduce(Mutation::set("likes", post("1"))).unwrap_err();
        assert_eq!(
            err,
            Error::invalid_operation("likes", MutationKind::Set, "relation")
        );
        assert_eq!(reducer, RelationReducer::new());
    }
}
