//! Reducer for list fields.
//!
//! A list field can carry one structural mutation (Set or Delete) plus three
//! independent deltas: Add, AddUnique and Remove. Every incoming delta first
//! cancels the pending deltas it contradicts, so no item is ever both added
//! and removed by the same request set:
//!
//! - `Add` strips its items from the AddUnique and Remove deltas
//! - `AddUnique` strips its items from the Add and Remove deltas
//! - `Remove` strips its items from the structural value and both add deltas
//!
//! While a structural mutation is held, Add and AddUnique fold straight into
//! its value instead of opening a delta.

use super::{check, empty_list, list_payload, FieldReducer};
use crate::family::ReducerFamily;
use alloc::vec::Vec;
use opmerge_core::{FieldValue, Mutation, MutationKind, Result};

/// Accumulates Set/Delete and list deltas for one field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListReducer {
    structural: Option<Mutation>,
    add: Option<Mutation>,
    add_unique: Option<Mutation>,
    remove: Option<Mutation>,
}

impl ListReducer {
    /// Creates an empty list reducer.
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        match mutation.kind() {
            MutationKind::Set | MutationKind::Delete => {
                *self = Self::new();
                self.structural = Some(mutation);
            }
            MutationKind::Add => {
                let items = list_payload(&mutation)?;
                subtract_from(&mut self.add_unique, items)?;
                subtract_from(&mut self.remove, items)?;
                if !self.fold_structural(items, FieldValue::concat)? {
                    accumulate(&mut self.add, &mutation, FieldValue::concat)?;
                }
            }
            MutationKind::AddUnique => {
                let items = list_payload(&mutation)?;
                subtract_from(&mut self.add, items)?;
                subtract_from(&mut self.remove, items)?;
                if !self.fold_structural(items, FieldValue::union_unique)? {
                    accumulate(&mut self.add_unique, &mutation, FieldValue::union_unique)?;
                }
            }
            MutationKind::Remove => {
                let items = list_payload(&mutation)?;
                if let Some(held) = &self.structural {
                    if let Some(value) = held.value() {
                        self.structural = Some(held.with_value(value.subtract(items)?));
                    }
                }
                subtract_from(&mut self.add, items)?;
                subtract_from(&mut self.add_unique, items)?;
                accumulate(&mut self.remove, &mutation, FieldValue::union_unique)?;
            }
            kind => unreachable!("{} passed the list kind check", kind),
        }
        Ok(())
    }

    /// Folds items into the held Set/Delete. Returns false when none is held.
    fn fold_structural(
        &mut self,
        items: &FieldValue,
        combine: fn(&FieldValue, &FieldValue) -> Result<FieldValue>,
    ) -> Result<bool> {
        let Some(held) = &self.structural else {
            return Ok(false);
        };
        let merged = match held.value() {
            Some(value) => combine(value, items)?,
            None => combine(&empty_list(), items)?,
        };
        self.structural = Some(held.rekind(MutationKind::Set, Some(merged)));
        Ok(true)
    }
}

/// Removes `items` from a held delta's value.
fn subtract_from(slot: &mut Option<Mutation>, items: &FieldValue) -> Result<()> {
    if let Some(held) = slot {
        if let Some(value) = held.value() {
            *slot = Some(held.with_value(value.subtract(items)?));
        }
    }
    Ok(())
}

/// Merges an incoming delta into the held delta of the same slot.
fn accumulate(
    slot: &mut Option<Mutation>,
    incoming: &Mutation,
    combine: fn(&FieldValue, &FieldValue) -> Result<FieldValue>,
) -> Result<()> {
    let items = list_payload(incoming)?;
    let base = match slot.as_ref().and_then(|held| held.value()) {
        Some(value) => value.clone(),
        None => empty_list(),
    };
    *slot = Some(incoming.with_value(combine(&base, items)?));
    Ok(())
}

impl FieldReducer for ListReducer {
    fn family(&self) -> ReducerFamily {
        ReducerFamily::List
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<()> {
        check(&*self, &mutation)?;
        // Work on a copy so a failed fold leaves no partial update behind.
        let mut next = self.clone();
        next.apply(mutation)?;
        *self = next;
        Ok(())
    }

    fn resolved(&self) -> Option<&Mutation> {
        self.structural.as_ref()
    }

    fn finalize(&self) -> Vec<Mutation> {
        let deltas = [&self.add, &self.add_unique, &self.remove]
            .into_iter()
            .flatten()
            .filter(|m| !m.value().is_some_and(FieldValue::is_empty_list));

        self.structural.iter().chain(deltas).cloned().collect()
    }
}
