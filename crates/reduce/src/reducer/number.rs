//! Reducer for numeric fields.
//!
//! Merge table, `left` held and `right` incoming:
//!
//! | left -> right          | result                      |
//! |------------------------|-----------------------------|
//! | any -> Set             | right                       |
//! | any -> Delete          | right                       |
//! | Set -> Increment       | Set(left + right)           |
//! | Delete -> Increment    | Set(right)                  |
//! | Increment -> Increment | Increment(left + right)     |

use super::{check, payload, FieldReducer};
use crate::family::ReducerFamily;
use alloc::vec::Vec;
use opmerge_core::{Error, Mutation, MutationKind, Result, ValueType};

/// Folds Set, Delete and Increment into at most one mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberReducer {
    pending: Option<Mutation>,
}

impl NumberReducer {
    /// Creates an empty number reducer.
    pub fn new() -> Self {
        Self::default()
    }

    fn merge(left: &Mutation, right: Mutation) -> Result<Mutation> {
        match right.kind() {
            MutationKind::Increment => {
                let amount = payload(&right)?;
                match left.kind() {
                    MutationKind::Set | MutationKind::Increment => {
                        let sum = payload(left)?.checked_add(amount)?;
                        Ok(left.with_value(sum))
                    }
                    MutationKind::Delete => {
                        Ok(right.rekind(MutationKind::Set, Some(amount.clone())))
                    }
                    _ => Ok(right),
                }
            }
            _ => Ok(right),
        }
    }
}

impl FieldReducer for NumberReducer {
    fn family(&self) -> ReducerFamily {
        ReducerFamily::Number
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<()> {
        check(&*self, &mutation)?;
        if mutation.kind() == MutationKind::Increment {
            let amount = payload(&mutation)?;
            if !amount.value_type().is_some_and(|t| t.is_numeric()) {
                return Err(Error::type_mismatch(ValueType::Int64, amount.value_type()));
            }
        }

        let next = match &self.pending {
            Some(left) => Self::merge(left, mutation)?,
            None => mutation,
        };
        self.pending = Some(next);
        Ok(())
    }

    fn resolved(&self) -> Option<&Mutation> {
        self.pending
            .as_ref()
            .filter(|m| matches!(m.kind(), MutationKind::Set | MutationKind::Delete))
    }

    fn finalize(&self) -> Vec<Mutation> {
        self.pending.iter().cloned().collect()
    }
}
