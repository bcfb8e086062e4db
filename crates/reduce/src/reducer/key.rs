//! Reducer for scalar and opaque fields.

use super::{check, FieldReducer};
use crate::family::ReducerFamily;
use alloc::vec::Vec;
use opmerge_core::{Mutation, Result};

/// Last-writer-wins reducer over Set and Delete.
///
/// Neither kind carries information a later Set/Delete needs, so the latest
/// mutation replaces whatever was held.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyReducer {
    pending: Option<Mutation>,
}

impl KeyReducer {
    /// Creates an empty key reducer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldReducer for KeyReducer {
    fn family(&self) -> ReducerFamily {
        ReducerFamily::Key
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<()> {
        check(&*self, &mutation)?;
        self.pending = Some(mutation);
        Ok(())
    }

    fn resolved(&self) -> Option<&Mutation> {
        self.pending.as_ref()
    }

    fn finalize(&self) -> Vec<Mutation> {
        self.pending.iter().cloned().collect()
    }
}
