//! Request tables and the pile flattening that produces them.
//!
//! A remote update call can carry at most one operation per field, but a list
//! field may need up to three (Set/Delete, an add delta, Remove). The pile
//! holds each field's residual mutations in order; flattening peels one
//! mutation per field into each successive table until the pile is empty.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use opmerge_core::{FieldKey, Mutation};

/// The updates carried by one remote call: at most one mutation per field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestTable {
    entries: BTreeMap<FieldKey, Mutation>,
}

impl RequestTable {
    /// Creates an empty request table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mutation for its field.
    ///
    /// Returns the mutation back if the table already holds one for that field.
    pub fn insert(&mut self, mutation: Mutation) -> Result<(), Mutation> {
        if self.entries.contains_key(mutation.field()) {
            return Err(mutation);
        }
        self.entries.insert(mutation.field().into(), mutation);
        Ok(())
    }

    /// Returns the mutation for a field.
    pub fn get(&self, field: &str) -> Option<&Mutation> {
        self.entries.get(field)
    }

    /// Returns true if the table has a mutation for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Iterates over entries in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mutation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the mutations in field order.
    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.entries.values()
    }

    /// Returns the number of fields in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RequestTable {
    type Item = (FieldKey, Mutation);
    type IntoIter = alloc::collections::btree_map::IntoIter<FieldKey, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ordered request tables, to be sent one after another.
///
/// Empty when nothing is pending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestBatch {
    tables: Vec<RequestTable>,
}

impl RequestBatch {
    /// Returns the tables in send order.
    pub fn tables(&self) -> &[RequestTable] {
        &self.tables
    }

    /// Consumes the batch and returns its tables.
    pub fn into_tables(self) -> Vec<RequestTable> {
        self.tables
    }

    /// Iterates over every mutation across all tables, in send order.
    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.tables.iter().flat_map(|table| table.mutations())
    }

    /// Returns the number of tables.
    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if there is nothing to send.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<'a> IntoIterator for &'a RequestBatch {
    type Item = &'a RequestTable;
    type IntoIter = core::slice::Iter<'a, RequestTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

/// Residual mutations per field, in the order fields were first pushed.
#[derive(Debug, Default)]
pub(crate) struct Pile {
    fields: Vec<(FieldKey, VecDeque<Mutation>)>,
}

impl Pile {
    /// Creates an empty pile.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues mutations behind any already held for the same field.
    pub(crate) fn push(&mut self, mutations: Vec<Mutation>) {
        for mutation in mutations {
            match self
                .fields
                .iter_mut()
                .find(|(field, _)| field.as_str() == mutation.field())
            {
                Some((_, queue)) => queue.push_back(mutation),
                None => {
                    let field = mutation.field().into();
                    self.fields.push((field, VecDeque::from([mutation])));
                }
            }
        }
    }

    /// Returns the number of fields with residual mutations.
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// Flattens the pile into request tables, one mutation per field per table.
    pub(crate) fn into_batch(mut self) -> RequestBatch {
        let mut tables = Vec::new();
        while !self.fields.is_empty() {
            let mut table = RequestTable::new();
            for (_, queue) in self.fields.iter_mut() {
                if let Some(mutation) = queue.pop_front() {
                    // One queue per field, so a table never sees a field twice.
                    if let Err(mutation) = table.insert(mutation) {
                        queue.push_front(mutation);
                    }
                }
            }
            self.fields.retain(|(_, queue)| !queue.is_empty());
            tables.push(table);
        }
        RequestBatch { tables }
    }
}
