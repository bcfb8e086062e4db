//! Reduction hub.
//!
//! `ReductionHub` collects the mutations made to one object during a merge
//! epoch, routes each to the reducer of its field and, at flush time,
//! assembles the residual mutations into request tables.

use crate::context::ObjectContext;
use crate::family::ReducerFamily;
use crate::reducer::{FieldReducer, Reducer};
use crate::request::{Pile, RequestBatch};
use alloc::vec::Vec;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use opmerge_core::{FieldKey, FieldValue, Mutation, MutationKind, Result};
use tracing::{debug, trace};

/// Tracks and reduces pending field mutations for one object.
///
/// # Example
///
/// ```rust
/// use opmerge_reduce::{MemoryObject, ReducerFamily, ReductionHub};
/// use opmerge_core::{FieldValue, MutationKind};
///
/// let object = MemoryObject::new().with_field("score", ReducerFamily::Number);
/// let mut hub = ReductionHub::new(object);
///
/// hub.append(MutationKind::Set, "score", Some(FieldValue::Int64(1))).unwrap();
/// hub.append(MutationKind::Increment, "score", Some(FieldValue::Int64(2))).unwrap();
///
/// assert_eq!(hub.context().get("score"), Some(&FieldValue::Int64(3)));
/// let batch = hub.build_request();
/// assert_eq!(batch.len(), 1);
/// ```
pub struct ReductionHub<C> {
    context: C,
    /// Field -> reducer, created on first touch
    fields: HashMap<FieldKey, Reducer>,
    /// Fields in first-touch order
    order: Vec<FieldKey>,
    /// Every mutation received, in arrival order
    mutations: Vec<Mutation>,
    record_mutations: bool,
}

impl<C: ObjectContext> ReductionHub<C> {
    /// Creates a hub for the given object.
    pub fn new(context: C) -> Self {
        ReductionHubBuilder::new().build(context)
    }

    /// Records a mutation and folds it into its field's reducer.
    pub fn append(
        &mut self,
        kind: MutationKind,
        field: impl Into<FieldKey>,
        value: Option<FieldValue>,
    ) -> Result<()> {
        self.append_mutation(Mutation::new(kind, field, value))
    }

    /// Folds an already-built mutation into its field's reducer.
    ///
    /// The field's reducer is created on first touch, even when the mutation
    /// is then rejected. A rejected mutation leaves every reducer unchanged.
    pub fn append_mutation(&mut self, mutation: Mutation) -> Result<()> {
        let field: FieldKey = mutation.field().into();
        let kind = mutation.kind();
        if self.record_mutations {
            self.mutations.push(mutation.clone());
        }

        let reducer = match self.fields.entry(field.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let family = self.context.reducer_family(&field);
                debug!(field = %field, family = %family, "created field reducer");
                self.order.push(field.clone());
                entry.insert(family.create())
            }
        };

        if let Err(err) = reducer.reduce(mutation) {
            debug!(field = %field, kind = %kind, error = %err, "rejected mutation");
            return Err(err);
        }
        trace!(field = %field, kind = %kind, "folded mutation");

        if let Some(resolved) = reducer.resolved() {
            self.context.set_property(&field, resolved.value());
        }
        Ok(())
    }

    /// Returns every mutation received, in arrival order, including rejected ones.
    ///
    /// Empty when the hub was built with `record_mutations(false)`.
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Iterates over touched fields in first-touch order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|f| f.as_str())
    }

    /// Returns the reducer family chosen for a field, if it was touched.
    pub fn family(&self, field: &str) -> Option<ReducerFamily> {
        self.fields.get(field).map(|r| r.family())
    }

    /// Returns the residual mutations currently pending for one field.
    pub fn pending(&self, field: &str) -> Vec<Mutation> {
        self.fields
            .get(field)
            .map(|r| r.finalize())
            .unwrap_or_default()
    }

    /// Returns the number of touched fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no field has been touched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the tracked object.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns the tracked object mutably.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consumes the hub and returns the tracked object.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Builds the request tables for everything pending.
    ///
    /// No table holds two mutations for the same field; a field needing
    /// several operations spreads them over consecutive tables.
    pub fn build_request(&self) -> RequestBatch {
        let mut pile = Pile::new();
        for field in &self.order {
            if let Some(reducer) = self.fields.get(field) {
                pile.push(reducer.finalize());
            }
        }
        let fields = pile.len();
        let batch = pile.into_batch();
        debug!(fields, tables = batch.len(), "built request batch");
        batch
    }

    /// Builds the request tables and starts a fresh merge epoch.
    pub fn flush(&mut self) -> RequestBatch {
        let batch = self.build_request();
        self.fields.clear();
        self.order.clear();
        self.mutations.clear();
        batch
    }
}

/// Builder for creating reduction hubs.
#[derive(Clone, Debug)]
pub struct ReductionHubBuilder {
    record_mutations: bool,
    capacity: usize,
}

impl Default for ReductionHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReductionHubBuilder {
    pub fn new() -> Self {
        Self {
            record_mutations: true,
            capacity: 0,
        }
    }

    /// Whether to keep the append-ordered mutation trail. On by default.
    pub fn record_mutations(mut self, record: bool) -> Self {
        self.record_mutations = record;
        self
    }

    /// Number of fields to reserve room for.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build<C: ObjectContext>(self, context: C) -> ReductionHub<C> {
        ReductionHub {
            context,
            fields: HashMap::with_capacity(self.capacity),
            order: Vec::with_capacity(self.capacity),
            mutations: Vec::new(),
            record_mutations: self.record_mutations,
        }
    }
}
