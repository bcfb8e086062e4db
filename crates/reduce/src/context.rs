//! The object a reduction hub works on behalf of.
//!
//! The hub does not own the object model. It only needs to ask which family a
//! field belongs to and to push resolved values back so local reads see
//! pending-but-unsent state.

use crate::family::ReducerFamily;
use alloc::string::String;
use hashbrown::HashMap;
use opmerge_core::{FieldKey, FieldValue};

/// Callbacks a hub uses to talk to the object it tracks.
pub trait ObjectContext {
    /// Returns the reducer family for a field. Consulted once per field.
    fn reducer_family(&self, field: &str) -> ReducerFamily;

    /// Mirrors a field resolved to a concrete value. `None` means deleted.
    fn set_property(&mut self, field: &str, value: Option<&FieldValue>);
}

impl<T: ObjectContext + ?Sized> ObjectContext for &mut T {
    fn reducer_family(&self, field: &str) -> ReducerFamily {
        (**self).reducer_family(field)
    }

    fn set_property(&mut self, field: &str, value: Option<&FieldValue>) {
        (**self).set_property(field, value)
    }
}

/// A plain in-memory object: a field schema plus current property values.
///
/// Fields without a declared family are treated as `Key` fields.
#[derive(Clone, Debug, Default)]
pub struct MemoryObject {
    schema: HashMap<FieldKey, ReducerFamily>,
    properties: HashMap<FieldKey, FieldValue>,
}

impl MemoryObject {
    /// Creates an object with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the reducer family of a field.
    pub fn with_field(mut self, field: impl Into<FieldKey>, family: ReducerFamily) -> Self {
        self.schema.insert(field.into(), family);
        self
    }

    /// Returns the current value of a property.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.properties.get(field)
    }

    /// Sets a property directly, bypassing any hub.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.properties.insert(field.into(), value);
    }

    /// Returns the number of properties currently set.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl ObjectContext for MemoryObject {
    fn reducer_family(&self, field: &str) -> ReducerFamily {
        self.schema.get(field).copied().unwrap_or(ReducerFamily::Key)
    }

    fn set_property(&mut self, field: &str, value: Option<&FieldValue>) {
        match value {
            Some(value) => {
                self.properties.insert(field.into(), value.clone());
            }
            None => {
                self.properties.remove(field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_family_is_key() {
        let object = MemoryObject::new().with_field("score", ReducerFamily::Number);
        assert_eq!(object.reducer_family("score"), ReducerFamily::Number);
        assert_eq!(object.reducer_family("title"), ReducerFamily::Key);
    }

    #[test]
    fn test_set_property() {
        let mut object = MemoryObject::new();
        object.set_property("title", Some(&FieldValue::from("a")));
        assert_eq!(object.get("title"), Some(&FieldValue::from("a")));

        object.set_property("title", None);
        assert!(object.get("title").is_none());
        assert!(object.is_empty());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn touch<C: ObjectContext>(mut context: C) -> ReducerFamily {
            context.set_property("n", Some(&FieldValue::Int64(1)));
            context.reducer_family("n")
        }

        let mut object = MemoryObject::new();
        assert_eq!(touch(&mut object), ReducerFamily::Key);
        assert_eq!(object.get("n"), Some(&FieldValue::Int64(1)));
    }
}
