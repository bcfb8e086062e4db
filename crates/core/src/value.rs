//! Value type definitions for opmerge.
//!
//! This module defines the `FieldValue` enum which represents any value a
//! mutation can carry for a single object field.

use crate::types::ValueType;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

/// Reference to another stored object, used as a relation or pointer payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Class (table) the referenced object belongs to
    pub class_name: String,
    /// Remote identifier of the referenced object
    pub object_id: String,
}

impl ObjectRef {
    pub fn new(class_name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            object_id: object_id.into(),
        }
    }
}

/// A value that can be stored in an object field.
#[derive(Clone, Debug)]
pub enum FieldValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Reference to another object
    Pointer(ObjectRef),
    /// Ordered collection of values
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns the type of this value, or None if it's Null.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            FieldValue::Null => None,
            FieldValue::Boolean(_) => Some(ValueType::Boolean),
            FieldValue::Int32(_) => Some(ValueType::Int32),
            FieldValue::Int64(_) => Some(ValueType::Int64),
            FieldValue::Float64(_) => Some(ValueType::Float64),
            FieldValue::String(_) => Some(ValueType::String),
            FieldValue::Pointer(_) => Some(ValueType::Pointer),
            FieldValue::List(_) => Some(ValueType::List),
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Creates a list value from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FieldValue>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i32 value if this is an Int32, None otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Float64, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the object reference if this is a Pointer, None otherwise.
    pub fn as_pointer(&self) -> Option<&ObjectRef> {
        match self {
            FieldValue::Pointer(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the items if this is a List, None otherwise.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a == b,
            (FieldValue::Int32(a), FieldValue::Int32(b)) => a == b,
            (FieldValue::Int64(a), FieldValue::Int64(b)) => a == b,
            (FieldValue::Float64(a), FieldValue::Float64(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Pointer(a), FieldValue::Pointer(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Null => {}
            FieldValue::Boolean(b) => b.hash(state),
            FieldValue::Int32(i) => i.hash(state),
            FieldValue::Int64(i) => i.hash(state),
            FieldValue::Float64(f) => {
                // All NaNs compare equal, so they must hash equal too
                if f.is_nan() {
                    f64::NAN.to_bits().hash(state)
                } else if *f == 0.0 {
                    0.0f64.to_bits().hash(state)
                } else {
                    f.to_bits().hash(state)
                }
            }
            FieldValue::String(s) => s.hash(state),
            FieldValue::Pointer(p) => p.hash(state),
            FieldValue::List(items) => items.hash(state),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int64(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float64(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(v: ObjectRef) -> Self {
        FieldValue::Pointer(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        FieldValue::List(v)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_value_type_check() {
        let v = FieldValue::Int64(42);
        assert_eq!(v.value_type(), Some(ValueType::Int64));
        assert_eq!(FieldValue::list([1i64]).value_type(), Some(ValueType::List));
    }

    #[test]
    fn test_value_null() {
        let v = FieldValue::Null;
        assert_eq!(v.value_type(), None);
        assert!(v.is_null());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(FieldValue::Boolean(true).as_bool(), Some(true));
        assert_eq!(FieldValue::Int32(42).as_i32(), Some(42));
        assert_eq!(FieldValue::Int64(100).as_i64(), Some(100));
        assert_eq!(FieldValue::Float64(2.5).as_f64(), Some(2.5));
        assert_eq!(FieldValue::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(
            FieldValue::list(["a", "b"]).as_list(),
            Some(&[FieldValue::from("a"), FieldValue::from("b")][..])
        );
        let ptr = ObjectRef::new("Post", "abc");
        assert_eq!(FieldValue::Pointer(ptr.clone()).as_pointer(), Some(&ptr));
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(FieldValue::Int32(42), FieldValue::Int32(42));
        assert_ne!(FieldValue::Int32(42), FieldValue::Int64(42));
        assert_eq!(FieldValue::Null, FieldValue::Null);
        assert_eq!(FieldValue::Float64(f64::NAN), FieldValue::Float64(f64::NAN));
        assert_eq!(
            FieldValue::List(vec![FieldValue::Int32(1)]),
            FieldValue::list([1i32])
        );
    }

    #[test]
    fn test_value_from_impls() {
        let v: FieldValue = 42i32.into();
        assert_eq!(v.as_i32(), Some(42));

        let v: FieldValue = "hello".into();
        assert_eq!(v.as_str(), Some("hello"));

        let v: FieldValue = Some(100i64).into();
        assert_eq!(v.as_i64(), Some(100));

        let v: FieldValue = None::<i32>.into();
        assert!(v.is_null());
    }
}
