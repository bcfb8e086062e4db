//! Value algebra used when folding mutations together.
//!
//! Numeric fields need addition; list fields need concatenation,
//! union with de-duplication and subtraction. Every operation checks its
//! operand types and leaves both operands untouched on failure.

use crate::error::{Error, Result};
use crate::types::ValueType;
use crate::value::FieldValue;
use alloc::vec::Vec;
use hashbrown::HashSet;

impl FieldValue {
    /// Adds two numeric values.
    ///
    /// Mixed operands are promoted along Int32 -> Int64 -> Float64. Integer
    /// overflow is reported instead of wrapping.
    pub fn checked_add(&self, other: &FieldValue) -> Result<FieldValue> {
        let lhs = numeric_type(self, other)?;
        let rhs = numeric_type(other, self)?;
        let target = if lhs.numeric_rank() >= rhs.numeric_rank() {
            lhs
        } else {
            rhs
        };

        match target {
            ValueType::Int32 => match (self, other) {
                (FieldValue::Int32(a), FieldValue::Int32(b)) => a
                    .checked_add(*b)
                    .map(FieldValue::Int32)
                    .ok_or_else(|| Error::numeric_overflow(ValueType::Int32)),
                _ => Err(Error::type_mismatch(ValueType::Int32, other.value_type())),
            },
            ValueType::Int64 => {
                let a = as_wide_int(self)?;
                let b = as_wide_int(other)?;
                a.checked_add(b)
                    .map(FieldValue::Int64)
                    .ok_or_else(|| Error::numeric_overflow(ValueType::Int64))
            }
            _ => Ok(FieldValue::Float64(as_float(self)? + as_float(other)?)),
        }
    }

    /// Returns the number of items if this is a List.
    pub fn item_count(&self) -> Option<usize> {
        self.as_list().map(|items| items.len())
    }

    /// Returns true if this is a List without items.
    ///
    /// Non-list values are never considered empty.
    pub fn is_empty_list(&self) -> bool {
        self.item_count() == Some(0)
    }

    /// Appends `other`'s items after this list's items.
    pub fn concat(&self, other: &FieldValue) -> Result<FieldValue> {
        let (left, right) = list_operands(self, other)?;
        let mut items = Vec::with_capacity(left.len() + right.len());
        items.extend_from_slice(left);
        items.extend_from_slice(right);
        Ok(FieldValue::List(items))
    }

    /// Appends each of `other`'s items not already present.
    ///
    /// Existing items keep their order; incoming duplicates collapse to
    /// their first occurrence.
    pub fn union_unique(&self, other: &FieldValue) -> Result<FieldValue> {
        let (left, right) = list_operands(self, other)?;
        let mut seen: HashSet<&FieldValue> = left.iter().collect();
        let mut items = left.to_vec();
        for item in right {
            if seen.insert(item) {
                items.push(item.clone());
            }
        }
        Ok(FieldValue::List(items))
    }

    /// Removes every item equal to one of `other`'s items.
    pub fn subtract(&self, other: &FieldValue) -> Result<FieldValue> {
        let (left, right) = list_operands(self, other)?;
        let removed: HashSet<&FieldValue> = right.iter().collect();
        let items = left
            .iter()
            .filter(|item| !removed.contains(item))
            .cloned()
            .collect();
        Ok(FieldValue::List(items))
    }
}

fn numeric_type(value: &FieldValue, other: &FieldValue) -> Result<ValueType> {
    match value.value_type() {
        Some(t) if t.is_numeric() => Ok(t),
        got => {
            let expected = other
                .value_type()
                .filter(|t| t.is_numeric())
                .unwrap_or(ValueType::Int64);
            Err(Error::type_mismatch(expected, got))
        }
    }
}

fn as_wide_int(value: &FieldValue) -> Result<i64> {
    match value {
        FieldValue::Int32(v) => Ok(*v as i64),
        FieldValue::Int64(v) => Ok(*v),
        other => Err(Error::type_mismatch(ValueType::Int64, other.value_type())),
    }
}

fn as_float(value: &FieldValue) -> Result<f64> {
    match value {
        FieldValue::Int32(v) => Ok(*v as f64),
        FieldValue::Int64(v) => Ok(*v as f64),
        FieldValue::Float64(v) => Ok(*v),
        other => Err(Error::type_mismatch(ValueType::Float64, other.value_type())),
    }
}

fn list_operands<'a>(
    left: &'a FieldValue,
    right: &'a FieldValue,
) -> Result<(&'a [FieldValue], &'a [FieldValue])> {
    let l = left
        .as_list()
        .ok_or_else(|| Error::type_mismatch(ValueType::List, left.value_type()))?;
    let r = right
        .as_list()
        .ok_or_else(|| Error::type_mismatch(ValueType::List, right.value_type()))?;
    Ok((l, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_same_type() {
        let sum = FieldValue::Int32(1).checked_add(&FieldValue::Int32(2)).unwrap();
        assert_eq!(sum, FieldValue::Int32(3));

        let sum = FieldValue::Int64(-5).checked_add(&FieldValue::Int64(5)).unwrap();
        assert_eq!(sum, FieldValue::Int64(0));

        let sum = FieldValue::Float64(0.5).checked_add(&FieldValue::Float64(1.0)).unwrap();
        assert_eq!(sum, FieldValue::Float64(1.5));
    }

    #[test]
    fn test_add_promotes() {
        let sum = FieldValue::Int32(1).checked_add(&FieldValue::Int64(2)).unwrap();
        assert_eq!(sum, FieldValue::Int64(3));

        let sum = FieldValue::Int64(2).checked_add(&FieldValue::Float64(0.5)).unwrap();
        assert_eq!(sum, FieldValue::Float64(2.5));
    }

    #[test]
    fn test_add_overflow() {
        let err = FieldValue::Int32(i32::MAX)
            .checked_add(&FieldValue::Int32(1))
            .unwrap_err();
        assert_eq!(err, Error::numeric_overflow(ValueType::Int32));

        let err = FieldValue::Int64(i64::MIN)
            .checked_add(&FieldValue::Int32(-1))
            .unwrap_err();
        assert_eq!(err, Error::numeric_overflow(ValueType::Int64));
    }

    #[test]
    fn test_add_non_numeric() {
        let err = FieldValue::from("a").checked_add(&FieldValue::Int32(1)).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch(ValueType::Int32, Some(ValueType::String))
        );

        let err = FieldValue::Int64(1).checked_add(&FieldValue::Null).unwrap_err();
        assert_eq!(err, Error::type_mismatch(ValueType::Int64, None));
    }

    #[test]
    fn test_concat() {
        let list = FieldValue::list([1i64, 2]).concat(&FieldValue::list([2i64, 3])).unwrap();
        assert_eq!(list, FieldValue::list([1i64, 2, 2, 3]));
    }

    #[test]
    fn test_union_unique() {
        let list = FieldValue::list(["a", "b"])
            .union_unique(&FieldValue::list(["b", "c", "c"]))
            .unwrap();
        assert_eq!(list, FieldValue::list(["a", "b", "c"]));
    }

    #[test]
    fn test_subtract_removes_all_occurrences() {
        let list = FieldValue::list([1i64, 2, 1, 3])
            .subtract(&FieldValue::list([1i64, 4]))
            .unwrap();
        assert_eq!(list, FieldValue::list([2i64, 3]));
    }

    #[test]
    fn test_list_ops_reject_scalars() {
        let err = FieldValue::Int64(1).concat(&FieldValue::list([1i64])).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch(ValueType::List, Some(ValueType::Int64))
        );
        assert!(FieldValue::list([1i64]).subtract(&FieldValue::Null).is_err());
    }

    #[test]
    fn test_item_count() {
        assert_eq!(FieldValue::list([1i64, 2]).item_count(), Some(2));
        assert_eq!(FieldValue::Int64(1).item_count(), None);
        assert!(FieldValue::List(Vec::new()).is_empty_list());
        assert!(!FieldValue::Null.is_empty_list());
    }
}
