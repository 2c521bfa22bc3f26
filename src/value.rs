//! Dynamic value representation for JSON data.
//!
//! This module provides the [`Value`] enum, the closed set of shapes the codec
//! produces and consumes. Arrays are [`List`]s and objects are [`OrderedMap`]s, so
//! element order and key order survive a decode/encode round trip.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use ordered_json::{value, Value};
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! let obj = value!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert_eq!(obj.to_string(), r#"{"name":"Alice","age":30}"#);
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use ordered_json::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//! assert!(!value.is_string());
//! assert_eq!(value.type_name(), "number");
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use ordered_json::Value;
//!
//! let value = Value::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use ordered_json::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value: Value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
//! assert_eq!(keys, vec!["x", "y"]);
//! ```

use crate::list::List;
use crate::map::OrderedMap;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A dynamically-typed representation of any JSON value.
///
/// Numbers are stored as `f64`. Equality is structural and order-sensitive: two
/// objects with the same pairs in a different order are not equal.
///
/// # Examples
///
/// ```rust
/// use ordered_json::{from_str, Value};
///
/// let a: Value = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// let b: Value = from_str(r#"{"y": 2, "x": 1}"#).unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a["x"], Value::from(1));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(List<Value>),
    Object(OrderedMap<String, Value>),
}

static NULL: Value = Value::Null;

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The JSON name of this value's type, as used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::Value;
    ///
    /// assert_eq!(Value::Null.type_name(), "null");
    /// assert_eq!(Value::from(vec![Value::Null]).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_bool(), Some(true));
    /// assert_eq!(Value::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the value is a whole number that fits in `i64`, returns it. Otherwise
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::Value;
    ///
    /// assert_eq!(Value::Number(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Number(42.5).as_i64(), None);
    /// assert_eq!(Value::from("42").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => integral(*n),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&List<Value>> {
        match self {
            Value::Array(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is an array, returns a mutable reference to it.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut List<Value>> {
        match self {
            Value::Array(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&OrderedMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is an object, returns a mutable reference to it.
    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut OrderedMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if the value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an element by position if the value is an array. Negative indices
    /// count from the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::{value, Value};
    ///
    /// let v = value!([1, 2, 3]);
    /// assert_eq!(v.get_at(-1), Some(&Value::from(3)));
    /// assert_eq!(v.get_at(3), None);
    /// ```
    #[must_use]
    pub fn get_at(&self, index: isize) -> Option<&Value> {
        self.as_array().and_then(|list| list.get_at(index))
    }

    /// Replaces the value with `Null` and returns the previous one.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// If the value is a string, returns it by value. Otherwise returns `None`.
    #[must_use]
    pub fn into_string(self) -> Option<String> {
        match self.unpack() {
            Unpacked::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns the list by value. Otherwise returns `None`.
    ///
    /// `Value` has a custom `Drop`, so its containers cannot be moved out with a
    /// by-value `match`; use this or [`Value::into_object`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::value;
    ///
    /// let list = value!([1, 2]).into_array().unwrap();
    /// assert_eq!(list.len(), 2);
    /// assert!(value!({}).into_array().is_none());
    /// ```
    #[must_use]
    pub fn into_array(self) -> Option<List<Value>> {
        match self.unpack() {
            Unpacked::Array(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is an object, returns the map by value. Otherwise returns `None`.
    #[must_use]
    pub fn into_object(self) -> Option<OrderedMap<String, Value>> {
        match self.unpack() {
            Unpacked::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Moves the contents out, leaving an empty shell behind for `Drop`.
    pub(crate) fn unpack(mut self) -> Unpacked {
        match &mut self {
            Value::Null => Unpacked::Null,
            Value::Bool(b) => Unpacked::Bool(*b),
            Value::Number(n) => Unpacked::Number(*n),
            Value::String(s) => Unpacked::String(std::mem::take(s)),
            Value::Array(list) => Unpacked::Array(std::mem::take(list)),
            Value::Object(map) => Unpacked::Object(std::mem::take(map)),
        }
    }

    /// Moves nested containers into `pending` and drops scalar children in place.
    fn detach_children(&mut self, pending: &mut Vec<Value>) {
        let mut keep = |child: Value| {
            if child.has_children() {
                pending.push(child);
            }
        };
        match self {
            Value::Array(list) => std::mem::take(list).into_iter().for_each(&mut keep),
            Value::Object(map) => std::mem::take(map)
                .into_iter()
                .for_each(|(_, child)| keep(child)),
            _ => {}
        }
    }

    fn has_children(&self) -> bool {
        match self {
            Value::Array(list) => !list.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => false,
        }
    }
}

/// A `Value` taken apart by [`Value::unpack`].
pub(crate) enum Unpacked {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(List<Value>),
    Object(OrderedMap<String, Value>),
}

/// Tears nested containers down with an explicit stack, so dropping a deeply
/// nested value does not overflow the call stack.
impl Drop for Value {
    fn drop(&mut self) {
        if !self.has_children() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

/// Returns `Null` for a missing key or a non-object.
impl std::ops::Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Returns `Null` for an out-of-range index or a non-array.
impl std::ops::Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        isize::try_from(index)
            .ok()
            .and_then(|i| self.get_at(i))
            .unwrap_or(&NULL)
    }
}

/// Compact JSON; the alternate flag (`{:#}`) selects indented output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = if f.alternate() {
            crate::to_string_pretty(self)
        } else {
            crate::to_string(self)
        };
        match encoded {
            Ok(json) => f.write_str(&json),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                let negative_zero = *n == 0.0 && n.is_sign_negative();
                if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !negative_zero {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut list = List::new();
                while let Some(elem) = seq.next_element()? {
                    list.push_back(elem);
                }
                Ok(Value::Array(list))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = OrderedMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.set(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => integral(n)
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        let found = value.type_name();
        value
            .into_string()
            .ok_or_else(|| crate::Error::custom(format!("expected string, found {}", found)))
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! from_number {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize f32 f64);

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(List::from(value))
    }
}

impl From<List<Value>> for Value {
    fn from(value: List<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<OrderedMap<String, Value>> for Value {
    fn from(value: OrderedMap<String, Value>) -> Self {
        Value::Object(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = TryFrom::try_from(Value::Number(42.0)).unwrap();
        assert_eq!(result, 42);

        assert!(i64::try_from(Value::Number(42.5)).is_err());
        assert!(i64::try_from(Value::Number(f64::NAN)).is_err());
        assert!(i64::try_from(Value::String("test".to_string())).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let result: f64 = TryFrom::try_from(Value::Number(3.5)).unwrap();
        assert_eq!(result, 3.5);
        assert!(f64::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(Value::Bool(true)).unwrap());
        assert!(bool::try_from(Value::Number(1.0)).is_err());

        let result: String = TryFrom::try_from(Value::from("hello")).unwrap();
        assert_eq!(result, "hello");
        let err = String::try_from(Value::Number(42.0)).unwrap_err();
        assert!(err.to_string().contains("found number"));
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Number(42.0));
        assert_eq!(Value::from(42u64), Value::Number(42.0));
        assert_eq!(Value::from(3.5f64), Value::Number(3.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_from_collections() {
        let value = Value::from(vec![Value::from(1), Value::from(2)]);
        let list = value.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get_at(0), Some(&Value::from(1)));

        let mut map = OrderedMap::new();
        map.set("key".to_string(), Value::from(42));
        let value = Value::from(map.clone());
        assert_eq!(value, Value::Object(map));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: Value = vec![("a".to_string(), Value::from(1)), ("b".to_string(), Value::from(2))]
            .into_iter()
            .collect();
        let ba: Value = vec![("b".to_string(), Value::from(2)), ("a".to_string(), Value::from(1))]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);
        assert_eq!(ab.get("a"), ba.get("a"));
    }

    #[test]
    fn test_index_missing_is_null() {
        let value = Value::from(vec![Value::from(1)]);
        assert!(value[5].is_null());
        assert!(value["key"].is_null());
        assert_eq!(value[0], Value::from(1));
    }

    #[test]
    fn test_display_compact_and_alternate() {
        let value: Value = vec![("a".to_string(), Value::from(vec![Value::Null]))]
            .into_iter()
            .collect();
        assert_eq!(value.to_string(), r#"{"a":[null]}"#);
        assert_eq!(format!("{:#}", value), "{\n  \"a\": [\n    null\n  ]\n}");
    }

    #[test]
    fn test_display_reports_non_finite() {
        let value = Value::Number(f64::NAN);
        assert!(value.to_string().starts_with('<'));
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_null(v: &Value) -> bool {
            v.is_null()
        }

        assert!(check_null(&Value::Null));
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn test_into_containers() {
        let value = Value::from(vec![Value::from(1), Value::from("x")]);
        let list = value.into_array().unwrap();
        assert_eq!(list.get_at(1), Some(&Value::from("x")));

        let mut map = OrderedMap::new();
        map.set("k".to_string(), Value::Null);
        assert_eq!(Value::Object(map.clone()).into_object(), Some(map));

        assert_eq!(Value::from("s").into_string(), Some("s".to_string()));
        assert_eq!(Value::Null.into_array(), None);
        assert_eq!(Value::from(true).into_object(), None);
        assert_eq!(String::try_from(Value::from(1)).unwrap_err().to_string(), "expected string, found number");
    }

    #[test]
    fn test_drop_deeply_nested() {
        let mut value = Value::Null;
        for i in 0..200_000 {
            value = if i % 2 == 0 {
                Value::from(vec![value, Value::from(i)])
            } else {
                let mut map = OrderedMap::new();
                map.set("next".to_string(), value);
                Value::Object(map)
            };
        }
        drop(value);
    }
}
