//! [`Value`]: the dynamically typed tree that events are built into and
//! produced from.

mod convert;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::events::{from_value, Consumer, ToValue};

/// Object storage: keys are unique, iteration is in key order.
pub type Object<'a> = BTreeMap<String, Value<'a>>;

/// A deferred value: something that can replay itself as events.
///
/// Used through [`Value::OpaquePtr`] to splice external data into a tree
/// without converting it first.
pub trait Produce {
    fn produce(&self, consumer: &mut dyn Consumer) -> Result<()>;
}

/// Borrowed handle to a [`Produce`] implementation.
#[derive(Clone, Copy)]
pub struct Opaque<'a> {
    data: &'a dyn Produce,
}

impl<'a> Opaque<'a> {
    pub fn new(data: &'a dyn Produce) -> Self {
        Self { data }
    }

    pub fn produce(&self, consumer: &mut dyn Consumer) -> Result<()> {
        self.data.produce(consumer)
    }
}

impl fmt::Debug for Opaque<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

/// A node of a value tree.
///
/// `StringView`, `BinaryView`, `ValuePtr` and `OpaquePtr` borrow data owned
/// elsewhere for `'a`; every other variant owns its payload. A tree without
/// borrowed variants is *self-contained* and converts to `Value<'static>`
/// through [`Value::make_self_contained`].
#[derive(Debug, Clone, Default)]
pub enum Value<'a> {
    #[default]
    Uninitialized,
    Null,
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Double(f64),
    String(String),
    StringView(&'a str),
    Binary(Vec<u8>),
    BinaryView(&'a [u8]),
    Array(Vec<Value<'a>>),
    Object(Object<'a>),
    ValuePtr(&'a Value<'a>),
    OpaquePtr(Opaque<'a>),
}

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Uninitialized,
    Null,
    Boolean,
    Signed,
    Unsigned,
    Double,
    String,
    StringView,
    Binary,
    BinaryView,
    Array,
    Object,
    ValuePtr,
    OpaquePtr,
}

impl Type {
    pub fn of(v: &Value<'_>) -> Type {
        v.value_type()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Uninitialized => "uninitialized",
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Signed => "signed",
            Type::Unsigned => "unsigned",
            Type::Double => "double",
            Type::String => "string",
            Type::StringView => "string_view",
            Type::Binary => "binary",
            Type::BinaryView => "binary_view",
            Type::Array => "array",
            Type::Object => "object",
            Type::ValuePtr => "value_ptr",
            Type::OpaquePtr => "opaque_ptr",
        };
        f.write_str(name)
    }
}

impl<'a> Value<'a> {
    pub fn string_view(s: &'a str) -> Self {
        Value::StringView(s)
    }

    pub fn binary_view(b: &'a [u8]) -> Self {
        Value::BinaryView(b)
    }

    pub fn value_ptr(v: &'a Value<'a>) -> Self {
        Value::ValuePtr(v)
    }

    pub fn opaque_ptr(data: &'a dyn Produce) -> Self {
        Value::OpaquePtr(Opaque::new(data))
    }

    pub fn empty_array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn empty_object() -> Self {
        Value::Object(Object::new())
    }

    pub fn value_type(&self) -> Type {
        match self {
            Value::Uninitialized => Type::Uninitialized,
            Value::Null => Type::Null,
            Value::Boolean(_) => Type::Boolean,
            Value::Signed(_) => Type::Signed,
            Value::Unsigned(_) => Type::Unsigned,
            Value::Double(_) => Type::Double,
            Value::String(_) => Type::String,
            Value::StringView(_) => Type::StringView,
            Value::Binary(_) => Type::Binary,
            Value::BinaryView(_) => Type::BinaryView,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
            Value::ValuePtr(_) => Type::ValuePtr,
            Value::OpaquePtr(_) => Type::OpaquePtr,
        }
    }

    /// Follows `ValuePtr` links to the node they point at.
    pub fn resolve(&self) -> &Value<'a> {
        let mut v = self;
        while let Value::ValuePtr(target) = v {
            v = target;
        }
        v
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self.resolve(), Value::Uninitialized)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.resolve(), Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.resolve(), Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self.resolve(),
            Value::Signed(_) | Value::Unsigned(_) | Value::Double(_)
        )
    }

    pub fn is_string(&self) -> bool {
        matches!(self.resolve(), Value::String(_) | Value::StringView(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.resolve(), Value::Binary(_) | Value::BinaryView(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.resolve(), Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.resolve(), Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.resolve() {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as `i64`, if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self.resolve() {
            Value::Signed(i) => Some(*i),
            Value::Unsigned(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// The value as `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self.resolve() {
            Value::Signed(i) => u64::try_from(*i).ok(),
            Value::Unsigned(u) => Some(*u),
            _ => None,
        }
    }

    /// Any number, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.resolve() {
            Value::Signed(i) => Some(*i as f64),
            Value::Unsigned(u) => Some(*u as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.resolve() {
            Value::String(s) => Some(s),
            Value::StringView(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.resolve() {
            Value::Binary(b) => Some(b),
            Value::BinaryView(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self.resolve() {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self.resolve() {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Object member lookup.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Array element lookup.
    pub fn at(&self, index: usize) -> Option<&Value<'a>> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// Number of elements or members; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self.resolve() {
            Value::Array(a) => Some(a.len()),
            Value::Object(o) => Some(o.len()),
            _ => None,
        }
    }

    /// Appends to an array, turning an uninitialized value into one first.
    ///
    /// Returns `false` (and drops `v`) when `self` is neither.
    pub fn push(&mut self, v: Value<'a>) -> bool {
        if let Value::Uninitialized = self {
            *self = Value::empty_array();
        }
        match self {
            Value::Array(a) => {
                a.push(v);
                true
            }
            _ => false,
        }
    }

    /// Inserts into an object, turning an uninitialized value into one first.
    ///
    /// Returns `false` (and drops `v`) when `self` is neither.
    pub fn insert(&mut self, key: impl Into<String>, v: Value<'a>) -> bool {
        if let Value::Uninitialized = self {
            *self = Value::empty_object();
        }
        match self {
            Value::Object(o) => {
                o.insert(key.into(), v);
                true
            }
            _ => false,
        }
    }

    /// `true` when no node of the tree borrows external data.
    pub fn is_self_contained(&self) -> bool {
        match self {
            Value::StringView(_)
            | Value::BinaryView(_)
            | Value::ValuePtr(_)
            | Value::OpaquePtr(_) => false,
            Value::Array(a) => a.iter().all(Value::is_self_contained),
            Value::Object(o) => o.values().all(Value::is_self_contained),
            _ => true,
        }
    }

    /// Deep copy that owns every payload: views become owned strings and
    /// binaries, pointers are replaced by copies of their targets, opaque
    /// values are materialized by running their producer.
    pub fn make_self_contained(&self) -> Result<Value<'static>> {
        Ok(match self {
            Value::Uninitialized => Value::Uninitialized,
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Signed(i) => Value::Signed(*i),
            Value::Unsigned(u) => Value::Unsigned(*u),
            Value::Double(d) => Value::Double(*d),
            Value::String(s) => Value::String(s.clone()),
            Value::StringView(s) => Value::String((*s).to_owned()),
            Value::Binary(b) => Value::Binary(b.clone()),
            Value::BinaryView(b) => Value::Binary(b.to_vec()),
            Value::Array(a) => Value::Array(
                a.iter()
                    .map(Value::make_self_contained)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(o) => Value::Object(
                o.iter()
                    .map(|(k, v)| Ok((k.clone(), v.make_self_contained()?)))
                    .collect::<Result<_>>()?,
            ),
            Value::ValuePtr(target) => target.make_self_contained()?,
            Value::OpaquePtr(opaque) => {
                let mut to_value = ToValue::new();
                opaque.produce(&mut to_value)?;
                to_value.into_value()?
            }
        })
    }
}

impl Produce for Value<'_> {
    fn produce(&self, consumer: &mut dyn Consumer) -> Result<()> {
        from_value(self, consumer)
    }
}

fn numbers_eq(l: &Value<'_>, r: &Value<'_>) -> Option<bool> {
    use Value::*;
    Some(match (l, r) {
        (Signed(a), Signed(b)) => a == b,
        (Unsigned(a), Unsigned(b)) => a == b,
        (Double(a), Double(b)) => a == b,
        (Signed(a), Unsigned(b)) | (Unsigned(b), Signed(a)) => u64::try_from(*a) == Ok(*b),
        (Signed(a), Double(b)) | (Double(b), Signed(a)) => *a as f64 == *b,
        (Unsigned(a), Double(b)) | (Double(b), Unsigned(a)) => *a as f64 == *b,
        _ => return None,
    })
}

/// Semantic equality: views equal their owned counterparts, pointers compare
/// by target, numbers compare by value across representations, opaque values
/// compare by what they produce.
impl<'b> PartialEq<Value<'b>> for Value<'_> {
    fn eq(&self, other: &Value<'b>) -> bool {
        let (l, r) = (self.resolve(), other.resolve());
        if let Value::OpaquePtr(_) = l {
            return l.make_self_contained().is_ok_and(|v| v == *r);
        }
        if let Value::OpaquePtr(_) = r {
            return r.make_self_contained().is_ok_and(|v| *l == v);
        }
        if let Some(eq) = numbers_eq(l, r) {
            return eq;
        }
        match (l, r) {
            (Value::Uninitialized, Value::Uninitialized) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            _ => match (l.as_str(), r.as_str()) {
                (Some(a), Some(b)) => a == b,
                _ => match (l.as_bytes(), r.as_bytes()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                },
            },
        }
    }
}

impl PartialEq<str> for Value<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::Signed(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::Unsigned(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Double(v as f64)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value<'_> {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<Vec<u8>> for Value<'_> {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(v: Vec<Value<'a>>) -> Self {
        Value::Array(v)
    }
}

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(v: Object<'a>) -> Self {
        Value::Object(v)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value<'static> {
        let mut v = Value::Uninitialized;
        v.insert("a", Value::from(vec![Value::from(1u8), Value::from("x")]));
        v.insert("b", Value::Null);
        v
    }

    #[test]
    fn accessors() {
        let v = sample();
        assert_eq!(v.value_type(), Type::Object);
        assert_eq!(v.len(), Some(2));
        assert_eq!(v.get("a").and_then(|a| a.at(0)).and_then(Value::as_u64), Some(1));
        assert_eq!(v.get("a").and_then(|a| a.at(1)).and_then(Value::as_str), Some("x"));
        assert!(v.get("b").is_some_and(Value::is_null));
        assert!(v.get("c").is_none());
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(Value::Signed(5), Value::Unsigned(5));
        assert_eq!(Value::Double(5.0), Value::Unsigned(5));
        assert_ne!(Value::Signed(-1), Value::Unsigned(u64::MAX));
        assert_ne!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_eq!(Value::Signed(-1).as_u64(), None);
        assert_eq!(Value::Unsigned(u64::MAX).as_i64(), None);
    }

    #[test]
    fn views_and_pointers_equal_owned_forms() {
        let text = String::from("hello");
        let bytes = vec![1u8, 2, 3];
        let target = Value::from(vec![Value::from(true)]);
        let mut v = Value::Uninitialized;
        v.push(Value::string_view(&text));
        v.push(Value::binary_view(&bytes));
        v.push(Value::value_ptr(&target));

        assert!(!v.is_self_contained());
        let owned = v.make_self_contained().unwrap();
        assert!(owned.is_self_contained());
        assert_eq!(owned.value_type(), Type::Array);
        assert_eq!(owned.at(0).map(Value::value_type), Some(Type::String));
        assert_eq!(owned.at(1).map(Value::value_type), Some(Type::Binary));
        assert_eq!(owned.at(2).map(Value::value_type), Some(Type::Array));
        assert_eq!(v, owned);
    }

    #[test]
    fn opaque_values_materialize_through_their_producer() {
        let source = sample();
        let v = Value::opaque_ptr(&source);
        assert!(!v.is_self_contained());
        let owned = v.make_self_contained().unwrap();
        assert_eq!(owned, source);
        assert_eq!(v, source);
    }

    #[test]
    fn push_and_insert_refuse_scalars() {
        let mut v = Value::from(1i32);
        assert!(!v.push(Value::Null));
        assert!(!v.insert("k", Value::Null));
        assert_eq!(v, Value::Signed(1));
    }
}
