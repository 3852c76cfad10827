//! The JSON value tree.
//!
//! [`Value`] owns its payloads through [`Cow`], so a tree can borrow string
//! content straight out of a parse buffer, or borrow whole subtrees from
//! another tree via [`Value::to_ref`]. Dropping a value never touches
//! borrowed data.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::tree::{Items, Members};

/// The primary discriminator of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
    /// A double-precision number.
    Number,
    /// A string.
    String,
    /// Pre-rendered JSON text, emitted verbatim by the serializer.
    Raw,
    /// An ordered sequence of values.
    Array,
    /// An ordered sequence of key/value members.
    Object,
}

/// A JSON value.
///
/// The lifetime `'a` is the lifetime of any borrowed payload: string content
/// borrowed from a parse buffer, or children borrowed from another tree.
/// Fully owned trees are `Value<'static>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value<'a> {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number. JSON numbers are IEEE 754 doubles; non-finite values are
    /// constructible and serialize as `null`.
    Number(f64),
    /// A string.
    String(Cow<'a, str>),
    /// Pre-rendered JSON emitted verbatim, bypassing escaping. Never
    /// produced by the parser.
    Raw(Cow<'a, str>),
    /// An array.
    Array(Items<'a>),
    /// An object.
    Object(Members<'a>),
}

impl<'a> Value<'a> {
    /// Create a string value, copying or borrowing per the argument.
    pub fn string(s: impl Into<Cow<'a, str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a string value that borrows `s` without copying.
    pub const fn borrowed_str(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }

    /// Create a raw value whose payload is emitted verbatim.
    pub fn raw(s: impl Into<Cow<'a, str>>) -> Self {
        Value::Raw(s.into())
    }

    /// The kind of this value.
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Raw(_) => Kind::Raw,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Is this `null`?
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Is this a boolean?
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Is this `true`?
    pub const fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// Is this `false`?
    pub const fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    /// Is this a number?
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Is this a string?
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Is this a raw value?
    pub const fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    /// Is this an array?
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Is this an object?
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// The boolean payload, if this is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a number.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric payload truncated to `i64`, saturating at the type
    /// bounds. Not exact for magnitudes beyond 2^53; inspect [`Value::as_f64`]
    /// when integer fidelity matters.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    /// The numeric payload truncated to `i32`, saturating at the type bounds.
    pub fn as_i32(&self) -> Option<i32> {
        self.as_f64().map(|n| n as i32)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The raw payload, if this is a raw value.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Value::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// The children, if this is an array.
    pub const fn as_array(&self) -> Option<&Items<'a>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The children, if this is an array.
    pub fn as_array_mut(&mut self) -> Option<&mut Items<'a>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this is an object.
    pub const fn as_object(&self) -> Option<&Members<'a>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// The members, if this is an object.
    pub fn as_object_mut(&mut self) -> Option<&mut Members<'a>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up an object member by key (case-sensitive, first match).
    ///
    /// Returns `None` when the key is absent or this is not an object.
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// Look up an object member by key, for mutation.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        self.as_object_mut().and_then(|members| members.get_mut(key))
    }

    /// Look up an array element by index.
    ///
    /// Returns `None` when the index is out of range or this is not an array.
    pub fn get_index(&self, index: usize) -> Option<&Value<'a>> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Number of children of an array or object. Zero for every other kind.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        }
    }

    /// Whether an array or object has no children. True for every other kind.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a shallow view of this value that borrows its payload and
    /// children instead of copying them.
    ///
    /// The view can be spliced into another tree (for printing, say) while
    /// ownership stays here; dropping the other tree leaves this value
    /// untouched. [`Value::duplicate_deep`] turns a view back into an owner.
    pub fn to_ref(&'a self) -> Value<'a> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(Cow::Borrowed(s.as_ref())),
            Value::Raw(s) => Value::Raw(Cow::Borrowed(s.as_ref())),
            Value::Array(items) => Value::Array(Items::borrowed(items.as_slice())),
            Value::Object(members) => Value::Object(Members::borrowed(members.as_slice())),
        }
    }
}

impl fmt::Display for Value<'_> {
    /// Formats as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::to_string(self))
    }
}

impl From<()> for Value<'_> {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(v: $ty) -> Self {
                    Value::Number(f64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, u8, u16, u32);

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::String(Cow::Borrowed(v))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Value::String(Cow::Owned(v))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(v: Cow<'a, str>) -> Self {
        Value::String(v)
    }
}

impl<'a> From<Items<'a>> for Value<'a> {
    fn from(v: Items<'a>) -> Self {
        Value::Array(v)
    }
}

impl<'a> From<Members<'a>> for Value<'a> {
    fn from(v: Members<'a>) -> Self {
        Value::Object(v)
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(v: Vec<Value<'a>>) -> Self {
        Value::Array(Items::from(v))
    }
}

impl<'a> FromIterator<Value<'a>> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = Value<'a>>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_true());
        assert!(Value::Bool(false).is_false());
        assert_eq!(Value::Number(1.5).kind(), Kind::Number);
        assert_eq!(Value::string("x").kind(), Kind::String);
        assert_eq!(Value::raw("1e3").kind(), Kind::Raw);
        assert!(Value::from(vec![Value::Null]).is_array());
    }

    #[test]
    fn saturating_integer_mirror() {
        assert_eq!(Value::Number(1e300).as_i32(), Some(i32::MAX));
        assert_eq!(Value::Number(-1e300).as_i32(), Some(i32::MIN));
        assert_eq!(Value::Number(-2.9).as_i32(), Some(-2));
        assert_eq!(Value::Number(f64::NAN).as_i32(), Some(0));
        assert_eq!(Value::Number(1e300).as_i64(), Some(i64::MAX));
    }

    #[test]
    fn reference_view_borrows() {
        let owner = Value::from("payload".to_string());
        let view = owner.to_ref();
        assert!(matches!(view, Value::String(Cow::Borrowed("payload"))));
        drop(view);
        assert_eq!(owner.as_str(), Some("payload"));
    }

    #[test]
    fn delegating_lookup() {
        let doc = crate::from_str(r#"{"a":[10,20]}"#).unwrap();
        assert_eq!(doc.get("a").and_then(|a| a.get_index(1)), Some(&Value::Number(20.0)));
        assert_eq!(doc.get("missing"), None);
        assert_eq!(doc.get_index(0), None);
        assert_eq!(doc.len(), 1);
    }
}
