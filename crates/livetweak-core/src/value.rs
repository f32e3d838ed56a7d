#![forbid(unsafe_code)]

//! Type-erased tweak values with total coercion.
//!
//! A [`Value`] carries one scalar, string, or opaque-reference payload,
//! tagged by [`ValueKind`]. Every tweak is pinned to the kind of its default
//! value at creation time; assignments with a different kind are rejected at
//! the [`Tweak`](crate::Tweak) layer, never silently converted.
//!
//! # Invariants
//!
//! 1. **Coercion is total**: the `as_*` readers never panic and never fail;
//!    unsupported combinations fall back to a numeric zero, `false`, or the
//!    empty string.
//! 2. **Ordering is same-kind only**: [`Value::partial_cmp_same_kind`]
//!    returns `Some` only for two values of the same ordered (numeric) kind.
//! 3. **Clamping never changes kind**: [`Value::clamped`] returns a value of
//!    the receiver's kind, applying each bound independently when present.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Cross-kind read | `as_i64` on a `Str` | Returns `0` (documented fallback) |
//! | Opaque stringify | `as_string` on `Opaque` | Returns `""` (the defined empty case) |
//! | Mixed-kind clamp | bound kind differs from value kind | Bound is ignored |

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// The closed set of tags a [`Value`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// 64-bit float.
    Float,
    /// 64-bit signed integer.
    Int,
    /// 64-bit unsigned integer.
    UInt,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Str,
    /// Opaque shared reference; compared by identity, never ordered.
    Opaque,
}

impl ValueKind {
    /// Whether values of this kind have a total order usable for clamping.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Float | Self::Int | Self::UInt)
    }

    /// Human-readable tag name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::Opaque => "opaque",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type-erased, coercible tweak value.
///
/// # Example
///
/// ```
/// use livetweak_core::Value;
///
/// let v = Value::from(3i64);
/// assert_eq!(v.as_i64(), 3);
/// assert_eq!(v.as_f64(), 3.0);
/// assert!(v.as_bool());
/// assert_eq!(v.as_string(), "3");
/// ```
#[derive(Clone)]
pub enum Value {
    /// 64-bit float.
    Float(f64),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer.
    UInt(u64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
    /// Opaque shared reference (the "anything else" tag).
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary shared object as an opaque value.
    #[must_use]
    pub fn opaque<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self::Opaque(value)
    }

    /// The tag this value carries.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::Bool(_) => ValueKind::Bool,
            Self::Str(_) => ValueKind::Str,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Read as a float. Numeric kinds convert, booleans read 1/0,
    /// everything else reads 0.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Float(v) => *v,
            Self::Int(v) => *v as f64,
            Self::UInt(v) => *v as f64,
            Self::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Str(_) | Self::Opaque(_) => 0.0,
        }
    }

    /// Read as a signed integer. Floats truncate toward zero (saturating at
    /// the `i64` range), unsigned values saturate, booleans read 1/0,
    /// everything else reads 0.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Float(v) => *v as i64,
            Self::Int(v) => *v,
            Self::UInt(v) => i64::try_from(*v).unwrap_or(i64::MAX),
            Self::Bool(v) => i64::from(*v),
            Self::Str(_) | Self::Opaque(_) => 0,
        }
    }

    /// Read as an unsigned integer. Negative inputs saturate to 0.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        match self {
            Self::Float(v) => {
                if *v <= 0.0 {
                    0
                } else {
                    *v as u64
                }
            }
            Self::Int(v) => u64::try_from(*v).unwrap_or(0),
            Self::UInt(v) => *v,
            Self::Bool(v) => u64::from(*v),
            Self::Str(_) | Self::Opaque(_) => 0,
        }
    }

    /// Read as a boolean: true for any non-zero numeric representation.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Float(v) => *v != 0.0,
            Self::Int(v) => *v != 0,
            Self::UInt(v) => *v != 0,
            Self::Bool(v) => *v,
            Self::Str(_) | Self::Opaque(_) => false,
        }
    }

    /// Read as a string. Strings are returned verbatim, numerics and
    /// booleans are formatted, opaque references fall back to `""`.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Float(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Str(v) => v.clone(),
            Self::Opaque(_) => String::new(),
        }
    }

    /// Borrow the opaque payload, if this is an opaque value.
    #[must_use]
    pub fn as_opaque(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        match self {
            Self::Opaque(v) => Some(v),
            _ => None,
        }
    }

    /// Compare two values of the same ordered kind.
    ///
    /// Returns `None` for mixed kinds, unordered kinds, or a float `NaN`.
    #[must_use]
    pub fn partial_cmp_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::UInt(a), Self::UInt(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Clamp into the given bounds, applying each bound independently when
    /// present and of the receiver's (ordered) kind. Mismatched or absent
    /// bounds leave the value untouched.
    #[must_use]
    pub fn clamped(&self, min: Option<&Self>, max: Option<&Self>) -> Self {
        let mut value = self.clone();
        if let Some(lo) = min
            && value.partial_cmp_same_kind(lo) == Some(Ordering::Less)
        {
            value = lo.clone();
        }
        if let Some(hi) = max
            && value.partial_cmp_same_kind(hi) == Some(Ordering::Greater)
        {
            value = hi.clone();
        }
        value
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            // Opaque values compare by identity.
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::UInt(v as u64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    //! Serde support covers the plain tags only; opaque references have no
    //! meaningful wire form and refuse to serialize.

    use super::Value;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename = "Value")]
    enum PlainValue {
        Float(f64),
        Int(i64),
        UInt(u64),
        Bool(bool),
        Str(String),
    }

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let plain = match self {
                Value::Float(v) => PlainValue::Float(*v),
                Value::Int(v) => PlainValue::Int(*v),
                Value::UInt(v) => PlainValue::UInt(*v),
                Value::Bool(v) => PlainValue::Bool(*v),
                Value::Str(v) => PlainValue::Str(v.clone()),
                Value::Opaque(_) => {
                    return Err(S::Error::custom("opaque tweak values cannot be serialized"));
                }
            };
            plain.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match PlainValue::deserialize(deserializer)? {
                PlainValue::Float(v) => Value::Float(v),
                PlainValue::Int(v) => Value::Int(v),
                PlainValue::UInt(v) => Value::UInt(v),
                PlainValue::Bool(v) => Value::Bool(v),
                PlainValue::Str(v) => Value::Str(v),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Value::Float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::Int(-2).kind(), ValueKind::Int);
        assert_eq!(Value::UInt(2).kind(), ValueKind::UInt);
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from("x").kind(), ValueKind::Str);
        assert_eq!(Value::opaque(Arc::new(7u8)).kind(), ValueKind::Opaque);
    }

    #[test]
    fn ordered_kinds() {
        assert!(ValueKind::Float.is_ordered());
        assert!(ValueKind::Int.is_ordered());
        assert!(ValueKind::UInt.is_ordered());
        assert!(!ValueKind::Bool.is_ordered());
        assert!(!ValueKind::Str.is_ordered());
        assert!(!ValueKind::Opaque.is_ordered());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::Float(2.9).as_i64(), 2);
        assert_eq!(Value::Float(2.9).as_u64(), 2);
        assert_eq!(Value::Int(-3).as_f64(), -3.0);
        assert_eq!(Value::Int(-3).as_u64(), 0);
        assert_eq!(Value::UInt(u64::MAX).as_i64(), i64::MAX);
        assert_eq!(Value::Float(-1.0).as_u64(), 0);
    }

    #[test]
    fn bool_reads_nonzero() {
        assert!(Value::Float(0.25).as_bool());
        assert!(Value::Int(-1).as_bool());
        assert!(Value::UInt(7).as_bool());
        assert!(!Value::Float(0.0).as_bool());
        assert!(!Value::Int(0).as_bool());
        assert!(!Value::from("yes").as_bool());
    }

    #[test]
    fn string_fallback() {
        assert_eq!(Value::from("hi").as_string(), "hi");
        assert_eq!(Value::Int(5).as_string(), "5");
        assert_eq!(Value::Bool(false).as_string(), "false");
        assert_eq!(Value::opaque(Arc::new(())).as_string(), "");
    }

    #[test]
    fn cross_kind_reads_are_total() {
        let s = Value::from("12");
        assert_eq!(s.as_f64(), 0.0);
        assert_eq!(s.as_i64(), 0);
        assert_eq!(s.as_u64(), 0);
        assert!(!s.as_bool());
    }

    #[test]
    fn same_kind_ordering() {
        let a = Value::Int(1);
        let b = Value::Int(2);
        assert_eq!(a.partial_cmp_same_kind(&b), Some(Ordering::Less));
        assert_eq!(a.partial_cmp_same_kind(&Value::Float(2.0)), None);
        assert_eq!(Value::from("a").partial_cmp_same_kind(&Value::from("b")), None);
    }

    #[test]
    fn clamp_applies_each_bound() {
        let min = Value::Int(1);
        let max = Value::Int(5);
        assert_eq!(Value::Int(10).clamped(Some(&min), Some(&max)), Value::Int(5));
        assert_eq!(Value::Int(0).clamped(Some(&min), Some(&max)), Value::Int(1));
        assert_eq!(Value::Int(3).clamped(Some(&min), Some(&max)), Value::Int(3));
        // One-sided bounds still clamp their side.
        assert_eq!(Value::Int(0).clamped(Some(&min), None), Value::Int(1));
        assert_eq!(Value::Int(10).clamped(None, Some(&max)), Value::Int(5));
    }

    #[test]
    fn clamp_ignores_mismatched_bounds() {
        let v = Value::from("red");
        assert_eq!(v.clamped(Some(&Value::Int(1)), Some(&Value::Int(5))), v);
        let f = Value::Float(9.0);
        assert_eq!(f.clamped(Some(&Value::Int(1)), None), f);
    }

    #[test]
    fn clamp_is_idempotent() {
        let min = Value::Float(0.0);
        let max = Value::Float(1.0);
        let once = Value::Float(3.5).clamped(Some(&min), Some(&max));
        let twice = once.clamped(Some(&min), Some(&max));
        assert_eq!(once, twice);
    }

    #[test]
    fn opaque_equality_is_identity() {
        let a: Arc<dyn Any + Send + Sync> = Arc::new(1u32);
        let v1 = Value::Opaque(Arc::clone(&a));
        let v2 = Value::Opaque(a);
        let v3 = Value::opaque(Arc::new(1u32));
        assert_eq!(v1, v2);
        assert_ne!(v1, v3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_plain_tags() {
        for value in [
            Value::Float(1.5),
            Value::Int(-2),
            Value::UInt(9),
            Value::Bool(true),
            Value::from("accent"),
        ] {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value, back);
        }
        assert!(serde_json::to_string(&Value::opaque(Arc::new(()))).is_err());
    }
}
