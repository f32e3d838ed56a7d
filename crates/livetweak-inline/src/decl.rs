#![forbid(unsafe_code)]

//! Compile-time declaration records.
//!
//! A [`Declaration`] is the static description of one tweak: its identity
//! triple, a default, and optional bounds. Records are `const`-constructible
//! so build-time code generation (or a hand-maintained table) can emit them
//! as plain statics; [`scan`](crate::discovery::scan) materializes a whole
//! table at startup, while the declaration macros materialize one record per
//! call site lazily.

use livetweak_core::{Value, ValueKind, tweak_identifier};

/// A `const`-constructible tweak value, carried inside declaration records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclValue {
    /// 64-bit float.
    Float(f64),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer.
    UInt(u64),
    /// Boolean.
    Bool(bool),
    /// String literal.
    Str(&'static str),
}

impl DeclValue {
    /// The kind the record's tweak will be pinned to.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::Bool(_) => ValueKind::Bool,
            Self::Str(_) => ValueKind::Str,
        }
    }

    /// Convert into a runtime [`Value`].
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Float(v) => Value::Float(v),
            Self::Int(v) => Value::Int(v),
            Self::UInt(v) => Value::UInt(v),
            Self::Bool(v) => Value::Bool(v),
            Self::Str(v) => Value::Str(v.to_string()),
        }
    }
}

/// The static description of one tweak declaration.
///
/// # Example
///
/// ```
/// use livetweak_inline::{DeclValue, Declaration};
///
/// static RETRY: Declaration =
///     Declaration::new("Network", "Timeouts", "retryCount", DeclValue::Int(3))
///         .with_range(DeclValue::Int(1), DeclValue::Int(5));
///
/// assert_eq!(RETRY.default.kind(), livetweak_core::ValueKind::Int);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declaration {
    /// Top-level category name.
    pub category: &'static str,
    /// Collection name within the category.
    pub collection: &'static str,
    /// The tweak's own name.
    pub name: &'static str,
    /// Default value; its kind pins the tweak's kind.
    pub default: DeclValue,
    /// Optional lower bound.
    pub min: Option<DeclValue>,
    /// Optional upper bound.
    pub max: Option<DeclValue>,
}

impl Declaration {
    /// A declaration without bounds.
    #[must_use]
    pub const fn new(
        category: &'static str,
        collection: &'static str,
        name: &'static str,
        default: DeclValue,
    ) -> Self {
        Self {
            category,
            collection,
            name,
            default,
            min: None,
            max: None,
        }
    }

    /// Attach a range to the declaration.
    #[must_use]
    pub const fn with_range(mut self, min: DeclValue, max: DeclValue) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// The stable identifier for this record's identity triple.
    ///
    /// Identical triples always map to the same identifier; distinct triples
    /// map to distinct identifiers as long as no component contains the
    /// reserved separator (a debug assertion rejects it).
    #[must_use]
    pub fn identifier(&self) -> String {
        tweak_identifier(self.category, self.collection, self.name)
    }

    pub(crate) fn triple(&self) -> (&'static str, &'static str, &'static str) {
        (self.category, self.collection, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_stable() {
        let a = Declaration::new("Net", "Timeouts", "retry", DeclValue::Int(3));
        let b = Declaration::new("Net", "Timeouts", "retry", DeclValue::Int(3));
        assert_eq!(a.identifier(), b.identifier());
    }

    #[test]
    fn identifier_distinguishes_triples() {
        let a = Declaration::new("Net", "Timeouts", "retry", DeclValue::Int(3));
        let b = Declaration::new("Net", "Timeouts", "backoff", DeclValue::Int(3));
        let c = Declaration::new("Net", "Limits", "retry", DeclValue::Int(3));
        assert_ne!(a.identifier(), b.identifier());
        assert_ne!(a.identifier(), c.identifier());
        assert_ne!(b.identifier(), c.identifier());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "U+001F")]
    fn separator_in_component_asserts_in_debug() {
        let decl = Declaration::new("a\u{1F}b", "c", "d", DeclValue::Bool(true));
        let _ = decl.identifier();
    }

    #[test]
    fn decl_value_kinds_and_conversion() {
        use livetweak_core::Value;
        assert_eq!(DeclValue::Float(0.5).to_value(), Value::Float(0.5));
        assert_eq!(DeclValue::Int(-1).to_value(), Value::Int(-1));
        assert_eq!(DeclValue::UInt(9).to_value(), Value::UInt(9));
        assert_eq!(DeclValue::Bool(true).to_value(), Value::Bool(true));
        assert_eq!(DeclValue::Str("x").to_value(), Value::from("x"));
        assert_eq!(DeclValue::Str("x").kind(), livetweak_core::ValueKind::Str);
    }

    #[test]
    fn with_range_is_const_friendly() {
        static DECL: Declaration = Declaration::new("A", "B", "c", DeclValue::Float(0.5))
            .with_range(DeclValue::Float(0.0), DeclValue::Float(1.0));
        assert_eq!(DECL.min, Some(DeclValue::Float(0.0)));
        assert_eq!(DECL.max, Some(DeclValue::Float(1.0)));
    }
}
