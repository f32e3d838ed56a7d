#![forbid(unsafe_code)]

//! Coercion keyed on the declared default's type.
//!
//! A declaration site names its default as an ordinary Rust expression, and
//! the value it reads back comes in that expression's type: an `f32` default
//! reads `f32`, a `bool` default reads `bool`, a string default reads
//! `String`. [`TweakParam`] is the closed dispatch table for that: one impl
//! per supported call-site type, with string as the only widening case
//! (`&'static str` defaults read back as owned `String`s).

use livetweak_core::Value;

/// A type usable as a declaration default.
///
/// `Out` is the type the call site reads back; for every impl except
/// `&'static str` it is `Self`.
pub trait TweakParam: Into<Value> {
    /// The type handed back to the call site.
    type Out;

    /// Convert the literal default for the disabled/no-registry path.
    fn lift(self) -> Self::Out;

    /// Coerce a live value for the enabled path. Total: cross-kind reads
    /// fall back per [`Value`]'s coercion rules.
    fn extract(value: &Value) -> Self::Out;
}

impl TweakParam for f64 {
    type Out = f64;

    fn lift(self) -> f64 {
        self
    }

    fn extract(value: &Value) -> f64 {
        value.as_f64()
    }
}

impl TweakParam for f32 {
    type Out = f32;

    fn lift(self) -> f32 {
        self
    }

    fn extract(value: &Value) -> f32 {
        value.as_f64() as f32
    }
}

impl TweakParam for i64 {
    type Out = i64;

    fn lift(self) -> i64 {
        self
    }

    fn extract(value: &Value) -> i64 {
        value.as_i64()
    }
}

impl TweakParam for i32 {
    type Out = i32;

    fn lift(self) -> i32 {
        self
    }

    fn extract(value: &Value) -> i32 {
        value.as_i64().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}

impl TweakParam for isize {
    type Out = isize;

    fn lift(self) -> isize {
        self
    }

    fn extract(value: &Value) -> isize {
        isize::try_from(value.as_i64()).unwrap_or(isize::MAX)
    }
}

impl TweakParam for u64 {
    type Out = u64;

    fn lift(self) -> u64 {
        self
    }

    fn extract(value: &Value) -> u64 {
        value.as_u64()
    }
}

impl TweakParam for u32 {
    type Out = u32;

    fn lift(self) -> u32 {
        self
    }

    fn extract(value: &Value) -> u32 {
        u32::try_from(value.as_u64()).unwrap_or(u32::MAX)
    }
}

impl TweakParam for usize {
    type Out = usize;

    fn lift(self) -> usize {
        self
    }

    fn extract(value: &Value) -> usize {
        usize::try_from(value.as_u64()).unwrap_or(usize::MAX)
    }
}

impl TweakParam for bool {
    type Out = bool;

    fn lift(self) -> bool {
        self
    }

    fn extract(value: &Value) -> bool {
        value.as_bool()
    }
}

impl TweakParam for String {
    type Out = String;

    fn lift(self) -> String {
        self
    }

    fn extract(value: &Value) -> String {
        value.as_string()
    }
}

impl TweakParam for &'static str {
    type Out = String;

    fn lift(self) -> String {
        self.to_string()
    }

    fn extract(value: &Value) -> String {
        value.as_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_extraction_matches_value_coercion() {
        let v = Value::Int(-7);
        assert_eq!(<f64 as TweakParam>::extract(&v), -7.0);
        assert_eq!(<i64 as TweakParam>::extract(&v), -7);
        assert_eq!(<i32 as TweakParam>::extract(&v), -7);
        assert_eq!(<u64 as TweakParam>::extract(&v), 0);
        assert!(<bool as TweakParam>::extract(&v));
    }

    #[test]
    fn narrow_integers_saturate() {
        let big = Value::Int(i64::MAX);
        assert_eq!(<i32 as TweakParam>::extract(&big), i32::MAX);
        let small = Value::Int(i64::MIN);
        assert_eq!(<i32 as TweakParam>::extract(&small), i32::MIN);
    }

    #[test]
    fn str_defaults_read_back_as_owned_strings() {
        let v = Value::from("#FF0000");
        assert_eq!(<&'static str as TweakParam>::extract(&v), "#FF0000");
        assert_eq!("fallback".lift(), "fallback".to_string());
    }

    #[test]
    fn lift_is_identity_for_plain_types() {
        assert_eq!(3i64.lift(), 3);
        assert_eq!(0.5f64.lift(), 0.5);
        assert!(true.lift());
    }
}
