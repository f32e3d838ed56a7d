//! Property-based invariant tests for the tweak registry.
//!
//! These verify the contracts that must hold for **any** declared range and
//! any sequence of assignments:
//!
//! 1. With `min <= max` declared, the effective value after `set_current`
//!    always lies in `[min, max]` and equals `clamp(v, min, max)`.
//! 2. Clamping is idempotent: re-setting the clamped value is a fixpoint.
//! 3. Without an explicit current value, the effective value is the default.
//! 4. Repeated creation at one identity always returns the same instance,
//!    regardless of call count.
//! 5. Unordered kinds (strings) are never clamped.
//! 6. `clear_current` restores the default after any assignment sequence.

use livetweak_core::{TweakStore, Value};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn int_range() -> impl Strategy<Value = (i64, i64)> {
    (-1_000i64..=1_000, -1_000i64..=1_000).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn float_range() -> impl Strategy<Value = (f64, f64)> {
    (-1e6f64..=1e6, -1e6f64..=1e6).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Effective value is always clamp(v, min, max); clamping idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn int_effective_value_is_clamped(
        (min, max) in int_range(),
        default in -1_000i64..=1_000,
        assignments in proptest::collection::vec(-10_000i64..=10_000, 1..=16),
    ) {
        let default = default.clamp(min, max);
        let store = TweakStore::new();
        let tweak = store
            .tweak("P", "Ints", "v", Value::Int(default), Some(Value::Int(min)), Some(Value::Int(max)))
            .unwrap();

        for v in assignments {
            tweak.set_current(Value::Int(v)).unwrap();
            let effective = tweak.effective_value().as_i64();
            prop_assert_eq!(effective, v.clamp(min, max));
            prop_assert!((min..=max).contains(&effective));

            // Idempotent: storing the clamped value changes nothing.
            tweak.set_current(Value::Int(effective)).unwrap();
            prop_assert_eq!(tweak.effective_value().as_i64(), effective);
        }
    }

    #[test]
    fn float_effective_value_is_clamped(
        (min, max) in float_range(),
        v in -1e9f64..=1e9,
    ) {
        let default = min;
        let store = TweakStore::new();
        let tweak = store
            .tweak("P", "Floats", "v", Value::Float(default), Some(Value::Float(min)), Some(Value::Float(max)))
            .unwrap();

        tweak.set_current(Value::Float(v)).unwrap();
        let effective = tweak.effective_value().as_f64();
        prop_assert_eq!(effective, v.clamp(min, max));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. No current value → effective equals default
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn effective_defaults_until_set(default in any::<i64>()) {
        let store = TweakStore::new();
        let tweak = store
            .tweak("P", "Defaults", "v", Value::Int(default), None, None)
            .unwrap();
        prop_assert_eq!(tweak.current_value(), None);
        prop_assert_eq!(tweak.effective_value(), Value::Int(default));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Identity: repeated creation returns the same instance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_create_returns_same_instance(
        name in "[a-zA-Z][a-zA-Z0-9_]{0,12}",
        repeats in 2usize..=8,
    ) {
        let store = TweakStore::new();
        let first = store
            .tweak("P", "Identity", &name, Value::Bool(true), None, None)
            .unwrap();
        for _ in 0..repeats {
            let again = store
                .tweak("P", "Identity", &name, Value::Bool(true), None, None)
                .unwrap();
            prop_assert_eq!(&again, &first);
        }
        prop_assert_eq!(store.category("P").collection("Identity").len(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Unordered kinds are stored verbatim, never clamped
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn strings_are_never_clamped(text in ".{0,32}") {
        let store = TweakStore::new();
        let tweak = store
            .tweak("P", "Strings", "v", Value::from("default"), None, None)
            .unwrap();
        tweak.set_current(Value::from(text.as_str())).unwrap();
        prop_assert_eq!(tweak.effective_value(), Value::from(text.as_str()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. clear_current restores the default after any sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clear_restores_default(
        assignments in proptest::collection::vec(-10_000i64..=10_000, 0..=8),
    ) {
        let store = TweakStore::new();
        let tweak = store
            .tweak("P", "Reset", "v", Value::Int(7), Some(Value::Int(-100)), Some(Value::Int(100)))
            .unwrap();
        for v in assignments {
            tweak.set_current(Value::Int(v)).unwrap();
        }
        store.reset();
        prop_assert_eq!(tweak.current_value(), None);
        prop_assert_eq!(tweak.effective_value(), Value::Int(7));
    }
}
