#![forbid(unsafe_code)]

//! Declaration discovery: turning static records into live tweaks.
//!
//! # Invariants
//!
//! 1. **Idempotent**: materializing the same record any number of times, from
//!    any number of threads, yields the same tweak instance and never
//!    re-creates it.
//! 2. **Exactly-once scan**: [`scan`] walks a declaration table once,
//!    materializing each distinct identity a single time; repeated entries
//!    for one identity are skipped.
//! 3. **Collisions refused**: two records with distinct triples mapping to
//!    one identifier abort the scan with
//!    [`TweakError::IdentityCollision`], since merging unrelated tweaks would
//!    corrupt both.
//!
//! Malformed records (bounds whose kind disagrees with the default) are
//! logged and skipped during a scan; they never take the process down.

use crate::decl::Declaration;
use livetweak_core::{Tweak, TweakError, TweakStore};
#[cfg(any(feature = "enabled", test))]
use livetweak_core::Value;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Resolve one declaration record to its live tweak, creating the
/// category/collection/tweak chain on first sight.
///
/// # Errors
///
/// [`TweakError::TypeMismatch`] when the record declares bounds whose kind
/// disagrees with its default's kind and no tweak exists yet at that
/// identity.
pub fn materialize(store: &TweakStore, decl: &Declaration) -> Result<Tweak, TweakError> {
    store.tweak(
        decl.category,
        decl.collection,
        decl.name,
        decl.default.to_value(),
        decl.min.map(crate::decl::DeclValue::to_value),
        decl.max.map(crate::decl::DeclValue::to_value),
    )
}

/// Materialize a whole declaration table exactly once.
///
/// Returns the number of tweaks materialized. Records repeating an identity
/// already seen in this table are skipped (the table stays idempotent when
/// generated code emits one record per evaluation site), and records with
/// malformed bounds are logged and skipped.
///
/// # Errors
///
/// [`TweakError::IdentityCollision`] when two records with *different*
/// identity triples map to the same stable identifier.
pub fn scan(store: &TweakStore, declarations: &[Declaration]) -> Result<usize, TweakError> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut materialized = 0usize;

    for (slot, decl) in declarations.iter().enumerate() {
        let identifier = decl.identifier();
        if let Some(&prior_slot) = seen.get(&identifier) {
            if declarations[prior_slot].triple() != decl.triple() {
                return Err(TweakError::IdentityCollision { identifier });
            }
            continue;
        }
        seen.insert(identifier, slot);

        match materialize(store, decl) {
            Ok(_) => materialized += 1,
            Err(error) => {
                warn!(%error, category = decl.category, collection = decl.collection,
                      name = decl.name, "skipping malformed declaration");
            }
        }
    }

    debug!(materialized, total = declarations.len(), "declaration scan complete");
    Ok(materialized)
}

/// Macro-path registration: like [`materialize`], but a record with
/// malformed bounds degrades to a bound-free registration instead of
/// failing, so a declaration site always yields a usable tweak.
#[cfg(any(feature = "enabled", test))]
pub(crate) fn register_lenient(
    store: &TweakStore,
    category: &str,
    collection: &str,
    name: &str,
    default: Value,
    min: Option<Value>,
    max: Option<Value>,
) -> Tweak {
    match store.tweak(category, collection, name, default.clone(), min, max) {
        Ok(tweak) => tweak,
        Err(error) => {
            warn!(%error, category, collection, name,
                  "declaration bounds rejected; registering without bounds");
            match store.tweak(category, collection, name, default, None, None) {
                Ok(tweak) => tweak,
                Err(error) => unreachable!("bound-free registration cannot fail: {error}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::DeclValue;

    fn table() -> Vec<Declaration> {
        vec![
            Declaration::new("Network", "Timeouts", "retryCount", DeclValue::Int(3))
                .with_range(DeclValue::Int(1), DeclValue::Int(5)),
            Declaration::new("Network", "Timeouts", "backoffMs", DeclValue::UInt(250)),
            Declaration::new("UI", "Colors", "accent", DeclValue::Str("#FF0000")),
        ]
    }

    #[test]
    fn scan_materializes_each_identity_once() {
        let store = TweakStore::new();
        let count = scan(&store, &table()).unwrap();
        assert_eq!(count, 3);
        assert!(store.find("Network", "Timeouts", "retryCount").is_some());
        assert!(store.find("UI", "Colors", "accent").is_some());
    }

    #[test]
    fn scan_is_idempotent() {
        let store = TweakStore::new();
        let decls = table();
        let first = scan(&store, &decls).unwrap();
        let again = scan(&store, &decls).unwrap();
        assert_eq!(first, again);
        assert_eq!(store.category("Network").collection("Timeouts").len(), 2);
    }

    #[test]
    fn scan_skips_repeated_records() {
        let store = TweakStore::new();
        let decl = Declaration::new("A", "B", "c", DeclValue::Bool(false));
        let count = scan(&store, &[decl, decl, decl]).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn scan_skips_malformed_bounds_and_continues() {
        let store = TweakStore::new();
        let decls = [
            Declaration::new("A", "B", "bad", DeclValue::Float(0.5))
                .with_range(DeclValue::Int(0), DeclValue::Int(1)),
            Declaration::new("A", "B", "good", DeclValue::Int(1)),
        ];
        let count = scan(&store, &decls).unwrap();
        assert_eq!(count, 1);
        assert!(store.find("A", "B", "bad").is_none());
        assert!(store.find("A", "B", "good").is_some());
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn scan_reports_identity_collisions() {
        // In release builds the separator assertion is compiled out, so a
        // component smuggling U+001F reaches the scan-level check.
        let store = TweakStore::new();
        let decls = [
            Declaration::new("a\u{1F}b", "c", "d", DeclValue::Bool(true)),
            Declaration::new("a", "b\u{1F}c", "d", DeclValue::Bool(true)),
        ];
        let err = scan(&store, &decls).unwrap_err();
        assert!(matches!(err, TweakError::IdentityCollision { .. }));
    }

    #[test]
    fn materialize_returns_existing_instance() {
        let store = TweakStore::new();
        let decl = Declaration::new("A", "B", "c", DeclValue::Int(1));
        let first = materialize(&store, &decl).unwrap();
        let again = materialize(&store, &decl).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn register_lenient_strips_bad_bounds() {
        let store = TweakStore::new();
        let tweak = register_lenient(
            &store,
            "A",
            "B",
            "c",
            Value::Float(0.5),
            Some(Value::Int(0)),
            Some(Value::Int(1)),
        );
        assert_eq!(tweak.min_value(), None);
        assert_eq!(tweak.max_value(), None);
        assert_eq!(tweak.effective_value(), Value::Float(0.5));
    }
}
