//! Property-based invariants for identifiers and declaration scanning.
//!
//! 1. The identifier scheme is injective over separator-free triples:
//!    identical triples agree, distinct triples differ.
//! 2. `scan` materializes exactly the distinct identities of its input,
//!    whatever the order and repetition of records.

#![cfg(feature = "enabled")]

use livetweak_core::{TweakStore, tweak_identifier};
use livetweak_inline::{DeclValue, Declaration, scan};
use proptest::prelude::*;
use std::collections::HashSet;

fn component() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

fn triple() -> impl Strategy<Value = (String, String, String)> {
    (component(), component(), component())
}

proptest! {
    #[test]
    fn identifier_is_injective_over_clean_triples(a in triple(), b in triple()) {
        let id_a = tweak_identifier(&a.0, &a.1, &a.2);
        let id_b = tweak_identifier(&b.0, &b.1, &b.2);
        if a == b {
            prop_assert_eq!(id_a, id_b);
        } else {
            prop_assert_ne!(id_a, id_b);
        }
    }
}

// A fixed pool of declaration sites; proptest picks an arbitrary multiset.
static POOL: [Declaration; 5] = [
    Declaration::new("P", "A", "one", DeclValue::Int(1)),
    Declaration::new("P", "A", "two", DeclValue::Int(2)),
    Declaration::new("P", "B", "three", DeclValue::Float(3.0)),
    Declaration::new("Q", "A", "four", DeclValue::Bool(true)),
    Declaration::new("Q", "C", "five", DeclValue::Str("5")),
];

proptest! {
    #[test]
    fn scan_materializes_exactly_the_distinct_identities(
        picks in proptest::collection::vec(0usize..POOL.len(), 0..=24),
    ) {
        let table: Vec<Declaration> = picks.iter().map(|&i| POOL[i]).collect();
        let distinct: HashSet<usize> = picks.iter().copied().collect();

        let store = TweakStore::new();
        let materialized = scan(&store, &table).unwrap();
        prop_assert_eq!(materialized, distinct.len());

        for &i in &distinct {
            let decl = &POOL[i];
            prop_assert!(store.find(decl.category, decl.collection, decl.name).is_some());
        }

        // A second pass changes nothing.
        let again = scan(&store, &table).unwrap();
        prop_assert_eq!(again, materialized);
    }
}
