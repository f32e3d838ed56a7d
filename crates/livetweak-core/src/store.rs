#![forbid(unsafe_code)]

//! The process-wide root namespace of tweak categories.
//!
//! # Design
//!
//! [`TweakStore::shared`] exposes one lazily-initialized, process-lifetime
//! store reachable from any call site. Code under test constructs a fresh
//! [`TweakStore::new`] instead of touching the global one, so the singleton
//! is a convenience, not a hard dependency.
//!
//! # Invariants
//!
//! 1. Get-or-create never reports "not found": a missing name is created,
//!    an existing name is returned, and concurrent callers racing on one
//!    name all observe the same instance.
//! 2. Name comparison is exact codepoint equality; no normalization.
//! 3. Enumeration order is first-registration order at every level.
//! 4. The store is never torn down; teardown is process exit.

use crate::category::TweakCategory;
use crate::error::TweakError;
use crate::sync;
use crate::tweak::Tweak;
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};
use tracing::{debug, trace};

#[derive(Default)]
struct OrderedCategories {
    order: Vec<TweakCategory>,
    index: FxHashMap<String, usize>,
}

/// Root namespace holding every registered tweak category.
///
/// # Example
///
/// ```
/// use livetweak_core::{TweakStore, Value};
///
/// let store = TweakStore::new();
/// let tweak = store
///     .tweak("UI", "Colors", "accent", Value::from("#FF0000"), None, None)
///     .unwrap();
///
/// assert_eq!(store.category_names(), vec!["UI"]);
/// assert_eq!(store.find("UI", "Colors", "accent"), Some(tweak));
/// ```
#[derive(Default)]
pub struct TweakStore {
    categories: RwLock<OrderedCategories>,
}

impl fmt::Debug for TweakStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweakStore")
            .field("categories", &self.category_names())
            .finish()
    }
}

impl TweakStore {
    /// A fresh, empty store. Prefer this over [`TweakStore::shared`] in
    /// tests so state never leaks between cases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store. Created on first access, lives until process
    /// exit; initialization is thread-safe.
    #[must_use]
    pub fn shared() -> &'static TweakStore {
        static SHARED: OnceLock<TweakStore> = OnceLock::new();
        SHARED.get_or_init(|| {
            debug!("shared tweak store initialized");
            TweakStore::new()
        })
    }

    /// Look up a category by name. Read-only; never creates.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TweakCategory> {
        let categories = sync::read(&self.categories);
        categories
            .index
            .get(name)
            .map(|&slot| categories.order[slot].clone())
    }

    /// Get or create the category with the given name. Concurrent calls for
    /// one name all observe the same instance.
    pub fn category(&self, name: &str) -> TweakCategory {
        debug_assert!(!name.is_empty(), "category names must be non-empty");
        if let Some(existing) = self.get(name) {
            return existing;
        }

        let mut categories = sync::write(&self.categories);
        if let Some(&slot) = categories.index.get(name) {
            return categories.order[slot].clone();
        }

        let category = TweakCategory::new(name.to_string());
        trace!(category = name, "tweak category registered");
        let slot = categories.order.len();
        categories.index.insert(name.to_string(), slot);
        categories.order.push(category.clone());
        category
    }

    /// All categories in first-registration order.
    #[must_use]
    pub fn categories(&self) -> Vec<TweakCategory> {
        sync::read(&self.categories).order.clone()
    }

    /// Category names in first-registration order.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        sync::read(&self.categories)
            .order
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Read-only lookup of a tweak by its identity triple.
    #[must_use]
    pub fn find(&self, category: &str, collection: &str, name: &str) -> Option<Tweak> {
        self.get(category)?.get(collection)?.get(name)
    }

    /// Get or create the whole category → collection → tweak chain.
    ///
    /// # Errors
    ///
    /// [`TweakError::TypeMismatch`] when creating a new tweak whose
    /// `min`/`max` kind disagrees with the default's kind. See
    /// [`crate::TweakCollection::tweak`].
    pub fn tweak(
        &self,
        category: &str,
        collection: &str,
        name: &str,
        default: Value,
        min: Option<Value>,
        max: Option<Value>,
    ) -> Result<Tweak, TweakError> {
        self.category(category)
            .collection(collection)
            .tweak(name, default, min, max)
    }

    /// Clear every tweak's current value, restoring defaults everywhere.
    /// Live bindings are notified per cleared tweak.
    pub fn reset(&self) {
        debug!("resetting all tweaks to defaults");
        for category in self.categories() {
            for collection in category.collections() {
                for tweak in collection.tweaks() {
                    tweak.clear_current();
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
