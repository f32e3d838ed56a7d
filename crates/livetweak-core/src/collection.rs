#![forbid(unsafe_code)]

//! A named, insertion-ordered set of tweaks within a category.

use crate::error::TweakError;
use crate::sync;
use crate::tweak::{Tweak, tweak_identifier};
use crate::value::Value;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{trace, warn};

/// Name-indexed storage preserving first-registration order.
#[derive(Default)]
struct OrderedTweaks {
    order: Vec<Tweak>,
    index: FxHashMap<String, usize>,
}

struct CollectionInner {
    category: String,
    name: String,
    tweaks: RwLock<OrderedTweaks>,
}

/// A shared handle to a named group of tweaks.
///
/// Cloning shares the same underlying collection; equality compares handle
/// identity. Tweaks are created through [`TweakCollection::tweak`], which is
/// the only creation path; there is no removal.
pub struct TweakCollection {
    inner: Arc<CollectionInner>,
}

impl Clone for TweakCollection {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PartialEq for TweakCollection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TweakCollection {}

impl fmt::Debug for TweakCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweakCollection")
            .field("category", &self.inner.category)
            .field("name", &self.inner.name)
            .field("tweaks", &self.len())
            .finish()
    }
}

impl TweakCollection {
    pub(crate) fn new(category: String, name: String) -> Self {
        Self {
            inner: Arc::new(CollectionInner {
                category,
                name,
                tweaks: RwLock::new(OrderedTweaks::default()),
            }),
        }
    }

    /// The collection's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name of the owning category.
    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.inner.category
    }

    /// Look up a tweak by name. Read-only; never creates.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Tweak> {
        let tweaks = sync::read(&self.inner.tweaks);
        tweaks.index.get(name).map(|&slot| tweaks.order[slot].clone())
    }

    /// Get or create the tweak with the given name.
    ///
    /// The first registration wins: when the name already exists, the
    /// existing tweak is returned untouched and the supplied metadata is
    /// ignored (a divergence trips a debug assertion and a warning).
    /// Concurrent calls for one name all observe the same instance.
    ///
    /// # Errors
    ///
    /// [`TweakError::TypeMismatch`] when creating with a `min`/`max` whose
    /// kind differs from the default's kind. Existing tweaks are returned
    /// without validation; their metadata is already established.
    pub fn tweak(
        &self,
        name: &str,
        default: Value,
        min: Option<Value>,
        max: Option<Value>,
    ) -> Result<Tweak, TweakError> {
        debug_assert!(!name.is_empty(), "tweak names must be non-empty");

        if let Some(existing) = self.get(name) {
            self.check_metadata(&existing, &default, min.as_ref(), max.as_ref());
            return Ok(existing);
        }

        for bound in [min.as_ref(), max.as_ref()].into_iter().flatten() {
            if bound.kind() != default.kind() {
                return Err(TweakError::TypeMismatch {
                    identifier: tweak_identifier(&self.inner.category, &self.inner.name, name),
                    expected: default.kind(),
                    found: bound.kind(),
                });
            }
        }

        let mut tweaks = sync::write(&self.inner.tweaks);
        // Double-check under the write lock: another thread may have won.
        if let Some(&slot) = tweaks.index.get(name) {
            return Ok(tweaks.order[slot].clone());
        }

        let tweak = Tweak::new(
            self.inner.category.clone(),
            self.inner.name.clone(),
            name.to_string(),
            default,
            min,
            max,
        );
        trace!(path = %tweak.path(), "tweak registered");
        let slot = tweaks.order.len();
        tweaks.index.insert(name.to_string(), slot);
        tweaks.order.push(tweak.clone());
        Ok(tweak)
    }

    /// All tweaks in first-registration order.
    #[must_use]
    pub fn tweaks(&self) -> Vec<Tweak> {
        sync::read(&self.inner.tweaks).order.clone()
    }

    /// Tweak names in first-registration order.
    #[must_use]
    pub fn tweak_names(&self) -> Vec<String> {
        sync::read(&self.inner.tweaks)
            .order
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Number of tweaks in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        sync::read(&self.inner.tweaks).order.len()
    }

    /// Whether the collection has no tweaks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Later registrations at an existing identity are assumed to carry the
    /// same metadata; flag the ones that do not.
    fn check_metadata(
        &self,
        existing: &Tweak,
        default: &Value,
        min: Option<&Value>,
        max: Option<&Value>,
    ) {
        let consistent = existing.default_value() == *default
            && existing.min_value().as_ref() == min
            && existing.max_value().as_ref() == max;
        if !consistent {
            warn!(
                path = %existing.path(),
                "tweak re-registered with different metadata; first registration wins"
            );
            debug_assert!(
                consistent,
                "tweak {} re-registered with different metadata",
                existing.path()
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
