#![forbid(unsafe_code)]

//! One named, typed, runtime-adjustable parameter.
//!
//! # Design
//!
//! [`Tweak`] is a cheap-to-clone shared handle over reference-counted inner
//! state. A tweak is created once per (category, collection, name) triple
//! and lives for the rest of the process; its current value is the only
//! mutable payload, guarded by an `RwLock`, with an observer list notified
//! synchronously on every successful mutation.
//!
//! # Invariants
//!
//! 1. The kind of every stored value (default, current, min, max) equals the
//!    kind of the original default; [`Tweak::set_current`] rejects anything
//!    else with [`TweakError::TypeMismatch`].
//! 2. With bounds present and an ordered kind, the stored current value
//!    always satisfies `min <= current <= max`; out-of-range input clamps,
//!    it never fails.
//! 3. Each live observer is notified exactly once per successful
//!    `set_current` call, in no guaranteed order, outside of any lock.
//! 4. Dead observers are pruned lazily during notification; pruning never
//!    drops a live observer.

use crate::binding::{ObserverEntry, ObserverId, TweakObserver};
use crate::error::TweakError;
use crate::sync;
use crate::value::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::trace;

/// Separator used to build stable tweak identifiers from name triples.
///
/// U+001F (unit separator) cannot legally occur in tweak path components;
/// [`tweak_identifier`] rejects it with a debug assertion.
pub const IDENTIFIER_SEPARATOR: char = '\u{1F}';

/// Build the stable identifier for a (category, collection, name) triple.
///
/// Identical triples always yield identical identifiers, and distinct
/// triples yield distinct identifiers as long as no component contains the
/// separator.
#[must_use]
pub fn tweak_identifier(category: &str, collection: &str, name: &str) -> String {
    debug_assert!(
        !category.contains(IDENTIFIER_SEPARATOR)
            && !collection.contains(IDENTIFIER_SEPARATOR)
            && !name.contains(IDENTIFIER_SEPARATOR),
        "tweak path components must not contain U+001F"
    );
    format!("{category}{IDENTIFIER_SEPARATOR}{collection}{IDENTIFIER_SEPARATOR}{name}")
}

pub(crate) struct TweakInner {
    category: String,
    collection: String,
    name: String,
    identifier: String,
    default: Value,
    min: Option<Value>,
    max: Option<Value>,
    current: RwLock<Option<Value>>,
    observers: Mutex<Vec<ObserverEntry>>,
    next_observer_id: AtomicU64,
}

/// A shared handle to one runtime-adjustable parameter.
///
/// Cloning a `Tweak` clones the handle, not the parameter: both handles see
/// the same value and the same observers. Equality compares handle identity.
///
/// # Example
///
/// ```
/// use livetweak_core::{TweakStore, Value};
///
/// let store = TweakStore::new();
/// let tweak = store
///     .tweak("Network", "Timeouts", "retryCount", Value::Int(3), Some(Value::Int(1)), Some(Value::Int(5)))
///     .unwrap();
/// assert_eq!(tweak.effective_value(), Value::Int(3));
///
/// tweak.set_current(Value::Int(10)).unwrap();
/// assert_eq!(tweak.effective_value(), Value::Int(5)); // clamped
/// ```
pub struct Tweak {
    inner: Arc<TweakInner>,
}

// Manual Clone: shares the same inner state.
impl Clone for Tweak {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PartialEq for Tweak {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Tweak {}

impl fmt::Debug for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tweak")
            .field("path", &self.path())
            .field("default", &self.inner.default)
            .field("current", &*sync::read(&self.inner.current))
            .field("min", &self.inner.min)
            .field("max", &self.inner.max)
            .finish()
    }
}

impl Tweak {
    pub(crate) fn new(
        category: String,
        collection: String,
        name: String,
        default: Value,
        min: Option<Value>,
        max: Option<Value>,
    ) -> Self {
        let identifier = tweak_identifier(&category, &collection, &name);
        Self {
            inner: Arc::new(TweakInner {
                category,
                collection,
                name,
                identifier,
                default,
                min,
                max,
                current: RwLock::new(None),
                observers: Mutex::new(Vec::new()),
                next_observer_id: AtomicU64::new(1),
            }),
        }
    }

    /// The tweak's own name (last path component).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name of the owning category.
    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.inner.category
    }

    /// Name of the owning collection.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.inner.collection
    }

    /// Stable machine identifier for this tweak's identity triple.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.inner.identifier
    }

    /// Human-readable `Category/Collection/name` path for diagnostics.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.inner.category, self.inner.collection, self.inner.name
        )
    }

    /// The declared default value.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.inner.default.clone()
    }

    /// The kind every value of this tweak must carry.
    #[must_use]
    pub fn kind(&self) -> crate::ValueKind {
        self.inner.default.kind()
    }

    /// Lower bound, if declared.
    #[must_use]
    pub fn min_value(&self) -> Option<Value> {
        self.inner.min.clone()
    }

    /// Upper bound, if declared.
    #[must_use]
    pub fn max_value(&self) -> Option<Value> {
        self.inner.max.clone()
    }

    /// The current override, if one has been set.
    #[must_use]
    pub fn current_value(&self) -> Option<Value> {
        sync::read(&self.inner.current).clone()
    }

    /// The value consumers should use: the current override when present,
    /// the default otherwise.
    #[must_use]
    pub fn effective_value(&self) -> Value {
        sync::read(&self.inner.current)
            .clone()
            .unwrap_or_else(|| self.inner.default.clone())
    }

    /// Set the current value.
    ///
    /// The value's kind must match the default's kind; out-of-range values
    /// clamp to the declared bounds instead of failing. All live observers
    /// are notified synchronously, each exactly once, before this returns.
    ///
    /// # Errors
    ///
    /// [`TweakError::TypeMismatch`] when `value` carries a different kind
    /// than the tweak was created with. The stored value is left untouched.
    pub fn set_current(&self, value: Value) -> Result<(), TweakError> {
        let expected = self.inner.default.kind();
        let found = value.kind();
        if found != expected {
            return Err(TweakError::TypeMismatch {
                identifier: self.inner.identifier.clone(),
                expected,
                found,
            });
        }

        let clamped = value.clamped(self.inner.min.as_ref(), self.inner.max.as_ref());
        {
            let mut current = sync::write(&self.inner.current);
            *current = Some(clamped);
        }
        trace!(path = %self.path(), "tweak value updated");
        self.notify();
        Ok(())
    }

    /// Remove the current override, restoring the default as the effective
    /// value. Observers are notified when an override was actually removed.
    pub fn clear_current(&self) {
        let removed = sync::write(&self.inner.current).take().is_some();
        if removed {
            trace!(path = %self.path(), "tweak value cleared");
            self.notify();
        }
    }

    /// Register an observer. Observers are held weakly: once the caller's
    /// `Arc` is dropped (or the observer reports itself defunct) it is
    /// pruned during the next notification.
    ///
    /// Returns an [`ObserverId`] usable with [`Tweak::remove_observer`].
    pub fn add_observer(&self, observer: &Arc<dyn TweakObserver>) -> ObserverId {
        let id = ObserverId::new(self.inner.next_observer_id.fetch_add(1, Ordering::Relaxed));
        sync::lock(&self.inner.observers).push(ObserverEntry {
            id,
            observer: Arc::downgrade(observer),
        });
        id
    }

    /// Remove a previously registered observer. Safe to call with an id that
    /// was already removed; removal is idempotent.
    pub fn remove_observer(&self, id: ObserverId) {
        sync::lock(&self.inner.observers).retain(|entry| entry.id != id);
    }

    /// Number of registered observer entries, including dead ones not yet
    /// pruned. Pruning happens during notification.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        sync::lock(&self.inner.observers).len()
    }

    /// Notify live observers and prune dead or defunct ones.
    fn notify(&self) {
        // Collect live observers first so callbacks run outside the lock;
        // a callback may re-enter `set_current` or detach a binding.
        let live: Vec<Arc<dyn TweakObserver>> = {
            let mut observers = sync::lock(&self.inner.observers);
            observers.retain(|entry| match entry.observer.upgrade() {
                Some(observer) => !observer.defunct(),
                None => false,
            });
            observers
                .iter()
                .filter_map(|entry| entry.observer.upgrade())
                .collect()
        };

        for observer in live {
            observer.tweak_did_change(self);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
