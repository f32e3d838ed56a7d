#![forbid(unsafe_code)]

//! Observers and live bindings.
//!
//! # Design
//!
//! A [`Tweak`] holds its observers weakly; the strong reference lives with
//! whoever registered it. For plain observers that is the caller's own
//! `Arc`. For bindings created with [`Tweak::bind`] the strong reference is
//! owned by the returned [`BindingHandle`], and the bound target is held
//! through a `Weak` so the binding can never keep it alive.
//!
//! # Invariants
//!
//! 1. A binding applies the tweak's effective value exactly once at bind
//!    time, then once per `set_current`/`clear_current` notification while
//!    the target is alive.
//! 2. Once the target is gone the binding is a silent no-op and reports
//!    itself defunct, so the next notification prunes it.
//! 3. `detach` is idempotent and terminal: a detached binding never
//!    re-attaches, and dropping the handle detaches implicitly.
//!
//! # Failure Modes
//!
//! | Mode | Condition | Behavior |
//! |------|-----------|----------|
//! | Target dropped | last external `Arc` released | Setter never runs again; entry pruned on next notify |
//! | Handle leaked | `BindingHandle` kept forever | Entry stays registered; still inert once target dies |
//! | Double detach | `detach` called twice | Second call is a no-op |

use crate::sync;
use crate::tweak::Tweak;
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

/// Receiver of tweak change notifications.
///
/// Implementations must not block; notifications are delivered synchronously
/// from `set_current`. `defunct` is consulted under the tweak's observer
/// lock, so it must not call back into the tweak.
pub trait TweakObserver: Send + Sync {
    /// Called synchronously after the tweak's stored value changed.
    fn tweak_did_change(&self, tweak: &Tweak);

    /// Whether this observer will never act again and may be pruned.
    fn defunct(&self) -> bool {
        false
    }
}

/// Token identifying one observer registration on one tweak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One slot in a tweak's observer list.
pub(crate) struct ObserverEntry {
    pub(crate) id: ObserverId,
    pub(crate) observer: Weak<dyn TweakObserver>,
}

/// Observer that pushes coerced values onto a weakly-held target.
struct BindObserver<T: Send + Sync + 'static> {
    target: Weak<T>,
    apply: Box<dyn Fn(&T, &Value) + Send + Sync>,
}

impl<T: Send + Sync + 'static> TweakObserver for BindObserver<T> {
    fn tweak_did_change(&self, tweak: &Tweak) {
        if let Some(target) = self.target.upgrade() {
            (self.apply)(&target, &tweak.effective_value());
        }
    }

    fn defunct(&self) -> bool {
        self.target.strong_count() == 0
    }
}

/// RAII guard for a live binding.
///
/// Holds the strong reference that keeps the binding's observer registered.
/// Dropping the handle (or calling [`BindingHandle::detach`]) removes the
/// observer from the tweak; the bound target itself is never owned.
pub struct BindingHandle {
    tweak: Tweak,
    id: ObserverId,
    observer: Mutex<Option<Arc<dyn TweakObserver>>>,
}

impl BindingHandle {
    fn new(tweak: Tweak, id: ObserverId, observer: Arc<dyn TweakObserver>) -> Self {
        Self {
            tweak,
            id,
            observer: Mutex::new(Some(observer)),
        }
    }

    /// Detach the binding: the setter will not run again. Idempotent and
    /// terminal; there is no way to re-attach a detached handle.
    pub fn detach(&self) {
        if sync::lock(&self.observer).take().is_some() {
            self.tweak.remove_observer(self.id);
        }
    }

    /// Whether the binding has been detached.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        sync::lock(&self.observer).is_none()
    }

    /// The tweak this binding observes.
    #[must_use]
    pub fn tweak(&self) -> &Tweak {
        &self.tweak
    }
}

impl Drop for BindingHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for BindingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingHandle")
            .field("tweak", &self.tweak.path())
            .field("detached", &self.is_detached())
            .finish()
    }
}

impl Tweak {
    /// Bind this tweak to a consumer.
    ///
    /// `apply` receives the target and the tweak's effective value: once
    /// immediately, then after every change for as long as both the returned
    /// handle and the target are alive. The target is referenced weakly;
    /// binding never extends its lifetime.
    ///
    /// # Example
    ///
    /// ```
    /// use livetweak_core::{TweakStore, Value};
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicI64, Ordering};
    ///
    /// struct Settings {
    ///     retries: AtomicI64,
    /// }
    ///
    /// let store = TweakStore::new();
    /// let tweak = store
    ///     .tweak("Network", "Timeouts", "retryCount", Value::Int(3), None, None)
    ///     .unwrap();
    ///
    /// let settings = Arc::new(Settings { retries: AtomicI64::new(0) });
    /// let binding = tweak.bind(&settings, |s, v| s.retries.store(v.as_i64(), Ordering::SeqCst));
    /// assert_eq!(settings.retries.load(Ordering::SeqCst), 3);
    ///
    /// tweak.set_current(Value::Int(7)).unwrap();
    /// assert_eq!(settings.retries.load(Ordering::SeqCst), 7);
    ///
    /// binding.detach();
    /// tweak.set_current(Value::Int(9)).unwrap();
    /// assert_eq!(settings.retries.load(Ordering::SeqCst), 7);
    /// ```
    pub fn bind<T, F>(&self, target: &Arc<T>, apply: F) -> BindingHandle
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &Value) + Send + Sync + 'static,
    {
        apply(target, &self.effective_value());
        let observer: Arc<dyn TweakObserver> = Arc::new(BindObserver {
            target: Arc::downgrade(target),
            apply: Box::new(apply),
        });
        let id = self.add_observer(&observer);
        BindingHandle::new(self.clone(), id, observer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
