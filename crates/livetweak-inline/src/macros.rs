#![forbid(unsafe_code)]

//! The declare-where-used macro surface.
//!
//! Each macro both declares a tweak and uses it, with no separate
//! registration statement anywhere. The declaration is resolved against the
//! shared [`TweakStore`](livetweak_core::TweakStore) on first evaluation and
//! cached per call site, so the macros are safe in loops and hot paths.
//!
//! With the `enabled` feature off (build `livetweak-inline` with
//! `--no-default-features`), every form degrades to its literal default:
//! [`tweak!`] yields `None`, [`tweak_value!`] yields the default expression,
//! [`tweak_bind!`] applies the default once, all without touching the
//! registry.

/// Declare a tweak and yield its live handle (`Option<Tweak>`).
///
/// `None` only in disabled builds; when the facility is enabled the handle
/// is always present.
///
/// # Example
///
/// ```
/// use livetweak_inline::tweak;
///
/// let handle = tweak!("Audio", "Mixer", "masterVolume", 0.8f64, 0.0, 1.0);
/// if let Some(tweak) = handle {
///     assert_eq!(tweak.effective_value().as_f64(), 0.8);
/// }
/// ```
#[macro_export]
macro_rules! tweak {
    ($category:expr, $collection:expr, $name:expr, $default:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_tweak(
            &__SITE,
            $category,
            $collection,
            $name,
            $default,
            ::core::option::Option::None,
            ::core::option::Option::None,
        )
    }};
    ($category:expr, $collection:expr, $name:expr, $default:expr, $min:expr, $max:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_tweak(
            &__SITE,
            $category,
            $collection,
            $name,
            $default,
            ::core::option::Option::Some($min),
            ::core::option::Option::Some($max),
        )
    }};
}

/// Declare a tweak and yield its effective value, typed like the default.
///
/// An `f64` default reads `f64`, a `bool` default reads `bool`, a string
/// default reads `String`. Repeated evaluation is O(1) after the first.
///
/// # Example
///
/// ```
/// use livetweak_inline::tweak_value;
///
/// fn frame_budget_ms() -> u64 {
///     tweak_value!("Render", "Budget", "frameMs", 16u64, 1u64, 100u64)
/// }
///
/// assert_eq!(frame_budget_ms(), 16);
/// ```
#[macro_export]
macro_rules! tweak_value {
    ($category:expr, $collection:expr, $name:expr, $default:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_value(
            &__SITE,
            $category,
            $collection,
            $name,
            $default,
            ::core::option::Option::None,
            ::core::option::Option::None,
        )
    }};
    ($category:expr, $collection:expr, $name:expr, $default:expr, $min:expr, $max:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_value(
            &__SITE,
            $category,
            $collection,
            $name,
            $default,
            ::core::option::Option::Some($min),
            ::core::option::Option::Some($max),
        )
    }};
}

/// Declare a tweak and bind it to a field of a shared object.
///
/// Applies the effective value once immediately, then again after every
/// edit for as long as the returned handle (`Option<BindingHandle>`) and the
/// target are both alive. The target is held weakly; the binding never
/// extends its lifetime.
///
/// # Example
///
/// ```
/// use livetweak_inline::tweak_bind;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI64, Ordering};
///
/// struct Hud {
///     rows: AtomicI64,
/// }
///
/// let hud = Arc::new(Hud { rows: AtomicI64::new(0) });
/// let binding = tweak_bind!(
///     &hud,
///     |hud, rows| hud.rows.store(rows, Ordering::SeqCst),
///     "UI", "Hud", "rows", 20i64, 5i64, 50i64
/// );
/// assert_eq!(hud.rows.load(Ordering::SeqCst), 20);
/// drop(binding);
/// ```
#[macro_export]
macro_rules! tweak_bind {
    ($target:expr, $setter:expr, $category:expr, $collection:expr, $name:expr, $default:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_bind(
            &__SITE,
            $category,
            $collection,
            $name,
            $target,
            $default,
            ::core::option::Option::None,
            ::core::option::Option::None,
            $setter,
        )
    }};
    ($target:expr, $setter:expr, $category:expr, $collection:expr, $name:expr, $default:expr, $min:expr, $max:expr $(,)?) => {{
        static __SITE: $crate::support::SiteCache = $crate::support::SiteCache::new();
        $crate::support::site_bind(
            &__SITE,
            $category,
            $collection,
            $name,
            $target,
            $default,
            ::core::option::Option::Some($min),
            ::core::option::Option::Some($max),
            $setter,
        )
    }};
}
