#![forbid(unsafe_code)]

//! Runtime support the declaration macros expand to.
//!
//! Everything here is `#[doc(hidden)]` at the crate root: the macros are the
//! public surface. The `enabled` feature is resolved in this crate, so the
//! functions come in two builds: the live ones below, and no-op twins that
//! return the literal default without ever touching the registry.
//!
//! Each macro expansion owns one [`SiteCache`]: a per-call-site
//! `OnceLock<Tweak>` that makes repeated evaluation O(1) after the first and
//! guarantees exactly-once materialization even when two threads race the
//! first evaluation.

use crate::coerce::TweakParam;
use livetweak_core::{BindingHandle, Tweak};
use std::sync::Arc;
use std::sync::OnceLock;

#[cfg(feature = "enabled")]
use crate::discovery::register_lenient;
#[cfg(feature = "enabled")]
use livetweak_core::TweakStore;

/// Per-call-site cache of the resolved tweak.
pub type SiteCache = OnceLock<Tweak>;

#[cfg(feature = "enabled")]
fn resolve<P: TweakParam>(
    site: &SiteCache,
    category: &'static str,
    collection: &'static str,
    name: &'static str,
    default: P,
    min: Option<P>,
    max: Option<P>,
) -> Tweak {
    site.get_or_init(|| {
        register_lenient(
            TweakStore::shared(),
            category,
            collection,
            name,
            default.into(),
            min.map(Into::into),
            max.map(Into::into),
        )
    })
    .clone()
}

/// `tweak!` body: the live tweak for this declaration site.
#[cfg(feature = "enabled")]
pub fn site_tweak<P: TweakParam>(
    site: &SiteCache,
    category: &'static str,
    collection: &'static str,
    name: &'static str,
    default: P,
    min: Option<P>,
    max: Option<P>,
) -> Option<Tweak> {
    Some(resolve(site, category, collection, name, default, min, max))
}

/// `tweak!` body, disabled build: no tweak, no registry interaction.
#[cfg(not(feature = "enabled"))]
#[inline(always)]
pub fn site_tweak<P: TweakParam>(
    _site: &SiteCache,
    _category: &'static str,
    _collection: &'static str,
    _name: &'static str,
    _default: P,
    _min: Option<P>,
    _max: Option<P>,
) -> Option<Tweak> {
    None
}

/// `tweak_value!` body: the effective value coerced to the default's type.
#[cfg(feature = "enabled")]
pub fn site_value<P: TweakParam>(
    site: &SiteCache,
    category: &'static str,
    collection: &'static str,
    name: &'static str,
    default: P,
    min: Option<P>,
    max: Option<P>,
) -> P::Out {
    let tweak = resolve(site, category, collection, name, default, min, max);
    P::extract(&tweak.effective_value())
}

/// `tweak_value!` body, disabled build: the literal default.
#[cfg(not(feature = "enabled"))]
#[inline(always)]
pub fn site_value<P: TweakParam>(
    _site: &SiteCache,
    _category: &'static str,
    _collection: &'static str,
    _name: &'static str,
    default: P,
    _min: Option<P>,
    _max: Option<P>,
) -> P::Out {
    default.lift()
}

/// `tweak_bind!` body: bind the declaration site's tweak to a target.
#[cfg(feature = "enabled")]
pub fn site_bind<T, P, F>(
    site: &SiteCache,
    category: &'static str,
    collection: &'static str,
    name: &'static str,
    target: &Arc<T>,
    default: P,
    min: Option<P>,
    max: Option<P>,
    setter: F,
) -> Option<BindingHandle>
where
    T: Send + Sync + 'static,
    P: TweakParam + 'static,
    F: Fn(&T, P::Out) + Send + Sync + 'static,
{
    let tweak = resolve(site, category, collection, name, default, min, max);
    Some(tweak.bind(target, move |object, value| setter(object, P::extract(value))))
}

/// `tweak_bind!` body, disabled build: apply the literal default once.
#[cfg(not(feature = "enabled"))]
#[inline(always)]
pub fn site_bind<T, P, F>(
    _site: &SiteCache,
    _category: &'static str,
    _collection: &'static str,
    _name: &'static str,
    target: &Arc<T>,
    default: P,
    _min: Option<P>,
    _max: Option<P>,
    setter: F,
) -> Option<BindingHandle>
where
    T: Send + Sync + 'static,
    P: TweakParam + 'static,
    F: Fn(&T, P::Out) + Send + Sync + 'static,
{
    setter(target, default.lift());
    None
}
