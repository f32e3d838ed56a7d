#![forbid(unsafe_code)]

//! Core: the tweak registry and live-binding engine.
//!
//! # Role in livetweak
//! `livetweak-core` owns the runtime side of the system: the hierarchical
//! namespace (category → collection → tweak), type-erased coercible values,
//! and the observer machinery that pushes value changes to bound consumers
//! without ever owning them.
//!
//! # Primary responsibilities
//! - **Value**: a closed tagged union with total coercion across the
//!   supported primitive kinds.
//! - **Tweak**: one named, typed parameter with default/current/min/max and
//!   range clamping.
//! - **TweakStore / TweakCategory / TweakCollection**: insertion-ordered,
//!   get-or-create namespace levels, with a lazily-created process-wide
//!   store and injectable fresh stores for tests.
//! - **Bindings**: leak-safe live synchronization from a tweak to a
//!   consumer's field, detaching automatically when either side goes away.
//!
//! # How it fits in the system
//! Declaration sites (the macros in `livetweak-inline`) resolve their
//! records against this crate's store; editor and persistence integrations
//! consume the ordered enumeration surface and call
//! [`Tweak::set_current`] to apply edits.

pub mod binding;
pub mod category;
pub mod collection;
pub mod error;
pub mod store;
mod sync;
pub mod tweak;
pub mod value;

pub use binding::{BindingHandle, ObserverId, TweakObserver};
pub use category::TweakCategory;
pub use collection::TweakCollection;
pub use error::TweakError;
pub use store::TweakStore;
pub use tweak::{IDENTIFIER_SEPARATOR, Tweak, tweak_identifier};
pub use value::{Value, ValueKind};
