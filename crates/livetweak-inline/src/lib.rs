#![forbid(unsafe_code)]

//! Inline declarations: declare a tweak where it is used.
//!
//! # Role in livetweak
//! `livetweak-inline` is the authoring layer. It turns a declaration written
//! at a call site, or a generated table of [`Declaration`] records, into a
//! live tweak in the shared store, with no registration statement anywhere.
//!
//! # Primary responsibilities
//! - **Declaration records**: `const`-constructible [`Declaration`] /
//!   [`DeclValue`] for generated or hand-maintained tables.
//! - **Discovery**: [`materialize`] and [`scan`] resolve records against the
//!   store exactly once, idempotently, with collision detection.
//! - **Macros**: [`tweak!`], [`tweak_value!`], [`tweak_bind!`], the
//!   declare-where-used forms, cached per call site.
//! - **The compile switch**: the `enabled` cargo feature (default on). When
//!   off, every form degrades to its literal default with zero registry
//!   cost.
//!
//! # Example
//!
//! ```
//! use livetweak_inline::tweak_value;
//!
//! fn retry_budget() -> i64 {
//!     // Declared here, discovered automatically, editable at runtime.
//!     tweak_value!("Network", "Timeouts", "retryCount", 3i64, 1i64, 5i64)
//! }
//!
//! assert_eq!(retry_budget(), 3);
//! ```

pub mod coerce;
pub mod decl;
pub mod discovery;
mod macros;
#[doc(hidden)]
pub mod support;

pub use coerce::TweakParam;
pub use decl::{DeclValue, Declaration};
pub use discovery::{materialize, scan};

// Re-exported so macro users can name the handle types without a separate
// dependency on the core crate.
pub use livetweak_core::{BindingHandle, Tweak, TweakError, TweakStore, Value, ValueKind};
