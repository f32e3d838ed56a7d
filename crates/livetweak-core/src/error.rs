#![forbid(unsafe_code)]

//! Error taxonomy for the tweak registry.
//!
//! Every error here is a local programmer error surfaced synchronously to
//! the caller: a wrong value kind at a call site, or inconsistent
//! declarations. None are retried and none should take the host process
//! down; callers recover by ignoring the malformed call. Out-of-range
//! assignments are *not* errors (they clamp), and get-or-create lookups
//! never report "not found".

use crate::tweak::IDENTIFIER_SEPARATOR;
use crate::value::ValueKind;
use std::fmt;

/// Errors from tweak registration and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweakError {
    /// A value kind differs from the tweak's established (default) kind.
    TypeMismatch {
        /// Stable identifier of the tweak involved.
        identifier: String,
        /// The kind the tweak was created with.
        expected: ValueKind,
        /// The kind the caller supplied.
        found: ValueKind,
    },
    /// Two distinct declaration triples produced the same stable identifier.
    ///
    /// This is an integrity hazard rather than a routine runtime error:
    /// merging two unrelated tweaks would corrupt both. Discovery reports it
    /// and refuses the colliding declaration.
    IdentityCollision {
        /// The identifier both declarations mapped to.
        identifier: String,
    },
}

impl fmt::Display for TweakError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch {
                identifier,
                expected,
                found,
            } => write!(
                f,
                "type mismatch for tweak '{}': expected {expected}, found {found}",
                identifier.replace(IDENTIFIER_SEPARATOR, "/")
            ),
            Self::IdentityCollision { identifier } => write!(
                f,
                "identity collision: two distinct declarations map to '{}'",
                identifier.replace(IDENTIFIER_SEPARATOR, "/")
            ),
        }
    }
}

impl std::error::Error for TweakError {}
