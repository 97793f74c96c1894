// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::boxed::Box;

/// Error returned when selector text cannot be turned into tokens.
///
/// These are raised while a stylesheet producer builds its rules, before any
/// resolution takes place.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The chain text contained no token at all.
    #[error("selector chain is empty")]
    EmptyChain,
    /// The token text was empty.
    #[error("selector token is empty")]
    EmptyToken,
    /// A `.` or `#` prefix (or a type path separator) was not followed by a name.
    #[error("selector token `{token}` has an empty name segment")]
    EmptyName {
        /// The offending token text.
        token: Box<str>,
    },
    /// The token contained a character outside the selector grammar.
    #[error("selector token `{token}` contains invalid character {ch:?}")]
    InvalidChar {
        /// The offending token text.
        token: Box<str>,
        /// The first rejected character.
        ch: char,
    },
    /// A type name was combined with class or id names in one token.
    #[error("selector token `{token}` mixes a type name with class or id names")]
    MixedType {
        /// The offending token text.
        token: Box<str>,
    },
    /// A type selector was given where only class or id names are accepted.
    #[error("selector token `{token}` is a type selector, not a class or id name")]
    NotAName {
        /// The offending token text.
        token: Box<str>,
    },
    /// The pseudo-class name is not one the engine knows.
    #[error("unknown pseudo-class `{name}`")]
    UnknownPseudoClass {
        /// The rejected name.
        name: Box<str>,
    },
}

/// Error returned when a rule cannot be evaluated against a target.
///
/// This signals a malformed stylesheet, never an ordinary non-match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A type selector names a type missing from the
    /// [`TypeRegistry`](crate::TypeRegistry).
    #[error("type selector `{token}` does not name a registered type")]
    UnknownType {
        /// The normalized type name.
        token: Box<str>,
    },
}
