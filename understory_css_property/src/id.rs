// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property identification types.
//!
//! This module provides [`PropertyId`], the raw registry index, and
//! [`Property`], the identity token handed out by
//! [`PropertyRegistry`](crate::PropertyRegistry) and used as a key everywhere
//! a style attribute is named.

use core::fmt;

/// A runtime property identifier.
///
/// This is a lightweight handle (u16) that uniquely identifies a property
/// within a [`PropertyRegistry`](crate::PropertyRegistry).
///
/// # Example
///
/// ```rust
/// use understory_css_property::PropertyId;
///
/// let id = PropertyId::new(42);
/// assert_eq!(id.index(), 42);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a new property ID from the given index.
    ///
    /// This is typically called by [`PropertyRegistry::register`](crate::PropertyRegistry::register)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this property ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

/// A style attribute token (`background`, `stroke`, `border`, ...).
///
/// Properties are compared by identity: two tokens are equal only if the same
/// registry issued them for the same registration. The registered name is
/// metadata for diagnostics and lookup, never part of equality.
///
/// Unlike value-typed property keys, a `Property` carries no value type: a
/// style declaration holds an ordered list of type-erased
/// [`Param`](crate::Param)s, and callers pick the type they expect when reading
/// it back.
///
/// ```rust
/// use understory_css_property::PropertyRegistry;
///
/// let mut registry = PropertyRegistry::new();
/// let stroke = registry.register("stroke");
/// let fill = registry.register("fill");
///
/// assert_ne!(stroke, fill);
/// assert_eq!(registry.by_name("stroke"), Some(stroke));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Property {
    id: PropertyId,
}

impl Property {
    /// Creates a property token from a property ID.
    ///
    /// This is typically called by [`PropertyRegistry::register`](crate::PropertyRegistry::register)
    /// rather than directly. Tokens built by hand only compare equal to
    /// registry tokens with the same index.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropertyId) -> Self {
        Self { id }
    }

    /// Returns the underlying property ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.id.0).finish()
    }
}
