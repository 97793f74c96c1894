// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property registry.
//!
//! This module provides [`PropertyRegistry`], the issuer of [`Property`]
//! identity tokens.

use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::id::{Property, PropertyId};

/// A registry for style properties.
///
/// Properties are registered once, typically while the toolkit starts up or
/// while a stylesheet producer builds its rules, and the registry provides
/// lookup by name or by token.
///
/// # Example
///
/// ```rust
/// use understory_css_property::PropertyRegistry;
///
/// let mut registry = PropertyRegistry::new();
/// let border = registry.register("border");
///
/// assert_eq!(registry.name(border), Some("border"));
/// assert_eq!(registry.by_name("border"), Some(border));
///
/// // Interning returns the existing token instead of panicking.
/// assert_eq!(registry.intern("border"), border);
/// ```
#[derive(Default)]
pub struct PropertyRegistry {
    names: Vec<Box<str>>,
    by_name: HashMap<Box<str>, Property>,
}

impl PropertyRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new property with the given name.
    ///
    /// # Panics
    ///
    /// Panics if a property with the same name is already registered,
    /// or if more than 65,536 properties are registered.
    pub fn register(&mut self, name: impl Into<Box<str>>) -> Property {
        let name = name.into();
        assert!(
            !self.by_name.contains_key(&name),
            "Property '{name}' is already registered"
        );
        self.push(name)
    }

    /// Returns the property registered under `name`, registering it first if
    /// needed.
    ///
    /// # Panics
    ///
    /// Panics if more than 65,536 properties are registered.
    pub fn intern(&mut self, name: &str) -> Property {
        match self.by_name.get(name) {
            Some(property) => *property,
            None => self.push(name.into()),
        }
    }

    fn push(&mut self, name: Box<str>) -> Property {
        assert!(
            self.names.len() < u16::MAX as usize,
            "Too many properties registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let property = Property::from_id(PropertyId::new(self.names.len() as u16));

        self.names.push(name.clone());
        self.by_name.insert(name, property);
        property
    }

    /// Returns the number of registered properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no properties are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Property> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of a property.
    #[must_use]
    pub fn name(&self, property: Property) -> Option<&str> {
        self.names
            .get(property.id().index() as usize)
            .map(|name| &**name)
    }

    /// Returns an iterator over all registered properties, in registration
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &str)> {
        self.names.iter().enumerate().map(|(i, name)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            let property = Property::from_id(PropertyId::new(i as u16));
            (property, &**name)
        })
    }
}

impl core::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("count", &self.names.len())
            .field("properties", &self.names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    #[test]
    fn registry_new() {
        let registry = PropertyRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register() {
        let mut registry = PropertyRegistry::new();
        let stroke = registry.register("stroke");

        assert_eq!(registry.len(), 1);
        assert_eq!(stroke.id().index(), 0);
        assert_eq!(registry.name(stroke), Some("stroke"));
    }

    #[test]
    fn registry_by_name() {
        let mut registry = PropertyRegistry::new();
        let stroke = registry.register("stroke");

        assert_eq!(registry.by_name("stroke"), Some(stroke));
        assert_eq!(registry.by_name("fill"), None);
    }

    #[test]
    fn registry_intern_reuses_existing() {
        let mut registry = PropertyRegistry::new();
        let stroke = registry.register("stroke");
        let fill = registry.intern("fill");

        assert_eq!(registry.intern("stroke"), stroke);
        assert_eq!(registry.intern("fill"), fill);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registry_name_of_foreign_token() {
        let registry = PropertyRegistry::new();
        let foreign = Property::from_id(PropertyId::new(999));
        assert_eq!(registry.name(foreign), None);
    }

    #[test]
    fn registry_iter() {
        let mut registry = PropertyRegistry::new();
        registry.register("background");
        registry.register("foreground");

        let names: Vec<_> = registry.iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["background", "foreground"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_name() {
        let mut registry = PropertyRegistry::new();
        registry.register("stroke");
        registry.register("stroke");
    }

    #[test]
    fn registry_debug() {
        let mut registry = PropertyRegistry::new();
        registry.register("stroke");

        let debug = format!("{registry:?}");
        assert!(debug.contains("PropertyRegistry"));
        assert!(debug.contains("stroke"));
    }
}
