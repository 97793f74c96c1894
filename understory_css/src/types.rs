// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opt-in registration of target types for type selectors.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::selector::normalize_type_path;

/// A stable identifier for a registered target type.
///
/// Issued by [`TypeRegistry`]; targets report theirs through
/// [`StyleTarget::type_tag`](crate::StyleTarget::type_tag).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag(u32);

impl TypeTag {
    /// Returns this tag as a `usize` index.
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct TypeEntry {
    path: Box<str>,
    parent: Option<TypeTag>,
}

/// The table type selectors resolve against.
///
/// Every type that should be addressable from a stylesheet registers its
/// dotted path once, optionally naming its parent type. A type selector then
/// matches a target whose type is the named type or any registered descendant
/// of it.
///
/// Paths are normalized on the way in, so `ui-widgets-Panel` and
/// `ui.widgets.Panel` name the same type.
///
/// ```rust
/// use understory_css::TypeRegistry;
///
/// let mut types = TypeRegistry::new();
/// let panel = types.register("ui.Panel");
/// let tab_panel = types.register_subtype("ui.TabPanel", panel);
///
/// assert_eq!(types.lookup("ui-TabPanel"), Some(tab_panel));
/// assert!(types.is_subtype(tab_panel, panel));
/// assert!(!types.is_subtype(panel, tab_panel));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<TypeEntry>,
    by_path: HashMap<Box<str>, TypeTag>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a root type.
    ///
    /// # Panics
    ///
    /// Panics if the path is already registered.
    pub fn register(&mut self, path: &str) -> TypeTag {
        self.insert(path, None)
    }

    /// Registers a type deriving from `parent`.
    ///
    /// # Panics
    ///
    /// Panics if the path is already registered or if `parent` was not issued
    /// by this registry.
    pub fn register_subtype(&mut self, path: &str, parent: TypeTag) -> TypeTag {
        assert!(
            parent.as_usize() < self.entries.len(),
            "Parent {parent:?} is not registered"
        );
        self.insert(path, Some(parent))
    }

    fn insert(&mut self, path: &str, parent: Option<TypeTag>) -> TypeTag {
        let path: Box<str> = normalize_type_path(path).into();
        assert!(
            !self.by_path.contains_key(&path),
            "Type '{path}' is already registered"
        );
        assert!(
            self.entries.len() < u32::MAX as usize,
            "Too many types registered (max {})",
            u32::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let tag = TypeTag(self.entries.len() as u32);
        self.entries.push(TypeEntry {
            path: path.clone(),
            parent,
        });
        self.by_path.insert(path, tag);
        tag
    }

    /// Looks up a type by path, `-` or `.` separated.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<TypeTag> {
        if path.contains('-') {
            self.by_path.get(normalize_type_path(path).as_str()).copied()
        } else {
            self.by_path.get(path).copied()
        }
    }

    /// Returns the normalized path of a type.
    #[must_use]
    pub fn path(&self, tag: TypeTag) -> Option<&str> {
        self.entries.get(tag.as_usize()).map(|entry| &*entry.path)
    }

    /// Returns the parent of a type.
    #[must_use]
    pub fn parent(&self, tag: TypeTag) -> Option<TypeTag> {
        self.entries.get(tag.as_usize()).and_then(|entry| entry.parent)
    }

    /// Returns `true` if `tag` is `ancestor` or derives from it.
    #[must_use]
    pub fn is_subtype(&self, tag: TypeTag, ancestor: TypeTag) -> bool {
        let mut current = Some(tag);
        while let Some(tag) = current {
            if tag == ancestor {
                return true;
            }
            current = self.parent(tag);
        }
        false
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
