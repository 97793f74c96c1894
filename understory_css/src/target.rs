// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style target trait.

use crate::types::TypeTag;

/// An object styles are resolved for.
///
/// The target exposes its identity, used to look up its registered names in
/// [`SelectorNames`](crate::SelectorNames), and its runtime type, used by type
/// selectors.
///
/// ```rust
/// use understory_css::{StyleTarget, TypeRegistry, TypeTag};
///
/// struct Widget {
///     id: u32,
///     kind: TypeTag,
/// }
///
/// impl StyleTarget<u32> for Widget {
///     fn key(&self) -> u32 { self.id }
///     fn type_tag(&self) -> TypeTag { self.kind }
/// }
///
/// let mut types = TypeRegistry::new();
/// let button = types.register("ui.Button");
/// let widget = Widget { id: 3, kind: button };
/// assert_eq!(widget.key(), 3);
/// ```
pub trait StyleTarget<K> {
    /// Returns the identity key of this target.
    fn key(&self) -> K;

    /// Returns the runtime type of this target.
    fn type_tag(&self) -> TypeTag;
}

impl<K, T> StyleTarget<K> for &T
where
    T: StyleTarget<K> + ?Sized,
{
    #[inline]
    fn key(&self) -> K {
        (**self).key()
    }

    #[inline]
    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }
}
