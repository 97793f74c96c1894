// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased declaration parameters.
//!
//! A declaration value is an ordered list of one or more parameters. The
//! stylesheet producer decides their concrete types (a parsed color, a length,
//! a raw identifier string, ...), so this module provides [`Param`] for
//! storing them in a heterogeneous [`Params`] list.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use smallvec::SmallVec;

/// The ordered parameter list of one declaration.
///
/// Most declarations carry a single parameter; function-style values such as
/// `rgb(1, 2, 3)` carry several.
pub type Params = SmallVec<[Param; 2]>;

/// A type-erased declaration parameter.
///
/// This wraps a value of any `'static + Clone` type, storing it on the heap
/// with its type information for later downcasting.
///
/// # Example
///
/// ```rust
/// use understory_css_property::Param;
///
/// let value = Param::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
///
/// let cloned = value.clone();
/// assert_eq!(cloned.downcast_ref::<i32>(), Some(&42));
/// ```
pub struct Param {
    inner: Box<dyn ErasedParam>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Param {
    /// Creates a new parameter from a concrete value.
    #[must_use]
    pub fn new<T: Clone + 'static>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name of the contained value, for diagnostics.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    ///
    /// Returns `None` if the contained value is not of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.inner.as_any().downcast_ref()
        } else {
            None
        }
    }
}

impl Clone for Param {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
            type_id: self.type_id,
            type_name: self.type_name,
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Trait object for type-erased values that can be cloned.
trait ErasedParam: Any {
    fn as_any(&self) -> &dyn Any;
    fn clone_boxed(&self) -> Box<dyn ErasedParam>;
}

impl<T: Clone + 'static> ErasedParam for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ErasedParam> {
        Box::new(self.clone())
    }
}
