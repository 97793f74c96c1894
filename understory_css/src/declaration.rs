// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaration sets.
//!
//! A [`DeclarationSet`] groups declarations (a property and its ordered
//! parameter list). It is used in two ways: a rule owns the set of its own
//! declarations, and resolution folds the declarations of every rule matching
//! a target into a single set.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use understory_css_property::{ConvertParams, Param, Params, Property};

use crate::pseudo::PseudoClass;
use crate::rule::StyleSheet;

/// An ordered, override-aware set of declarations.
///
/// The property list keeps every occurrence in the order it was discovered,
/// duplicates included, while the value map keeps only the last value written
/// for each property. The position of the last occurrence therefore tells
/// which of two overlapping properties (a shorthand and one of its longhands,
/// say) was declared later; see [`DeclarationSet::is_after`].
///
/// The set is read-only once built. Parameters are cloned into it, so it does
/// not change when the rules it was resolved from are dropped or rebuilt.
///
/// ```rust
/// use understory_css::{DeclarationSet, PseudoClass};
/// use understory_css_property::{Param, Params, PropertyRegistry};
///
/// let mut registry = PropertyRegistry::new();
/// let stroke = registry.register("stroke");
///
/// let set = DeclarationSet::from_parts(
///     PseudoClass::None,
///     [stroke],
///     [(stroke, Params::from_iter([Param::new("red")]))],
/// );
///
/// assert!(set.contains(stroke));
/// assert_eq!(set.get_first::<&str>(stroke), Some(&"red"));
/// ```
#[derive(Clone)]
pub struct DeclarationSet {
    sheet: Option<StyleSheet>,
    pseudo_class: PseudoClass,
    properties: Vec<Property>,
    values: HashMap<Property, Params>,
}

impl DeclarationSet {
    /// Wraps an already-known list of properties and their values.
    ///
    /// This is how a rule's own declarations are built. `properties` is kept
    /// verbatim, duplicates included; for a property listed in `values` more
    /// than once, the last entry wins.
    ///
    /// Every listed property should have a value. A property without one is
    /// still reported by [`contains`](Self::contains) but
    /// [`get_value`](Self::get_value) returns `None` for it.
    #[must_use]
    pub fn from_parts(
        pseudo_class: PseudoClass,
        properties: impl IntoIterator<Item = Property>,
        values: impl IntoIterator<Item = (Property, Params)>,
    ) -> Self {
        Self {
            sheet: None,
            pseudo_class,
            properties: properties.into_iter().collect(),
            values: values.into_iter().collect(),
        }
    }

    /// Builds a new set keeping only the declarations of `keep`.
    ///
    /// Kept properties stay in their original relative order, every
    /// occurrence included, with their resolved values. Properties of `keep`
    /// absent from `self` are ignored.
    #[must_use]
    pub fn filtered(&self, keep: &[Property]) -> Self {
        let properties: Vec<Property> = self
            .properties
            .iter()
            .copied()
            .filter(|p| keep.contains(p))
            .collect();
        let values = self
            .values
            .iter()
            .filter(|(p, _)| keep.contains(*p))
            .map(|(p, params)| (*p, params.clone()))
            .collect();
        Self {
            sheet: self.sheet.clone(),
            pseudo_class: self.pseudo_class,
            properties,
            values,
        }
    }

    /// Returns a copy of this set with one parameter of one declaration
    /// replaced.
    ///
    /// Returns `None` if `property` is not declared or `index` is out of range
    /// for its parameter list.
    #[must_use]
    pub fn with_param(&self, property: Property, index: usize, param: Param) -> Option<Self> {
        let mut copy = self.clone();
        copy.replace_param(property, index, param).then_some(copy)
    }

    /// Replaces one parameter in place.
    ///
    /// Only the crate mutates a set after construction.
    pub(crate) fn replace_param(&mut self, property: Property, index: usize, param: Param) -> bool {
        match self.values.get_mut(&property).and_then(|params| params.get_mut(index)) {
            Some(slot) => {
                *slot = param;
                true
            }
            None => false,
        }
    }

    /// Creates the empty accumulator resolution folds into.
    pub(crate) fn empty(sheet: StyleSheet, pseudo_class: PseudoClass) -> Self {
        Self {
            sheet: Some(sheet),
            pseudo_class,
            properties: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Appends every declaration of `other`, overwriting values.
    pub(crate) fn append(&mut self, other: &Self) {
        self.properties.extend_from_slice(&other.properties);
        for property in &other.properties {
            if let Some(params) = other.values.get(property) {
                self.values.insert(*property, params.clone());
            }
        }
    }

    /// Returns the sheet this set was resolved from.
    ///
    /// Sets built with [`from_parts`](Self::from_parts) have none.
    #[must_use]
    pub fn sheet(&self) -> Option<&StyleSheet> {
        self.sheet.as_ref()
    }

    /// Returns the pseudo-class the declarations apply to.
    #[must_use]
    pub fn pseudo_class(&self) -> PseudoClass {
        self.pseudo_class
    }

    /// Returns `true` if the set holds no declaration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the number of entries in [`properties`](Self::properties),
    /// duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns every declared property in apply order, duplicates included.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns each declared property once with its final value, in no
    /// particular order.
    pub fn values(&self) -> impl Iterator<Item = (Property, &[Param])> + '_ {
        self.values.iter().map(|(p, params)| (*p, params.as_slice()))
    }

    /// Returns every entry of [`properties`](Self::properties) with the final
    /// value of its property.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &[Param])> + '_ {
        self.properties
            .iter()
            .filter_map(|p| self.get_value(*p).map(|params| (*p, params)))
    }

    /// Returns each property once, at the position of its last occurrence,
    /// with its final value.
    ///
    /// This is the order in which a consumer applying the set should write
    /// values so that later declarations take effect last.
    pub fn effective(&self) -> impl Iterator<Item = (Property, &[Param])> + '_ {
        let mut last: HashMap<Property, usize> = HashMap::with_capacity(self.values.len());
        for (index, property) in self.properties.iter().enumerate() {
            last.insert(*property, index);
        }
        self.properties
            .iter()
            .enumerate()
            .filter(move |(index, p)| last.get(*p) == Some(index))
            .filter_map(|(_, p)| self.get_value(*p).map(|params| (*p, params)))
    }

    /// Returns the parameter list of `property`, or `None` if it is not
    /// declared.
    ///
    /// A missing declaration is not an error: callers fall back to their
    /// inherited or default value.
    #[must_use]
    pub fn get_value(&self, property: Property) -> Option<&[Param]> {
        self.values.get(&property).map(|params| params.as_slice())
    }

    /// Returns the first parameter of `property` if it is a `T`.
    ///
    /// Meant for single-parameter values.
    #[must_use]
    pub fn get_first<T: 'static>(&self, property: Property) -> Option<&T> {
        self.get_value(property)?.first()?.downcast_ref()
    }

    /// Returns the value of `property` as a `T`.
    ///
    /// If the first parameter already is a `T` it is returned; otherwise the
    /// value is function-style and the whole parameter list goes through
    /// `convert`.
    ///
    /// ```rust
    /// use understory_css::{DeclarationSet, PseudoClass};
    /// use understory_css_property::{Param, Params, PropertyRegistry};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Rgb(u8, u8, u8);
    ///
    /// let mut registry = PropertyRegistry::new();
    /// let fill = registry.register("fill");
    ///
    /// // `fill: rgb(1, 2, 3)`
    /// let params = [Param::new(1_u8), Param::new(2_u8), Param::new(3_u8)];
    /// let set = DeclarationSet::from_parts(
    ///     PseudoClass::None,
    ///     [fill],
    ///     [(fill, Params::from_iter(params))],
    /// );
    ///
    /// let rgb = |params: &[Param]| match params {
    ///     [r, g, b] => Some(Rgb(
    ///         *r.downcast_ref()?,
    ///         *g.downcast_ref()?,
    ///         *b.downcast_ref()?,
    ///     )),
    ///     _ => None,
    /// };
    /// assert_eq!(set.get_as(fill, &rgb), Some(Rgb(1, 2, 3)));
    /// ```
    #[must_use]
    pub fn get_as<T, C>(&self, property: Property, convert: &C) -> Option<T>
    where
        T: Clone + 'static,
        C: ConvertParams<T> + ?Sized,
    {
        let params = self.get_value(property)?;
        if let Some(value) = params.first()?.downcast_ref::<T>() {
            return Some(value.clone());
        }
        convert.convert(params)
    }

    /// Returns `true` if `property` is declared.
    #[must_use]
    pub fn contains(&self, property: Property) -> bool {
        self.properties.contains(&property)
    }

    /// Returns `true` if the last occurrence of `p1` comes after the last
    /// occurrence of `p2`.
    ///
    /// If so, `p1` should win over `p2` where they define overlapping
    /// behavior. A property that is not declared comes before every declared
    /// one.
    #[must_use]
    pub fn is_after(&self, p1: Property, p2: Property) -> bool {
        self.last_position(p1) > self.last_position(p2)
    }

    fn last_position(&self, property: Property) -> Option<usize> {
        self.properties.iter().rposition(|p| *p == property)
    }
}

impl fmt::Debug for DeclarationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationSet")
            .field("pseudo_class", &self.pseudo_class)
            .field("properties", &self.properties)
            .field("values", &self.values)
            .field("sheet_rules", &self.sheet.as_ref().map(StyleSheet::len))
            .finish()
    }
}
