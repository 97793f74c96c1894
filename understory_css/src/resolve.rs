// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution context.
//!
//! This module provides [`ResolveCx`], which bundles everything needed to
//! resolve the declarations applying to a target: the stylesheet, the
//! per-target names, the type registry and the policy for malformed rules.

use core::hash::Hash;

use crate::declaration::DeclarationSet;
use crate::error::ResolveError;
use crate::matcher::SelectorMatcher;
use crate::names::SelectorNames;
use crate::pseudo::PseudoClass;
use crate::rule::{Rule, StyleSheet};
use crate::selector::SelectorToken;
use crate::target::StyleTarget;
use crate::types::TypeRegistry;

/// What resolution does with a rule whose type selector names an unknown type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownTypeHandling {
    /// Abort the resolution and return [`ResolveError::UnknownType`].
    #[default]
    Error,
    /// Log a warning, drop the offending rule and keep scanning.
    SkipRule,
}

/// Resolution context bundling the stylesheet and its lookup tables.
///
/// Resolution is a pure fold over the sheet: every call scans the rules in
/// stylesheet order and returns a fresh [`DeclarationSet`]. Nothing is
/// cached, so callers re-resolve whenever the target, its ancestry, its names
/// or the requested pseudo-class change.
///
/// # Type Parameters
///
/// * `K` - The key type identifying targets (e.g., `u32`, `NodeId`)
///
/// # Example
///
/// ```rust
/// use understory_css::{
///     AncestorStack, PseudoClass, ResolveCx, RuleBuilder, SelectorChain, SelectorNames,
///     StyleSheetBuilder, StyleTarget, TypeRegistry, TypeTag,
/// };
/// use understory_css_property::{Param, PropertyRegistry};
///
/// struct Node(u32, TypeTag);
///
/// impl StyleTarget<u32> for Node {
///     fn key(&self) -> u32 { self.0 }
///     fn type_tag(&self) -> TypeTag { self.1 }
/// }
///
/// let mut properties = PropertyRegistry::new();
/// let border = properties.register("border");
///
/// let sheet = StyleSheetBuilder::new()
///     .rule(
///         RuleBuilder::new(SelectorChain::parse(".panel").unwrap())
///             .declare(border, [Param::new("thin")])
///             .build(),
///     )
///     .rule(
///         RuleBuilder::new(SelectorChain::parse(".panel.active").unwrap())
///             .declare(border, [Param::new("thick")])
///             .build(),
///     )
///     .build();
///
/// let mut types = TypeRegistry::new();
/// let panel = types.register("ui.Panel");
/// let mut names = SelectorNames::<u32>::new();
/// names.register(1, ".panel.active").unwrap();
///
/// let cx = ResolveCx::new(&sheet, &names, &types);
/// let set = cx
///     .resolve(&Node(1, panel), &AncestorStack::new(), PseudoClass::None)
///     .unwrap();
///
/// assert_eq!(set.get_first::<&str>(border), Some(&"thick"));
/// assert_eq!(set.properties(), &[border, border]);
/// ```
pub struct ResolveCx<'a, K> {
    sheet: &'a StyleSheet,
    names: &'a SelectorNames<K>,
    types: &'a TypeRegistry,
    unknown_types: UnknownTypeHandling,
}

impl<K> core::fmt::Debug for ResolveCx<'_, K>
where
    K: Copy + Eq + Hash,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolveCx")
            .field("sheet", &self.sheet)
            .field("named_targets", &self.names.len())
            .field("types", &self.types)
            .field("unknown_types", &self.unknown_types)
            .finish()
    }
}

impl<'a, K> ResolveCx<'a, K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a new resolution context.
    ///
    /// Unknown type selectors abort resolution; see
    /// [`with_unknown_type_handling`](Self::with_unknown_type_handling).
    #[must_use]
    pub fn new(
        sheet: &'a StyleSheet,
        names: &'a SelectorNames<K>,
        types: &'a TypeRegistry,
    ) -> Self {
        Self {
            sheet,
            names,
            types,
            unknown_types: UnknownTypeHandling::Error,
        }
    }

    /// Sets the policy for rules naming unknown types.
    #[must_use]
    pub fn with_unknown_type_handling(mut self, handling: UnknownTypeHandling) -> Self {
        self.unknown_types = handling;
        self
    }

    /// Returns the stylesheet being resolved.
    #[must_use]
    #[inline]
    pub fn sheet(&self) -> &'a StyleSheet {
        self.sheet
    }

    /// Returns the policy for rules naming unknown types.
    #[must_use]
    #[inline]
    pub fn unknown_type_handling(&self) -> UnknownTypeHandling {
        self.unknown_types
    }

    /// Returns a matcher over this context's lookup tables.
    #[must_use]
    pub fn matcher(&self) -> SelectorMatcher<'a, K> {
        SelectorMatcher::new(self.names, self.types)
    }

    /// Returns `Ok(true)` if `rule` applies to `target`.
    ///
    /// This always reports unknown types as errors, whatever the policy.
    pub fn matches<T>(
        &self,
        rule: &Rule,
        target: &T,
        stack: &[SelectorToken],
        pseudo_class: PseudoClass,
    ) -> Result<bool, ResolveError>
    where
        T: StyleTarget<K> + ?Sized,
    {
        self.matcher().matches(rule, target, stack, pseudo_class)
    }

    /// Folds the declarations of every rule applying to `target` into one set.
    ///
    /// Rules are scanned in stylesheet order. Each matching rule appends its
    /// properties to the result (duplicates kept) and overwrites their values,
    /// so the last matching rule declaring a property provides its value.
    ///
    /// # Errors
    ///
    /// With [`UnknownTypeHandling::Error`], returns the first
    /// [`ResolveError::UnknownType`] met. With
    /// [`UnknownTypeHandling::SkipRule`] resolution never fails.
    pub fn resolve<T>(
        &self,
        target: &T,
        stack: &[SelectorToken],
        pseudo_class: PseudoClass,
    ) -> Result<DeclarationSet, ResolveError>
    where
        T: StyleTarget<K> + ?Sized,
    {
        let matcher = self.matcher();
        let mut set = DeclarationSet::empty(self.sheet.clone(), pseudo_class);
        let mut matched = 0_usize;

        for rule in self.sheet.rules() {
            let applies = match matcher.matches(rule, target, stack, pseudo_class) {
                Ok(applies) => applies,
                Err(err) => match self.unknown_types {
                    UnknownTypeHandling::Error => return Err(err),
                    UnknownTypeHandling::SkipRule => {
                        log::warn!("skipping rule `{}`: {err}", rule.chain());
                        false
                    }
                },
            };
            if applies {
                matched += 1;
                set.append(rule.declarations());
            }
        }

        log::debug!(
            "resolved {pseudo_class:?}: {matched} of {} rules matched, {} declarations",
            self.sheet.len(),
            set.len()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleBuilder, StyleSheetBuilder};
    use crate::selector::SelectorChain;
    use crate::types::TypeTag;
    use understory_css_property::{Param, Property, PropertyRegistry};

    struct Node(u32, TypeTag);

    impl StyleTarget<u32> for Node {
        fn key(&self) -> u32 {
            self.0
        }

        fn type_tag(&self) -> TypeTag {
            self.1
        }
    }

    fn rule(chain: &str, property: Property, value: i32) -> Rule {
        RuleBuilder::new(SelectorChain::parse(chain).unwrap())
            .declare(property, [Param::new(value)])
            .build()
    }

    #[test]
    fn later_rule_wins() {
        let mut properties = PropertyRegistry::new();
        let p = properties.register("p");
        let sheet = StyleSheetBuilder::new()
            .rule(rule(".a", p, 1))
            .rule(rule(".a", p, 2))
            .build();

        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Node");
        let mut names = SelectorNames::<u32>::new();
        names.register(1, ".a").unwrap();

        let cx = ResolveCx::new(&sheet, &names, &types);
        let set = cx.resolve(&Node(1, ty), &[], PseudoClass::None).unwrap();
        assert_eq!(set.get_first::<i32>(p), Some(&2));
        assert_eq!(set.properties(), &[p, p]);
        assert_eq!(set.pseudo_class(), PseudoClass::None);
        assert_eq!(set.sheet().map(StyleSheet::len), Some(2));
    }

    #[test]
    fn unknown_type_policy() {
        let mut properties = PropertyRegistry::new();
        let p = properties.register("p");
        let sheet = StyleSheetBuilder::new()
            .rule(rule(".a", p, 1))
            .rule(rule("ui.Missing", p, 2))
            .rule(rule(".a", p, 3))
            .build();

        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Node");
        let mut names = SelectorNames::<u32>::new();
        names.register(1, ".a").unwrap();
        let node = Node(1, ty);

        let cx = ResolveCx::new(&sheet, &names, &types);
        assert_eq!(cx.unknown_type_handling(), UnknownTypeHandling::Error);
        assert_eq!(
            cx.resolve(&node, &[], PseudoClass::None).unwrap_err(),
            ResolveError::UnknownType {
                token: "ui.Missing".into()
            }
        );

        let cx = cx.with_unknown_type_handling(UnknownTypeHandling::SkipRule);
        let set = cx.resolve(&node, &[], PseudoClass::None).unwrap();
        assert_eq!(set.properties(), &[p, p]);
        assert_eq!(set.get_first::<i32>(p), Some(&3));

        // `matches` reports the error whatever the policy.
        assert!(cx.matches(&sheet.rules()[1], &node, &[], PseudoClass::None).is_err());
    }

    #[test]
    fn no_matching_rule_is_empty() {
        let mut properties = PropertyRegistry::new();
        let p = properties.register("p");
        let sheet = StyleSheetBuilder::new().rule(rule(".a", p, 1)).build();
        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Node");
        let names = SelectorNames::<u32>::new();

        let cx = ResolveCx::new(&sheet, &names, &types);
        let set = cx.resolve(&Node(1, ty), &[], PseudoClass::None).unwrap();
        assert!(set.is_empty());
        assert!(set.properties().is_empty());
        assert!(!set.contains(p));
    }
}
