// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector matching.
//!
//! Decides whether one rule applies to a target, given the target's ancestor
//! stack and the pseudo-class being resolved.

use core::hash::Hash;

use crate::error::ResolveError;
use crate::names::SelectorNames;
use crate::pseudo::PseudoClass;
use crate::rule::Rule;
use crate::selector::SelectorToken;
use crate::target::StyleTarget;
use crate::types::TypeRegistry;

/// Matches rules against targets.
///
/// The matcher borrows the two lookup tables a match needs: the names each
/// target answers to and the registered type hierarchy. It holds no state of
/// its own and never mutates either table.
///
/// A rule matches when all of the following hold:
///
/// 1. its pseudo-class equals the requested one;
/// 2. its subject (the last token of the chain) matches the target: every
///    name of a class/id token is registered on the target, or the target's
///    type is the named type or a subtype of it;
/// 3. every ancestor token of the chain is present in the ancestor stack;
/// 4. for every adjacent pair of ancestor tokens, the first occurrence of the
///    outer one in the stack comes before the last occurrence of the inner one.
///
/// Single-token chains never consult the stack.
///
/// ```rust
/// use understory_css::{
///     AncestorStack, PseudoClass, RuleBuilder, SelectorChain, SelectorMatcher, SelectorNames,
///     StyleTarget, TypeRegistry, TypeTag,
/// };
///
/// struct Node(u32, TypeTag);
///
/// impl StyleTarget<u32> for Node {
///     fn key(&self) -> u32 { self.0 }
///     fn type_tag(&self) -> TypeTag { self.1 }
/// }
///
/// let mut types = TypeRegistry::new();
/// let label = types.register("ui.Label");
/// let mut names = SelectorNames::<u32>::new();
/// names.register(1, ".title").unwrap();
///
/// let matcher = SelectorMatcher::new(&names, &types);
/// let rule = RuleBuilder::new(SelectorChain::parse(".dialog .title").unwrap()).build();
/// let node = Node(1, label);
///
/// let inside = AncestorStack::parse(".window .dialog").unwrap();
/// let outside = AncestorStack::parse(".window").unwrap();
/// assert_eq!(matcher.matches(&rule, &node, &inside, PseudoClass::None), Ok(true));
/// assert_eq!(matcher.matches(&rule, &node, &outside, PseudoClass::None), Ok(false));
/// assert_eq!(matcher.matches(&rule, &node, &inside, PseudoClass::Hover), Ok(false));
/// ```
pub struct SelectorMatcher<'a, K> {
    names: &'a SelectorNames<K>,
    types: &'a TypeRegistry,
}

impl<K> Clone for SelectorMatcher<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SelectorMatcher<'_, K> {}

impl<K> core::fmt::Debug for SelectorMatcher<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectorMatcher")
            .field("types", &self.types.len())
            .finish_non_exhaustive()
    }
}

impl<'a, K> SelectorMatcher<'a, K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a matcher over the given lookup tables.
    #[must_use]
    pub fn new(names: &'a SelectorNames<K>, types: &'a TypeRegistry) -> Self {
        Self { names, types }
    }

    /// Returns `Ok(true)` if `rule` applies to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownType`] when the rule's subject is a type
    /// selector naming a type missing from the registry. The error is only
    /// raised once the pseudo-class matched.
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
        if rule.pseudo_class() != pseudo_class {
            log::trace!(
                "rule `{}` skipped: pseudo-class {:?} != {:?}",
                rule.chain(),
                rule.pseudo_class(),
                pseudo_class
            );
            return Ok(false);
        }

        let chain = rule.chain();
        if !self.matches_subject(chain.subject(), target)? {
            log::trace!("rule `{chain}` skipped: subject does not match");
            return Ok(false);
        }

        let matched = ancestors_match(chain.ancestors(), stack);
        if matched {
            log::trace!("rule `{chain}` matched");
        } else {
            log::trace!("rule `{chain}` skipped: ancestors do not match");
        }
        Ok(matched)
    }

    /// Returns `Ok(true)` if `token` matches `target` itself.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownType`] for a type selector naming a type
    /// missing from the registry.
    pub fn matches_subject<T>(&self, token: &SelectorToken, target: &T) -> Result<bool, ResolveError>
    where
        T: StyleTarget<K> + ?Sized,
    {
        match token {
            SelectorToken::Type(path) => {
                let Some(ty) = self.types.lookup(path) else {
                    return Err(ResolveError::UnknownType {
                        token: path.clone(),
                    });
                };
                Ok(self.types.is_subtype(target.type_tag(), ty))
            }
            SelectorToken::Names(required) => Ok(self.names.contains_all(target.key(), required)),
        }
    }
}

/// Checks the ancestor portion of a chain against an ancestor stack.
///
/// Every token must be present in the stack, and each adjacent pair must
/// satisfy `first(prev) < last(cur)`. Tokens are compared by equality.
pub(crate) fn ancestors_match(ancestors: &[SelectorToken], stack: &[SelectorToken]) -> bool {
    if ancestors.is_empty() {
        return true;
    }
    if !ancestors.iter().all(|token| stack.contains(token)) {
        return false;
    }
    ancestors.windows(2).all(|pair| {
        let first_prev = stack.iter().position(|token| *token == pair[0]);
        let last_cur = stack.iter().rposition(|token| *token == pair[1]);
        matches!((first_prev, last_cur), (Some(prev), Some(cur)) if prev < cur)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleBuilder;
    use crate::selector::SelectorChain;
    use crate::stack::AncestorStack;
    use crate::types::TypeTag;

    struct Node {
        key: u32,
        ty: TypeTag,
    }

    impl StyleTarget<u32> for Node {
        fn key(&self) -> u32 {
            self.key
        }

        fn type_tag(&self) -> TypeTag {
            self.ty
        }
    }

    fn tokens(text: &str) -> AncestorStack {
        AncestorStack::parse(text).unwrap()
    }

    fn rule(chain: &str) -> Rule {
        RuleBuilder::new(SelectorChain::parse(chain).unwrap()).build()
    }

    #[test]
    fn presence_requires_every_token() {
        assert!(ancestors_match(&tokens(".a .b"), &tokens(".a .x .b")));
        assert!(!ancestors_match(&tokens(".a .b"), &tokens(".a .x")));
    }

    #[test]
    fn single_scope_cannot_satisfy_a_repeated_pair() {
        assert!(!ancestors_match(&tokens(".a .a"), &tokens(".a")));
        assert!(!ancestors_match(&tokens(".a"), &[]));
    }

    #[test]
    fn repeated_ancestors_may_share_stack_entries() {
        assert!(ancestors_match(&tokens(".a .a .a"), &tokens(".a .a")));
        assert!(ancestors_match(&tokens(".a .a"), &tokens(".a .a")));
        assert!(!ancestors_match(&tokens(".a .a .b"), &tokens(".a .b")));
    }

    #[test]
    fn ordering_uses_first_and_last_occurrence() {
        assert!(!ancestors_match(&tokens(".a .b"), &tokens(".b .a")));
        assert!(ancestors_match(&tokens(".a .b"), &tokens(".b .a .b")));
        assert!(ancestors_match(&tokens(".a .a"), &tokens(".a .x .a")));
        assert!(!ancestors_match(&tokens(".a .b .c"), &tokens(".a .c .b")));
    }

    #[test]
    fn compound_ancestor_compares_by_name_set() {
        assert!(ancestors_match(&tokens(".x.y"), &tokens(".y.x")));
        assert!(!ancestors_match(&tokens(".x.y"), &tokens(".x .y")));
    }

    #[test]
    fn single_token_chain_ignores_stack() {
        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Label");
        let mut names = SelectorNames::<u32>::new();
        names.register(1, ".a").unwrap();
        let matcher = SelectorMatcher::new(&names, &types);

        let node = Node { key: 1, ty };
        let stack = tokens(".unrelated .scopes");
        assert_eq!(
            matcher.matches(&rule(".a"), &node, &stack, PseudoClass::None),
            Ok(true)
        );
    }

    #[test]
    fn pseudo_class_is_exact() {
        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Label");
        let mut names = SelectorNames::<u32>::new();
        names.register(1, ".a").unwrap();
        let matcher = SelectorMatcher::new(&names, &types);
        let node = Node { key: 1, ty };

        let hover = RuleBuilder::new(SelectorChain::parse(".a").unwrap())
            .pseudo_class(PseudoClass::Hover)
            .build();
        assert_eq!(matcher.matches(&hover, &node, &[], PseudoClass::Hover), Ok(true));
        assert_eq!(matcher.matches(&hover, &node, &[], PseudoClass::None), Ok(false));
        assert_eq!(matcher.matches(&rule(".a"), &node, &[], PseudoClass::Hover), Ok(false));
    }

    #[test]
    fn type_subject_matches_subtypes() {
        let mut types = TypeRegistry::new();
        let component = types.register("ui.Component");
        let button = types.register_subtype("ui.Button", component);
        let names = SelectorNames::<u32>::new();
        let matcher = SelectorMatcher::new(&names, &types);

        let node = Node { key: 1, ty: button };
        assert_eq!(matcher.matches(&rule("ui-Component"), &node, &[], PseudoClass::None), Ok(true));

        let base = Node { key: 2, ty: component };
        assert_eq!(matcher.matches(&rule("ui.Button"), &base, &[], PseudoClass::None), Ok(false));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Label");
        let names = SelectorNames::<u32>::new();
        let matcher = SelectorMatcher::new(&names, &types);
        let node = Node { key: 1, ty };

        assert_eq!(
            matcher.matches(&rule("ui.Missing"), &node, &[], PseudoClass::None),
            Err(ResolveError::UnknownType {
                token: "ui.Missing".into()
            })
        );

        // Pseudo-class mismatch is checked first.
        let hover = RuleBuilder::new(SelectorChain::parse("ui.Missing").unwrap())
            .pseudo_class(PseudoClass::Hover)
            .build();
        assert_eq!(matcher.matches(&hover, &node, &[], PseudoClass::None), Ok(false));
    }

    #[test]
    fn compound_subject_requires_all_names() {
        let mut types = TypeRegistry::new();
        let ty = types.register("ui.Panel");
        let mut names = SelectorNames::<u32>::new();
        names.register(1, ".panel").unwrap();
        names.register(2, ".panel.active").unwrap();
        let matcher = SelectorMatcher::new(&names, &types);

        let plain = Node { key: 1, ty };
        let active = Node { key: 2, ty };
        let compound = rule(".panel.active");
        assert_eq!(matcher.matches(&compound, &plain, &[], PseudoClass::None), Ok(false));
        assert_eq!(matcher.matches(&compound, &active, &[], PseudoClass::None), Ok(true));
    }
}
