// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rules and stylesheets.
//!
//! A [`StyleSheet`] is the ordered list of [`Rule`]s produced by a stylesheet
//! front end. Each rule combines a [`SelectorChain`], a [`PseudoClass`] and the
//! rule's own [`DeclarationSet`]. Stylesheet order is significant: among
//! matching rules, later ones override earlier ones.

use alloc::rc::Rc;
use alloc::vec::Vec;

use understory_css_property::{Param, Params, Property};

use crate::declaration::DeclarationSet;
use crate::error::ResolveError;
use crate::pseudo::PseudoClass;
use crate::selector::SelectorChain;
use crate::types::TypeRegistry;

/// A single stylesheet entry.
///
/// Rules are immutable once built. Use [`RuleBuilder`] or [`Rule::new`].
#[derive(Clone, Debug)]
pub struct Rule {
    chain: SelectorChain,
    declarations: DeclarationSet,
}

impl Rule {
    /// Creates a rule from a chain and its declarations.
    ///
    /// The rule's pseudo-class is the one carried by `declarations`.
    #[must_use]
    pub fn new(chain: SelectorChain, declarations: DeclarationSet) -> Self {
        Self {
            chain,
            declarations,
        }
    }

    /// Returns the selector chain.
    #[must_use]
    pub fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    /// Returns the pseudo-class the rule is restricted to.
    #[must_use]
    #[inline]
    pub fn pseudo_class(&self) -> PseudoClass {
        self.declarations.pseudo_class()
    }

    /// Returns the rule's own declarations, in declaration order.
    #[must_use]
    pub fn declarations(&self) -> &DeclarationSet {
        &self.declarations
    }
}

/// Builder for [`Rule`].
///
/// ```rust
/// use understory_css::{PseudoClass, RuleBuilder, SelectorChain};
/// use understory_css_property::{Param, PropertyRegistry};
///
/// let mut registry = PropertyRegistry::new();
/// let border = registry.register("border");
///
/// let rule = RuleBuilder::new(SelectorChain::parse(".panel").unwrap())
///     .pseudo_class(PseudoClass::Hover)
///     .declare(border, [Param::new("thin")])
///     .build();
///
/// assert_eq!(rule.pseudo_class(), PseudoClass::Hover);
/// assert!(rule.declarations().contains(border));
/// ```
#[derive(Debug)]
pub struct RuleBuilder {
    chain: SelectorChain,
    pseudo_class: PseudoClass,
    properties: Vec<Property>,
    values: Vec<(Property, Params)>,
}

impl RuleBuilder {
    /// Starts a rule for `chain` with no pseudo-class and no declarations.
    #[must_use]
    pub fn new(chain: SelectorChain) -> Self {
        Self {
            chain,
            pseudo_class: PseudoClass::None,
            properties: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Restricts the rule to a pseudo-class.
    #[must_use]
    pub fn pseudo_class(mut self, pseudo_class: PseudoClass) -> Self {
        self.pseudo_class = pseudo_class;
        self
    }

    /// Appends a declaration.
    ///
    /// Declaring the same property twice keeps both occurrences in the
    /// property order; the second parameter list wins.
    #[must_use]
    pub fn declare(mut self, property: Property, params: impl IntoIterator<Item = Param>) -> Self {
        self.properties.push(property);
        self.values.push((property, params.into_iter().collect()));
        self
    }

    /// Builds the rule.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            chain: self.chain,
            declarations: DeclarationSet::from_parts(
                self.pseudo_class,
                self.properties,
                self.values,
            ),
        }
    }
}

#[derive(Debug, Default)]
struct StyleSheetData {
    rules: Vec<Rule>,
}

/// An ordered collection of rules.
///
/// `StyleSheet` is immutable after creation and cheap to clone. Use
/// [`StyleSheetBuilder`] to construct instances. A sheet edited by the
/// embedder is a new sheet; sets resolved from the old one keep it alive and
/// are unaffected.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    inner: Rc<StyleSheetData>,
}

impl StyleSheet {
    /// Returns the number of rules in this sheet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Returns `true` if this sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Returns the rules in stylesheet order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.inner.rules
    }

    /// Returns the rule at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.inner.rules.get(index)
    }

    /// Checks every type subject against `types`.
    ///
    /// Resolution reports the same error lazily, for the first matching
    /// candidate only; validating once after loading a sheet surfaces it
    /// regardless of which targets get styled.
    pub fn validate(&self, types: &TypeRegistry) -> Result<(), ResolveError> {
        for rule in self.rules() {
            if let Some(path) = rule.chain().subject().type_path()
                && types.lookup(path).is_none()
            {
                return Err(ResolveError::UnknownType { token: path.into() });
            }
        }
        Ok(())
    }
}

/// Builder for constructing [`StyleSheet`] instances.
#[derive(Debug, Default)]
pub struct StyleSheetBuilder {
    rules: Vec<Rule>,
}

impl StyleSheetBuilder {
    /// Creates a new empty stylesheet builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the sheet.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends every rule of `rules`, in order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Builds the stylesheet.
    #[must_use]
    pub fn build(self) -> StyleSheet {
        StyleSheet {
            inner: Rc::new(StyleSheetData { rules: self.rules }),
        }
    }
}
