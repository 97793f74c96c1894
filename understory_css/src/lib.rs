// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory CSS: selector matching and declaration-set resolution.
//!
//! This crate decides which stylesheet rules apply to a target and folds their
//! declarations into one ordered, override-aware [`DeclarationSet`].
//!
//! The moving parts are:
//!
//! - [`StyleSheet`]: an ordered list of [`Rule`]s, each a [`SelectorChain`],
//!   a [`PseudoClass`] and the rule's own declarations. Producing rules from
//!   stylesheet text is left to a front end.
//! - [`SelectorNames`]: the class and id names each target answers to, keyed
//!   by target identity.
//! - [`TypeRegistry`]: the target types type selectors can name, with their
//!   subtype relation.
//! - [`AncestorStack`]: the scopes enclosing the target being styled.
//! - [`SelectorMatcher`]: decides whether one rule applies.
//! - [`ResolveCx`]: scans a sheet and builds the [`DeclarationSet`].
//!
//! ## Matching
//!
//! A chain is read ancestor first. Its last token, the subject, is matched
//! against the target itself; the others must all appear in the ancestor
//! stack, in chain order, though not necessarily as direct parents. A token
//! such as `.panel.active` is a single subject requiring both names on the
//! target.
//!
//! ## Overrides
//!
//! Rules later in the sheet override earlier ones. The resolved set keeps
//! every occurrence of every property in the order it was met, so
//! [`DeclarationSet::is_after`] can tell which of two overlapping properties
//! was declared last.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_css::{
//!     AncestorStack, PseudoClass, ResolveCx, RuleBuilder, SelectorChain, SelectorNames,
//!     SelectorToken, StyleSheetBuilder, StyleTarget, TypeRegistry, TypeTag,
//! };
//! use understory_css_property::{Param, PropertyRegistry};
//!
//! struct Widget {
//!     id: u32,
//!     kind: TypeTag,
//! }
//!
//! impl StyleTarget<u32> for Widget {
//!     fn key(&self) -> u32 { self.id }
//!     fn type_tag(&self) -> TypeTag { self.kind }
//! }
//!
//! let mut properties = PropertyRegistry::new();
//! let background = properties.register("background");
//! let stroke = properties.register("stroke");
//!
//! let mut types = TypeRegistry::new();
//! let component = types.register("ui.Component");
//! let button = types.register_subtype("ui.Button", component);
//!
//! let sheet = StyleSheetBuilder::new()
//!     .rule(
//!         RuleBuilder::new(SelectorChain::parse("ui.Component").unwrap())
//!             .declare(background, [Param::new("white")])
//!             .build(),
//!     )
//!     .rule(
//!         RuleBuilder::new(SelectorChain::parse(".toolbar ui.Button").unwrap())
//!             .declare(stroke, [Param::new("gray")])
//!             .build(),
//!     )
//!     .rule(
//!         RuleBuilder::new(SelectorChain::parse("ui.Button").unwrap())
//!             .pseudo_class(PseudoClass::Hover)
//!             .declare(background, [Param::new("silver")])
//!             .build(),
//!     )
//!     .build();
//! sheet.validate(&types).unwrap();
//!
//! let names = SelectorNames::<u32>::new();
//! let cx = ResolveCx::new(&sheet, &names, &types);
//! let widget = Widget { id: 1, kind: button };
//!
//! let mut stack = AncestorStack::new();
//! stack.scoped(SelectorToken::class("toolbar"), |stack| {
//!     let idle = cx.resolve(&widget, stack, PseudoClass::None).unwrap();
//!     assert_eq!(idle.get_first::<&str>(background), Some(&"white"));
//!     assert_eq!(idle.get_first::<&str>(stroke), Some(&"gray"));
//!
//!     let hovered = cx.resolve(&widget, stack, PseudoClass::Hover).unwrap();
//!     assert_eq!(hovered.get_first::<&str>(background), Some(&"silver"));
//!     assert!(!hovered.contains(stroke));
//! });
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the `log`
//! facade; no logger is installed.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod declaration;
mod error;
mod matcher;
mod names;
mod pseudo;
mod resolve;
mod rule;
mod selector;
mod stack;
mod target;
mod types;

pub use declaration::DeclarationSet;
pub use error::{ResolveError, SelectorError};
pub use matcher::SelectorMatcher;
pub use names::SelectorNames;
pub use pseudo::PseudoClass;
pub use resolve::{ResolveCx, UnknownTypeHandling};
pub use rule::{Rule, RuleBuilder, StyleSheet, StyleSheetBuilder};
pub use selector::{SelectorChain, SelectorName, SelectorToken};
pub use stack::AncestorStack;
pub use target::StyleTarget;
pub use types::{TypeRegistry, TypeTag};
