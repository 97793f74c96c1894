// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor stacks.

use alloc::vec::Vec;
use core::ops::Deref;

use crate::error::SelectorError;
use crate::selector::SelectorToken;

/// The scopes enclosing a target, outermost first.
///
/// Each entry is the selector token a container answers to. Callers that walk
/// a component tree push the container's token on the way down and pop it on
/// the way back up; [`AncestorStack::scoped`] does both around a closure.
///
/// The stack dereferences to a token slice, which is what the matcher reads.
///
/// ```rust
/// use understory_css::{AncestorStack, SelectorToken};
///
/// let mut stack = AncestorStack::new();
/// stack.push(SelectorToken::class("window"));
///
/// let depth = stack.scoped(SelectorToken::class("toolbar"), |stack| stack.len());
/// assert_eq!(depth, 2);
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AncestorStack {
    tokens: Vec<SelectorToken>,
}

impl AncestorStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whitespace-separated list of scope tokens, outermost first.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        text.split_whitespace().map(SelectorToken::parse).collect()
    }

    /// Enters a scope.
    pub fn push(&mut self, token: SelectorToken) {
        self.tokens.push(token);
    }

    /// Leaves the innermost scope.
    pub fn pop(&mut self) -> Option<SelectorToken> {
        self.tokens.pop()
    }

    /// Runs `f` with `token` pushed, popping it again afterwards.
    pub fn scoped<R>(&mut self, token: SelectorToken, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.tokens.len();
        self.tokens.push(token);
        let result = f(self);
        self.tokens.truncate(depth);
        result
    }

    /// Returns the scopes as a slice, outermost first.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectorToken] {
        &self.tokens
    }
}

impl Deref for AncestorStack {
    type Target = [SelectorToken];

    fn deref(&self) -> &[SelectorToken] {
        &self.tokens
    }
}

impl FromIterator<SelectorToken> for AncestorStack {
    fn from_iter<I: IntoIterator<Item = SelectorToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
