// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector tokens and chains.
//!
//! The token grammar is deliberately small:
//!
//! - `.name` is a class selector and `#name` an id selector. Several of them
//!   may be written back to back (`.panel.active`, `#main.panel`); such a
//!   token is still a single token and requires *all* of its names on the same
//!   target.
//! - Anything else is a type selector: a path such as `ui.widgets.Panel`. Path
//!   segments may also be separated by `-` (`ui-widgets-Panel`), which is
//!   normalized to `.`.
//!
//! A [`SelectorChain`] is a whitespace-separated sequence of tokens read
//! ancestor first; its last token is the *subject*, matched against the
//! target itself.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::error::SelectorError;

/// A class or id name, as registered on a target and required by a token.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectorName {
    /// A class name, written `.name`.
    Class(Box<str>),
    /// An id name, written `#name`.
    Id(Box<str>),
}

impl SelectorName {
    /// Creates a class name. The name is given without its `.` prefix.
    #[must_use]
    pub fn class(name: impl Into<Box<str>>) -> Self {
        Self::Class(name.into())
    }

    /// Creates an id name. The name is given without its `#` prefix.
    #[must_use]
    pub fn id(name: impl Into<Box<str>>) -> Self {
        Self::Id(name.into())
    }

    /// Returns the bare name, without prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Class(name) | Self::Id(name) => name,
        }
    }
}

impl fmt::Display for SelectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
        }
    }
}

/// One whitespace-free element of a selector chain.
///
/// Tokens compare structurally: two `Names` tokens are equal when they hold
/// the same set of names, whatever order they were written in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectorToken {
    /// A type selector, holding the normalized dotted type path.
    Type(Box<str>),
    /// One or more class/id names, sorted and deduplicated, never empty.
    Names(SmallVec<[SelectorName; 1]>),
}

impl SelectorToken {
    /// Parses one token.
    ///
    /// ```rust
    /// use understory_css::{SelectorName, SelectorToken};
    ///
    /// let token = SelectorToken::parse(".panel.active").unwrap();
    /// assert_eq!(
    ///     token.names(),
    ///     &[SelectorName::class("active"), SelectorName::class("panel")]
    /// );
    ///
    /// let token = SelectorToken::parse("ui-widgets-Panel").unwrap();
    /// assert_eq!(token.type_path(), Some("ui.widgets.Panel"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        if text.is_empty() {
            return Err(SelectorError::EmptyToken);
        }
        if text.starts_with(['.', '#']) {
            parse_names(text)
        } else {
            parse_type(text)
        }
    }

    /// Creates a single-class token. The name is given without its `.` prefix.
    #[must_use]
    pub fn class(name: impl Into<Box<str>>) -> Self {
        Self::Names(smallvec::smallvec![SelectorName::class(name)])
    }

    /// Creates a single-id token. The name is given without its `#` prefix.
    #[must_use]
    pub fn id(name: impl Into<Box<str>>) -> Self {
        Self::Names(smallvec::smallvec![SelectorName::id(name)])
    }

    /// Returns the names required by this token (empty for type selectors).
    #[must_use]
    pub fn names(&self) -> &[SelectorName] {
        match self {
            Self::Type(_) => &[],
            Self::Names(names) => names.as_slice(),
        }
    }

    /// Returns the normalized type path if this is a type selector.
    #[must_use]
    pub fn type_path(&self) -> Option<&str> {
        match self {
            Self::Type(path) => Some(&**path),
            Self::Names(_) => None,
        }
    }
}

impl fmt::Display for SelectorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(path) => f.write_str(path),
            Self::Names(names) => names.iter().try_for_each(|name| write!(f, "{name}")),
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

fn is_type_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn parse_names(text: &str) -> Result<SelectorToken, SelectorError> {
    let mut names: SmallVec<[SelectorName; 1]> = SmallVec::new();
    let mut pending: Option<(char, String)> = None;

    for ch in text.chars() {
        if ch == '.' || ch == '#' {
            if let Some((prefix, name)) = pending.take() {
                names.push(finish_name(text, prefix, name)?);
            }
            pending = Some((ch, String::new()));
        } else if is_name_char(ch) {
            // The first character is always a prefix, so `pending` is set.
            if let Some((_, name)) = pending.as_mut() {
                name.push(ch);
            }
        } else {
            return Err(SelectorError::InvalidChar {
                token: text.into(),
                ch,
            });
        }
    }
    if let Some((prefix, name)) = pending {
        names.push(finish_name(text, prefix, name)?);
    }

    names.sort();
    names.dedup();
    Ok(SelectorToken::Names(names))
}

fn finish_name(text: &str, prefix: char, name: String) -> Result<SelectorName, SelectorError> {
    if name.is_empty() {
        return Err(SelectorError::EmptyName { token: text.into() });
    }
    Ok(if prefix == '#' {
        SelectorName::id(name)
    } else {
        SelectorName::class(name)
    })
}

fn parse_type(text: &str) -> Result<SelectorToken, SelectorError> {
    if text.contains('#') {
        return Err(SelectorError::MixedType { token: text.into() });
    }
    let mut segments = Vec::new();
    for segment in text.split(['.', '-']) {
        if segment.is_empty() {
            return Err(SelectorError::EmptyName { token: text.into() });
        }
        if let Some(ch) = segment.chars().find(|ch| !is_type_char(*ch)) {
            return Err(SelectorError::InvalidChar {
                token: text.into(),
                ch,
            });
        }
        segments.push(segment);
    }
    Ok(SelectorToken::Type(segments.join(".").into()))
}

/// Normalizes a type path, turning `-` separators into `.`.
pub(crate) fn normalize_type_path(path: &str) -> String {
    path.replace('-', ".")
}

/// An ordered, non-empty sequence of selector tokens, ancestors first.
///
/// The chain is stored split into its ancestor portion and its subject, so the
/// subject is always available.
///
/// ```rust
/// use understory_css::{SelectorChain, SelectorToken};
///
/// let chain = SelectorChain::parse(".window  .toolbar ui.Button").unwrap();
/// assert_eq!(chain.len(), 3);
/// assert_eq!(chain.subject(), &SelectorToken::parse("ui.Button").unwrap());
/// assert_eq!(chain.ancestors().len(), 2);
/// assert_eq!(chain.to_string(), ".window .toolbar ui.Button");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorChain {
    ancestors: SmallVec<[SelectorToken; 2]>,
    subject: SelectorToken,
}

impl SelectorChain {
    /// Parses a whitespace-separated chain.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let tokens = text
            .split_whitespace()
            .map(SelectorToken::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tokens(tokens)
    }

    /// Builds a chain from tokens, ancestors first.
    pub fn from_tokens(
        tokens: impl IntoIterator<Item = SelectorToken>,
    ) -> Result<Self, SelectorError> {
        let mut ancestors: SmallVec<[SelectorToken; 2]> = tokens.into_iter().collect();
        let subject = ancestors.pop().ok_or(SelectorError::EmptyChain)?;
        Ok(Self { ancestors, subject })
    }

    /// Creates a one-token chain.
    #[must_use]
    pub fn single(subject: SelectorToken) -> Self {
        Self {
            ancestors: SmallVec::new(),
            subject,
        }
    }

    /// Returns the last token, matched against the target itself.
    #[must_use]
    pub fn subject(&self) -> &SelectorToken {
        &self.subject
    }

    /// Returns every token but the subject, outermost first.
    #[must_use]
    pub fn ancestors(&self) -> &[SelectorToken] {
        &self.ancestors
    }

    /// Returns the number of tokens, subject included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ancestors.len() + 1
    }

    /// Always `false`: a chain has at least its subject.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the tokens in chain order.
    pub fn tokens(&self) -> impl Iterator<Item = &SelectorToken> + '_ {
        self.ancestors.iter().chain(core::iter::once(&self.subject))
    }
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.ancestors {
            write!(f, "{token} ")?;
        }
        write!(f, "{}", self.subject)
    }
}
