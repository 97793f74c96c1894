// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pseudo-classes.

use core::fmt;

use crate::error::SelectorError;

/// A state qualifier restricting when a rule is eligible.
///
/// Every rule carries exactly one pseudo-class. Plain rules use
/// [`PseudoClass::None`]. Matching is exact: a `Hover` rule is not a candidate
/// when resolving for `None`, and a `None` rule is not a candidate when
/// resolving for `Hover`. Consumers that want hover styling layered over the
/// base styling resolve both and apply them in turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PseudoClass {
    /// No state qualifier.
    #[default]
    None,
    /// `:hover`
    Hover,
    /// `:pressed`
    Pressed,
    /// `:focus`
    Focus,
    /// `:disabled`
    Disabled,
}

impl PseudoClass {
    /// Every pseudo-class, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Hover,
        Self::Pressed,
        Self::Focus,
        Self::Disabled,
    ];

    /// Returns the selector text of this pseudo-class (`""` for `None`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Hover => ":hover",
            Self::Pressed => ":pressed",
            Self::Focus => ":focus",
            Self::Disabled => ":disabled",
        }
    }

    /// Parses a pseudo-class from its selector text.
    ///
    /// The leading colon is optional; the empty string is `None`.
    ///
    /// ```rust
    /// use understory_css::PseudoClass;
    ///
    /// assert_eq!(PseudoClass::from_name(":hover"), Ok(PseudoClass::Hover));
    /// assert_eq!(PseudoClass::from_name("pressed"), Ok(PseudoClass::Pressed));
    /// assert_eq!(PseudoClass::from_name(""), Ok(PseudoClass::None));
    /// assert!(PseudoClass::from_name(":visited").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, SelectorError> {
        if name.is_empty() {
            return Ok(Self::None);
        }
        let bare = name.strip_prefix(':').unwrap_or(name);
        Self::ALL
            .into_iter()
            .skip(1)
            .find(|pseudo| pseudo.name().strip_prefix(':') == Some(bare))
            .ok_or_else(|| SelectorError::UnknownPseudoClass { name: name.into() })
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
