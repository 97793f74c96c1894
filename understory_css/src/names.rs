// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-target selector names.

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::SelectorError;
use crate::selector::{SelectorName, SelectorToken};

type NameList = SmallVec<[SelectorName; 4]>;

/// The class and id names each target answers to, keyed by target identity.
///
/// Names are per instance and may change at any time, independently of the
/// target's type: two buttons of the same type can carry different classes,
/// and one target can answer to several names at once.
///
/// `K` is the embedder's target key (a node id, an arena index, ...).
///
/// ```rust
/// use understory_css::{SelectorName, SelectorNames};
///
/// let mut names = SelectorNames::<u32>::new();
/// names.register(7, ".panel.active").unwrap();
/// names.add(7, SelectorName::id("main"));
///
/// assert!(names.contains(7, &SelectorName::class("panel")));
/// assert!(names.contains(7, &SelectorName::id("main")));
/// assert!(!names.contains(8, &SelectorName::class("panel")));
/// ```
#[derive(Clone, Debug)]
pub struct SelectorNames<K> {
    by_target: HashMap<K, NameList>,
}

impl<K> Default for SelectorNames<K> {
    fn default() -> Self {
        Self {
            by_target: HashMap::default(),
        }
    }
}

impl<K> SelectorNames<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name to `target`. Returns `false` if it was already present.
    pub fn add(&mut self, target: K, name: SelectorName) -> bool {
        let names = self.by_target.entry(target).or_default();
        if names.contains(&name) {
            return false;
        }
        names.push(name);
        true
    }

    /// Parses `text` as a class/id token (`.panel`, `#main.panel`, ...) and
    /// adds each of its names to `target`.
    ///
    /// Type selectors cannot be registered as names.
    pub fn register(&mut self, target: K, text: &str) -> Result<(), SelectorError> {
        let token = SelectorToken::parse(text)?;
        if token.type_path().is_some() {
            return Err(SelectorError::NotAName { token: text.into() });
        }
        for name in token.names() {
            self.add(target, name.clone());
        }
        Ok(())
    }

    /// Replaces every name of `target`.
    pub fn set(&mut self, target: K, names: impl IntoIterator<Item = SelectorName>) {
        let mut list: NameList = names.into_iter().collect();
        list.sort();
        list.dedup();
        if list.is_empty() {
            self.by_target.remove(&target);
        } else {
            self.by_target.insert(target, list);
        }
    }

    /// Removes one name from `target`. Returns `false` if it was absent.
    pub fn remove(&mut self, target: K, name: &SelectorName) -> bool {
        let Some(names) = self.by_target.get_mut(&target) else {
            return false;
        };
        let Some(index) = names.iter().position(|n| n == name) else {
            return false;
        };
        names.remove(index);
        if names.is_empty() {
            self.by_target.remove(&target);
        }
        true
    }

    /// Forgets `target` entirely.
    pub fn clear(&mut self, target: K) {
        self.by_target.remove(&target);
    }

    /// Returns the names of `target`, in no particular order.
    #[must_use]
    pub fn names(&self, target: K) -> &[SelectorName] {
        self.by_target
            .get(&target)
            .map(|names| names.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `target` answers to `name`.
    #[must_use]
    pub fn contains(&self, target: K, name: &SelectorName) -> bool {
        self.names(target).contains(name)
    }

    /// Returns `true` if `target` answers to every name in `required`.
    #[must_use]
    pub fn contains_all(&self, target: K, required: &[SelectorName]) -> bool {
        let names = self.names(target);
        required.iter().all(|name| names.contains(name))
    }

    /// Returns the number of targets with at least one name.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    /// Returns `true` if no target has a name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut names = SelectorNames::new();
        assert!(names.add(1_u32, SelectorName::class("a")));
        assert!(!names.add(1, SelectorName::class("a")));
        assert_eq!(names.names(1).len(), 1);
    }

    #[test]
    fn names_are_per_target() {
        let mut names = SelectorNames::new();
        names.add(1_u32, SelectorName::class("a"));
        names.add(2, SelectorName::class("b"));
        assert!(names.contains(1, &SelectorName::class("a")));
        assert!(!names.contains(1, &SelectorName::class("b")));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn class_and_id_with_same_text_differ() {
        let mut names = SelectorNames::new();
        names.add(1_u32, SelectorName::class("main"));
        assert!(!names.contains(1, &SelectorName::id("main")));
    }

    #[test]
    fn register_compound() {
        let mut names = SelectorNames::new();
        names.register(1_u32, "#main.panel").unwrap();
        assert!(names.contains_all(
            1,
            &[SelectorName::class("panel"), SelectorName::id("main")]
        ));
    }

    #[test]
    fn register_rejects_type_names() {
        let mut names = SelectorNames::<u32>::new();
        assert_eq!(
            names.register(1, "ui.Panel"),
            Err(SelectorError::NotAName {
                token: "ui.Panel".into()
            })
        );
        assert!(names.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut names = SelectorNames::new();
        names.set(1_u32, [SelectorName::class("a"), SelectorName::class("b")]);
        assert!(names.remove(1, &SelectorName::class("a")));
        assert!(!names.remove(1, &SelectorName::class("a")));
        assert!(!names.remove(9, &SelectorName::class("a")));
        assert_eq!(names.names(1), &[SelectorName::class("b")]);

        assert!(names.remove(1, &SelectorName::class("b")));
        assert!(names.is_empty());

        names.add(3, SelectorName::id("x"));
        names.clear(3);
        assert!(names.names(3).is_empty());
    }

    #[test]
    fn set_with_nothing_forgets_target() {
        let mut names = SelectorNames::new();
        names.add(1_u32, SelectorName::class("a"));
        names.set(1, []);
        assert!(names.is_empty());
    }

    #[test]
    fn unknown_target_has_no_names() {
        let names = SelectorNames::<u32>::new();
        assert!(names.names(5).is_empty());
        assert!(names.contains_all(5, &[]));
    }
}
