// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch resolution over keyed records.
//!
//! This module provides [`ComposeSet`], which applies the resolver to every
//! key of a record of composable values.

use core::cell::OnceCell;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::error::UnresolvedError;
use crate::options::ResolveOptions;
use crate::resolve::{Resolver, resolve_composable};
use crate::value::Composable;
use crate::whitelist::PropRecords;

/// A record of composable values with per-key resolution options.
///
/// The key set of a `ComposeSet` is the union of the keys that have a value
/// and the keys that have options. A key with options but no value resolves
/// from [`Composable::Unset`], so its fallback and default still apply.
/// Iteration order is unspecified.
///
/// # Example
///
/// ```rust
/// use hashbrown::HashMap;
/// use understory_composable::{ComposeSet, Composable, ResolveOptions};
///
/// let set = ComposeSet::<&str, u32, u32>::new()
///     .with("width", Composable::computed(|scale: &u32, _| Some(10 * scale)))
///     .with("height", Composable::value(20))
///     .with_options("gap", ResolveOptions::new().with_default(4));
///
/// let resolved = set.resolve_all(&2);
/// assert_eq!(resolved["width"], Some(20));
/// assert_eq!(resolved["height"], Some(20));
/// assert_eq!(resolved["gap"], Some(4));
///
/// let mut states = HashMap::new();
/// states.insert("width", 3);
/// let resolved = set.resolve_each(&states);
/// assert_eq!(resolved["width"], Some(30));
/// ```
pub struct ComposeSet<K, S, V> {
    values: HashMap<K, Composable<S, V>>,
    options: HashMap<K, ResolveOptions<S, V>>,
}

impl<K, S, V> ComposeSet<K, S, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            options: HashMap::new(),
        }
    }

    /// Creates a set from separate value and option records.
    #[must_use]
    pub fn from_parts(
        values: HashMap<K, Composable<S, V>>,
        options: HashMap<K, ResolveOptions<S, V>>,
    ) -> Self {
        Self { values, options }
    }

    /// Splits the set back into its value and option records.
    #[must_use]
    pub fn into_parts(self) -> PropRecords<K, S, V> {
        (self.values, self.options)
    }

    /// Sets the composable value for `key`, returning the previous one.
    pub fn insert(&mut self, key: K, value: Composable<S, V>) -> Option<Composable<S, V>> {
        self.values.insert(key, value)
    }

    /// Sets the resolution options for `key`, returning the previous ones.
    pub fn set_options(
        &mut self,
        key: K,
        options: ResolveOptions<S, V>,
    ) -> Option<ResolveOptions<S, V>> {
        self.options.insert(key, options)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: K, value: Composable<S, V>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`set_options`](Self::set_options).
    #[must_use]
    pub fn with_options(mut self, key: K, options: ResolveOptions<S, V>) -> Self {
        self.set_options(key, options);
        self
    }

    /// Returns the composable value for `key`, if one was set.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Composable<S, V>> {
        self.values.get(key)
    }

    /// Returns the resolution options for `key`, if any were set.
    #[must_use]
    pub fn options(&self, key: &K) -> Option<&ResolveOptions<S, V>> {
        self.options.get(key)
    }

    /// Returns `true` if `key` has a value or options.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key) || self.options.contains_key(key)
    }

    /// Returns every key that has a value or options, each exactly once.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.values.keys().chain(
            self.options
                .keys()
                .filter(|key| !self.values.contains_key(*key)),
        )
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// Returns `true` if the set has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.options.is_empty()
    }

    /// Resolves a single key against `state`.
    ///
    /// Returns `None` for keys the set does not contain.
    pub fn resolve_key(&self, key: &K, state: &S) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        self.resolve_present(key, state)
    }

    fn resolve_present(&self, key: &K, state: &S) -> Option<V> {
        let unset = Composable::Unset;
        let empty = ResolveOptions::new();
        let value = self.values.get(key).unwrap_or(&unset);
        let options = self.options.get(key).unwrap_or(&empty);
        resolve_composable(value, options, state)
    }

    /// Resolves every key against one shared `state`.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a computed value, fallback, or transform.
    pub fn resolve_all(&self, state: &S) -> HashMap<K, Option<V>> {
        crate::trace!("resolving {} composable keys against a shared state", self.len());
        self.keys()
            .map(|key| (key.clone(), self.resolve_present(key, state)))
            .collect()
    }

    /// Resolves every key against its own entry in `states`.
    ///
    /// Keys without an entry in `states` resolve against `S::default()`,
    /// which is built at most once per call.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a computed value, fallback, or transform.
    pub fn resolve_each(&self, states: &HashMap<K, S>) -> HashMap<K, Option<V>>
    where
        S: Default,
    {
        crate::trace!("resolving {} composable keys against per-key states", self.len());
        let default_state = OnceCell::new();
        self.keys()
            .map(|key| {
                let state = states
                    .get(key)
                    .unwrap_or_else(|| default_state.get_or_init(S::default));
                (key.clone(), self.resolve_present(key, state))
            })
            .collect()
    }

    /// Resolves every key against one shared `state`, requiring a value for each.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedError`] carrying the first key found to resolve to
    /// nothing. Which key is reported first is unspecified when several fail.
    pub fn require_all(&self, state: &S) -> Result<HashMap<K, V>, UnresolvedError<K>> {
        self.keys()
            .map(|key| {
                self.resolve_present(key, state)
                    .map(|value| (key.clone(), value))
                    .ok_or_else(|| UnresolvedError::for_key(key.clone()))
            })
            .collect()
    }

    /// Resolves every key against its own entry in `states`, requiring a value
    /// for each.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedError`] carrying the first key found to resolve to
    /// nothing.
    pub fn require_each(
        &self,
        states: &HashMap<K, S>,
    ) -> Result<HashMap<K, V>, UnresolvedError<K>>
    where
        S: Default,
    {
        self.resolve_each(states)
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => Ok((key, value)),
                None => Err(UnresolvedError::for_key(key)),
            })
            .collect()
    }

    /// Converts the set into one [`Resolver`] per key without resolving anything.
    #[must_use]
    pub fn into_resolvers(self) -> HashMap<K, Resolver<S, V>> {
        let Self {
            mut values,
            options,
        } = self;
        let mut resolvers: HashMap<K, Resolver<S, V>> = options
            .into_iter()
            .map(|(key, options)| {
                let value = values.remove(&key).unwrap_or_default();
                (key, Resolver::with_options(value, options))
            })
            .collect();
        resolvers.extend(
            values
                .into_iter()
                .map(|(key, value)| (key, Resolver::new(value))),
        );
        resolvers
    }
}

impl<K, S, V> Default for ComposeSet<K, S, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, S, V: fmt::Debug> fmt::Debug for ComposeSet<K, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeSet")
            .field("values", &self.values)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct GridCell {
        selected: bool,
        row: u32,
    }

    fn cell_set() -> ComposeSet<&'static str, GridCell, u32> {
        ComposeSet::new()
            .with(
                "weight",
                Composable::computed(|cell: &GridCell, _| cell.selected.then_some(700)),
            )
            .with_options("weight", ResolveOptions::new().with_default(400))
            .with(
                "stripe",
                Composable::computed(|cell: &GridCell, _| Some(cell.row % 2)),
            )
            .with_options(
                "indent",
                ResolveOptions::new().fallback(|cell: &GridCell, _| Some(cell.row * 8)),
            )
    }

    #[test]
    fn keys_are_union_of_values_and_options() {
        let set = cell_set();
        let mut keys: Vec<_> = set.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["indent", "stripe", "weight"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(set.contains_key(&"indent"));
        assert!(set.get(&"indent").is_none());
        assert!(set.options(&"indent").is_some());
    }

    #[test]
    fn resolve_all_uses_shared_state() {
        let set = cell_set();
        let resolved = set.resolve_all(&GridCell {
            selected: true,
            row: 3,
        });
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved["weight"], Some(700));
        assert_eq!(resolved["stripe"], Some(1));
        assert_eq!(resolved["indent"], Some(24));
    }

    #[test]
    fn resolve_each_uses_per_key_state() {
        let set = cell_set();
        let mut states = HashMap::new();
        states.insert(
            "stripe",
            GridCell {
                selected: false,
                row: 5,
            },
        );
        states.insert(
            "indent",
            GridCell {
                selected: false,
                row: 2,
            },
        );

        let resolved = set.resolve_each(&states);
        // "weight" has no state entry and resolves against `GridCell::default()`.
        assert_eq!(resolved["weight"], Some(400));
        assert_eq!(resolved["stripe"], Some(1));
        assert_eq!(resolved["indent"], Some(16));
    }

    #[test]
    fn resolve_key_ignores_unknown_keys() {
        let set = cell_set();
        assert_eq!(set.resolve_key(&"missing", &GridCell::default()), None);
        assert_eq!(set.resolve_key(&"weight", &GridCell::default()), Some(400));
    }

    #[test]
    fn require_all_reports_missing_key() {
        let set = ComposeSet::<&str, (), u32>::new()
            .with("a", Composable::value(1))
            .with("b", Composable::unset());
        let err = set.require_all(&()).unwrap_err();
        assert_eq!(err.key(), Some(&"b"));

        let set = ComposeSet::<&str, (), u32>::new().with("a", Composable::value(1));
        let resolved = set.require_all(&()).unwrap();
        assert_eq!(resolved["a"], 1);
    }

    #[test]
    fn require_each_reports_missing_key() {
        let set = ComposeSet::<&str, u32, u32>::new()
            .with("a", Composable::computed(|s: &u32, _| (*s > 0).then_some(*s)));
        let mut states = HashMap::new();
        states.insert("a", 0);
        assert_eq!(set.require_each(&states).unwrap_err().key(), Some(&"a"));

        states.insert("a", 5);
        assert_eq!(set.require_each(&states).unwrap()["a"], 5);
    }

    #[test]
    fn into_resolvers_does_not_resolve() {
        let set = ComposeSet::<&str, (), u32>::new()
            .with(
                "a",
                Composable::computed(|_, _| panic!("resolved too early")),
            )
            .with_options("b", ResolveOptions::new().with_default(2));
        let resolvers = set.into_resolvers();
        assert_eq!(resolvers.len(), 2);
        assert!(resolvers["a"].value().is_computed());
        assert!(resolvers["b"].value().is_unset());
        assert_eq!(resolvers["b"].resolve(&()), Some(2));
    }

    #[test]
    fn parts_round_trip_keeps_entries() {
        let (values, options) = cell_set().into_parts();
        assert_eq!(values.len(), 2);
        assert_eq!(options.len(), 2);
        let set = ComposeSet::from_parts(values, options);
        assert_eq!(set.len(), 3);
    }
}
