// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whitelisted resolution of component props.
//!
//! This module provides [`compose_whitelisted`], which resolves a named subset
//! of a prop record and passes everything else through, and [`WhitelistMemo`],
//! which skips that work while a change-detection key stays the same.

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::memo::Memo;
use crate::options::ResolveOptions;
use crate::set::ComposeSet;
use crate::value::Composable;

/// Inline capacity for whitelisted keys.
///
/// Components rarely expose more than a handful of composable props.
const INLINE_CAPACITY: usize = 8;

/// A small set of keys selected for resolution.
///
/// Keys are kept in insertion order without duplicates. Lookup is linear,
/// which is fast for the handful of keys a component typically whitelists.
///
/// # Example
///
/// ```rust
/// use understory_composable::Whitelist;
///
/// let whitelist: Whitelist<&str> = ["color", "size", "color"].into_iter().collect();
/// assert_eq!(whitelist.len(), 2);
/// assert!(whitelist.contains(&"size"));
/// assert!(!whitelist.contains(&"on_click"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Whitelist<K> {
    keys: SmallVec<[K; INLINE_CAPACITY]>,
}

impl<K: PartialEq> Whitelist<K> {
    /// Creates an empty whitelist.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: SmallVec::new(),
        }
    }

    /// Adds `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Returns `true` if `key` is whitelisted.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Returns the number of whitelisted keys.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no key is whitelisted.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the whitelisted keys in insertion order.
    #[must_use]
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K: PartialEq> Default for Whitelist<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> FromIterator<K> for Whitelist<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut whitelist = Self::new();
        whitelist.extend(iter);
        whitelist
    }
}

impl<K: PartialEq> Extend<K> for Whitelist<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Whitelist<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys.iter()).finish()
    }
}

/// Resolves the whitelisted props against `state` and passes the rest through.
///
/// `props` is split into the whitelisted subset and everything else. The subset
/// is resolved as a [`ComposeSet`] with `options`; options for keys outside the
/// whitelist are ignored. The result merges both halves back into one record:
///
/// - whitelisted keys become [`Composable::Value`], or [`Composable::Unset`]
///   when they resolve to nothing;
/// - whitelisted keys that only have options are resolved and added too;
/// - all other props are moved through unchanged.
///
/// # Panics
///
/// Propagates any panic raised by a computed value, fallback, or transform.
///
/// # Example
///
/// ```rust
/// use hashbrown::HashMap;
/// use understory_composable::{Composable, ResolveOptions, Whitelist, compose_whitelisted};
///
/// struct ButtonState {
///     pressed: bool,
/// }
///
/// let mut props = HashMap::new();
/// props.insert("color", Composable::computed(|s: &ButtonState, _| {
///     Some(if s.pressed { "navy" } else { "blue" })
/// }));
/// props.insert("label_color", Composable::computed(|_: &ButtonState, _| Some("white")));
///
/// let whitelist: Whitelist<&str> = ["color"].into_iter().collect();
/// let merged = compose_whitelisted(props, HashMap::new(), &whitelist, &ButtonState { pressed: true });
///
/// assert_eq!(merged["color"].as_value(), Some(&"navy"));
/// assert!(merged["label_color"].is_computed());
/// ```
pub fn compose_whitelisted<K, S, V>(
    props: HashMap<K, Composable<S, V>>,
    mut options: HashMap<K, ResolveOptions<S, V>>,
    whitelist: &Whitelist<K>,
    state: &S,
) -> HashMap<K, Composable<S, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    let (selected, mut merged): (HashMap<_, _>, HashMap<_, _>) = props
        .into_iter()
        .partition(|(key, _)| whitelist.contains(key));
    options.retain(|key, _| whitelist.contains(key));

    crate::trace!(
        "resolving {} whitelisted props, passing {} through",
        selected.len(),
        merged.len()
    );

    let resolved = ComposeSet::from_parts(selected, options).resolve_all(state);
    merged.extend(
        resolved
            .into_iter()
            .map(|(key, value)| (key, value.map_or(Composable::Unset, Composable::Value))),
    );
    merged
}

/// Memoized [`compose_whitelisted`].
///
/// Holds a fixed [`Whitelist`] and the last merged record. The record is only
/// rebuilt when the change-detection key passed to
/// [`get_or_compose`](Self::get_or_compose) differs from the previous one.
///
/// # Example
///
/// ```rust
/// use hashbrown::HashMap;
/// use understory_composable::{Composable, WhitelistMemo};
///
/// let mut memo = WhitelistMemo::new(["size"].into_iter().collect());
///
/// let props = || {
///     let mut props = HashMap::new();
///     props.insert("size", Composable::computed(|scale: &u32, _| Some(12 * scale)));
///     (props, HashMap::new())
/// };
///
/// let merged = memo.get_or_compose(1_u8, &2, props);
/// assert_eq!(merged["size"].as_value(), Some(&24));
///
/// // Unchanged key: cached record, props are not rebuilt.
/// let merged = memo.get_or_compose(1_u8, &3, props);
/// assert_eq!(merged["size"].as_value(), Some(&24));
/// assert_eq!(memo.revision(), 1);
/// ```
pub struct WhitelistMemo<D, K, S, V> {
    whitelist: Whitelist<K>,
    memo: Memo<D, HashMap<K, Composable<S, V>>>,
}

/// The value and option records consumed by [`WhitelistMemo::get_or_compose`].
pub type PropRecords<K, S, V> = (
    HashMap<K, Composable<S, V>>,
    HashMap<K, ResolveOptions<S, V>>,
);

impl<D, K, S, V> WhitelistMemo<D, K, S, V>
where
    D: PartialEq,
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a memo for the given whitelist.
    #[must_use]
    pub fn new(whitelist: Whitelist<K>) -> Self {
        Self {
            whitelist,
            memo: Memo::new(),
        }
    }

    /// Returns the whitelist.
    #[must_use]
    #[inline]
    pub fn whitelist(&self) -> &Whitelist<K> {
        &self.whitelist
    }

    /// Returns the merged record for `deps`, rebuilding it if the key changed.
    ///
    /// `props` is only called on a rebuild, so callers can defer assembling
    /// the prop and option records until they are needed.
    pub fn get_or_compose<F>(
        &mut self,
        deps: D,
        state: &S,
        props: F,
    ) -> &HashMap<K, Composable<S, V>>
    where
        F: FnOnce() -> PropRecords<K, S, V>,
    {
        let whitelist = &self.whitelist;
        self.memo.get_or_compute(deps, || {
            let (props, options) = props();
            compose_whitelisted(props, options, whitelist, state)
        })
    }

    /// Returns the last merged record, if any.
    #[must_use]
    pub fn get(&self) -> Option<&HashMap<K, Composable<S, V>>> {
        self.memo.get()
    }

    /// Returns the number of times the record has been rebuilt.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.memo.revision()
    }

    /// Drops the cached record so the next access rebuilds it.
    pub fn invalidate(&mut self) {
        self.memo.invalidate();
    }
}

impl<D: fmt::Debug, K: fmt::Debug, S, V: fmt::Debug> fmt::Debug for WhitelistMemo<D, K, S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhitelistMemo")
            .field("whitelist", &self.whitelist)
            .field("memo", &self.memo)
            .finish()
    }
}
