// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot memoization keyed by a change-detection value.

use core::fmt;

/// A single cached value, recomputed only when its change-detection key changes.
///
/// `Memo` tracks a monotonically increasing **revision** counter that bumps
/// every time the value is recomputed. Consumers can compare revisions to tell
/// whether the value they last observed is still current.
///
/// # Example
///
/// ```rust
/// use understory_composable::Memo;
///
/// let mut memo = Memo::new();
///
/// assert_eq!(*memo.get_or_compute(1, || "first"), "first");
/// assert_eq!(memo.revision(), 1);
///
/// // Same key: the closure is not called.
/// assert_eq!(*memo.get_or_compute(1, || "second"), "first");
/// assert_eq!(memo.revision(), 1);
///
/// // New key: recomputed.
/// assert_eq!(*memo.get_or_compute(2, || "third"), "third");
/// assert_eq!(memo.revision(), 2);
/// ```
pub struct Memo<D, T> {
    entry: Option<(D, T)>,
    revision: u64,
}

impl<D: PartialEq, T> Memo<D, T> {
    /// Creates an empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entry: None,
            revision: 0,
        }
    }

    /// Returns the cached value for `deps`, computing it if the key changed.
    ///
    /// The value is recomputed when the memo is empty or when `deps` is not
    /// equal to the key it was last computed with.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by `compute`. The cache is left empty in
    /// that case.
    pub fn get_or_compute<F>(&mut self, deps: D, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        let entry = match self.entry.take() {
            Some((cached, value)) if cached == deps => (cached, value),
            _ => {
                let value = compute();
                self.revision = self.revision.wrapping_add(1);
                crate::trace!("memo recomputed, revision {}", self.revision);
                (deps, value)
            }
        };
        &self.entry.insert(entry).1
    }

    /// Returns the cached value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    /// Returns the key the cached value was computed with, if any.
    #[must_use]
    pub fn deps(&self) -> Option<&D> {
        self.entry.as_ref().map(|(deps, _)| deps)
    }

    /// Returns `true` if a value is cached.
    #[must_use]
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.entry.is_some()
    }

    /// Returns the current revision counter.
    ///
    /// The revision starts at zero and bumps (wrapping) on every recompute.
    /// [`invalidate`](Self::invalidate) does not change it.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drops the cached value so the next access recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl<D: PartialEq, T> Default for Memo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: fmt::Debug, T: fmt::Debug> fmt::Debug for Memo<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("entry", &self.entry)
            .field("revision", &self.revision)
            .finish()
    }
}
