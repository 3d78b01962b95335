// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;

/// Error returned when a required value resolves to nothing.
///
/// Produced by [`Resolver::require`](crate::Resolver::require) and the
/// `require_*` methods of [`ComposeSet`](crate::ComposeSet). The latter carry
/// the key that failed to resolve.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedError<K = ()> {
    key: Option<K>,
}

impl<K> UnresolvedError<K> {
    /// Creates an error that is not tied to a key.
    #[must_use]
    pub const fn new() -> Self {
        Self { key: None }
    }

    /// Creates an error for the given key.
    #[must_use]
    pub const fn for_key(key: K) -> Self {
        Self { key: Some(key) }
    }

    /// Returns the key that failed to resolve, if known.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

impl<K> Default for UnresolvedError<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for UnresolvedError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "UnresolvedError {{ key: {:?} }}", key),
            None => f.write_str("UnresolvedError"),
        }
    }
}

impl<K: fmt::Debug> fmt::Display for UnresolvedError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "no value resolved for key {:?}", key),
            None => f.write_str("no value resolved"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for UnresolvedError<K> {}
