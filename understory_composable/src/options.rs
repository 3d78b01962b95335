// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution options.
//!
//! This module provides [`ResolveOptions`], the fallback, default, and
//! transform configuration applied by a [`Resolver`](crate::Resolver).

use alloc::boxed::Box;
use core::fmt;

/// Callback producing a value when the primary evaluation is absent.
///
/// The callback receives the state and the configured default (if any).
pub type FallbackCallback<S, V> = Box<dyn Fn(&S, Option<&V>) -> Option<V> + Send + Sync>;

/// Callback applied to the final present value.
///
/// The callback receives the value, the state, and the configured default
/// (if any), and returns the transformed value.
pub type TransformCallback<S, V> = Box<dyn Fn(V, &S, Option<&V>) -> V + Send + Sync>;

/// Fallback, default, and transform configuration for a composable value.
///
/// All three fields are independent and optional. `ResolveOptions::new()` is
/// equivalent to passing no options at all.
///
/// The default is a literal. It is never invoked, and it is forwarded as a
/// hint to the computed value, the fallback, and the transform whether or not
/// it ends up substituted. Use [`fallback`](Self::fallback) for a default that
/// depends on state.
///
/// # Example
///
/// ```rust
/// use understory_composable::ResolveOptions;
///
/// let options = ResolveOptions::<(), i32>::new()
///     .fallback(|_, default| default.map(|d| d * 2))
///     .with_default(10)
///     .transform(|v, _, _| v.clamp(0, 15));
///
/// assert_eq!(options.default_value(), Some(&10));
/// assert!(options.has_fallback());
/// assert!(options.has_transform());
/// ```
pub struct ResolveOptions<S, V> {
    fallback: Option<FallbackCallback<S, V>>,
    transform: Option<TransformCallback<S, V>>,
    default: Option<V>,
}

impl<S, V> ResolveOptions<S, V> {
    /// Creates empty options: no fallback, no default, no transform.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: None,
            transform: None,
            default: None,
        }
    }

    /// Sets the callback invoked when the primary evaluation is absent.
    #[must_use]
    pub fn fallback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S, Option<&V>) -> Option<V> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(callback));
        self
    }

    /// Sets the callback applied to the final present value.
    #[must_use]
    pub fn transform<F>(mut self, callback: F) -> Self
    where
        F: Fn(V, &S, Option<&V>) -> V + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(callback));
        self
    }

    /// Sets the literal default value.
    #[must_use]
    pub fn with_default(mut self, value: V) -> Self {
        self.default = Some(value);
        self
    }

    /// Returns the literal default value, if any.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    /// Returns whether a fallback callback is set.
    #[must_use]
    #[inline]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Returns whether a transform callback is set.
    #[must_use]
    #[inline]
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fallback.is_none() && self.transform.is_none() && self.default.is_none()
    }

    /// Invokes the fallback if one is set.
    #[inline]
    pub fn apply_fallback(&self, state: &S) -> Option<V> {
        self.fallback
            .as_ref()
            .and_then(|callback| callback(state, self.default.as_ref()))
    }

    /// Invokes the transform if one is set, otherwise returns `value` unchanged.
    #[inline]
    pub fn apply_transform(&self, value: V, state: &S) -> V {
        if let Some(callback) = &self.transform {
            callback(value, state, self.default.as_ref())
        } else {
            value
        }
    }
}

impl<S, V> Default for ResolveOptions<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual Debug impl since callbacks aren't Debug
impl<S, V: fmt::Debug> fmt::Debug for ResolveOptions<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("default", &self.default)
            .field("has_fallback", &self.fallback.is_some())
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}
