// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value resolution.
//!
//! This module provides [`Resolver`] and [`compose`], which turn a
//! [`Composable`] plus [`ResolveOptions`] into a function of render state.

use core::fmt;

use crate::error::UnresolvedError;
use crate::options::ResolveOptions;
use crate::value::Composable;

/// Resolves `value` against `state` through the full pipeline.
///
/// Steps, in order:
/// 1. Evaluate: literal → clone, computed → `f(state, default)`, unset → `None`
/// 2. Fallback: if absent and a fallback is set
/// 3. Default: if still absent and a default is set
/// 4. Transform: if present and a transform is set
///
/// Only `None` counts as absent. Panics raised by any callback propagate to
/// the caller unchanged.
pub fn resolve_composable<S, V: Clone>(
    value: &Composable<S, V>,
    options: &ResolveOptions<S, V>,
    state: &S,
) -> Option<V> {
    let default = options.default_value();

    let mut resolved = value.evaluate(state, default);
    if resolved.is_none() {
        resolved = options.apply_fallback(state);
    }
    if resolved.is_none() {
        resolved = default.cloned();
    }
    resolved.map(|value| options.apply_transform(value, state))
}

/// A composable value bundled with its resolution options.
///
/// A `Resolver` holds no state between calls; [`resolve`](Self::resolve) can be
/// called any number of times, with any states.
///
/// # Example
///
/// ```rust
/// use understory_composable::{Composable, ResolveOptions, Resolver};
///
/// let resolver = Resolver::with_options(
///     Composable::<(), &str>::unset(),
///     ResolveOptions::new().with_default("D").transform(|v, _, _| v.trim()),
/// );
///
/// assert_eq!(resolver.resolve(&()), Some("D"));
/// ```
pub struct Resolver<S, V> {
    value: Composable<S, V>,
    options: ResolveOptions<S, V>,
}

impl<S, V: Clone> Resolver<S, V> {
    /// Creates a resolver with no options.
    #[must_use]
    pub fn new(value: Composable<S, V>) -> Self {
        Self::with_options(value, ResolveOptions::new())
    }

    /// Creates a resolver with the given options.
    #[must_use]
    pub fn with_options(value: Composable<S, V>, options: ResolveOptions<S, V>) -> Self {
        Self { value, options }
    }

    /// Returns the composable value.
    #[must_use]
    #[inline]
    pub fn value(&self) -> &Composable<S, V> {
        &self.value
    }

    /// Returns the resolution options.
    #[must_use]
    #[inline]
    pub fn options(&self) -> &ResolveOptions<S, V> {
        &self.options
    }

    /// Resolves the value against `state`.
    ///
    /// Returns `None` only when evaluation, fallback, and default all come up
    /// empty.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the computed value, the fallback, or
    /// the transform.
    pub fn resolve(&self, state: &S) -> Option<V> {
        resolve_composable(&self.value, &self.options, state)
    }

    /// Resolves the value against `state`, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`UnresolvedError`] if nothing in the pipeline produced a value.
    pub fn require(&self, state: &S) -> Result<V, UnresolvedError> {
        self.resolve(state).ok_or_else(UnresolvedError::new)
    }

    /// Splits the resolver back into its value and options.
    #[must_use]
    pub fn into_parts(self) -> (Composable<S, V>, ResolveOptions<S, V>) {
        (self.value, self.options)
    }
}

impl<S, V: fmt::Debug> fmt::Debug for Resolver<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("value", &self.value)
            .field("options", &self.options)
            .finish()
    }
}

/// Turns a composable value into a function of render state.
///
/// Passing `ResolveOptions::new()` is the same as passing no options: only the
/// evaluation step does anything.
///
/// # Example
///
/// ```rust
/// use understory_composable::{Composable, ResolveOptions, compose};
///
/// struct Theme {
///     dark: bool,
/// }
///
/// let color = compose(
///     Composable::computed(|t: &Theme, _| Some(if t.dark { "white" } else { "black" })),
///     ResolveOptions::new(),
/// );
/// assert_eq!(color(&Theme { dark: true }), Some("white"));
///
/// let label = compose(
///     Composable::value(String::from("hello")),
///     ResolveOptions::new().transform(|v: String, _: &(), _| v.to_uppercase()),
/// );
/// assert_eq!(label(&()).as_deref(), Some("HELLO"));
/// ```
pub fn compose<S, V: Clone>(
    value: Composable<S, V>,
    options: ResolveOptions<S, V>,
) -> impl Fn(&S) -> Option<V> {
    let resolver = Resolver::with_options(value, options);
    move |state: &S| resolver.resolve(state)
}
