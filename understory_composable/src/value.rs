// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composable property values.
//!
//! This module provides [`Composable`], a property value that is either a
//! literal or a function of render state.

use alloc::boxed::Box;
use core::fmt;

/// Callback computing a value from render state.
///
/// The callback receives the state and the configured default (if any) and
/// returns the computed value, or `None` when it produces nothing.
pub type ComputeCallback<S, V> = Box<dyn Fn(&S, Option<&V>) -> Option<V> + Send + Sync>;

/// A property value that may depend on render state.
///
/// Absence is modelled explicitly: [`Composable::Unset`] and a computed `None`
/// are absent, while any [`Composable::Value`] is present. A "null-like" value
/// type such as `Option<T>` holding `None` is still a present value.
///
/// # Example
///
/// ```rust
/// use understory_composable::Composable;
///
/// struct RenderState {
///     dark: bool,
/// }
///
/// let literal: Composable<RenderState, &str> = Composable::value("red");
/// let themed = Composable::computed(|s: &RenderState, _| {
///     Some(if s.dark { "white" } else { "black" })
/// });
///
/// let state = RenderState { dark: true };
/// assert_eq!(literal.evaluate(&state, None), Some("red"));
/// assert_eq!(themed.evaluate(&state, None), Some("white"));
/// ```
pub enum Composable<S, V> {
    /// No value was provided.
    Unset,
    /// A literal value, independent of state.
    Value(V),
    /// A value computed from render state.
    Computed(ComputeCallback<S, V>),
}

impl<S, V> Composable<S, V> {
    /// Creates a literal composable.
    #[must_use]
    #[inline]
    pub const fn value(value: V) -> Self {
        Self::Value(value)
    }

    /// Creates an unset composable.
    #[must_use]
    #[inline]
    pub const fn unset() -> Self {
        Self::Unset
    }

    /// Creates a composable computed from render state.
    #[must_use]
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn(&S, Option<&V>) -> Option<V> + Send + Sync + 'static,
    {
        Self::Computed(Box::new(compute))
    }

    /// Returns `true` if this is [`Composable::Unset`].
    #[must_use]
    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns `true` if this value is computed from state.
    #[must_use]
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Returns the literal value, if this is [`Composable::Value`].
    #[must_use]
    #[inline]
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Evaluates this composable against `state`.
    ///
    /// Literals are cloned, computed values are invoked with `state` and
    /// `default`, and [`Composable::Unset`] evaluates to `None`.
    pub fn evaluate(&self, state: &S, default: Option<&V>) -> Option<V>
    where
        V: Clone,
    {
        match self {
            Self::Unset => None,
            Self::Value(value) => Some(value.clone()),
            Self::Computed(compute) => compute(state, default),
        }
    }
}

#[expect(
    clippy::derivable_impls,
    reason = "derive(Default) would require S: Default and V: Default"
)]
impl<S, V> Default for Composable<S, V> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<S, V> From<V> for Composable<S, V> {
    fn from(value: V) -> Self {
        Self::Value(value)
    }
}

// Manual Debug impl since callbacks aren't Debug
impl<S, V: fmt::Debug> fmt::Debug for Composable<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Computed(_) => f
                .debug_tuple("Computed")
                .field(&core::any::type_name::<V>())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn literal_evaluates_to_itself() {
        let value: Composable<(), i32> = Composable::value(42);
        assert_eq!(value.evaluate(&(), None), Some(42));
        assert_eq!(value.evaluate(&(), Some(&7)), Some(42));
        assert_eq!(value.as_value(), Some(&42));
    }

    #[test]
    fn unset_evaluates_to_none() {
        let value: Composable<(), i32> = Composable::default();
        assert!(value.is_unset());
        assert_eq!(value.evaluate(&(), Some(&7)), None);
    }

    #[test]
    fn default_needs_no_default_bounds() {
        struct Theme;
        #[derive(Clone)]
        struct Brush;

        let value = Composable::<Theme, Brush>::default();
        assert!(value.is_unset());
        assert!(value.evaluate(&Theme, None).is_none());
    }

    #[test]
    fn computed_receives_state_and_default() {
        let value: Composable<i32, i32> = Composable::computed(|s: &i32, default: Option<&i32>| {
            Some(*s + default.copied().unwrap_or(0))
        });
        assert!(value.is_computed());
        assert_eq!(value.evaluate(&1, None), Some(1));
        assert_eq!(value.evaluate(&1, Some(&10)), Some(11));
    }

    #[test]
    fn present_none_is_a_value() {
        let value: Composable<(), Option<i32>> = Composable::value(None);
        assert_eq!(value.evaluate(&(), None), Some(None));
    }

    #[test]
    fn from_literal() {
        let value: Composable<(), String> = String::from("red").into();
        assert_eq!(value.as_value().map(String::as_str), Some("red"));
    }

    #[test]
    fn debug_output() {
        let literal: Composable<(), i32> = Composable::value(3);
        assert_eq!(format!("{:?}", literal), "Value(3)");

        let unset: Composable<(), i32> = Composable::unset();
        assert_eq!(format!("{:?}", unset), "Unset");

        let computed: Composable<(), i32> = Composable::computed(|_, _| None);
        assert!(format!("{:?}", computed).starts_with("Computed"));
    }
}
