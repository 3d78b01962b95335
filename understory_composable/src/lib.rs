// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Composable: property values that may depend on render state.
//!
//! A component prop can be declared either as a plain value or as a function
//! of some render state (pressed, focused, theme, ...). This crate provides a
//! uniform pipeline that turns such a prop into a concrete value.
//!
//! ## Core Concepts
//!
//! ### Composable Values
//!
//! [`Composable`] is a literal ([`Composable::Value`]), a function of state
//! ([`Composable::Computed`]), or nothing at all ([`Composable::Unset`]).
//! Absence is always `None`; a present "null-like" value (for example an
//! `Option<T>` holding `None`) is still a value.
//!
//! ### Resolution Pipeline
//!
//! [`Resolver`] (or the [`compose`] function) applies four steps, in order:
//!
//! **Evaluate → Fallback → Default → Transform**
//!
//! - **Evaluate** - clone the literal, or call the function with the state
//!   and the configured default
//! - **Fallback** - if absent, call [`ResolveOptions::fallback`]
//! - **Default** - if still absent, use the literal default
//! - **Transform** - if present, call [`ResolveOptions::transform`]
//!
//! The default is forwarded to every callback as a hint, whether or not it is
//! substituted. Panics raised by callbacks propagate to the caller unchanged.
//!
//! ### Records and Whitelists
//!
//! - [`ComposeSet`] resolves a whole record of composable values, with either
//!   one shared state or a state per key.
//! - [`compose_whitelisted`] resolves a named subset of a prop record and
//!   passes the rest through; [`WhitelistMemo`] caches the result against a
//!   change-detection key using [`Memo`].
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_composable::{Composable, ResolveOptions, Resolver};
//!
//! struct ButtonState {
//!     hovered: bool,
//! }
//!
//! let background = Resolver::with_options(
//!     Composable::computed(|s: &ButtonState, _| s.hovered.then_some(0x3355FF_u32)),
//!     ResolveOptions::new()
//!         .with_default(0x2244EE)
//!         .transform(|color, _, _| color | 0xFF00_0000),
//! );
//!
//! assert_eq!(background.resolve(&ButtonState { hovered: true }), Some(0xFF33_55FF));
//! assert_eq!(background.resolve(&ButtonState { hovered: false }), Some(0xFF22_44EE));
//! ```
//!
//! ## Features
//!
//! - `log` - emit `log::trace!` records from the batch, whitelist, and memo
//!   helpers. The resolver itself never logs.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

/// Trace-level logging, compiled out unless the `log` feature is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    }};
}
pub(crate) use trace;

mod error;
mod memo;
mod options;
mod resolve;
mod set;
mod value;
mod whitelist;

pub use error::UnresolvedError;
pub use memo::Memo;
pub use options::{FallbackCallback, ResolveOptions, TransformCallback};
pub use resolve::{Resolver, compose, resolve_composable};
pub use set::ComposeSet;
pub use value::{ComputeCallback, Composable};
pub use whitelist::{PropRecords, Whitelist, WhitelistMemo, compose_whitelisted};
