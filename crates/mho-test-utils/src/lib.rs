// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for mho crates.
//!
//! - [`removal_orders`]: every order in which the elements of an array can be
//!   removed, expressed as positions to pass to `remove`.
//! - [`ArrayOp`], [`array_ops`] and [`ReferenceArray`]: a proptest strategy of
//!   array operations and a `Vec`-backed model with the same growth policy.
//!
//! ## License
//!
//! GPL-3.0-only

mod ops;
mod removal;

pub use ops::{ArrayOp, GROW_LIMIT, Outcome, ReferenceArray, array_ops};
pub use removal::removal_orders;
