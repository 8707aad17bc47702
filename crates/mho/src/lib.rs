// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Header-prefixed growable arrays with pluggable, instrumentable allocators.</em></p>
//!
//! ---
//!
//! `mho` is a small collection toolkit: a growable array that keeps its
//! length and capacity in front of its elements, a raw allocator seam every
//! growth goes through, and a debug allocator that catches leaks, double
//! frees and buffer over/underruns.
//!
//! # Features
//!
//! - **One allocation per array**: header and elements share a block.
//! - **Lazy and doubling**: nothing is allocated until the first insertion,
//!   then capacity goes 1, 2, 4, 8...
//! - **Fallible everywhere**: allocation failures, popping an empty array
//!   and out-of-range positions are `Result`s, never aborts.
//! - **Pluggable allocator**: any [`alloc::RawAllocator`] backs an array.
//! - **Memory debugging**: [`dbg::DebugAllocator`] records every block with
//!   its source location and reports what went wrong.
//! - **`no_std` compatible**: needs only `alloc`.
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! mho = "0.1"
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use mho::array::{ArrayError, GrowableArray};
//!
//! fn main() -> Result<(), ArrayError> {
//!     let mut arr = GrowableArray::<i32>::new();
//!     for v in [1, 2, 3] {
//!         arr.push(v)?;
//!     }
//!     assert_eq!(arr.capacity(), 4);
//!
//!     arr.insert(1, 99)?;
//!     assert_eq!(arr.as_slice(), &[1, 99, 2, 3]);
//!
//!     assert_eq!(arr.pop()?, 3);
//!     Ok(())
//! }
//! ```
//!
//! # Finding memory bugs
//!
//! ```rust
//! use mho::array::GrowableArray;
//! use mho::dbg::DebugAllocator;
//!
//! let dbg = DebugAllocator::new();
//! {
//!     let mut names = GrowableArray::new_in(&dbg);
//!     names.push("ada").unwrap();
//!     names.push("grace").unwrap();
//! }
//!
//! let report = dbg.report();
//! assert!(report.is_clean());
//! ```
//!
//! # Testing
//!
//! With the `test-utils` feature, [`support::test_utils`] exposes a
//! `FailingAllocator` that refuses allocations on demand, so the error paths
//! of code built on `GrowableArray` can be exercised.
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use mho_alloc as alloc;
pub use mho_array as array;
pub use mho_dbg as dbg;
