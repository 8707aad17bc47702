// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw byte allocator seam for `mho` containers.
//!
//! Containers in this workspace never call the global allocator directly.
//! They grow through a [`RawAllocator`], a three-operation contract:
//!
//! - `allocate(layout)` - a fresh block
//! - `reallocate(block_or_none, old, new)` - resize, preserving bytes
//! - `release(block, layout)` - give the block back
//!
//! Every operation that can fail returns [`AllocError`] rather than
//! aborting, so a container can surface an out-of-memory condition as an
//! ordinary error.
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//! use mho_alloc::{AllocError, RawAllocator, System};
//!
//! fn example() -> Result<(), AllocError> {
//!     let layout = Layout::array::<u32>(4).expect("small layout");
//!     let block = System.allocate(layout)?;
//!
//!     let grown = Layout::array::<u32>(8).expect("small layout");
//!     let block = unsafe { System.reallocate(Some(block), layout, grown)? };
//!
//!     unsafe { System.release(block, grown) };
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! mho-alloc = { version = "*", features = ["test-utils"] }
//! ```
//!
//! Then use `FailingAllocator` with an `AllocatorBehaviour` to drive the
//! error paths of your code.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod raw;
mod system;

#[cfg(any(test, feature = "test-utils"))]
mod failing;

#[cfg(test)]
mod tests;

pub use error::AllocError;
pub use raw::RawAllocator;
pub use system::System;

#[cfg(any(test, feature = "test-utils"))]
pub use failing::{AllocatorBehaviour, FailingAllocator};
