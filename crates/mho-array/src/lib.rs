// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Header-prefixed growable array over a fallible raw allocator.
//!
//! `GrowableArray<T, A>` stores `len` and `capacity` in a small header placed
//! immediately before the first element, in the same allocation. The array
//! holds a pointer to the first element and recovers the header by stepping
//! back a fixed offset.
//!
//! # Core Guarantees
//!
//! - **Lazy allocation**: a new array owns no block. `len()` and `capacity()`
//!   report 0 without touching memory. The first insertion allocates room for
//!   one element.
//! - **Doubling growth**: an insertion that would not fit doubles the
//!   capacity (1 → 2 → 4 → 8 ...). Growth triggers only when
//!   `len + n > capacity`.
//! - **Fallible operations**: allocation failures, popping an empty array and
//!   out-of-range positions are reported as [`ArrayError`]. A failed operation
//!   leaves the array unchanged.
//! - **No stale handles**: the array is an owning value. Reallocation updates
//!   its internal pointer, and element borrows are tied to `&self`.
//!
//! # Example
//!
//! ```rust
//! use mho_array::{ArrayError, GrowableArray};
//!
//! fn example() -> Result<(), ArrayError> {
//!     let mut arr = GrowableArray::<u32>::new();
//!     arr.push(1)?;
//!     arr.push(2)?;
//!     arr.push(3)?;
//!
//!     arr.insert(1, 99)?;
//!     assert_eq!(arr.as_slice(), &[1, 99, 2, 3]);
//!
//!     assert_eq!(arr.remove(0)?, 1);
//!     assert_eq!(arr.as_slice(), &[99, 2, 3]);
//!
//!     // Popping an empty array is an error, not a silent no-op.
//!     arr.clear();
//!     assert_eq!(arr.pop(), Err(ArrayError::Empty));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Custom allocators
//!
//! Any [`mho_alloc::RawAllocator`] can back an array, including a shared
//! reference to one:
//!
//! ```rust
//! use mho_alloc::System;
//! use mho_array::GrowableArray;
//!
//! let system = System;
//! let mut a = GrowableArray::new_in(&system);
//! let mut b = GrowableArray::new_in(&system);
//! a.push(1u8).unwrap();
//! b.push(2u8).unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod error;
mod growable_array;
mod header;

#[cfg(test)]
mod tests;

pub use error::ArrayError;
pub use growable_array::GrowableArray;
