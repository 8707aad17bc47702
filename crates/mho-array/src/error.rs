// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for mho-array.

use mho_alloc::AllocError;
use thiserror::Error;

/// Error type for `GrowableArray` operations.
///
/// Every failing operation leaves the array exactly as it was: same length,
/// same capacity, same elements.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ArrayError {
    /// The allocator could not provide a block for the requested capacity.
    #[error("allocation failed while resizing to capacity {requested_capacity}")]
    AllocationFailure {
        /// Capacity (in elements) the array tried to reach.
        requested_capacity: u32,
        /// The allocator's error.
        #[source]
        source: AllocError,
    },

    /// Length or capacity arithmetic would overflow.
    ///
    /// Raised when a capacity would exceed `u32::MAX` elements or the block
    /// would exceed `isize::MAX` bytes.
    #[error("capacity overflow: array cannot hold the requested number of elements")]
    CapacityOverflow,

    /// Attempted to pop from an empty array.
    #[error("array is empty")]
    Empty,

    /// A position was outside the range accepted by the operation.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending position.
        index: u32,
        /// The array length at the time of the call.
        len: u32,
    },
}
