// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for mho-alloc.

use core::alloc::Layout;

use thiserror::Error;

/// The allocator could not satisfy a request.
///
/// Carries the layout that was requested so callers can tell an
/// out-of-memory condition apart from an empty but valid container.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("allocation failed for {layout:?}")]
pub struct AllocError {
    /// The layout that could not be allocated.
    pub layout: Layout,
}

impl AllocError {
    /// Creates an `AllocError` for the given layout.
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }
}
