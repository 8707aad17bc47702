// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Guard word written immediately before every tracked block.
pub const UNDER_GUARD: u32 = 0x39D7_A5DA;

/// Guard word written immediately after every tracked block.
pub const OVER_GUARD: u32 = 0x192B_A3A2;

/// Guard words used by a [`DebugAllocator`](crate::DebugAllocator).
///
/// The defaults are [`UNDER_GUARD`] and [`OVER_GUARD`]. Pick other values
/// when the data under test is likely to contain the defaults by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// Word placed in the 4 bytes before the block.
    pub under: u32,
    /// Word placed in the 4 bytes after the block.
    pub over: u32,
}

impl GuardConfig {
    /// [`UNDER_GUARD`] and [`OVER_GUARD`].
    pub const DEFAULT: Self = Self {
        under: UNDER_GUARD,
        over: OVER_GUARD,
    };

    /// Guard words `under` and `over`.
    pub const fn new(under: u32, over: u32) -> Self {
        Self { under, over }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
