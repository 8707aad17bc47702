// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::panic::Location;

/// Bookkeeping for one tracked allocation.
///
/// Records are never removed: a freed block keeps its record so a later
/// release of the same address can be reported as a double free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRecord {
    /// Address handed to the caller.
    pub addr: usize,
    /// Requested size in bytes.
    pub size: usize,
    /// Requested alignment.
    pub align: usize,
    /// Where the block was allocated.
    pub location: &'static Location<'static>,
    /// The block was released.
    pub freed: bool,
    /// Where the block was released a second time, if it was.
    pub double_free: Option<&'static Location<'static>>,
    /// The guard word before the block was overwritten.
    pub underrun: bool,
    /// The guard word after the block was overwritten.
    pub overrun: bool,
}

impl AllocationRecord {
    pub(crate) fn new(
        addr: usize,
        size: usize,
        align: usize,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            addr,
            size,
            align,
            location,
            freed: false,
            double_free: None,
            underrun: false,
            overrun: false,
        }
    }

    /// Returns `true` while the block has not been released.
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.freed
    }
}
