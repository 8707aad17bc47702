// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::panic::Location;

/// Identifier of a handle registered with
/// [`DebugAllocator::open_handle`](crate::DebugAllocator::open_handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u64);

impl HandleId {
    /// Raw identifier, unique per allocator.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Bookkeeping for one tracked handle (a file, a socket, anything that
/// must be closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRecord {
    /// Identifier returned when the handle was opened.
    pub id: HandleId,
    /// Where the handle was opened.
    pub location: &'static Location<'static>,
    /// Where the handle was closed, once it is.
    pub closed_at: Option<&'static Location<'static>>,
}

impl HandleRecord {
    pub(crate) fn new(id: HandleId, location: &'static Location<'static>) -> Self {
        Self {
            id,
            location,
            closed_at: None,
        }
    }

    /// Returns `true` while the handle has not been closed.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}
