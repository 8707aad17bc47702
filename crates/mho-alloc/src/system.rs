// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `System` - the global Rust allocator behind the `RawAllocator` seam.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::raw::RawAllocator;

/// Forwards to the global allocator (`alloc::alloc`).
///
/// A null return from the global allocator becomes an [`AllocError`].
/// Zero-sized layouts are served with a dangling, well-aligned pointer and
/// never reach the global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct System;

#[inline]
fn dangling(layout: Layout) -> NonNull<u8> {
    // `align` is a non-zero power of two, so this address is non-null and aligned.
    NonNull::<u8>::dangling().with_addr(
        core::num::NonZeroUsize::new(layout.align()).unwrap_or(core::num::NonZeroUsize::MIN),
    )
}

unsafe impl RawAllocator for System {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout));
        }

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(AllocError::new(layout))
    }

    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        debug_assert_eq!(old.align(), new.align());

        let Some(block) = block else {
            return self.allocate(new);
        };

        if old.size() == 0 {
            return self.allocate(new);
        }

        if new.size() == 0 {
            // SAFETY: caller guarantees `block` was allocated here with `old`.
            unsafe { self.release(block, old) };
            return Ok(dangling(new));
        }

        // SAFETY: caller guarantees `block` was allocated here with `old`,
        // and `new.size()` is non-zero.
        let ptr = unsafe { alloc::alloc::realloc(block.as_ptr(), old, new.size()) };
        NonNull::new(ptr).ok_or(AllocError::new(new))
    }

    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: caller guarantees `block` was allocated here with `layout`.
        unsafe { alloc::alloc::dealloc(block.as_ptr(), layout) }
    }
}
