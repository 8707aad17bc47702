// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// A byte-level allocator that containers grow through.
///
/// This is the only collaborator a [`GrowableArray`] needs: allocate a block,
/// resize it while keeping its bytes, and release it. Every method reports
/// failure as an [`AllocError`] instead of aborting.
///
/// # Safety
///
/// Implementors must guarantee that:
///
/// - A block returned by [`allocate`](Self::allocate) or
///   [`reallocate`](Self::reallocate) is valid for reads and writes of
///   `layout.size()` bytes and aligned to `layout.align()`.
/// - [`reallocate`](Self::reallocate) preserves the first
///   `min(old.size(), new.size())` bytes, and leaves the old block untouched
///   when it fails.
/// - A block stays valid until it is passed to [`release`](Self::release) or
///   successfully reallocated.
///
/// [`GrowableArray`]: https://docs.rs/mho-array
pub unsafe trait RawAllocator {
    /// Allocates a block for `layout`.
    ///
    /// `layout.size()` is never zero when called from `mho` containers.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Resizes `block` from `old` to `new`.
    ///
    /// A `None` block behaves as [`allocate(new)`](Self::allocate) and `old`
    /// is ignored.
    ///
    /// # Safety
    ///
    /// When `block` is `Some`, it must have been returned by this allocator
    /// with layout `old`, must not have been released, and `new.align()`
    /// must equal `old.align()`.
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Result<NonNull<u8>, AllocError>;

    /// Releases `block`.
    ///
    /// # Safety
    ///
    /// `block` must have been returned by this allocator with `layout`.
    /// Releasing the same block twice is undefined behaviour unless the
    /// implementor documents otherwise.
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout);
}

unsafe impl<A> RawAllocator for &A
where
    A: RawAllocator + ?Sized,
{
    #[inline]
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    #[track_caller]
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: forwarded verbatim, the caller upholds the contract.
        unsafe { (**self).reallocate(block, old, new) }
    }

    #[inline]
    #[track_caller]
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded verbatim, the caller upholds the contract.
        unsafe { (**self).release(block, layout) }
    }
}
