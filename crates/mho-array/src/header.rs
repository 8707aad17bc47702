// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Block layout of a header-prefixed array.
//!
//! One allocation holds the bookkeeping and the elements:
//!
//! ```text
//! base                         base + data_offset::<T>()
//! |                            |
//! [ Header { len, capacity } ][pad][ T; capacity ]
//! ```
//!
//! The array keeps a pointer to the first element slot. The header is
//! recovered by stepping back a fixed, per-`T` offset.

use core::alloc::Layout;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

use crate::error::ArrayError;

/// Bookkeeping stored immediately before the first element slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    /// Number of live elements.
    pub(crate) len: u32,
    /// Number of element slots in the block.
    pub(crate) capacity: u32,
}

/// Distance in bytes from the block base to the first element slot.
#[inline(always)]
pub(crate) const fn data_offset<T>() -> usize {
    size_of::<Header>().next_multiple_of(align_of::<T>())
}

#[inline(always)]
const fn block_align<T>() -> usize {
    if align_of::<T>() > align_of::<Header>() {
        align_of::<T>()
    } else {
        align_of::<Header>()
    }
}

/// Layout of a block holding `capacity` elements of `T` plus the header.
pub(crate) fn block_layout<T>(capacity: u32) -> Result<Layout, ArrayError> {
    let elements = size_of::<T>()
        .checked_mul(capacity as usize)
        .ok_or(ArrayError::CapacityOverflow)?;
    let size = data_offset::<T>()
        .checked_add(elements)
        .ok_or(ArrayError::CapacityOverflow)?;

    Layout::from_size_align(size, block_align::<T>()).map_err(|_| ArrayError::CapacityOverflow)
}

/// Layout of a block that was already allocated with `capacity` slots.
///
/// # Safety
///
/// `block_layout::<T>(capacity)` must have succeeded before.
#[inline]
pub(crate) unsafe fn live_block_layout<T>(capacity: u32) -> Layout {
    let size = data_offset::<T>() + size_of::<T>() * capacity as usize;

    // SAFETY: the same size and align were validated by `block_layout`
    // when the block was allocated.
    unsafe { Layout::from_size_align_unchecked(size, block_align::<T>()) }
}

/// First element slot of the block starting at `base`.
///
/// # Safety
///
/// `base` must point to a block laid out by `block_layout::<T>`.
#[inline(always)]
pub(crate) unsafe fn data_from_base<T>(base: NonNull<u8>) -> NonNull<T> {
    // SAFETY: the block is at least `data_offset::<T>()` bytes long.
    unsafe { base.add(data_offset::<T>()).cast() }
}

/// Block base recovered from the first element slot.
///
/// # Safety
///
/// `data` must have been produced by [`data_from_base`].
#[inline(always)]
pub(crate) unsafe fn base_from_data<T>(data: NonNull<T>) -> NonNull<u8> {
    // SAFETY: `data` sits exactly `data_offset::<T>()` bytes past the base.
    unsafe { data.cast::<u8>().sub(data_offset::<T>()) }
}

/// Header of the block whose first element slot is `data`.
///
/// # Safety
///
/// `data` must have been produced by [`data_from_base`] on a live block.
#[inline(always)]
pub(crate) unsafe fn header_from_data<T>(data: NonNull<T>) -> NonNull<Header> {
    // SAFETY: the block base is aligned for `Header` and holds one.
    unsafe { base_from_data(data).cast() }
}
