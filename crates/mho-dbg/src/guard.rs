// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Guard-word framing around tracked blocks.
//!
//! ```text
//! outer                      user
//! |                          |
//! [ pad ][ under: u32 ][ user bytes ... ][ over: u32 ]
//! |<------ prefix ---->|
//! ```
//!
//! `prefix` is the guard size rounded up to the block alignment, so the
//! user pointer keeps the alignment the caller asked for.

use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::NonNull;

use mho_alloc::AllocError;

use crate::config::GuardConfig;

pub(crate) const GUARD_SIZE: usize = size_of::<u32>();

/// Outer layout and user offset for a tracked block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Framing {
    pub(crate) prefix: usize,
    pub(crate) outer: Layout,
}

impl Framing {
    pub(crate) fn for_user(user: Layout) -> Result<Self, AllocError> {
        let align = user.align().max(GUARD_SIZE);
        let prefix = GUARD_SIZE.next_multiple_of(align);
        let size = prefix
            .checked_add(user.size())
            .and_then(|size| size.checked_add(GUARD_SIZE))
            .ok_or(AllocError::new(user))?;
        let outer = Layout::from_size_align(size, align).map_err(|_| AllocError::new(user))?;

        Ok(Self { prefix, outer })
    }

    /// # Safety
    ///
    /// `outer` must be a block of at least `self.outer.size()` bytes.
    #[inline]
    pub(crate) unsafe fn user_from_outer(&self, outer: NonNull<u8>) -> NonNull<u8> {
        // SAFETY: prefix < outer size.
        unsafe { outer.add(self.prefix) }
    }

    /// # Safety
    ///
    /// `user` must come from [`Framing::user_from_outer`] with the same framing.
    #[inline]
    pub(crate) unsafe fn outer_from_user(&self, user: NonNull<u8>) -> NonNull<u8> {
        // SAFETY: `user` sits `prefix` bytes past the outer base.
        unsafe { user.sub(self.prefix) }
    }
}

/// Which guards no longer hold their expected word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GuardDamage {
    pub(crate) underrun: bool,
    pub(crate) overrun: bool,
}

impl GuardDamage {
    pub(crate) fn any(self) -> bool {
        self.underrun || self.overrun
    }
}

/// Writes both guard words around a `size`-byte user block.
///
/// # Safety
///
/// `user` must be framed by a live block of `Framing::for_user` with `size`.
pub(crate) unsafe fn write_guards(user: NonNull<u8>, size: usize, config: &GuardConfig) {
    // SAFETY: the framing reserves GUARD_SIZE bytes on both sides.
    unsafe {
        user.sub(GUARD_SIZE)
            .cast::<u32>()
            .write_unaligned(config.under);
        user.add(size).cast::<u32>().write_unaligned(config.over);
    }
}

/// Compares both guard words against `config`.
///
/// # Safety
///
/// Same as [`write_guards`].
pub(crate) unsafe fn inspect_guards(
    user: NonNull<u8>,
    size: usize,
    config: &GuardConfig,
) -> GuardDamage {
    // SAFETY: the framing reserves GUARD_SIZE bytes on both sides.
    let (under, over) = unsafe {
        (
            user.sub(GUARD_SIZE).cast::<u32>().read_unaligned(),
            user.add(size).cast::<u32>().read_unaligned(),
        )
    };

    GuardDamage {
        underrun: under != config.under,
        overrun: over != config.over,
    }
}
