// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::raw::RawAllocator;
use crate::system::System;

/// Test behaviour for injecting failures into a [`FailingAllocator`].
///
/// This is only available with the `test-utils` feature and allows users
/// to exercise allocation-failure paths of code built on `RawAllocator`.
///
/// The behaviour is sticky - once set, it remains active until changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocatorBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every `allocate()` call fails (including `reallocate(None, ..)`).
    FailAtAllocate,
    /// Every `reallocate()` call on an existing block fails.
    FailAtReallocate,
    /// The first `n` successful requests go through, every later one fails.
    FailAfter(usize),
}

/// Wraps a [`RawAllocator`] and fails requests on demand.
///
/// # Example
///
/// ```rust
/// // test-utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use core::alloc::Layout;
///     use mho_alloc::{AllocatorBehaviour, FailingAllocator, RawAllocator};
///
///     #[test]
///     fn test_allocate_fails() {
///         let alloc = FailingAllocator::new();
///         alloc.change_behaviour(AllocatorBehaviour::FailAtAllocate);
///
///         assert!(alloc.allocate(Layout::new::<u64>()).is_err());
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct FailingAllocator<A = System>
where
    A: RawAllocator,
{
    inner: A,
    behaviour: Cell<AllocatorBehaviour>,
    succeeded: Cell<usize>,
    failed: Cell<usize>,
}

impl FailingAllocator<System> {
    /// Creates a `FailingAllocator` over [`System`] with no injected failures.
    pub fn new() -> Self {
        Self::wrap(System)
    }
}

impl<A> FailingAllocator<A>
where
    A: RawAllocator,
{
    /// Wraps `inner` with no injected failures.
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            behaviour: Cell::new(AllocatorBehaviour::None),
            succeeded: Cell::new(0),
            failed: Cell::new(0),
        }
    }

    /// Changes the failure behaviour.
    ///
    /// `FailAfter(n)` counts from the moment it is set.
    pub fn change_behaviour(&self, behaviour: AllocatorBehaviour) {
        self.behaviour.set(behaviour);
        self.succeeded.set(0);
    }

    /// Returns the current behaviour.
    pub fn behaviour(&self) -> AllocatorBehaviour {
        self.behaviour.get()
    }

    /// Number of requests served since the behaviour was last changed.
    pub fn succeeded(&self) -> usize {
        self.succeeded.get()
    }

    /// Number of requests refused so far.
    pub fn failed(&self) -> usize {
        self.failed.get()
    }

    /// Returns the wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn should_fail(&self, is_realloc: bool) -> bool {
        match self.behaviour.get() {
            AllocatorBehaviour::None => false,
            AllocatorBehaviour::FailAtAllocate => !is_realloc,
            AllocatorBehaviour::FailAtReallocate => is_realloc,
            AllocatorBehaviour::FailAfter(n) => self.succeeded.get() >= n,
        }
    }

    fn track<T>(&self, result: Result<T, AllocError>) -> Result<T, AllocError> {
        match result {
            Ok(_) => self.succeeded.set(self.succeeded.get() + 1),
            Err(_) => self.failed.set(self.failed.get() + 1),
        }

        result
    }
}

unsafe impl<A> RawAllocator for FailingAllocator<A>
where
    A: RawAllocator,
{
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if self.should_fail(false) {
            return self.track(Err(AllocError::new(layout)));
        }

        self.track(self.inner.allocate(layout))
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        if self.should_fail(block.is_some()) {
            return self.track(Err(AllocError::new(new)));
        }

        // SAFETY: forwarded verbatim, the caller upholds the contract.
        self.track(unsafe { self.inner.reallocate(block, old, new) })
    }

    #[track_caller]
    unsafe fn release(&self, block: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded verbatim, the caller upholds the contract.
        unsafe { self.inner.release(block, layout) }
    }
}
