// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::RefCell;
use core::panic::Location;
use core::ptr::NonNull;

use alloc::vec::Vec;
use mho_alloc::{AllocError, RawAllocator, System};
use mho_array::GrowableArray;

use crate::config::GuardConfig;
use crate::guard::{Framing, inspect_guards, write_guards};
use crate::handle::{HandleId, HandleRecord};
use crate::record::AllocationRecord;
use crate::report::{Finding, Report};

struct State {
    records: GrowableArray<AllocationRecord>,
    allocations: usize,
    frees: usize,
    total_bytes: usize,
    foreign_releases: usize,
    handles: GrowableArray<HandleRecord>,
    next_handle: u64,
    handles_opened: usize,
    handles_closed: usize,
}

impl State {
    const fn new() -> Self {
        Self {
            records: GrowableArray::new(),
            allocations: 0,
            frees: 0,
            total_bytes: 0,
            foreign_releases: 0,
            handles: GrowableArray::new(),
            next_handle: 0,
            handles_opened: 0,
            handles_closed: 0,
        }
    }

    fn live_index(&self, addr: usize) -> Option<usize> {
        self.records
            .iter()
            .rposition(|r| r.addr == addr && r.is_live())
    }

    fn freed_index(&self, addr: usize) -> Option<usize> {
        self.records
            .iter()
            .rposition(|r| r.addr == addr && !r.is_live())
    }
}

/// A [`RawAllocator`] that tracks every block it hands out.
///
/// Each block is framed by two guard words (see [`GuardConfig`]) inside a
/// single allocation from the inner allocator. The allocator remembers
/// where every block was requested and reports:
///
/// - blocks never released (leaks)
/// - blocks released twice (the second release is ignored)
/// - guard words overwritten before or after a block
/// - releases of pointers it never handed out (ignored and counted)
///
/// It can also track handles that must be closed (see
/// [`open_handle`](Self::open_handle), and `open_file` with the `std`
/// feature) and reports the ones left open.
///
/// State lives in a `RefCell`, so a `DebugAllocator` is not `Sync`. Share
/// it between containers through `&DebugAllocator`.
///
/// Records are kept for the allocator's whole lifetime so double frees can
/// be recognised, and every release scans them linearly. This is meant for
/// test-scale workloads, not long-running programs.
///
/// # Example
///
/// ```rust
/// use mho_array::GrowableArray;
/// use mho_dbg::DebugAllocator;
///
/// let dbg = DebugAllocator::new();
/// {
///     let mut arr = GrowableArray::new_in(&dbg);
///     arr.push(1u32).unwrap();
///     arr.push(2).unwrap();
/// }
///
/// let report = dbg.report();
/// assert!(report.is_clean());
/// assert_eq!(report.allocations, report.frees);
/// ```
pub struct DebugAllocator<A = System>
where
    A: RawAllocator,
{
    inner: A,
    config: GuardConfig,
    state: RefCell<State>,
}

impl DebugAllocator<System> {
    /// Tracks blocks from [`System`] with the default guard words.
    pub const fn new() -> Self {
        Self::with_config(System, GuardConfig::DEFAULT)
    }
}

impl Default for DebugAllocator<System> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DebugAllocator<A>
where
    A: RawAllocator,
{
    /// Tracks blocks from `inner` with the default guard words.
    pub const fn wrap(inner: A) -> Self {
        Self::with_config(inner, GuardConfig::DEFAULT)
    }

    /// Tracks blocks from `inner` with custom guard words.
    pub const fn with_config(inner: A, config: GuardConfig) -> Self {
        Self {
            inner,
            config,
            state: RefCell::new(State::new()),
        }
    }

    /// Guard words in use.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Number of blocks currently allocated and not yet released.
    pub fn live_blocks(&self) -> usize {
        self.state
            .borrow()
            .records
            .iter()
            .filter(|r| r.is_live())
            .count()
    }

    /// Snapshot of every allocation record, in allocation order.
    pub fn records(&self) -> Vec<AllocationRecord> {
        self.state.borrow().records.to_vec()
    }

    /// Snapshot of every handle record, in open order.
    pub fn handles(&self) -> Vec<HandleRecord> {
        self.state.borrow().handles.to_vec()
    }

    /// Number of handles opened and not yet closed.
    pub fn open_handles(&self) -> usize {
        self.state
            .borrow()
            .handles
            .iter()
            .filter(|h| h.is_open())
            .count()
    }

    /// Records that a handle was opened at the caller's location.
    ///
    /// Pair every call with [`close_handle`](Self::close_handle); handles
    /// still open are reported as [`Finding::UnclosedHandle`].
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the record cannot be stored.
    #[track_caller]
    pub fn open_handle(&self) -> Result<HandleId, AllocError> {
        self.open_handle_at(Location::caller())
    }

    /// Records that handle `id` was closed at the caller's location.
    ///
    /// Closing a handle twice, or one this allocator never opened, is
    /// logged and otherwise ignored.
    #[track_caller]
    pub fn close_handle(&self, id: HandleId) {
        self.close_handle_at(id, Location::caller());
    }

    pub(crate) fn open_handle_at(
        &self,
        location: &'static Location<'static>,
    ) -> Result<HandleId, AllocError> {
        let mut state = self.state.borrow_mut();
        let id = HandleId(state.next_handle);

        state
            .handles
            .push(HandleRecord::new(id, location))
            .map_err(|_| AllocError::new(Layout::new::<HandleRecord>()))?;
        state.next_handle += 1;
        state.handles_opened += 1;

        tracing::trace!(id = id.get(), location = %location, "tracked handle open");

        Ok(id)
    }

    pub(crate) fn close_handle_at(&self, id: HandleId, location: &'static Location<'static>) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        let Some(record) = state.handles.iter_mut().find(|h| h.id == id) else {
            tracing::warn!(id = id.get(), closed_at = %location, "close of untracked handle ignored");
            return;
        };

        if let Some(first) = record.closed_at {
            tracing::warn!(
                id = id.get(),
                opened_at = %record.location,
                first_closed_at = %first,
                closed_at = %location,
                "handle closed twice"
            );
            return;
        }

        record.closed_at = Some(location);
        state.handles_closed += 1;

        tracing::trace!(id = id.get(), location = %location, "tracked handle close");
    }

    /// Scans every live block for damaged guard words.
    ///
    /// Returns how many live blocks are corrupted. Damage is also recorded
    /// so it shows up in the next [`report`](Self::report).
    pub fn check(&self) -> usize {
        let mut state = self.state.borrow_mut();
        let mut corrupted = 0;

        for record in state.records.iter_mut().filter(|r| r.is_live()) {
            let ptr = core::ptr::with_exposed_provenance_mut::<u8>(record.addr);
            let Some(user) = NonNull::new(ptr) else {
                continue;
            };
            // SAFETY: live records describe blocks framed by this allocator.
            let damage = unsafe { inspect_guards(user, record.size, &self.config) };

            if damage.any() {
                corrupted += 1;
                if (damage.underrun && !record.underrun) || (damage.overrun && !record.overrun) {
                    tracing::warn!(
                        addr = record.addr,
                        size = record.size,
                        allocated_at = %record.location,
                        underrun = damage.underrun,
                        overrun = damage.overrun,
                        "guard word damaged on live block"
                    );
                }
                record.underrun |= damage.underrun;
                record.overrun |= damage.overrun;
            }
        }

        corrupted
    }

    /// Checks live blocks and returns a snapshot of everything seen so far.
    pub fn report(&self) -> Report {
        self.check();

        let state = self.state.borrow();
        let mut findings = Vec::new();
        for record in state.records.iter() {
            findings.extend(Finding::from_record(record));
        }
        findings.extend(
            state
                .handles
                .iter()
                .filter(|h| h.is_open())
                .map(|h| Finding::UnclosedHandle {
                    id: h.id,
                    location: h.location,
                }),
        );

        Report {
            allocations: state.allocations,
            frees: state.frees,
            total_bytes: state.total_bytes,
            foreign_releases: state.foreign_releases,
            handles_opened: state.handles_opened,
            handles_closed: state.handles_closed,
            findings,
        }
    }

    fn allocate_at(
        &self,
        layout: Layout,
        location: &'static Location<'static>,
    ) -> Result<NonNull<u8>, AllocError> {
        let framing = Framing::for_user(layout)?;
        let outer = self
            .inner
            .allocate(framing.outer)
            .map_err(|_| AllocError::new(layout))?;

        // SAFETY: `outer` spans `framing.outer.size()` bytes.
        let user = unsafe { framing.user_from_outer(outer) };
        // SAFETY: `user` is framed for `layout.size()` bytes.
        unsafe { write_guards(user, layout.size(), &self.config) };

        let record = AllocationRecord::new(
            user.as_ptr().expose_provenance(),
            layout.size(),
            layout.align(),
            location,
        );
        let mut state = self.state.borrow_mut();
        if state.records.push(record).is_err() {
            drop(state);
            // SAFETY: `outer` was just allocated from `inner` with this layout.
            unsafe { self.inner.release(outer, framing.outer) };
            return Err(AllocError::new(layout));
        }
        state.allocations += 1;
        state.total_bytes += layout.size();

        tracing::trace!(
            addr = record.addr,
            size = record.size,
            location = %location,
            "tracked allocate"
        );

        Ok(user)
    }

    fn release_at(&self, block: NonNull<u8>, location: &'static Location<'static>) {
        let addr = block.addr().get();
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        if let Some(index) = state.live_index(addr) {
            let record = &mut state.records[index];
            // SAFETY: live records describe blocks framed by this allocator.
            let damage = unsafe { inspect_guards(block, record.size, &self.config) };
            if damage.any() {
                tracing::warn!(
                    addr,
                    size = record.size,
                    allocated_at = %record.location,
                    released_at = %location,
                    underrun = damage.underrun,
                    overrun = damage.overrun,
                    "guard word damaged on release"
                );
            }
            record.underrun |= damage.underrun;
            record.overrun |= damage.overrun;
            record.freed = true;
            let (size, align) = (record.size, record.align);
            state.frees += 1;
            drop(guard);

            tracing::trace!(addr, size, location = %location, "tracked release");

            // SAFETY: size and align come from a layout that framed successfully.
            let user = unsafe { Layout::from_size_align_unchecked(size, align) };
            if let Ok(framing) = Framing::for_user(user) {
                // SAFETY: `block` was framed from an `inner` allocation of `framing.outer`.
                unsafe {
                    self.inner
                        .release(framing.outer_from_user(block), framing.outer)
                };
            }
            return;
        }

        if let Some(index) = state.freed_index(addr) {
            let record = &mut state.records[index];
            if record.double_free.is_none() {
                record.double_free = Some(location);
            }
            tracing::warn!(
                addr,
                size = record.size,
                allocated_at = %record.location,
                released_at = %location,
                "double free ignored"
            );
            return;
        }

        state.foreign_releases += 1;
        tracing::warn!(addr, released_at = %location, "release of untracked block ignored");
    }
}

// SAFETY: blocks come from `inner` and keep the requested alignment because
// the guard prefix is rounded up to it. Reallocation copies the preserved
// prefix before releasing the old block.
unsafe impl<A> RawAllocator for DebugAllocator<A>
where
    A: RawAllocator,
{
    #[track_caller]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.allocate_at(layout, Location::caller())
    }

    #[track_caller]
    unsafe fn reallocate(
        &self,
        block: Option<NonNull<u8>>,
        old: Layout,
        new: Layout,
    ) -> Result<NonNull<u8>, AllocError> {
        let location = Location::caller();

        let Some(block) = block else {
            return self.allocate_at(new, location);
        };

        let Some(old_size) = ({
            let state = self.state.borrow();
            state
                .live_index(block.addr().get())
                .map(|index| state.records[index].size)
        }) else {
            tracing::warn!(
                addr = block.addr().get(),
                released_at = %location,
                "reallocate of untracked or released block refused"
            );
            return Err(AllocError::new(new));
        };

        let fresh = self.allocate_at(new, location)?;
        // SAFETY: both blocks are live and at least `min` bytes long.
        unsafe {
            core::ptr::copy_nonoverlapping(
                block.as_ptr(),
                fresh.as_ptr(),
                old_size.min(old.size()).min(new.size()),
            )
        };
        self.release_at(block, location);

        Ok(fresh)
    }

    #[track_caller]
    unsafe fn release(&self, block: NonNull<u8>, _layout: Layout) {
        self.release_at(block, Location::caller());
    }
}

impl<A> core::fmt::Debug for DebugAllocator<A>
where
    A: RawAllocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DebugAllocator")
            .field("allocations", &state.allocations)
            .field("frees", &state.frees)
            .field("total_bytes", &state.total_bytes)
            .field("foreign_releases", &state.foreign_releases)
            .field("handles_opened", &state.handles_opened)
            .field("handles_closed", &state.handles_closed)
            .finish_non_exhaustive()
    }
}
