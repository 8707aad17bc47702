// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};

use mho_alloc::{RawAllocator, System};

use crate::error::ArrayError;
use crate::header::{self, Header};

/// A growable array whose length and capacity live in front of its elements.
///
/// The array starts **uninitialized**: no block is allocated and `len()` /
/// `capacity()` report 0. The first insertion allocates a block with room
/// for one element; when an insertion would not fit, capacity doubles.
///
/// All mutating operations update the array's own pointer, so growing never
/// leaves the caller with a stale handle.
///
/// # Thread safety
///
/// There is no internal locking. Mutation requires `&mut self`, so sharing
/// an array across threads needs the caller's own synchronization.
///
/// # Example
///
/// ```rust
/// use mho_array::{ArrayError, GrowableArray};
///
/// fn example() -> Result<(), ArrayError> {
///     let mut arr = GrowableArray::new();
///     assert_eq!(arr.capacity(), 0);
///
///     arr.push(1u32)?;
///     arr.push(2)?;
///     arr.push(3)?;
///
///     assert_eq!(arr.as_slice(), &[1, 2, 3]);
///     assert_eq!(arr.capacity(), 4);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct GrowableArray<T, A = System>
where
    A: RawAllocator,
{
    data: Option<NonNull<T>>,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: the array owns its elements; moving it moves them.
unsafe impl<T: Send, A: RawAllocator + Send> Send for GrowableArray<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for GrowableArray<T, A> {}

impl<T> GrowableArray<T, System> {
    /// Creates an uninitialized array backed by [`System`].
    pub const fn new() -> Self {
        Self::new_in(System)
    }

    /// Creates an array backed by [`System`] with room for `capacity` elements.
    ///
    /// A capacity of 0 leaves the array uninitialized.
    pub fn with_capacity(capacity: u32) -> Result<Self, ArrayError> {
        Self::with_capacity_in(capacity, System)
    }
}

impl<T, A> GrowableArray<T, A>
where
    A: RawAllocator,
{
    /// Creates an uninitialized array backed by `alloc`.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            data: None,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Creates an array backed by `alloc` with room for `capacity` elements.
    #[track_caller]
    pub fn with_capacity_in(capacity: u32, alloc: A) -> Result<Self, ArrayError> {
        let mut arr = Self::new_in(alloc);
        arr.reserve(capacity)?;

        Ok(arr)
    }

    /// Returns the allocator backing this array.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline(always)]
    fn header(&self) -> Option<Header> {
        // SAFETY: `data` always comes from `data_from_base` on a live block.
        self.data
            .map(|data| unsafe { header::header_from_data(data).read() })
    }

    #[inline(always)]
    fn set_len(&mut self, len: u32) {
        if let Some(data) = self.data {
            // SAFETY: `data` always comes from `data_from_base` on a live block.
            unsafe { (*header::header_from_data(data).as_ptr()).len = len };
        }
    }

    /// Returns `true` once a block has been allocated.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the number of elements in the array (0 when uninitialized).
    #[inline]
    pub fn len(&self) -> u32 {
        self.header().map_or(0, |h| h.len)
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of element slots (0 when uninitialized).
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.header().map_or(0, |h| h.capacity)
    }

    /// Returns `true` when `len() == capacity()`.
    ///
    /// An uninitialized array is full: it has no slot to write into.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns `true` if `additional` more elements would not fit.
    ///
    /// Always `true` for an uninitialized array.
    #[inline]
    pub fn needs_growth(&self, additional: u32) -> bool {
        match self.header() {
            None => true,
            Some(h) => u64::from(h.len) + u64::from(additional) > u64::from(h.capacity),
        }
    }

    /// Moves the array into a block with `new_capacity` slots.
    ///
    /// `new_capacity` must be at least `len()`.
    #[track_caller]
    fn resize_to(&mut self, new_capacity: u32) -> Result<(), ArrayError> {
        let Header { len, capacity } = self.header().unwrap_or(Header {
            len: 0,
            capacity: 0,
        });
        debug_assert!(new_capacity >= len);

        let new_layout = header::block_layout::<T>(new_capacity)?;

        let base = match self.data {
            None => self.alloc.allocate(new_layout),
            Some(data) => {
                // SAFETY: the live block was allocated with `capacity` slots.
                let old_layout = unsafe { header::live_block_layout::<T>(capacity) };
                // SAFETY: `data` comes from a live block owned by `self.alloc`
                // and both layouts share `block_align::<T>()`.
                unsafe {
                    self.alloc.reallocate(
                        Some(header::base_from_data(data)),
                        old_layout,
                        new_layout,
                    )
                }
            }
        }
        .map_err(|source| ArrayError::AllocationFailure {
            requested_capacity: new_capacity,
            source,
        })?;

        // SAFETY: `base` is a fresh block laid out by `block_layout::<T>`,
        // aligned for `Header`.
        unsafe {
            base.cast::<Header>().write(Header {
                len,
                capacity: new_capacity,
            });
            self.data = Some(header::data_from_base(base));
        }

        tracing::trace!(
            old_capacity = capacity,
            new_capacity,
            len,
            "growable array resized"
        );

        Ok(())
    }

    /// Allocates a block with room for one element if the array is
    /// uninitialized. No-op otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::AllocationFailure`] if the allocator refuses;
    /// the array stays uninitialized.
    #[track_caller]
    pub fn ensure_initialized(&mut self) -> Result<(), ArrayError> {
        if self.data.is_some() {
            return Ok(());
        }

        self.resize_to(1)
    }

    /// Doubles the capacity (or sets it to 1 when it is 0).
    ///
    /// Existing elements are preserved; the block may move.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::CapacityOverflow`] if doubling exceeds `u32::MAX`.
    /// - [`ArrayError::AllocationFailure`] if the allocator refuses.
    #[track_caller]
    pub fn grow(&mut self) -> Result<(), ArrayError> {
        let capacity = self.capacity();
        let new_capacity = if capacity == 0 {
            1
        } else {
            capacity
                .checked_mul(2)
                .ok_or(ArrayError::CapacityOverflow)?
        };

        self.resize_to(new_capacity)
    }

    /// Ensures `capacity() >= min_capacity`.
    ///
    /// Reallocates to exactly `min_capacity` when the current capacity is
    /// smaller. Never shrinks and never changes `len()`.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::CapacityOverflow`] if the block size overflows.
    /// - [`ArrayError::AllocationFailure`] if the allocator refuses.
    #[track_caller]
    pub fn reserve(&mut self, min_capacity: u32) -> Result<(), ArrayError> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }

        self.resize_to(min_capacity)
    }

    #[track_caller]
    fn make_room_for_one(&mut self) -> Result<(), ArrayError> {
        self.ensure_initialized()?;

        if self.needs_growth(1) {
            self.grow()?;
        }

        Ok(())
    }

    /// Appends `value` at index `len()`.
    ///
    /// # Errors
    ///
    /// On failure the array is unchanged and `value` is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mho_array::{ArrayError, GrowableArray};
    ///
    /// fn example() -> Result<(), ArrayError> {
    ///     let mut arr = GrowableArray::new();
    ///     for i in 1u32..=5 {
    ///         arr.push(i)?;
    ///     }
    ///
    ///     assert_eq!(arr.len(), 5);
    ///     assert_eq!(arr.capacity(), 8);
    ///     Ok(())
    /// }
    /// # example().unwrap();
    /// ```
    #[track_caller]
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        self.make_room_for_one()?;

        let len = self.len();
        // SAFETY: `make_room_for_one` guarantees `len < capacity`.
        unsafe { self.as_mut_ptr().add(len as usize).write(value) };
        self.set_len(len + 1);

        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Empty`] on an empty or uninitialized array,
    /// which is left untouched.
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        let len = self.len();
        if len == 0 {
            return Err(ArrayError::Empty);
        }

        let new_len = len - 1;
        self.set_len(new_len);

        // SAFETY: index `new_len` held a live element that is now outside `len`.
        Ok(unsafe { self.as_mut_ptr().add(new_len as usize).read() })
    }

    /// Inserts `value` at `position`, shifting `[position, len)` up by one.
    ///
    /// `position == len()` appends; `position == 0` prepends.
    ///
    /// # Errors
    ///
    /// - [`ArrayError::IndexOutOfBounds`] if `position > len()`.
    /// - Allocation errors as for [`push`](Self::push).
    ///
    /// On failure the array is unchanged and `value` is dropped.
    #[track_caller]
    pub fn insert(&mut self, position: u32, value: T) -> Result<(), ArrayError> {
        let len = self.len();
        if position > len {
            return Err(ArrayError::IndexOutOfBounds {
                index: position,
                len,
            });
        }

        self.make_room_for_one()?;

        // SAFETY: `position <= len < capacity`, so both the shifted range
        // and the destination slot are inside the block.
        unsafe {
            let slot = self.as_mut_ptr().add(position as usize);
            ptr::copy(slot, slot.add(1), (len - position) as usize);
            slot.write(value);
        }
        self.set_len(len + 1);

        Ok(())
    }

    /// Removes and returns the element at `position`, shifting
    /// `(position, len)` down by one.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `position >= len()`.
    pub fn remove(&mut self, position: u32) -> Result<T, ArrayError> {
        let len = self.len();
        if position >= len {
            return Err(ArrayError::IndexOutOfBounds {
                index: position,
                len,
            });
        }

        // SAFETY: `position < len`, so the slot holds a live element and the
        // tail `(position, len)` is inside the block.
        let value = unsafe {
            let slot = self.as_mut_ptr().add(position as usize);
            let value = slot.read();
            ptr::copy(slot.add(1), slot, (len - position - 1) as usize);
            value
        };
        self.set_len(len - 1);

        Ok(value)
    }

    /// Drops every element and sets `len()` to 0. Capacity is kept.
    pub fn clear(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();
        // Length first: a panicking `Drop` must not expose dropped slots.
        self.set_len(0);

        // SAFETY: the slice covered the live elements, which are no longer
        // reachable through `len`.
        unsafe { ptr::drop_in_place(elements) };
    }

    /// Drops every element and releases the block.
    ///
    /// The array returns to the uninitialized state and can be reused.
    #[track_caller]
    pub fn free(&mut self) {
        self.clear();

        let Some(data) = self.data.take() else {
            return;
        };

        // SAFETY: `data` comes from a live block allocated by `self.alloc`
        // with the capacity recorded in its header.
        unsafe {
            let capacity = header::header_from_data(data).read().capacity;
            let layout = header::live_block_layout::<T>(capacity);
            self.alloc.release(header::base_from_data(data), layout);
        }
    }

    /// Clones and appends every element of `items`.
    ///
    /// Reserves once, doubling the capacity until everything fits.
    ///
    /// # Errors
    ///
    /// On failure nothing is appended.
    #[track_caller]
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        let additional = u32::try_from(items.len()).map_err(|_| ArrayError::CapacityOverflow)?;
        if additional == 0 {
            return Ok(());
        }

        let needed = self
            .len()
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;

        if self.needs_growth(additional) {
            let mut target = self.capacity().max(1);
            while target < needed {
                target = target.saturating_mul(2);
            }
            self.reserve(target)?;
        }

        for item in items {
            let len = self.len();
            // SAFETY: capacity was reserved for `needed` elements above.
            unsafe { self.as_mut_ptr().add(len as usize).write(item.clone()) };
            self.set_len(len + 1);
        }

        Ok(())
    }

    /// Returns a reference to the element at `index`, if any.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&T> {
        self.as_slice().get(index as usize)
    }

    /// Returns a mutable reference to the element at `index`, if any.
    #[inline]
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index as usize)
    }

    /// Returns a raw pointer to the first element slot.
    ///
    /// Dangling (but aligned) while the array is uninitialized.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Returns a raw mutable pointer to the first element slot.
    ///
    /// Dangling (but aligned) while the array is uninitialized.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized; a dangling pointer
        // is valid for an empty slice.
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len() as usize) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len() as usize;
        // SAFETY: the first `len` slots are initialized and uniquely borrowed.
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }
}

impl<T, A> Drop for GrowableArray<T, A>
where
    A: RawAllocator,
{
    fn drop(&mut self) {
        self.free();
    }
}

impl<T, A> Default for GrowableArray<T, A>
where
    A: RawAllocator + Default,
{
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A> core::fmt::Debug for GrowableArray<T, A>
where
    T: core::fmt::Debug,
    A: RawAllocator,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableArray")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T, A> PartialEq for GrowableArray<T, A>
where
    T: PartialEq,
    A: RawAllocator,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAllocator> Eq for GrowableArray<T, A> {}

impl<T, A> Deref for GrowableArray<T, A>
where
    A: RawAllocator,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A> DerefMut for GrowableArray<T, A>
where
    A: RawAllocator,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T, A> IntoIterator for &'a GrowableArray<T, A>
where
    A: RawAllocator,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A> IntoIterator for &'a mut GrowableArray<T, A>
where
    A: RawAllocator,
{
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
