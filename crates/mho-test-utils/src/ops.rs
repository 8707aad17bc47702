// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Random operation sequences and a reference model for growable arrays.

use proptest::prelude::*;

/// `Grow` is skipped once the model capacity reaches this many slots, so long
/// sequences cannot request gigabytes.
pub const GROW_LIMIT: u32 = 1 << 12;

/// One operation on a growable array of `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    /// Append a value.
    Push(i32),
    /// Remove the last value.
    Pop,
    /// Insert a value; `position` may be out of range.
    Insert {
        /// Target position.
        position: u32,
        /// Value to insert.
        value: i32,
    },
    /// Remove at `position`, which may be out of range.
    Remove {
        /// Target position.
        position: u32,
    },
    /// Drop all elements, keep capacity.
    Clear,
    /// Ensure a minimum capacity.
    Reserve(u32),
    /// Double the capacity.
    Grow,
    /// Release the block entirely.
    Free,
}

/// What an operation produced, in a form both the model and the real array
/// can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded without returning a value.
    Done,
    /// The operation succeeded and returned a value.
    Value(i32),
    /// The operation was refused (empty array or position out of range).
    Rejected,
    /// The operation was not applied (see [`GROW_LIMIT`]).
    Skipped,
}

/// Strategy for a single [`ArrayOp`].
///
/// Positions range a little past `max_len` so out-of-range calls are
/// exercised too.
pub fn array_op(max_len: u32) -> impl Strategy<Value = ArrayOp> {
    let position = 0..=max_len + 2;

    prop_oneof![
        6 => any::<i32>().prop_map(ArrayOp::Push),
        2 => Just(ArrayOp::Pop),
        3 => (position.clone(), any::<i32>())
            .prop_map(|(position, value)| ArrayOp::Insert { position, value }),
        2 => position.prop_map(|position| ArrayOp::Remove { position }),
        1 => Just(ArrayOp::Clear),
        1 => (0..=max_len).prop_map(ArrayOp::Reserve),
        1 => Just(ArrayOp::Grow),
        1 => Just(ArrayOp::Free),
    ]
}

/// Strategy for a sequence of up to `max_ops` operations.
pub fn array_ops(max_ops: usize, max_len: u32) -> impl Strategy<Value = Vec<ArrayOp>> {
    proptest::collection::vec(array_op(max_len), 0..=max_ops)
}

/// `Vec`-backed model of a growable array, including its capacity policy.
///
/// - first insertion allocates capacity 1
/// - an insertion that would not fit doubles the capacity
/// - `Reserve(n)` raises capacity to exactly `n` when smaller
/// - `Clear` keeps capacity, `Free` resets it to 0
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReferenceArray {
    items: Vec<i32>,
    capacity: u32,
}

impl ReferenceArray {
    /// Creates an empty, uninitialized model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live elements.
    pub fn items(&self) -> &[i32] {
        &self.items
    }

    /// Number of live elements.
    pub fn len(&self) -> u32 {
        self.items.len() as u32
    }

    /// Returns `true` when there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Modelled capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    fn make_room_for_one(&mut self) {
        if self.capacity == 0 {
            self.capacity = 1;
        }
        if self.len() + 1 > self.capacity {
            self.capacity *= 2;
        }
    }

    /// Applies `op` and reports its outcome.
    pub fn apply(&mut self, op: ArrayOp) -> Outcome {
        match op {
            ArrayOp::Push(value) => {
                self.make_room_for_one();
                self.items.push(value);
                Outcome::Done
            }
            ArrayOp::Pop => self.items.pop().map_or(Outcome::Rejected, Outcome::Value),
            ArrayOp::Insert { position, value } => {
                if position > self.len() {
                    return Outcome::Rejected;
                }
                self.make_room_for_one();
                self.items.insert(position as usize, value);
                Outcome::Done
            }
            ArrayOp::Remove { position } => {
                if position >= self.len() {
                    return Outcome::Rejected;
                }
                Outcome::Value(self.items.remove(position as usize))
            }
            ArrayOp::Clear => {
                self.items.clear();
                Outcome::Done
            }
            ArrayOp::Reserve(min_capacity) => {
                self.capacity = self.capacity.max(min_capacity);
                Outcome::Done
            }
            ArrayOp::Grow => {
                if self.capacity >= GROW_LIMIT {
                    return Outcome::Skipped;
                }
                self.capacity = if self.capacity == 0 { 1 } else { self.capacity * 2 };
                Outcome::Done
            }
            ArrayOp::Free => {
                self.items.clear();
                self.capacity = 0;
                Outcome::Done
            }
        }
    }
}
