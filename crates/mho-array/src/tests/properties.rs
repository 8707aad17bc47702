// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use mho_test_utils::{ArrayOp, Outcome, ReferenceArray, array_ops};
use proptest::prelude::*;

use crate::{ArrayError, GrowableArray};

fn apply(arr: &mut GrowableArray<i32>, op: ArrayOp) -> Outcome {
    fn done(result: Result<(), ArrayError>) -> Outcome {
        match result {
            Ok(()) => Outcome::Done,
            Err(ArrayError::Empty | ArrayError::IndexOutOfBounds { .. }) => Outcome::Rejected,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    fn value(result: Result<i32, ArrayError>) -> Outcome {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(ArrayError::Empty | ArrayError::IndexOutOfBounds { .. }) => Outcome::Rejected,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    match op {
        ArrayOp::Push(v) => done(arr.push(v)),
        ArrayOp::Pop => value(arr.pop()),
        ArrayOp::Insert { position, value: v } => done(arr.insert(position, v)),
        ArrayOp::Remove { position } => value(arr.remove(position)),
        ArrayOp::Clear => {
            arr.clear();
            Outcome::Done
        }
        ArrayOp::Reserve(n) => done(arr.reserve(n)),
        ArrayOp::Grow => done(arr.grow()),
        ArrayOp::Free => {
            arr.free();
            Outcome::Done
        }
    }
}

fn array_of(items: &[i32]) -> GrowableArray<i32> {
    let mut arr = GrowableArray::new();
    arr.extend_from_slice(items).expect("Failed to extend");
    arr
}

proptest! {
    // Matches the reference model step by step; 0 <= len <= capacity throughout.
    #[test]
    fn prop_matches_reference_model(ops in array_ops(64, 16)) {
        let mut arr = GrowableArray::new();
        let mut model = ReferenceArray::new();

        for op in ops {
            let expected = model.apply(op);
            if expected == Outcome::Skipped {
                continue;
            }

            prop_assert_eq!(apply(&mut arr, op), expected, "op {:?}", op);
            prop_assert_eq!(arr.as_slice(), model.items());
            prop_assert_eq!(arr.capacity(), model.capacity());
            prop_assert!(arr.len() <= arr.capacity());
        }
    }

    #[test]
    fn prop_push_appends_one(items in prop::collection::vec(any::<i32>(), 0..40), v in any::<i32>()) {
        let mut arr = array_of(&items);
        let len = arr.len();

        arr.push(v).expect("Failed to push");

        prop_assert_eq!(arr.len(), len + 1);
        prop_assert_eq!(arr.last(), Some(&v));
        prop_assert_eq!(&arr[..items.len()], &items[..]);
    }

    #[test]
    fn prop_pop_undoes_push(items in prop::collection::vec(any::<i32>(), 1..40), v in any::<i32>()) {
        let mut arr = array_of(&items);

        arr.push(v).expect("Failed to push");
        prop_assert_eq!(arr.pop(), Ok(v));

        prop_assert_eq!(arr.as_slice(), &items[..]);
    }

    #[test]
    fn prop_growth_preserves_content(items in prop::collection::vec(any::<i32>(), 0..40), extra in 0u32..200) {
        let mut arr = array_of(&items);

        arr.grow().expect("Failed to grow");
        prop_assert_eq!(arr.as_slice(), &items[..]);

        arr.reserve(arr.capacity() + extra).expect("Failed to reserve");
        prop_assert_eq!(arr.as_slice(), &items[..]);
    }

    #[test]
    fn prop_clear_keeps_capacity(items in prop::collection::vec(any::<i32>(), 0..40)) {
        let mut arr = array_of(&items);
        let capacity = arr.capacity();

        arr.clear();

        prop_assert_eq!(arr.len(), 0);
        prop_assert_eq!(arr.capacity(), capacity);
    }

    #[test]
    fn prop_insert_remove_inverse(
        (items, position) in prop::collection::vec(any::<i32>(), 1..40)
            .prop_flat_map(|items| { let len = items.len() as u32; (Just(items), 0..len) }),
        v in any::<i32>(),
    ) {
        let mut arr = array_of(&items);

        arr.insert(position, v).expect("Failed to insert");
        prop_assert_eq!(arr.get(position), Some(&v));
        prop_assert_eq!(arr.remove(position), Ok(v));

        prop_assert_eq!(arr.as_slice(), &items[..]);
    }
}

#[test]
fn test_uninitialized_reports_zero() {
    let arr: GrowableArray<i32> = GrowableArray::new();

    assert_eq!(arr.len(), 0);
    assert_eq!(arr.capacity(), 0);
}
