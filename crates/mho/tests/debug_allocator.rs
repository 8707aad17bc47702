// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use mho::array::GrowableArray;
use mho::dbg::{DebugAllocator, Finding};

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    position: [f32; 3],
    mass: f64,
}

fn particle(i: u32) -> Particle {
    Particle {
        position: [i as f32, 0.0, -(i as f32)],
        mass: f64::from(i) * 0.5,
    }
}

#[test]
fn test_many_arrays_share_one_debug_allocator() {
    let dbg = DebugAllocator::new();

    {
        let mut ints = GrowableArray::new_in(&dbg);
        let mut particles = GrowableArray::new_in(&dbg);
        let mut nested = GrowableArray::new_in(&dbg);

        for i in 0..50u32 {
            ints.push(i).expect("Failed to push");
            particles.push(particle(i)).expect("Failed to push");
        }
        for _ in 0..3 {
            let mut inner = GrowableArray::new_in(&dbg);
            inner.extend_from_slice(&[1u8, 2, 3]).expect("Failed to extend");
            nested.push(inner).expect("Failed to push");
        }

        assert_eq!(dbg.live_blocks(), 6);
        assert_eq!(particles[49], particle(49));
        assert_eq!(nested[2].as_slice(), &[1, 2, 3]);
    }

    let report = dbg.report();
    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(report.allocations, report.frees);
}

#[test]
fn test_leak_points_at_allocating_line() {
    let dbg = DebugAllocator::new();

    let mut arr = GrowableArray::<u32, _>::new_in(&dbg);
    let line = line!() + 1;
    arr.ensure_initialized().expect("Failed to ensure_initialized");
    core::mem::forget(arr);

    let report = dbg.report();
    assert_eq!(report.leaks(), 1);
    match report.findings[0] {
        Finding::Leak { location, .. } => {
            assert!(location.file().ends_with("debug_allocator.rs"));
            assert_eq!(location.line(), line);
        }
        other => panic!("expected Leak, got {:?}", other),
    }
}

#[test]
fn test_element_drops_are_independent_of_tracking() {
    use std::rc::Rc;

    let dbg = DebugAllocator::new();
    let shared = Rc::new(());

    let mut arr = GrowableArray::new_in(&dbg);
    for _ in 0..10 {
        arr.push(Rc::clone(&shared)).expect("Failed to push");
    }
    assert_eq!(Rc::strong_count(&shared), 11);

    arr.remove(0).expect("Failed to remove");
    arr.pop().expect("Failed to pop");
    assert_eq!(Rc::strong_count(&shared), 9);

    arr.clear();
    assert_eq!(Rc::strong_count(&shared), 1);
    assert_eq!(dbg.live_blocks(), 1);

    drop(arr);
    assert!(dbg.report().is_clean());
}
