// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ptr::NonNull;

use crate::error::ArrayError;
use crate::header::{Header, base_from_data, block_layout, data_from_base, data_offset};

#[test]
fn test_header_is_two_u32() {
    assert_eq!(core::mem::size_of::<Header>(), 8);
    assert_eq!(core::mem::align_of::<Header>(), 4);
}

#[test]
fn test_data_offset_respects_element_alignment() {
    assert_eq!(data_offset::<u8>(), 8);
    assert_eq!(data_offset::<u32>(), 8);
    assert_eq!(data_offset::<u64>(), 8);
    assert_eq!(data_offset::<()>(), 8);

    #[repr(align(32))]
    struct Wide(#[allow(dead_code)] u8);
    assert_eq!(data_offset::<Wide>(), 32);
}

#[test]
fn test_block_layout_sizes() {
    let layout = block_layout::<u32>(4).expect("Failed to compute layout");

    assert_eq!(layout.size(), 8 + 4 * 4);
    assert_eq!(layout.align(), 4);

    let layout = block_layout::<u64>(3).expect("Failed to compute layout");

    assert_eq!(layout.size(), 8 + 3 * 8);
    assert_eq!(layout.align(), 8);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_block_layout_overflow() {
    // 2^40 * u32::MAX overflows usize.
    assert_eq!(
        block_layout::<[u8; 1 << 40]>(u32::MAX),
        Err(ArrayError::CapacityOverflow)
    );
    // 2^32 * u32::MAX fits in usize but exceeds isize::MAX.
    assert_eq!(
        block_layout::<[u8; 1 << 32]>(u32::MAX),
        Err(ArrayError::CapacityOverflow)
    );
}

#[test]
fn test_base_and_data_roundtrip() {
    let mut block = [0u64; 4];
    let base = NonNull::from(&mut block).cast::<u8>();

    unsafe {
        let data = data_from_base::<u64>(base);
        assert_eq!(data.cast::<u8>().as_ptr() as usize - base.as_ptr() as usize, 8);
        assert_eq!(base_from_data(data), base);
    }
}
