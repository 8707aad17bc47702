// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Exhaustive removal orders for shift-down removal tests.

/// Heap's algorithm over `order[..k]`, reporting every arrangement.
fn permute<F>(order: &mut [u32], k: usize, visit: &mut F)
where
    F: FnMut(&[u32]),
{
    if k <= 1 {
        visit(order);
        return;
    }

    for i in 0..k - 1 {
        permute(order, k - 1, visit);
        let j = if k % 2 == 0 { i } else { 0 };
        order.swap(j, k - 1);
    }
    permute(order, k - 1, visit);
}

/// Translates "remove original element `order[n]` at step `n`" into the
/// position that element occupies once the previous ones are gone.
fn to_positions(order: &[u32], positions: &mut Vec<u32>) {
    positions.clear();

    for (step, &original) in order.iter().enumerate() {
        let shifted = order[..step].iter().filter(|&&gone| gone < original).count() as u32;
        positions.push(original - shifted);
    }
}

/// Calls `visit` once per order in which `len` elements can be removed.
///
/// The callback receives `(order, positions)`: `order[n]` is the original
/// index of the element removed at step `n`, and `positions[n]` is the
/// argument to pass to `remove` at that step.
///
/// # Example
/// ```
/// use mho_test_utils::removal_orders;
///
/// let mut seen = Vec::new();
/// removal_orders(3, |order, positions| {
///     seen.push((order.to_vec(), positions.to_vec()));
/// });
///
/// assert_eq!(seen.len(), 6); // 3! = 6
/// assert!(seen.contains(&(vec![2, 1, 0], vec![2, 1, 0])));
/// assert!(seen.contains(&(vec![0, 1, 2], vec![0, 0, 0])));
/// ```
pub fn removal_orders<F>(len: u32, mut visit: F)
where
    F: FnMut(&[u32], &[u32]),
{
    if len == 0 {
        return;
    }

    let mut order: Vec<u32> = (0..len).collect();
    let mut positions = Vec::with_capacity(len as usize);

    permute(&mut order, len as usize, &mut |order: &[u32]| {
        to_positions(order, &mut positions);
        visit(order, &positions);
    });
}
