//! Initial placement heuristic.
//!
//! Shelf placement is a trivial constructive heuristic, not an optimizer:
//! it produces a feasible (usually wasteful) layout whose only job is to
//! give a solver a valid starting point.

use super::instance::{PackingInstance, WarmStart};

/// Greedy shelf layout: circles in radius-descending order fill rows
/// left to right within the side limit; each row is as tall as its first
/// (largest) circle. Returns `None` when the instance does not fit —
/// a circle wider than the side limit, or rows stacking past it.
///
/// Within each equal-radius group the assigned positions are permuted so
/// that x is nondecreasing with circle index, which keeps the layout
/// valid under the symmetry-breaking order constraints.
pub fn shelf_layout(instance: &PackingInstance) -> Option<WarmStart> {
    instance.validate().ok()?;

    let radii = instance.radii();
    let n = radii.len();
    let side = instance.side_limit();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| radii[b].total_cmp(&radii[a]));

    let mut positions = vec![(0.0, 0.0); n];
    let mut base_y = 0.0;
    let mut row_height = 0.0;
    let mut cursor = 0.0;
    let mut width: f64 = 0.0;

    for &i in &order {
        let r = radii[i];
        let d = 2.0 * r;
        if d > side {
            return None;
        }
        if cursor + d > side {
            base_y += row_height;
            row_height = 0.0;
            cursor = 0.0;
        }
        if row_height == 0.0 {
            row_height = d;
        }
        positions[i] = (cursor + r, base_y + r);
        cursor += d;
        width = width.max(cursor);
    }

    let height = base_y + row_height;
    if height > side {
        return None;
    }

    for group in instance.equal_radius_groups() {
        if group.len() <= 1 {
            continue;
        }
        let mut assigned: Vec<(f64, f64)> = group.iter().map(|&i| positions[i]).collect();
        assigned.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        for (&i, p) in group.iter().zip(assigned) {
            positions[i] = p;
        }
    }

    Some(WarmStart {
        positions,
        width,
        height,
    })
}
