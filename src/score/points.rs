use ahash::RandomState;
use std::collections::{BTreeMap, HashMap};

use crate::model::{PointsRule, PointsTable, RankedEntry};

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Points the default formula gives a single, untied position.
///
/// Nothing floors the result: in a small field the low positions can earn
/// zero or negative points and those values are kept as they are. Huge
/// enrolled fields saturate at the `i32` bounds.
#[must_use]
pub fn formula_points(position: u32, field_size: i32) -> i32 {
    match position {
        1 => field_size.saturating_add(2),
        2 => field_size,
        p => field_size.saturating_sub(i32::try_from(p.saturating_sub(1)).unwrap_or(i32::MAX)),
    }
}

/// Unrounded points for one position, multiplier applied.
#[must_use]
pub fn base_points(rule: &PointsRule, position: u32, field_size: i32) -> f64 {
    let base = match &rule.table {
        PointsTable::Formula => formula_points(position, field_size),
        PointsTable::Template { positions, default } => {
            positions.get(&position).copied().unwrap_or(*default)
        }
    };
    f64::from(base) * rule.multiplier
}

/// Points for a list of dense positions, returned in the same order.
///
/// A group of `k` entries tied on position `p` splits the points of
/// positions `p..p+k` evenly; the average is rounded once and every member of
/// the group gets the same value.
#[must_use]
pub fn allocate_positions(positions: &[u32], rule: &PointsRule, field_size: i32) -> Vec<i32> {
    let mut group_sizes: BTreeMap<u32, u32> = BTreeMap::new();
    for &position in positions {
        *group_sizes.entry(position).or_insert(0) += 1;
    }

    let group_points: BTreeMap<u32, i32> = group_sizes
        .into_iter()
        .map(|(position, size)| {
            let sum: f64 = (position..position + size)
                .map(|p| base_points(rule, p, field_size))
                .sum();
            (position, round_half_up(sum / f64::from(size)))
        })
        .collect();

    positions
        .iter()
        .map(|position| group_points.get(position).copied().unwrap_or_default())
        .collect()
}

/// Points per participant for one ranked view.
#[must_use]
pub fn allocate(
    ranked: &[RankedEntry],
    rule: &PointsRule,
    field_size: i32,
) -> HashMap<i64, i32, RandomState> {
    let positions: Vec<u32> = ranked.iter().map(|r| r.position).collect();
    let points = allocate_positions(&positions, rule, field_size);

    ranked
        .iter()
        .zip(points)
        .map(|(entry, points)| (entry.participant_id, points))
        .collect()
}
