//! Distance and range math on the 5-foot grid

use serde::{Deserialize, Serialize};

use crate::value_objects::{GridPosition, Token};

/// Feet per grid cell
pub(crate) const CELL_FEET: u32 = 5;

/// Diagonal costing rule in effect for a measurement or search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagonalRule {
    /// Every step costs 5 ft (Chebyshev distance)
    #[default]
    Standard,
    /// Diagonal steps alternate 5 ft / 10 ft along the path
    Alternate,
}

/// Cost in feet of the next diagonal step, given how many were already taken
///
/// Odd-numbered diagonals (first, third, ...) cost 5 ft; even-numbered cost
/// 10 ft. Only meaningful under [`DiagonalRule::Alternate`].
pub fn diagonal_step_feet(diagonals_taken: u32) -> u32 {
    if diagonals_taken % 2 == 0 {
        CELL_FEET
    } else {
        CELL_FEET * 2
    }
}

/// Combine a horizontal distance with a vertical separation in feet
///
/// 3D Euclidean, rounded to the nearest 5-foot increment, with a 5-foot
/// floor for any non-zero separation.
fn combine_with_elevation(horizontal_feet: u32, vertical_feet: u32) -> u32 {
    if vertical_feet == 0 {
        return horizontal_feet;
    }
    let raw = f64::from(horizontal_feet).hypot(f64::from(vertical_feet));
    let rounded = (raw / f64::from(CELL_FEET)).round() as u32 * CELL_FEET;
    rounded.max(CELL_FEET)
}

/// Vertical separation in feet between two positions
///
/// A missing elevation reads as ground level.
fn elevation_gap(a: GridPosition, b: GridPosition) -> u32 {
    (a.elevation.unwrap_or(0) - b.elevation.unwrap_or(0)).unsigned_abs()
}

/// Grid distance in feet between two positions
///
/// Horizontal distance is Chebyshev (every step costs 5 ft, diagonals
/// included); elevation folds in as a 3D Euclidean distance rounded to the
/// nearest 5-foot increment.
pub fn grid_distance_feet(a: GridPosition, b: GridPosition) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let horizontal = dx.max(dy) * CELL_FEET;
    combine_with_elevation(horizontal, elevation_gap(a, b))
}

/// Grid distance under the alternate diagonal rule
///
/// Costs the canonical path from `a` to `b`: all diagonal steps first, with
/// odd diagonals at 5 ft and even diagonals at 10 ft, then straight steps at
/// 5 ft. Elevation folds in the same way as [`grid_distance_feet`].
pub fn grid_distance_feet_alternate(a: GridPosition, b: GridPosition) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let diagonals = dx.min(dy);
    let straights = dx.max(dy) - diagonals;

    let mut horizontal = straights * CELL_FEET;
    for taken in 0..diagonals {
        horizontal += diagonal_step_feet(taken);
    }
    combine_with_elevation(horizontal, elevation_gap(a, b))
}

/// Elevation-aware distance in feet between two tokens' footprints
///
/// Measures from the nearest occupied cells, so a Large creature threatens
/// from every edge of its footprint.
pub fn token_distance_feet(a: &Token, b: &Token) -> u32 {
    let (gap_x, gap_y) = a.footprint_gap(b);
    let horizontal = gap_x.max(gap_y) * CELL_FEET;
    let vertical = (a.elevation.unwrap_or(0) - b.elevation.unwrap_or(0)).unsigned_abs();
    combine_with_elevation(horizontal, vertical)
}

/// True iff `b` is within the attacker's melee reach
pub fn is_in_melee_range(a: &Token, b: &Token, reach_feet: u32) -> bool {
    token_distance_feet(a, b) <= reach_feet
}

/// Bucketed ranged-attack distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeBand {
    Normal,
    Long,
    OutOfRange,
}

/// Bucket the elevation-aware distance between two tokens against a ranged
/// weapon's normal and long range
pub fn check_ranged_range(a: &Token, b: &Token, normal_feet: u32, long_feet: u32) -> RangeBand {
    let distance = token_distance_feet(a, b);
    if distance <= normal_feet {
        RangeBand::Normal
    } else if distance <= long_feet {
        RangeBand::Long
    } else {
        RangeBand::OutOfRange
    }
}

/// Number of d6 of fall damage for a drop of the given height
///
/// One die per 10 feet fallen, capped at 20 dice.
pub fn fall_damage_dice(feet: u32) -> u32 {
    (feet / 10).min(20)
}
