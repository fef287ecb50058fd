//! Grid geometry and movement
//!
//! Discrete 5-foot-grid geometry: distances, per-step movement costs, and
//! the cost-limited reachability search the movement UI feeds from.

mod geometry;
mod pathing;

pub use geometry::{
    diagonal_step_feet, fall_damage_dice, grid_distance_feet, grid_distance_feet_alternate,
    is_in_melee_range, token_distance_feet, DiagonalRule, RangeBand,
};
pub use geometry::check_ranged_range;
pub use pathing::{movement_cost_feet, movement_cost_feet_with_rule, reachable_cells, ReachableCell};
