//! Movement costs and cost-limited reachability
//!
//! The reachability search is a Dijkstra flood over 8-connected neighbors.
//! Under the alternate diagonal rule the step cost depends on how many
//! diagonals the path has already spent, so the search state is
//! (cell, diagonal parity) rather than the cell alone.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use super::geometry::{diagonal_step_feet, DiagonalRule, CELL_FEET};
use crate::value_objects::{GridPosition, MoveCapabilities, TerrainOverlay};

/// Cost in feet of one step between adjacent cells, standard diagonal rule
///
/// Base step cost multiplied by the destination cell's terrain multiplier,
/// unless the mover's capabilities neutralize that terrain.
pub fn movement_cost_feet(
    from: GridPosition,
    to: GridPosition,
    terrain: &TerrainOverlay,
    capabilities: &MoveCapabilities,
) -> u32 {
    movement_cost_feet_with_rule(from, to, terrain, capabilities, DiagonalRule::Standard, 0)
}

/// Step cost under an explicit diagonal rule
///
/// `diagonals_taken` is how many diagonal steps the path has already spent;
/// it only matters under [`DiagonalRule::Alternate`].
pub fn movement_cost_feet_with_rule(
    from: GridPosition,
    to: GridPosition,
    terrain: &TerrainOverlay,
    capabilities: &MoveCapabilities,
    rule: DiagonalRule,
    diagonals_taken: u32,
) -> u32 {
    let diagonal = from.x != to.x && from.y != to.y;
    let base = match (rule, diagonal) {
        (DiagonalRule::Alternate, true) => diagonal_step_feet(diagonals_taken),
        _ => CELL_FEET,
    };
    base * terrain.multiplier_for(to.x, to.y, capabilities)
}

/// A cell reachable within a movement budget, annotated with its minimum cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachableCell {
    pub x: i32,
    pub y: i32,
    pub cost: u32,
}

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Every cell reachable from the origin within `budget_feet`
///
/// Grid cells run from (0,0) to (grid_width-1, grid_height-1). Returns the
/// origin at cost 0 plus each reachable cell at its minimum cost, sorted by
/// cost and then by row/column for determinism. An out-of-bounds origin or a
/// zero-sized grid returns nothing.
pub fn reachable_cells(
    origin_x: i32,
    origin_y: i32,
    budget_feet: u32,
    terrain: &TerrainOverlay,
    grid_width: u32,
    grid_height: u32,
    capabilities: &MoveCapabilities,
    rule: DiagonalRule,
) -> Vec<ReachableCell> {
    let in_bounds = |x: i32, y: i32| {
        x >= 0 && y >= 0 && (x as u32) < grid_width && (y as u32) < grid_height
    };
    if !in_bounds(origin_x, origin_y) {
        return Vec::new();
    }

    // Search state is (cell, diagonal parity). Under the standard rule the
    // parity never leaves 0 and the state collapses to the cell.
    let mut best: HashMap<(i32, i32, u8), u32> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(u32, i32, i32, u8)>> = BinaryHeap::new();
    best.insert((origin_x, origin_y, 0), 0);
    heap.push(Reverse((0, origin_x, origin_y, 0)));

    while let Some(Reverse((cost, x, y, parity))) = heap.pop() {
        if best.get(&(x, y, parity)).copied() != Some(cost) {
            continue; // stale heap entry
        }
        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if !in_bounds(nx, ny) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            let base = match (rule, diagonal) {
                (DiagonalRule::Alternate, true) => diagonal_step_feet(u32::from(parity)),
                _ => CELL_FEET,
            };
            let step = base * terrain.multiplier_for(nx, ny, capabilities);
            let next_cost = cost + step;
            if next_cost > budget_feet {
                continue;
            }
            let next_parity = match rule {
                DiagonalRule::Alternate if diagonal => 1 - parity,
                _ => parity,
            };
            let entry = best.entry((nx, ny, next_parity)).or_insert(u32::MAX);
            if next_cost < *entry {
                *entry = next_cost;
                heap.push(Reverse((next_cost, nx, ny, next_parity)));
            }
        }
    }

    // Collapse parity states to the cheapest cost per cell
    let mut per_cell: HashMap<(i32, i32), u32> = HashMap::new();
    for ((x, y, _), cost) in best {
        let entry = per_cell.entry((x, y)).or_insert(u32::MAX);
        *entry = (*entry).min(cost);
    }

    let mut cells: Vec<ReachableCell> = per_cell
        .into_iter()
        .map(|((x, y), cost)| ReachableCell { x, y, cost })
        .collect();
    cells.sort_by_key(|c| (c.cost, c.y, c.x));
    cells
}
