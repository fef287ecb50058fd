//! Terrain overlay for the battle grid
//!
//! The overlay is sparse: cells without an entry are normal ground at the
//! base movement cost.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kinds of terrain the movement rules distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TerrainKind {
    #[default]
    Normal,
    Difficult,
    Water,
    Climbing,
}

impl TerrainKind {
    /// Default movement-cost multiplier for this kind of terrain
    pub fn default_multiplier(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Difficult | Self::Water | Self::Climbing => 2,
        }
    }
}

/// One cell of the terrain overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainCell {
    pub x: i32,
    pub y: i32,
    pub terrain: TerrainKind,
    /// Movement-cost multiplier; overrides the kind's default
    pub cost_multiplier: u32,
}

impl TerrainCell {
    pub fn new(x: i32, y: i32, terrain: TerrainKind) -> Self {
        Self {
            x,
            y,
            terrain,
            cost_multiplier: terrain.default_multiplier(),
        }
    }

    pub fn with_multiplier(mut self, cost_multiplier: u32) -> Self {
        self.cost_multiplier = cost_multiplier.max(1);
        self
    }
}

/// Movement capabilities that neutralize terrain penalties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCapabilities {
    /// A swim speed ignores water cost
    pub swim: bool,
    /// A climb speed ignores climbing cost
    pub climb: bool,
}

impl MoveCapabilities {
    pub const NONE: Self = Self {
        swim: false,
        climb: false,
    };

    pub fn swimmer() -> Self {
        Self {
            swim: true,
            climb: false,
        }
    }

    pub fn climber() -> Self {
        Self {
            swim: false,
            climb: true,
        }
    }

    /// True if this mover pays base cost on the given terrain
    pub fn neutralizes(&self, terrain: TerrainKind) -> bool {
        match terrain {
            TerrainKind::Normal => true,
            TerrainKind::Difficult => false,
            TerrainKind::Water => self.swim,
            TerrainKind::Climbing => self.climb,
        }
    }
}

/// Sparse terrain overlay keyed by cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainOverlay {
    cells: HashMap<(i32, i32), TerrainCell>,
}

impl TerrainOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an overlay from a list of cells; later duplicates win
    pub fn from_cells(cells: impl IntoIterator<Item = TerrainCell>) -> Self {
        let mut overlay = Self::new();
        for cell in cells {
            overlay.set(cell);
        }
        overlay
    }

    pub fn set(&mut self, cell: TerrainCell) {
        self.cells.insert((cell.x, cell.y), cell);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&TerrainCell> {
        self.cells.get(&(x, y))
    }

    /// Effective multiplier for a mover entering the cell
    ///
    /// Absent cells are normal ground. Capabilities that neutralize the
    /// terrain drop the cost back to the base multiplier of 1.
    pub fn multiplier_for(&self, x: i32, y: i32, capabilities: &MoveCapabilities) -> u32 {
        match self.get(x, y) {
            Some(cell) if !capabilities.neutralizes(cell.terrain) => cell.cost_multiplier,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_cell_is_normal() {
        let overlay = TerrainOverlay::new();
        assert_eq!(overlay.multiplier_for(3, 3, &MoveCapabilities::NONE), 1);
    }

    #[test]
    fn test_water_doubles_without_swim_speed() {
        let overlay =
            TerrainOverlay::from_cells([TerrainCell::new(2, 2, TerrainKind::Water)]);
        assert_eq!(overlay.multiplier_for(2, 2, &MoveCapabilities::NONE), 2);
        assert_eq!(overlay.multiplier_for(2, 2, &MoveCapabilities::swimmer()), 1);
    }

    #[test]
    fn test_climbing_neutralized_by_climb_speed() {
        let overlay =
            TerrainOverlay::from_cells([TerrainCell::new(0, 1, TerrainKind::Climbing)]);
        assert_eq!(overlay.multiplier_for(0, 1, &MoveCapabilities::NONE), 2);
        assert_eq!(overlay.multiplier_for(0, 1, &MoveCapabilities::climber()), 1);
    }

    #[test]
    fn test_difficult_terrain_never_neutralized() {
        let overlay =
            TerrainOverlay::from_cells([TerrainCell::new(1, 1, TerrainKind::Difficult)]);
        let caps = MoveCapabilities {
            swim: true,
            climb: true,
        };
        assert_eq!(overlay.multiplier_for(1, 1, &caps), 2);
    }

    #[test]
    fn test_custom_multiplier_overrides_default() {
        let cell = TerrainCell::new(5, 5, TerrainKind::Difficult).with_multiplier(3);
        let overlay = TerrainOverlay::from_cells([cell]);
        assert_eq!(overlay.multiplier_for(5, 5, &MoveCapabilities::NONE), 3);
    }
}
