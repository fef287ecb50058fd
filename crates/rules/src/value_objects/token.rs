//! Tokens on the battle grid
//!
//! A token is a read-only snapshot of one combatant's board presence. The
//! authoritative copy lives in the host's shared state; the resolvers take a
//! snapshot per call and never retain it.

use serde::{Deserialize, Serialize};

use super::conditions::ConditionInstance;
use crate::ids::EntityId;

/// A cell on the battle grid, with optional elevation in feet
///
/// `x`/`y` are grid cells; `elevation` is feet above (or below) the ground
/// plane and is independent of cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
    pub elevation: Option<i32>,
}

impl GridPosition {
    /// A ground-level position
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            elevation: None,
        }
    }

    /// A position at the given elevation in feet
    pub fn at_elevation(x: i32, y: i32, elevation: i32) -> Self {
        Self {
            x,
            y,
            elevation: Some(elevation),
        }
    }
}

/// Creature size categories, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreatureSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl CreatureSize {
    /// Ordinal used for size-category arithmetic
    pub fn rank(self) -> u8 {
        match self {
            Self::Tiny => 0,
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::Huge => 4,
            Self::Gargantuan => 5,
        }
    }

    /// True if `self` can grapple or shove a creature of `target` size
    ///
    /// A creature cannot grapple or shove anything more than one size
    /// category larger than itself.
    pub fn can_contest(self, target: CreatureSize) -> bool {
        target.rank() <= self.rank() + 1
    }
}

/// Snapshot of one combatant on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub entity_id: EntityId,
    pub name: String,
    pub grid_x: i32,
    pub grid_y: i32,
    /// Elevation in feet, when the token is off the ground plane
    pub elevation: Option<i32>,
    /// Footprint in cells (1x1 for Medium and smaller)
    pub size_x: u32,
    pub size_y: u32,
    pub size_category: CreatureSize,
    pub conditions: Vec<ConditionInstance>,
}

impl Token {
    /// A Medium 1x1 token at the given cell
    pub fn new(name: impl Into<String>, grid_x: i32, grid_y: i32) -> Self {
        Self {
            entity_id: EntityId::new(),
            name: name.into(),
            grid_x,
            grid_y,
            elevation: None,
            size_x: 1,
            size_y: 1,
            size_category: CreatureSize::Medium,
            conditions: Vec::new(),
        }
    }

    // Builder-style methods

    pub fn with_size(mut self, category: CreatureSize, size_x: u32, size_y: u32) -> Self {
        self.size_category = category;
        self.size_x = size_x.max(1);
        self.size_y = size_y.max(1);
        self
    }

    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<ConditionInstance>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Anchor cell of the footprint, with elevation
    pub fn position(&self) -> GridPosition {
        GridPosition {
            x: self.grid_x,
            y: self.grid_y,
            elevation: self.elevation,
        }
    }

    /// Smallest axis gap in cells between the two tokens' footprints
    ///
    /// Zero when the footprints touch or overlap on that axis.
    pub fn footprint_gap(&self, other: &Token) -> (u32, u32) {
        let gap = |a0: i32, a_len: u32, b0: i32, b_len: u32| -> u32 {
            let a1 = a0 + a_len as i32 - 1;
            let b1 = b0 + b_len as i32 - 1;
            if b0 > a1 {
                (b0 - a1) as u32
            } else if a0 > b1 {
                (a0 - b1) as u32
            } else {
                0
            }
        };
        (
            gap(self.grid_x, self.size_x, other.grid_x, other.size_x),
            gap(self.grid_y, self.size_y, other.grid_y, other.size_y),
        )
    }
}
