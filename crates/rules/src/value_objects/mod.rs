//! Value objects - Immutable objects defined by their attributes

mod conditions;
mod dice;
mod terrain;
mod token;

pub use conditions::{
    exhaustion_level, has_condition, Condition, ConditionDuration, ConditionInstance,
};
pub use dice::{D20Roll, DiceFormula, DiceParseError};
pub use terrain::{MoveCapabilities, TerrainCell, TerrainKind, TerrainOverlay};
pub use token::{CreatureSize, GridPosition, Token};
