//! Battlemat rules core
//!
//! Pure, synchronous combat-rules resolution for a 5-foot-grid tabletop
//! game. Every resolver is deterministic given its inputs and the injected
//! dice port: no ambient state, no randomness, no I/O. Requested state
//! mutations come back as values for the host layer to apply.

pub mod combat;
pub mod error;
pub mod events;
pub mod grid;
pub mod ids;
pub mod ports;
pub mod value_objects;

pub use error::RulesError;
pub use ids::EntityId;

// Re-export the port traits hosts implement
pub use ports::{CombatSink, DiceRoller, RollOptions};

// Re-export events and requested mutations
pub use events::{CombatEventType, CombatLogEntry, StateChange};

// Re-export grid geometry and movement
pub use grid::{
    check_ranged_range, diagonal_step_feet, fall_damage_dice, grid_distance_feet,
    grid_distance_feet_alternate, is_in_melee_range, movement_cost_feet,
    movement_cost_feet_with_rule, reachable_cells, token_distance_feet, DiagonalRule, RangeBand,
    ReachableCell,
};

// Re-export combat resolvers and resource trackers
pub use combat::{
    ability_modifier, bonus_attack_count, can_cast_as_ritual, cantrip_dice_count,
    concentration_check, damage_while_down, expend_spell_slot, extra_attack_count,
    proficiency_bonus, resolve_condition_effects, resolve_contest, roll_death_save,
    scale_cantrip, AttackContext, AttackKind, AttackTracker, CastOutcome, ClassName,
    ConcentrationCheck, ConditionEffectResult, ContestInput, ContestKind, ContestOutcome,
    DamageType, DeathSaveOutcome, DeathSaveResult, DeathSaveState, Feat, MartialSubclass,
    RollMode, SlotPool, SpellSlotState, WeaponProfile,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    exhaustion_level, has_condition, Condition, ConditionDuration, ConditionInstance, D20Roll,
    CreatureSize, DiceFormula, DiceParseError, GridPosition, MoveCapabilities, TerrainCell,
    TerrainKind, TerrainOverlay, Token,
};
