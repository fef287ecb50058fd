//! Spell slot bookkeeping and cantrip scaling
//!
//! Two independently recharging pools: regular slots and pact magic.
//! Cantrips are not a pool - level 0 casts always succeed and never touch
//! state. Expenditure is copy-on-write: the input state is never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::DiceFormula;

/// One spell-slot level's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPool {
    pub current: u8,
    pub max: u8,
}

impl SlotPool {
    /// A full pool of the given size
    pub fn full(max: u8) -> Self {
        Self { current: max, max }
    }

    /// A pool with the given fill, clamped so current never exceeds max
    pub fn new(current: u8, max: u8) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }
}

/// Spell-slot state for one caster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlotState {
    /// Regular slots by level (1-9)
    pub spell_slot_levels: BTreeMap<u8, SlotPool>,
    /// Pact-magic slots, present only for pact casters
    pub pact_magic_slot_levels: Option<BTreeMap<u8, SlotPool>>,
}

impl SpellSlotState {
    pub fn new(spell_slot_levels: BTreeMap<u8, SlotPool>) -> Self {
        Self {
            spell_slot_levels,
            pact_magic_slot_levels: None,
        }
    }

    pub fn with_pact_magic(mut self, pact: BTreeMap<u8, SlotPool>) -> Self {
        self.pact_magic_slot_levels = Some(pact);
        self
    }
}

/// Outcome of trying to expend a spell slot
///
/// A sum type rather than a success flag: callers must handle the
/// out-of-slots case to get at the new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum CastOutcome {
    /// The slot was spent (or the cast was a free cantrip)
    Cast {
        state: SpellSlotState,
        summary: String,
    },
    /// No slot available; state is unchanged and not returned
    Unavailable { message: String },
}

impl CastOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Cast { .. })
    }
}

/// Expend a spell slot of the given level
///
/// Level 0 (cantrips) always succeeds without touching any pool. For
/// leveled spells, `use_pact_slot` selects the pact-magic pool; failures
/// name the pool they came from.
pub fn expend_spell_slot(state: &SpellSlotState, level: u8, use_pact_slot: bool) -> CastOutcome {
    if level == 0 {
        return CastOutcome::Cast {
            state: state.clone(),
            summary: "Cantrip cast (no slot expended)".to_string(),
        };
    }

    if use_pact_slot {
        let Some(pact) = &state.pact_magic_slot_levels else {
            return CastOutcome::Unavailable {
                message: format!("No pact magic slots available at level {}", level),
            };
        };
        let Some(pool) = pact.get(&level).copied() else {
            return CastOutcome::Unavailable {
                message: format!("No pact magic slots available at level {}", level),
            };
        };
        if pool.current == 0 {
            return CastOutcome::Unavailable {
                message: format!("No pact magic slots remaining at level {}", level),
            };
        }
        let mut next = state.clone();
        if let Some(levels) = &mut next.pact_magic_slot_levels {
            levels.insert(level, SlotPool::new(pool.current - 1, pool.max));
        }
        return CastOutcome::Cast {
            state: next,
            summary: format!(
                "Pact magic slot expended: level {} ({}/{} remaining)",
                level,
                pool.current - 1,
                pool.max
            ),
        };
    }

    let Some(pool) = state.spell_slot_levels.get(&level).copied() else {
        return CastOutcome::Unavailable {
            message: format!("No spell slots of level {}", level),
        };
    };
    if pool.current == 0 {
        return CastOutcome::Unavailable {
            message: format!("No level {} spell slots remaining", level),
        };
    }
    let mut next = state.clone();
    next.spell_slot_levels
        .insert(level, SlotPool::new(pool.current - 1, pool.max));
    CastOutcome::Cast {
        state: next,
        summary: format!(
            "Spell slot expended: level {} ({}/{} remaining)",
            level,
            pool.current - 1,
            pool.max
        ),
    }
}

/// True when a spell can be cast as a ritual
///
/// Cantrips never ritual-cast; leveled spells need both the ritual tag and
/// the caster's ritual-casting feature.
pub fn can_cast_as_ritual(level: u8, spell_has_ritual_tag: bool, caster_has_ritual_feature: bool) -> bool {
    level >= 1 && spell_has_ritual_tag && caster_has_ritual_feature
}

/// Cantrip damage dice by character level tier
pub fn cantrip_dice_count(character_level: u8) -> u8 {
    match character_level {
        0..=4 => 1,
        5..=10 => 2,
        11..=16 => 3,
        _ => 4,
    }
}

/// Scale a cantrip damage formula to the caster's level
///
/// Multiplies the leading dice count of an `NdX[+mod]` formula by the tier
/// from [`cantrip_dice_count`], preserving the flat modifier. Input that
/// doesn't parse as a dice formula is returned unchanged.
pub fn scale_cantrip(base_formula: &str, character_level: u8) -> String {
    match DiceFormula::parse(base_formula) {
        Ok(formula) => formula
            .with_dice_count_scaled(cantrip_dice_count(character_level))
            .display(),
        Err(_) => base_formula.to_string(),
    }
}
