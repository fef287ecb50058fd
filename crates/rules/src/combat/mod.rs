//! Combat resolvers
//!
//! Each resolver is a pure function over its inputs plus the injected dice
//! port: same inputs and same dice always produce the same result. The
//! resolvers never mutate shared state; they return requested
//! [`StateChange`](crate::events::StateChange)s for the caller to apply.

mod attacks;
mod condition_effects;
mod contested;
mod mortality;
mod spell_slots;

pub use attacks::{
    bonus_attack_count, extra_attack_count, AttackTracker, ClassName, Feat, MartialSubclass,
    WeaponProfile,
};
pub use condition_effects::{
    resolve_condition_effects, AttackContext, AttackKind, ConditionEffectResult, DamageType,
    RollMode,
};
pub use contested::{resolve_contest, ContestInput, ContestKind, ContestOutcome};
pub use mortality::{
    concentration_check, damage_while_down, roll_death_save, ConcentrationCheck, DeathSaveOutcome,
    DeathSaveResult, DeathSaveState,
};
pub use spell_slots::{
    can_cast_as_ritual, cantrip_dice_count, expend_spell_slot, scale_cantrip, CastOutcome,
    SlotPool, SpellSlotState,
};

/// Ability modifier from an ability score
///
/// floor((score - 10) / 2); Rust's `/` rounds toward zero, so negative
/// differences need the explicit floor.
pub fn ability_modifier(score: i32) -> i32 {
    let diff = score - 10;
    if diff >= 0 {
        diff / 2
    } else {
        (diff - 1) / 2
    }
}

/// Proficiency bonus from character level
pub fn proficiency_bonus(level: u8) -> i32 {
    ((i32::from(level) - 1) / 4) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_floors_toward_negative() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(16), 3);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
    }

    #[test]
    fn test_proficiency_bonus_progression() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(11), 4);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }
}
