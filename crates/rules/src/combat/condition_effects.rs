//! Condition effect resolution
//!
//! Derives the roll mode, auto-crit flag, incapacitation, and flat numeric
//! penalty for one attack from the attacker's and target's conditions plus
//! the situational context. The source lists double as the audit trail: the
//! host renders them so players can see why a roll had advantage.

use serde::{Deserialize, Serialize};

use crate::value_objects::{exhaustion_level, has_condition, Condition, ConditionInstance};

/// Melee or ranged attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackKind {
    #[default]
    Melee,
    Ranged,
}

/// Damage types the rules distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Lightning,
    Thunder,
    Acid,
    Poison,
    Necrotic,
    Radiant,
    Psychic,
    Force,
}

/// Final roll mode after advantage/disadvantage cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollMode {
    Advantage,
    Disadvantage,
    #[default]
    Normal,
}

/// Situational context for one attack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackContext {
    pub kind: AttackKind,
    /// Target is within 5 feet of the attacker
    pub within_5_feet: bool,
    /// Some enemy (not necessarily the target) is within 5 feet
    pub enemy_within_5_feet: bool,
    pub underwater: bool,
    pub damage_type: Option<DamageType>,
    pub attacker_has_swim_speed: bool,
    /// The source of the attacker's fear is visible to them
    pub fear_source_in_sight: bool,
    /// Name of a flanking ally in a qualifying position, melee only
    pub flanking_ally: Option<String>,
    pub target_dodging: bool,
    pub heavy_weather: bool,
}

impl AttackContext {
    /// A melee attack against an adjacent target
    pub fn melee() -> Self {
        Self {
            kind: AttackKind::Melee,
            within_5_feet: true,
            ..Self::default()
        }
    }

    /// A ranged attack
    pub fn ranged() -> Self {
        Self {
            kind: AttackKind::Ranged,
            ..Self::default()
        }
    }
}

/// Derived effects of the active conditions on one attack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionEffectResult {
    /// Reasons granting advantage, in evaluation order
    pub advantage_sources: Vec<String>,
    /// Reasons imposing disadvantage, in evaluation order
    pub disadvantage_sources: Vec<String>,
    pub roll_mode: RollMode,
    /// A hit is automatically a critical hit
    pub auto_crit: bool,
    /// The attacker cannot take the action at all; do not roll
    pub attacker_cannot_act: bool,
    /// Flat penalty from exhaustion, always <= 0 and a multiple of -2
    pub exhaustion_penalty: i32,
}

/// Resolve condition interactions for one attack
///
/// Rules are evaluated independently and then combined: any mix of
/// advantage and disadvantage sources cancels to a normal roll, regardless
/// of how many sources sit on each side.
pub fn resolve_condition_effects(
    attacker: &[ConditionInstance],
    target: &[ConditionInstance],
    ctx: &AttackContext,
) -> ConditionEffectResult {
    let mut result = ConditionEffectResult {
        attacker_cannot_act: attacker.iter().any(|c| c.condition.prevents_acting()),
        exhaustion_penalty: -2 * i32::from(exhaustion_level(attacker)),
        ..ConditionEffectResult::default()
    };

    let ranged = ctx.kind == AttackKind::Ranged;
    let melee = ctx.kind == AttackKind::Melee;

    // Attacker-side disadvantage. Grappled is deliberately absent: it only
    // restricts movement, never the attack roll.
    if has_condition(attacker, Condition::Blinded) {
        result.disadvantage_sources.push("attacker is blinded".into());
    }
    if has_condition(attacker, Condition::Frightened) && ctx.fear_source_in_sight {
        result
            .disadvantage_sources
            .push("attacker is frightened with the source in sight".into());
    }
    if has_condition(attacker, Condition::Poisoned) {
        result.disadvantage_sources.push("attacker is poisoned".into());
    }
    if has_condition(attacker, Condition::Prone) {
        result.disadvantage_sources.push("attacker is prone".into());
    }
    if has_condition(attacker, Condition::Restrained) {
        result
            .disadvantage_sources
            .push("attacker is restrained".into());
    }
    if ranged && ctx.enemy_within_5_feet {
        result
            .disadvantage_sources
            .push("ranged attack with an enemy within 5 feet".into());
    }
    if ranged && ctx.underwater {
        result
            .disadvantage_sources
            .push("ranged attack underwater".into());
    }
    if melee
        && ctx.underwater
        && !ctx.attacker_has_swim_speed
        && ctx.damage_type != Some(DamageType::Piercing)
    {
        result
            .disadvantage_sources
            .push("non-piercing melee attack underwater".into());
    }
    if ctx.target_dodging {
        result.disadvantage_sources.push("target is dodging".into());
    }
    if ranged && ctx.heavy_weather {
        result
            .disadvantage_sources
            .push("heavy weather on a ranged attack".into());
    }

    // Attacker-side advantage
    if has_condition(attacker, Condition::Invisible) {
        result
            .advantage_sources
            .push("attacker is unseen (invisible)".into());
    }
    if melee {
        if let Some(ally) = &ctx.flanking_ally {
            result
                .advantage_sources
                .push(format!("flanking with {}", ally));
        }
    }

    // Target-granted advantage
    for condition in [
        Condition::Blinded,
        Condition::Paralyzed,
        Condition::Petrified,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
    ] {
        if has_condition(target, condition) {
            result
                .advantage_sources
                .push(format!("target is {}", condition.name().to_lowercase()));
        }
    }

    // Prone targets split on attack distance
    if has_condition(target, Condition::Prone) {
        if melee && ctx.within_5_feet {
            result
                .advantage_sources
                .push("target is prone (melee within 5 feet)".into());
        } else {
            result
                .disadvantage_sources
                .push("target is prone (ranged or beyond 5 feet)".into());
        }
    }

    result.auto_crit = ctx.within_5_feet
        && (has_condition(target, Condition::Paralyzed)
            || has_condition(target, Condition::Unconscious));

    result.roll_mode = match (
        result.advantage_sources.is_empty(),
        result.disadvantage_sources.is_empty(),
    ) {
        (false, false) | (true, true) => RollMode::Normal,
        (false, true) => RollMode::Advantage,
        (true, false) => RollMode::Disadvantage,
    };

    result
}
