//! Contested actions: grapple and shove
//!
//! Both use the same DC formula (8 + STR modifier + proficiency) against the
//! target's contested check. The target wins ties. Success never mutates
//! state directly; it requests a condition or a forced move for the caller
//! to apply.

use serde::{Deserialize, Serialize};

use super::ability_modifier;
use crate::events::StateChange;
use crate::ports::{DiceRoller, RollOptions};
use crate::value_objects::{Condition, ConditionInstance, D20Roll, Token};

/// The contested action being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContestKind {
    /// Grapple: success applies Grappled until the target escapes
    Grapple,
    /// Shove, prone variant: success knocks the target prone
    ShoveProne,
    /// Shove, push variant: success pushes the target 5 feet away
    ShovePush,
}

impl ContestKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Grapple => "grapple",
            Self::ShoveProne | Self::ShovePush => "shove",
        }
    }
}

/// Inputs for one contested attempt
#[derive(Debug, Clone)]
pub struct ContestInput<'a> {
    pub attacker: &'a Token,
    pub target: &'a Token,
    /// Attacker's Strength score (not modifier)
    pub attacker_str_score: i32,
    pub proficiency_bonus: i32,
    /// Target's escape/acrobatics bonus for the contested check
    pub target_contest_bonus: i32,
}

/// Outcome of a contested action
///
/// A sum type rather than a success flag, so the size-incompatible case
/// cannot be mistaken for a rolled failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum ContestOutcome {
    /// The target is more than one size category larger; no dice were rolled
    TooLarge { summary: String },
    /// The contest was rolled
    Resolved {
        success: bool,
        dc: i32,
        target_roll: D20Roll,
        /// State mutation to apply on success, if any
        requested: Option<StateChange>,
        summary: String,
    },
}

impl ContestOutcome {
    /// True only for a rolled attacker success
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Resolved { success: true, .. })
    }

    /// Human-readable summary for either variant
    pub fn summary(&self) -> &str {
        match self {
            Self::TooLarge { summary } | Self::Resolved { summary, .. } => summary,
        }
    }
}

/// Resolve a grapple or shove attempt
pub fn resolve_contest(
    kind: ContestKind,
    input: &ContestInput<'_>,
    roller: &mut dyn DiceRoller,
) -> ContestOutcome {
    let attacker = input.attacker;
    let target = input.target;

    if !attacker.size_category.can_contest(target.size_category) {
        return ContestOutcome::TooLarge {
            summary: format!(
                "{} cannot {} {}: more than one size category larger",
                attacker.name,
                kind.verb(),
                target.name
            ),
        };
    }

    let dc = 8 + ability_modifier(input.attacker_str_score) + input.proficiency_bonus;
    let target_roll = roller.roll_d20(
        input.target_contest_bonus,
        RollOptions::labeled(format!("{} contest", kind.verb())),
    );

    // A tie or better for the target defeats the attempt
    let success = target_roll.total < dc;

    let requested = if success {
        match kind {
            ContestKind::Grapple => Some(StateChange::AddCondition {
                target: target.entity_id,
                instance: ConditionInstance::permanent(Condition::Grappled)
                    .with_source(attacker.name.clone()),
            }),
            ContestKind::ShoveProne => Some(StateChange::AddCondition {
                target: target.entity_id,
                instance: ConditionInstance::permanent(Condition::Prone)
                    .with_source(attacker.name.clone()),
            }),
            ContestKind::ShovePush => Some(StateChange::ForcedMove {
                target: target.entity_id,
                away_from: attacker.position(),
                feet: 5,
            }),
        }
    } else {
        None
    };

    let effect = match (kind, success) {
        (ContestKind::Grapple, true) => "target is grappled".to_string(),
        (ContestKind::ShoveProne, true) => "target is knocked prone".to_string(),
        (ContestKind::ShovePush, true) => "target is pushed 5 feet".to_string(),
        (_, false) => "target holds firm".to_string(),
    };
    let summary = format!(
        "{} attempts to {} {} (DC {}): target rolled {} - {}",
        attacker.name,
        kind.verb(),
        target.name,
        dc,
        target_roll.total,
        effect
    );

    ContestOutcome::Resolved {
        success,
        dc,
        target_roll,
        requested,
        summary,
    }
}
