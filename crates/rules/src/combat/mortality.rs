//! Death saves and concentration
//!
//! Two small state machines. Death saves run on the dying entity's turn
//! start, with a separate entry point for damage taken while already at 0
//! HP. Concentration checks fire whenever a concentrating caster takes
//! damage and are never secret.

use serde::{Deserialize, Serialize};

use crate::events::StateChange;
use crate::ids::EntityId;
use crate::ports::{DiceRoller, RollOptions};
use crate::value_objects::D20Roll;

/// Running death-save tally for a dying entity
///
/// Both counters are clamped to 0..=3. The state resets to zero on
/// stabilization, revival, or healing above 0 HP; the caller owns that
/// reset along with the HP change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathSaveState {
    successes: u8,
    failures: u8,
}

impl DeathSaveState {
    /// A fresh tally (0 successes, 0 failures)
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct from stored counters, clamped to the legal range
    pub fn from_counts(successes: u8, failures: u8) -> Self {
        Self {
            successes: successes.min(3),
            failures: failures.min(3),
        }
    }

    pub fn successes(&self) -> u8 {
        self.successes
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    fn with_successes(self, added: u8) -> Self {
        Self {
            successes: (self.successes + added).min(3),
            failures: self.failures,
        }
    }

    fn with_failures(self, added: u8) -> Self {
        Self {
            successes: self.successes,
            failures: (self.failures + added).min(3),
        }
    }
}

/// Where the death-save machine landed after one event
///
/// A single discriminant: the four outcomes are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum DeathSaveOutcome {
    /// Still dying; carry the updated tally forward
    Continue(DeathSaveState),
    /// Three successes: stable at 0 HP until healed
    Stabilized,
    /// Three failures, or massive damage
    Dead,
    /// Natural 20: back up with 1 HP (the caller applies the HP change)
    Revived,
}

/// Result of one death-save roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathSaveResult {
    pub roll: D20Roll,
    pub outcome: DeathSaveOutcome,
    pub summary: String,
}

/// Roll a turn-start death save
///
/// Unmodified d20. Natural 20 revives with 1 HP; natural 1 counts as two
/// failures; 10 or better is a success; anything else is a failure.
pub fn roll_death_save(
    name: &str,
    state: DeathSaveState,
    roller: &mut dyn DiceRoller,
) -> DeathSaveResult {
    let roll = roller.roll_d20(0, RollOptions::labeled("Death Save"));

    let (outcome, note) = if roll.natural20 {
        (DeathSaveOutcome::Revived, "regains 1 hit point".to_string())
    } else if roll.natural1 {
        settle(state.with_failures(2), "two failures".to_string())
    } else if roll.total >= 10 {
        settle(state.with_successes(1), "success".to_string())
    } else {
        settle(state.with_failures(1), "failure".to_string())
    };

    let summary = format!(
        "{} death save: {} - {}",
        name,
        roll.breakdown(),
        note
    );
    DeathSaveResult {
        roll,
        outcome,
        summary,
    }
}

/// Resolve damage taken while already at 0 HP
///
/// Not a death save: no dice are rolled. Damage adds one failure, a
/// critical hit adds two, and a single hit of `max_hp` or more is instant
/// death regardless of the running tally.
pub fn damage_while_down(
    name: &str,
    state: DeathSaveState,
    damage: i32,
    critical: bool,
    max_hp: i32,
) -> DeathSaveResult {
    let (outcome, note) = if damage >= max_hp {
        (
            DeathSaveOutcome::Dead,
            "massive damage - instant death".to_string(),
        )
    } else if critical {
        settle(state.with_failures(2), "critical hit, two failures".to_string())
    } else {
        settle(state.with_failures(1), "one failure".to_string())
    };

    let summary = format!(
        "{} takes {} damage while down: {}",
        name, damage, note
    );
    DeathSaveResult {
        roll: D20Roll::placeholder(),
        outcome,
        summary,
    }
}

/// Apply the terminal thresholds to an updated tally
fn settle(state: DeathSaveState, note: String) -> (DeathSaveOutcome, String) {
    if state.failures() >= 3 {
        (DeathSaveOutcome::Dead, format!("{} (third failure)", note))
    } else if state.successes() >= 3 {
        (
            DeathSaveOutcome::Stabilized,
            format!("{} (third success)", note),
        )
    } else {
        (
            DeathSaveOutcome::Continue(state),
            format!(
                "{} ({} successes / {} failures)",
                note,
                state.successes(),
                state.failures()
            ),
        )
    }
}

/// Result of a concentration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationCheck {
    pub dc: i32,
    pub roll: D20Roll,
    pub maintained: bool,
    /// Present on failure: drop the caster's concentration target
    pub requested: Option<StateChange>,
    pub summary: String,
}

/// Roll a concentration check after taking damage
///
/// DC is half the damage, floored, with a minimum of 10. Concentration
/// checks are always public: the roll is never flagged silent.
pub fn concentration_check(
    entity: EntityId,
    name: &str,
    damage: i32,
    con_save_modifier: i32,
    advantage: bool,
    roller: &mut dyn DiceRoller,
) -> ConcentrationCheck {
    let dc = (damage / 2).max(10);
    let mut options = RollOptions::labeled("Concentration");
    options.advantage = advantage;
    options.silent = false;
    let roll = roller.roll_d20(con_save_modifier, options);

    let maintained = roll.total >= dc;
    let requested = if maintained {
        None
    } else {
        Some(StateChange::ClearConcentration { entity })
    };
    let summary = format!(
        "{} concentration check (DC {}): {} - {}",
        name,
        dc,
        roll.breakdown(),
        if maintained {
            "concentration holds"
        } else {
            "concentration broken"
        }
    );

    ConcentrationCheck {
        dc,
        roll,
        maintained,
        requested,
        summary,
    }
}
