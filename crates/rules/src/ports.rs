//! Boundary contracts the rules core depends on
//!
//! The core never generates randomness and never mutates shared state. Dice
//! come in through [`DiceRoller`]; requested mutations and log entries go
//! back out through the caller, which pushes them into a [`CombatSink`].

use crate::events::{CombatLogEntry, StateChange};
use crate::value_objects::D20Roll;

/// Options for a single d20 roll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollOptions {
    /// Roll two d20s, keep the higher
    pub advantage: bool,
    /// Roll two d20s, keep the lower
    pub disadvantage: bool,
    /// Human-readable label for the roll (e.g., "Death Save")
    pub label: Option<String>,
    /// Suppress the broadcast of this roll
    pub silent: bool,
}

impl RollOptions {
    pub fn advantage() -> Self {
        Self {
            advantage: true,
            ..Self::default()
        }
    }

    pub fn disadvantage() -> Self {
        Self {
            disadvantage: true,
            ..Self::default()
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The dice contract
///
/// Implementations own the randomness (or the scripted sequence, in tests).
/// Advantage and disadvantage that are both set cancel: implementations
/// roll a single die.
pub trait DiceRoller {
    /// Roll a d20 with the given modifier and options
    fn roll_d20(&mut self, modifier: i32, options: RollOptions) -> D20Roll;
}

/// The shared-state write contract
///
/// Resolvers only *request* changes in their results; the caller applies
/// them through this sink, keeping single-writer discipline outside the
/// core.
pub trait CombatSink {
    /// Apply a requested state mutation
    fn apply(&mut self, change: StateChange);

    /// Append a structured combat-log entry
    fn log(&mut self, entry: CombatLogEntry);

    /// Broadcast a plain-text summary to all participants
    ///
    /// Fire-and-forget; `secret` suppresses delivery to players.
    fn broadcast(&mut self, message: &str, secret: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_options_builders() {
        let opts = RollOptions::advantage().with_label("Athletics");
        assert!(opts.advantage);
        assert!(!opts.disadvantage);
        assert_eq!(opts.label.as_deref(), Some("Athletics"));
        assert!(!opts.silent);
    }

    #[test]
    fn test_default_roll_options_are_plain() {
        let opts = RollOptions::default();
        assert!(!opts.advantage && !opts.disadvantage && !opts.silent);
        assert!(opts.label.is_none());
    }
}
