//! Encounter state and result publication
//!
//! The encounter owns the authoritative token table for one fight and is
//! the single writer for it. Resolvers return requested changes; the
//! caller pushes them through [`publish`], which applies them here, appends
//! the log entry, and broadcasts the summary.

use std::collections::HashMap;

use battlemat_rules::{CombatLogEntry, CombatSink, EntityId, StateChange, Token};

/// Authoritative shared state for one encounter
#[derive(Debug, Default)]
pub struct Encounter {
    tokens: HashMap<EntityId, Token>,
    /// Active concentration by caster, naming the concentrated spell
    concentration: HashMap<EntityId, String>,
    log: Vec<CombatLogEntry>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token and return its entity id
    pub fn add_token(&mut self, token: Token) -> EntityId {
        let id = token.entity_id;
        self.tokens.insert(id, token);
        id
    }

    pub fn token(&self, id: EntityId) -> Option<&Token> {
        self.tokens.get(&id)
    }

    /// Record that a caster is concentrating on a spell
    pub fn set_concentration(&mut self, caster: EntityId, spell: impl Into<String>) {
        self.concentration.insert(caster, spell.into());
    }

    pub fn concentration(&self, caster: EntityId) -> Option<&str> {
        self.concentration.get(&caster).map(String::as_str)
    }

    pub fn log_entries(&self) -> &[CombatLogEntry] {
        &self.log
    }
}

impl CombatSink for Encounter {
    fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::AddCondition { target, instance } => {
                if let Some(token) = self.tokens.get_mut(&target) {
                    token.conditions.push(instance);
                } else {
                    tracing::warn!(%target, "condition request for unknown token");
                }
            }
            StateChange::RemoveCondition { target, condition } => {
                if let Some(token) = self.tokens.get_mut(&target) {
                    token.conditions.retain(|c| c.condition != condition);
                }
            }
            StateChange::ForcedMove {
                target,
                away_from,
                feet,
            } => {
                if let Some(token) = self.tokens.get_mut(&target) {
                    // Step directly away from the pusher, one cell per 5 ft
                    let dx = (token.grid_x - away_from.x).signum();
                    let dy = (token.grid_y - away_from.y).signum();
                    let cells = (feet / 5) as i32;
                    token.grid_x += dx * cells;
                    token.grid_y += dy * cells;
                }
            }
            StateChange::ClearConcentration { entity } => {
                if let Some(spell) = self.concentration.remove(&entity) {
                    tracing::debug!(%entity, spell, "concentration dropped");
                }
            }
        }
    }

    fn log(&mut self, entry: CombatLogEntry) {
        tracing::debug!(event = ?entry.event, "{}", entry.description);
        self.log.push(entry);
    }

    fn broadcast(&mut self, message: &str, secret: bool) {
        // Fire-and-forget: delivery never feeds back into resolution
        if secret {
            tracing::debug!(target: "battlemat::broadcast", "(secret) {message}");
        } else {
            tracing::info!(target: "battlemat::broadcast", "{message}");
        }
    }
}

/// Publish one resolver result through a sink
///
/// Applies every requested change, appends the log entry, and broadcasts
/// its description.
pub fn publish(
    sink: &mut dyn CombatSink,
    entry: CombatLogEntry,
    requested: impl IntoIterator<Item = StateChange>,
    secret: bool,
) {
    for change in requested {
        sink.apply(change);
    }
    let message = entry.description.clone();
    sink.log(entry);
    sink.broadcast(&message, secret);
}

#[cfg(test)]
mod tests {
    use super::*;
    use battlemat_rules::{
        resolve_contest, Condition, ConditionInstance, ContestInput, ContestKind, ContestOutcome,
        CombatEventType, CreatureSize, D20Roll, DiceRoller, GridPosition, RollOptions,
    };

    struct Scripted(Vec<i32>);

    impl DiceRoller for Scripted {
        fn roll_d20(&mut self, modifier: i32, _options: RollOptions) -> D20Roll {
            let die = self.0.remove(0);
            D20Roll::from_kept_die(die, vec![die], modifier)
        }
    }

    #[test]
    fn test_grapple_round_trip_applies_condition() {
        let mut encounter = Encounter::new();
        let attacker = encounter.add_token(Token::new("Grog", 0, 0));
        let target = encounter.add_token(
            Token::new("Goblin", 1, 0).with_size(CreatureSize::Small, 1, 1),
        );

        let attacker_token = encounter.token(attacker).cloned().expect("attacker");
        let target_token = encounter.token(target).cloned().expect("target");
        let input = ContestInput {
            attacker: &attacker_token,
            target: &target_token,
            attacker_str_score: 16,
            proficiency_bonus: 3,
            target_contest_bonus: 0,
        };
        let outcome = resolve_contest(ContestKind::Grapple, &input, &mut Scripted(vec![5]));
        let ContestOutcome::Resolved {
            requested, summary, ..
        } = outcome
        else {
            panic!("expected resolved outcome");
        };

        publish(
            &mut encounter,
            CombatLogEntry::new(CombatEventType::Grapple, summary)
                .with_source(attacker)
                .with_target(target),
            requested,
            false,
        );

        let goblin = encounter.token(target).expect("goblin");
        assert!(goblin
            .conditions
            .iter()
            .any(|c| c.condition == Condition::Grappled));
        assert_eq!(encounter.log_entries().len(), 1);
    }

    #[test]
    fn test_forced_move_steps_away_from_pusher() {
        let mut encounter = Encounter::new();
        let target = encounter.add_token(Token::new("Goblin", 3, 3));
        encounter.apply(StateChange::ForcedMove {
            target,
            away_from: GridPosition::new(2, 3),
            feet: 5,
        });
        let goblin = encounter.token(target).expect("goblin");
        assert_eq!((goblin.grid_x, goblin.grid_y), (4, 3));
    }

    #[test]
    fn test_remove_condition_clears_every_instance() {
        let mut encounter = Encounter::new();
        let target = encounter.add_token(Token::new("Goblin", 0, 0).with_conditions(vec![
            ConditionInstance::permanent(Condition::Grappled).with_source("Grog"),
            ConditionInstance::permanent(Condition::Prone),
        ]));
        encounter.apply(StateChange::RemoveCondition {
            target,
            condition: Condition::Grappled,
        });
        let goblin = encounter.token(target).expect("goblin");
        assert_eq!(goblin.conditions.len(), 1);
        assert_eq!(goblin.conditions[0].condition, Condition::Prone);
    }

    #[test]
    fn test_clear_concentration() {
        let mut encounter = Encounter::new();
        let caster = encounter.add_token(Token::new("Pike", 0, 0));
        encounter.set_concentration(caster, "Bless");
        assert_eq!(encounter.concentration(caster), Some("Bless"));

        encounter.apply(StateChange::ClearConcentration { entity: caster });
        assert_eq!(encounter.concentration(caster), None);
    }

    mod sink_contract {
        use super::*;
        use mockall::mock;
        use mockall::predicate::eq;

        mock! {
            Sink {}
            impl CombatSink for Sink {
                fn apply(&mut self, change: StateChange);
                fn log(&mut self, entry: CombatLogEntry);
                fn broadcast(&mut self, message: &str, secret: bool);
            }
        }

        #[test]
        fn test_publish_applies_then_logs_then_broadcasts() {
            let mut sink = MockSink::new();
            let target = EntityId::new();
            let change = StateChange::ClearConcentration { entity: target };
            sink.expect_apply().with(eq(change.clone())).times(1).return_const(());
            sink.expect_log().times(1).return_const(());
            sink.expect_broadcast()
                .withf(|message, secret| message.contains("broken") && !secret)
                .times(1)
                .return_const(());

            publish(
                &mut sink,
                CombatLogEntry::new(CombatEventType::Concentration, "Pike: concentration broken"),
                vec![change],
                false,
            );
        }

        #[test]
        fn test_publish_forwards_secret_flag() {
            let mut sink = MockSink::new();
            sink.expect_log().times(1).return_const(());
            sink.expect_broadcast()
                .withf(|_, secret| *secret)
                .times(1)
                .return_const(());

            publish(
                &mut sink,
                CombatLogEntry::new(CombatEventType::Attack, "hidden strike"),
                vec![],
                true,
            );
        }
    }
}
