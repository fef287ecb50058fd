//! Combat events and requested state changes
//!
//! Resolvers return these instead of touching shared state. The host layer
//! decides when (and whether) to apply them, which keeps every resolver
//! replayable from its inputs.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value_objects::{Condition, ConditionInstance, GridPosition};

/// Category of a combat-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatEventType {
    Attack,
    Grapple,
    Shove,
    DeathSave,
    Concentration,
    Movement,
    SpellCast,
    Damage,
}

/// A structured combat-log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatLogEntry {
    pub event: CombatEventType,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    /// Numeric payload where one applies (damage dealt, DC, feet moved)
    pub value: Option<i32>,
    pub description: String,
}

impl CombatLogEntry {
    pub fn new(event: CombatEventType, description: impl Into<String>) -> Self {
        Self {
            event,
            source: None,
            target: None,
            value: None,
            description: description.into(),
        }
    }

    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }
}

/// A state mutation a resolver asks the caller to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum StateChange {
    /// Add a condition to an entity
    AddCondition {
        target: EntityId,
        instance: ConditionInstance,
    },
    /// Remove every instance of a condition from an entity
    RemoveCondition {
        target: EntityId,
        condition: Condition,
    },
    /// Push an entity the given distance directly away from a point
    ForcedMove {
        target: EntityId,
        away_from: GridPosition,
        feet: u32,
    },
    /// Drop an entity's concentration on its active spell
    ClearConcentration { entity: EntityId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Condition;

    #[test]
    fn test_log_entry_builders() {
        let source = EntityId::new();
        let target = EntityId::new();
        let entry = CombatLogEntry::new(CombatEventType::Grapple, "Grog grapples the goblin")
            .with_source(source)
            .with_target(target)
            .with_value(14);
        assert_eq!(entry.source, Some(source));
        assert_eq!(entry.target, Some(target));
        assert_eq!(entry.value, Some(14));
    }

    #[test]
    fn test_state_change_serde_is_tagged() {
        let change = StateChange::RemoveCondition {
            target: EntityId::new(),
            condition: Condition::Grappled,
        };
        let json = serde_json::to_string(&change).unwrap();
        assert!(json.contains("\"type\":\"removeCondition\""));
        let back: StateChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, change);
    }
}
