//! Combat conditions
//!
//! Conditions are a closed enum rather than free-form strings, so a typo in
//! a condition name is a compile error instead of a silently inert debuff.
//! Parsing stays case-insensitive for host layers that read player input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// The closed set of conditions the resolvers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Exhaustion,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    /// Conditions that stop the bearer from taking actions at all
    pub fn prevents_acting(self) -> bool {
        matches!(
            self,
            Self::Incapacitated
                | Self::Paralyzed
                | Self::Petrified
                | Self::Stunned
                | Self::Unconscious
        )
    }

    /// Display name (e.g., "Paralyzed")
    pub fn name(self) -> &'static str {
        match self {
            Self::Blinded => "Blinded",
            Self::Charmed => "Charmed",
            Self::Deafened => "Deafened",
            Self::Exhaustion => "Exhaustion",
            Self::Frightened => "Frightened",
            Self::Grappled => "Grappled",
            Self::Incapacitated => "Incapacitated",
            Self::Invisible => "Invisible",
            Self::Paralyzed => "Paralyzed",
            Self::Petrified => "Petrified",
            Self::Poisoned => "Poisoned",
            Self::Prone => "Prone",
            Self::Restrained => "Restrained",
            Self::Stunned => "Stunned",
            Self::Unconscious => "Unconscious",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Condition {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blinded" => Ok(Self::Blinded),
            "charmed" => Ok(Self::Charmed),
            "deafened" => Ok(Self::Deafened),
            "exhaustion" => Ok(Self::Exhaustion),
            "frightened" => Ok(Self::Frightened),
            "grappled" => Ok(Self::Grappled),
            "incapacitated" => Ok(Self::Incapacitated),
            "invisible" => Ok(Self::Invisible),
            "paralyzed" => Ok(Self::Paralyzed),
            "petrified" => Ok(Self::Petrified),
            "poisoned" => Ok(Self::Poisoned),
            "prone" => Ok(Self::Prone),
            "restrained" => Ok(Self::Restrained),
            "stunned" => Ok(Self::Stunned),
            "unconscious" => Ok(Self::Unconscious),
            other => Err(RulesError::parse(format!("Unknown condition: {}", other))),
        }
    }
}

/// How long a condition lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionDuration {
    /// Lasts for a number of combat rounds
    Rounds(u32),
    /// Lasts for a number of in-game minutes
    Minutes(u32),
    /// Lasts until explicitly removed (escape, release, dispel)
    Permanent,
}

impl fmt::Display for ConditionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rounds(n) => write!(f, "{} round{}", n, if *n == 1 { "" } else { "s" }),
            Self::Minutes(n) => write!(f, "{} minute{}", n, if *n == 1 { "" } else { "s" }),
            Self::Permanent => write!(f, "until removed"),
        }
    }
}

/// A condition applied to a specific entity
///
/// `value` only carries meaning for Exhaustion (the level, 1-6); every other
/// condition is boolean presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionInstance {
    pub condition: Condition,
    /// Magnitude, used only by Exhaustion
    pub value: Option<u8>,
    pub duration: ConditionDuration,
    /// Name of whoever inflicted the condition, when known
    pub source: Option<String>,
}

impl ConditionInstance {
    /// A condition with no magnitude that lasts until removed
    pub fn permanent(condition: Condition) -> Self {
        Self {
            condition,
            value: None,
            duration: ConditionDuration::Permanent,
            source: None,
        }
    }

    /// Exhaustion at the given level, clamped to the legal 1-6 range
    pub fn exhaustion(level: u8) -> Self {
        Self {
            condition: Condition::Exhaustion,
            value: Some(level.clamp(1, 6)),
            duration: ConditionDuration::Permanent,
            source: None,
        }
    }

    /// Attach the inflicting entity's name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Restrict the duration
    pub fn with_duration(mut self, duration: ConditionDuration) -> Self {
        self.duration = duration;
        self
    }
}

/// Look up a condition in a set of instances
pub fn has_condition(conditions: &[ConditionInstance], condition: Condition) -> bool {
    conditions.iter().any(|c| c.condition == condition)
}

/// Current exhaustion level, 0 when absent
pub fn exhaustion_level(conditions: &[ConditionInstance]) -> u8 {
    conditions
        .iter()
        .filter(|c| c.condition == Condition::Exhaustion)
        .filter_map(|c| c.value)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            "PARALYZED".parse::<Condition>().unwrap(),
            Condition::Paralyzed
        );
        assert_eq!("prone".parse::<Condition>().unwrap(), Condition::Prone);
        assert_eq!(" Blinded ".parse::<Condition>().unwrap(), Condition::Blinded);
    }

    #[test]
    fn test_parse_unknown_condition() {
        let err = "hexed".parse::<Condition>().unwrap_err();
        assert!(err.to_string().contains("Unknown condition"));
    }

    #[test]
    fn test_prevents_acting() {
        assert!(Condition::Paralyzed.prevents_acting());
        assert!(Condition::Unconscious.prevents_acting());
        assert!(!Condition::Prone.prevents_acting());
        assert!(!Condition::Grappled.prevents_acting());
    }

    #[test]
    fn test_exhaustion_level_takes_highest() {
        let conditions = vec![
            ConditionInstance::exhaustion(2),
            ConditionInstance::exhaustion(3),
            ConditionInstance::permanent(Condition::Prone),
        ];
        assert_eq!(exhaustion_level(&conditions), 3);
    }

    #[test]
    fn test_exhaustion_clamps_to_legal_range() {
        assert_eq!(ConditionInstance::exhaustion(0).value, Some(1));
        assert_eq!(ConditionInstance::exhaustion(4).value, Some(4));
        assert_eq!(ConditionInstance::exhaustion(9).value, Some(6));
    }

    #[test]
    fn test_exhaustion_level_zero_when_absent() {
        let conditions = vec![ConditionInstance::permanent(Condition::Poisoned)];
        assert_eq!(exhaustion_level(&conditions), 0);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(ConditionDuration::Rounds(1).to_string(), "1 round");
        assert_eq!(ConditionDuration::Minutes(10).to_string(), "10 minutes");
        assert_eq!(ConditionDuration::Permanent.to_string(), "until removed");
    }

    #[test]
    fn test_instance_builders() {
        let grappled = ConditionInstance::permanent(Condition::Grappled).with_source("Grog");
        assert_eq!(grappled.condition, Condition::Grappled);
        assert_eq!(grappled.duration, ConditionDuration::Permanent);
        assert_eq!(grappled.source.as_deref(), Some("Grog"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&Condition::Unconscious).unwrap();
        assert_eq!(json, "\"unconscious\"");
    }
}
