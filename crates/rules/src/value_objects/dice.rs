//! Dice value objects
//!
//! Parsed dice formulas like "1d20+5" or "2d6-1", and the d20 roll result
//! the resolvers consume. The core never rolls dice itself: every `D20Roll`
//! comes in through the [`DiceRoller`](crate::ports::DiceRoller) port.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8, modifier: i32) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Parse a dice formula string like "1d20+5", "2d6-1", "1d100"
    ///
    /// Supported formats:
    /// - "XdY" - Roll X dice of size Y
    /// - "XdY+Z" / "XdY-Z" - with a flat modifier
    /// - "dY" - shorthand for 1dY
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        // Parsed by hand to keep regex out of the rules core
        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let dice_count_str = &input[..d_pos];
        let dice_count: u8 = if dice_count_str.is_empty() {
            1 // "d20" means "1d20"
        } else {
            dice_count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", dice_count_str))
            })?
        };

        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }

        let after_d = &input[d_pos + 1..];

        // Find modifier separator (+ or -)
        let (die_size_str, modifier) = if let Some(plus_pos) = after_d.find('+') {
            let die_str = &after_d[..plus_pos];
            let mod_str = &after_d[plus_pos + 1..];
            let modifier: i32 = mod_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '+{}'", mod_str))
            })?;
            (die_str, modifier)
        } else if let Some(minus_pos) = after_d.rfind('-') {
            if minus_pos == 0 {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Invalid die size: '{}'",
                    after_d
                )));
            }
            let die_str = &after_d[..minus_pos];
            let mod_str = &after_d[minus_pos + 1..];
            let modifier: i32 = mod_str.parse::<i32>().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid modifier: '-{}'", mod_str))
            })?;
            (die_str, -modifier)
        } else {
            (after_d, 0)
        };

        let die_size: u8 = die_size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", die_size_str))
        })?;

        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }

        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Return a copy with the leading dice count multiplied
    ///
    /// Used by cantrip scaling; saturates at the u8 maximum.
    pub fn with_dice_count_scaled(&self, factor: u8) -> Self {
        Self {
            dice_count: self.dice_count.saturating_mul(factor),
            die_size: self.die_size,
            modifier: self.modifier,
        }
    }

    /// Get the minimum possible roll
    pub fn min_roll(&self) -> i32 {
        self.dice_count as i32 + self.modifier
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (self.dice_count as i32 * self.die_size as i32) + self.modifier
    }

    /// Format as a display string (e.g., "1d20+5")
    pub fn display(&self) -> String {
        if self.modifier == 0 {
            format!("{}d{}", self.dice_count, self.die_size)
        } else if self.modifier > 0 {
            format!("{}d{}+{}", self.dice_count, self.die_size, self.modifier)
        } else {
            format!("{}d{}{}", self.dice_count, self.die_size, self.modifier)
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Result of a d20 roll, produced by the dice port
///
/// Immutable once produced. `rolls` holds every die that hit the table, so
/// an advantage roll carries both d20s even though only one counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct D20Roll {
    /// Modifier that was added to the kept die
    pub modifier: i32,
    /// Individual die results, in the order rolled
    pub rolls: Vec<i32>,
    /// Final total (kept die + modifier)
    pub total: i32,
    /// The kept die came up 20
    pub natural20: bool,
    /// The kept die came up 1
    pub natural1: bool,
}

impl D20Roll {
    /// Build a result from the kept die and the full set of rolled dice
    pub fn from_kept_die(kept: i32, rolls: Vec<i32>, modifier: i32) -> Self {
        Self {
            modifier,
            rolls,
            total: kept + modifier,
            natural20: kept == 20,
            natural1: kept == 1,
        }
    }

    /// A zero-value stand-in for outcomes that never reached the dice
    pub fn placeholder() -> Self {
        Self {
            modifier: 0,
            rolls: vec![],
            total: 0,
            natural20: false,
            natural1: false,
        }
    }

    /// True if no dice were actually rolled
    pub fn is_placeholder(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Format as a breakdown string (e.g., "d20[14] + 5 = 19")
    pub fn breakdown(&self) -> String {
        if self.is_placeholder() {
            return format!("no roll = {}", self.total);
        }
        let rolls_str: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        if self.modifier == 0 {
            format!("d20[{}] = {}", rolls_str.join(", "), self.total)
        } else if self.modifier > 0 {
            format!(
                "d20[{}] + {} = {}",
                rolls_str.join(", "),
                self.modifier,
                self.total
            )
        } else {
            format!(
                "d20[{}] - {} = {}",
                rolls_str.join(", "),
                -self.modifier,
                self.total
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_d20() {
        let formula = DiceFormula::parse("1d20").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 20);
        assert_eq!(formula.modifier, 0);
    }

    #[test]
    fn test_parse_shorthand() {
        let formula = DiceFormula::parse("d8").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 8);
    }

    #[test]
    fn test_parse_with_positive_modifier() {
        let formula = DiceFormula::parse("1d10+5").unwrap();
        assert_eq!(formula.die_size, 10);
        assert_eq!(formula.modifier, 5);
    }

    #[test]
    fn test_parse_with_negative_modifier() {
        let formula = DiceFormula::parse("2d6-1").unwrap();
        assert_eq!(formula.dice_count, 2);
        assert_eq!(formula.modifier, -1);
    }

    #[test]
    fn test_parse_case_insensitive_with_whitespace() {
        let formula = DiceFormula::parse("  1D20+5 ").unwrap();
        assert_eq!(formula.die_size, 20);
        assert_eq!(formula.modifier, 5);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DiceFormula::parse(""), Err(DiceParseError::Empty)));
    }

    #[test]
    fn test_parse_invalid_no_d() {
        assert!(matches!(
            DiceFormula::parse("20"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DiceFormula::parse("0d20"),
            Err(DiceParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_invalid_die_size() {
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
    }

    #[test]
    fn test_scaled_dice_count() {
        let formula = DiceFormula::parse("1d10+5").unwrap();
        let scaled = formula.with_dice_count_scaled(3);
        assert_eq!(scaled.display(), "3d10+5");
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceFormula::new(1, 20, 0).unwrap().display(), "1d20");
        assert_eq!(DiceFormula::new(1, 20, 5).unwrap().display(), "1d20+5");
        assert_eq!(DiceFormula::new(2, 6, -3).unwrap().display(), "2d6-3");
    }

    #[test]
    fn test_min_max_roll() {
        let formula = DiceFormula::parse("2d6+3").unwrap();
        assert_eq!(formula.min_roll(), 5);
        assert_eq!(formula.max_roll(), 15);
    }

    #[test]
    fn test_d20_roll_natural_20() {
        let roll = D20Roll::from_kept_die(20, vec![20], 5);
        assert!(roll.natural20);
        assert!(!roll.natural1);
        assert_eq!(roll.total, 25);
    }

    #[test]
    fn test_d20_roll_advantage_keeps_both_dice() {
        let roll = D20Roll::from_kept_die(17, vec![3, 17], 2);
        assert_eq!(roll.rolls, vec![3, 17]);
        assert_eq!(roll.total, 19);
    }

    #[test]
    fn test_d20_roll_placeholder() {
        let roll = D20Roll::placeholder();
        assert!(roll.is_placeholder());
        assert_eq!(roll.total, 0);
        assert_eq!(roll.breakdown(), "no roll = 0");
    }

    #[test]
    fn test_breakdown_with_modifier() {
        let roll = D20Roll::from_kept_die(14, vec![14], 5);
        assert_eq!(roll.breakdown(), "d20[14] + 5 = 19");
    }

    #[test]
    fn test_serde_roundtrip() {
        let roll = D20Roll::from_kept_die(11, vec![11], -2);
        let json = serde_json::to_string(&roll).unwrap();
        let back: D20Roll = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roll);
    }
}
