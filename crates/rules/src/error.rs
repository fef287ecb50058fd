//! Unified error type for the rules core
//!
//! Expected game situations (exhausted pools, too-large grapple targets,
//! missing spell slots) are modeled as result variants on the individual
//! resolvers, never as errors. This type only covers programmer-error
//! validation such as malformed dice formulas or negative grid dimensions.

use thiserror::Error;

use crate::value_objects::DiceParseError;

/// Error type for rules-core operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RulesError {
    /// Create a validation error for violated invariants
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error for string-to-type conversion failures
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<DiceParseError> for RulesError {
    fn from(err: DiceParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = RulesError::validation("grid width must be positive");
        assert!(matches!(err, RulesError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: grid width must be positive"
        );
    }

    #[test]
    fn test_from_dice_parse_error() {
        let dice_err = DiceParseError::Empty;
        let rules_err: RulesError = dice_err.into();
        assert!(matches!(rules_err, RulesError::Parse(_)));
        assert!(rules_err.to_string().contains("Empty dice formula"));
    }
}
