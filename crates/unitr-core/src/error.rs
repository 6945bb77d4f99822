//! Error types for unit construction, navigation and arithmetic

use thiserror::Error;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, UnitError>;

/// Everything that can go wrong while building or combining units
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// No registered prefix has this base-10 exponent
    #[error("no SI prefix with exponent {0}")]
    UnknownPrefixExponent(i32),

    /// The text is not a symbol or name of any registered prefix
    #[error("unknown SI prefix: {0:?}")]
    UnknownPrefixAlias(String),

    /// Navigation stepped past the end of the prefix registry or a unit family
    #[error("{unit} has no {direction} unit")]
    NoAdjacentUnit {
        unit: String,
        direction: Direction,
    },

    /// Addition, subtraction or conversion between units of different dimensions
    #[error("incompatible units: {left} and {right}")]
    IncompatibleUnits { left: String, right: String },

    /// A unit string could not be parsed
    #[error("malformed unit string {input:?}: {reason}")]
    MalformedUnitString { input: String, reason: String },

    /// A value-with-unit string could not be parsed
    #[error("malformed expression string {input:?}: {reason}")]
    MalformedExpressionString { input: String, reason: String },
}

/// Direction of prefix navigation, reported by [`UnitError::NoAdjacentUnit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

impl UnitError {
    pub(crate) fn incompatible(left: impl ToString, right: impl ToString) -> Self {
        UnitError::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub(crate) fn no_adjacent(unit: impl ToString, direction: Direction) -> Self {
        UnitError::NoAdjacentUnit {
            unit: unit.to_string(),
            direction,
        }
    }

    pub(crate) fn malformed_unit(input: &str, reason: impl Into<String>) -> Self {
        UnitError::MalformedUnitString {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_expression(input: &str, reason: impl Into<String>) -> Self {
        UnitError::MalformedExpressionString {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UnitError::UnknownPrefixExponent(4).to_string(),
            "no SI prefix with exponent 4"
        );
        assert_eq!(
            UnitError::no_adjacent("Tm", Direction::Next).to_string(),
            "Tm has no next unit"
        );
        assert_eq!(
            UnitError::incompatible("m", "s").to_string(),
            "incompatible units: m and s"
        );
    }
}
