//! The four arithmetic operations methods are grouped under.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// Arithmetic operation a method implements.
///
/// Registry keys use this enum rather than strings, so an unknown operation
/// is rejected when it is parsed instead of producing an empty lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a × b`
    Multiplication,
    /// `a ÷ b` (and the division-family iterative methods)
    Division,
}

impl Operation {
    /// All operations in canonical order.
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Lowercase name used in configuration files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    /// Operator symbol used when rendering expressions.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" | "+" => Ok(Operation::Addition),
            "subtraction" | "sub" | "-" => Ok(Operation::Subtraction),
            "multiplication" | "mul" | "*" | "x" | "×" => Ok(Operation::Multiplication),
            "division" | "div" | "/" | "÷" => Ok(Operation::Division),
            _ => Err(Error::UnknownOperation(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("addition".parse::<Operation>(), Ok(Operation::Addition));
        assert_eq!(" Mul ".parse::<Operation>(), Ok(Operation::Multiplication));
        assert_eq!("/".parse::<Operation>(), Ok(Operation::Division));
        assert_eq!("-".parse::<Operation>(), Ok(Operation::Subtraction));
    }

    #[test]
    fn unknown_operation_is_an_error() {
        assert_eq!(
            "modulo".parse::<Operation>(),
            Err(Error::UnknownOperation("modulo".to_string()))
        );
    }

    #[test]
    fn display_matches_as_str() {
        for op in Operation::ALL {
            assert_eq!(op.to_string(), op.as_str());
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
    }
}
