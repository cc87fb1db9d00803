//! The contract every arithmetic method implements.

use crate::model::{CalculationResult, MethodMetadata};
use crate::verify::Tolerance;

/// A canned pair of operands that shows a method at its best.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Example {
    /// First operand.
    pub num1: f64,
    /// Second operand.
    pub num2: f64,
    /// Why these operands were chosen.
    pub description: &'static str,
}

/// Outcome of a method's precondition check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Validation {
    /// Whether `calculate` may be invoked.
    pub valid: bool,
    /// Explanation; empty when valid.
    pub message: String,
}

impl Validation {
    /// Accepts the operands.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// Rejects the operands with a message for the user.
    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// Chains another check, keeping the first rejection.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Validation) -> Self {
        if self.valid {
            next()
        } else {
            self
        }
    }
}

/// A named, explainable arithmetic algorithm.
///
/// Implementations are stateless apart from construction-time configuration
/// (tolerances, iteration caps), so `calculate` is a pure function of its
/// operands and a registry of methods can be shared between threads.
///
/// `calculate` may assume operands that passed [`validate`](Self::validate),
/// but must not panic on anything else: out-of-domain operands produce
/// [`CalculationResult::unsupported`] or another trace flagged incorrect.
pub trait ArithmeticMethod: Send + Sync {
    /// Static descriptor of the method.
    fn metadata(&self) -> &'static MethodMetadata;

    /// Operands well suited to demonstrate the method.
    fn example(&self) -> Example;

    /// Domain-specific precondition check. Never panics.
    fn validate(&self, num1: f64, num2: f64) -> Validation;

    /// Runs the algorithm, producing a trace and a verified answer.
    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult;

    /// Tolerance used to verify this method's answers.
    fn tolerance(&self) -> Tolerance {
        Tolerance::Exact
    }

    /// Shorthand for `metadata().id`.
    fn id(&self) -> &'static str {
        self.metadata().id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn and_then_keeps_first_rejection() {
        let v = Validation::reject("first").and_then(|| Validation::reject("second"));
        assert_eq!(v.message, "first");
        assert!(!v.valid);

        let v = Validation::ok().and_then(|| Validation::reject("second"));
        assert_eq!(v.message, "second");

        assert!(Validation::ok().and_then(Validation::ok).valid);
    }
}
