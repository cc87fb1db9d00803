//! The result envelope returned by every method's `calculate`.

use core::fmt;

use super::{MethodMetadata, Step, StepKind, Trace};
use crate::verify::{self, Tolerance};

/// A method's final answer: a number, or text for polynomial-form results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Answer {
    /// Numeric answer.
    Number(f64),
    /// Textual answer, e.g. a quotient polynomial.
    Text(String),
}

impl Answer {
    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(_) => None,
        }
    }

    /// The text, if this is a textual answer.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Number(_) => None,
            Answer::Text(t) => Some(t),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Text(t) => f.write_str(t),
        }
    }
}

impl From<f64> for Answer {
    fn from(value: f64) -> Self {
        Answer::Number(value)
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

/// Outcome of comparing a final answer with an independent ground truth.
///
/// Both fields are `None` until the verification layer has run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Verification {
    /// Ground truth computed without the method under test.
    pub expected: Option<Answer>,
    /// Whether the final answer matched within the method's tolerance.
    pub correct: Option<bool>,
}

/// Envelope produced by one `calculate` invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CalculationResult {
    /// Id of the method that produced this result.
    pub method: &'static str,
    /// Display name of the method.
    pub method_name: &'static str,
    /// First operand (augend, minuend, multiplicand, dividend or radicand).
    pub num1: f64,
    /// Second operand (addend, subtrahend, multiplier, divisor or seed).
    pub num2: f64,
    /// The explanatory trace.
    pub steps: Vec<Step>,
    /// The answer the method claims.
    pub final_answer: Answer,
    /// Remainder, for division methods that produce one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub remainder: Option<f64>,
    /// Asymptotic cost, as prose.
    pub time_complexity: &'static str,
    /// When to prefer this method.
    pub recommended_use: &'static str,
    /// Method to try next.
    pub alternative: &'static str,
    /// Cross-check against ground truth.
    pub verification: Verification,
}

impl CalculationResult {
    /// Wraps a finished trace. Verification starts unset.
    ///
    /// In debug builds this asserts the trace invariants: steps numbered
    /// `1..=n`, last step RESULT, RESULT value equal to `answer`.
    pub fn new(
        metadata: &'static MethodMetadata,
        num1: f64,
        num2: f64,
        trace: Trace,
        answer: impl Into<Answer>,
    ) -> Self {
        let steps = trace.into_steps();
        let final_answer = answer.into();
        debug_assert!(
            verify::check_trace(&steps, &final_answer).is_ok(),
            "method `{}` produced a malformed trace: {:?}",
            metadata.id,
            verify::check_trace(&steps, &final_answer)
        );
        Self {
            method: metadata.id,
            method_name: metadata.name,
            num1,
            num2,
            steps,
            final_answer,
            remainder: None,
            time_complexity: metadata.time_complexity,
            recommended_use: metadata.recommended_use,
            alternative: metadata.alternative,
            verification: Verification::default(),
        }
    }

    /// Best-effort envelope for operands the method cannot process.
    ///
    /// The trace explains the problem and ends with a NaN answer; the result
    /// is flagged incorrect so it cannot pass for a real calculation.
    pub fn unsupported(
        metadata: &'static MethodMetadata,
        num1: f64,
        num2: f64,
        reason: impl Into<String>,
    ) -> Self {
        let reason = reason.into();
        let mut trace = Trace::new();
        trace.push(
            Step::info("Input not supported")
                .describe(format!("{} cannot process {num1} and {num2}", metadata.name))
                .explain(reason),
        );
        trace.push(
            Step::result("No answer")
                .describe("The method stopped before calculating")
                .value(f64::NAN),
        );
        let mut result = Self::new(metadata, num1, num2, trace, f64::NAN);
        result.verification.correct = Some(false);
        result
    }

    /// Attaches a remainder.
    #[must_use]
    pub fn with_remainder(mut self, remainder: f64) -> Self {
        self.remainder = Some(remainder);
        self
    }

    /// Runs the verification layer against `expected`.
    #[must_use]
    pub fn verified(mut self, expected: impl Into<Answer>, tolerance: Tolerance) -> Self {
        self.verification = verify::verify(&self.final_answer, &expected.into(), tolerance);
        self
    }

    /// The numeric final answer, if any.
    #[must_use]
    pub fn answer(&self) -> Option<f64> {
        self.final_answer.as_number()
    }

    /// True if verification ran and succeeded.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.verification.correct == Some(true)
    }

    /// Steps of the given kind.
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::Category;

    static META: MethodMetadata = MethodMetadata {
        time_complexity: "O(1)",
        ..MethodMetadata::new("probe", "Probe", Category::Standard)
    };

    fn one_step(answer: f64) -> Trace {
        let mut trace = Trace::new();
        trace.push(Step::result("done").value(answer));
        trace
    }

    #[test]
    fn new_defaults_verification_and_copies_metadata() {
        let result = CalculationResult::new(&META, 1.0, 2.0, one_step(3.0), 3.0);
        assert_eq!(result.method, "probe");
        assert_eq!(result.method_name, "Probe");
        assert_eq!(result.time_complexity, "O(1)");
        assert_eq!(result.verification, Verification::default());
        assert_eq!(result.remainder, None);
        assert!(!result.is_correct());
    }

    #[test]
    fn verified_sets_expected_and_correct() {
        let result =
            CalculationResult::new(&META, 1.0, 2.0, one_step(3.0), 3.0).verified(3.0, Tolerance::Exact);
        assert_eq!(result.verification.expected, Some(Answer::Number(3.0)));
        assert_eq!(result.verification.correct, Some(true));
    }

    #[test]
    fn unsupported_is_flagged_incorrect() {
        let result = CalculationResult::new(&META, 0.0, 0.0, one_step(0.0), 0.0);
        assert!(result.answer().is_some());

        let degraded = CalculationResult::unsupported(&META, -1.0, 0.5, "negative operand");
        assert_eq!(degraded.verification.correct, Some(false));
        assert!(degraded.answer().is_some_and(f64::is_nan));
        assert_eq!(degraded.steps.len(), 2);
        assert_eq!(degraded.steps[1].kind, StepKind::Result);
    }

    #[test]
    fn answer_display() {
        assert_eq!(Answer::Number(432.0).to_string(), "432");
        assert_eq!(Answer::Text("x + 3".into()).to_string(), "x + 3");
    }
}
