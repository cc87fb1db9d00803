//! Kahan compensated summation.
//!
//! Floating-point addition rounds away low-order bits. Kahan's algorithm
//! keeps those bits in a running `compensation` and feeds them back into the
//! next addend. For every input:
//!
//! ```text
//! y            = input - compensation
//! t            = sum + y
//! compensation = (t - sum) - y
//! sum          = t
//! ```
//!
//! The order matters: computing `(t - sum) - y` after `t` has been rounded is
//! what recovers the lost bits. Each of the four assignments is its own step.

use crate::digits;
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};
use crate::verify::{exact_sum, Tolerance, DEFAULT_EPSILON};

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 3,
    origin: Origin {
        culture: "Computer science",
        time_period: "1965",
        description: "Published by William Kahan, later a principal architect of the IEEE 754 \
                      floating-point standard.",
    },
    when_to_use: &[
        "Summing many floating-point values",
        "Totals where rounding drift must stay bounded",
    ],
    advantages: &[
        "Error bound independent of the number of terms",
        "Only a few extra operations per term",
    ],
    disadvantages: &[
        "Aggressive compiler reassociation can optimise the compensation away",
        "No benefit for exact integer sums",
    ],
    speed: Speed::Fast,
    math_principle: "Every rounded floating-point sum t = fl(sum + y) differs from the exact sum \
                     by an error that is itself representable; (t - sum) - y computes that error \
                     exactly, and subtracting it from the next addend puts the lost bits back.",
    related_methods: &["standard"],
    time_complexity: "O(n) for n terms",
    recommended_use: "Accumulating long lists of decimals such as measurements or money",
    alternative: "standard",
    ..MethodMetadata::new("kahan", "Kahan Summation", Category::Computer)
};

/// Compensated floating-point summation.
#[derive(Debug, Clone, Copy)]
pub struct KahanSummation {
    tolerance: Tolerance,
}

impl KahanSummation {
    /// Kahan summation verified with the given tolerance.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Sums an arbitrary list of terms with one step per Kahan assignment.
    ///
    /// Verification compares against the correctly rounded sum from
    /// [`exact_sum`], so compensation that recovers bits a plain
    /// left-to-right sum would drop counts as correct.
    #[must_use]
    pub fn calculate_multiple(&self, values: &[f64]) -> CalculationResult {
        let num1 = values.first().copied().unwrap_or(0.0);
        let num2 = values.get(1).copied().unwrap_or(0.0);
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                format!("Kahan summation needs finite numbers; got {bad}."),
            );
        }

        let mut trace = Trace::new();
        trace.push(
            Step::info("Why compensate?")
                .describe(format!("Add {} floating-point numbers without losing the rounding error", values.len()))
                .explain(
                    "Computers store decimals in binary, so values like 0.1 are slightly off. \
                     Kahan summation remembers the error from each addition and corrects for it.",
                ),
        );
        trace.push(
            Step::input("Start the accumulators")
                .describe("Begin with an empty sum and no stored error")
                .calc("sum = 0, compensation = 0")
                .value(StepValue::record([("sum", 0.0), ("compensation", 0.0)])),
        );

        let mut sum = 0.0f64;
        let mut compensation = 0.0f64;
        for (index, &input) in values.iter().enumerate() {
            let term = index + 1;

            let y = input - compensation;
            trace.push(
                Step::calculation(format!("Term {term}: correct the input"))
                    .describe("Subtract the error stored from the previous addition")
                    .calc(format!("y = {input} - {compensation} = {y}"))
                    .value(StepValue::record([("y", y)])),
            );

            let t = sum + y;
            trace.push(
                Step::calculation(format!("Term {term}: add"))
                    .describe("Add the corrected input to the running sum; this is where rounding happens")
                    .calc(format!("t = {sum} + {y} = {t}"))
                    .value(StepValue::record([("t", t)])),
            );

            let next_compensation = (t - sum) - y;
            trace.push(
                Step::calculation(format!("Term {term}: measure the rounding error"))
                    .describe("Recover what the addition actually added and compare it with y")
                    .calc(format!("compensation = ({t} - {sum}) - {y} = {next_compensation}"))
                    .value(StepValue::record([("compensation", next_compensation)]))
                    .explain(if next_compensation == 0.0 {
                        "No bits were lost in this addition."
                    } else {
                        "A tiny error was lost to rounding; it is subtracted from the next input."
                    }),
            );

            trace.push(
                Step::calculation(format!("Term {term}: update the sum"))
                    .describe("Keep the rounded total")
                    .calc(format!("sum = {t}"))
                    .value(StepValue::record([("sum", t), ("compensation", next_compensation)])),
            );

            sum = t;
            compensation = next_compensation;
        }

        trace.push(
            Step::result("Compensated sum")
                .describe("The running sum after every term has been added")
                .calc(format!("sum = {sum}"))
                .value(sum),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, sum)
            .verified(exact_sum(values), self.tolerance)
    }
}

impl Default for KahanSummation {
    fn default() -> Self {
        Self::new(Tolerance::Absolute(DEFAULT_EPSILON))
    }
}

impl ArithmeticMethod for KahanSummation {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 0.1,
            num2: 0.2,
            description: "0.1 + 0.2 exposes binary floating-point rounding",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_finite("first number", num1)
            .and_then(|| digits::require_finite("second number", num2))
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let mut result = self.calculate_multiple(&[num1, num2]);
        result.num1 = num1;
        result.num2 = num2;
        result
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::{Answer, StepKind};

    #[test]
    fn point_one_plus_point_two() {
        let result = KahanSummation::default().calculate(0.1, 0.2);
        let answer = result.answer().expect("numeric answer");
        assert!((answer - 0.3).abs() < 1e-9);
        assert_eq!(result.verification.correct, Some(true));
    }

    #[test]
    fn four_steps_per_term_in_order() {
        let result = KahanSummation::default().calculate(0.1, 0.2);
        let calcs: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(calcs.len(), 8);
        assert!(calcs[4].calculation.starts_with("y = 0.2 - 0 = 0.2"));
        assert!(calcs[5].calculation.starts_with("t = 0.1 + 0.2"));
        assert!(calcs[6].calculation.starts_with("compensation = "));
        assert!(calcs[7].calculation.starts_with("sum = "));
    }

    #[test]
    fn thousand_tenths_stay_accurate() {
        let values = vec![0.1; 1000];
        let result = KahanSummation::default().calculate_multiple(&values);
        let answer = result.answer().expect("numeric answer");
        assert!((answer - 100.0).abs() < 1e-9, "kahan gave {answer}");

        let naive: f64 = values.iter().sum();
        assert!((answer - 100.0).abs() <= (naive - 100.0).abs());
        assert!(result.is_correct());
    }

    #[test]
    fn compensation_recovers_what_the_plain_sum_drops() {
        let values = [1e16, 1.0, 1.0];
        let result = KahanSummation::default().calculate_multiple(&values);
        assert_eq!(result.answer(), Some(1e16 + 2.0));
        assert_eq!(result.verification.expected, Some(Answer::Number(1e16 + 2.0)));
        assert!(result.is_correct());

        let naive: f64 = values.iter().sum();
        assert_eq!(naive, 1e16);
    }

    #[test]
    fn catastrophic_cancellation_is_flagged() {
        // the first 1.0 is lost against 1e100 before compensation can hold it
        let result = KahanSummation::default().calculate_multiple(&[1.0, 1e100, 1.0, -1e100]);
        assert_eq!(result.verification.expected, Some(Answer::Number(2.0)));
        assert_eq!(result.verification.correct, Some(false));
    }

    #[test]
    fn empty_list_sums_to_zero() {
        let result = KahanSummation::default().calculate_multiple(&[]);
        assert_eq!(result.answer(), Some(0.0));
        assert!(result.is_correct());
    }

    #[test]
    fn non_finite_input_degrades() {
        let kahan = KahanSummation::default();
        assert!(!kahan.validate(f64::INFINITY, 1.0).valid);
        assert_eq!(kahan.calculate(f64::NAN, 1.0).verification.correct, Some(false));
    }
}
