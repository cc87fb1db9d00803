//! Long division, one dividend digit at a time.

use crate::digits::{self, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::require_divisor;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Intermediate,
    display_order: 1,
    origin: Origin {
        culture: "European arithmetic",
        time_period: "Henry Briggs, c. 1600",
        description: "The modern layout replaced the older galley method once paper became \
                      cheap enough to keep every partial remainder.",
    },
    when_to_use: &[
        "Dividing by multi-digit numbers on paper",
        "Finding a quotient and remainder together",
    ],
    advantages: &[
        "Works for divisors of any size",
        "Each step is checkable",
    ],
    disadvantages: &["Guessing each quotient digit can take trial and error"],
    speed: Speed::Slow,
    math_principle: "Bringing down one digit at a time keeps the working number below ten times \
                     the divisor, so each quotient digit is between 0 and 9. The invariant \
                     dividend = quotient × divisor + remainder holds after every step.",
    related_methods: &["vedic", "non-restoring", "synthetic"],
    time_complexity: "O(n) steps for an n-digit dividend",
    recommended_use: "General whole-number division by hand",
    alternative: "vedic",
    ..MethodMetadata::new("long-division", "Long Division", Category::Standard)
};

/// Digit-by-digit long division producing quotient and remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongDivision;

impl ArithmeticMethod for LongDivision {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 7825.0,
            num2: 25.0,
            description: "A two-digit divisor with a zero quotient digit",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_whole("dividend", num1, MAX_EXACT)
            .and_then(|| require_divisor(num2, MAX_EXACT))
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let (Some(a), Some(d)) = (digits::whole(num1, MAX_EXACT), digits::whole(num2, MAX_EXACT))
        else {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                "Long division needs a whole dividend and a whole divisor.",
            );
        };
        if d == 0 {
            return CalculationResult::unsupported(&METADATA, num1, num2, "Division by zero is undefined.");
        }

        let mut trace = Trace::new();
        trace.push(
            Step::info("Set up the division")
                .describe(format!("Divide {a} by {d}, working from the leftmost digit"))
                .calc(format!("{a} ÷ {d}"))
                .explain("Bring down one digit, see how many times the divisor fits, subtract, repeat."),
        );
        trace.push(
            Step::input("Dividend digits")
                .calc(digits::expanded(a))
                .value(StepValue::record([("digits", f64::from(digits::digit_count(a)))])),
        );

        let mut remainder = 0u64;
        let mut quotient_digits = Vec::new();
        for (n, &digit) in digits::digits(a).iter().rev().enumerate() {
            let working = remainder * 10 + u64::from(digit);
            let q = working / d;
            let taken = q * d;
            let left = working - taken;
            trace.push(
                Step::calculation(format!("Bring down {digit}"))
                    .describe(if n == 0 {
                        format!("Start with the first digit, {digit}")
                    } else {
                        format!("Remainder {remainder} with {digit} brought down gives {working}")
                    })
                    .calc(format!("{working} ÷ {d} = {q}; {working} - {taken} = {left}"))
                    .value(StepValue::record([
                        ("quotientDigit", q as f64),
                        ("remainder", left as f64),
                    ]))
                    .explain(if q == 0 {
                        format!("{d} does not fit into {working}: write 0 in the quotient.")
                    } else {
                        format!("{d} fits {q} time(s) into {working}.")
                    }),
            );
            quotient_digits.push(q as u8);
            remainder = left;
        }

        quotient_digits.reverse();
        let quotient = digits::from_digits(&quotient_digits);
        let answer = quotient as f64;
        trace.push(
            Step::result("Answer")
                .describe("Quotient, with the final remainder")
                .calc(format!("{a} ÷ {d} = {quotient} remainder {remainder}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer)
            .with_remainder(remainder as f64)
            .verified((a / d) as f64, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn quotient_and_remainder() {
        let result = LongDivision.calculate(7825.0, 25.0);
        assert_eq!(result.answer(), Some(313.0));
        assert_eq!(result.remainder, Some(0.0));
        assert!(result.is_correct());

        let result = LongDivision.calculate(100.0, 7.0);
        assert_eq!(result.answer(), Some(14.0));
        assert_eq!(result.remainder, Some(2.0));
        assert!(result.steps.iter().any(|s| s.calculation == "30 ÷ 7 = 4; 30 - 28 = 2"));
    }

    #[test]
    fn one_step_per_digit() {
        let result = LongDivision.calculate(123_456.0, 3.0);
        assert_eq!(result.steps.iter().filter(|s| s.title.starts_with("Bring down")).count(), 6);
    }

    #[test]
    fn divisor_larger_than_dividend() {
        let result = LongDivision.calculate(5.0, 9.0);
        assert_eq!(result.answer(), Some(0.0));
        assert_eq!(result.remainder, Some(5.0));
    }

    #[test]
    fn zero_divisor_is_rejected_and_degrades() {
        assert!(!LongDivision.validate(10.0, 0.0).valid);
        let result = LongDivision.calculate(10.0, 0.0);
        assert_eq!(result.verification.correct, Some(false));
        assert!(result.answer().is_some_and(f64::is_nan));
    }
}
