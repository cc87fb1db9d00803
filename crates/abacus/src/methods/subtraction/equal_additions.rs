//! Equal additions (the Austrian method).
//!
//! When a top digit is too small, ten is added to it and, to compensate, one
//! is added to the *bottom* digit of the next column. Both numbers grow by
//! the same amount, so their difference is unchanged and no digit of the top
//! number is ever crossed out.

use crate::digits::{self, place_name, place_title, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Intermediate,
    display_order: 2,
    origin: Origin {
        culture: "European schools",
        time_period: "Common in Britain and Austria until the mid 20th century",
        description: "Taught widely before decomposition replaced it; still standard in parts \
                      of Europe and Latin America.",
    },
    when_to_use: &[
        "Subtracting across runs of zeros",
        "Mental subtraction by keeping the difference constant",
    ],
    advantages: &[
        "Never borrows from a zero",
        "Top number is never rewritten",
    ],
    disadvantages: &["The compensation step is less intuitive than borrowing"],
    speed: Speed::Moderate,
    math_principle: "a - b = (a + k) - (b + k). Adding ten ones to the top column and one ten to \
                     the bottom of the next column adds the same amount to both numbers.",
    related_methods: &["standard", "twos-complement"],
    time_complexity: "O(n) for n-digit operands",
    recommended_use: "Subtractions with many zeros in the top number",
    alternative: "standard",
    ..MethodMetadata::new("equal-additions", "Equal Additions", Category::Standard)
};

/// Austrian subtraction: pay back each borrowed ten on the bottom row.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualAdditions;

impl ArithmeticMethod for EqualAdditions {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 5003.0,
            num2: 1878.0,
            description: "Three zeros in a row would need a chain of borrows",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_whole("first number", num1, MAX_EXACT)
            .and_then(|| digits::require_whole("second number", num2, MAX_EXACT))
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let (Some(a), Some(b)) = (digits::whole(num1, MAX_EXACT), digits::whole(num2, MAX_EXACT))
        else {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                "Equal additions needs two whole numbers that are not negative.",
            );
        };

        let negative = a < b;
        let (big, small) = if negative { (b, a) } else { (a, b) };

        let mut trace = Trace::new();
        trace.push(
            Step::info("Keep the difference constant")
                .describe(format!("Subtract {small} from {big} column by column"))
                .calc(format!("{a} - {b}"))
                .explain(
                    "Adding the same amount to both numbers does not change their difference. \
                     Each time a column is too small, ten goes on top here and one goes on the \
                     bottom of the next column.",
                ),
        );
        if negative {
            trace.push(
                Step::info("Larger number on top")
                    .describe(format!("{a} is smaller than {b}, so work out {b} - {a} and make it negative"))
                    .calc(format!("{a} - {b} = -({b} - {a})")),
            );
        }
        trace.push(
            Step::input("Split into place values")
                .describe("Read each number as a sum of its columns")
                .calc(format!("{}; {}", digits::expanded(big), digits::expanded(small))),
        );

        let top = digits::digits(big);
        let bottom = digits::digits(small);
        let mut out = Vec::with_capacity(top.len());
        let mut pay_back = 0u8;
        for (i, &t) in top.iter().enumerate() {
            let u = bottom.get(i).copied().unwrap_or(0);
            let subtrahend = u + pay_back;
            let (working, added) = if t < subtrahend { (t + 10, 1u8) } else { (t, 0u8) };
            let digit = working - subtrahend;

            let lhs = if added > 0 { format!("(10 + {t})") } else { t.to_string() };
            let rhs = if pay_back > 0 { format!("({u} + 1)") } else { u.to_string() };
            let explanation = match (added > 0, pay_back > 0) {
                (true, _) => format!(
                    "{t} is smaller than {subtrahend}: add ten to this digit and one to the \
                     bottom digit in the {} column.",
                    place_name(i + 1)
                ),
                (false, true) => format!(
                    "The bottom digit carries the one added for the {} column.",
                    place_name(i.saturating_sub(1))
                ),
                (false, false) => format!("{t} is at least {u}: subtract directly."),
            };
            trace.push(
                Step::calculation(format!("{} column", place_title(i)))
                    .describe(format!("Subtract the {} digits", place_name(i)))
                    .calc(format!("{lhs} - {rhs} = {digit}"))
                    .value(StepValue::record([
                        ("digit", f64::from(digit)),
                        ("payBack", f64::from(added)),
                    ]))
                    .explain(explanation),
            );
            out.push(digit);
            pay_back = added;
        }

        let magnitude = digits::from_digits(&out) as f64;
        let answer = if negative { -magnitude } else { magnitude };
        trace.push(
            Step::result("Answer")
                .describe("Read the digits from left to right")
                .calc(format!("{a} - {b} = {answer}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer).verified(num1 - num2, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::StepKind;

    #[test]
    fn pays_back_on_the_bottom_row() {
        let result = EqualAdditions.calculate(5003.0, 1878.0);
        assert_eq!(result.answer(), Some(3125.0));
        assert!(result.is_correct());

        let columns: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(columns[0].calculation, "(10 + 3) - 8 = 5");
        assert_eq!(columns[1].calculation, "(10 + 0) - (7 + 1) = 2");
        assert_eq!(columns[2].calculation, "(10 + 0) - (8 + 1) = 1");
        assert_eq!(columns[3].calculation, "5 - (1 + 1) = 3");
    }

    #[test]
    fn agrees_with_borrowing() {
        use crate::methods::subtraction::StandardSubtraction;
        for (a, b) in [(503.0, 267.0), (100_000.0, 1.0), (12.0, 345.0), (0.0, 0.0)] {
            assert_eq!(
                EqualAdditions.calculate(a, b).answer(),
                StandardSubtraction.calculate(a, b).answer(),
                "{a} - {b}"
            );
        }
    }
}
