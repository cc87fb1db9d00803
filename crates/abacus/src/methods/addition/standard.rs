//! Column addition with explicit carries.

use crate::digits::{self, place_name, place_title, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

/// Operands are capped so that the sum stays exactly representable.
const LIMIT: f64 = MAX_EXACT / 2.0;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Beginner,
    display_order: 1,
    origin: Origin {
        culture: "Hindu-Arabic numeral tradition",
        time_period: "7th century onward",
        description: "Column addition became practical once place-value notation with a zero \
                      spread from India through the Islamic world to Europe.",
    },
    when_to_use: &[
        "Adding whole numbers on paper",
        "Learning how carrying works",
    ],
    advantages: &[
        "Works for numbers of any length",
        "Every carry is written down and can be checked",
    ],
    disadvantages: &["Right-to-left order differs from how numbers are read"],
    speed: Speed::Moderate,
    math_principle: "A number is a sum of digits times powers of ten. Adding column by column \
                     and moving every full ten into the next column (the carry) keeps each \
                     column a single digit without changing the total.",
    related_methods: &["carry-lookahead", "kahan"],
    time_complexity: "O(n) for n-digit operands",
    recommended_use: "Everyday addition of whole numbers",
    alternative: "carry-lookahead",
    ..MethodMetadata::new("standard", "Standard Column Addition", Category::Standard)
};

/// Grade-school addition: ones first, carrying into the next column.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAddition;

impl ArithmeticMethod for StandardAddition {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 247.0,
            num2: 185.0,
            description: "Carries out of both the ones and the tens column",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_whole("first number", num1, LIMIT)
            .and_then(|| digits::require_whole("second number", num2, LIMIT))
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let (Some(a), Some(b)) = (digits::whole(num1, LIMIT), digits::whole(num2, LIMIT)) else {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                "Column addition needs two whole numbers that are not negative.",
            );
        };

        let top = digits::digits(a);
        let bottom = digits::digits(b);
        let columns = top.len().max(bottom.len());

        let mut trace = Trace::new();
        trace.push(
            Step::info("Line up the numbers")
                .describe(format!("Write {a} above {b} so that digits of equal place value line up"))
                .calc(format!("{a} + {b}"))
                .explain("Ones go under ones, tens under tens; only digits in the same column are added."),
        );
        trace.push(
            Step::input("Split into place values")
                .describe("Read each number as a sum of its columns")
                .calc(format!("{}; {}", digits::expanded(a), digits::expanded(b)))
                .value(StepValue::record([("columns", columns as f64)])),
        );

        let mut sum_digits = Vec::with_capacity(columns + 1);
        let mut carry = 0u8;
        for i in 0..columns {
            let t = top.get(i).copied().unwrap_or(0);
            let u = bottom.get(i).copied().unwrap_or(0);
            let total = t + u + carry;
            let digit = total % 10;
            let carry_out = total / 10;

            let expression = if carry > 0 {
                format!("{t} + {u} + {carry} = {total}")
            } else {
                format!("{t} + {u} = {total}")
            };
            let explanation = if carry_out > 0 {
                format!(
                    "{total} is ten or more: write {digit} in the {} place and carry {carry_out} to the {}.",
                    place_name(i),
                    place_name(i + 1)
                )
            } else {
                format!("{total} fits in one digit: write {digit}, nothing to carry.")
            };
            trace.push(
                Step::calculation(format!("{} column", place_title(i)))
                    .describe(format!("Add the {} digits", place_name(i)))
                    .calc(expression)
                    .value(StepValue::record([
                        ("digit", f64::from(digit)),
                        ("carry", f64::from(carry_out)),
                    ]))
                    .explain(explanation),
            );
            sum_digits.push(digit);
            carry = carry_out;
        }

        if carry > 0 {
            trace.push(
                Step::calculation("Final carry")
                    .describe(format!("Bring the last carry down into the {} place", place_name(columns)))
                    .calc(format!("carry {carry}"))
                    .value(StepValue::record([("digit", f64::from(carry))]))
                    .explain("There is no column left to add it to, so it becomes the leading digit."),
            );
            sum_digits.push(carry);
        }

        let sum = digits::from_digits(&sum_digits) as f64;
        trace.push(
            Step::result("Answer")
                .describe("Read the digits from left to right")
                .calc(format!("{a} + {b} = {sum}"))
                .value(sum),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, sum).verified(num1 + num2, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::StepKind;

    #[test]
    fn adds_with_two_carries() {
        let result = StandardAddition.calculate(247.0, 185.0);
        assert_eq!(result.answer(), Some(432.0));
        assert!(result.is_correct());

        let columns: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].calculation, "7 + 5 = 12");
        assert_eq!(columns[0].result.field("carry"), Some(1.0));
        assert_eq!(columns[1].calculation, "4 + 8 + 1 = 13");
        assert_eq!(columns[1].result.field("carry"), Some(1.0));
        assert_eq!(columns[2].calculation, "2 + 1 + 1 = 4");
        assert_eq!(columns[2].result.field("carry"), Some(0.0));
    }

    #[test]
    fn leftover_carry_becomes_leading_digit() {
        let result = StandardAddition.calculate(999.0, 1.0);
        assert_eq!(result.answer(), Some(1000.0));
        assert!(result.steps.iter().any(|s| s.title == "Final carry"));
    }

    #[test]
    fn zero_and_uneven_lengths() {
        assert_eq!(StandardAddition.calculate(0.0, 0.0).answer(), Some(0.0));
        assert_eq!(StandardAddition.calculate(5.0, 12_345.0).answer(), Some(12_350.0));
    }

    #[test]
    fn rejects_fractions_and_degrades_without_panicking() {
        assert!(!StandardAddition.validate(1.5, 2.0).valid);
        assert!(!StandardAddition.validate(1.0, -2.0).valid);

        let result = StandardAddition.calculate(1.5, 2.0);
        assert_eq!(result.verification.correct, Some(false));
    }
}
