//! Column subtraction with explicit borrows.

use crate::digits::{self, place_name, place_title, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Beginner,
    display_order: 1,
    origin: Origin {
        culture: "Hindu-Arabic numeral tradition",
        time_period: "Taught in European schools from the 16th century",
        description: "Also called decomposition: a ten is taken apart into ones whenever a \
                      column is too small.",
    },
    when_to_use: &["Subtracting whole numbers on paper", "Learning regrouping"],
    advantages: &[
        "Borrowing mirrors exchanging a ten for ten ones",
        "Works for numbers of any length",
    ],
    disadvantages: &["Borrowing across zeros needs care"],
    speed: Speed::Moderate,
    math_principle: "Rewriting one unit of the next column as ten units of the current column \
                     leaves the number unchanged, so a column that is too small can always be \
                     made large enough before subtracting.",
    related_methods: &["equal-additions", "twos-complement"],
    time_complexity: "O(n) for n-digit operands",
    recommended_use: "Everyday subtraction of whole numbers",
    alternative: "equal-additions",
    ..MethodMetadata::new("standard", "Standard Borrowing", Category::Standard)
};

/// Grade-school subtraction: borrow from the next column when needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSubtraction;

impl ArithmeticMethod for StandardSubtraction {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 503.0,
            num2: 267.0,
            description: "Borrowing across a zero in the tens column",
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
                "Column subtraction needs two whole numbers that are not negative.",
            );
        };

        let mut trace = Trace::new();
        let negative = a < b;
        let (big, small) = if negative { (b, a) } else { (a, b) };
        trace.push(
            Step::info("Line up the numbers")
                .describe(format!("Write {big} above {small} with matching place values"))
                .calc(format!("{a} - {b}"))
                .explain("Only digits in the same column are subtracted."),
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
        let mut borrow = 0i8;
        for (i, &t) in top.iter().enumerate() {
            let u = bottom.get(i).copied().unwrap_or(0) as i8;
            let available = t as i8 - borrow;
            let (working, borrow_out) = if available < u {
                (available + 10, 1i8)
            } else {
                (available, 0i8)
            };
            let digit = working - u;

            let mut expression = String::new();
            if borrow > 0 {
                expression.push_str(&format!("{t} - 1 = {available}; "));
            }
            if borrow_out > 0 {
                expression.push_str(&format!("{available} + 10 = {working}; "));
            }
            expression.push_str(&format!("{working} - {u} = {digit}"));

            let explanation = if borrow_out > 0 {
                format!(
                    "{available} is smaller than {u}: borrow one from the {}, which is worth ten {}.",
                    place_name(i + 1),
                    place_name(i)
                )
            } else {
                format!("{available} is at least {u}, so no borrow is needed.")
            };
            trace.push(
                Step::calculation(format!("{} column", place_title(i)))
                    .describe(format!("Subtract the {} digits", place_name(i)))
                    .calc(expression)
                    .value(StepValue::record([
                        ("digit", f64::from(digit)),
                        ("borrow", f64::from(borrow_out)),
                    ]))
                    .explain(explanation),
            );
            out.push(digit as u8);
            borrow = borrow_out;
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
