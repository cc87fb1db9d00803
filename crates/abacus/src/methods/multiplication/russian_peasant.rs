//! Russian peasant (halving and doubling) multiplication.

use crate::digits::{self, bit_length};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::LIMIT;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Beginner,
    display_order: 4,
    origin: Origin {
        culture: "Ancient Egypt, later Russian peasants",
        time_period: "Rhind papyrus, c. 1650 BC",
        description: "Egyptian scribes multiplied by doubling; the halving variant survived \
                      as a folk method in rural Russia and Ethiopia.",
    },
    when_to_use: &[
        "Multiplying without times tables",
        "Seeing multiplication in binary",
    ],
    advantages: &[
        "Needs only halving, doubling and adding",
        "Mirrors shift-and-add hardware multipliers",
    ],
    disadvantages: &["Many rows for large first operands"],
    speed: Speed::Moderate,
    math_principle: "Halving the first number reads off its binary digits from the bottom; the \
                     doubled second number is b × 2^k on row k. Adding the rows where the halved \
                     number is odd sums b × 2^k over the set bits of a, which is a × b.",
    related_methods: &["grade-school", "karatsuba"],
    time_complexity: "O(log a) rows",
    recommended_use: "Mental multiplication and understanding binary multiplication",
    alternative: "grade-school",
    ..MethodMetadata::new("russian-peasant", "Russian Peasant", Category::Ancient)
};

/// Halve the first operand, double the second, keep the odd rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussianPeasant;

impl ArithmeticMethod for RussianPeasant {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 37.0,
            num2: 22.0,
            description: "37 is 100101 in binary: three rows are kept",
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
                "Russian peasant multiplication needs whole numbers between 0 and 9999999.",
            );
        };

        let mut trace = Trace::new();
        trace.push(
            Step::info("Halve and double")
                .describe(format!("Two columns: halve {a} down the left, double {b} down the right"))
                .explain(
                    "Drop remainders when halving. Stop when the left column reaches zero, then \
                     add the right-hand numbers next to odd left-hand numbers.",
                ),
        );
        trace.push(
            Step::input("First row")
                .calc(format!("{a} | {b}"))
                .value(StepValue::record([("rows", if a == 0 { 0.0 } else { f64::from(bit_length(a)) })])),
        );

        let mut left = a;
        let mut right = b;
        let mut total = 0u64;
        let mut row = 1;
        while left > 0 {
            let odd = left % 2 == 1;
            if odd {
                total += right;
            }
            trace.push(
                Step::calculation(format!("Row {row}"))
                    .describe(format!("{left} | {right}"))
                    .calc(if odd {
                        format!("{left} is odd: add {right}, total = {total}")
                    } else {
                        format!("{left} is even: skip {right}")
                    })
                    .value(StepValue::record([
                        ("left", left as f64),
                        ("right", right as f64),
                        ("total", total as f64),
                    ])),
            );
            left /= 2;
            right *= 2;
            row += 1;
        }
        if a == 0 {
            trace.push(
                Step::calculation("Nothing to halve")
                    .describe("The left column starts at zero, so no row is kept")
                    .calc("total = 0")
                    .value(StepValue::record([("total", 0.0)])),
            );
        }

        let answer = total as f64;
        trace.push(
            Step::result("Answer")
                .describe("The sum of the kept right-hand numbers")
                .calc(format!("{a} × {b} = {answer}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer).verified(num1 * num2, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::StepKind;

    #[test]
    fn thirty_seven_times_twenty_two() {
        let result = RussianPeasant.calculate(37.0, 22.0);
        assert_eq!(result.answer(), Some(814.0));
        assert!(result.is_correct());

        let rows: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].calculation, "37 is odd: add 22, total = 22");
        assert_eq!(rows[1].calculation, "18 is even: skip 44");
        assert_eq!(rows[5].calculation, "1 is odd: add 704, total = 814");
    }

    #[test]
    fn zero_first_operand() {
        let result = RussianPeasant.calculate(0.0, 55.0);
        assert_eq!(result.answer(), Some(0.0));
        assert!(result.is_correct());
    }
}
