//! Long multiplication: one shifted partial product per multiplier digit.

use crate::digits::{self, place_name};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::LIMIT;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Beginner,
    display_order: 1,
    origin: Origin {
        culture: "Hindu-Arabic numeral tradition",
        time_period: "Described by al-Khwarizmi, 9th century",
        description: "The layout taught in most schools today settled in European arithmetic \
                      books of the 15th and 16th centuries.",
    },
    when_to_use: &["Multiplying multi-digit numbers on paper"],
    advantages: &[
        "Each partial product is easy to check",
        "Reuses single-digit times tables only",
    ],
    disadvantages: &[
        "Many intermediate rows for long multipliers",
        "Alignment mistakes shift whole rows",
    ],
    speed: Speed::Moderate,
    math_principle: "Multiplication distributes over addition: a × b is the sum of a × d × 10^j \
                     over the digits d of b at place j.",
    related_methods: &["lattice", "vedic", "karatsuba"],
    time_complexity: "O(n·m) digit products",
    recommended_use: "General multiplication by hand",
    alternative: "lattice",
    ..MethodMetadata::new("grade-school", "Grade-School Long Multiplication", Category::Standard)
};

/// Standard long multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeSchool;

impl ArithmeticMethod for GradeSchool {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 347.0,
            num2: 28.0,
            description: "Two partial products with carries inside each row",
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
                "Long multiplication needs whole numbers between 0 and 9999999.",
            );
        };

        let mut trace = Trace::new();
        trace.push(
            Step::info("Set up the multiplication")
                .describe(format!("Write {a} above {b}"))
                .calc(format!("{a} × {b}"))
                .explain("Multiply the top number by each digit of the bottom number, then add the rows."),
        );
        trace.push(
            Step::input("Digits of the multiplier")
                .describe(format!("Split {b} into place values"))
                .calc(digits::expanded(b)),
        );

        let top = digits::digits(a);
        let mut partials = Vec::new();
        for (j, &d) in digits::digits(b).iter().enumerate() {
            // Row product digit by digit so the carries are visible.
            let mut carry = 0u64;
            let mut carries = Vec::new();
            let mut row = Vec::with_capacity(top.len() + 1);
            for &t in &top {
                let product = u64::from(t) * u64::from(d) + carry;
                row.push((product % 10) as u8);
                carry = product / 10;
                carries.push(carry);
            }
            if carry > 0 {
                row.extend(digits::digits(carry));
            }
            let product = digits::from_digits(&row);
            let shifted = product * 10u64.pow(j as u32);
            let max_carry = carries.iter().copied().max().unwrap_or(0);

            trace.push(
                Step::calculation(format!("Multiply by the {} digit", place_name(j)))
                    .describe(format!("{a} × {d}, shifted {j} place(s) left"))
                    .calc(format!("{a} × {d} = {product}; {product} × 10^{j} = {shifted}"))
                    .value(StepValue::record([
                        ("partial", shifted as f64),
                        ("largestCarry", max_carry as f64),
                    ]))
                    .explain(if j == 0 {
                        "The ones digit gives a row with no shift.".to_string()
                    } else {
                        format!("This digit is worth {}, so its row gains {j} trailing zero(s).", place_name(j))
                    }),
            );
            partials.push(shifted);
        }

        let mut total = partials.first().copied().unwrap_or(0);
        for (row, &partial) in partials.iter().enumerate().skip(1) {
            let before = total;
            total += partial;
            trace.push(
                Step::calculation(format!("Add row {}", row + 1))
                    .describe("Add the next partial product to the running total")
                    .calc(format!("{before} + {partial} = {total}"))
                    .value(StepValue::record([("total", total as f64)])),
            );
        }

        let answer = total as f64;
        trace.push(
            Step::result("Answer")
                .describe("The sum of the partial products")
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
    fn two_partial_products() {
        let result = GradeSchool.calculate(347.0, 28.0);
        assert_eq!(result.answer(), Some(9716.0));
        assert!(result.is_correct());

        let calcs: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(calcs[0].calculation, "347 × 8 = 2776; 2776 × 10^0 = 2776");
        assert_eq!(calcs[1].calculation, "347 × 2 = 694; 694 × 10^1 = 6940");
        assert_eq!(calcs[2].calculation, "2776 + 6940 = 9716");
    }

    #[test]
    fn single_digit_multiplier_and_zero() {
        assert_eq!(GradeSchool.calculate(123.0, 4.0).answer(), Some(492.0));
        assert_eq!(GradeSchool.calculate(0.0, 987.0).answer(), Some(0.0));
        assert_eq!(GradeSchool.calculate(987.0, 0.0).answer(), Some(0.0));
    }

    #[test]
    fn largest_operands() {
        let result = GradeSchool.calculate(9_999_999.0, 9_999_999.0);
        assert_eq!(result.answer(), Some(99_999_980_000_001.0));
        assert!(!GradeSchool.validate(10_000_000.0, 1.0).valid);
    }
}
