//! Urdhva Tiryagbhyam ("vertically and crosswise").
//!
//! Column `k` of the product collects every digit pair whose places add up
//! to `k`:
//!
//! ```text
//! column k = sum of a[i] * b[j] for i + j = k, plus the carry from column k - 1
//! ```
//!
//! The column's last digit is written down and the rest is carried. The
//! result is produced right to left in a single pass, without partial rows.

use crate::digits;
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::LIMIT;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Intermediate,
    display_order: 2,
    origin: Origin {
        culture: "Vedic mathematics (India)",
        time_period: "Sutras compiled by Bharati Krishna Tirthaji, published 1965",
        description: "One of the sixteen sutras; the crosswise pattern is the same convolution \
                      used by long multiplication, written without intermediate rows.",
    },
    when_to_use: &[
        "Mental multiplication of two- and three-digit numbers",
        "Writing a product in one line",
    ],
    advantages: &["No partial products to add", "Symmetric pattern is easy to memorise"],
    disadvantages: &["Column sums grow with operand length", "Large carries are easy to drop"],
    speed: Speed::Fast,
    math_principle: "The coefficient of 10^k in a × b is the sum of a_i × b_j over all i + j = k. \
                     Computing those sums column by column with carries is the discrete \
                     convolution of the two digit sequences.",
    related_methods: &["grade-school", "lattice"],
    time_complexity: "O(n·m) digit products",
    recommended_use: "Quick multiplication of small numbers",
    alternative: "grade-school",
    ..MethodMetadata::new("vedic", "Vedic (Urdhva Tiryagbhyam)", Category::Vedic)
};

/// Vertically-and-crosswise multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct VedicMultiplication;

impl ArithmeticMethod for VedicMultiplication {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 23.0,
            num2: 47.0,
            description: "A two-digit product with a carry out of every column",
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
                "Vedic multiplication needs whole numbers between 0 and 9999999.",
            );
        };

        let x = digits::digits(a);
        let y = digits::digits(b);
        let columns = x.len() + y.len() - 1;

        let mut trace = Trace::new();
        trace.push(
            Step::info("Vertically and crosswise")
                .describe(format!("Multiply {a} by {b} one answer digit at a time"))
                .explain(
                    "Each answer column is the sum of the digit products whose places add up to \
                     that column. Work right to left, carrying as you go.",
                ),
        );
        trace.push(
            Step::input("Digits")
                .describe("Number the digits from the right, starting at 0")
                .calc(format!("{}; {}", digits::expanded(a), digits::expanded(b)))
                .value(StepValue::record([("columns", columns as f64)])),
        );

        let mut out = Vec::with_capacity(columns + 2);
        let mut carry = 0u64;
        for k in 0..columns {
            let pairs: Vec<(u64, u64)> = (0..=k)
                .filter_map(|i| Some((u64::from(*x.get(i)?), u64::from(*y.get(k - i)?))))
                .collect();
            let crosswise: u64 = pairs.iter().map(|(p, q)| p * q).sum();
            let total = crosswise + carry;
            let digit = total % 10;
            let carry_out = total / 10;

            let mut expression = pairs
                .iter()
                .map(|(p, q)| format!("{p}×{q}"))
                .collect::<Vec<_>>()
                .join(" + ");
            if carry > 0 {
                expression.push_str(&format!(" + {carry}"));
            }
            expression.push_str(&format!(" = {total}"));

            let title = match pairs.len() {
                1 => format!("Column {k}: vertical"),
                _ => format!("Column {k}: crosswise"),
            };
            trace.push(
                Step::calculation(title)
                    .describe(format!("Sum the products whose places add up to {k}"))
                    .calc(expression)
                    .value(StepValue::record([
                        ("digit", digit as f64),
                        ("carry", carry_out as f64),
                    ]))
                    .explain(format!("Write {digit}, carry {carry_out}.")),
            );
            out.push(digit as u8);
            carry = carry_out;
        }

        if carry > 0 {
            trace.push(
                Step::calculation("Final carry")
                    .describe("The last carry becomes the leading digits")
                    .calc(format!("carry {carry}"))
                    .value(StepValue::record([("carry", carry as f64)])),
            );
            out.extend(digits::digits(carry));
        }

        let answer = digits::from_digits(&out) as f64;
        trace.push(
            Step::result("Answer")
                .describe("Read the column digits from left to right")
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
    fn twenty_three_times_forty_seven() {
        let result = VedicMultiplication.calculate(23.0, 47.0);
        assert_eq!(result.answer(), Some(1081.0));
        assert!(result.is_correct());

        let calcs: Vec<&Step> = result.steps_of(StepKind::Calculation).collect();
        assert_eq!(calcs[0].calculation, "3×7 = 21");
        assert_eq!(calcs[1].calculation, "3×4 + 2×7 + 2 = 28");
        assert_eq!(calcs[2].calculation, "2×4 + 2 = 10");
        assert_eq!(calcs[3].title, "Final carry");
    }

    #[test]
    fn uneven_lengths() {
        assert_eq!(VedicMultiplication.calculate(1234.0, 5.0).answer(), Some(6170.0));
        assert_eq!(VedicMultiplication.calculate(7.0, 0.0).answer(), Some(0.0));
        assert_eq!(
            VedicMultiplication.calculate(9_999_999.0, 9_999_999.0).answer(),
            Some(99_999_980_000_001.0)
        );
    }
}
