//! Binary non-restoring division.
//!
//! The partial remainder `A` is allowed to go negative. Each step shifts the
//! next dividend bit into `A`, then subtracts the divisor if `A` was
//! non-negative or adds it back if `A` was negative; the new sign decides the
//! quotient bit. One correction at the end makes the remainder non-negative.
//! Unlike restoring division there is never an undo step inside the loop.

use crate::digits::{self, binary, bit_length};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::require_divisor;

/// Keeps the partial remainder comfortably inside an `i64`.
const LIMIT: f64 = 4_294_967_295.0; // u32::MAX

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 4,
    origin: Origin {
        culture: "Digital computing",
        time_period: "1950s",
        description: "Used in early hardware dividers because every cycle does exactly one \
                      add or subtract.",
    },
    when_to_use: &["Understanding hardware division"],
    advantages: &[
        "One addition or subtraction per bit",
        "No restoring step inside the loop",
    ],
    disadvantages: &[
        "Binary only",
        "Needs a final remainder correction",
    ],
    speed: Speed::Fast,
    math_principle: "Subtracting D and then, after a shift, adding D back equals subtracting D \
                     once at the lower position: 2(A - D) + D = 2A - D. So a wrong guess is \
                     repaired by the next step instead of being undone.",
    related_methods: &["long-division", "newton-reciprocal"],
    time_complexity: "O(n) add/subtract steps for an n-bit dividend",
    recommended_use: "Learning processor arithmetic",
    alternative: "long-division",
    ..MethodMetadata::new("non-restoring", "Non-Restoring Division", Category::Computer)
};

/// Shift-and-add/subtract binary division.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonRestoring;

impl ArithmeticMethod for NonRestoring {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 11.0,
            num2: 3.0,
            description: "Four dividend bits, with the remainder going negative twice",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_whole("dividend", num1, LIMIT).and_then(|| require_divisor(num2, LIMIT))
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let (Some(dividend), Some(divisor)) = (digits::whole(num1, LIMIT), digits::whole(num2, LIMIT))
        else {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                "Non-restoring division needs whole numbers between 0 and 4294967295.",
            );
        };
        if divisor == 0 {
            return CalculationResult::unsupported(&METADATA, num1, num2, "Division by zero is undefined.");
        }

        let n = bit_length(dividend);
        let d = divisor as i64;

        let mut trace = Trace::new();
        trace.push(
            Step::info("Divide in binary")
                .describe(format!("Divide {dividend} by {divisor} one bit at a time"))
                .explain(
                    "Shift a bit of the dividend into the remainder A. If A is not negative, \
                     subtract the divisor; otherwise add it. The sign of the result is the \
                     quotient bit.",
                ),
        );
        trace.push(
            Step::input("Registers")
                .describe(format!("Q holds the {n}-bit dividend, A starts at 0"))
                .calc(format!("Q = {}, D = {divisor} ({})", binary(dividend, n), binary(divisor, bit_length(divisor))))
                .value(StepValue::record([("bits", f64::from(n))])),
        );

        let mut a: i64 = 0;
        let mut quotient: u64 = 0;
        for i in 0..n {
            let bit = ((dividend >> (n - 1 - i)) & 1) as i64;
            let shifted = 2 * a + bit;
            let (next, op) = if a >= 0 {
                (shifted - d, "-")
            } else {
                (shifted + d, "+")
            };
            let q_bit = u64::from(next >= 0);
            quotient = (quotient << 1) | q_bit;
            trace.push(
                Step::calculation(format!("Bit {}", i + 1))
                    .describe(format!(
                        "Shift in bit {bit}; A was {}, so {} the divisor",
                        if a >= 0 { "non-negative" } else { "negative" },
                        if a >= 0 { "subtract" } else { "add" }
                    ))
                    .calc(format!("A = 2×{a} + {bit} {op} {d} = {next}; q = {q_bit}"))
                    .value(StepValue::record([
                        ("remainder", next as f64),
                        ("quotientBit", q_bit as f64),
                    ])),
            );
            a = next;
        }

        if a < 0 {
            let fixed = a + d;
            trace.push(
                Step::calculation("Correct the remainder")
                    .describe("The remainder ended negative: add the divisor once")
                    .calc(format!("A = {a} + {d} = {fixed}"))
                    .value(StepValue::record([("remainder", fixed as f64)])),
            );
            a = fixed;
        }

        let answer = quotient as f64;
        trace.push(
            Step::result("Answer")
                .describe("Quotient bits read in order, with the final remainder")
                .calc(format!("{} = {quotient} remainder {a}", binary(quotient, n)))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer)
            .with_remainder(a as f64)
            .verified((dividend / divisor) as f64, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn eleven_by_three() {
        let result = NonRestoring.calculate(11.0, 3.0);
        assert_eq!(result.answer(), Some(3.0));
        assert_eq!(result.remainder, Some(2.0));
        assert!(result.is_correct());

        let bits: Vec<&Step> = result.steps.iter().filter(|s| s.title.starts_with("Bit")).collect();
        assert_eq!(bits.len(), 4);
        assert_eq!(bits[0].calculation, "A = 2×0 + 1 - 3 = -2; q = 0");
        assert_eq!(bits[1].calculation, "A = 2×-2 + 0 + 3 = -1; q = 0");
    }

    #[test]
    fn negative_final_remainder_is_corrected() {
        let result = NonRestoring.calculate(8.0, 3.0);
        assert_eq!(result.answer(), Some(2.0));
        assert_eq!(result.remainder, Some(2.0));
    }

    #[test]
    fn edges() {
        assert_eq!(NonRestoring.calculate(0.0, 5.0).remainder, Some(0.0));
        assert_eq!(NonRestoring.calculate(0.0, 5.0).answer(), Some(0.0));
        let result = NonRestoring.calculate(4_294_967_295.0, 1.0);
        assert_eq!(result.answer(), Some(4_294_967_295.0));
        assert_eq!(result.remainder, Some(0.0));
    }
}
