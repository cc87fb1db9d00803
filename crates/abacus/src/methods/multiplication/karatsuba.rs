//! Karatsuba multiplication.
//!
//! Split both operands at `10^m`, where `m` is half the longer digit count:
//!
//! ```text
//! x = x1·10^m + x0        y = y1·10^m + y0
//! z2 = x1·y1
//! z0 = x0·y0
//! z1 = (x1 + x0)(y1 + y0)
//! x·y = z2·10^(2m) + (z1 - z2 - z0)·10^m + z0
//! ```
//!
//! Three recursive products replace four. Operands below 10 are multiplied
//! directly.

use crate::digits::{self, digit_count};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::LIMIT;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 5,
    origin: Origin {
        culture: "Soviet mathematics",
        time_period: "1960",
        description: "Anatoly Karatsuba found it as a student, disproving Kolmogorov's conjecture \
                      that multiplication needs quadratic time.",
    },
    when_to_use: &[
        "Very large numbers",
        "Understanding divide-and-conquer algorithms",
    ],
    advantages: &[
        "Sub-quadratic running time",
        "Basis of big-integer libraries",
    ],
    disadvantages: &["Overhead outweighs the gain for small numbers", "Hard to do by hand"],
    speed: Speed::Fast,
    math_principle: "(x1 + x0)(y1 + y0) = x1·y1 + x1·y0 + x0·y1 + x0·y0, so the cross terms \
                     x1·y0 + x0·y1 can be recovered as z1 - z2 - z0 with one multiplication \
                     instead of two.",
    related_methods: &["grade-school", "russian-peasant"],
    time_complexity: "O(n^1.585)",
    recommended_use: "Multiplying numbers with hundreds of digits or more",
    alternative: "grade-school",
    ..MethodMetadata::new("karatsuba", "Karatsuba", Category::Computer)
};

/// Divide-and-conquer multiplication with three sub-products.
#[derive(Debug, Clone, Copy, Default)]
pub struct Karatsuba;

impl Karatsuba {
    fn multiply(x: u64, y: u64, depth: usize, trace: &mut Trace) -> u64 {
        let indent = "  ".repeat(depth);
        if x < 10 || y < 10 {
            let product = x * y;
            trace.push(
                Step::calculation(format!("{indent}Base case"))
                    .describe("One factor is a single digit: multiply directly")
                    .calc(format!("{x} × {y} = {product}"))
                    .value(StepValue::record([("product", product as f64), ("depth", depth as f64)])),
            );
            return product;
        }

        let m = digit_count(x).max(digit_count(y)) / 2;
        let base = 10u64.pow(m);
        let (x1, x0) = (x / base, x % base);
        let (y1, y0) = (y / base, y % base);
        trace.push(
            Step::calculation(format!("{indent}Split {x} × {y}"))
                .describe(format!("Split both numbers at 10^{m}"))
                .calc(format!("{x} = {x1}·10^{m} + {x0}, {y} = {y1}·10^{m} + {y0}"))
                .value(StepValue::record([("m", f64::from(m)), ("depth", depth as f64)])),
        );

        let z2 = Self::multiply(x1, y1, depth + 1, trace);
        let z0 = Self::multiply(x0, y0, depth + 1, trace);
        let z1 = Self::multiply(x1 + x0, y1 + y0, depth + 1, trace);
        let middle = z1 - z2 - z0;
        let product = z2 * base * base + middle * base + z0;
        trace.push(
            Step::calculation(format!("{indent}Combine {x} × {y}"))
                .describe("z2·10^(2m) + (z1 - z2 - z0)·10^m + z0")
                .calc(format!(
                    "{z2}·10^{} + ({z1} - {z2} - {z0})·10^{m} + {z0} = {product}",
                    2 * m
                ))
                .value(StepValue::record([
                    ("z2", z2 as f64),
                    ("z1", z1 as f64),
                    ("z0", z0 as f64),
                    ("product", product as f64),
                ])),
        );
        product
    }
}

impl ArithmeticMethod for Karatsuba {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 1234.0,
            num2: 5678.0,
            description: "Two levels of splitting before the base case",
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
                "Karatsuba multiplication needs whole numbers between 0 and 9999999.",
            );
        };

        let mut trace = Trace::new();
        trace.push(
            Step::info("Divide and conquer")
                .describe(format!("Multiply {a} by {b} with three half-size products instead of four"))
                .explain("Nested steps are indented by recursion depth."),
        );
        trace.push(
            Step::input("Operands")
                .calc(format!("{a} ({} digits) × {b} ({} digits)", digit_count(a), digit_count(b))),
        );

        let product = Self::multiply(a, b, 0, &mut trace);
        let answer = product as f64;
        trace.push(
            Step::result("Answer")
                .describe("The combined product")
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

    #[test]
    fn classic_example() {
        let result = Karatsuba.calculate(1234.0, 5678.0);
        assert_eq!(result.answer(), Some(7_006_652.0));
        assert!(result.is_correct());
        assert!(result
            .steps
            .iter()
            .any(|s| s.calculation == "1234 = 12·10^2 + 34, 5678 = 56·10^2 + 78"));
    }

    #[test]
    fn base_case_is_direct() {
        let result = Karatsuba.calculate(7.0, 123_456.0);
        assert_eq!(result.answer(), Some(864_192.0));
        assert_eq!(result.steps.iter().filter(|s| s.title.ends_with("Base case")).count(), 1);
    }

    #[test]
    fn uneven_split() {
        assert_eq!(Karatsuba.calculate(100.0, 10.0).answer(), Some(1000.0));
        assert_eq!(Karatsuba.calculate(9_999_999.0, 12.0).answer(), Some(119_999_988.0));
    }
}
