//! Nikhilam division ("all from nine and the last from ten").
//!
//! For a divisor `d` just below a power of ten `base`, its complement
//! `c = base - d` is small. Writing the working number as `q·base + r` and
//! replacing `q·base` with `q·d + q·c` moves `q` into the quotient and
//! leaves `q·c + r` to divide:
//!
//! ```text
//! N = q·base + r  =  q·d + (q·c + r)
//! ```
//!
//! Folding repeats until the working number is below `base`; a final
//! correction subtracts the divisor while it still fits.

use crate::digits::{self, digit_count, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::require_divisor;

/// Folding stops after this many rounds; the rest is finished by plain division.
const MAX_ROUNDS: usize = 1000;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 2,
    origin: Origin {
        culture: "Vedic mathematics (India)",
        time_period: "Sutras compiled by Bharati Krishna Tirthaji, published 1965",
        description: "Nikhilam Navatashcaramam Dashatah: all from nine and the last from ten, \
                      the sutra for complements from a base.",
    },
    when_to_use: &["Divisors just below a power of ten, such as 9, 98 or 997"],
    advantages: &[
        "Replaces division by multiplication with a small complement",
        "Very fast for divisors near a power of ten",
    ],
    disadvantages: &["Many folding rounds when the divisor is far below its base"],
    speed: Speed::Fast,
    math_principle: "q·base = q·d + q·c for c = base - d. Each round transfers the high part q of \
                     the working number into the quotient and keeps dividend = quotient·d + \
                     working number invariant.",
    related_methods: &["long-division", "synthetic"],
    time_complexity: "O(log N / log(base/c)) folding rounds",
    recommended_use: "Divisors like 9, 89 or 998",
    alternative: "long-division",
    ..MethodMetadata::new("vedic", "Vedic (Nikhilam)", Category::Vedic)
};

/// Division by complements from the next power of ten.
#[derive(Debug, Clone, Copy, Default)]
pub struct VedicDivision;

impl ArithmeticMethod for VedicDivision {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 1234.0,
            num2: 98.0,
            description: "98 is 2 short of 100, so every fold multiplies by 2",
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
                "Nikhilam division needs a whole dividend and a whole divisor.",
            );
        };
        if d == 0 {
            return CalculationResult::unsupported(&METADATA, num1, num2, "Division by zero is undefined.");
        }

        let base = 10u64.pow(digit_count(d));
        let complement = base - d;

        let mut trace = Trace::new();
        trace.push(
            Step::info("All from nine, the last from ten")
                .describe(format!("Divide {a} by {d} using its distance from {base}"))
                .explain("Instead of dividing by the divisor, multiply by its small complement."),
        );
        trace.push(
            Step::input("Find the complement")
                .describe(format!("{d} is {complement} short of {base}"))
                .calc(format!("c = {base} - {d} = {complement}"))
                .value(StepValue::record([("base", base as f64), ("complement", complement as f64)])),
        );

        let mut working = a;
        let mut quotient = 0u64;
        let mut round = 0;
        while working >= base && round < MAX_ROUNDS {
            round += 1;
            let high = working / base;
            let low = working % base;
            let next = high * complement + low;
            quotient += high;
            trace.push(
                Step::calculation(format!("Fold {round}"))
                    .describe(format!("Split {working} at {base} and move {high} into the quotient"))
                    .calc(format!("{working} = {high}·{base} + {low} → {high}×{complement} + {low} = {next}"))
                    .value(StepValue::record([
                        ("quotient", quotient as f64),
                        ("working", next as f64),
                    ])),
            );
            working = next;
        }

        if working >= base {
            let extra = working / d;
            let left = working % d;
            trace.push(
                Step::calculation("Finish by direct division")
                    .describe(format!("Folding stopped after {MAX_ROUNDS} rounds"))
                    .calc(format!("{working} ÷ {d} = {extra} remainder {left}"))
                    .value(StepValue::record([("quotient", (quotient + extra) as f64)])),
            );
            quotient += extra;
            working = left;
        }

        while working >= d {
            let before = working;
            working -= d;
            quotient += 1;
            trace.push(
                Step::calculation("Correct the remainder")
                    .describe(format!("{before} still contains {d}: subtract it and add 1 to the quotient"))
                    .calc(format!("{before} - {d} = {working}"))
                    .value(StepValue::record([
                        ("quotient", quotient as f64),
                        ("remainder", working as f64),
                    ])),
            );
        }

        let answer = quotient as f64;
        trace.push(
            Step::result("Answer")
                .describe("Quotient, with the final remainder")
                .calc(format!("{a} ÷ {d} = {quotient} remainder {working}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer)
            .with_remainder(working as f64)
            .verified((a / d) as f64, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn divisor_near_a_hundred() {
        let result = VedicDivision.calculate(1234.0, 98.0);
        assert_eq!(result.answer(), Some(12.0));
        assert_eq!(result.remainder, Some(58.0));
        assert!(result.is_correct());
        assert!(result
            .steps
            .iter()
            .any(|s| s.calculation == "1234 = 12·100 + 34 → 12×2 + 34 = 58"));
    }

    #[test]
    fn correction_subtracts_extra_divisors() {
        // 99 ÷ 9: 99 → 9×1 + 9 = 18 → 1×1 + 8 = 9, then 9 - 9 = 0
        let result = VedicDivision.calculate(99.0, 9.0);
        assert_eq!(result.answer(), Some(11.0));
        assert_eq!(result.remainder, Some(0.0));
        assert!(result.steps.iter().any(|s| s.title == "Correct the remainder"));
    }

    #[test]
    fn far_from_the_base_still_terminates() {
        let result = VedicDivision.calculate(4_503_599_627_370_496.0, 1.0);
        assert_eq!(result.answer(), Some(4_503_599_627_370_496.0));
        assert_eq!(result.remainder, Some(0.0));

        let result = VedicDivision.calculate(1_000_000_007.0, 11.0);
        assert_eq!(result.answer(), Some(90_909_091.0));
        assert_eq!(result.remainder, Some(6.0));
    }
}
