//! Carry-lookahead addition using the Kogge-Stone parallel prefix.
//!
//! Addition of two n-bit numbers `a` and `b` produces:
//! - Sum bits: `s[i] = a[i] XOR b[i] XOR c[i-1]`
//! - Carry bits: `c[i] = g[i] OR (p[i] AND c[i-1])`
//!
//! where `g[i] = a[i] AND b[i]` (generate) and `p[i] = a[i] XOR b[i]`
//! (propagate). Instead of rippling carries one bit at a time, Kogge-Stone
//! combines (generate, propagate) pairs over doubling distances:
//!
//! ```text
//! for d in 1, 2, 4, ... < width:
//!     G = G OR (P AND (G << d))
//!     P = P AND (P << d)
//! carries = G << 1
//! sum     = p XOR carries
//! ```
//!
//! After `ceil(log2(width))` rounds every bit of `G` says whether a carry
//! leaves that position.

use crate::digits::{self, binary, bit_length, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

const LIMIT: f64 = MAX_EXACT / 2.0;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 4,
    origin: Origin {
        culture: "Digital circuit design",
        time_period: "1973",
        description: "Peter Kogge and Harold Stone described the parallel prefix formulation \
                      that modern processors use to compute all carries at once.",
    },
    when_to_use: &[
        "Understanding how a CPU adds",
        "Seeing why binary addition need not wait for carries",
    ],
    advantages: &[
        "Logarithmic depth: all carries known after log2(n) rounds",
        "Uses only AND, OR and XOR",
    ],
    disadvantages: &[
        "Works in binary, so answers must be converted back",
        "More total work than rippling the carry",
    ],
    speed: Speed::Fast,
    math_principle: "A carry leaves bit i if bit i generates one (both inputs 1) or propagates \
                     one arriving from below (exactly one input 1). Generate/propagate pairs \
                     compose associatively, so carries for every position can be computed as a \
                     parallel prefix over doubling distances.",
    related_methods: &["standard", "twos-complement"],
    time_complexity: "O(log n) rounds of O(n)-bit word operations",
    recommended_use: "Exploring computer arithmetic",
    alternative: "standard",
    ..MethodMetadata::new("carry-lookahead", "Carry-Lookahead (Kogge-Stone)", Category::Computer)
};

/// Binary addition with all carries computed by parallel prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarryLookaheadAddition;

impl ArithmeticMethod for CarryLookaheadAddition {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 45.0,
            num2: 27.0,
            description: "A carry chain that runs across four bits",
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
                "Carry-lookahead addition works on whole numbers that are not negative.",
            );
        };

        // One spare bit for the final carry.
        let width = bit_length(a.max(b)) + 1;
        let mask = (1u64 << width) - 1;

        let mut trace = Trace::new();
        trace.push(
            Step::info("Think like a circuit")
                .describe(format!("Add {a} and {b} in binary, working out every carry in parallel"))
                .explain(
                    "A ripple adder waits for each carry before the next bit can finish. A \
                     lookahead adder predicts all carries from two simple signals per bit.",
                ),
        );
        trace.push(
            Step::input("Convert to binary")
                .describe(format!("Write both numbers with {width} bits"))
                .calc(format!("{a} = {}, {b} = {}", binary(a, width), binary(b, width)))
                .value(StepValue::record([("width", f64::from(width))])),
        );

        let g = a & b;
        let p = a ^ b;
        trace.push(
            Step::calculation("Generate and propagate")
                .describe("Mark where a bit creates a carry (g) and where it passes one on (p)")
                .calc(format!("g = a AND b = {}, p = a XOR b = {}", binary(g, width), binary(p, width)))
                .value(StepValue::record([("generate", g as f64), ("propagate", p as f64)]))
                .explain("Both bits 1 always carries; exactly one bit 1 carries only if a carry arrives."),
        );

        let mut big_g = g;
        let mut big_p = p;
        let mut distance = 1u32;
        let mut round = 1;
        while distance < width {
            big_g = (big_g | (big_p & (big_g << distance))) & mask;
            big_p = (big_p & (big_p << distance)) & mask;
            trace.push(
                Step::calculation(format!("Prefix round {round}"))
                    .describe(format!("Combine each bit with the group {distance} bit(s) below it"))
                    .calc(format!(
                        "G = G OR (P AND (G << {distance})) = {}, P = P AND (P << {distance}) = {}",
                        binary(big_g, width),
                        binary(big_p, width)
                    ))
                    .value(StepValue::record([
                        ("generate", big_g as f64),
                        ("propagate", big_p as f64),
                    ]))
                    .explain(format!(
                        "After this round every G bit covers a span of {} bit(s).",
                        distance * 2
                    )),
            );
            distance *= 2;
            round += 1;
        }

        let carries = (big_g << 1) & mask;
        trace.push(
            Step::calculation("Carries")
                .describe("A carry enters bit i+1 exactly when group generate G[i] is set")
                .calc(format!("c = G << 1 = {}", binary(carries, width)))
                .value(StepValue::record([("carries", carries as f64)])),
        );

        let sum = p ^ carries;
        trace.push(
            Step::calculation("Sum bits")
                .describe("Each sum bit is the propagate bit flipped by the incoming carry")
                .calc(format!("s = p XOR c = {}", binary(sum, width)))
                .value(StepValue::Text(binary(sum, width))),
        );

        let answer = sum as f64;
        trace.push(
            Step::result("Answer")
                .describe("Convert the sum back to decimal")
                .calc(format!("{} = {answer}", binary(sum, width)))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer).verified(num1 + num2, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn five_plus_three() {
        let result = CarryLookaheadAddition.calculate(5.0, 3.0);
        assert_eq!(result.answer(), Some(8.0));
        assert!(result.is_correct());
        assert!(result
            .steps
            .iter()
            .any(|s| s.calculation == "c = G << 1 = 1110"));
    }

    #[test]
    fn prefix_rounds_are_logarithmic() {
        let result = CarryLookaheadAddition.calculate(1_000_000.0, 48_575.0);
        let rounds = result
            .steps
            .iter()
            .filter(|s| s.title.starts_with("Prefix round"))
            .count();
        // 21 bits: distances 1, 2, 4, 8, 16
        assert_eq!(rounds, 5);
        assert_eq!(result.answer(), Some(1_048_575.0));
    }

    #[test]
    fn matches_native_addition() {
        for (a, b) in [(0u64, 0u64), (1, 1), (255, 1), (45, 27), (123_456_789, 987_654_321)] {
            let result = CarryLookaheadAddition.calculate(a as f64, b as f64);
            assert_eq!(result.answer(), Some((a + b) as f64), "{a} + {b}");
        }
    }
}
