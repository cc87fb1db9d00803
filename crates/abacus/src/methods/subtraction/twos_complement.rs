//! Subtraction by adding the two's complement, as an ALU does it.

use crate::digits::{self, binary, bit_length};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

/// Operands stay well inside one machine word so the display width is sane.
const LIMIT: f64 = 4_294_967_295.0; // u32::MAX

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 3,
    origin: Origin {
        culture: "Digital computing",
        time_period: "1945 onward",
        description: "John von Neumann's EDVAC report proposed two's complement; nearly every \
                      processor since the 1960s represents signed integers this way.",
    },
    when_to_use: &[
        "Understanding how processors subtract",
        "Seeing why one adder circuit is enough for both operations",
    ],
    advantages: &[
        "Subtraction reuses the adder",
        "Only one representation of zero",
    ],
    disadvantages: &[
        "Requires a fixed bit width",
        "Negative results need decoding",
    ],
    speed: Speed::Instant,
    math_principle: "In w-bit arithmetic -b is congruent to 2^w - b, which is (NOT b) + 1. \
                     Adding it to a and discarding bit w leaves a - b modulo 2^w; the top bit \
                     then reads as the sign.",
    related_methods: &["standard", "carry-lookahead"],
    time_complexity: "O(w) bit operations for width w",
    recommended_use: "Learning machine-level integer arithmetic",
    alternative: "standard",
    ..MethodMetadata::new("twos-complement", "Two's Complement", Category::Computer)
};

/// `a - b` computed as `a + (NOT b) + 1` in a fixed bit width.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwosComplement;

/// Bit width for the operands: one sign bit above the wider operand,
/// rounded up to a whole nibble, at least four bits.
fn width_for(a: u64, b: u64) -> u32 {
    let bits = bit_length(a.max(b)) + 1;
    bits.div_ceil(4).max(1) * 4
}

impl ArithmeticMethod for TwosComplement {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 5.0,
            num2: 9.0,
            description: "A negative result read back from its sign bit",
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
                "Two's complement subtraction needs whole numbers between 0 and 4294967295.",
            );
        };

        let width = width_for(a, b);
        let mask = (1u64 << width) - 1;
        let sign_bit = 1u64 << (width - 1);

        let mut trace = Trace::new();
        trace.push(
            Step::info("Subtract by adding")
                .describe(format!("Compute {a} - {b} the way a processor does"))
                .explain(
                    "A computer has no separate subtraction circuit. It negates the second \
                     number with two's complement and adds.",
                ),
        );
        trace.push(
            Step::input("Choose a width and convert")
                .describe(format!("Use {width} bits: enough for both numbers plus a sign bit"))
                .calc(format!("{a} = {}, {b} = {}", binary(a, width), binary(b, width)))
                .value(StepValue::record([("width", f64::from(width))])),
        );

        let inverted = !b & mask;
        trace.push(
            Step::calculation("Invert the bits")
                .describe(format!("Flip every bit of {b} (one's complement)"))
                .calc(format!("NOT {} = {}", binary(b, width), binary(inverted, width)))
                .value(StepValue::Text(binary(inverted, width))),
        );

        let negated = (inverted + 1) & mask;
        trace.push(
            Step::calculation("Add one")
                .describe(format!("The two's complement of {b}, which stands for -{b}"))
                .calc(format!("{} + 1 = {}", binary(inverted, width), binary(negated, width)))
                .value(StepValue::Text(binary(negated, width)))
                .explain(format!("In {width}-bit arithmetic this pattern behaves exactly like -{b}.")),
        );

        let raw = a + negated;
        let carry = raw >> width;
        let bits = raw & mask;
        trace.push(
            Step::calculation("Add")
                .describe(format!("Add {a} and the negated {b}"))
                .calc(format!(
                    "{} + {} = {}",
                    binary(a, width),
                    binary(negated, width),
                    binary(raw, width + 1)
                ))
                .value(StepValue::record([("carryOut", carry as f64)])),
        );
        trace.push(
            Step::calculation("Drop the overflow bit")
                .describe(format!("Keep only the low {width} bits"))
                .calc(format!("{} -> {}", binary(raw, width + 1), binary(bits, width)))
                .value(StepValue::Text(binary(bits, width)))
                .explain(if carry == 1 {
                    "The carry out of the top bit is discarded; it carries no information about \
                     the difference."
                } else {
                    "There is no carry out of the top bit, which already hints at a negative \
                     result."
                }),
        );

        let answer = if bits & sign_bit == 0 {
            trace.push(
                Step::calculation("Read the sign bit")
                    .describe("The top bit is 0, so the result is positive")
                    .calc(format!("{} = {bits}", binary(bits, width)))
                    .value(bits as f64),
            );
            bits as f64
        } else {
            let magnitude = ((!bits & mask) + 1) & mask;
            trace.push(
                Step::calculation("Read the sign bit")
                    .describe("The top bit is 1, so the result is negative: negate again to find its size")
                    .calc(format!(
                        "NOT {} + 1 = {} = {magnitude}",
                        binary(bits, width),
                        binary(magnitude, width)
                    ))
                    .value(-(magnitude as f64)),
            );
            -(magnitude as f64)
        };

        trace.push(
            Step::result("Answer")
                .describe("Convert back to decimal")
                .calc(format!("{a} - {b} = {answer}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer).verified(num1 - num2, self.tolerance())
    }
}
