//! Lattice (gelosia) multiplication.
//!
//! Every digit pair gets its own cell, split by a diagonal into tens and
//! units. Summing along the diagonals, right to left with carries, yields
//! the product digits. Diagonal `k` holds the units of cells with `i + j = k`
//! and the tens of cells with `i + j = k - 1`.

use crate::digits;
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::LIMIT;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Intermediate,
    display_order: 3,
    origin: Origin {
        culture: "Islamic and Renaissance Italian mathematics",
        time_period: "13th to 16th century",
        description: "Known to Arab mathematicians and popularised in Europe by Fibonacci's \
                      Liber Abaci; the grid resembles Venetian window lattices (gelosia).",
    },
    when_to_use: &[
        "Multiplying long numbers by hand",
        "Separating the multiplying from the adding",
    ],
    advantages: &[
        "All single-digit products are written before any addition",
        "No carrying while multiplying",
        "Place value is handled by the grid",
    ],
    disadvantages: &["Drawing the grid takes time"],
    speed: Speed::Slow,
    math_principle: "Each cell holds a_i × b_j, whose tens belong to place i + j + 1 and whose \
                     units belong to place i + j. The diagonals of the grid collect exactly the \
                     contributions to one place value.",
    related_methods: &["grade-school", "vedic"],
    time_complexity: "O(n·m) digit products",
    recommended_use: "Error-resistant multiplication of multi-digit numbers",
    alternative: "grade-school",
    ..MethodMetadata::new("lattice", "Lattice Multiplication", Category::Ancient)
};

/// Grid multiplication with diagonal sums.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lattice;

impl ArithmeticMethod for Lattice {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 58.0,
            num2: 213.0,
            description: "A 2 by 3 grid with carries between diagonals",
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
                "Lattice multiplication needs whole numbers between 0 and 9999999.",
            );
        };

        let x = digits::digits(a);
        let y = digits::digits(b);

        let mut trace = Trace::new();
        trace.push(
            Step::info("Draw the lattice")
                .describe(format!(
                    "A grid with {} column(s) for {a} and {} row(s) for {b}, each cell split diagonally",
                    x.len(),
                    y.len()
                ))
                .explain("Tens go above each cell's diagonal, units below."),
        );
        trace.push(
            Step::input("Label the grid")
                .describe(format!("{a} across the top, {b} down the right side"))
                .calc(format!("{a} × {b}")),
        );

        // cells[j][i] = x[i] * y[j], both indexed from the ones digit.
        let cells: Vec<Vec<u8>> = y
            .iter()
            .map(|&q| x.iter().map(|&p| p * q).collect())
            .collect();
        for (j, row) in cells.iter().enumerate().rev() {
            let shown: Vec<String> = row
                .iter()
                .zip(&x)
                .rev()
                .map(|(cell, p)| format!("{p}×{}={}/{}", y[j], cell / 10, cell % 10))
                .collect();
            trace.push(
                Step::calculation(format!("Fill row for digit {}", y[j]))
                    .describe("Write each product as tens/units")
                    .calc(shown.join(", ")),
            );
        }

        let diagonals = x.len() + y.len();
        let mut out = Vec::with_capacity(diagonals);
        let mut carry = 0u32;
        for k in 0..diagonals {
            let mut parts = Vec::new();
            for (j, row) in cells.iter().enumerate() {
                for (i, &cell) in row.iter().enumerate() {
                    if i + j == k {
                        parts.push(u32::from(cell % 10));
                    } else if i + j + 1 == k {
                        parts.push(u32::from(cell / 10));
                    }
                }
            }
            let total = parts.iter().sum::<u32>() + carry;
            let digit = total % 10;
            let carry_out = total / 10;

            let mut expression = parts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            if carry > 0 {
                expression.push_str(&format!(" + {carry} (carry)"));
            }
            expression.push_str(&format!(" = {total}"));
            trace.push(
                Step::calculation(format!("Diagonal {}", k + 1))
                    .describe("Add the numbers along the diagonal, starting at the bottom right")
                    .calc(expression)
                    .value(StepValue::record([
                        ("digit", f64::from(digit)),
                        ("carry", f64::from(carry_out)),
                    ])),
            );
            out.push(digit as u8);
            carry = carry_out;
        }

        let answer = digits::from_digits(&out) as f64;
        trace.push(
            Step::result("Answer")
                .describe("Read the diagonal digits from top left to bottom right")
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
    fn fifty_eight_times_two_thirteen() {
        let result = Lattice.calculate(58.0, 213.0);
        assert_eq!(result.answer(), Some(12_354.0));
        assert!(result.is_correct());

        let diagonals: Vec<&Step> = result
            .steps
            .iter()
            .filter(|s| s.title.starts_with("Diagonal"))
            .collect();
        assert_eq!(diagonals.len(), 5);
        // 8×3 = 24 → units 4 alone on the first diagonal
        assert_eq!(diagonals[0].calculation, "4 = 4");
    }

    #[test]
    fn leading_zero_diagonal_is_dropped() {
        assert_eq!(Lattice.calculate(2.0, 3.0).answer(), Some(6.0));
        assert_eq!(Lattice.calculate(0.0, 0.0).answer(), Some(0.0));
    }
}
