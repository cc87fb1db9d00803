//! Synthetic division.
//!
//! Ruffini's rule divides a polynomial by a linear factor `(x - r)` using
//! only multiply-and-add on the coefficient list:
//!
//! ```text
//! b[0] = c[0]
//! b[i] = c[i] + r·b[i-1]
//! ```
//!
//! The last `b` is the remainder `P(r)`; the others are the quotient's
//! coefficients.
//!
//! Whole-number division reuses the rule by reading the dividend as a
//! polynomial in `x = B`, where `B` is the power of ten just above the
//! divisor `d`. Its base-`B` digits are the coefficients, and `d = B - r`
//! turns `÷ d` into `÷ (x - r)` at `x = B`. For single-digit divisors `B`
//! is 10 and `r = 10 - d`. Evaluating the quotient polynomial at `B` and
//! normalizing the remainder gives the integer quotient.

use crate::digits::{self, digit_count, MAX_EXACT};
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};

use super::require_divisor;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 3,
    origin: Origin {
        culture: "Italian and English algebra",
        time_period: "Paolo Ruffini, 1809; William Horner, 1819",
        description: "Developed for evaluating and deflating polynomials; the same table is \
                      Horner's method for evaluating P(r).",
    },
    when_to_use: &[
        "Dividing a polynomial by x - r",
        "Evaluating a polynomial at a point",
    ],
    advantages: &[
        "Only multiplication and addition",
        "Remainder equals P(r) for free",
    ],
    disadvantages: &["Only divides by linear factors"],
    speed: Speed::Fast,
    math_principle: "P(x) = (x - r)·Q(x) + P(r). Matching coefficients gives the recurrence \
                     b[i] = c[i] + r·b[i-1]; a number is a polynomial in its base, so the same \
                     recurrence divides integers.",
    related_methods: &["long-division", "vedic"],
    time_complexity: "O(n) for n coefficients",
    recommended_use: "Polynomial division by a linear factor",
    alternative: "long-division",
    ..MethodMetadata::new("synthetic", "Synthetic Division", Category::Standard)
};

/// Synthetic (Ruffini) division, for integers and for polynomials.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticDivision;

impl SyntheticDivision {
    /// Divides the polynomial with `coefficients` (highest degree first) by
    /// `(x - root)`.
    ///
    /// The answer is the quotient polynomial as text, e.g. `x^2 + 2x + 3`;
    /// the remainder `P(root)` goes in [`CalculationResult::remainder`].
    /// `num1` carries the dividend's degree and `num2` the root. Verification
    /// compares against polynomial long division.
    #[must_use]
    pub fn divide_polynomial(&self, coefficients: &[f64], root: f64) -> CalculationResult {
        let degree = coefficients.len().saturating_sub(1) as f64;
        if coefficients.is_empty() {
            return CalculationResult::unsupported(
                &METADATA,
                degree,
                root,
                "A polynomial needs at least one coefficient.",
            );
        }
        if !root.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return CalculationResult::unsupported(
                &METADATA,
                degree,
                root,
                "Coefficients and root must be finite numbers.",
            );
        }

        let mut trace = Trace::new();
        trace.push(
            Step::info("Synthetic division")
                .describe(format!("Divide {} by (x - {root})", format_polynomial(coefficients)))
                .explain("Bring down the first coefficient, then repeatedly multiply by the root and add."),
        );
        trace.push(
            Step::input("Coefficients")
                .describe("Highest degree first, with zeros for missing powers")
                .calc(format!("{coefficients:?}, r = {root}")),
        );

        let mut row: Vec<f64> = Vec::with_capacity(coefficients.len());
        for (i, &c) in coefficients.iter().enumerate() {
            let (b, expression) = match row.last() {
                None => (c, format!("bring down {c}")),
                Some(&prev) => {
                    let b = c + root * prev;
                    (b, format!("{c} + {root}×{prev} = {b}"))
                }
            };
            let last = i + 1 == coefficients.len();
            trace.push(
                Step::calculation(if last {
                    "Remainder".to_string()
                } else {
                    format!("Coefficient {}", i + 1)
                })
                .calc(expression)
                .value(b),
            );
            row.push(b);
        }

        let remainder = row.pop().unwrap_or(0.0);
        let quotient = format_polynomial(&row);
        trace.push(
            Step::result("Quotient")
                .describe(format!("Remainder P({root}) = {remainder}"))
                .calc(format!("{} = (x - {root})({quotient}) + {remainder}", format_polynomial(coefficients)))
                .value(quotient.clone()),
        );

        let (expected, _) = long_divide(coefficients, root);
        CalculationResult::new(&METADATA, degree, root, trace, quotient)
            .with_remainder(remainder)
            .verified(format_polynomial(&expected), self.tolerance())
    }
}

/// Polynomial long division by `(x - root)`, computed by repeated
/// subtraction of the leading term.
fn long_divide(coefficients: &[f64], root: f64) -> (Vec<f64>, f64) {
    let mut working = coefficients.to_vec();
    let mut quotient = Vec::with_capacity(working.len().saturating_sub(1));
    for i in 0..working.len().saturating_sub(1) {
        let lead = working[i];
        quotient.push(lead);
        // subtract lead·x^k·(x - root)
        working[i] -= lead;
        working[i + 1] -= lead * -root;
    }
    (quotient, working.last().copied().unwrap_or(0.0))
}

/// Renders coefficients (highest degree first) as `3x^2 - x + 4`.
pub(crate) fn format_polynomial(coefficients: &[f64]) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let mut out = String::new();
    for (i, &c) in coefficients.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = degree - i;
        let magnitude = c.abs();
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        if magnitude != 1.0 || power == 0 {
            out.push_str(&magnitude.to_string());
        }
        match power {
            0 => {}
            1 => out.push('x'),
            p => out.push_str(&format!("x^{p}")),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

impl ArithmeticMethod for SyntheticDivision {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 1234.0,
            num2: 8.0,
            description: "Dividing by 8 is dividing by (x - 2) at x = 10",
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
                "Synthetic division of numbers needs a whole dividend and a whole divisor.",
            );
        };
        if d == 0 {
            return CalculationResult::unsupported(&METADATA, num1, num2, "Division by zero is undefined.");
        }

        let base = 10u64.pow(digit_count(d));
        let root = base - d;

        // Base-B digits, highest first.
        let mut coefficients = Vec::new();
        let mut rest = a;
        loop {
            coefficients.push(u128::from(rest % base));
            rest /= base;
            if rest == 0 {
                break;
            }
        }
        coefficients.reverse();

        let mut trace = Trace::new();
        trace.push(
            Step::info("Numbers are polynomials")
                .describe(format!("Read {a} as a polynomial in x = {base} and {d} as x - {root}"))
                .explain(format!(
                    "{d} = {base} - {root}, so dividing by {d} is dividing by (x - {root}) and then setting x = {base}."
                )),
        );
        trace.push(
            Step::input("Coefficients")
                .describe(format!("The base-{base} digits of {a}"))
                .calc(format!("{coefficients:?}, r = {root}"))
                .value(StepValue::record([("base", base as f64), ("root", root as f64)])),
        );

        let r = u128::from(root);
        let mut row: Vec<u128> = Vec::with_capacity(coefficients.len());
        for (i, &c) in coefficients.iter().enumerate() {
            let (b, expression) = match row.last() {
                None => (c, format!("bring down {c}")),
                Some(&prev) => {
                    let b = c + r * prev;
                    (b, format!("{c} + {root}×{prev} = {b}"))
                }
            };
            let last = i + 1 == coefficients.len();
            trace.push(
                Step::calculation(if last {
                    "Remainder P(r)".to_string()
                } else {
                    format!("Coefficient {}", i + 1)
                })
                .calc(expression)
                .value(b as f64),
            );
            row.push(b);
        }
        let raw_remainder = row.pop().unwrap_or(0);

        let b = u128::from(base);
        let raw_quotient = row.iter().fold(0u128, |acc, &q| acc * b + q);
        trace.push(
            Step::calculation("Evaluate the quotient")
                .describe(format!("Put x = {base} back into the quotient polynomial"))
                .calc(format!("Q({base}) = {raw_quotient}"))
                .value(StepValue::record([
                    ("quotient", raw_quotient as f64),
                    ("remainder", raw_remainder as f64),
                ])),
        );

        let divisor = u128::from(d);
        let carry = raw_remainder / divisor;
        let quotient = raw_quotient + carry;
        let remainder = raw_remainder % divisor;
        trace.push(
            Step::calculation("Normalize")
                .describe("The remainder may still contain the divisor; move whole divisors into the quotient")
                .calc(format!(
                    "{raw_remainder} = {carry}×{d} + {remainder}; {raw_quotient} + {carry} = {quotient}"
                ))
                .value(StepValue::record([
                    ("quotient", quotient as f64),
                    ("remainder", remainder as f64),
                ])),
        );

        let answer = quotient as f64;
        trace.push(
            Step::result("Answer")
                .describe("Quotient, with the final remainder")
                .calc(format!("{a} ÷ {d} = {quotient} remainder {remainder}"))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer)
            .with_remainder(remainder as f64)
            .verified((a / d) as f64, self.tolerance())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::Answer;

    #[test]
    fn single_digit_divisor_uses_ten_minus_d() {
        let result = SyntheticDivision.calculate(1234.0, 8.0);
        assert_eq!(result.answer(), Some(154.0));
        assert_eq!(result.remainder, Some(2.0));
        assert!(result.is_correct());
        assert!(result.steps.iter().any(|s| s.calculation == "[1, 2, 3, 4], r = 2"));
        // 1, 2+2·1 = 4, 3+2·4 = 11, 4+2·11 = 26
        assert!(result.steps.iter().any(|s| s.calculation == "4 + 2×11 = 26"));
    }

    #[test]
    fn multi_digit_divisor_uses_larger_base() {
        let result = SyntheticDivision.calculate(123_456.0, 97.0);
        assert_eq!(result.answer(), Some(1272.0));
        assert_eq!(result.remainder, Some(72.0));
        assert!(result.is_correct());
    }

    #[test]
    fn divisor_equal_to_power_of_ten() {
        let result = SyntheticDivision.calculate(12_345.0, 10.0);
        assert_eq!(result.answer(), Some(1234.0));
        assert_eq!(result.remainder, Some(5.0));
    }

    #[test]
    fn polynomial_quotient() {
        // (x^3 - 6x^2 + 11x - 6) ÷ (x - 1) = x^2 - 5x + 6
        let result = SyntheticDivision.divide_polynomial(&[1.0, -6.0, 11.0, -6.0], 1.0);
        assert_eq!(result.final_answer, Answer::Text("x^2 - 5x + 6".to_string()));
        assert_eq!(result.remainder, Some(0.0));
        assert!(result.is_correct());
    }

    #[test]
    fn remainder_theorem() {
        // P(x) = 2x^2 + 3x + 4, P(2) = 18
        let result = SyntheticDivision.divide_polynomial(&[2.0, 3.0, 4.0], 2.0);
        assert_eq!(result.remainder, Some(18.0));
        assert_eq!(result.final_answer, Answer::Text("2x + 7".to_string()));
    }

    #[test]
    fn constant_and_empty_polynomials() {
        let result = SyntheticDivision.divide_polynomial(&[5.0], 3.0);
        assert_eq!(result.final_answer, Answer::Text("0".to_string()));
        assert_eq!(result.remainder, Some(5.0));

        let result = SyntheticDivision.divide_polynomial(&[], 3.0);
        assert_eq!(result.verification.correct, Some(false));
    }

    #[test]
    fn formats_signs_and_unit_coefficients() {
        assert_eq!(format_polynomial(&[-1.0, 0.0, 1.0]), "-x^2 + 1");
        assert_eq!(format_polynomial(&[0.0, 0.0]), "0");
        assert_eq!(format_polynomial(&[2.5, -1.0]), "2.5x - 1");
    }
}
