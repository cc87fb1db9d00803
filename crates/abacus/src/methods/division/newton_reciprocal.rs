//! Division by Newton iteration on the reciprocal.
//!
//! `n / d` is computed as `n × (1/d)`, where `1/d` is the root of
//! `f(x) = 1/x - d`. Newton's method on that function needs no division:
//!
//! ```text
//! x_{k+1} = x_k · (2 - d·x_k)
//! ```
//!
//! The divisor is first scaled by a power of two into `[0.5, 1)`, where the
//! linear seed `48/17 - 32/17·m` is within 1/17 of `1/m`; the error then
//! squares every iteration. Iteration stops by the same [`IterationConfig`]
//! rule as the square-root solver.

use crate::config::IterationConfig;
use crate::digits;
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};
use crate::verify::{Tolerance, ITERATIVE_EPSILON};

/// Largest quotient whose rounding error stays well inside the tolerance.
const MAX_QUOTIENT: f64 = 1e9;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 6,
    origin: Origin {
        culture: "Numerical analysis and processor design",
        time_period: "20th century",
        description: "Used by floating-point units and big-number libraries that have fast \
                      multipliers but no fast divider.",
    },
    when_to_use: &[
        "Division where only multiplication is fast",
        "High-precision quotients",
    ],
    advantages: &[
        "Uses only multiplication and subtraction",
        "Quadratic convergence",
    ],
    disadvantages: &["Approximate", "Needs the divisor scaled first"],
    speed: Speed::Fast,
    math_principle: "For f(x) = 1/x - d, Newton's step x - f(x)/f'(x) simplifies to x(2 - d·x). \
                     With e = 1 - d·x, the next error is e², so correct bits double each step.",
    related_methods: &["newton-raphson", "non-restoring"],
    time_complexity: "O(log p) iterations for p bits of precision",
    recommended_use: "Fast floating-point division",
    alternative: "long-division",
    ..MethodMetadata::new("newton-reciprocal", "Newton Reciprocal Division", Category::Numerical)
};

/// `num1 / num2` through Newton iteration for `1 / num2`.
#[derive(Debug, Clone, Copy)]
pub struct NewtonReciprocal {
    tolerance: Tolerance,
    iteration: IterationConfig,
}

impl NewtonReciprocal {
    /// Reciprocal division verified with `tolerance` and stopped by
    /// `iteration`.
    #[must_use]
    pub const fn new(tolerance: Tolerance, iteration: IterationConfig) -> Self {
        Self {
            tolerance,
            iteration,
        }
    }

    /// The stopping rule in use.
    #[must_use]
    pub fn iteration(&self) -> IterationConfig {
        self.iteration
    }
}

impl Default for NewtonReciprocal {
    fn default() -> Self {
        Self::new(Tolerance::Absolute(ITERATIVE_EPSILON), IterationConfig::default())
    }
}

/// Splits a positive finite `d` into `m · 2^e` with `m` in `[0.5, 1)`.
fn scale(d: f64) -> (f64, i32) {
    let mut e = d.log2().floor() as i32 + 1;
    let mut m = d / 2f64.powi(e);
    while m >= 1.0 {
        m /= 2.0;
        e += 1;
    }
    while m < 0.5 {
        m *= 2.0;
        e -= 1;
    }
    (m, e)
}

impl ArithmeticMethod for NewtonReciprocal {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 1.0,
            num2: 3.0,
            description: "1/3 has no finite binary expansion",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        digits::require_finite("dividend", num1)
            .and_then(|| digits::require_finite("divisor", num2))
            .and_then(|| {
                let size = num2.abs();
                if size == 0.0 {
                    Validation::reject("divisor must not be zero")
                } else if !(1e-300..=1e300).contains(&size) {
                    Validation::reject("divisor must be between 1e-300 and 1e300 in size")
                } else if (num1 / num2).abs() > MAX_QUOTIENT {
                    Validation::reject(format!("quotient must be at most {MAX_QUOTIENT} in size"))
                } else {
                    Validation::ok()
                }
            })
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        let check = self.validate(num1, num2);
        if !check.valid {
            return CalculationResult::unsupported(&METADATA, num1, num2, check.message);
        }

        let negative = (num1 < 0.0) != (num2 < 0.0);
        let (m, e) = scale(num2.abs());

        let mut trace = Trace::new();
        trace.push(
            Step::info("Divide by multiplying")
                .describe(format!("Find 1/{num2} without dividing, then multiply by {num1}"))
                .calc("x_{k+1} = x_k · (2 - d·x_k)"),
        );
        trace.push(
            Step::input("Scale the divisor")
                .describe("Write |d| as m·2^e with m between 0.5 and 1")
                .calc(format!("{} = {m}·2^{e}", num2.abs()))
                .value(StepValue::record([("m", m), ("e", f64::from(e))])),
        );

        let seed = 48.0 / 17.0 - 32.0 / 17.0 * m;
        trace.push(
            Step::calculation("Initial estimate")
                .describe("A straight-line fit to 1/m on [0.5, 1)")
                .calc(format!("x_0 = 48/17 - 32/17·{m} = {seed}"))
                .value(seed),
        );

        let mut x = seed;
        for k in 1..=self.iteration.max_iterations {
            let next = x * (2.0 - m * x);
            let change = (next - x).abs();
            trace.push(
                Step::calculation(format!("Iteration {k}"))
                    .calc(format!("x_{k} = {x}·(2 - {m}·{x}) = {next}"))
                    .value(StepValue::record([("x", next), ("error", (1.0 - m * next).abs())])),
            );
            x = next;
            if change < self.iteration.convergence * x.abs() {
                break;
            }
        }

        let reciprocal = x / 2f64.powi(e);
        trace.push(
            Step::calculation("Undo the scaling")
                .describe(format!("1/|d| = (1/m) / 2^{e}"))
                .calc(format!("{x} / 2^{e} = {reciprocal}"))
                .value(reciprocal),
        );

        let magnitude = num1.abs() * reciprocal;
        let answer = if negative { -magnitude } else { magnitude };
        trace.push(
            Step::result("Answer")
                .describe("Multiply the dividend by the reciprocal and restore the sign")
                .calc(format!("{num1} × {}{reciprocal} = {answer}", if num2 < 0.0 { "-" } else { "" }))
                .value(answer),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, answer).verified(num1 / num2, self.tolerance)
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn scaling_lands_in_half_open_unit() {
        for d in [1.0, 3.0, 0.5, 0.75, 1024.0, 1e-10, 7e12] {
            let (m, e) = scale(d);
            assert!((0.5..1.0).contains(&m), "{d} -> {m}");
            assert_eq!(m * 2f64.powi(e), d);
        }
    }

    #[test]
    fn one_third() {
        let result = NewtonReciprocal::default().calculate(1.0, 3.0);
        let answer = result.answer().expect("numeric answer");
        assert!((answer - 1.0 / 3.0).abs() < 1e-12);
        assert!(result.is_correct());
        let iterations = result.steps.iter().filter(|s| s.title.starts_with("Iteration")).count();
        assert!(iterations <= 6, "took {iterations} iterations");
    }

    #[test]
    fn signs() {
        let newton = NewtonReciprocal::default();
        assert!(newton.calculate(-10.0, 4.0).answer().is_some_and(|q| (q + 2.5).abs() < 1e-12));
        assert!(newton.calculate(10.0, -4.0).answer().is_some_and(|q| (q + 2.5).abs() < 1e-12));
        assert!(newton.calculate(-10.0, -4.0).answer().is_some_and(|q| (q - 2.5).abs() < 1e-12));
    }

    #[test]
    fn iteration_settings_come_from_config() {
        let capped = NewtonReciprocal::new(
            Tolerance::Absolute(ITERATIVE_EPSILON),
            IterationConfig {
                convergence: 1e-7,
                max_iterations: 1,
            },
        );
        let result = capped.calculate(1.0, 3.0);
        let iterations = result.steps.iter().filter(|s| s.title.starts_with("Iteration")).count();
        assert_eq!(iterations, 1);
        assert_eq!(result.verification.correct, Some(false));

        let strict = NewtonReciprocal::new(
            Tolerance::Absolute(ITERATIVE_EPSILON),
            IterationConfig {
                convergence: 1e-15,
                max_iterations: 50,
            },
        );
        let answer = strict.calculate(22.0, 7.0).answer().expect("numeric answer");
        assert!((answer - 22.0 / 7.0).abs() < 1e-14);
    }

    #[test]
    fn rejects_zero_and_huge_quotients() {
        let newton = NewtonReciprocal::default();
        assert!(!newton.validate(1.0, 0.0).valid);
        assert!(!newton.validate(1e12, 1e-3).valid);
        assert_eq!(newton.calculate(1.0, 0.0).verification.correct, Some(false));
    }
}
