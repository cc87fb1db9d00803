//! Newton-Raphson square root (Heron's method).
//!
//! Applying Newton's method to `f(x) = x² - S` gives
//!
//! ```text
//! x_{n+1} = (x_n + S / x_n) / 2
//! ```
//!
//! which doubles the number of correct digits each iteration once close.
//! Iteration stops when successive iterates differ by less than the
//! configured convergence threshold, taken relative to the current iterate,
//! or the iteration cap is reached.
//!
//! `num1` is the radicand `S`. A positive `num2` is used as the starting
//! guess; otherwise the guess is `2^(⌊log2 S⌋ / 2)`, which is within a
//! factor of two of `√S` at any magnitude.
//!
//! `S` is limited to [`MAX_RADICAND`] so the root's rounding error stays
//! inside the absolute verification tolerance.

use crate::config::IterationConfig;
use crate::digits;
use crate::method::{ArithmeticMethod, Example, Validation};
use crate::model::{
    CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step, StepValue,
    Trace,
};
use crate::verify::{Tolerance, ITERATIVE_EPSILON};

/// Largest radicand `calculate` accepts.
pub const MAX_RADICAND: f64 = 1e15;

static METADATA: MethodMetadata = MethodMetadata {
    difficulty: Difficulty::Advanced,
    display_order: 5,
    origin: Origin {
        culture: "Babylonian and Greek mathematics; Newton and Raphson",
        time_period: "Hero of Alexandria, 1st century; generalized 1669-1690",
        description: "The averaging rule for square roots was known to Hero of Alexandria; \
                      Newton and Raphson generalized it to arbitrary equations.",
    },
    when_to_use: &[
        "Square roots to many decimal places",
        "Seeing quadratic convergence",
    ],
    advantages: &[
        "Correct digits roughly double every iteration",
        "Only division, addition and halving",
    ],
    disadvantages: &[
        "Needs a starting guess",
        "Approximate: stops at a tolerance",
    ],
    speed: Speed::Fast,
    math_principle: "The tangent to f(x) = x² - S at x_n crosses zero at x_n - f(x_n)/f'(x_n) = \
                     (x_n + S/x_n)/2. If x_n overestimates √S then S/x_n underestimates it, and \
                     their average is closer than either.",
    related_methods: &["newton-reciprocal", "long-division"],
    time_complexity: "O(log log(1/ε)) iterations near the root",
    recommended_use: "Computing square roots numerically",
    alternative: "newton-reciprocal",
    ..MethodMetadata::new("newton-raphson", "Newton-Raphson Square Root", Category::Numerical)
};

/// The trajectory of one Newton-Raphson run.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence {
    /// Starting guess.
    pub seed: f64,
    /// Every iterate after the seed, in order.
    pub iterates: Vec<f64>,
    /// The last iterate (the seed if no iteration ran).
    pub root: f64,
    /// Whether the convergence threshold was met before the cap.
    pub converged: bool,
}

impl Convergence {
    /// Number of iterations performed.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterates.len()
    }
}

/// Square root by Newton iteration.
#[derive(Debug, Clone, Copy)]
pub struct NewtonRaphson {
    tolerance: Tolerance,
    iteration: IterationConfig,
}

impl NewtonRaphson {
    /// A solver verified with `tolerance` and stopped by `iteration`.
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

    /// Runs the iteration for `√s` from `seed`, or from the default guess
    /// when `seed` is not positive. `s` must be finite and non-negative.
    #[must_use]
    pub fn iterate(&self, s: f64, seed: f64) -> Convergence {
        let seed = if seed > 0.0 { seed } else { default_seed(s) };
        if s == 0.0 {
            return Convergence {
                seed,
                iterates: Vec::new(),
                root: 0.0,
                converged: true,
            };
        }

        let mut iterates = Vec::new();
        let mut x = seed;
        let mut converged = false;
        for _ in 0..self.iteration.max_iterations {
            let next = (x + s / x) / 2.0;
            iterates.push(next);
            let change = (next - x).abs();
            x = next;
            if change < self.iteration.convergence * x.abs() {
                converged = true;
                break;
            }
        }
        Convergence {
            seed,
            iterates,
            root: x,
            converged,
        }
    }
}

/// `2^(⌊log2 s⌋ / 2)`, or 1 for `s = 0`.
fn default_seed(s: f64) -> f64 {
    if s > 0.0 {
        2f64.powi(s.log2().floor() as i32 / 2)
    } else {
        1.0
    }
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new(Tolerance::Absolute(ITERATIVE_EPSILON), IterationConfig::default())
    }
}

impl ArithmeticMethod for NewtonRaphson {
    fn metadata(&self) -> &'static MethodMetadata {
        &METADATA
    }

    fn example(&self) -> Example {
        Example {
            num1: 2.0,
            num2: 1.0,
            description: "√2 from a starting guess of 1",
        }
    }

    fn validate(&self, num1: f64, num2: f64) -> Validation {
        let radicand = digits::require_finite("number", num1).and_then(|| {
            if num1 < 0.0 {
                Validation::reject("cannot take the square root of a negative number")
            } else if num1 > MAX_RADICAND {
                Validation::reject(format!("number must be at most {MAX_RADICAND}"))
            } else {
                Validation::ok()
            }
        });
        radicand.and_then(|| {
            if num2.is_finite() && num2 >= 0.0 {
                Validation::ok()
            } else {
                Validation::reject("starting guess must be a finite number that is not negative")
            }
        })
    }

    fn calculate(&self, num1: f64, num2: f64) -> CalculationResult {
        if !self.validate(num1, num2).valid {
            return CalculationResult::unsupported(
                &METADATA,
                num1,
                num2,
                "Newton-Raphson square root needs a finite number between 0 and 1e15.",
            );
        }

        let run = self.iterate(num1, num2);
        let mut trace = Trace::new();
        trace.push(
            Step::info("Guess, then improve")
                .describe(format!("Find √{num1} by averaging a guess with {num1} divided by the guess"))
                .calc("x_{n+1} = (x_n + S / x_n) / 2")
                .explain(format!(
                    "Stop when two guesses differ by less than {} of the guess, or after {} iterations.",
                    self.iteration.convergence, self.iteration.max_iterations
                )),
        );
        trace.push(
            Step::input("Starting guess")
                .describe(if num2 > 0.0 {
                    "Use the supplied guess".to_string()
                } else {
                    "Start from the power of two whose square is nearest the number".to_string()
                })
                .calc(format!("S = {num1}, x_0 = {}", run.seed))
                .value(run.seed),
        );

        let mut previous = run.seed;
        for (i, &x) in run.iterates.iter().enumerate() {
            let change = (x - previous).abs();
            trace.push(
                Step::calculation(format!("Iteration {}", i + 1))
                    .calc(format!(
                        "x_{} = ({previous} + {num1} / {previous}) / 2 = {x}",
                        i + 1
                    ))
                    .value(StepValue::record([("x", x), ("change", change)])),
            );
            previous = x;
        }
        if num1 == 0.0 {
            trace.push(
                Step::calculation("Zero")
                    .describe("The square root of zero is zero; no iteration is needed")
                    .calc("√0 = 0")
                    .value(0.0),
            );
        } else if !run.converged {
            trace.push(
                Step::info("Iteration cap reached")
                    .describe(format!(
                        "Stopped after {} iterations without meeting the threshold",
                        run.iterations()
                    )),
            );
        }

        trace.push(
            Step::result("Square root")
                .describe(if run.converged {
                    format!("Converged after {} iteration(s)", run.iterations())
                } else {
                    format!("Best estimate after {} iteration(s)", run.iterations())
                })
                .calc(format!("√{num1} ≈ {}", run.root))
                .value(run.root),
        );

        CalculationResult::new(&METADATA, num1, num2, trace, run.root)
            .verified(num1.sqrt(), self.tolerance)
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
    fn square_roots_converge_quickly() {
        let newton = NewtonRaphson::default();
        for s in [2.0f64, 3.0, 10.0, 100.0] {
            let result = newton.calculate(s, 0.0);
            let root = result.answer().expect("numeric answer");
            assert!((root - s.sqrt()).abs() < ITERATIVE_EPSILON, "√{s} ≈ {root}");
            assert!(result.is_correct());
            let run = newton.iterate(s, 0.0);
            assert!(run.converged);
            assert!(run.iterations() < 50);
        }
    }

    #[test]
    fn one_step_per_iteration() {
        let newton = NewtonRaphson::default();
        let run = newton.iterate(2.0, 1.0);
        let result = newton.calculate(2.0, 1.0);
        let iterations = result.steps.iter().filter(|s| s.title.starts_with("Iteration")).count();
        assert_eq!(iterations, run.iterations());
        assert_eq!(run.iterates[0], 1.5);
    }

    #[test]
    fn default_seeds() {
        let newton = NewtonRaphson::default();
        assert_eq!(newton.iterate(16.0, 0.0).seed, 4.0);
        assert_eq!(newton.iterate(0.25, 0.0).seed, 0.5);
        assert_eq!(newton.iterate(1e30, 0.0).seed, 2f64.powi(49));
        assert_eq!(newton.iterate(16.0, 3.0).seed, 3.0);
    }

    #[test]
    fn extreme_magnitudes_converge_to_the_root() {
        let newton = NewtonRaphson::default();
        for s in [1e-300, 1e-20, 1e-6, 0.5, 1e6, 1e15, 1e30, 1e300] {
            let run = newton.iterate(s, 0.0);
            let relative = (run.root - s.sqrt()).abs() / s.sqrt();
            assert!(run.converged, "√{s} did not converge");
            assert!(relative < 1e-12, "√{s} ≈ {}", run.root);
            assert!(run.iterations() < 10, "√{s} took {} iterations", run.iterations());
        }
    }

    #[test]
    fn tiny_radicand_is_not_a_false_convergence() {
        let result = NewtonRaphson::default().calculate(1e-20, 0.0);
        let root = result.answer().expect("numeric answer");
        assert!((root - 1e-10).abs() < 1e-21, "got {root}");
        assert!(result.is_correct());
    }

    #[test]
    fn radicands_above_the_limit_are_rejected() {
        let newton = NewtonRaphson::default();
        assert!(newton.validate(MAX_RADICAND, 0.0).valid);
        assert!(newton.calculate(MAX_RADICAND, 0.0).is_correct());
        assert!(!newton.validate(1e30, 0.0).valid);
        assert_eq!(newton.calculate(1e30, 0.0).verification.correct, Some(false));
    }

    #[test]
    fn zero_and_small_radicands() {
        let newton = NewtonRaphson::default();
        let result = newton.calculate(0.0, 0.0);
        assert_eq!(result.answer(), Some(0.0));
        assert!(result.is_correct());

        let result = newton.calculate(0.25, 0.0);
        assert!(result.is_correct());
    }

    #[test]
    fn cap_limits_iterations() {
        let newton = NewtonRaphson::new(
            Tolerance::Absolute(ITERATIVE_EPSILON),
            IterationConfig {
                convergence: 1e-7,
                max_iterations: 2,
            },
        );
        let run = newton.iterate(1e6, 1.0);
        assert_eq!(run.iterations(), 2);
        assert!(!run.converged);
        let result = newton.calculate(1e6, 1.0);
        assert!(result.steps.iter().any(|s| s.title == "Iteration cap reached"));
        assert_eq!(result.verification.correct, Some(false));
    }

    #[test]
    fn rejects_negative_input() {
        let newton = NewtonRaphson::default();
        assert!(!newton.validate(-4.0, 0.0).valid);
        assert!(!newton.validate(4.0, -1.0).valid);
        assert_eq!(newton.calculate(-4.0, 0.0).verification.correct, Some(false));
    }
}
