//! Verification layer: compares a method's answer with ground truth and
//! checks trace well-formedness.
//!
//! Exact methods compare with `==`. Floating and iterative methods compare
//! with an absolute epsilon, because their inherent rounding would otherwise
//! produce false negatives.
//!
//! | Method family | Tolerance |
//! |---------------|-----------|
//! | Digit and bit algorithms | [`Tolerance::Exact`] |
//! | Floating summation (Kahan) | `Absolute(DEFAULT_EPSILON)` against [`exact_sum`] |
//! | Newton-style iteration | `Absolute(ITERATIVE_EPSILON)` |

use crate::error::TraceError;
use crate::model::{Answer, Step, StepKind, Verification};

/// Default epsilon for floating methods.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Looser epsilon for iterative methods that stop at a convergence threshold.
pub const ITERATIVE_EPSILON: f64 = 1e-4;

/// How a final answer is compared with the expected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Bit-for-bit equality.
    Exact,
    /// `|answer - expected| < epsilon`.
    Absolute(f64),
}

impl Tolerance {
    /// True if `answer` is acceptable for `expected`. NaN is never accepted.
    #[must_use]
    pub fn accepts(self, answer: f64, expected: f64) -> bool {
        match self {
            Tolerance::Exact => answer == expected,
            Tolerance::Absolute(epsilon) => (answer - expected).abs() < epsilon,
        }
    }
}

/// Compares `answer` with `expected` under `tolerance`.
///
/// Text answers compare by string equality regardless of tolerance. A
/// mismatch is logged at warn level; it is never an error.
#[must_use]
pub fn verify(answer: &Answer, expected: &Answer, tolerance: Tolerance) -> Verification {
    let correct = match (answer, expected) {
        (Answer::Number(a), Answer::Number(e)) => tolerance.accepts(*a, *e),
        (Answer::Text(a), Answer::Text(e)) => a == e,
        _ => false,
    };
    if !correct {
        tracing::warn!(%answer, %expected, ?tolerance, "verification mismatch");
    }
    Verification {
        expected: Some(expected.clone()),
        correct: Some(correct),
    }
}

/// Correctly rounded sum of `values`, the ground truth for floating
/// summation.
///
/// Shewchuk's algorithm: every partial sum is split into a rounded high part
/// and its exact rounding error, so the list of partials always adds up to
/// the exact total. The partials are then rounded once, half to even.
/// Intermediate overflow is not handled.
#[must_use]
pub fn exact_sum(values: &[f64]) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    for &value in values {
        let mut x = value;
        let mut kept = 0;
        for i in 0..partials.len() {
            let mut y = partials[i];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some((&top, rest)) = partials.split_last() else {
        return 0.0;
    };
    let mut hi = top;
    let mut lo = 0.0;
    let mut remaining = rest;
    while let Some((&y, below)) = remaining.split_last() {
        let x = hi;
        hi = x + y;
        lo = y - (hi - x);
        remaining = below;
        if lo != 0.0 {
            break;
        }
    }
    // lo is exactly half an ulp and the next partial breaks the tie
    if let Some(&next) = remaining.last() {
        if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
    }
    hi
}

/// Checks the trace invariants.
///
/// # Errors
///
/// Returns the first violated invariant: empty trace, a step number that is
/// not its 1-based position, a last step that is not RESULT, or a RESULT
/// value that differs from `answer`.
pub fn check_trace(steps: &[Step], answer: &Answer) -> Result<(), TraceError> {
    let last = steps.last().ok_or(TraceError::Empty)?;
    for (index, step) in steps.iter().enumerate() {
        if step.step_number != index + 1 {
            return Err(TraceError::OutOfOrder {
                index,
                found: step.step_number,
                expected: index + 1,
            });
        }
    }
    if last.kind != StepKind::Result {
        return Err(TraceError::MissingResult(last.kind));
    }
    if !last.result.matches(answer) {
        return Err(TraceError::ResultMismatch {
            answer: answer.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::model::Trace;

    #[test]
    fn exact_requires_equality() {
        let v = verify(&Answer::Number(432.0), &Answer::Number(432.0), Tolerance::Exact);
        assert_eq!(v.correct, Some(true));
        assert_eq!(v.expected, Some(Answer::Number(432.0)));

        let v = verify(&Answer::Number(0.1 + 0.2), &Answer::Number(0.3), Tolerance::Exact);
        assert_eq!(v.correct, Some(false));
    }

    #[test]
    fn absolute_uses_strict_epsilon() {
        let tol = Tolerance::Absolute(DEFAULT_EPSILON);
        assert!(tol.accepts(0.1 + 0.2, 0.3));
        assert!(!tol.accepts(1.0, 1.0 + 2.0 * DEFAULT_EPSILON));
        assert!(Tolerance::Absolute(ITERATIVE_EPSILON).accepts(1.41421, 2f64.sqrt()));
    }

    #[test]
    fn nan_is_never_correct() {
        assert!(!Tolerance::Exact.accepts(f64::NAN, f64::NAN));
        assert!(!Tolerance::Absolute(1.0).accepts(f64::NAN, 0.0));
    }

    #[test]
    fn text_answers_compare_as_strings() {
        let a = Answer::Text("x + 3".into());
        assert_eq!(verify(&a, &a.clone(), Tolerance::Exact).correct, Some(true));
        let b = Answer::Text("x + 4".into());
        assert_eq!(verify(&a, &b, Tolerance::Exact).correct, Some(false));
        assert_eq!(
            verify(&a, &Answer::Number(3.0), Tolerance::Exact).correct,
            Some(false)
        );
    }

    #[test]
    fn exact_sum_keeps_every_bit() {
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[0.1; 10]), 1.0);
        assert_eq!(exact_sum(&[1e16, 1.0, 1.0]), 1e16 + 2.0);
        assert_eq!(exact_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
        assert_eq!(exact_sum(&[0.1, 0.2]), 0.1 + 0.2);
    }

    #[test]
    fn check_trace_reports_each_violation() {
        assert_eq!(check_trace(&[], &Answer::Number(1.0)), Err(TraceError::Empty));

        let mut trace = Trace::new();
        trace.push(Step::info("setup"));
        assert_eq!(
            check_trace(trace.steps(), &Answer::Number(1.0)),
            Err(TraceError::MissingResult(StepKind::Info))
        );

        trace.push(Step::result("done").value(2.0));
        assert_eq!(
            check_trace(trace.steps(), &Answer::Number(1.0)),
            Err(TraceError::ResultMismatch {
                answer: "1".to_string()
            })
        );
        assert_eq!(check_trace(trace.steps(), &Answer::Number(2.0)), Ok(()));

        let mut steps = trace.into_steps();
        steps[0].step_number = 5;
        assert_eq!(
            check_trace(&steps, &Answer::Number(2.0)),
            Err(TraceError::OutOfOrder {
                index: 0,
                found: 5,
                expected: 1
            })
        );
    }
}
