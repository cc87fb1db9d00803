//! Verification validator: valid operands verify, and `correct` agrees with
//! the method's own tolerance.

use abacus::{Answer, MethodRegistry};

use super::{label, valid_runs};
use crate::report::{ConformanceReport, TestResult};

/// Validates verification outcomes on every valid run.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let mut wrong = Vec::new();
    let mut inconsistent = Vec::new();

    for (operation, method, a, b) in valid_runs(registry) {
        let result = method.calculate(a, b);
        let at = label(operation, method, a, b);
        let Some(expected) = &result.verification.expected else {
            wrong.push(format!("{at}: verification never ran"));
            continue;
        };
        if !result.is_correct() {
            wrong.push(format!("{at}: answered {}, expected {expected}", result.final_answer));
        }
        let consistent = match (&result.final_answer, expected) {
            (Answer::Number(x), Answer::Number(e)) => method.tolerance().accepts(*x, *e),
            (Answer::Text(x), Answer::Text(e)) => x == e,
            _ => false,
        };
        if result.verification.correct != Some(consistent) {
            inconsistent.push(format!(
                "{at}: correct = {:?} but the tolerance says {consistent}",
                result.verification.correct
            ));
        }
    }

    report.push(TestResult::from_problems(
        "verification/ground-truth",
        "Every valid run matches ground truth",
        "Answers differ from ground truth",
        wrong,
    ));
    report.push(TestResult::from_problems(
        "verification/consistency",
        "Verification flags agree with each method's tolerance",
        "Verification flags disagree with tolerances",
        inconsistent,
    ));
    report
}
