//! Trace validator: numbering, final RESULT step, answer agreement.

use abacus::verify::check_trace;
use abacus::{MethodRegistry, StepKind};

use super::{label, valid_runs};
use crate::report::{ConformanceReport, TestResult};

/// Validates the trace invariants on every valid run.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let mut problems = Vec::new();
    let mut runs = 0usize;

    for (operation, method, a, b) in valid_runs(registry) {
        runs += 1;
        let result = method.calculate(a, b);
        if let Err(err) = check_trace(&result.steps, &result.final_answer) {
            problems.push(format!("{}: {err}", label(operation, method, a, b)));
        }
        let results = result.steps.iter().filter(|s| s.kind == StepKind::Result).count();
        if results != 1 {
            problems.push(format!(
                "{}: {results} RESULT steps, expected exactly one",
                label(operation, method, a, b)
            ));
        }
        if result.steps.iter().any(|s| s.title.trim().is_empty()) {
            problems.push(format!("{}: untitled step", label(operation, method, a, b)));
        }
    }

    report.push(TestResult::from_problems(
        "traces",
        format!("{runs} traces are well-formed"),
        "Malformed traces",
        problems,
    ));
    report
}
