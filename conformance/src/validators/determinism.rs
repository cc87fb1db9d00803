//! Determinism validator: `calculate` is a pure function of its operands.

use abacus::MethodRegistry;

use super::{label, valid_runs};
use crate::report::{ConformanceReport, TestResult};

/// Validates that repeated runs produce identical results.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let problems: Vec<String> = valid_runs(registry)
        .filter(|&(_, method, a, b)| method.calculate(a, b) != method.calculate(a, b))
        .map(|(operation, method, a, b)| format!("{}: results differ", label(operation, method, a, b)))
        .collect();

    report.push(TestResult::from_problems(
        "determinism",
        "Repeated runs are identical",
        "Non-deterministic methods",
        problems,
    ));
    report
}
