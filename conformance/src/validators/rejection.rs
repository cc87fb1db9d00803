//! Rejection validator: out-of-domain operands fail validation, and a
//! direct `calculate` degrades to a result flagged incorrect.

use abacus::MethodRegistry;

use super::label;
use crate::cases;
use crate::report::{ConformanceReport, TestResult};

/// Validates handling of operands no method may accept.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let mut problems = Vec::new();

    for (operation, method) in registry.iter() {
        for &(a, b) in cases::invalid(operation) {
            let at = label(operation, method, a, b);
            let check = method.validate(a, b);
            if check.valid {
                problems.push(format!("{at}: accepted"));
                continue;
            }
            if check.message.is_empty() {
                problems.push(format!("{at}: rejected without a message"));
            }
            let result = method.calculate(a, b);
            if result.verification.correct != Some(false) {
                problems.push(format!("{at}: degraded result not flagged incorrect"));
            }
        }
    }

    report.push(TestResult::from_problems(
        "rejection",
        "Out-of-domain operands are rejected gracefully",
        "Out-of-domain operands slip through",
        problems,
    ));
    report
}
