//! Example validator: canned examples must validate and verify.

use abacus::MethodRegistry;

use super::label;
use crate::report::{ConformanceReport, TestResult};

/// Validates every method's `example()`.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let mut problems = Vec::new();

    for (operation, method) in registry.iter() {
        let example = method.example();
        let at = label(operation, method, example.num1, example.num2);
        if example.description.is_empty() {
            problems.push(format!("{at}: example has no description"));
        }
        let check = method.validate(example.num1, example.num2);
        if !check.valid {
            problems.push(format!("{at}: example rejected: {}", check.message));
            continue;
        }
        let result = method.calculate(example.num1, example.num2);
        if !result.is_correct() {
            problems.push(format!(
                "{at}: answered {} but expected {:?}",
                result.final_answer, result.verification.expected
            ));
        }
    }

    report.push(TestResult::from_problems(
        "examples",
        "Every example validates and verifies",
        "Examples are broken",
        problems,
    ));
    report
}
