//! Registry validator: listings resolve, ids match, defaults exist.

use abacus::{MethodRegistry, Operation};

use crate::report::{ConformanceReport, TestResult};

/// Validates registry round-trips and default methods.
pub fn validate(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut problems = Vec::new();
    for operation in Operation::ALL {
        let listed = registry.list_methods(operation);
        if listed.is_empty() {
            problems.push(format!("{operation}: no methods registered"));
        }
        for meta in listed {
            match registry.get(operation, meta.id) {
                Ok(method) if method.id() == meta.id => {}
                Ok(method) => problems.push(format!(
                    "{operation}/{}: resolves to a method declaring \"{}\"",
                    meta.id,
                    method.id()
                )),
                Err(err) => problems.push(format!("{operation}/{}: {err}", meta.id)),
            }
        }
    }
    report.push(TestResult::from_problems(
        "registry/round-trip",
        format!("{} methods resolve by their own id", registry.len()),
        "Registry listings do not round-trip",
        problems,
    ));

    let missing: Vec<String> = Operation::ALL
        .into_iter()
        .filter(|&op| !registry.contains(op, registry.default_method(op)))
        .map(|op| format!("{op}: default \"{}\" is not registered", registry.default_method(op)))
        .collect();
    report.push(TestResult::from_problems(
        "registry/defaults",
        "Every operation's default method is registered",
        "Default methods are missing",
        missing,
    ));

    report
}
