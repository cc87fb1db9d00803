//! Validators, one module per contract.
//!
//! Each exposes `validate(&MethodRegistry) -> ConformanceReport`.

pub mod determinism;
pub mod examples;
pub mod registry;
pub mod rejection;
pub mod traces;
pub mod verification;

use abacus::{ArithmeticMethod, MethodRegistry, Operation};

use crate::cases;

/// Every (operation, method, operands) triple from the valid table that
/// passes the method's own validation.
pub(crate) fn valid_runs(
    registry: &MethodRegistry,
) -> impl Iterator<Item = (Operation, &dyn ArithmeticMethod, f64, f64)> + '_ {
    registry.iter().flat_map(|(operation, method)| {
        cases::valid(operation)
            .iter()
            .filter(move |(a, b)| method.validate(*a, *b).valid)
            .map(move |&(a, b)| (operation, method, a, b))
    })
}

/// `operation/id(a, b)` label for detail lines.
pub(crate) fn label(operation: Operation, method: &dyn ArithmeticMethod, a: f64, b: f64) -> String {
    format!("{operation}/{}({a}, {b})", method.id())
}
