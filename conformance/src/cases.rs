//! Operand tables the validators run every method against.
//!
//! Valid cases are skipped for methods whose `validate` rejects them, so one
//! table serves every method of an operation.

use abacus::Operation;

/// Operand pairs expected to be in range for most methods of `operation`.
#[must_use]
pub fn valid(operation: Operation) -> &'static [(f64, f64)] {
    match operation {
        Operation::Addition => &[
            (0.0, 0.0),
            (247.0, 185.0),
            (999.0, 1.0),
            (123_456_789.0, 987_654_321.0),
            (0.1, 0.2),
        ],
        Operation::Subtraction => &[
            (0.0, 0.0),
            (503.0, 267.0),
            (185.0, 247.0),
            (5003.0, 1878.0),
            (4_294_967_295.0, 1.0),
        ],
        Operation::Multiplication => &[
            (0.0, 5.0),
            (23.0, 47.0),
            (347.0, 28.0),
            (1234.0, 5678.0),
            (9_999_999.0, 9_999_999.0),
        ],
        Operation::Division => &[
            (0.0, 5.0),
            (2.0, 1.0),
            (1.0, 3.0),
            (100.0, 7.0),
            (1234.0, 98.0),
            (7825.0, 25.0),
            (4_294_967_295.0, 3.0),
        ],
    }
}

/// Operand pairs no method of `operation` may accept.
#[must_use]
pub fn invalid(operation: Operation) -> &'static [(f64, f64)] {
    match operation {
        Operation::Division => &[
            (f64::NAN, 1.0),
            (f64::INFINITY, 2.0),
            (-1.0, f64::NAN),
            (-4.0, 0.0),
        ],
        _ => &[(f64::NAN, 1.0), (f64::INFINITY, 2.0), (1.0, f64::NEG_INFINITY)],
    }
}
