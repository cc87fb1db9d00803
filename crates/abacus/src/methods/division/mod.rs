// Digit-by-digit quotient and remainder
mod long_division;
// Nikhilam complements
mod vedic;
// Ruffini's rule on numbers and polynomials
mod synthetic;
// Binary shift-and-add/subtract
mod non_restoring;
// Square root by Newton iteration
mod newton_raphson;
// Division through the reciprocal
mod newton_reciprocal;

pub use long_division::LongDivision;
pub use newton_raphson::{Convergence, NewtonRaphson, MAX_RADICAND};
pub use newton_reciprocal::NewtonReciprocal;
pub use non_restoring::NonRestoring;
pub use synthetic::SyntheticDivision;
pub use vedic::VedicDivision;

use crate::digits;
use crate::method::Validation;

/// Rejects divisors that are zero or not whole numbers in `1..=max`.
fn require_divisor(x: f64, max: f64) -> Validation {
    digits::require_whole("divisor", x, max).and_then(|| {
        if x == 0.0 {
            Validation::reject("divisor must not be zero")
        } else {
            Validation::ok()
        }
    })
}
