//! The method catalogue, grouped by operation.
//!
//! Every type here implements [`ArithmeticMethod`](crate::ArithmeticMethod).
//! Unit-struct methods are stateless; the floating and iterative ones carry
//! the tolerance (and for Newton-Raphson, the stopping rule) they were built
//! with.

/// Column addition, Kahan summation and carry-lookahead.
pub mod addition;
/// Borrowing, equal additions and two's complement.
pub mod subtraction;
/// Grade-school, Vedic, lattice, Russian peasant and Karatsuba.
pub mod multiplication;
/// Long, Vedic, synthetic, non-restoring and Newton-style division.
pub mod division;
