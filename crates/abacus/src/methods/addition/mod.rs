// Column addition with carries
mod standard;
// Compensated floating-point summation
mod kahan;
// Binary parallel-prefix addition
mod carry_lookahead;

pub use carry_lookahead::CarryLookaheadAddition;
pub use kahan::KahanSummation;
pub use standard::StandardAddition;
