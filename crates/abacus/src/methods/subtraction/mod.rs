// Column subtraction with borrows
mod standard;
// Austrian method
mod equal_additions;
// Invert, add one, add
mod twos_complement;

pub use equal_additions::EqualAdditions;
pub use standard::StandardSubtraction;
pub use twos_complement::TwosComplement;
