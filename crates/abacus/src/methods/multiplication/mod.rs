// Partial products per multiplier digit
mod grade_school;
// Urdhva Tiryagbhyam
mod vedic;
// Gelosia grid
mod lattice;
// Halving and doubling
mod russian_peasant;
// Three-product divide and conquer
mod karatsuba;

pub use grade_school::GradeSchool;
pub use karatsuba::Karatsuba;
pub use lattice::Lattice;
pub use russian_peasant::RussianPeasant;
pub use vedic::VedicMultiplication;

/// Largest operand for the multiplication methods; products stay below 2^52.
const LIMIT: f64 = 9_999_999.0;
