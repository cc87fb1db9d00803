//! Step, metadata and result types shared by every method.
//!
//! These are plain data: constructors fill defaults and never validate.
//! Well-formedness of a finished trace is checked by
//! [`check_trace`](crate::verify::check_trace).

mod metadata;
mod result;
mod step;

pub use metadata::{Category, Difficulty, MethodMetadata, Origin, Speed};
pub use result::{Answer, CalculationResult, Verification};
pub use step::{Step, StepKind, StepValue, Trace};
