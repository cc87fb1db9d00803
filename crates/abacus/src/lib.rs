//! Abacus: explainable arithmetic methods.
//!
//! Each method is a named algorithm for one of the four operations: column
//! addition, Kahan summation, lattice multiplication, Nikhilam division and
//! so on. It returns its answer together with the ordered steps that
//! produced it and a cross-check against an independently computed ground
//! truth.
//!
//! # Layers
//!
//! ```text
//! MethodRegistry   (operation, id) → Box<dyn ArithmeticMethod>
//!       │
//! ArithmeticMethod metadata · example · validate · calculate · tolerance
//!       │
//! CalculationResult   steps: Vec<Step> → final_answer → verification
//! ```
//!
//! | Operation | Methods |
//! |-----------|---------|
//! | addition | `standard`, `kahan`, `carry-lookahead` |
//! | subtraction | `standard`, `equal-additions`, `twos-complement` |
//! | multiplication | `grade-school`, `vedic`, `lattice`, `russian-peasant`, `karatsuba` |
//! | division | `long-division`, `vedic`, `synthetic`, `non-restoring`, `newton-raphson`, `newton-reciprocal` |
//!
//! # Trace invariants
//!
//! Every result's steps are numbered `1..=n` in order, the last step is a
//! [`StepKind::Result`] step, and its value equals the final answer. Digit
//! and bit algorithms are verified exactly; floating and iterative ones
//! within an epsilon (see [`verify`]).
//!
//! # Example
//!
//! ```
//! use abacus::{EngineConfig, MethodRegistry, Operation, StepKind};
//!
//! let registry = MethodRegistry::standard(&EngineConfig::default())?;
//! let result = registry.solve(Operation::Addition, "standard", 247.0, 185.0)?;
//!
//! assert_eq!(result.answer(), Some(432.0));
//! assert!(result.is_correct());
//!
//! let ones = result.steps_of(StepKind::Calculation).next().map(|s| s.calculation.as_str());
//! assert_eq!(ones, Some("7 + 5 = 12"));
//! # Ok::<(), abacus::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod method;
pub mod methods;
pub mod model;
pub mod operation;
pub mod registry;
pub mod verify;

mod digits;

pub use config::{DefaultMethods, EngineConfig, IterationConfig, ToleranceConfig};
pub use error::{Error, Result, TraceError};
pub use method::{ArithmeticMethod, Example, Validation};
pub use model::{
    Answer, CalculationResult, Category, Difficulty, MethodMetadata, Origin, Speed, Step,
    StepKind, StepValue, Trace, Verification,
};
pub use operation::Operation;
pub use registry::MethodRegistry;
pub use verify::{exact_sum, Tolerance, DEFAULT_EPSILON, ITERATIVE_EPSILON};
