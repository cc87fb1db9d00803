//! Error types for the engine: registry lookups, input validation, and
//! trace well-formedness.

use thiserror::Error;

use crate::model::StepKind;
use crate::operation::Operation;

/// Errors surfaced by the registry and the configuration layer.
///
/// Verification mismatches are not errors: they are carried as data in
/// [`Verification`](crate::model::Verification).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operands were rejected by the method's `validate` check.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No method is registered under this operation and id.
    #[error("no {operation} method registered with id \"{id}\"")]
    NotFound {
        /// Operation that was searched.
        operation: Operation,
        /// Method id that was requested.
        id: String,
    },

    /// A method with the same operation and id is already registered.
    #[error("a {operation} method with id \"{id}\" is already registered")]
    Duplicate {
        /// Operation of the rejected registration.
        operation: Operation,
        /// Method id of the rejected registration.
        id: String,
    },

    /// The id passed to `register` differs from the id in the method's metadata.
    #[error("method registered as \"{given}\" declares id \"{declared}\"")]
    IdMismatch {
        /// Id passed by the caller.
        given: String,
        /// Id declared by the method's metadata.
        declared: &'static str,
    },

    /// An operation name did not parse.
    #[error("unknown operation \"{0}\"")]
    UnknownOperation(String),

    /// The engine configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A method produced a trace that violates the step invariants.
    #[error("malformed trace: {0}")]
    MalformedTrace(#[from] TraceError),
}

/// Violations of the trace invariants checked by
/// [`check_trace`](crate::verify::check_trace).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The trace has no steps.
    #[error("trace is empty")]
    Empty,

    /// A step number does not equal its 1-based position.
    #[error("step at index {index} is numbered {found}, expected {expected}")]
    OutOfOrder {
        /// Zero-based index in the step list.
        index: usize,
        /// Number carried by the step.
        found: usize,
        /// Number the step should carry.
        expected: usize,
    },

    /// The last step is not a RESULT step.
    #[error("last step has kind {0:?}, expected Result")]
    MissingResult(StepKind),

    /// The RESULT step's value differs from the final answer.
    #[error("result step value does not match the final answer {answer}")]
    ResultMismatch {
        /// The final answer, rendered for display.
        answer: String,
    },
}

/// Result type for engine functions that can produce errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;
