//! Abacus conformance suite.
//!
//! Exercises every method in a [`MethodRegistry`] against a fixed table of
//! operands and reports each contract that holds or breaks.
//!
//! # Conformance Scope
//!
//! | Validator | Contract |
//! |-----------|----------|
//! | `registry` | every listed id resolves to a method declaring that id; defaults are registered |
//! | `examples` | each method's canned example validates and verifies |
//! | `traces` | steps numbered `1..=n`, last step RESULT, RESULT value equals the answer |
//! | `verification` | valid operands produce `correct == true` against ground truth |
//! | `determinism` | repeated `calculate` calls are identical |
//! | `rejection` | out-of-domain operands are rejected and degrade without panicking |
//!
//! # Entry Point
//!
//! ```
//! use abacus::{EngineConfig, MethodRegistry};
//! use abacus_conformance::run_all;
//!
//! let registry = MethodRegistry::standard(&EngineConfig::default())?;
//! let report = run_all(&registry);
//! assert!(report.all_passed());
//! # Ok::<(), abacus::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cases;
pub mod report;
pub mod validators;

use abacus::MethodRegistry;

pub use report::{ConformanceReport, Severity, TestResult};

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Registry round-trip and defaults
/// 2. Canned examples
/// 3. Trace well-formedness
/// 4. Verification against ground truth
/// 5. Determinism
/// 6. Rejection of out-of-domain operands
pub fn run_all(registry: &MethodRegistry) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    report.extend(validators::registry::validate(registry));
    report.extend(validators::examples::validate(registry));
    report.extend(validators::traces::validate(registry));
    report.extend(validators::verification::validate(registry));
    report.extend(validators::determinism::validate(registry));
    report.extend(validators::rejection::validate(registry));

    tracing::debug!(
        results = report.results.len(),
        failures = report.failure_count(),
        "conformance run finished"
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests_unit {
    use super::*;
    use abacus::EngineConfig;

    #[test]
    fn standard_registry_conforms() {
        let registry = MethodRegistry::standard(&EngineConfig::default()).expect("valid config");
        let report = run_all(&registry);
        let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
        assert!(failures.is_empty(), "conformance failures: {failures:#?}");
    }

    #[test]
    fn empty_registry_fails_defaults() {
        let report = run_all(&MethodRegistry::new());
        assert!(!report.all_passed());
    }
}
