//! Engine configuration: tolerances, iteration caps and default methods.
//!
//! Every field has a default, so a configuration file only names what it
//! changes:
//!
//! ```toml
//! [tolerance]
//! iterative_epsilon = 1e-5
//! overrides = { kahan = 1e-9 }
//!
//! [newton]
//! max_iterations = 30
//!
//! [defaults]
//! multiplication = "lattice"
//! ```

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::operation::Operation;
use crate::verify::{DEFAULT_EPSILON, ITERATIVE_EPSILON};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    /// Verification tolerances for approximate methods.
    pub tolerance: ToleranceConfig,
    /// Convergence settings for Newton-style iterations.
    pub newton: IterationConfig,
    /// Fallback method id per operation.
    pub defaults: DefaultMethods,
}

impl EngineConfig {
    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for non-positive or non-finite
    /// epsilons, a zero iteration cap, or an empty default method id.
    pub fn validate(&self) -> Result<()> {
        let epsilons = [
            ("tolerance.default_epsilon", self.tolerance.default_epsilon),
            ("tolerance.iterative_epsilon", self.tolerance.iterative_epsilon),
            ("newton.convergence", self.newton.convergence),
        ];
        let overrides = self
            .tolerance
            .overrides
            .iter()
            .map(|(id, eps)| (id.as_str(), *eps));
        for (name, value) in epsilons.into_iter().chain(overrides) {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        if self.newton.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "newton.max_iterations must be at least 1".to_string(),
            ));
        }
        for op in Operation::ALL {
            if self.defaults.for_operation(op).trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "defaults.{op} must name a method"
                )));
            }
        }
        Ok(())
    }
}

/// Epsilons used by the verification layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ToleranceConfig {
    /// Epsilon for floating methods such as Kahan summation.
    pub default_epsilon: f64,
    /// Epsilon for iterative methods such as Newton-Raphson.
    pub iterative_epsilon: f64,
    /// Per-method epsilon, keyed by method id. Applies to approximate methods.
    pub overrides: BTreeMap<String, f64>,
}

impl ToleranceConfig {
    /// The epsilon for `id`: its override if present, else `fallback`.
    #[must_use]
    pub fn epsilon_for(&self, id: &str, fallback: f64) -> f64 {
        self.overrides.get(id).copied().unwrap_or(fallback)
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            default_epsilon: DEFAULT_EPSILON,
            iterative_epsilon: ITERATIVE_EPSILON,
            overrides: BTreeMap::new(),
        }
    }
}

/// Stopping rule for Newton-style iterations, shared by the square-root
/// and reciprocal solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct IterationConfig {
    /// Stop once successive iterates differ by less than this fraction of
    /// the current iterate.
    pub convergence: f64,
    /// Hard cap on iterations.
    pub max_iterations: usize,
}

impl Default for IterationConfig {
    fn default() -> Self {
        Self {
            convergence: 1e-7,
            max_iterations: 50,
        }
    }
}

/// Method id used when a lookup misses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DefaultMethods {
    /// Default addition method.
    pub addition: String,
    /// Default subtraction method.
    pub subtraction: String,
    /// Default multiplication method.
    pub multiplication: String,
    /// Default division method.
    pub division: String,
}

impl DefaultMethods {
    /// The default id for `operation`.
    #[must_use]
    pub fn for_operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::Addition => &self.addition,
            Operation::Subtraction => &self.subtraction,
            Operation::Multiplication => &self.multiplication,
            Operation::Division => &self.division,
        }
    }
}

impl Default for DefaultMethods {
    fn default() -> Self {
        Self {
            addition: "standard".to_string(),
            subtraction: "standard".to_string(),
            multiplication: "grade-school".to_string(),
            division: "long-division".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tolerance.default_epsilon, DEFAULT_EPSILON);
        assert_eq!(config.newton.max_iterations, 50);
        assert_eq!(config.defaults.for_operation(Operation::Division), "long-division");
    }

    #[test]
    fn override_wins_over_fallback() {
        let mut config = ToleranceConfig::default();
        config.overrides.insert("kahan".to_string(), 1e-9);
        assert_eq!(config.epsilon_for("kahan", DEFAULT_EPSILON), 1e-9);
        assert_eq!(config.epsilon_for("other", DEFAULT_EPSILON), DEFAULT_EPSILON);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = EngineConfig::default();
        config.newton.max_iterations = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.tolerance.overrides.insert("kahan".to_string(), -1.0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(m)) if m.contains("kahan")));

        let mut config = EngineConfig::default();
        config.defaults.division = " ".to_string();
        assert!(config.validate().is_err());
    }
}
