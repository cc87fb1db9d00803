//! Method registry: operation + id → implementation.
//!
//! The registry is an ordinary value built once by an explicit constructor
//! list and read-only afterwards. Lookups are keyed by ([`Operation`], id), so
//! `"standard"` names different methods for addition and subtraction.
//!
//! # Examples
//!
//! ```
//! use abacus::{EngineConfig, MethodRegistry, Operation};
//!
//! let registry = MethodRegistry::standard(&EngineConfig::default())?;
//! assert_eq!(registry.len(), 17);
//!
//! let lattice = registry.get(Operation::Multiplication, "lattice")?;
//! assert_eq!(lattice.metadata().name, "Lattice Multiplication");
//!
//! let ids: Vec<_> = registry
//!     .list_methods(Operation::Subtraction)
//!     .iter()
//!     .map(|m| m.id)
//!     .collect();
//! assert_eq!(ids, ["standard", "equal-additions", "twos-complement"]);
//! # Ok::<(), abacus::Error>(())
//! ```

use core::fmt;
use std::collections::BTreeMap;

use crate::config::{DefaultMethods, EngineConfig};
use crate::error::{Error, Result};
use crate::method::ArithmeticMethod;
use crate::methods::{addition, division, multiplication, subtraction};
use crate::model::{CalculationResult, MethodMetadata};
use crate::operation::Operation;
use crate::verify::Tolerance;

type Methods = BTreeMap<&'static str, Box<dyn ArithmeticMethod>>;

/// Lookup table from (operation, method id) to a method implementation.
pub struct MethodRegistry {
    methods: BTreeMap<Operation, Methods>,
    defaults: DefaultMethods,
}

impl MethodRegistry {
    /// An empty registry with the built-in default method ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(DefaultMethods::default())
    }

    /// An empty registry that falls back to `defaults` on lookup misses.
    #[must_use]
    pub fn with_defaults(defaults: DefaultMethods) -> Self {
        Self {
            methods: BTreeMap::new(),
            defaults,
        }
    }

    /// Every built-in method, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `config` fails validation or names
    /// a default method that is not registered.
    pub fn standard(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let tol = &config.tolerance;
        let approx = |id: &str, fallback: f64| Tolerance::Absolute(tol.epsilon_for(id, fallback));

        let mut reg = Self::with_defaults(config.defaults.clone());

        reg.register(Operation::Addition, "standard", addition::StandardAddition)?;
        reg.register(
            Operation::Addition,
            "kahan",
            addition::KahanSummation::new(approx("kahan", tol.default_epsilon)),
        )?;
        reg.register(Operation::Addition, "carry-lookahead", addition::CarryLookaheadAddition)?;

        reg.register(Operation::Subtraction, "standard", subtraction::StandardSubtraction)?;
        reg.register(Operation::Subtraction, "equal-additions", subtraction::EqualAdditions)?;
        reg.register(Operation::Subtraction, "twos-complement", subtraction::TwosComplement)?;

        reg.register(Operation::Multiplication, "grade-school", multiplication::GradeSchool)?;
        reg.register(Operation::Multiplication, "vedic", multiplication::VedicMultiplication)?;
        reg.register(Operation::Multiplication, "lattice", multiplication::Lattice)?;
        reg.register(Operation::Multiplication, "russian-peasant", multiplication::RussianPeasant)?;
        reg.register(Operation::Multiplication, "karatsuba", multiplication::Karatsuba)?;

        reg.register(Operation::Division, "long-division", division::LongDivision)?;
        reg.register(Operation::Division, "vedic", division::VedicDivision)?;
        reg.register(Operation::Division, "synthetic", division::SyntheticDivision)?;
        reg.register(Operation::Division, "non-restoring", division::NonRestoring)?;
        reg.register(
            Operation::Division,
            "newton-raphson",
            division::NewtonRaphson::new(approx("newton-raphson", tol.iterative_epsilon), config.newton),
        )?;
        reg.register(
            Operation::Division,
            "newton-reciprocal",
            division::NewtonReciprocal::new(
                approx("newton-reciprocal", tol.iterative_epsilon),
                config.newton,
            ),
        )?;

        for operation in Operation::ALL {
            let id = reg.defaults.for_operation(operation);
            if !reg.contains(operation, id) {
                return Err(Error::InvalidConfig(format!(
                    "default {operation} method \"{id}\" is not registered"
                )));
            }
        }
        Ok(reg)
    }

    /// Adds `method` under (`operation`, `id`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdMismatch`] if `id` differs from the method's
    /// metadata id, and [`Error::Duplicate`] if the pair is already taken.
    pub fn register<M>(&mut self, operation: Operation, id: &str, method: M) -> Result<()>
    where
        M: ArithmeticMethod + 'static,
    {
        let declared = method.id();
        if declared != id {
            return Err(Error::IdMismatch {
                given: id.to_string(),
                declared,
            });
        }
        let methods = self.methods.entry(operation).or_default();
        if methods.contains_key(declared) {
            return Err(Error::Duplicate {
                operation,
                id: id.to_string(),
            });
        }
        tracing::debug!(%operation, id = declared, "registered method");
        methods.insert(declared, Box::new(method));
        Ok(())
    }

    /// The method registered under (`operation`, `id`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unregistered pair.
    pub fn get(&self, operation: Operation, id: &str) -> Result<&dyn ArithmeticMethod> {
        self.methods
            .get(&operation)
            .and_then(|methods| methods.get(id))
            .map(|method| method.as_ref())
            .ok_or_else(|| Error::NotFound {
                operation,
                id: id.to_string(),
            })
    }

    /// Like [`get`](Self::get), but falls back to the operation's default
    /// method when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the default method is missing too.
    pub fn get_or_default(&self, operation: Operation, id: &str) -> Result<&dyn ArithmeticMethod> {
        match self.get(operation, id) {
            Ok(method) => Ok(method),
            Err(Error::NotFound { .. }) => {
                let fallback = self.default_method(operation);
                tracing::warn!(%operation, requested = id, fallback, "unknown method, using default");
                self.get(operation, fallback)
            }
            Err(other) => Err(other),
        }
    }

    /// Id of the fallback method for `operation`.
    #[must_use]
    pub fn default_method(&self, operation: Operation) -> &str {
        self.defaults.for_operation(operation)
    }

    /// Metadata for every method of `operation`, ordered by display order
    /// then id.
    #[must_use]
    pub fn list_methods(&self, operation: Operation) -> Vec<&'static MethodMetadata> {
        let mut list: Vec<&'static MethodMetadata> = self
            .methods
            .get(&operation)
            .map(|methods| methods.values().map(|method| method.metadata()).collect())
            .unwrap_or_default();
        list.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(a.id.cmp(b.id)));
        list
    }

    /// Looks up, validates and runs a method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown method and
    /// [`Error::InvalidInput`] when the operands fail validation; in that
    /// case `calculate` is not invoked.
    pub fn solve(
        &self,
        operation: Operation,
        id: &str,
        num1: f64,
        num2: f64,
    ) -> Result<CalculationResult> {
        let method = self.get(operation, id)?;
        let check = method.validate(num1, num2);
        if !check.valid {
            return Err(Error::InvalidInput(check.message));
        }
        Ok(method.calculate(num1, num2))
    }

    /// True if (`operation`, `id`) is registered.
    #[must_use]
    pub fn contains(&self, operation: Operation, id: &str) -> bool {
        self.get(operation, id).is_ok()
    }

    /// Every registered entry, ordered by operation then id.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &dyn ArithmeticMethod)> + '_ {
        self.methods.iter().flat_map(|(op, methods)| {
            methods.values().map(move |method| (*op, method.as_ref()))
        })
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.values().map(BTreeMap::len).sum()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRegistry")
            .field(
                "methods",
                &self
                    .iter()
                    .map(|(op, method)| (op, method.id()))
                    .collect::<Vec<_>>(),
            )
            .field("defaults", &self.defaults)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn standard() -> MethodRegistry {
        MethodRegistry::standard(&EngineConfig::default()).expect("default config is valid")
    }

    #[test]
    fn registers_every_method() {
        let reg = standard();
        assert_eq!(reg.len(), 17);
        assert_eq!(reg.list_methods(Operation::Addition).len(), 3);
        assert_eq!(reg.list_methods(Operation::Subtraction).len(), 3);
        assert_eq!(reg.list_methods(Operation::Multiplication).len(), 5);
        assert_eq!(reg.list_methods(Operation::Division).len(), 6);
    }

    #[test]
    fn same_id_under_different_operations() {
        let reg = standard();
        let add = reg.get(Operation::Addition, "standard").expect("registered");
        let sub = reg.get(Operation::Subtraction, "standard").expect("registered");
        assert_eq!(add.calculate(5.0, 3.0).answer(), Some(8.0));
        assert_eq!(sub.calculate(5.0, 3.0).answer(), Some(2.0));
    }

    #[test]
    fn list_is_ordered_by_display_order() {
        let reg = standard();
        let ids: Vec<&str> = reg.list_methods(Operation::Division).iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            [
                "long-division",
                "vedic",
                "synthetic",
                "non-restoring",
                "newton-raphson",
                "newton-reciprocal"
            ]
        );
    }

    #[test]
    fn unknown_method_is_not_found() {
        let reg = standard();
        let err = reg.get(Operation::Addition, "abacus-beads").err();
        assert_eq!(
            err,
            Some(Error::NotFound {
                operation: Operation::Addition,
                id: "abacus-beads".to_string(),
            })
        );
        // lattice exists, but not as an addition method
        assert!(!reg.contains(Operation::Addition, "lattice"));
    }

    #[test]
    fn falls_back_to_default() {
        let reg = standard();
        let method = reg
            .get_or_default(Operation::Multiplication, "no-such-method")
            .expect("default exists");
        assert_eq!(method.id(), "grade-school");
    }

    #[test]
    fn duplicate_and_mismatched_registration() {
        let mut reg = MethodRegistry::new();
        reg.register(Operation::Addition, "standard", addition::StandardAddition)
            .expect("first registration");
        assert_eq!(
            reg.register(Operation::Addition, "standard", addition::StandardAddition),
            Err(Error::Duplicate {
                operation: Operation::Addition,
                id: "standard".to_string(),
            })
        );
        assert_eq!(
            reg.register(Operation::Addition, "column", addition::StandardAddition),
            Err(Error::IdMismatch {
                given: "column".to_string(),
                declared: "standard",
            })
        );
    }

    #[test]
    fn solve_validates_before_calculating() {
        let reg = standard();
        let err = reg.solve(Operation::Division, "long-division", 10.0, 0.0).err();
        assert!(matches!(err, Some(Error::InvalidInput(msg)) if msg.contains("zero")));

        let result = reg
            .solve(Operation::Division, "long-division", 100.0, 7.0)
            .expect("valid operands");
        assert_eq!(result.remainder, Some(2.0));
    }

    #[test]
    fn config_tunes_tolerances_and_defaults() {
        let mut config = EngineConfig::default();
        config.tolerance.overrides.insert("newton-raphson".to_string(), 0.5);
        config.defaults.division = "vedic".to_string();
        let reg = MethodRegistry::standard(&config).expect("valid config");
        let newton = reg.get(Operation::Division, "newton-raphson").expect("registered");
        assert_eq!(newton.tolerance(), Tolerance::Absolute(0.5));
        assert_eq!(reg.default_method(Operation::Division), "vedic");

        config.defaults.addition = "lattice".to_string();
        assert!(matches!(
            MethodRegistry::standard(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn lookup_by_borrowed_id() {
        let reg = standard();
        let id = String::from("newton-reciprocal");
        let method = reg.get(Operation::Division, &id).expect("registered");
        assert_eq!(method.id(), "newton-reciprocal");
        assert!(reg.get(Operation::Multiplication, &id).is_err());

        let empty = MethodRegistry::new();
        assert!(empty.is_empty());
        assert!(empty.list_methods(Operation::Addition).is_empty());
        assert!(!empty.contains(Operation::Addition, "standard"));
    }

    #[test]
    fn iterates_by_operation_then_id() {
        let reg = standard();
        let pairs: Vec<(Operation, &str)> = reg.iter().map(|(op, m)| (op, m.id())).collect();
        assert_eq!(pairs.len(), reg.len());
        assert_eq!(pairs[0], (Operation::Addition, "carry-lookahead"));
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs, sorted);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MethodRegistry>();
    }
}
