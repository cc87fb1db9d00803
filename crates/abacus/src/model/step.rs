//! Explanatory steps and the trace that numbers them.

use std::fmt;

use super::Answer;

/// Role a step plays in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StepKind {
    /// Context-setting; no arithmetic happens.
    Info,
    /// Variable initialization or operand decomposition.
    Input,
    /// An arithmetic operation.
    Calculation,
    /// The final output. Always the last step of a trace.
    Result,
}

impl StepKind {
    /// Upper-case label, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StepKind::Info => "INFO",
            StepKind::Input => "INPUT",
            StepKind::Calculation => "CALCULATION",
            StepKind::Result => "RESULT",
        }
    }
}

/// Value produced by a step. Opaque to the engine; interpreted by renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StepValue {
    /// The step produces no value.
    #[default]
    Empty,
    /// A single number.
    Number(f64),
    /// Free text (binary words, polynomials, ...).
    Text(String),
    /// Named intermediate values, in the order they were recorded.
    Record(Vec<(String, f64)>),
}

impl StepValue {
    /// Builds a record from `(name, value)` pairs.
    pub fn record<'a>(fields: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        StepValue::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// Looks up a named field of a record value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<f64> {
        match self {
            StepValue::Record(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| *value),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StepValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True if this value represents `answer`. NaN matches NaN.
    #[must_use]
    pub fn matches(&self, answer: &Answer) -> bool {
        match (self, answer) {
            (StepValue::Number(a), Answer::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (StepValue::Text(a), Answer::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<f64> for StepValue {
    fn from(value: f64) -> Self {
        StepValue::Number(value)
    }
}

impl From<String> for StepValue {
    fn from(value: String) -> Self {
        StepValue::Text(value)
    }
}

impl From<&str> for StepValue {
    fn from(value: &str) -> Self {
        StepValue::Text(value.to_string())
    }
}

impl From<&Answer> for StepValue {
    fn from(answer: &Answer) -> Self {
        match answer {
            Answer::Number(n) => StepValue::Number(*n),
            Answer::Text(t) => StepValue::Text(t.clone()),
        }
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepValue::Empty => Ok(()),
            StepValue::Number(n) => write!(f, "{n}"),
            StepValue::Text(t) => f.write_str(t),
            StepValue::Record(fields) => {
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StepValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            StepValue::Empty => serializer.serialize_none(),
            StepValue::Number(n) => serializer.serialize_f64(*n),
            StepValue::Text(t) => serializer.serialize_str(t),
            StepValue::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// One explanatory unit of a calculation.
///
/// Built with [`Step::new`] (or one of the kind shorthands) and the chained
/// setters; unset fields stay empty. `step_number` is assigned when the step
/// is pushed onto a [`Trace`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Step {
    /// 1-based position within the trace.
    pub step_number: usize,
    /// Role of the step.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: StepKind,
    /// Short label.
    pub title: String,
    /// One-line summary of what the step does.
    pub description: String,
    /// The literal expression evaluated at this step.
    pub calculation: String,
    /// Value(s) produced by the step.
    pub result: StepValue,
    /// Pedagogical rationale.
    pub explanation: String,
}

impl Step {
    /// Creates a step with the given kind and title; every other field is empty.
    pub fn new(kind: StepKind, title: impl Into<String>) -> Self {
        Self {
            step_number: 0,
            kind,
            title: title.into(),
            description: String::new(),
            calculation: String::new(),
            result: StepValue::Empty,
            explanation: String::new(),
        }
    }

    /// Shorthand for an [`StepKind::Info`] step.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(StepKind::Info, title)
    }

    /// Shorthand for an [`StepKind::Input`] step.
    pub fn input(title: impl Into<String>) -> Self {
        Self::new(StepKind::Input, title)
    }

    /// Shorthand for a [`StepKind::Calculation`] step.
    pub fn calculation(title: impl Into<String>) -> Self {
        Self::new(StepKind::Calculation, title)
    }

    /// Shorthand for a [`StepKind::Result`] step.
    pub fn result(title: impl Into<String>) -> Self {
        Self::new(StepKind::Result, title)
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the literal expression.
    #[must_use]
    pub fn calc(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = calculation.into();
        self
    }

    /// Sets the produced value.
    #[must_use]
    pub fn value(mut self, value: impl Into<StepValue>) -> Self {
        self.result = value.into();
        self
    }

    /// Sets the explanation.
    #[must_use]
    pub fn explain(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Ordered step sequence under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, numbering it, and returns the assigned number.
    pub fn push(&mut self, mut step: Step) -> usize {
        step.step_number = self.steps.len() + 1;
        self.steps.push(step);
        self.steps.len()
    }

    /// Number of steps pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no step has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps pushed so far.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Consumes the trace, yielding its steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn new_step_defaults_every_field() {
        let step = Step::info("Setup");
        assert_eq!(step.kind, StepKind::Info);
        assert_eq!(step.title, "Setup");
        assert!(step.description.is_empty());
        assert!(step.calculation.is_empty());
        assert!(step.explanation.is_empty());
        assert_eq!(step.result, StepValue::Empty);
    }

    #[test]
    fn trace_numbers_steps_in_push_order() {
        let mut trace = Trace::new();
        assert_eq!(trace.push(Step::info("a")), 1);
        assert_eq!(trace.push(Step::calculation("b")), 2);
        assert_eq!(trace.push(Step::result("c").value(3.0)), 3);

        let numbers: Vec<usize> = trace.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn record_fields_keep_order_and_lookup() {
        let value = StepValue::record([("sum", 0.3), ("compensation", -2.0e-17)]);
        assert_eq!(value.field("sum"), Some(0.3));
        assert_eq!(value.field("compensation"), Some(-2.0e-17));
        assert_eq!(value.field("missing"), None);
        assert!(matches!(&value, StepValue::Record(fields) if fields[0].0 == "sum"));
    }

    #[test]
    fn nan_value_matches_nan_answer() {
        assert!(StepValue::Number(f64::NAN).matches(&Answer::Number(f64::NAN)));
        assert!(!StepValue::Number(1.0).matches(&Answer::Number(2.0)));
        assert!(!StepValue::Text("1".into()).matches(&Answer::Number(1.0)));
    }

    #[test]
    fn record_displays_as_assignments() {
        let value = StepValue::record([("digit", 3.0), ("carry", 1.0)]);
        assert_eq!(value.to_string(), "digit = 3, carry = 1");
        assert_eq!(StepValue::Empty.to_string(), "");
    }
}
