//! Static method descriptors.
//!
//! Every method module declares one `static` [`MethodMetadata`], built from
//! [`MethodMetadata::new`] with struct-update syntax so that descriptive fields
//! the module does not care about keep their empty defaults:
//!
//! ```
//! use abacus::model::{Category, Difficulty, MethodMetadata};
//!
//! static METADATA: MethodMetadata = MethodMetadata {
//!     difficulty: Difficulty::Intermediate,
//!     display_order: 3,
//!     ..MethodMetadata::new("doubling", "Doubling", Category::Ancient)
//! };
//! assert_eq!(METADATA.id, "doubling");
//! assert!(METADATA.advantages.is_empty());
//! ```

/// Tradition or origin a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Category {
    /// Pencil-and-paper methods taught in modern schools.
    Standard,
    /// Methods recorded in antiquity or by pre-modern cultures.
    Ancient,
    /// Methods from the Vedic mathematics sutras.
    Vedic,
    /// Methods designed for hardware or computer arithmetic.
    Computer,
    /// Iterative numerical-analysis methods.
    Numerical,
}

impl Category {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Standard => "standard",
            Category::Ancient => "ancient",
            Category::Vedic => "vedic",
            Category::Computer => "computer",
            Category::Numerical => "numerical",
        }
    }
}

/// Ordinal difficulty used for sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Difficulty {
    /// Suitable for a first encounter with the operation.
    Beginner,
    /// Requires comfort with the standard method.
    Intermediate,
    /// Requires binary, algebra or numerical background.
    Advanced,
}

impl Difficulty {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Descriptive speed rating. Never used for computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Speed {
    /// Done at a glance.
    Instant,
    /// A few quick steps.
    Fast,
    /// One step per digit or so.
    Moderate,
    /// Many steps; illustrative rather than practical.
    Slow,
}

impl Speed {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Speed::Instant => "instant",
            Speed::Fast => "fast",
            Speed::Moderate => "moderate",
            Speed::Slow => "slow",
        }
    }
}

/// Where a method comes from. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Origin {
    /// Culture or community the method is attributed to.
    pub culture: &'static str,
    /// Approximate time period.
    pub time_period: &'static str,
    /// Short history.
    pub description: &'static str,
}

impl Origin {
    /// An origin with every field empty.
    pub const UNKNOWN: Origin = Origin {
        culture: "",
        time_period: "",
        description: "",
    };
}

/// Static descriptor of a method. `id` is unique within an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MethodMetadata {
    /// Stable lookup key, also used by UIs to persist per-method progress.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Tradition the method belongs to.
    pub category: Category,
    /// Ordinal difficulty.
    pub difficulty: Difficulty,
    /// Position within method pickers; lower comes first.
    pub display_order: u32,
    /// Historical origin.
    pub origin: Origin,
    /// Situations where the method shines.
    pub when_to_use: &'static [&'static str],
    /// Strengths.
    pub advantages: &'static [&'static str],
    /// Weaknesses.
    pub disadvantages: &'static [&'static str],
    /// Descriptive speed rating.
    #[cfg_attr(feature = "serde", serde(rename = "speedRating"))]
    pub speed: Speed,
    /// One-paragraph description of the underlying mathematics.
    pub math_principle: &'static str,
    /// Ids of related methods. Informational only.
    pub related_methods: &'static [&'static str],
    /// Asymptotic cost, as prose.
    pub time_complexity: &'static str,
    /// When a learner should reach for this method.
    pub recommended_use: &'static str,
    /// Suggested method to try next.
    pub alternative: &'static str,
}

impl MethodMetadata {
    /// Metadata with the given identity and every descriptive field defaulted.
    #[must_use]
    pub const fn new(id: &'static str, name: &'static str, category: Category) -> Self {
        Self {
            id,
            name,
            category,
            difficulty: Difficulty::Beginner,
            display_order: 0,
            origin: Origin::UNKNOWN,
            when_to_use: &[],
            advantages: &[],
            disadvantages: &[],
            speed: Speed::Moderate,
            math_principle: "",
            related_methods: &[],
            time_complexity: "",
            recommended_use: "",
            alternative: "",
        }
    }
}
