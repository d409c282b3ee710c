use serde::{Deserialize, Serialize};

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Variable domain category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VarCategory {
    #[default]
    Continuous,
    Integer,
    Binary,
}

impl VarCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VarCategory::Continuous => "continuous",
            VarCategory::Integer => "integer",
            VarCategory::Binary => "binary",
        }
    }
}

/// Bounds for a variable or constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The default variable domain: `[0, +inf)`.
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    /// Free in both directions.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::non_negative()
    }
}

/// Configuration record for variable creation.
///
/// Defaults: objective coefficient 0, bounds `[0, +inf)`, continuous.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VarOptions {
    pub objective: f64,
    pub bounds: Bounds,
    pub category: VarCategory,
}

impl VarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary variable: bounds `[0, 1]`, integer-restricted.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            category: VarCategory::Binary,
            ..Self::default()
        }
    }

    /// Integer variable over the given bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            category: VarCategory::Integer,
            ..Self::default()
        }
    }

    pub fn with_objective(mut self, coefficient: f64) -> Self {
        self.objective = coefficient;
        self
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Bounds::new(lower, upper);
        self
    }

    pub fn with_category(mut self, category: VarCategory) -> Self {
        self.category = category;
        self
    }
}
