//! Model error types.

use ridge_expr::{ConstraintId, VariableId};

/// Errors that can occur during model operations.
///
/// All failures are detected at the call boundary and leave the model in
/// its exact pre-call state.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Variable handle does not exist in this model
    InvalidVariableId(VariableId),
    /// Constraint handle does not exist in this model
    InvalidConstraintId(ConstraintId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Constraint bound is NaN
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Non-finite coefficient in a term
    InvalidCoefficient { coefficient: f64 },
    /// Indexed range key mapped outside `[0, count)`
    KeyOutOfRange { id: i64, count: usize },
    /// Indexed range position outside `[0, count)`
    IndexOutOfRange { index: usize, count: usize },
    /// Every candidate declined to produce a constraint for a key
    UnresolvedConstraint { key_index: usize },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::InvalidCoefficient { .. } => "COEFFICIENT_NOT_FINITE",
            ModelError::KeyOutOfRange { .. } => "RANGE_KEY_OUT_OF_RANGE",
            ModelError::IndexOutOfRange { .. } => "RANGE_INDEX_OUT_OF_RANGE",
            ModelError::UnresolvedConstraint { .. } => "CONSTRAINT_UNRESOLVED_KEY",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds must not be NaN (got [{}, {}])",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::KeyOutOfRange { id, count } => write!(
                f,
                "[{}] Key mapped to id {} outside [0, {})",
                self.code(),
                id,
                count
            ),
            ModelError::IndexOutOfRange { index, count } => write!(
                f,
                "[{}] Index {} outside [0, {})",
                self.code(),
                index,
                count
            ),
            ModelError::UnresolvedConstraint { key_index } => write!(
                f,
                "[{}] No candidate produced a constraint for key at position {}",
                self.code(),
                key_index
            ),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_error_code() {
        let err = ModelError::InvalidVariableId(VariableId::new(3));
        let rendered = err.to_string();
        assert!(rendered.starts_with("[VARIABLE_INVALID_ID]"));
        assert!(rendered.contains('3'));
    }

    #[test]
    fn key_out_of_range_reports_both_sides() {
        let err = ModelError::KeyOutOfRange { id: -2, count: 5 };
        let rendered = err.to_string();
        assert!(rendered.contains("-2"));
        assert!(rendered.contains("[0, 5)"));
    }
}
