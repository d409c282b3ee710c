//! Solver error types.

use crate::SolverStatus;

/// Error type for solver operations.
#[derive(Debug, Clone)]
pub enum SolverError {
    /// Model has no variables.
    EmptyModel,
    /// Unsupported variable category or model feature for this backend.
    Unsupported(String),
    /// Internal solver error.
    InternalError(String),
    /// Solver finished without a usable solution.
    SolveFailure {
        /// The solver status that caused the failure.
        status: SolverStatus,
    },
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyModel => "MODEL_EMPTY",
            SolverError::Unsupported(_) => "SOLVER_UNSUPPORTED",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
            SolverError::SolveFailure { status } => match status {
                SolverStatus::Infeasible => "SOLVER_INFEASIBLE",
                SolverStatus::Unbounded => "SOLVER_UNBOUNDED",
                SolverStatus::ReachedTimeLimit => "SOLVER_TIME_LIMIT",
                SolverStatus::ReachedIterationLimit => "SOLVER_ITERATION_LIMIT",
                _ => "SOLVER_INTERNAL",
            },
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::EmptyModel => write!(f, "[{}] Model has no variables", self.code()),
            SolverError::Unsupported(what) => {
                write!(f, "[{}] Backend does not support {}", self.code(), what)
            }
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
            SolverError::SolveFailure { status } => {
                write!(f, "[{}] {}", self.code(), status_message(*status))
            }
        }
    }
}

fn status_message(status: SolverStatus) -> &'static str {
    match status {
        SolverStatus::Infeasible => "Problem is infeasible",
        SolverStatus::Unbounded => "Problem is unbounded",
        SolverStatus::ReachedTimeLimit => "Solver reached time limit",
        SolverStatus::ReachedIterationLimit => "Solver reached iteration limit",
        SolverStatus::Unknown => "Solver status unknown",
        SolverStatus::Optimal => "Solver returned optimal",
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_error_code() {
        let msg = SolverError::EmptyModel.to_string();
        assert!(msg.contains("MODEL_EMPTY"));
        assert!(msg.contains("no variables"));
    }

    #[test]
    fn solve_failure_code_follows_status() {
        let err = SolverError::SolveFailure {
            status: SolverStatus::Infeasible,
        };
        assert_eq!(err.code(), "SOLVER_INFEASIBLE");
        assert!(err.to_string().contains("infeasible"));
    }

    #[test]
    fn unsupported_mentions_the_feature() {
        let err = SolverError::Unsupported("integer variables".to_string());
        assert!(err.to_string().contains("integer variables"));
    }
}
