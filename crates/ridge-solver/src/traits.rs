//! Solver traits for abstraction over different solver backends.

use ridge_core::Model;

use crate::{SolverConfig, SolverError, SolverStatus};

/// Trait for accessing solution data from a solver.
///
/// Provides a common read interface over solution values regardless of the
/// underlying backend.
pub trait SolutionView {
    /// Get the objective value of the solution (offset included).
    fn objective_value(&self) -> f64;

    /// Get the solver status.
    fn status(&self) -> SolverStatus;

    /// Get the primal value for the given column.
    fn get_primal(&self, index: usize) -> Option<f64>;

    /// Get all primal values as a slice, one per column.
    fn primal_values(&self) -> &[f64];

    /// Get the solve time in seconds.
    fn solve_time_seconds(&self) -> f64;

    /// Check if the solution is optimal.
    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    /// Check if the solution is feasible.
    fn is_feasible(&self) -> bool {
        self.status().is_feasible()
    }

    /// Check if the solution is infeasible.
    fn is_infeasible(&self) -> bool {
        self.status().is_infeasible()
    }

    /// Check if the solution is unbounded.
    fn is_unbounded(&self) -> bool {
        self.status().is_unbounded()
    }
}

/// Trait for solver implementations.
///
/// Adapters read the model strictly through its accessors (columns, CSR
/// rows, sense, objective offset) and never mutate it.
pub trait Solve {
    /// The solution type returned by this solver.
    type Solution: SolutionView;

    /// Solve the model with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` if the model is empty, a model feature is
    /// unsupported by the backend, or the solve fails.
    fn solve(&mut self, model: &Model, config: &SolverConfig)
        -> Result<Self::Solution, SolverError>;
}
