// Solver service interface
// Defines the contract every MILP backend adapter must follow, so backends
// can be swapped without touching the scheduling logic.

use crate::model::{MilpProblem, MilpSolution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Interface for MILP backends.
pub trait MilpSolver: Send + Sync {
    /// Solve a mixed-integer program
    fn solve(&self, problem: &MilpProblem) -> Result<MilpSolution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &MilpProblem) -> Result<()> {
        let mut errors = Vec::new();
        let num_vars = problem.num_variables();

        if num_vars == 0 {
            errors.push("Problem has no variables".to_string());
        }

        for (i, constraint) in problem.constraints.iter().enumerate() {
            for &(index, _) in &constraint.terms {
                if index >= num_vars {
                    errors.push(format!(
                        "Constraint {} '{}' references variable {} but problem has {} variables",
                        i, constraint.name, index, num_vars
                    ));
                }
            }
        }

        for &(index, _) in &problem.objective.terms {
            if index >= num_vars {
                errors.push(format!(
                    "Objective references variable {} but problem has {} variables",
                    index, num_vars
                ));
            }
        }

        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Name of this backend
    fn name(&self) -> &str;

    /// Whether this backend can solve mixed-integer programs
    fn supports_mip(&self) -> bool;
}
