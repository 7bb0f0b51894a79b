// Domain value objects shared by the scheduler and the solver adapters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a solve, at the granularity the backends report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal solution
    Optimal,
    /// Integer-feasible solution without an optimality proof
    /// (backend terminated early but returned its incumbent)
    Feasible,
    /// No assignment satisfies all constraints
    Infeasible,
    /// Objective can be improved without bound
    Unbounded,
    /// Time budget exhausted before a proven optimum
    TimeLimit,
    /// Backend terminated abnormally
    Error,
}

impl SolveStatus {
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Feasible => write!(f, "Feasible"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::TimeLimit => write!(f, "Time Limit Reached"),
            SolveStatus::Error => write!(f, "Error"),
        }
    }
}

/// MILP backend used for both phases of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverBackend {
    /// Pick the best backend compiled in
    #[default]
    Auto,
    /// Pure-Rust microlp solver (always available)
    Microlp,
    /// COIN-OR CBC solver (requires the `coin_cbc` feature)
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::Microlp => write!(f, "microlp"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}
