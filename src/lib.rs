//! Fair workforce shift scheduling on top of mixed-integer programming.
//!
//! A roster, a run of daily shifts, per-worker availability and per-shift
//! headcounts go in; a slack-minimal, load-balanced schedule comes out of a
//! two-phase lexicographic solve.

// Domain layer: rostering problem, schedule, and error types
pub mod domain;

// Application layer: input assembly and schedule rendering
pub mod application;

// Model layer: MILP representation and the workforce formulation
pub mod model;

// Scheduler: two-phase lexicographic solve orchestration
pub mod scheduler;

// Solver adapters: concrete implementations of MilpSolver
pub mod solver;

// Re-export commonly used types
pub use domain::{
    Assignment, Schedule, ScheduleError, ScheduleProblem, Shift, SolveStatistics, SolveStatus,
    SolverBackend, SolverConfig,
};

pub use application::{render_grid, render_summary, Horizon, ProblemBuilder};

pub use scheduler::{solve, Phase1Outcome, Scheduler};

pub use solver::{MicrolpSolver, MilpSolver, SolverError, SolverFactory};

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
