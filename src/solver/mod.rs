// Solver adapters module

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc_solver;
pub mod factory;
pub mod microlp_solver;
pub mod solver_service;

#[cfg(feature = "coin_cbc")]
pub use coin_cbc_solver::CoinCbcSolver;
pub use factory::SolverFactory;
pub use microlp_solver::MicrolpSolver;
pub use solver_service::{MilpSolver, SolverError};
