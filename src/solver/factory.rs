use super::microlp_solver::MicrolpSolver;
use super::solver_service::{MilpSolver, Result, SolverError};
use crate::domain::SolverBackend;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend.
    ///
    /// `Auto` prefers CBC when compiled in, otherwise microlp.
    pub fn create_from_backend(backend: SolverBackend) -> Result<Arc<dyn MilpSolver>> {
        match backend {
            SolverBackend::Auto => Ok(Self::default_solver()),
            SolverBackend::Microlp => Ok(Arc::new(MicrolpSolver::new())),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => Ok(Arc::new(super::coin_cbc_solver::CoinCbcSolver::new())),
            #[cfg(not(feature = "coin_cbc"))]
            SolverBackend::CoinCbc => Err(SolverError::SolverNotAvailable(
                "COIN-OR CBC requires the `coin_cbc` feature".to_string(),
            )),
        }
    }

    pub fn default_solver() -> Arc<dyn MilpSolver> {
        #[cfg(feature = "coin_cbc")]
        {
            Arc::new(super::coin_cbc_solver::CoinCbcSolver::new())
        }
        #[cfg(not(feature = "coin_cbc"))]
        {
            Arc::new(MicrolpSolver::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_backend_resolves_to_a_mip_solver() {
        let solver = SolverFactory::create_from_backend(SolverBackend::Auto).unwrap();
        assert!(solver.supports_mip());
    }

    #[cfg(not(feature = "coin_cbc"))]
    #[test]
    fn cbc_without_feature_is_reported_unavailable() {
        assert!(matches!(
            SolverFactory::create_from_backend(SolverBackend::CoinCbc),
            Err(SolverError::SolverNotAvailable(_))
        ));
    }
}
