use super::solver_service::{MilpSolver, Result, SolverError};
use crate::domain::SolveStatus;
use crate::model::{
    ConstraintOp, MilpProblem, MilpSolution, ObjectiveSense, SolverStatistics, VariableType,
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

/// COIN-OR CBC backend, behind the `coin_cbc` cargo feature.
///
/// Honors `config.time_limit` through CBC's `sec` parameter.
pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MilpSolver for CoinCbcSolver {
    fn solve(&self, problem: &MilpProblem) -> Result<MilpSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();

        let num_integer = problem
            .variables
            .iter()
            .filter(|v| matches!(v.variable_type, VariableType::Integer))
            .count() as u32;
        let num_binary = problem
            .variables
            .iter()
            .filter(|v| matches!(v.variable_type, VariableType::Binary))
            .count() as u32;

        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::new();

        for var_def in &problem.variables {
            let lower = var_def.lower_bound;
            let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);

            let var = match var_def.variable_type {
                VariableType::Binary | VariableType::Integer => {
                    vars.add(variable().integer().min(lower).max(upper))
                }
                VariableType::Continuous => vars.add(variable().min(lower).max(upper)),
            };
            lp_variables.push(var);
        }

        // good_lp minimizes, so negate coefficients for maximization
        let is_maximize = problem.objective.sense == ObjectiveSense::Maximize;
        let mut obj_expr: Expression = 0.into();
        for &(index, coeff) in &problem.objective.terms {
            let c = if is_maximize { -coeff } else { coeff };
            obj_expr += c * lp_variables[index];
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);

        for constraint in &problem.constraints {
            let mut lhs: Expression = 0.into();
            for &(index, coeff) in &constraint.terms {
                lhs += coeff * lp_variables[index];
            }

            match constraint.op {
                ConstraintOp::LessThanOrEqual => {
                    lp_model = lp_model.with(lhs.leq(constraint.bound));
                }
                ConstraintOp::Equal => {
                    lp_model = lp_model.with(lhs.eq(constraint.bound));
                }
                ConstraintOp::GreaterThanOrEqual => {
                    lp_model = lp_model.with(lhs.geq(constraint.bound));
                }
            }
        }

        if let Some(limit) = problem.config.time_limit {
            lp_model.set_parameter("sec", &format!("{}", limit));
        }
        if !problem.config.verbose {
            lp_model.set_parameter("logLevel", "0");
        }

        let solution_result = lp_model.solve();
        let solve_time = start_time.elapsed().as_secs_f64() * 1000.0;

        let statistics = SolverStatistics {
            solve_time_ms: solve_time,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.constraints.len() as u32,
            num_integer_vars: num_integer,
            num_binary_vars: num_binary,
        };

        match solution_result {
            Ok(sol) => {
                let values: Vec<f64> =
                    lp_variables.iter().map(|&var| sol.value(var)).collect();

                let mut objective_value = 0.0;
                for &(index, coeff) in &problem.objective.terms {
                    objective_value += coeff * values[index];
                }

                let mut solution = MilpSolution::optimal(objective_value, values);
                solution.statistics = statistics;
                solution.message = format!("Optimal solution found for '{}'", problem.name);
                Ok(solution)
            }
            Err(ResolutionError::Infeasible) => {
                let mut solution = MilpSolution::new(
                    SolveStatus::Infeasible,
                    "Problem is infeasible: no solution satisfies all constraints",
                );
                solution.statistics = statistics;
                Ok(solution)
            }
            Err(ResolutionError::Unbounded) => {
                let mut solution = MilpSolution::new(
                    SolveStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                );
                solution.statistics = statistics;
                Ok(solution)
            }
            // CBC reports hitting the `sec` budget as a generic "Stopped"
            Err(ref e) if stopped_on_time_limit(e, problem.config.time_limit) => {
                let mut solution = MilpSolution::new(
                    SolveStatus::TimeLimit,
                    "Time budget exhausted before a proven optimum",
                );
                solution.statistics = statistics;
                Ok(solution)
            }
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

fn stopped_on_time_limit(error: &ResolutionError, time_limit: Option<f64>) -> bool {
    time_limit.is_some() && matches!(error, ResolutionError::Other(msg) if *msg == "Stopped")
}
