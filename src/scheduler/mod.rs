//! Two-phase lexicographic solve.
//!
//! Phase 1 minimizes total slack (unfilled headcount). Phase 2 rebuilds the
//! model, caps total slack at `ceil((1 + tolerance) * best_slack)`, and
//! minimizes the load spread `max_load - min_load`. The phase-1 outcome is
//! threaded into phase 2 as an immutable value; no solver state survives
//! between the two solves.

use crate::domain::{
    Assignment, Schedule, ScheduleError, ScheduleProblem, SolveStatistics, SolveStatus,
};
use crate::model::{MilpSolution, Phase, ShiftModel};
use crate::solver::{MilpSolver, SolverError, SolverFactory};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Immutable result of the slack-minimization phase.
#[derive(Debug, Clone, Copy)]
pub struct Phase1Outcome {
    pub best_slack: i32,
    pub status: SolveStatus,
    pub solve_time_ms: f64,
}

impl Phase1Outcome {
    /// Total-slack cap for the fairness phase.
    pub fn slack_cap(&self, tolerance: f64) -> i32 {
        ((1.0 + tolerance) * f64::from(self.best_slack)).ceil() as i32
    }
}

/// Solves rostering problems with an injected MILP backend.
///
/// Each `solve` call builds fresh models and carries its own configuration;
/// a `Scheduler` can be shared across threads and calls.
pub struct Scheduler {
    solver: Arc<dyn MilpSolver>,
}

impl Scheduler {
    /// Scheduler over the backend named in the problem's config.
    pub fn for_problem(problem: &ScheduleProblem) -> Result<Self, ScheduleError> {
        let solver = SolverFactory::create_from_backend(problem.config.backend)?;
        Ok(Self { solver })
    }

    /// Scheduler over an explicit backend, mainly for tests.
    pub fn with_solver(solver: Arc<dyn MilpSolver>) -> Self {
        Self { solver }
    }

    pub fn solve(&self, problem: &ScheduleProblem) -> Result<Schedule, ScheduleError> {
        validate(problem)?;

        let phase1_model = ShiftModel::build(problem, Phase::SlackMinimization);
        let phase1_solution = self.run_phase(&phase1_model)?;
        let phase1 = Phase1Outcome {
            best_slack: phase1_solution.int_value(phase1_model.total_slack_var),
            status: phase1_solution.status,
            solve_time_ms: phase1_solution.statistics.solve_time_ms,
        };

        let slack_cap = phase1.slack_cap(problem.config.slack_tolerance);
        let phase2_model = ShiftModel::build(
            problem,
            Phase::FairnessMinimization { slack_cap },
        );
        let phase2_solution = self.run_phase(&phase2_model)?;

        Ok(extract_schedule(
            problem,
            &phase2_model,
            &phase2_solution,
            phase1,
        ))
    }

    fn run_phase(&self, model: &ShiftModel) -> Result<MilpSolution, ScheduleError> {
        let solution = self.solver.solve(&model.problem)?;
        match solution.status {
            SolveStatus::Optimal | SolveStatus::Feasible => Ok(solution),
            SolveStatus::Infeasible => Err(ScheduleError::Infeasible),
            SolveStatus::TimeLimit => Err(ScheduleError::Timeout),
            SolveStatus::Unbounded | SolveStatus::Error => {
                Err(ScheduleError::SolverFailure(solution.message))
            }
        }
    }
}

/// Convenience entry point: solve with the backend named in the config.
pub fn solve(problem: &ScheduleProblem) -> Result<Schedule, ScheduleError> {
    Scheduler::for_problem(problem)?.solve(problem)
}

impl From<SolverError> for ScheduleError {
    fn from(err: SolverError) -> Self {
        ScheduleError::SolverFailure(err.to_string())
    }
}

fn validate(problem: &ScheduleProblem) -> Result<(), ScheduleError> {
    if problem.workers.is_empty() {
        return Err(ScheduleError::MalformedInput("worker roster is empty".into()));
    }
    if problem.shifts.is_empty() {
        return Err(ScheduleError::MalformedInput("planning horizon is empty".into()));
    }
    if problem.config.slack_tolerance < 0.0 {
        return Err(ScheduleError::MalformedInput(format!(
            "slack tolerance must be non-negative, got {}",
            problem.config.slack_tolerance
        )));
    }

    let workers: BTreeSet<&str> = problem.workers.iter().map(String::as_str).collect();
    if workers.len() != problem.workers.len() {
        return Err(ScheduleError::MalformedInput("duplicate worker id".into()));
    }
    let shifts: BTreeSet<&str> = problem.shifts.iter().map(|s| s.id.as_str()).collect();
    if shifts.len() != problem.shifts.len() {
        return Err(ScheduleError::MalformedInput("duplicate shift id".into()));
    }

    for shift in &problem.shifts {
        match problem.requirements.get(&shift.id) {
            None => {
                return Err(ScheduleError::MalformedInput(format!(
                    "no requirement for shift '{}'",
                    shift.id
                )))
            }
            Some(&r) if r < 0 => {
                return Err(ScheduleError::MalformedInput(format!(
                    "negative requirement {} for shift '{}'",
                    r, shift.id
                )))
            }
            Some(_) => {}
        }
    }

    for key in problem.requirements.keys() {
        if !shifts.contains(key.as_str()) {
            return Err(ScheduleError::MalformedInput(format!(
                "requirement set for unknown shift '{}'",
                key
            )));
        }
    }

    for (worker, shift) in &problem.availability {
        if !workers.contains(worker.as_str()) {
            return Err(ScheduleError::MalformedInput(format!(
                "availability references unknown worker '{}'",
                worker
            )));
        }
        if !shifts.contains(shift.as_str()) {
            return Err(ScheduleError::MalformedInput(format!(
                "availability references unknown shift '{}'",
                shift
            )));
        }
    }

    Ok(())
}

fn extract_schedule(
    problem: &ScheduleProblem,
    model: &ShiftModel,
    solution: &MilpSolution,
    phase1: Phase1Outcome,
) -> Schedule {
    let assignments: Vec<Assignment> = model
        .assignment_vars
        .iter()
        .map(|((worker, shift), &index)| Assignment {
            worker: worker.clone(),
            shift: shift.clone(),
            assigned: solution.is_one(index),
        })
        .collect();

    let slack: BTreeMap<String, i32> = model
        .slack_vars
        .iter()
        .map(|(shift, &index)| (shift.clone(), solution.int_value(index)))
        .collect();

    let loads: BTreeMap<String, i32> = model
        .load_vars
        .iter()
        .map(|(worker, &index)| (worker.clone(), solution.int_value(index)))
        .collect();

    let max_load = loads.values().copied().max().unwrap_or(0);
    let min_load = loads.values().copied().min().unwrap_or(0);

    let status = if phase1.status == SolveStatus::Optimal
        && solution.status == SolveStatus::Optimal
    {
        SolveStatus::Optimal
    } else {
        SolveStatus::Feasible
    };

    Schedule {
        assignments,
        slack,
        loads,
        total_slack: solution.int_value(model.total_slack_var),
        fairness: max_load - min_load,
        status,
        statistics: SolveStatistics {
            phase1_time_ms: phase1.solve_time_ms,
            phase2_time_ms: solution.statistics.solve_time_ms,
            num_variables: solution.statistics.num_variables,
            num_constraints: solution.statistics.num_constraints,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Shift, SolverConfig};
    use chrono::NaiveDate;

    fn shifts(n: u32) -> Vec<Shift> {
        (0..n)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2025, 5, 5 + i).unwrap();
                Shift::new(format!("{}{}", date.format("%a"), i + 1), date)
            })
            .collect()
    }

    fn full_availability(workers: &[&str], shifts: &[Shift]) -> BTreeSet<(String, String)> {
        let mut availability = BTreeSet::new();
        for w in workers {
            for s in shifts {
                availability.insert((w.to_string(), s.id.clone()));
            }
        }
        availability
    }

    fn uniform_problem(workers: &[&str], num_shifts: u32, requirement: i32) -> ScheduleProblem {
        let shifts = shifts(num_shifts);
        let requirements = shifts
            .iter()
            .map(|s| (s.id.clone(), requirement))
            .collect();
        let availability = full_availability(workers, &shifts);
        ScheduleProblem::new(
            workers.iter().map(|w| w.to_string()).collect(),
            shifts,
            availability,
            requirements,
        )
    }

    fn assert_coverage_invariant(problem: &ScheduleProblem, schedule: &Schedule) {
        for shift in &problem.shifts {
            let assigned = schedule.workers_for(&shift.id).len() as i32;
            let slack = schedule.slack[&shift.id];
            assert_eq!(
                assigned + slack,
                problem.requirements[&shift.id],
                "coverage broken for {}",
                shift.id
            );
        }
        for worker in &problem.workers {
            assert_eq!(
                schedule.loads[worker],
                schedule.shifts_for(worker).len() as i32,
                "load mismatch for {}",
                worker
            );
        }
    }

    #[test]
    fn exact_cover_fills_every_shift_once() {
        let problem = uniform_problem(&["amy", "bob"], 2, 1);
        let schedule = solve(&problem).unwrap();
        assert_eq!(schedule.total_slack, 0);
        for shift in &problem.shifts {
            assert_eq!(schedule.workers_for(&shift.id).len(), 1);
        }
        assert_eq!(schedule.fairness, 0);
        assert_coverage_invariant(&problem, &schedule);
    }

    #[test]
    fn shortage_assigns_the_lone_worker_everywhere() {
        let problem = uniform_problem(&["amy"], 2, 2);
        let schedule = solve(&problem).unwrap();
        assert_eq!(schedule.total_slack, 2);
        assert_eq!(schedule.loads["amy"], 2);
        for shift in &problem.shifts {
            assert!(schedule.is_assigned("amy", &shift.id));
            assert_eq!(schedule.slack[&shift.id], 1);
        }
        assert_coverage_invariant(&problem, &schedule);
    }

    #[test]
    fn fairness_phase_spreads_shifts_evenly() {
        let problem = uniform_problem(&["amy", "bob", "cathy"], 3, 1);
        let schedule = solve(&problem).unwrap();
        assert_eq!(schedule.total_slack, 0);
        assert_eq!(schedule.fairness, 0);
        for worker in &problem.workers {
            assert_eq!(schedule.loads[worker], 1);
        }
        assert_coverage_invariant(&problem, &schedule);
    }

    #[test]
    fn unavailable_pair_is_never_assigned() {
        let mut problem = uniform_problem(&["amy", "bob"], 2, 1);
        problem
            .availability
            .remove(&("bob".to_string(), problem.shifts[0].id.clone()));
        problem
            .requirements
            .insert(problem.shifts[0].id.clone(), 2);
        let schedule = solve(&problem).unwrap();
        let first = problem.shifts[0].id.clone();
        assert!(!schedule.is_assigned("bob", &first));
        assert_eq!(schedule.workers_for(&first), vec!["amy"]);
        assert_eq!(schedule.slack[&first], 1);
        assert_coverage_invariant(&problem, &schedule);
    }

    #[test]
    fn relaxation_can_only_improve_fairness() {
        // amy can work both shifts, bob only the first; the first shift wants
        // three heads, so one slack is unavoidable. Exact slack-optimality
        // forces amy onto both shifts; a 20% band lets the spread reach zero.
        let shifts = shifts(2);
        let workers = vec!["amy".to_string(), "bob".to_string()];
        let mut availability = BTreeSet::new();
        availability.insert(("amy".to_string(), shifts[0].id.clone()));
        availability.insert(("amy".to_string(), shifts[1].id.clone()));
        availability.insert(("bob".to_string(), shifts[0].id.clone()));
        let requirements = BTreeMap::from([
            (shifts[0].id.clone(), 3),
            (shifts[1].id.clone(), 1),
        ]);
        let base = ScheduleProblem::new(workers, shifts, availability, requirements);

        let strict = base.clone().with_config(SolverConfig {
            slack_tolerance: 0.0,
            ..SolverConfig::default()
        });
        let strict_schedule = solve(&strict).unwrap();
        assert_eq!(strict_schedule.total_slack, 1);
        assert_eq!(strict_schedule.fairness, 1);
        assert_coverage_invariant(&strict, &strict_schedule);

        let relaxed = base.with_config(SolverConfig {
            slack_tolerance: 0.2,
            ..SolverConfig::default()
        });
        let relaxed_schedule = solve(&relaxed).unwrap();
        // cap = ceil(1.2 * 1) = 2
        assert!(relaxed_schedule.total_slack <= 2);
        assert_eq!(relaxed_schedule.fairness, 0);
        assert!(relaxed_schedule.fairness <= strict_schedule.fairness);
        assert_coverage_invariant(&relaxed, &relaxed_schedule);
    }

    #[test]
    fn slack_cap_rounds_up() {
        let outcome = Phase1Outcome {
            best_slack: 5,
            status: SolveStatus::Optimal,
            solve_time_ms: 0.0,
        };
        assert_eq!(outcome.slack_cap(0.2), 6);
        assert_eq!(outcome.slack_cap(0.0), 5);
        let zero = Phase1Outcome {
            best_slack: 0,
            status: SolveStatus::Optimal,
            solve_time_ms: 0.0,
        };
        assert_eq!(zero.slack_cap(0.2), 0);
    }

    #[test]
    fn missing_requirement_is_rejected() {
        let mut problem = uniform_problem(&["amy"], 2, 1);
        let second = problem.shifts[1].id.clone();
        problem.requirements.remove(&second);
        assert!(matches!(
            solve(&problem),
            Err(ScheduleError::MalformedInput(_))
        ));
    }

    #[test]
    fn negative_requirement_is_rejected() {
        let mut problem = uniform_problem(&["amy"], 2, 1);
        problem.requirements.insert(problem.shifts[0].id.clone(), -1);
        assert!(matches!(
            solve(&problem),
            Err(ScheduleError::MalformedInput(_))
        ));
    }

    #[test]
    fn empty_roster_and_horizon_are_rejected() {
        let mut no_workers = uniform_problem(&["amy"], 1, 1);
        no_workers.workers.clear();
        assert!(matches!(
            solve(&no_workers),
            Err(ScheduleError::MalformedInput(_))
        ));

        let mut no_shifts = uniform_problem(&["amy"], 1, 1);
        no_shifts.shifts.clear();
        assert!(matches!(
            solve(&no_shifts),
            Err(ScheduleError::MalformedInput(_))
        ));
    }

    #[test]
    fn requirement_for_unknown_shift_is_rejected() {
        let mut problem = uniform_problem(&["amy"], 1, 1);
        problem.requirements.insert("Sun99".to_string(), 1);
        assert!(matches!(
            solve(&problem),
            Err(ScheduleError::MalformedInput(_))
        ));
    }

    #[test]
    fn unknown_availability_reference_is_rejected() {
        let mut problem = uniform_problem(&["amy"], 1, 1);
        problem
            .availability
            .insert(("ghost".to_string(), problem.shifts[0].id.clone()));
        assert!(matches!(
            solve(&problem),
            Err(ScheduleError::MalformedInput(_))
        ));
    }

    struct FixedStatusSolver(SolveStatus);

    impl MilpSolver for FixedStatusSolver {
        fn solve(
            &self,
            _problem: &crate::model::MilpProblem,
        ) -> crate::solver::solver_service::Result<MilpSolution> {
            Ok(MilpSolution::new(self.0, "stub"))
        }
        fn name(&self) -> &str {
            "stub"
        }
        fn supports_mip(&self) -> bool {
            true
        }
    }

    #[test]
    fn infeasible_status_surfaces_as_infeasible() {
        let scheduler =
            Scheduler::with_solver(Arc::new(FixedStatusSolver(SolveStatus::Infeasible)));
        let problem = uniform_problem(&["amy"], 1, 1);
        assert!(matches!(
            scheduler.solve(&problem),
            Err(ScheduleError::Infeasible)
        ));
    }

    #[test]
    fn time_limit_status_surfaces_as_timeout() {
        let scheduler =
            Scheduler::with_solver(Arc::new(FixedStatusSolver(SolveStatus::TimeLimit)));
        let problem = uniform_problem(&["amy"], 1, 1);
        assert!(matches!(
            scheduler.solve(&problem),
            Err(ScheduleError::Timeout)
        ));
    }
}
