//! ILP formulation of the rostering problem.
//!
//! One binary per availability pair, one slack integer per shift, one load
//! integer per worker, plus `tot_slack`, `min_load` and `max_load`. The
//! shift-coverage equality ties assignments and slack to the requirement;
//! `min_load`/`max_load` are free variables squeezed against every load only
//! by the fairness objective.

use super::milp::{Constraint, ConstraintOp, MilpProblem, Objective, Variable};
use crate::domain::ScheduleProblem;
use std::collections::BTreeMap;

/// Which phase of the lexicographic solve the model is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Minimize total slack
    SlackMinimization,
    /// Minimize `max_load - min_load` subject to `tot_slack <= slack_cap`
    FairnessMinimization { slack_cap: i32 },
}

/// A built model plus the variable indices needed to read a solution back.
#[derive(Debug, Clone)]
pub struct ShiftModel {
    pub problem: MilpProblem,
    /// (worker id, shift id) -> assignment binary index
    pub assignment_vars: BTreeMap<(String, String), usize>,
    /// shift id -> slack variable index
    pub slack_vars: BTreeMap<String, usize>,
    /// worker id -> load variable index
    pub load_vars: BTreeMap<String, usize>,
    pub total_slack_var: usize,
    pub min_load_var: usize,
    pub max_load_var: usize,
}

impl ShiftModel {
    /// Builds the full formulation for one phase.
    ///
    /// Each call produces a fresh model; nothing is shared or mutated
    /// between phases.
    pub fn build(schedule: &ScheduleProblem, phase: Phase) -> Self {
        let mut problem =
            MilpProblem::new("workforce").with_config(schedule.config.clone());

        let mut assignment_vars = BTreeMap::new();
        for (worker, shift) in &schedule.availability {
            let index =
                problem.add_variable(Variable::binary(format!("x_{}_{}", worker, shift)));
            assignment_vars.insert((worker.clone(), shift.clone()), index);
        }

        let mut slack_vars = BTreeMap::new();
        for shift in &schedule.shifts {
            let index =
                problem.add_variable(Variable::integer(format!("slack_{}", shift.id)));
            slack_vars.insert(shift.id.clone(), index);
        }

        let total_slack_var = problem.add_variable(Variable::integer("tot_slack"));

        let mut load_vars = BTreeMap::new();
        for worker in &schedule.workers {
            let index = problem.add_variable(Variable::integer(format!("load_{}", worker)));
            load_vars.insert(worker.clone(), index);
        }

        let min_load_var = problem.add_variable(Variable::integer("min_load"));
        let max_load_var = problem.add_variable(Variable::integer("max_load"));

        // Coverage: assigned + slack == requirement, per shift.
        for shift in &schedule.shifts {
            let mut terms: Vec<(usize, f64)> = assignment_vars
                .iter()
                .filter(|((_, s), _)| s == &shift.id)
                .map(|(_, &index)| (index, 1.0))
                .collect();
            terms.push((slack_vars[&shift.id], 1.0));
            let requirement = schedule.requirements.get(&shift.id).copied().unwrap_or(0);
            problem.add_constraint(
                Constraint::new(ConstraintOp::Equal, terms, f64::from(requirement))
                    .with_name(format!("cover_{}", shift.id)),
            );
        }

        // tot_slack is defined, not solved: tot_slack - sum(slack) == 0.
        let mut terms = vec![(total_slack_var, 1.0)];
        terms.extend(slack_vars.values().map(|&index| (index, -1.0)));
        problem.add_constraint(
            Constraint::new(ConstraintOp::Equal, terms, 0.0).with_name("tot_slack_sum"),
        );

        // load_w == sum of w's assignment binaries.
        for worker in &schedule.workers {
            let mut terms = vec![(load_vars[worker], 1.0)];
            terms.extend(
                assignment_vars
                    .iter()
                    .filter(|((w, _), _)| w == worker)
                    .map(|(_, &index)| (index, -1.0)),
            );
            problem.add_constraint(
                Constraint::new(ConstraintOp::Equal, terms, 0.0)
                    .with_name(format!("load_{}", worker)),
            );
        }

        // min_load <= load_w <= max_load for every worker.
        for worker in &schedule.workers {
            problem.add_constraint(
                Constraint::new(
                    ConstraintOp::LessThanOrEqual,
                    vec![(min_load_var, 1.0), (load_vars[worker], -1.0)],
                    0.0,
                )
                .with_name(format!("min_load_{}", worker)),
            );
            problem.add_constraint(
                Constraint::new(
                    ConstraintOp::LessThanOrEqual,
                    vec![(load_vars[worker], 1.0), (max_load_var, -1.0)],
                    0.0,
                )
                .with_name(format!("max_load_{}", worker)),
            );
        }

        match phase {
            Phase::SlackMinimization => {
                problem.set_objective(Objective::minimize(vec![(total_slack_var, 1.0)]));
            }
            Phase::FairnessMinimization { slack_cap } => {
                problem.add_constraint(
                    Constraint::new(
                        ConstraintOp::LessThanOrEqual,
                        vec![(total_slack_var, 1.0)],
                        f64::from(slack_cap),
                    )
                    .with_name("slack_tolerance"),
                );
                problem.set_objective(Objective::minimize(vec![
                    (max_load_var, 1.0),
                    (min_load_var, -1.0),
                ]));
            }
        }

        Self {
            problem,
            assignment_vars,
            slack_vars,
            load_vars,
            total_slack_var,
            min_load_var,
            max_load_var,
        }
    }
}
