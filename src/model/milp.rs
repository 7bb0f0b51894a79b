// Solver-agnostic MILP representation
// Adapters translate this to a concrete backend's API, so the scheduler
// never depends on a solver crate directly.

use crate::domain::{SolveStatus, SolverConfig};

/// Type of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// x ∈ ℝ
    Continuous,
    /// x ∈ ℤ
    Integer,
    /// x ∈ {0, 1}
    Binary,
}

/// Comparison direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Decision variable definition.
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: Some(1.0),
            name: name.into(),
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Integer,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

/// Linear constraint over sparse (variable index, coefficient) terms.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub op: ConstraintOp,
    pub terms: Vec<(usize, f64)>,
    pub bound: f64,
    pub name: String,
}

impl Constraint {
    pub fn new(op: ConstraintOp, terms: Vec<(usize, f64)>, bound: f64) -> Self {
        Self {
            op,
            terms,
            bound,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Linear objective over sparse terms.
#[derive(Debug, Clone)]
pub struct Objective {
    pub sense: ObjectiveSense,
    pub terms: Vec<(usize, f64)>,
}

impl Objective {
    pub fn minimize(terms: Vec<(usize, f64)>) -> Self {
        Self {
            sense: ObjectiveSense::Minimize,
            terms,
        }
    }
}

/// A complete mixed-integer program.
#[derive(Debug, Clone)]
pub struct MilpProblem {
    pub name: String,
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Objective,
    pub config: SolverConfig,
}

impl MilpProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::minimize(Vec::new()),
            config: SolverConfig::default(),
        }
    }

    /// Adds a variable and returns its index.
    pub fn add_variable(&mut self, variable: Variable) -> usize {
        self.variables.push(variable);
        self.variables.len() - 1
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }
}

/// Timing and size counters for one backend solve.
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_integer_vars: u32,
    pub num_binary_vars: u32,
}

/// Result of one backend solve.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    /// One value per variable, indexed as in `MilpProblem::variables`
    pub values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl MilpSolution {
    pub fn new(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(value: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value: Some(value),
            values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    /// Resolved value of a variable, rounded to the nearest integer.
    pub fn int_value(&self, index: usize) -> i32 {
        self.values.get(index).copied().unwrap_or(0.0).round() as i32
    }

    /// Whether a binary variable resolved to 1.
    pub fn is_one(&self, index: usize) -> bool {
        self.values.get(index).copied().unwrap_or(0.0) > 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_indices_are_sequential() {
        let mut problem = MilpProblem::new("test");
        let a = problem.add_variable(Variable::binary("a"));
        let b = problem.add_variable(Variable::integer("b"));
        assert_eq!((a, b), (0, 1));
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_integer_variables(), 2);
        assert!(problem.is_mixed_integer());
    }

    #[test]
    fn solution_value_helpers_round() {
        let solution = MilpSolution::optimal(1.0, vec![0.9999, 0.0001, 2.49]);
        assert!(solution.is_one(0));
        assert!(!solution.is_one(1));
        assert_eq!(solution.int_value(2), 2);
        assert_eq!(solution.int_value(99), 0);
    }
}
