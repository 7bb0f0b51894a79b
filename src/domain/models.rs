use super::value_objects::{SolveStatus, SolverBackend};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One schedulable shift: a single full-day slot on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier, e.g. "Mon1"
    pub id: String,
    /// Calendar date the shift falls on
    pub date: NaiveDate,
}

impl Shift {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
        }
    }
}

/// Configuration passed into each solve call.
///
/// Carried on the problem value so the scheduler stays reentrant:
/// no global solver state survives a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Per-phase wall-clock budget in seconds, passed through to backends
    /// that support it
    pub time_limit: Option<f64>,
    /// Relative slack tolerance for the fairness phase: phase 2 may use up to
    /// `ceil((1 + slack_tolerance) * best_slack)` total slack. 0.0 keeps
    /// phase 1's optimum exactly.
    pub slack_tolerance: f64,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit: None,
            slack_tolerance: 0.2,
            verbose: false,
        }
    }
}

/// A complete rostering problem instance.
///
/// Workers and shifts are identified by their string ids; `availability`
/// holds the only (worker, shift) pairs for which an assignment is
/// structurally possible. A pair absent from the set can never be assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleProblem {
    /// Worker roster, in display order
    pub workers: Vec<String>,
    /// Planning horizon, one shift per day, in calendar order
    pub shifts: Vec<Shift>,
    /// (worker id, shift id) pairs eligible for assignment
    pub availability: BTreeSet<(String, String)>,
    /// Required headcount per shift id
    pub requirements: BTreeMap<String, i32>,
    pub config: SolverConfig,
}

impl ScheduleProblem {
    pub fn new(
        workers: Vec<String>,
        shifts: Vec<Shift>,
        availability: BTreeSet<(String, String)>,
        requirements: BTreeMap<String, i32>,
    ) -> Self {
        Self {
            workers,
            shifts,
            availability,
            requirements,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Shift ids a worker is available for, in horizon order.
    pub fn available_shifts(&self, worker: &str) -> Vec<&str> {
        let selected: BTreeSet<&str> = self
            .availability
            .iter()
            .filter(|(w, _)| w.as_str() == worker)
            .map(|(_, s)| s.as_str())
            .collect();
        self.shifts
            .iter()
            .map(|s| s.id.as_str())
            .filter(|id| selected.contains(id))
            .collect()
    }
}

/// Resolved value of one assignment decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub worker: String,
    pub shift: String,
    pub assigned: bool,
}

/// Timing and size counters accumulated over both phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveStatistics {
    pub phase1_time_ms: f64,
    pub phase2_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

/// An optimized schedule: the output of a two-phase solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// One entry per availability pair, with its resolved 0/1 value
    pub assignments: Vec<Assignment>,
    /// Unfilled headcount per shift id
    pub slack: BTreeMap<String, i32>,
    /// Shifts worked per worker id
    pub loads: BTreeMap<String, i32>,
    /// Sum of all per-shift slacks
    pub total_slack: i32,
    /// Busiest minus least-busy worker load
    pub fairness: i32,
    /// `Optimal`, or `Feasible` when a backend returned an unproven incumbent
    pub status: SolveStatus,
    pub statistics: SolveStatistics,
}

impl Schedule {
    pub fn is_assigned(&self, worker: &str, shift: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.assigned && a.worker == worker && a.shift == shift)
    }

    /// Shift ids assigned to a worker, in the order assignments were recorded.
    pub fn shifts_for(&self, worker: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.assigned && a.worker == worker)
            .map(|a| a.shift.as_str())
            .collect()
    }

    /// Workers assigned to a shift.
    pub fn workers_for(&self, shift: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|a| a.assigned && a.shift == shift)
            .map(|a| a.worker.as_str())
            .collect()
    }

    pub fn min_load(&self) -> i32 {
        self.loads.values().copied().min().unwrap_or(0)
    }

    pub fn max_load(&self) -> i32 {
        self.loads.values().copied().max().unwrap_or(0)
    }
}
