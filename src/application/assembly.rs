//! Input assembly for the scheduler.
//!
//! Turns raw caller input (a start date, a roster, per-worker date
//! selections, per-shift headcounts) into a fully resolved
//! [`ScheduleProblem`]. Default-expansion policies like auto-fill live here,
//! at the collaborator boundary; the scheduler only ever sees the resolved
//! availability set.

use crate::domain::{ScheduleError, ScheduleProblem, Shift, SolverConfig};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// A contiguous run of calendar dates, one shift per day.
///
/// Shift ids combine the weekday abbreviation with the 1-based day index:
/// "Mon1", "Tue2", ...
#[derive(Debug, Clone)]
pub struct Horizon {
    shifts: Vec<Shift>,
}

impl Horizon {
    pub fn starting(start: NaiveDate, num_days: usize) -> Result<Self, ScheduleError> {
        if num_days == 0 {
            return Err(ScheduleError::MalformedInput(
                "planning horizon must cover at least one day".into(),
            ));
        }
        let shifts = (0..num_days)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                Shift::new(format!("{}{}", date.format("%a"), i + 1), date)
            })
            .collect();
        Ok(Self { shifts })
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn num_days(&self) -> usize {
        self.shifts.len()
    }

    pub fn shift_for_date(&self, date: NaiveDate) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.date == date)
    }
}

/// Builder assembling a [`ScheduleProblem`] from caller-side selections.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    horizon: Horizon,
    workers: Vec<String>,
    selections: BTreeMap<String, Vec<NaiveDate>>,
    requirements: BTreeMap<NaiveDate, i32>,
    auto_fill: bool,
    default_requirement: i32,
    config: SolverConfig,
}

impl ProblemBuilder {
    pub fn new<I, S>(horizon: Horizon, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            horizon,
            workers: workers.into_iter().map(Into::into).collect(),
            selections: BTreeMap::new(),
            requirements: BTreeMap::new(),
            auto_fill: false,
            default_requirement: 1,
            config: SolverConfig::default(),
        }
    }

    /// Records the dates a worker is available for. May be called more than
    /// once per worker; selections accumulate.
    pub fn select<I>(mut self, worker: &str, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.selections
            .entry(worker.to_string())
            .or_default()
            .extend(dates);
        self
    }

    /// Sets the required headcount for the shift on a date.
    pub fn require(mut self, date: NaiveDate, headcount: i32) -> Self {
        self.requirements.insert(date, headcount);
        self
    }

    /// When enabled, a worker with zero explicit selections is expanded to
    /// full availability across the horizon.
    pub fn auto_fill(mut self, enabled: bool) -> Self {
        self.auto_fill = enabled;
        self
    }

    /// Headcount used for shifts without an explicit requirement.
    pub fn default_requirement(mut self, headcount: i32) -> Self {
        self.default_requirement = headcount;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ScheduleProblem, ScheduleError> {
        for worker in self.selections.keys() {
            if !self.workers.iter().any(|w| w == worker) {
                return Err(ScheduleError::MalformedInput(format!(
                    "availability selected for unknown worker '{}'",
                    worker
                )));
            }
        }

        let mut availability = BTreeSet::new();
        for worker in &self.workers {
            let selected = self.selections.get(worker).map(Vec::as_slice).unwrap_or(&[]);
            if selected.is_empty() {
                if self.auto_fill {
                    for shift in self.horizon.shifts() {
                        availability.insert((worker.clone(), shift.id.clone()));
                    }
                }
                continue;
            }
            for &date in selected {
                let shift = self.horizon.shift_for_date(date).ok_or_else(|| {
                    ScheduleError::MalformedInput(format!(
                        "invalid date selected for {}: {}",
                        worker, date
                    ))
                })?;
                availability.insert((worker.clone(), shift.id.clone()));
            }
        }

        for date in self.requirements.keys() {
            if self.horizon.shift_for_date(*date).is_none() {
                return Err(ScheduleError::MalformedInput(format!(
                    "requirement set for date outside the horizon: {}",
                    date
                )));
            }
        }

        let requirements = self
            .horizon
            .shifts()
            .iter()
            .map(|shift| {
                let headcount = self
                    .requirements
                    .get(&shift.date)
                    .copied()
                    .unwrap_or(self.default_requirement);
                (shift.id.clone(), headcount)
            })
            .collect();

        Ok(ScheduleProblem::new(
            self.workers,
            self.horizon.shifts.clone(),
            availability,
            requirements,
        )
        .with_config(self.config))
    }
}
