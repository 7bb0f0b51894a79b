//! Plain-text rendering of an optimized schedule.
//!
//! One row per worker, one column per date, check marks for assigned days,
//! plus a "Required" totals row and a slack/load summary.

use crate::domain::{Schedule, ScheduleProblem};
use std::fmt::Write;

const ASSIGNED: char = '✓';
const UNASSIGNED: char = '✗';

/// Renders the assignment grid with a trailing requirements row.
pub fn render_grid(problem: &ScheduleProblem, schedule: &Schedule) -> String {
    let label_width = problem
        .workers
        .iter()
        .map(|w| w.chars().count())
        .chain(std::iter::once("Required".len()))
        .chain(std::iter::once("Worker".len()))
        .max()
        .unwrap_or(0);
    let date_width = 10;

    let mut out = String::new();
    write!(out, "{:<label_width$}", "Worker").unwrap();
    for shift in &problem.shifts {
        // DelayedFormat ignores width specifiers, so render to a String first
        let date = shift.date.format("%Y-%m-%d").to_string();
        write!(out, "  {:>date_width$}", date).unwrap();
    }
    out.push('\n');

    for worker in &problem.workers {
        write!(out, "{:<label_width$}", worker).unwrap();
        for shift in &problem.shifts {
            let mark = if schedule.is_assigned(worker, &shift.id) {
                ASSIGNED
            } else {
                UNASSIGNED
            };
            write!(out, "  {:>date_width$}", mark).unwrap();
        }
        out.push('\n');
    }

    write!(out, "{:<label_width$}", "Required").unwrap();
    for shift in &problem.shifts {
        let requirement = problem.requirements.get(&shift.id).copied().unwrap_or(0);
        write!(out, "  {:>date_width$}", requirement).unwrap();
    }
    out.push('\n');
    writeln!(out, "Legend: {} working, {} not working", ASSIGNED, UNASSIGNED).unwrap();
    out
}

/// Renders the slack total and per-worker shift counts.
pub fn render_summary(problem: &ScheduleProblem, schedule: &Schedule) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "Extra workers required to satisfy all shift requirements: {}",
        schedule.total_slack
    )
    .unwrap();
    writeln!(out, "Load spread (max - min): {}", schedule.fairness).unwrap();
    for worker in &problem.workers {
        let load = schedule.loads.get(worker).copied().unwrap_or(0);
        let plural = if load == 1 { "" } else { "s" };
        writeln!(out, "{}: {} shift{}", worker, load, plural).unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::assembly::{Horizon, ProblemBuilder};
    use crate::scheduler;
    use chrono::NaiveDate;

    fn solved_shortage() -> (ScheduleProblem, Schedule) {
        let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        let horizon = Horizon::starting(monday, 2).unwrap();
        let problem = ProblemBuilder::new(horizon, ["amy"])
            .auto_fill(true)
            .default_requirement(2)
            .build()
            .unwrap();
        let schedule = scheduler::solve(&problem).unwrap();
        (problem, schedule)
    }

    #[test]
    fn grid_shows_marks_and_requirements() {
        let (problem, schedule) = solved_shortage();
        let grid = render_grid(&problem, &schedule);
        let lines: Vec<&str> = grid.lines().collect();
        assert!(lines[0].starts_with("Worker"));
        assert!(lines[0].contains("2025-05-05"));
        // the lone worker covers both days
        assert_eq!(lines[1].matches(ASSIGNED).count(), 2);
        let required = lines[2];
        assert!(required.starts_with("Required"));
        assert!(required.matches('2').count() >= 2);
        assert!(grid.contains("Legend"));
    }

    #[test]
    fn summary_reports_slack_and_loads() {
        let (problem, schedule) = solved_shortage();
        let summary = render_summary(&problem, &schedule);
        assert!(summary.contains("requirements: 2"));
        assert!(summary.contains("amy: 2 shifts"));
    }
}
