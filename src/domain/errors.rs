/// Error taxonomy for a solve call.
///
/// Every failure is reported as a typed outcome; a failed solve is never
/// coerced into an empty or partial schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Rejected before model construction: missing or negative requirement,
    /// unknown worker or shift reference, empty roster or horizon
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The integer program has no feasible solution. With non-negative
    /// requirements this cannot happen, since slack absorbs any unmet demand.
    #[error("no feasible assignment exists for the given inputs")]
    Infeasible,

    /// The solve-time budget ran out before a proven optimum
    #[error("solver exceeded its time budget")]
    Timeout,

    /// The backend terminated abnormally
    #[error("solver failure: {0}")]
    SolverFailure(String),
}
