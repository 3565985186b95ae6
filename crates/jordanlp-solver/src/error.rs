use thiserror::Error;

/// Internal solver failures.
///
/// Infeasible and unbounded outcomes are not errors; they are regular
/// [`SolutionStatus`](crate::SolutionStatus) variants the caller branches
/// on. These variants indicate a bug or a runaway solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// A pivot was requested on a zero cell. The selectors only pick
    /// strictly signed cells, so this means selector and eliminator
    /// disagree about the tableau state.
    #[error("Degenerate pivot: zero pivot element at row {row}, column {col}")]
    DegeneratePivot { row: usize, col: usize },
    /// A phase loop exceeded the iteration cap without reaching a
    /// terminal state (the first-negative pivot rule has no anti-cycling
    /// guard).
    #[error("Iteration limit of {0} exceeded without reaching a terminal state")]
    IterationLimit(usize),
}
