mod error;
mod jordan;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::SolverError;
pub use jordan::eliminate;
pub use problem::{Constraint, Objective, Problem, Relation};
pub use simplex::{FeasibilityPivot, OptimalityPivot, Solver};
pub use solution::{FeasiblePoint, Solution, SolutionStatus};
pub use tableau::{EPSILON, Label, Tableau};
