use crate::tableau::Tableau;

/// The result of solving a linear program.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Solution {
    /// Terminal status of the solve
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective_value: f64,
    /// The first feasible point found, with the tableau as it stood at
    /// the phase boundary (None when phase 1 failed)
    pub feasible: Option<FeasiblePoint>,
    /// The tableau at termination, for diagnostic display
    pub tableau: Tableau,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The constraints admit no solution
    Infeasible,
    /// The objective is unbounded above
    Unbounded,
}

/// Snapshot taken when phase 1 reaches feasibility, before phase 2
/// mutates its own copy of the tableau.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct FeasiblePoint {
    /// Variable values at the feasible basic solution
    pub values: Vec<f64>,
    /// The tableau at the phase boundary
    pub tableau: Tableau,
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64, feasible: FeasiblePoint, tableau: Tableau) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
            feasible: Some(feasible),
            tableau,
        }
    }

    pub fn infeasible(tableau: Tableau) -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            values: Vec::new(),
            objective_value: f64::NEG_INFINITY,
            feasible: None,
            tableau,
        }
    }

    pub fn unbounded(feasible: FeasiblePoint, tableau: Tableau) -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: f64::INFINITY,
            feasible: Some(feasible),
            tableau,
        }
    }
}
