use crate::error::SolverError;
use crate::jordan;
use crate::problem::Problem;
use crate::solution::{FeasiblePoint, Solution};
use crate::tableau::Tableau;

/// Two-phase tableau simplex solver.
///
/// Phase 1 pivots negative right-hand sides away to reach a feasible
/// basic solution; phase 2 pivots negative objective-row cells away to
/// reach an optimal one. Both phases use the first-negative selection
/// rule and the same Jordan exchange.
pub struct Solver {
    /// Safety cap on pivots per phase (there is no anti-cycling guard)
    max_iterations: usize,
    /// Tolerance for sign tests on tableau cells
    tolerance: f64,
}

/// Outcome of a phase-1 pivot search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeasibilityPivot {
    /// No negative right-hand side remains
    Feasible,
    /// Pivot here next
    Pivot { row: usize, col: usize },
    /// A negative right-hand side has no negative cell in its row
    Infeasible,
}

/// Outcome of a phase-2 pivot search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimalityPivot {
    /// No negative objective-row cell remains
    Optimal,
    /// Pivot here next
    Pivot { row: usize, col: usize },
    /// An improving column has no positive cell to ratio-test against
    Unbounded,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Solve a problem end to end.
    pub fn solve(&self, problem: &Problem) -> Result<Solution, SolverError> {
        let mut tableau = Tableau::build(problem);

        // Phase 1: drive every right-hand side non-negative.
        let mut pivots = 0;
        loop {
            match self.feasibility_pivot(&tableau) {
                FeasibilityPivot::Feasible => break,
                FeasibilityPivot::Infeasible => return Ok(Solution::infeasible(tableau)),
                FeasibilityPivot::Pivot { row, col } => {
                    jordan::eliminate(&mut tableau, row, col)?;
                    pivots += 1;
                    if pivots > self.max_iterations {
                        return Err(SolverError::IterationLimit(self.max_iterations));
                    }
                }
            }
        }

        // Phase boundary: the feasible tableau stays inspectable while
        // phase 2 mutates its own copy.
        let feasible = FeasiblePoint {
            values: tableau.basic_solution(),
            tableau: tableau.clone(),
        };

        // Phase 2: drive every objective-row cell non-negative.
        let mut pivots = 0;
        loop {
            match self.optimality_pivot(&tableau) {
                OptimalityPivot::Optimal => break,
                OptimalityPivot::Unbounded => return Ok(Solution::unbounded(feasible, tableau)),
                OptimalityPivot::Pivot { row, col } => {
                    jordan::eliminate(&mut tableau, row, col)?;
                    pivots += 1;
                    if pivots > self.max_iterations {
                        return Err(SolverError::IterationLimit(self.max_iterations));
                    }
                }
            }
        }

        let values = tableau.basic_solution();
        let objective_value = tableau.objective_value();
        Ok(Solution::optimal(values, objective_value, feasible, tableau))
    }

    /// Phase-1 rule: the first constraint row (top to bottom) with a
    /// negative right-hand side is the pivot row; the first negative cell
    /// in that row (left to right) is the pivot column. A negative
    /// right-hand side with no negative cell in its row proves the
    /// constraints inconsistent.
    pub fn feasibility_pivot(&self, tableau: &Tableau) -> FeasibilityPivot {
        for row in 0..tableau.num_constraints() {
            if tableau.rhs(row) < -self.tolerance {
                for col in 0..tableau.num_vars() {
                    if tableau.value(row, col) < -self.tolerance {
                        return FeasibilityPivot::Pivot { row, col };
                    }
                }
                return FeasibilityPivot::Infeasible;
            }
        }
        FeasibilityPivot::Feasible
    }

    /// Phase-2 rule: the first negative objective-row cell (left to
    /// right, rhs excluded) is the pivot column; the pivot row minimizes
    /// rhs / cell over rows with a strictly positive cell in that column,
    /// first occurrence winning ties. No qualifying row means the
    /// objective increases without bound along that column.
    pub fn optimality_pivot(&self, tableau: &Tableau) -> OptimalityPivot {
        let Some(col) = (0..tableau.num_vars())
            .find(|&col| tableau.objective_cell(col) < -self.tolerance)
        else {
            return OptimalityPivot::Optimal;
        };

        let mut min_ratio = f64::INFINITY;
        let mut pivot_row = None;
        for row in 0..tableau.num_constraints() {
            let cell = tableau.value(row, col);
            if cell > self.tolerance {
                let ratio = tableau.rhs(row) / cell;
                if ratio >= 0.0 && ratio < min_ratio {
                    min_ratio = ratio;
                    pivot_row = Some(row);
                }
            }
        }

        match pivot_row {
            Some(row) => OptimalityPivot::Pivot { row, col },
            None => OptimalityPivot::Unbounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Problem, Relation};
    use crate::solution::SolutionStatus;
    use crate::tableau::Label;

    #[test]
    fn optimal_two_variable_problem() {
        // maximize 2x1 + 3x2
        //   x1 +  x2 <= 4
        //   x1 + 2x2 <= 5
        // optimum X(3; 1), Z = 9
        let mut problem = Problem::new(2);
        problem.set_objective(vec![2.0, 3.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 2.0], Relation::Le, 5.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.values[0] - 3.0).abs() < 1e-6, "x1 = {}", solution.values[0]);
        assert!((solution.values[1] - 1.0).abs() < 1e-6, "x2 = {}", solution.values[1]);
        assert!((solution.objective_value - 9.0).abs() < 1e-6);
    }

    #[test]
    fn origin_is_feasible_for_le_problems() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![2.0, 3.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 2.0], Relation::Le, 5.0);

        let solution = Solver::new().solve(&problem).unwrap();

        // no phase-1 pivots needed, the snapshot is the initial tableau
        let feasible = solution.feasible.unwrap();
        assert_eq!(feasible.values, vec![0.0, 0.0]);
        assert_eq!(
            feasible.tableau.row_labels(),
            &[Label::Slack(1), Label::Slack(2)]
        );
    }

    #[test]
    fn ge_constraint_forces_phase_one_pivots() {
        // maximize x1 + x2, x1 + x2 <= 4, x1 >= 1
        let mut problem = Problem::new(2);
        problem.set_objective(vec![1.0, 1.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 0.0], Relation::Ge, 1.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Optimal);
        let feasible = solution.feasible.unwrap();
        // x1 entered the basis during phase 1
        assert_eq!(feasible.values[0], 1.0);
        assert!((solution.objective_value - 4.0).abs() < 1e-6);
    }

    #[test]
    fn phase_one_terminates_within_constraint_count() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![1.0, 1.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Ge, 1.0);
        problem.add_constraint(vec![0.0, 1.0], Relation::Ge, 1.0);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        let mut tableau = Tableau::build(&problem);

        let solver = Solver::new();
        let mut pivots = 0;
        loop {
            match solver.feasibility_pivot(&tableau) {
                FeasibilityPivot::Feasible => break,
                FeasibilityPivot::Infeasible => panic!("a feasible region exists"),
                FeasibilityPivot::Pivot { row, col } => {
                    crate::jordan::eliminate(&mut tableau, row, col).unwrap();
                    pivots += 1;
                    assert!(pivots <= 3, "phase 1 exceeded the constraint count");
                }
            }
        }

        for row in 0..tableau.num_constraints() {
            assert!(tableau.rhs(row) >= 0.0);
        }
    }

    #[test]
    fn infeasible_problem_is_reported() {
        // x1 <= -1 with x1 >= 0 is impossible
        let mut problem = Problem::new(1);
        problem.set_objective(vec![1.0]);
        problem.add_constraint(vec![1.0], Relation::Le, -1.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.values.is_empty());
        assert!(solution.feasible.is_none());
        // the terminal tableau is still exposed for display
        assert_eq!(solution.tableau.rhs(0), -1.0);
    }

    #[test]
    fn conflicting_bounds_are_infeasible() {
        // x1 >= 5 and x1 <= 3
        let mut problem = Problem::new(1);
        problem.set_objective(vec![1.0]);
        problem.add_constraint(vec![1.0], Relation::Ge, 5.0);
        problem.add_constraint(vec![1.0], Relation::Le, 3.0);

        let solution = Solver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
    }

    #[test]
    fn unbounded_objective_is_reported() {
        // maximize x1 with only x1 >= 0: no upper bound
        let mut problem = Problem::new(1);
        problem.set_objective(vec![1.0]);
        problem.add_constraint(vec![1.0], Relation::Ge, 0.0);

        let solution = Solver::new().solve(&problem).unwrap();

        assert_eq!(solution.status, SolutionStatus::Unbounded);
        assert!(solution.feasible.is_some());
        assert_eq!(solution.objective_value, f64::INFINITY);
    }

    #[test]
    fn feasibility_pivot_picks_first_negative_row_then_column() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![1.0, 1.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 1.0], Relation::Ge, 2.0);
        problem.add_constraint(vec![0.0, 1.0], Relation::Ge, 1.0);
        let tableau = Tableau::build(&problem);

        // rows 1 and 2 both have negative rhs; row 1 wins, and its first
        // negative cell is column 0
        assert_eq!(
            Solver::new().feasibility_pivot(&tableau),
            FeasibilityPivot::Pivot { row: 1, col: 0 }
        );
    }

    #[test]
    fn optimality_pivot_picks_first_negative_column() {
        let mut problem = Problem::new(2);
        // -1 appears in column 0 before the steeper -5 in column 1;
        // the first-negative rule must take column 0
        problem.set_objective(vec![1.0, 5.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        let tableau = Tableau::build(&problem);

        assert_eq!(
            Solver::new().optimality_pivot(&tableau),
            OptimalityPivot::Pivot { row: 0, col: 0 }
        );
    }

    #[test]
    fn ratio_test_breaks_ties_by_first_row() {
        let mut problem = Problem::new(1);
        problem.set_objective(vec![1.0]);
        problem.add_constraint(vec![2.0], Relation::Le, 6.0);
        problem.add_constraint(vec![1.0], Relation::Le, 3.0);
        let tableau = Tableau::build(&problem);

        // both rows give ratio 3; the lower index wins
        assert_eq!(
            Solver::new().optimality_pivot(&tableau),
            OptimalityPivot::Pivot { row: 0, col: 0 }
        );
    }

    #[test]
    fn ratio_test_skips_non_positive_cells() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![1.0, 0.0]);
        problem.add_constraint(vec![-1.0, 1.0], Relation::Le, 2.0);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 5.0);
        let tableau = Tableau::build(&problem);

        // row 0 has a negative cell in the pivot column and is excluded
        assert_eq!(
            Solver::new().optimality_pivot(&tableau),
            OptimalityPivot::Pivot { row: 1, col: 0 }
        );
    }

    #[test]
    fn optimality_check_is_idempotent() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![2.0, 3.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 2.0], Relation::Le, 5.0);

        let solver = Solver::new();
        let solution = solver.solve(&problem).unwrap();

        // the terminal tableau admits no further pivot
        assert_eq!(
            solver.optimality_pivot(&solution.tableau),
            OptimalityPivot::Optimal
        );
        // and re-solving reproduces the same result
        let again = solver.solve(&problem).unwrap();
        assert_eq!(again.values, solution.values);
        assert_eq!(again.objective_value, solution.objective_value);
    }

    #[test]
    fn iteration_limit_surfaces_as_error() {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![2.0, 3.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 2.0], Relation::Le, 5.0);

        // the optimum needs two pivots; cap at one
        let err = Solver::new().with_max_iterations(1).solve(&problem).unwrap_err();
        assert_eq!(err, SolverError::IterationLimit(1));
    }
}
