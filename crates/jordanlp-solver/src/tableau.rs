use std::fmt;

use crate::problem::{Problem, Relation};

/// Magnitudes below this are snapped to exactly 0.0 so pivot selection
/// never sees signed-zero or rounding dust.
pub const EPSILON: f64 = 1e-10;

/// Identity of a variable tracked by the basis bookkeeping.
///
/// Indices are 1-based to match the input language (`x1`, `y1`).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Decision variable `x_i`
    Decision(usize),
    /// Slack variable `y_k`, introduced for constraint k
    Slack(usize),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Decision(i) => write!(f, "x{}", i),
            Label::Slack(k) => write!(f, "y{}", k),
        }
    }
}

/// The canonical simplex tableau: a numeric matrix plus row/column basis
/// labels kept in lock-step with it.
///
/// Shape is (R+1) x (N+1) for R constraints and N variables. The last row
/// is the objective row and never leaves the bottom; the last column is
/// the right-hand side. `row_labels[i]` names the variable basic in
/// constraint row i; `col_labels[j]` names the non-basic variable
/// associated with column j (rendered with a leading minus by callers,
/// reflecting the `x_B = rhs - sum(cell * x_N)` reading of each row).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    pub(crate) cells: Vec<Vec<f64>>,
    pub(crate) row_labels: Vec<Label>,
    pub(crate) col_labels: Vec<Label>,
}

impl Tableau {
    /// Build the initial tableau for a problem.
    ///
    /// This is the only place sign normalization happens: the objective
    /// row stores negated coefficients (maximize as minimize-equivalent,
    /// so "first negative in the objective row" is the uniform optimality
    /// test), and `>=` rows are negated element-wise including the rhs,
    /// converting them to `<=` form.
    pub fn build(problem: &Problem) -> Self {
        let n = problem.num_vars;
        let r = problem.constraints.len();

        let mut cells = Vec::with_capacity(r + 1);
        for constraint in &problem.constraints {
            let mut row = Vec::with_capacity(n + 1);
            row.extend(constraint.coefficients.iter().take(n).copied());
            row.resize(n, 0.0);
            row.push(constraint.rhs);
            if constraint.relation == Relation::Ge {
                for v in &mut row {
                    *v = -*v;
                }
            }
            cells.push(row);
        }

        let mut objective_row = Vec::with_capacity(n + 1);
        objective_row.extend(problem.objective.coefficients.iter().take(n).map(|c| -c));
        objective_row.resize(n, 0.0);
        objective_row.push(0.0);
        cells.push(objective_row);

        let mut tableau = Self {
            cells,
            row_labels: (1..=r).map(Label::Slack).collect(),
            col_labels: (1..=n).map(Label::Decision).collect(),
        };
        tableau.snap_zeros();
        tableau
    }

    /// Number of constraint rows (the objective row is not counted).
    pub fn num_constraints(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of coefficient columns (the rhs column is not counted).
    pub fn num_vars(&self) -> usize {
        self.col_labels.len()
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    /// Right-hand-side cell of a row.
    pub fn rhs(&self, row: usize) -> f64 {
        self.cells[row][self.col_labels.len()]
    }

    /// Objective-row cell for a coefficient column.
    pub fn objective_cell(&self, col: usize) -> f64 {
        self.cells[self.row_labels.len()][col]
    }

    /// Current objective value (the objective row's rhs cell).
    pub fn objective_value(&self) -> f64 {
        self.rhs(self.row_labels.len())
    }

    pub fn row_labels(&self) -> &[Label] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[Label] {
        &self.col_labels
    }

    /// The basic solution the tableau currently encodes: each decision
    /// variable that labels a row takes that row's rhs value, every other
    /// decision variable is non-basic and 0.
    pub fn basic_solution(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.num_vars()];
        for (row, label) in self.row_labels.iter().enumerate() {
            if let Label::Decision(i) = label {
                values[i - 1] = self.rhs(row);
            }
        }
        values
    }

    /// Snap near-zero cells to exactly 0.0 (see [`EPSILON`]).
    pub(crate) fn snap_zeros(&mut self) {
        for row in &mut self.cells {
            for v in row.iter_mut() {
                if v.abs() < EPSILON {
                    *v = 0.0;
                }
            }
        }
    }
}
