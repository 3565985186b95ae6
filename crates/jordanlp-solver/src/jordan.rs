//! One step of the modified Jordan exchange.
//!
//! With pivot element p at (r, c), the exchange swaps the basic variable
//! of row r with the non-basic variable of column c:
//!
//! - pivot cell        -> 1/p
//! - rest of pivot row -> old / p
//! - rest of pivot col -> -old / p
//! - everything else   -> old(i,j) - old(i,c) * old(r,j) / p
//!
//! The row and column labels are swapped in the same step; the labels are
//! the authoritative record of which variable is basic where.

use crate::error::SolverError;
use crate::tableau::Tableau;

/// Perform one in-place Jordan exchange at (`pivot_row`, `pivot_col`).
///
/// `pivot_row` must be a constraint row and `pivot_col` a coefficient
/// column; the objective row and the rhs column are never pivoted.
pub fn eliminate(
    tableau: &mut Tableau,
    pivot_row: usize,
    pivot_col: usize,
) -> Result<(), SolverError> {
    assert!(pivot_row < tableau.num_constraints());
    assert!(pivot_col < tableau.num_vars());

    let rows = tableau.num_constraints() + 1;
    let cols = tableau.num_vars() + 1;

    let pivot = tableau.cells[pivot_row][pivot_col];
    if pivot == 0.0 {
        return Err(SolverError::DegeneratePivot {
            row: pivot_row,
            col: pivot_col,
        });
    }

    // Snapshot the pivot row and column: the rectangle rule reads old
    // values while rows are being overwritten.
    let old_row = tableau.cells[pivot_row].clone();
    let old_col: Vec<f64> = (0..rows).map(|i| tableau.cells[i][pivot_col]).collect();

    for i in 0..rows {
        if i == pivot_row {
            continue;
        }
        for j in 0..cols {
            if j == pivot_col {
                continue;
            }
            tableau.cells[i][j] -= old_col[i] * old_row[j] / pivot;
        }
    }

    for j in 0..cols {
        tableau.cells[pivot_row][j] = old_row[j] / pivot;
    }
    for i in 0..rows {
        if i != pivot_row {
            tableau.cells[i][pivot_col] = -old_col[i] / pivot;
        }
    }
    tableau.cells[pivot_row][pivot_col] = 1.0 / pivot;

    std::mem::swap(
        &mut tableau.row_labels[pivot_row],
        &mut tableau.col_labels[pivot_col],
    );

    tableau.snap_zeros();
    Ok(())
}
