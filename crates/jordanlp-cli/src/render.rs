//! Text rendering for tableaus and solutions.
//!
//! All formatting lives on this side of the solver boundary; the solver
//! crate only exposes numbers and labels.

use jordanlp_solver::Tableau;

const CELL_WIDTH: usize = 10;

/// Render a tableau with its label decorations: column headers carry the
/// leading minus of the non-basic convention (`-x1`), row labels the
/// trailing equals of the basic one (`y1=`), and the objective row is
/// `Z=`.
pub fn tableau(tableau: &Tableau) -> String {
    let mut out = String::new();

    let mut header = format!("{:>width$}", "", width = CELL_WIDTH);
    for label in tableau.col_labels() {
        header.push_str(&format!("{:>width$}", format!("-{label}"), width = CELL_WIDTH));
    }
    header.push_str(&format!("{:>width$}", "1", width = CELL_WIDTH));
    out.push_str(&header);
    out.push('\n');

    let cols = tableau.num_vars() + 1;
    for row in 0..=tableau.num_constraints() {
        let name = match tableau.row_labels().get(row) {
            Some(label) => format!("{label}="),
            None => "Z=".to_string(),
        };
        out.push_str(&format!("{:>width$}", name, width = CELL_WIDTH));
        for col in 0..cols {
            out.push_str(&format!(
                "{:>width$}",
                format!("{:.2}", tableau.value(row, col)),
                width = CELL_WIDTH
            ));
        }
        out.push('\n');
    }

    out
}

/// Echo the constraint system in canonical `<=` form, read off the
/// initial tableau rows.
pub fn canonical_system(tableau: &Tableau) -> String {
    let n = tableau.num_vars();
    let mut out = format!("x[j] >= 0, j = 1..{n}\n");

    for row in 0..tableau.num_constraints() {
        let mut line = String::new();
        for col in 0..n {
            let value = tableau.value(row, col);
            if col == 0 {
                line.push_str(&format!("{value:.2}*x{}", col + 1));
            } else {
                let sign = if value >= 0.0 { "+" } else { "-" };
                line.push_str(&format!(" {sign} {:.2}*x{}", value.abs(), col + 1));
            }
        }
        line.push_str(&format!(" <= {:.2}", tableau.rhs(row)));
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Solution vector in the `X(a; b; c)` form.
pub fn solution_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
    format!("X({})", parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jordanlp_solver::{Problem, Relation, Tableau};

    fn sample_tableau() -> Tableau {
        let mut problem = Problem::new(2);
        problem.set_objective(vec![2.0, 3.0]);
        problem.add_constraint(vec![1.0, 1.0], Relation::Le, 4.0);
        problem.add_constraint(vec![1.0, 2.0], Relation::Ge, 5.0);
        Tableau::build(&problem)
    }

    #[test]
    fn tableau_renders_decorated_labels() {
        let text = tableau(&sample_tableau());
        assert!(text.contains("-x1"));
        assert!(text.contains("-x2"));
        assert!(text.contains("y1="));
        assert!(text.contains("Z="));
    }

    #[test]
    fn canonical_system_uses_normalized_rows() {
        let text = canonical_system(&sample_tableau());
        assert!(text.contains("1.00*x1 + 1.00*x2 <= 4.00"));
        // the >= row appears negated
        assert!(text.contains("-1.00*x1 - 2.00*x2 <= -5.00"));
    }

    #[test]
    fn solution_vector_format() {
        assert_eq!(solution_vector(&[3.0, 1.0]), "X(3; 1)");
    }
}
