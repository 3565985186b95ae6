/// A linear program over non-negative variables x1..xN:
/// maximize the objective subject to the constraints.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Problem {
    /// Number of decision variables
    pub num_vars: usize,
    /// Objective to maximize
    pub objective: Objective,
    /// Constraints, in input order
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Coefficient for each variable, as written (not negated)
    pub coefficients: Vec<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Coefficient for each variable, as written
    pub coefficients: Vec<f64>,
    /// Comparison operator
    pub relation: Relation,
    /// Right-hand side value, as written
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
}

impl Problem {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            objective: Objective {
                coefficients: vec![0.0; num_vars],
            },
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficients: Vec<f64>) {
        self.objective = Objective { coefficients };
    }

    pub fn add_constraint(&mut self, coefficients: Vec<f64>, relation: Relation, rhs: f64) {
        self.constraints.push(Constraint {
            coefficients,
            relation,
            rhs,
        });
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }
}
