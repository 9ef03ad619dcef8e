//! A solver-independent linear program
use std::cmp::Ordering;
use std::ops::Range;

/// Optimization sense
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Handle to a variable of a [LinearProgram]; its position in [LinearProgram::variables]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A continuous decision variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Unique within the program
    pub name: String,
    /// Coefficient in the objective function
    pub objective: f64,
    pub lower_bound: f64,
    /// INFINITY if there is no upper bound
    pub upper_bound: f64,
}

/// A linear constraint `sum(coeff * var) <op> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    /// '<=' '=' or '>='
    pub operator: Ordering,
    pub rhs: f64,
}

impl Constraint {
    fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.index()])
            .sum()
    }

    /// Whether `values` satisfy the constraint within `tolerance`
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.operator {
            Ordering::Less => lhs <= self.rhs + tolerance,
            Ordering::Equal => (lhs - self.rhs).abs() <= tolerance,
            Ordering::Greater => lhs >= self.rhs - tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    name: String,
    sense: Sense,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new(name: &str, sense: Sense) -> LinearProgram {
        LinearProgram {
            name: name.to_string(),
            sense,
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Add a continuous variable with the given objective coefficient and bounds
    pub fn add_var(&mut self, name: &str, objective: f64, bounds: &Range<f64>) -> VarId {
        self.variables.push(Variable {
            name: name.to_string(),
            objective,
            lower_bound: bounds.start,
            upper_bound: bounds.end,
        });
        VarId(self.variables.len() - 1)
    }

    pub fn add_constr(
        &mut self,
        name: &str,
        terms: Vec<(VarId, f64)>,
        operator: Ordering,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.to_string(),
            terms,
            operator,
            rhs,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constrs(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of an assignment, indexed like [LinearProgram::variables]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(var, value)| var.objective * value)
            .sum()
    }

    /// Whether `values` respect every bound and constraint within `tolerance`
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len()
            && self.variables.iter().zip(values).all(|(var, value)| {
                *value >= var.lower_bound - tolerance && *value <= var.upper_bound + tolerance
            })
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }
}
