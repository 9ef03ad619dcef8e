//! The pure Rust `minilp` simplex solver
use std::cmp::Ordering;
use std::time::Instant;

use ::minilp::{ComparisonOp, LinearExpr, OptimizationDirection};
use log::{debug, trace};

use crate::error::Error;
use crate::models::lp::{LinearProgram, Sense};
use crate::solvers::{Solution, Solver, Status};

#[derive(Debug, Clone)]
pub struct MinilpSolver {
    name: String,
}

impl Default for MinilpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MinilpSolver {
    pub fn new() -> MinilpSolver {
        MinilpSolver {
            name: "minilp".to_string(),
        }
    }

    fn build(lp: &LinearProgram) -> (::minilp::Problem, Vec<::minilp::Variable>) {
        let direction = match lp.sense() {
            Sense::Minimize => OptimizationDirection::Minimize,
            Sense::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = ::minilp::Problem::new(direction);

        let vars: Vec<_> = lp
            .variables()
            .iter()
            .map(|var| problem.add_var(var.objective, (var.lower_bound, var.upper_bound)))
            .collect();

        for constraint in lp.constraints() {
            let mut expr = LinearExpr::empty();
            for (var, coeff) in &constraint.terms {
                expr.add(vars[var.index()], *coeff);
            }
            let op = match constraint.operator {
                Ordering::Less => ComparisonOp::Le,
                Ordering::Equal => ComparisonOp::Eq,
                Ordering::Greater => ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, constraint.rhs);
        }

        (problem, vars)
    }
}

impl Solver for MinilpSolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, lp: &LinearProgram) -> Result<Solution, Error> {
        let (problem, vars) = MinilpSolver::build(lp);
        trace!(
            "minilp model {} with {} variables and {} constraints",
            lp.name(),
            lp.num_vars(),
            lp.num_constrs()
        );

        let start = Instant::now();
        let result = problem.solve();
        let runtime = start.elapsed();

        let solution = match result {
            Ok(solution) => Solution {
                status: Status::Optimal,
                values: vars.iter().map(|var| solution[*var]).collect(),
                objective: solution.objective(),
                runtime,
                // minilp does not expose its pivot count
                iterations: None,
                gap: 0.0,
            },
            Err(::minilp::Error::Infeasible) => Solution::not_optimal(Status::Infeasible, runtime),
            Err(::minilp::Error::Unbounded) => Solution::not_optimal(Status::Unbounded, runtime),
        };

        debug!(
            "minilp finished {} with status {} in {:?}",
            lp.name(),
            solution.status,
            runtime
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_program() {
        let mut lp = LinearProgram::new("small", Sense::Minimize);
        let x = lp.add_var("x", 2.0, &(0.0..f64::INFINITY));
        let y = lp.add_var("y", 1.0, &(0.0..f64::INFINITY));
        lp.add_constr("c0", vec![(x, 1.0), (y, 1.0)], Ordering::Greater, 5.0);
        lp.add_constr("c1", vec![(y, 1.0)], Ordering::Less, 3.0);

        let solution = MinilpSolver::new().solve(&lp).unwrap();
        assert_eq!(solution.status, Status::Optimal);
        assert!((solution.value(x) - 2.0).abs() < 1e-9);
        assert!((solution.value(y) - 3.0).abs() < 1e-9);
        assert!((solution.objective - 7.0).abs() < 1e-9);
        assert_eq!(solution.gap, 0.0);
    }

    #[test]
    fn reports_infeasibility() {
        let mut lp = LinearProgram::new("impossible", Sense::Maximize);
        let x = lp.add_var("x", 1.0, &(0.0..100.0));
        lp.add_constr("c0", vec![(x, 1.0)], Ordering::Less, -5.0);

        let solution = MinilpSolver::new().solve(&lp).unwrap();
        assert_eq!(solution.status, Status::Infeasible);
        assert!(solution.values.is_empty());
    }

    #[test]
    fn reports_unboundedness() {
        let mut lp = LinearProgram::new("unbounded", Sense::Maximize);
        let x = lp.add_var("x", 1.0, &(0.0..f64::INFINITY));
        lp.add_constr("c0", vec![(x, 1.0)], Ordering::Greater, 1.0);

        let solution = MinilpSolver::new().solve(&lp).unwrap();
        assert_eq!(solution.status, Status::Unbounded);
    }
}
