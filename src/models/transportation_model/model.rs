use std::cmp::Ordering;
use std::time::Duration;

use log::{info, warn};
use ndarray::Array2;

use super::sets_and_parameters::{Parameters, Sets};
use crate::error::Error;
use crate::models::lp::{LinearProgram, Sense, VarId};
use crate::models::utils::{AddVars, ConvertVars};
use crate::solvers::{Solver, Status};
use crate::utils::EPSILON;

pub struct TransportationSolver {}

#[allow(non_snake_case)]
impl TransportationSolver {
    /// builds the transportation model
    pub fn build(sets: &Sets, parameters: &Parameters) -> (LinearProgram, Variables) {
        let I = sets.I.len();
        let J = sets.J.len();
        info!("Building transportation model with {} sources and {} destinations", I, J);

        let mut model = LinearProgram::new("transport", Sense::Minimize);

        //*************CREATE VARIABLES*************//

        // quantity transported from source i to destination j, at unit cost C_ij
        let x: Vec<Vec<VarId>> = (I, J).vars_with(|(i, j)| {
            model.add_var(
                &format!("x_{}_{}", i + 1, j + 1),
                parameters.C[[i, j]],
                &(0.0..f64::INFINITY),
            )
        });

        // ******************** ADD CONSTRAINTS ********************

        // a source cannot ship more than its capacity
        for i in &sets.I {
            let lhs = sets.J.iter().map(|j| (x[*i][*j], 1.0)).collect();
            model.add_constr(&format!("supply_{i}"), lhs, Ordering::Less, parameters.S[*i]);
        }

        // every destination must receive at least its demand
        for j in &sets.J {
            let lhs = sets.I.iter().map(|i| (x[*i][*j], 1.0)).collect();
            model.add_constr(&format!("demand_{j}"), lhs, Ordering::Greater, parameters.D[*j]);
        }

        info!(
            "Successfully built transportation model with {} variables and {} constraints",
            model.num_vars(),
            model.num_constrs()
        );
        (model, Variables::new(x))
    }

    pub fn solve<S: Solver + ?Sized>(
        sets: &Sets,
        parameters: &Parameters,
        solver: &S,
    ) -> Result<TransportationResult, Error> {
        // build model
        let (model, vars) = TransportationSolver::build(sets, parameters);

        // optimize model
        let solution = solver.solve(&model)?;
        if !solution.status.is_optimal() {
            warn!("{} found no optimal solution: {}", solver.name(), solution.status);
            return Err(Error::NotOptimal(solution.status));
        }

        if !model.is_feasible(&solution.values, EPSILON * (1.0 + solution.objective.abs())) {
            warn!("{} returned an assignment that violates the model", solver.name());
        }

        let x = vars.x.convert(&solution.values);
        let (I, J) = (sets.I.len(), sets.J.len());
        // simplex round-off can leave tiny negative flows
        let x = Array2::from_shape_fn((I, J), |(i, j)| x[i][j].max(0.0));

        Ok(TransportationResult {
            x,
            objective: solution.objective,
            variables: model.num_vars(),
            constraints: model.num_constrs(),
            solver: solver.name().to_string(),
            status: solution.status,
            runtime: solution.runtime,
            iterations: solution.iterations,
            gap: solution.gap,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TransportationResult {
    /// quantities transported from source i to destination j
    pub x: Array2<f64>,
    /// total transport cost as reported by the solver
    pub objective: f64,
    pub variables: usize,
    pub constraints: usize,
    pub solver: String,
    pub status: Status,
    pub runtime: Duration,
    pub iterations: Option<u64>,
    pub gap: f64,
}

pub struct Variables {
    x: Vec<Vec<VarId>>,
}

impl Variables {
    pub fn new(x: Vec<Vec<VarId>>) -> Variables {
        Variables { x }
    }

    pub fn x(&self) -> &[Vec<VarId>] {
        &self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Problem;
    use itertools::iproduct;
    use crate::solvers::MinilpSolver;

    fn build(problem: &Problem) -> (LinearProgram, Variables) {
        TransportationSolver::build(&Sets::new(problem), &Parameters::new(problem))
    }

    #[test]
    fn balanced_model_has_one_constraint_per_node() {
        for (m, n) in iproduct!(1..=4, 1..=4) {
            let problem = Problem::template(m, n).unwrap();
            let (lp, vars) = build(&problem);
            assert_eq!(lp.num_vars(), m * n);
            assert_eq!(lp.num_constrs(), m + n);
            assert_eq!(vars.x().len(), m);
        }
    }

    #[test]
    fn formulation_matches_tables() {
        let problem = Problem::new(
            vec![20.0, 30.0],
            vec![10.0, 25.0, 15.0],
            vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0]],
        )
        .unwrap();
        let (lp, vars) = build(&problem);

        assert_eq!(lp.sense(), Sense::Minimize);
        let x_1_2 = &lp.variables()[vars.x()[0][1].index()];
        assert_eq!(x_1_2.name, "x_1_2");
        assert_eq!(x_1_2.objective, 6.0);
        assert_eq!(x_1_2.lower_bound, 0.0);

        let supply_1 = &lp.constraints()[1];
        assert_eq!(supply_1.name, "supply_1");
        assert_eq!(supply_1.operator, Ordering::Less);
        assert_eq!(supply_1.rhs, 30.0);
        assert_eq!(supply_1.terms.len(), 3);

        let demand_2 = &lp.constraints()[2 + 2];
        assert_eq!(demand_2.name, "demand_2");
        assert_eq!(demand_2.operator, Ordering::Greater);
        assert_eq!(demand_2.rhs, 15.0);
        assert_eq!(
            demand_2.terms,
            vec![(vars.x()[0][2], 1.0), (vars.x()[1][2], 1.0)]
        );
    }

    #[test]
    fn solves_textbook_instance() {
        let problem = Problem::new(
            vec![20.0, 30.0],
            vec![10.0, 25.0, 15.0],
            vec![vec![8.0, 6.0, 10.0], vec![9.0, 12.0, 13.0]],
        )
        .unwrap();
        let result = TransportationSolver::solve(
            &Sets::new(&problem),
            &Parameters::new(&problem),
            &MinilpSolver::new(),
        )
        .unwrap();

        // source 1 covers E2 at 6 per unit, source 2 covers E1 and E3 and the rest of E2
        assert!((result.objective - 465.0).abs() < 1e-6);
        assert!((result.x[[0, 1]] - 20.0).abs() < 1e-6);
        assert!((result.x[[1, 0]] - 10.0).abs() < 1e-6);
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.variables, 6);
        assert_eq!(result.constraints, 5);
    }

    #[test]
    fn unbalanced_model_without_dummy_is_infeasible() {
        let problem = Problem::new(vec![10.0], vec![20.0], vec![vec![1.0]]).unwrap();
        let err = TransportationSolver::solve(
            &Sets::new(&problem),
            &Parameters::new(&problem),
            &MinilpSolver::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotOptimal(Status::Infeasible)));
    }
}
