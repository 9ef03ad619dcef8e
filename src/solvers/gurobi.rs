//! The proprietary Gurobi optimizer.
//! You need to activate the "gurobi" feature of this crate to use this solver.
use std::cmp::Ordering;
use std::time::Duration;

use grb::prelude::*;
use log::{debug, trace};

use crate::error::Error;
use crate::models::lp::{LinearProgram, Sense};
use crate::solvers::{Solution, Solver, Status};

#[derive(Debug, Clone)]
pub struct GurobiSolver {
    name: String,
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GurobiSolver {
    pub fn new() -> GurobiSolver {
        GurobiSolver {
            name: "Gurobi".to_string(),
        }
    }

    fn build(lp: &LinearProgram) -> grb::Result<(Model, Vec<Var>)> {
        let mut model = Model::new(lp.name())?;
        // Disable output logging.
        model.set_param(param::OutputFlag, 0)?;

        let mut vars = Vec::with_capacity(lp.num_vars());
        for var in lp.variables() {
            vars.push(model.add_var(
                &var.name,
                VarType::Continuous,
                0.0,
                var.lower_bound,
                var.upper_bound,
                std::iter::empty(),
            )?);
        }

        // integrate all the variables into the model
        model.update()?;

        for constraint in lp.constraints() {
            let lhs = constraint
                .terms
                .iter()
                .map(|(var, coeff)| *coeff * vars[var.index()])
                .grb_sum();
            let rhs = constraint.rhs;
            let constr = match constraint.operator {
                Ordering::Less => c!(lhs <= rhs),
                Ordering::Equal => c!(lhs == rhs),
                Ordering::Greater => c!(lhs >= rhs),
            };
            model.add_constr(&constraint.name, constr)?;
        }

        let objective = lp
            .variables()
            .iter()
            .zip(&vars)
            .map(|(var, x)| var.objective * *x)
            .grb_sum();
        let sense = match lp.sense() {
            Sense::Minimize => ModelSense::Minimize,
            Sense::Maximize => ModelSense::Maximize,
        };
        model.set_objective(objective, sense)?;
        model.update()?;

        Ok((model, vars))
    }

    fn status(status: grb::Status) -> Status {
        match status {
            grb::Status::Optimal => Status::Optimal,
            grb::Status::Infeasible => Status::Infeasible,
            grb::Status::InfOrUnbd => Status::InfeasibleOrUnbounded,
            grb::Status::Unbounded => Status::Unbounded,
            grb::Status::Numeric => Status::Numeric,
            grb::Status::SubOptimal => Status::SubOptimal,
            other => Status::Other(format!("{:?}", other)),
        }
    }
}

impl Solver for GurobiSolver {
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, lp: &LinearProgram) -> Result<Solution, Error> {
        let (mut model, vars) = GurobiSolver::build(lp)?;
        trace!(
            "gurobi model {} with {} variables and {} constraints",
            lp.name(),
            lp.num_vars(),
            lp.num_constrs()
        );

        model.optimize()?;

        let status = GurobiSolver::status(model.status()?);
        let runtime = Duration::from_secs_f64(model.get_attr(attr::Runtime)?);
        debug!(
            "gurobi finished {} with status {} in {:?}",
            lp.name(),
            status,
            runtime
        );

        if !status.is_optimal() {
            return Ok(Solution::not_optimal(status, runtime));
        }

        let mut values = Vec::with_capacity(vars.len());
        for var in &vars {
            values.push(model.get_obj_attr(attr::X, var)?);
        }

        Ok(Solution {
            status,
            values,
            objective: model.get_attr(attr::ObjVal)?,
            runtime,
            iterations: Some(model.get_attr(attr::IterCount)? as u64),
            // MIPGap is only defined for MIP models; an optimal LP has no gap
            gap: model.get_attr(attr::MIPGap).unwrap_or(0.0),
        })
    }
}
