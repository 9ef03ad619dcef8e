//! The problem being edited together with its latest solution.

use std::path::Path;

use log::info;

use crate::balance::{balance, Confirm};
use crate::error::Error;
use crate::export::export_csv;
use crate::models::transportation_model::sets_and_parameters::{Parameters, Sets};
use crate::models::TransportationSolver;
use crate::problem::{Problem, DEFAULT_DIMENSION};
use crate::report::FlowReport;
use crate::solvers::Solver;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    problem: Problem,
    report: Option<FlowReport>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session holding the default template problem
    pub fn new() -> Session {
        Session {
            problem: default_problem(),
            report: None,
        }
    }

    /// A session holding `problem`, not yet solved
    pub fn with_problem(problem: Problem) -> Session {
        Session {
            problem,
            report: None,
        }
    }

    /// The default template session, discarding the current problem and solution
    pub fn reset(&self) -> Session {
        Session::new()
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The report of the latest successful solve
    pub fn report(&self) -> Option<&FlowReport> {
        self.report.as_ref()
    }

    /// Balance, build and solve the current problem, returning the solved session.
    /// On any failure, including a declined rebalancing, `self` is all there is.
    pub fn solve<S, C>(&self, solver: &S, confirm: &mut C) -> Result<Session, Error>
    where
        S: Solver + ?Sized,
        C: Confirm + ?Sized,
    {
        let balanced = balance(&self.problem, confirm)?;
        let problem = balanced.problem();
        let result = TransportationSolver::solve(
            &Sets::new(problem),
            &Parameters::new(problem),
            solver,
        )?;
        info!(
            "{} solved the problem with total cost {}",
            result.solver, result.objective
        );
        Ok(Session {
            problem: self.problem.clone(),
            report: Some(FlowReport::new(&balanced, &result)),
        })
    }

    /// Export the latest solution to `path`
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let report = self.report.as_ref().ok_or(Error::NothingToExport)?;
        export_csv(report, path)
    }
}

fn default_problem() -> Problem {
    // the template only fails outside 1..=MAX_DIMENSION
    match Problem::template(DEFAULT_DIMENSION, DEFAULT_DIMENSION) {
        Ok(problem) => problem,
        Err(e) => unreachable!("default template is invalid: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::{Abort, Rebalance};
    use crate::solvers::MinilpSolver;

    #[test]
    fn starts_from_template() {
        let session = Session::new();
        assert_eq!(session.problem().sources(), 3);
        assert_eq!(session.problem().destinations(), 3);
        assert_eq!(session.problem().cost(2, 0), 31.0);
        assert!(session.report().is_none());
    }

    #[test]
    fn solve_returns_solved_session_and_reset_clears_it() {
        let session = Session::new();
        let solved = session.solve(&MinilpSolver::new(), &mut Rebalance).unwrap();
        assert!(session.report().is_none());
        // every feasible flow of the template costs 100 * (11 + 22 + 33)
        let total = solved.report().unwrap().total_cost();
        assert!((total - 6600.0).abs() < 1e-6);
        assert_eq!(solved.problem(), session.problem());

        let fresh = solved.reset();
        assert!(fresh.report().is_none());
        assert_eq!(fresh.problem(), &Problem::template(3, 3).unwrap());
    }

    #[test]
    fn declined_rebalancing_fails_without_new_session() {
        let unbalanced = Problem::new(vec![300.0], vec![250.0], vec![vec![1.0]]).unwrap();
        let session = Session::with_problem(unbalanced);
        let err = session.solve(&MinilpSolver::new(), &mut Abort).unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
        assert!(session.report().is_none());

        let solved = session.solve(&MinilpSolver::new(), &mut Rebalance).unwrap();
        assert_eq!(solved.report().unwrap().destinations().len(), 2);
    }

    #[test]
    fn export_requires_solution() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new();
        let err = session.export(dir.path().join("out.csv")).unwrap_err();
        assert!(matches!(err, Error::NothingToExport));
    }
}
