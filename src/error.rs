use derive_more::Display;

use crate::balance::Imbalance;
use crate::parse::ParseError;
use crate::problem::ProblemConstructionError;
use crate::solvers::Status;

/// Everything that can stop a solve or an export
#[derive(Debug, Display)]
pub enum Error {
    /// Malformed user input; no model was built
    #[display(fmt = "{}", _0)]
    Parse(ParseError),
    /// The tables do not describe a valid problem
    #[display(fmt = "invalid problem: {}", _0)]
    Problem(ProblemConstructionError),
    /// The user declined to rebalance
    #[display(fmt = "solve aborted: {}", _0)]
    Aborted(Imbalance),
    /// The solver finished without an optimal solution
    #[display(fmt = "no optimal solution found, status: {}", _0)]
    NotOptimal(Status),
    /// The solver backend failed or is not available
    #[display(fmt = "solver error: {}", _0)]
    Solver(String),
    /// Writing the solution export failed
    #[display(fmt = "export failed: {}", _0)]
    Export(std::io::Error),
    /// Reading or writing anything other than the export failed
    #[display(fmt = "I/O error: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "nothing to export, the problem has not been solved")]
    NothingToExport,
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<ProblemConstructionError> for Error {
    fn from(e: ProblemConstructionError) -> Self {
        Error::Problem(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(feature = "gurobi")]
impl From<grb::Error> for Error {
    fn from(e: grb::Error) -> Self {
        Error::Solver(format!("gurobi: {}", e))
    }
}
