//! Linear programming backends.
//!
//! [MinilpSolver] is a pure Rust simplex implementation and always available. The Gurobi
//! backend links against a local Gurobi installation and is only compiled with the `gurobi`
//! cargo feature:
//! ```toml
//! [dependencies.transport]
//! features = ["gurobi"]
//! ```
//! Each call to [Solver::solve] builds a fresh backend model, solves it once and drops it.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;
use crate::models::lp::{LinearProgram, VarId};

pub use self::minilp::MinilpSolver;

#[cfg(feature = "gurobi")]
pub use self::gurobi::GurobiSolver;

#[cfg(feature = "gurobi")]
pub mod gurobi;
pub mod minilp;

/// Termination status of a solve. Codes follow the Gurobi status codes.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Optimal,
    Infeasible,
    InfeasibleOrUnbounded,
    Unbounded,
    /// Terminated due to unrecoverable numerical difficulties
    Numeric,
    SubOptimal,
    /// Any other backend status, as reported by the backend
    Other(String),
}

impl Status {
    pub fn code(&self) -> Option<i32> {
        match self {
            Status::Optimal => Some(2),
            Status::Infeasible => Some(3),
            Status::InfeasibleOrUnbounded => Some(4),
            Status::Unbounded => Some(5),
            Status::Numeric => Some(12),
            Status::SubOptimal => Some(13),
            Status::Other(_) => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Status::Optimal)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Optimal => "OPTIMAL",
            Status::Infeasible => "INFEASIBLE",
            Status::InfeasibleOrUnbounded => "INF_OR_UNBD",
            Status::Unbounded => "UNBOUNDED",
            Status::Numeric => "NUMERIC",
            Status::SubOptimal => "SUBOPTIMAL",
            Status::Other(raw) => return f.write_str(raw),
        };
        match self.code() {
            Some(code) => write!(f, "{} ({})", name, code),
            None => f.write_str(name),
        }
    }
}

/// What a backend returns for a linear program
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: Status,
    /// Variable values indexed by [VarId]. Empty unless the status is optimal.
    pub values: Vec<f64>,
    pub objective: f64,
    pub runtime: Duration,
    /// Simplex iterations, when the backend reports them
    pub iterations: Option<u64>,
    /// Relative optimality gap. Zero for a proven optimal continuous program.
    pub gap: f64,
}

impl Solution {
    /// A solution carrying only a non-optimal status
    pub fn not_optimal(status: Status, runtime: Duration) -> Solution {
        Solution {
            status,
            values: Vec::new(),
            objective: f64::NAN,
            runtime,
            iterations: None,
            gap: f64::INFINITY,
        }
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values[var.index()]
    }
}

/// A linear programming backend
pub trait Solver {
    /// Name shown in reports
    fn name(&self) -> &str;
    /// Solve `lp`. A non-optimal outcome is reported through [Solution::status]; `Err` is
    /// reserved for failures of the backend itself.
    fn solve(&self, lp: &LinearProgram) -> Result<Solution, Error>;
}

/// The available backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Minilp,
    Gurobi,
}

impl Backend {
    /// Instantiate the backend. Fails for Gurobi unless built with the `gurobi` feature.
    pub fn solver(self) -> Result<Box<dyn Solver>, Error> {
        match self {
            Backend::Minilp => Ok(Box::new(MinilpSolver::default())),
            #[cfg(feature = "gurobi")]
            Backend::Gurobi => Ok(Box::new(GurobiSolver::default())),
            #[cfg(not(feature = "gurobi"))]
            Backend::Gurobi => Err(Error::Solver(
                "gurobi support is not compiled in, rebuild with `--features gurobi`".to_string(),
            )),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Minilp
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minilp" => Ok(Backend::Minilp),
            "gurobi" => Ok(Backend::Gurobi),
            other => Err(format!(
                "unknown backend '{}', expected minilp or gurobi",
                other
            )),
        }
    }
}
