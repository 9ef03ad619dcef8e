//! Restoring the balance between total supply and total demand.
//!
//! A transportation problem only has a feasible solution when everything that is supplied is
//! also demanded. When the totals differ by more than [BALANCE_EPSILON] the caller is asked,
//! through [Confirm], whether a fictitious node should absorb the difference. Smaller
//! differences count as balanced and leave the problem untouched.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, info, warn};

use crate::error::Error;
use crate::problem::{Problem, Quantity};

/// Differences between total supply and total demand up to this count as balanced
pub const BALANCE_EPSILON: f64 = 1e-3;

/// A fictitious zero-cost node added to restore balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dummy {
    /// Added when demand exceeds supply. Holds its capacity.
    Source(Quantity),
    /// Added when supply exceeds demand. Holds its demand.
    Destination(Quantity),
}

impl Dummy {
    pub fn quantity(&self) -> Quantity {
        match self {
            Dummy::Source(q) | Dummy::Destination(q) => *q,
        }
    }
}

impl fmt::Display for Dummy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dummy::Source(q) => write!(f, "dummy source with capacity {}", q),
            Dummy::Destination(q) => write!(f, "dummy destination with demand {}", q),
        }
    }
}

/// Totals of an unbalanced problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imbalance {
    pub total_supply: Quantity,
    pub total_demand: Quantity,
}

impl Imbalance {
    pub fn of(problem: &Problem) -> Imbalance {
        Imbalance {
            total_supply: problem.total_supply(),
            total_demand: problem.total_demand(),
        }
    }

    /// The node that absorbs the difference
    pub fn dummy(&self) -> Dummy {
        let surplus = self.total_supply - self.total_demand;
        if surplus > 0.0 {
            Dummy::Destination(surplus)
        } else {
            Dummy::Source(-surplus)
        }
    }

    /// Whether the difference is large enough to ask before rebalancing
    pub fn is_significant(&self) -> bool {
        (self.total_supply - self.total_demand).abs() > BALANCE_EPSILON
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total supply ({}) != total demand ({})",
            self.total_supply, self.total_demand
        )
    }
}

/// Decides whether an unbalanced problem should be rebalanced or the solve aborted
pub trait Confirm {
    /// Returns `true` to proceed with a dummy node, `false` to abort
    fn confirm(&mut self, imbalance: &Imbalance) -> bool;
}

/// Always rebalance
#[derive(Debug, Clone, Copy, Default)]
pub struct Rebalance;

/// Never rebalance; every significant imbalance aborts the solve
#[derive(Debug, Clone, Copy, Default)]
pub struct Abort;

impl Confirm for Rebalance {
    fn confirm(&mut self, _imbalance: &Imbalance) -> bool {
        true
    }
}

impl Confirm for Abort {
    fn confirm(&mut self, _imbalance: &Imbalance) -> bool {
        false
    }
}

/// Asks a yes/no question on `output` and reads the answer from `input`.
/// Anything but `y` or `yes` declines, as does a failure to read.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm(&mut self, imbalance: &Imbalance) -> bool {
        let asked = write!(
            self.output,
            "Unbalanced problem: {}.\nContinue with a {}? [y/N] ",
            imbalance,
            imbalance.dummy()
        )
        .and_then(|_| self.output.flush());
        if let Err(e) = asked {
            warn!("could not ask for confirmation: {}", e);
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("could not read confirmation: {}", e);
                false
            }
        }
    }
}

/// How the command line handles an unbalanced problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalancePolicy {
    /// Prompt on the terminal
    Ask,
    Rebalance,
    Abort,
}

impl FromStr for BalancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ask" => Ok(BalancePolicy::Ask),
            "rebalance" => Ok(BalancePolicy::Rebalance),
            "abort" => Ok(BalancePolicy::Abort),
            other => Err(format!(
                "unknown balance policy '{}', expected ask, rebalance or abort",
                other
            )),
        }
    }
}

/// A problem whose total supply equals its total demand, possibly through a dummy node
#[derive(Debug, Clone, PartialEq)]
pub struct Balanced {
    problem: Problem,
    dummy: Option<Dummy>,
}

impl Balanced {
    /// The balanced problem. Includes the dummy node as its last source or destination.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn dummy(&self) -> Option<Dummy> {
        self.dummy
    }
}

/// Balance `problem`, asking `confirm` when the difference is significant.
/// Declining returns [Error::Aborted] and leaves nothing behind.
pub fn balance<C: Confirm + ?Sized>(problem: &Problem, confirm: &mut C) -> Result<Balanced, Error> {
    if problem.is_balanced() {
        if problem.surplus() != 0.0 {
            debug!("surplus of {} is within tolerance", problem.surplus());
        }
        return Ok(Balanced {
            problem: problem.clone(),
            dummy: None,
        });
    }

    let imbalance = Imbalance::of(problem);
    if !confirm.confirm(&imbalance) {
        info!("{}: solve aborted", imbalance);
        return Err(Error::Aborted(imbalance));
    }

    let dummy = imbalance.dummy();
    info!("{}: adding a {}", imbalance, dummy);
    let problem = match dummy {
        Dummy::Source(capacity) => problem.with_dummy_source(capacity),
        Dummy::Destination(demand) => problem.with_dummy_destination(demand),
    };

    Ok(Balanced {
        problem,
        dummy: Some(dummy),
    })
}
