use derive_more::Display;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::balance::BALANCE_EPSILON;

/// The type used for supplied and demanded quantities
pub type Quantity = f64;
/// The type used for unit transport cost
pub type Cost = f64;

pub type SourceIndex = usize;
pub type DestinationIndex = usize;

/// Largest number of sources or destinations accepted from the user
pub const MAX_DIMENSION: usize = 10;
/// Number of sources and destinations of a fresh session
pub const DEFAULT_DIMENSION: usize = 3;

/// The three tables that make up a problem
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    #[display(fmt = "supply")]
    Supply,
    #[display(fmt = "demand")]
    Demand,
    #[display(fmt = "costs")]
    Costs,
}

/// A transportation problem: `m` sources with a capacity each, `n` destinations with a demand
/// each and the unit cost of shipping from every source to every destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemFile", into = "ProblemFile")]
pub struct Problem {
    /// Capacity of each source. Length `m`.
    supply: Vec<Quantity>,
    /// Demand at each destination. Length `n`.
    demand: Vec<Quantity>,
    /// `m × n` unit costs.
    costs: Array2<Cost>,
}

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ProblemConstructionError {
    /// The number of sources must be within `1..=MAX_DIMENSION`
    #[display(fmt = "number of sources must be between 1 and {}, got {}", MAX_DIMENSION, _0)]
    SourceCount(usize),
    /// The number of destinations must be within `1..=MAX_DIMENSION`
    #[display(
        fmt = "number of destinations must be between 1 and {}, got {}",
        MAX_DIMENSION,
        _0
    )]
    DestinationCount(usize),
    /// The size of the cost matrix is not as expected
    #[display(
        fmt = "cost matrix should be {}x{}, got {}x{}",
        "expected.0",
        "expected.1",
        "actual.0",
        "actual.1"
    )]
    CostSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A row of the cost matrix has the wrong number of entries
    #[display(fmt = "cost row {} has {} entries, expected {}", "row + 1", actual, expected)]
    RaggedCosts {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Quantities and costs must be finite and non-negative
    #[display(fmt = "{} entry ({}, {}) must be a non-negative number, got {}", table, "row + 1", "column + 1", value)]
    InvalidValue {
        table: Table,
        row: usize,
        column: usize,
        value: f64,
    },
}

impl std::error::Error for ProblemConstructionError {}

impl Problem {
    /// Create a problem from the three tables, validating their shape and values.
    pub fn new(
        supply: Vec<Quantity>,
        demand: Vec<Quantity>,
        costs: Vec<Vec<Cost>>,
    ) -> Result<Problem, ProblemConstructionError> {
        let (m, n) = (supply.len(), demand.len());
        if costs.len() != m {
            let width = costs.first().map(|row| row.len()).unwrap_or(0);
            return Err(ProblemConstructionError::CostSizeMismatch {
                expected: (m, n),
                actual: (costs.len(), width),
            });
        }
        for (row, entries) in costs.iter().enumerate() {
            if entries.len() != n {
                return Err(ProblemConstructionError::RaggedCosts {
                    row,
                    expected: n,
                    actual: entries.len(),
                });
            }
        }

        let costs = Array2::from_shape_fn((m, n), |(i, j)| costs[i][j]);
        Problem::from_array(supply, demand, costs)
    }

    /// Create a problem from a cost matrix given as an `ndarray` array.
    pub fn from_array(
        supply: Vec<Quantity>,
        demand: Vec<Quantity>,
        costs: Array2<Cost>,
    ) -> Result<Problem, ProblemConstructionError> {
        let (m, n) = (supply.len(), demand.len());
        if !(1..=MAX_DIMENSION).contains(&m) {
            return Err(ProblemConstructionError::SourceCount(m));
        }
        if !(1..=MAX_DIMENSION).contains(&n) {
            return Err(ProblemConstructionError::DestinationCount(n));
        }
        if costs.dim() != (m, n) {
            return Err(ProblemConstructionError::CostSizeMismatch {
                expected: (m, n),
                actual: costs.dim(),
            });
        }

        let invalid = |value: f64| !value.is_finite() || value < 0.0;
        let bad_supply = supply
            .iter()
            .enumerate()
            .find(|(_, q)| invalid(**q))
            .map(|(i, q)| (Table::Supply, 0, i, *q));
        let bad_demand = demand
            .iter()
            .enumerate()
            .find(|(_, q)| invalid(**q))
            .map(|(j, q)| (Table::Demand, 0, j, *q));
        let bad_cost = costs
            .indexed_iter()
            .find(|(_, c)| invalid(**c))
            .map(|((i, j), c)| (Table::Costs, i, j, *c));

        if let Some((table, row, column, value)) = bad_supply.or(bad_demand).or(bad_cost) {
            return Err(ProblemConstructionError::InvalidValue {
                table,
                row,
                column,
                value,
            });
        }

        Ok(Problem {
            supply,
            demand,
            costs,
        })
    }

    /// The default tables of a fresh `m × n` problem: a capacity and demand of 100 everywhere
    /// and cost `(i + 1) * 10 + (j + 1)` from source `i` to destination `j`.
    pub fn template(
        sources: usize,
        destinations: usize,
    ) -> Result<Problem, ProblemConstructionError> {
        let costs = Array2::from_shape_fn((sources, destinations), |(i, j)| {
            ((i + 1) * 10 + (j + 1)) as f64
        });
        Problem::from_array(vec![100.0; sources], vec![100.0; destinations], costs)
    }

    /// Extend the problem with a fictitious zero-cost source of the given capacity.
    /// Dimension limits do not apply to the extended problem.
    pub(crate) fn with_dummy_source(&self, capacity: Quantity) -> Problem {
        let (m, n) = self.costs.dim();
        let costs = Array2::from_shape_fn((m + 1, n), |(i, j)| {
            if i < m {
                self.costs[[i, j]]
            } else {
                0.0
            }
        });
        let mut supply = self.supply.clone();
        supply.push(capacity);
        Problem {
            supply,
            demand: self.demand.clone(),
            costs,
        }
    }

    /// Extend the problem with a fictitious zero-cost destination of the given demand.
    /// Dimension limits do not apply to the extended problem.
    pub(crate) fn with_dummy_destination(&self, demand: Quantity) -> Problem {
        let (m, n) = self.costs.dim();
        let costs = Array2::from_shape_fn((m, n + 1), |(i, j)| {
            if j < n {
                self.costs[[i, j]]
            } else {
                0.0
            }
        });
        let mut destinations = self.demand.clone();
        destinations.push(demand);
        Problem {
            supply: self.supply.clone(),
            demand: destinations,
            costs,
        }
    }

    /// Number of sources, `m`
    pub fn sources(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations, `n`
    pub fn destinations(&self) -> usize {
        self.demand.len()
    }

    /// Capacity of each source
    pub fn supply(&self) -> &[Quantity] {
        &self.supply
    }

    /// Demand at each destination
    pub fn demand(&self) -> &[Quantity] {
        &self.demand
    }

    /// The `m × n` unit cost matrix
    pub fn costs(&self) -> &Array2<Cost> {
        &self.costs
    }

    /// Unit cost of shipping from `source` to `destination`
    pub fn cost(&self, source: SourceIndex, destination: DestinationIndex) -> Cost {
        self.costs[[source, destination]]
    }

    pub fn total_supply(&self) -> Quantity {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> Quantity {
        self.demand.iter().sum()
    }

    /// Total supply minus total demand. Zero for a balanced problem.
    pub fn surplus(&self) -> Quantity {
        self.total_supply() - self.total_demand()
    }

    /// Whether total supply and total demand agree within [BALANCE_EPSILON]
    pub fn is_balanced(&self) -> bool {
        self.surplus().abs() <= BALANCE_EPSILON
    }
}

/// Label of a source in tables, `U1` for the first one.
pub fn source_label(source: SourceIndex) -> String {
    format!("U{}", source + 1)
}

/// Label of a destination in tables, `E1` for the first one.
pub fn destination_label(destination: DestinationIndex) -> String {
    format!("E{}", destination + 1)
}

/// On-disk representation of a problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFile {
    pub supply: Vec<Quantity>,
    pub demand: Vec<Quantity>,
    pub costs: Vec<Vec<Cost>>,
}

impl TryFrom<ProblemFile> for Problem {
    type Error = ProblemConstructionError;

    fn try_from(file: ProblemFile) -> Result<Self, Self::Error> {
        Problem::new(file.supply, file.demand, file.costs)
    }
}

impl From<Problem> for ProblemFile {
    fn from(problem: Problem) -> Self {
        let costs = problem
            .costs
            .outer_iter()
            .map(|row| row.to_vec())
            .collect();
        ProblemFile {
            supply: problem.supply,
            demand: problem.demand,
            costs,
        }
    }
}
