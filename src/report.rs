//! Turning solved flows back into the tables shown to the user.

use std::fmt;
use std::time::Duration;

use log::warn;

use crate::balance::{Balanced, Dummy};
use crate::models::TransportationResult;
use crate::problem::{destination_label, source_label, Cost, Quantity};
use crate::solvers::Status;
use crate::utils::approx_eq;

/// Flows out of one source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub label: String,
    /// Quantity shipped to each destination
    pub flows: Vec<Quantity>,
    pub total_flow: Quantity,
    /// `sum_j cost[i][j] * flow[i][j]`
    pub total_cost: Cost,
}

/// Problem dimensions and solver performance
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// Sources entered by the user, without the dummy
    pub sources: usize,
    /// Destinations entered by the user, without the dummy
    pub destinations: usize,
    pub variables: usize,
    pub constraints: usize,
    pub solver: String,
    pub status: Status,
    pub runtime: Duration,
    pub iterations: Option<u64>,
    pub gap: f64,
    pub dummy: Option<Dummy>,
}

/// The flow matrix with its row and column aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct FlowReport {
    destinations: Vec<String>,
    rows: Vec<SourceRow>,
    column_totals: Vec<Quantity>,
    total_cost: Cost,
    statistics: Statistics,
}

impl FlowReport {
    pub fn new(balanced: &Balanced, result: &TransportationResult) -> FlowReport {
        let problem = balanced.problem();
        let dummy = balanced.dummy();
        let (m, n) = result.x.dim();

        let label = |index: usize, count: usize, real: fn(usize) -> String, prefix: &str| {
            if index + 1 == count {
                format!("{}*", prefix)
            } else {
                real(index)
            }
        };
        let source = |i: usize| match dummy {
            Some(Dummy::Source(_)) => label(i, m, source_label, "U"),
            _ => source_label(i),
        };
        let destination = |j: usize| match dummy {
            Some(Dummy::Destination(_)) => label(j, n, destination_label, "E"),
            _ => destination_label(j),
        };

        let rows: Vec<SourceRow> = result
            .x
            .outer_iter()
            .enumerate()
            .map(|(i, flows)| SourceRow {
                label: source(i),
                flows: flows.to_vec(),
                total_flow: flows.sum(),
                total_cost: flows
                    .iter()
                    .zip(problem.costs().row(i))
                    .map(|(flow, cost)| flow * cost)
                    .sum(),
            })
            .collect();

        let column_totals = result.x.sum_axis(ndarray::Axis(0)).to_vec();

        let computed: Cost = rows.iter().map(|row| row.total_cost).sum();
        if !approx_eq(computed, result.objective) {
            warn!(
                "flows cost {} but the solver reported an objective of {}",
                computed, result.objective
            );
        }

        let (sources, destinations) = match dummy {
            Some(Dummy::Source(_)) => (m - 1, n),
            Some(Dummy::Destination(_)) => (m, n - 1),
            None => (m, n),
        };

        FlowReport {
            destinations: (0..n).map(destination).collect(),
            rows,
            column_totals,
            total_cost: result.objective,
            statistics: Statistics {
                sources,
                destinations,
                variables: result.variables,
                constraints: result.constraints,
                solver: result.solver.clone(),
                status: result.status.clone(),
                runtime: result.runtime,
                iterations: result.iterations,
                gap: result.gap,
                dummy,
            },
        }
    }

    /// Destination labels, in column order
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Quantity received by each destination
    pub fn column_totals(&self) -> &[Quantity] {
        &self.column_totals
    }

    /// Grand total cost, the objective value of the solve
    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The result table as text cells: a header row, one row per source, the column totals
    /// and the grand total. Numbers have two decimals.
    pub fn cells(&self) -> Vec<Vec<String>> {
        let n = self.destinations.len();
        let mut table = Vec::with_capacity(self.rows.len() + 3);

        let mut header = vec![String::new()];
        header.extend(self.destinations.iter().cloned());
        header.push("Supply".to_string());
        header.push("Source cost".to_string());
        table.push(header);

        for row in &self.rows {
            let mut cells = vec![row.label.clone()];
            cells.extend(row.flows.iter().map(|flow| format!("{:.2}", flow)));
            cells.push(format!("{:.2}", row.total_flow));
            cells.push(format!("{:.2}", row.total_cost));
            table.push(cells);
        }

        let mut demand = vec!["Demand".to_string()];
        demand.extend(self.column_totals.iter().map(|total| format!("{:.2}", total)));
        demand.extend([String::new(), String::new()]);
        table.push(demand);

        let mut total = vec!["Total cost".to_string()];
        total.extend(std::iter::repeat(String::new()).take(n + 1));
        total.push(format!("{:.2}", self.total_cost));
        table.push(total);

        table
    }

    /// One paragraph describing the solve
    pub fn summary(&self) -> String {
        let stats = &self.statistics;
        let mut summary = format!(
            "Optimal total cost: {:.2}. {} variables, {} constraints. \
             Solved by {} in {:.3} s, status {}, gap {:.2}%.",
            self.total_cost,
            stats.variables,
            stats.constraints,
            stats.solver,
            stats.runtime.as_secs_f64(),
            stats.status,
            stats.gap * 100.0
        );
        if let Some(dummy) = stats.dummy {
            summary.push_str(&format!(" Balanced with a {}.", dummy));
        }
        summary
    }
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let columns = cells[0].len();
        let widths: Vec<usize> = (0..columns)
            .map(|c| cells.iter().map(|row| row[c].len()).max().unwrap_or(0))
            .collect();

        for row in &cells {
            let mut line = String::new();
            for (c, cell) in row.iter().enumerate() {
                if c == 0 {
                    line.push_str(&format!("{:<width$}", cell, width = widths[c]));
                } else {
                    line.push_str(&format!("  {:>width$}", cell, width = widths[c]));
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sources:          {}", self.sources)?;
        writeln!(f, "Destinations:     {}", self.destinations)?;
        writeln!(f, "Variables:        {}", self.variables)?;
        writeln!(f, "Constraints:      {}", self.constraints)?;
        writeln!(f, "Solver:           {}", self.solver)?;
        writeln!(f, "Status:           {}", self.status)?;
        writeln!(f, "Runtime:          {:.3} s", self.runtime.as_secs_f64())?;
        match self.iterations {
            Some(iterations) => writeln!(f, "Iterations:       {}", iterations)?,
            None => writeln!(f, "Iterations:       N/A")?,
        }
        writeln!(f, "Optimality gap:   {:.2}%", self.gap * 100.0)?;
        if let Some(dummy) = self.dummy {
            writeln!(f, "Balancing:        {}", dummy)?;
        }
        Ok(())
    }
}
