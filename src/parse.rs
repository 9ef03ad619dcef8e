use std::io::Write;
use std::path::Path;

use derive_more::Display;
use log::debug;

use crate::error::Error;
use crate::problem::{Problem, Table};

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ParseError {
    /// A cell does not hold a number
    #[display(
        fmt = "{} row {} column {}: '{}' is not a number",
        table,
        "row + 1",
        "column + 1",
        text
    )]
    NotANumber {
        table: Table,
        row: usize,
        column: usize,
        text: String,
    },
    /// A single-row table spans several rows
    #[display(fmt = "{} must be a single row, got {} rows", table, rows)]
    ExpectedRow { table: Table, rows: usize },
    /// The problem file could not be read or decoded
    #[display(fmt = "cannot read problem file {}: {}", path, reason)]
    File { path: String, reason: String },
}

impl std::error::Error for ParseError {}

/// Parse a table of cells. Rows are separated by `;` or new lines, cells by whitespace
/// or `,`. Blank rows are skipped.
pub fn parse_table(table: Table, text: &str) -> Result<Vec<Vec<f64>>, ParseError> {
    text.split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .enumerate()
        .map(|(row, cells)| {
            cells
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|cell| !cell.is_empty())
                .enumerate()
                .map(|(column, cell)| {
                    cell.parse::<f64>().map_err(|_| ParseError::NotANumber {
                        table,
                        row,
                        column,
                        text: cell.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, ParseError>>()
        })
        .collect()
}

/// Parse a single row of cells, such as the supply or the demand table
pub fn parse_row(table: Table, text: &str) -> Result<Vec<f64>, ParseError> {
    let mut rows = parse_table(table, text)?;
    match rows.len() {
        0 => Ok(Vec::new()),
        1 => Ok(rows.remove(0)),
        rows => Err(ParseError::ExpectedRow { table, rows }),
    }
}

/// Build a problem from the text of the supply, demand and cost cells
pub fn parse_cells(supply: &str, demand: &str, costs: &str) -> Result<Problem, Error> {
    let supply = parse_row(Table::Supply, supply)?;
    let demand = parse_row(Table::Demand, demand)?;
    let costs = parse_table(Table::Costs, costs)?;
    debug!(
        "parsed {} sources, {} destinations and {} cost rows",
        supply.len(),
        demand.len(),
        costs.len()
    );
    Ok(Problem::new(supply, demand, costs)?)
}

/// Read a problem from a JSON file
pub fn read_problem<P: AsRef<Path>>(path: P) -> Result<Problem, Error> {
    let path = path.as_ref();
    let file_error = |reason: String| ParseError::File {
        path: path.display().to_string(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| file_error(e.to_string()))?;
    let reader = std::io::BufReader::new(file);
    let problem: Problem =
        serde_json::from_reader(reader).map_err(|e| file_error(e.to_string()))?;

    debug!(
        "read {}x{} problem from {}",
        problem.sources(),
        problem.destinations(),
        path.display()
    );
    Ok(problem)
}

/// Write a problem to a JSON file
pub fn write_problem<P: AsRef<Path>>(problem: &Problem, path: P) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_problem_to(problem, std::io::BufWriter::new(file))
}

/// Write a problem as pretty printed JSON to `writer`
pub fn write_problem_to<W: Write>(problem: &Problem, mut writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, problem).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
