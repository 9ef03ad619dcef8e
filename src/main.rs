use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use transport::balance::{Abort, BalancePolicy, Confirm, Prompt, Rebalance};
use transport::parse::{parse_cells, read_problem, write_problem, write_problem_to};
use transport::problem::{Problem, DEFAULT_DIMENSION};
use transport::solvers::Backend;
use transport::{Error, Session};

/// Formulate and solve transportation problems as linear programs
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Increase logging, once for debug and twice for trace
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u8,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default problem of the given size as JSON
    Template {
        /// Number of sources
        #[clap(short = 'm', long, default_value_t = DEFAULT_DIMENSION)]
        sources: usize,
        /// Number of destinations
        #[clap(short = 'n', long, default_value_t = DEFAULT_DIMENSION)]
        destinations: usize,
        /// File to write to, standard output if omitted
        #[clap(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
    },
    /// Solve a problem and print the flows
    Solve {
        /// JSON problem file
        #[clap(parse(from_os_str), required_unless_present = "supply")]
        file: Option<PathBuf>,
        /// Supply cells, e.g. "100 100"
        #[clap(long, conflicts_with = "file", requires_all = &["demand", "costs"])]
        supply: Option<String>,
        /// Demand cells, e.g. "50 150"
        #[clap(long, requires = "supply")]
        demand: Option<String>,
        /// Cost cells with rows separated by ';', e.g. "1 2; 3 4"
        #[clap(long, requires = "supply")]
        costs: Option<String>,
        /// Solver backend: minilp or gurobi
        #[clap(short, long, default_value = "minilp")]
        backend: Backend,
        /// What to do when total supply and total demand differ: ask, rebalance or abort
        #[clap(long, default_value = "ask")]
        balance: BalancePolicy,
        /// Export the solution to this CSV file
        #[clap(short, long, parse(from_os_str))]
        export: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load(
    file: Option<PathBuf>,
    supply: Option<String>,
    demand: Option<String>,
    costs: Option<String>,
) -> Result<Problem, Error> {
    match file {
        Some(path) => read_problem(path),
        None => parse_cells(
            supply.as_deref().unwrap_or_default(),
            demand.as_deref().unwrap_or_default(),
            costs.as_deref().unwrap_or_default(),
        ),
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Template {
            sources,
            destinations,
            output,
        } => {
            let problem = Problem::template(sources, destinations)?;
            match output {
                Some(path) => {
                    write_problem(&problem, &path)?;
                    info!("Wrote {}x{} template to {}", sources, destinations, path.display());
                }
                None => write_problem_to(&problem, io::stdout().lock())?,
            }
        }
        Command::Solve {
            file,
            supply,
            demand,
            costs,
            backend,
            balance,
            export,
        } => {
            let session = Session::with_problem(load(file, supply, demand, costs)?);
            let solver = backend.solver()?;

            let mut confirm: Box<dyn Confirm> = match balance {
                BalancePolicy::Ask => Box::new(Prompt::new(io::stdin().lock(), io::stderr())),
                BalancePolicy::Rebalance => Box::new(Rebalance),
                BalancePolicy::Abort => Box::new(Abort),
            };
            let session = session.solve(solver.as_ref(), confirm.as_mut())?;

            if let Some(report) = session.report() {
                println!("{}", report);
                println!("{}", report.statistics());
            }
            if let Some(path) = export {
                session.export(&path)?;
                println!("Solution exported to {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
