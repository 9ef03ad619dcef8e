pub mod balance;
pub mod error;
pub mod export;
pub mod models;
pub mod parse;
pub mod problem;
pub mod report;
pub mod session;
pub mod solvers;
pub mod utils;

pub use balance::{balance, BalancePolicy, Balanced, Confirm, Dummy, Imbalance};
pub use error::Error;
pub use problem::Problem;
pub use report::FlowReport;
pub use session::Session;
pub use solvers::{Backend, Solver};
