pub mod lp;
pub mod transportation_model;
pub mod utils;

pub use lp::LinearProgram;
pub use transportation_model::model::{TransportationResult, TransportationSolver};
