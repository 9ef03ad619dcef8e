use ndarray::Array2;

use crate::problem::{Cost, DestinationIndex, Problem, Quantity, SourceIndex};

/// sets for the transportation model
#[derive(Debug)]
#[allow(non_snake_case)]
pub struct Sets {
    /// Set of sources (factories)
    pub I: Vec<SourceIndex>,
    /// Set of destinations (warehouses)
    pub J: Vec<DestinationIndex>,
}

/// parameters for the transportation model
#[derive(Debug)]
#[allow(non_snake_case)]
pub struct Parameters {
    /// capacity of source *i*
    pub S: Vec<Quantity>,
    /// demand at destination *j*
    pub D: Vec<Quantity>,
    /// cost of shipping one unit from source *i* to destination *j*
    pub C: Array2<Cost>,
}

impl Sets {
    pub fn new(problem: &Problem) -> Sets {
        Sets {
            I: (0..problem.sources()).collect(),
            J: (0..problem.destinations()).collect(),
        }
    }
}

impl Parameters {
    pub fn new(problem: &Problem) -> Parameters {
        Parameters {
            S: problem.supply().to_vec(),
            D: problem.demand().to_vec(),
            C: problem.costs().clone(),
        }
    }
}
