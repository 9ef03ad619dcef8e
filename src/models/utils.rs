use crate::models::lp::VarId;

pub trait AddVars {
    type Out;

    /// Create a variable for every index with a closure
    fn vars_with<F: FnMut(Self) -> VarId>(&self, func: F) -> Self::Out
    where
        Self: Sized;
}

impl AddVars for usize {
    type Out = Vec<VarId>;

    fn vars_with<F: FnMut(Self) -> VarId>(&self, mut func: F) -> Self::Out
    where
        Self: Sized,
    {
        let mut vec = Vec::with_capacity(*self);
        for i in 0..*self {
            vec.push(func(i));
        }

        vec
    }
}

impl AddVars for (usize, usize) {
    type Out = Vec<<usize as AddVars>::Out>;

    fn vars_with<F: FnMut(Self) -> VarId>(&self, mut func: F) -> Self::Out
    where
        Self: Sized,
    {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push(self.1.vars_with(|j| func((i, j))));
        }

        out
    }
}

/// Trait that converts variable handles to their value in a solution
pub trait ConvertVars {
    type Out;
    fn convert(&self, values: &[f64]) -> Self::Out;
}

impl<T: ConvertVars> ConvertVars for Vec<T> {
    type Out = Vec<T::Out>;

    fn convert(&self, values: &[f64]) -> Self::Out {
        self.iter().map(|e| e.convert(values)).collect()
    }
}

impl ConvertVars for VarId {
    type Out = f64;

    fn convert(&self, values: &[f64]) -> Self::Out {
        values[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lp::{LinearProgram, Sense};

    #[test]
    fn creates_row_major_grid() {
        let mut lp = LinearProgram::new("grid", Sense::Minimize);
        let x = (2, 3).vars_with(|(i, j)| {
            lp.add_var(&format!("x_{}_{}", i, j), 0.0, &(0.0..f64::INFINITY))
        });
        assert_eq!(x.len(), 2);
        assert_eq!(x[1].len(), 3);
        assert_eq!(lp.variables()[x[1][2].index()].name, "x_1_2");

        let values: Vec<f64> = (0..6).map(|v| v as f64).collect();
        assert_eq!(x.convert(&values), vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    }
}
