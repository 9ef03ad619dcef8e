/// Relative tolerance when comparing costs and flows computed in different ways
pub const EPSILON: f64 = 1e-6;

/// Whether `a` and `b` agree within `EPSILON`, relative to their magnitude
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * (1.0 + a.abs().max(b.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_comparison() {
        assert!(approx_eq(0.0, 0.0));
        assert!(approx_eq(1e9, 1e9 + 1.0));
        assert!(!approx_eq(1.0, 1.001));
    }
}
