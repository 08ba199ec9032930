//! Analytic approximation of the connectivity probability.
//!
//! Near the connectivity threshold the only likely obstruction is an isolated
//! vertex. The expected number of isolated vertices is
//! `μ = N (1-p)^(N-1)`, and their count is asymptotically Poisson, so
//!
//! ```text
//! P(N, p) ≈ exp(-μ) = exp(-N (1-p)^(N-1))
//! ```
//!
//! Solving `exp(-μ) = t` for `p` gives the closed-form threshold
//!
//! ```text
//! p ≈ 1 - (-ln t / N)^(1 / (N-1))
//! ```
//!
//! which is the classical `p = (ln N + c) / N` law with `t = exp(-exp(-c))`.
//! The approximation is good once `N` is a few dozen and poor for tiny graphs.

use crate::error::{Error, Result};
use crate::types::{EstimationRequest, InversionRequest};
use crate::utils::ln_one_minus;

/// Expected number of isolated vertices in G(n, p).
pub fn expected_isolated_vertices(n: usize, p: f64) -> Result<f64> {
    EstimationRequest::new(n, p)?;
    if n == 1 {
        // A lone vertex is isolated but the graph is connected.
        return Ok(0.0);
    }
    Ok(n as f64 * ((n - 1) as f64 * ln_one_minus(p)).exp())
}

/// `exp(-n (1-p)^(n-1))`.
pub fn connected_probability_approx(n: usize, p: f64) -> Result<f64> {
    let mu = expected_isolated_vertices(n, p)?;
    Ok((-mu).exp())
}

/// Edge probability at which the approximation equals `target`.
pub fn threshold_approx(n: usize, target: f64) -> Result<f64> {
    InversionRequest::new(n, target)?;
    if n < 2 {
        return Err(Error::invalid("n", "threshold approximation needs at least 2 vertices"));
    }
    let mu = -target.ln();
    let q = ((mu / n as f64).ln() / (n - 1) as f64).exp();
    Ok((1.0 - q).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::exact;

    #[test]
    fn test_extremes() {
        for n in 2..=20 {
            assert_eq!(connected_probability_approx(n, 1.0).unwrap(), 1.0);
            let at_zero = connected_probability_approx(n, 0.0).unwrap();
            assert!((at_zero - (-(n as f64)).exp()).abs() < 1e-12);
        }
        assert_eq!(connected_probability_approx(1, 0.3).unwrap(), 1.0);
    }

    #[test]
    fn test_threshold_inverts_approximation() {
        for n in [5, 20, 100, 1000] {
            for target in [0.1, 0.5, 0.9] {
                let p = threshold_approx(n, target).unwrap();
                let back = connected_probability_approx(n, p).unwrap();
                assert!((back - target).abs() < 1e-9, "n = {}, target = {}: {}", n, target, back);
            }
        }
    }

    #[test]
    fn test_close_to_exact_above_threshold() {
        for &(n, p) in &[(40, 0.15), (60, 0.1), (100, 0.07)] {
            let approx = connected_probability_approx(n, p).unwrap();
            let exact = exact::connected_probability(n, p).unwrap();
            assert!((approx - exact).abs() < 0.02, "n = {}, p = {}: {} vs {}", n, p, approx, exact);
        }
    }

    #[test]
    fn test_threshold_law() {
        // p = (ln n + c) / n gives probability exp(-exp(-c)) asymptotically
        let n = 10_000;
        let p = threshold_approx(n, (-1.0f64).exp()).unwrap();
        let scaled = p * n as f64 - (n as f64).ln();
        assert!(scaled.abs() < 0.01, "c = {}", scaled);
    }

    #[test]
    fn test_invalid() {
        assert!(threshold_approx(1, 0.5).is_err());
        assert!(threshold_approx(10, 1.0).is_err());
        assert!(connected_probability_approx(0, 0.5).is_err());
    }
}
