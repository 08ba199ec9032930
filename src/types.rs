//! Validated query types.
//!
//! A forward query is an [`EstimationRequest`] `(N, p)`; an inverse query is an
//! [`InversionRequest`] `(N, target)`. Both are checked once on construction so
//! the numeric code can assume a valid domain.
use std::fmt;

use crate::error::{Error, Result};

/// Checks that the vertex count is at least one.
pub fn check_vertices(n: usize) -> Result<()> {
    if n < 1 {
        return Err(Error::invalid("n", format!("vertex count must be >= 1, got {}", n)));
    }
    Ok(())
}

/// Checks that `p` is a probability in `[0, 1]`.
pub fn check_edge_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid("p", format!("edge probability must be in [0, 1], got {}", p)));
    }
    Ok(())
}

/// Checks that `target` is a probability in the open interval `(0, 1)`.
pub fn check_target(target: f64) -> Result<()> {
    if !(target > 0.0 && target < 1.0) {
        return Err(Error::invalid(
            "target",
            format!("target probability must be in (0, 1), got {}", target),
        ));
    }
    Ok(())
}

/// Forward query: probability that G(N, p) is connected.
///
/// # Invariants
///
/// - `n >= 1`
/// - `0 <= p <= 1`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EstimationRequest {
    n: usize,
    p: f64,
}

impl EstimationRequest {
    pub fn new(n: usize, p: f64) -> Result<Self> {
        check_vertices(n)?;
        check_edge_probability(p)?;
        Ok(Self { n, p })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Edge probability.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Returns the closed-form answer for the base cases `N = 1` and `N = 2`.
    pub fn base_case(&self) -> Option<f64> {
        match self.n {
            1 => Some(1.0),
            2 => Some(self.p),
            _ => None,
        }
    }
}

impl fmt::Display for EstimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G({}, {})", self.n, self.p)
    }
}

/// Inverse query: the edge probability at which G(N, p) is connected with
/// probability `target`.
///
/// # Invariants
///
/// - `n >= 1`
/// - `0 < target < 1`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InversionRequest {
    n: usize,
    target: f64,
}

impl InversionRequest {
    pub fn new(n: usize, target: f64) -> Result<Self> {
        check_vertices(n)?;
        check_target(target)?;
        Ok(Self { n, target })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Target connectedness probability.
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl fmt::Display for InversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p | P(G({}, p) connected) = {}", self.n, self.target)
    }
}
