//! Exact enumeration of connected labeled graphs.
//!
//! Counting connected graphs on `n` labeled vertices by their number of edges
//! gives the connectivity probability as a polynomial in `p`:
//!
//! ```text
//! P(n, p) = Σ_m c(n, m) · p^m · (1-p)^(M-m),    M = C(n, 2)
//! ```
//!
//! The counts satisfy the same component decomposition as the probability
//! recurrence: a graph on `n` vertices with `m` edges is either connected or
//! splits into the component of vertex `0` (size `i`, `j` edges) and an
//! arbitrary graph on the other `n - i` vertices with `m - j` edges.
//!
//! All counts are arbitrary precision. This module is an independent check of
//! the floating-point recurrence in [`crate::exact`], not a fast path.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::types::{check_vertices, EstimationRequest};
use crate::utils::num_pairs;

/// Largest vertex count accepted by the per-edge enumeration.
pub const MAX_COUNTING_VERTICES: usize = 16;

/// Rows `0..=max` of Pascal's triangle.
fn pascal(max: usize) -> Vec<Vec<BigUint>> {
    let mut rows: Vec<Vec<BigUint>> = Vec::with_capacity(max + 1);
    for n in 0..=max {
        let mut row = vec![BigUint::one(); n + 1];
        for k in 1..n {
            row[k] = &rows[n - 1][k - 1] + &rows[n - 1][k];
        }
        rows.push(row);
    }
    rows
}

/// Number of connected labeled graphs on `k` vertices, for `k = 1..=n`.
///
/// Index `k - 1` holds the count for `k` vertices: 1, 1, 4, 38, 728, ...
pub fn connected_graph_counts(n: usize) -> Result<Vec<BigUint>> {
    check_vertices(n)?;
    let binom = pascal(n);
    let mut counts: Vec<BigUint> = Vec::with_capacity(n);

    for k in 1..=n {
        let total = BigUint::one() << num_pairs(k);
        let mut disconnected = BigUint::zero();
        for i in 1..k {
            let rest = BigUint::one() << num_pairs(k - i);
            disconnected += &binom[k - 1][i - 1] * &counts[i - 1] * rest;
        }
        counts.push(total - disconnected);
    }

    Ok(counts)
}

/// Number of connected labeled graphs on exactly `n` vertices with `m` edges,
/// for `m = 0..=C(n, 2)`.
pub fn connected_edge_counts(n: usize) -> Result<Vec<BigUint>> {
    check_vertices(n)?;
    if n > MAX_COUNTING_VERTICES {
        return Err(Error::invalid(
            "n",
            format!("edge enumeration supports at most {} vertices, got {}", MAX_COUNTING_VERTICES, n),
        ));
    }

    let binom = pascal(num_pairs(n).max(n));

    // table[k - 1][m]: connected graphs on k vertices with m edges
    let mut table: Vec<Vec<BigUint>> = Vec::with_capacity(n);
    for k in 1..=n {
        let pairs = num_pairs(k);
        let mut row = Vec::with_capacity(pairs + 1);
        for m in 0..=pairs {
            let mut disconnected = BigUint::zero();
            for i in 1..k {
                let rest_pairs = num_pairs(k - i);
                let mut ways = BigUint::zero();
                for (j, inner) in table[i - 1].iter().enumerate() {
                    if j > m || m - j > rest_pairs || inner.is_zero() {
                        continue;
                    }
                    ways += inner * &binom[rest_pairs][m - j];
                }
                disconnected += &binom[k - 1][i - 1] * ways;
            }
            row.push(&binom[pairs][m] - disconnected);
        }
        table.push(row);
    }

    Ok(table.pop().unwrap_or_default())
}

/// `P(n, p)` evaluated from the edge-count polynomial.
pub fn connected_probability_by_counting(n: usize, p: f64) -> Result<f64> {
    EstimationRequest::new(n, p)?;
    let counts = connected_edge_counts(n)?;
    let pairs = num_pairs(n);

    let mut total = 0.0;
    for (m, count) in counts.iter().enumerate() {
        if count.is_zero() {
            continue;
        }
        let count = count.to_f64().ok_or(Error::NumericalInstability {
            n,
            p,
            value: f64::INFINITY,
        })?;
        total += count * p.powi(m as i32) * (1.0 - p).powi((pairs - m) as i32);
    }
    Ok(total)
}
