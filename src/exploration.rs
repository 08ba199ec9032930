//! Connectivity probability from the exploration process of vertex `0`.
//!
//! Explore the component of vertex `0` one vertex at a time. When a vertex is
//! explored, each of the `r` vertices not reached yet is joined to it
//! independently with probability `p`, so the number of newly reached vertices
//! is `Binomial(r, p)`. Since every pair is looked at once, the process has the
//! law of G(N, p), and the graph is connected iff the exploration reaches all
//! `N` vertices before it runs out of active ones.
//!
//! After `t` explorations with `s` reached vertices, `s - t` are still active.
//! The distribution of `s` after each step is propagated forward; mass reaching
//! `s = N` is connected, mass with no active vertex left is not.
//!
//! Every term is a product of probabilities and nothing is subtracted, so small
//! results keep their relative accuracy. This costs `O(N^3)` instead of the
//! `O(N^2)` recurrence in [`crate::exact`], which loses all accuracy once
//! `P(N, p)` drops far below rounding error at small `p`.

use statrs::function::factorial::ln_binomial;

use crate::error::Result;
use crate::types::EstimationRequest;
use crate::utils::ln_one_minus;

/// Binomial probability mass functions for `r = 0..=max`; row `r` has `r + 1` entries.
fn binomial_rows(max: usize, p: f64) -> Vec<Vec<f64>> {
    let ln_p = p.ln();
    let ln_q = ln_one_minus(p);
    (0..=max)
        .map(|r| {
            (0..=r)
                .map(|k| (ln_binomial(r as u64, k as u64) + k as f64 * ln_p + (r - k) as f64 * ln_q).exp())
                .collect()
        })
        .collect()
}

/// Probability that G(n, p) is connected, computed from the exploration process.
pub fn connected_probability_by_exploration(n: usize, p: f64) -> Result<f64> {
    let request = EstimationRequest::new(n, p)?;
    if let Some(value) = request.base_case() {
        return Ok(value);
    }
    if p == 0.0 || p == 1.0 {
        return Ok(p);
    }

    let pmf = binomial_rows(n - 1, p);

    // reached[s]: probability that `s` vertices are reached after `t` explorations
    let mut reached = vec![0.0; n + 1];
    reached[1] = 1.0;
    let mut connected = 0.0;

    for t in 0..n {
        let mut next = vec![0.0; n + 1];
        // s = t means no active vertex is left: that mass is absorbed as disconnected.
        for s in (t + 1)..n {
            let mass = reached[s];
            if mass == 0.0 {
                continue;
            }
            for (k, w) in pmf[n - s].iter().enumerate() {
                if s + k == n {
                    connected += mass * w;
                } else {
                    next[s + k] += mass * w;
                }
            }
        }
        reached = next;
    }

    Ok(connected.clamp(0.0, 1.0))
}
