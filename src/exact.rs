//! Exact connectivity probability of G(N, p).
//!
//! # Recurrence
//!
//! Fix vertex `0` and let `i` be the size of its connected component. The graph
//! is disconnected exactly when `i < N`, and the component has size `i` when
//! the `i - 1` companions of vertex `0` form a connected graph together with it
//! and none of the `i (N - i)` pairs crossing to the rest is an edge:
//!
//! ```text
//! P(1) = 1
//! P(2) = p
//! P(N) = 1 - Σ_{i=1}^{N-1} P(i) · C(N-1, i-1) · (1-p)^(i(N-i))
//! ```
//!
//! # Evaluation
//!
//! The table `P(1), P(2), ...` is filled bottom-up, so there is no recursion
//! depth limit. Each term is assembled in log space,
//! `exp(ln P(i) + ln C(N-1, i-1) + i(N-i) · ln(1-p))`, which keeps both the
//! binomial coefficient and the high power in range.
//!
//! The subtraction `1 - Σ` is still exposed to cancellation: for large `N` and
//! small `p` rounding errors in small `P(i)` get amplified by large binomial
//! weights. Every intermediate value is therefore checked twice, and a failed
//! check is reported as [`Error::NumericalInstability`]:
//!
//! - it must lie in `[0, 1]` up to [`ExactConfig::tolerance`];
//! - the rounding error of `1 - Σ`, about `ε · N · Σ`, must stay below
//!   [`ExactConfig::precision`] times the value. A tiny `P(N)` left over from
//!   a sum close to `1` has no correct digits even when it is in range.
//!
//! With [`ExactConfig::fallback`] set (the default), [`ExactEstimator`] answers
//! such queries from the subtraction-free exploration process in
//! [`crate::exploration`] instead.
//!
//! # Memoization
//!
//! A [`MemoTable`] is only meaningful for the `p` it was filled with. It stores
//! that `p` and resets itself when asked for another one, so a table can never
//! hand out values computed for a different edge probability. Requests for a
//! larger `N` at the same `p` extend the table in place.

use log::{debug, trace, warn};
use statrs::function::factorial::ln_binomial;

use crate::cache::ResultCache;
use crate::error::{Error, Result};
use crate::exploration::connected_probability_by_exploration;
use crate::types::EstimationRequest;
use crate::utils::ln_one_minus;

/// Default tolerance for intermediate probabilities outside `[0, 1]`.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default bound on the rounding error of `1 - Σ` relative to its value.
pub const DEFAULT_PRECISION: f64 = 1e-10;

/// Configuration of the [`ExactEstimator`].
#[derive(Debug, Clone, Copy)]
pub struct ExactConfig {
    /// Largest excursion outside `[0, 1]` that is clamped rather than reported.
    pub tolerance: f64,
    /// Largest rounding error of a step relative to its value.
    pub precision: f64,
    /// The result cache has `2^cache_bits` slots.
    pub cache_bits: usize,
    /// Recompute unstable queries from the exploration process.
    pub fallback: bool,
}

impl ExactConfig {
    /// Set the instability tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the relative precision required from each step.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Set the result cache size.
    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }

    /// Enable or disable the exploration fallback.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(Error::invalid(
                "tolerance",
                format!("must be finite and non-negative, got {}", self.tolerance),
            ));
        }
        if !(self.precision > 0.0 && self.precision.is_finite()) {
            return Err(Error::invalid(
                "precision",
                format!("must be finite and positive, got {}", self.precision),
            ));
        }
        Ok(())
    }
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            precision: DEFAULT_PRECISION,
            cache_bits: 10,
            fallback: true,
        }
    }
}

/// Table of `P(1..=len)` for one fixed edge probability.
#[derive(Debug, Clone)]
pub struct MemoTable {
    p: f64,
    ln_q: f64,
    values: Vec<f64>,
}

impl MemoTable {
    /// Creates an empty table for edge probability `p`.
    pub fn new(p: f64) -> Self {
        Self {
            p,
            ln_q: ln_one_minus(p),
            values: Vec::new(),
        }
    }

    /// The edge probability this table belongs to.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Largest vertex count computed so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `P(n)` if it is already in the table.
    pub fn get(&self, n: usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.values.get(i)).copied()
    }

    /// All computed values; index `k` holds `P(k + 1)`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Drops all values and rebinds the table to `p`.
    pub fn reset(&mut self, p: f64) {
        self.p = p;
        self.ln_q = ln_one_minus(p);
        self.values.clear();
    }

    /// Returns `true` if the table was filled for exactly this `p`.
    pub fn is_valid_for(&self, p: f64) -> bool {
        self.p.to_bits() == p.to_bits()
    }

    /// Fills the table up to `P(n)` and returns it.
    ///
    /// On [`Error::NumericalInstability`] the table keeps the values computed
    /// before the failing step.
    pub fn extend_to(&mut self, n: usize, config: &ExactConfig) -> Result<f64> {
        while self.values.len() < n {
            let m = self.values.len() + 1;
            let value = match m {
                1 => 1.0,
                2 => self.p,
                _ => self.next_value(m, config)?,
            };
            self.values.push(value);
        }
        Ok(self.values[n - 1])
    }

    fn next_value(&self, m: usize, config: &ExactConfig) -> Result<f64> {
        // No edges: only a single vertex is connected.
        if self.p == 0.0 {
            return Ok(0.0);
        }
        let mut disconnected = 0.0;
        for i in 1..m {
            let connected = self.values[i - 1];
            if connected == 0.0 {
                continue;
            }
            let cross = (i * (m - i)) as f64;
            let ln_term = connected.ln() + ln_binomial((m - 1) as u64, (i - 1) as u64) + cross * self.ln_q;
            disconnected += ln_term.exp();
        }
        checked(m, self.p, 1.0 - disconnected, disconnected, config)
    }
}

fn checked(n: usize, p: f64, value: f64, disconnected: f64, config: &ExactConfig) -> Result<f64> {
    if value.is_nan() || value < -config.tolerance || value > 1.0 + config.tolerance {
        return Err(Error::NumericalInstability { n, p, value });
    }
    let rounding = f64::EPSILON * n as f64 * disconnected;
    if rounding > config.precision * value {
        return Err(Error::NumericalInstability { n, p, value });
    }
    if !(0.0..=1.0).contains(&value) {
        trace!("clamping P({}) = {:e} at p = {}", n, value, p);
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Computes `P(n, p)` with a throwaway estimator.
pub fn connected_probability(n: usize, p: f64) -> Result<f64> {
    ExactEstimator::new(ExactConfig::default().with_cache_bits(0)).connected_probability(n, p)
}

/// Exact estimator owning its memo table and a bounded result cache.
pub struct ExactEstimator {
    config: ExactConfig,
    memo: MemoTable,
    results: ResultCache,
}

impl Default for ExactEstimator {
    fn default() -> Self {
        Self::new(ExactConfig::default())
    }
}

impl ExactEstimator {
    pub fn new(config: ExactConfig) -> Self {
        Self {
            config,
            memo: MemoTable::new(0.0),
            results: ResultCache::new(config.cache_bits),
        }
    }

    pub fn config(&self) -> &ExactConfig {
        &self.config
    }

    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    pub fn cache(&self) -> &ResultCache {
        &self.results
    }

    /// Forgets every memoized value.
    pub fn clear(&mut self) {
        let p = self.memo.p();
        self.memo.reset(p);
        self.results.clear();
    }

    /// Probability that G(n, p) is connected.
    pub fn connected_probability(&mut self, n: usize, p: f64) -> Result<f64> {
        let request = EstimationRequest::new(n, p)?;
        self.config.validate()?;
        if let Some(value) = request.base_case() {
            return Ok(value);
        }

        if let Some(value) = self.results.get(n, p) {
            return Ok(value);
        }

        debug!("connected_probability(n = {}, p = {})", n, p);
        let value = self.compute(n, p)?;
        self.results.insert(n, p, value);
        Ok(value)
    }

    /// Returns `P(1, p), ..., P(n, p)`.
    pub fn probability_table(&mut self, n: usize, p: f64) -> Result<Vec<f64>> {
        EstimationRequest::new(n, p)?;
        self.config.validate()?;
        let config = self.config;
        let extended = self.memo_for(p).extend_to(n, &config);
        match extended {
            Ok(_) => Ok(self.memo.values()[..n].to_vec()),
            Err(err @ Error::NumericalInstability { .. }) if self.config.fallback => {
                warn!("{}, finishing the table by exploration", err);
                let mut table = self.memo.values().to_vec();
                for m in table.len() + 1..=n {
                    table.push(connected_probability_by_exploration(m, p)?);
                }
                Ok(table)
            }
            Err(err) => Err(err),
        }
    }

    fn compute(&mut self, n: usize, p: f64) -> Result<f64> {
        let config = self.config;
        let extended = self.memo_for(p).extend_to(n, &config);
        match extended {
            Err(err @ Error::NumericalInstability { .. }) if self.config.fallback => {
                debug!("{}, falling back to exploration", err);
                connected_probability_by_exploration(n, p)
            }
            result => result,
        }
    }

    fn memo_for(&mut self, p: f64) -> &mut MemoTable {
        if !self.memo.is_valid_for(p) {
            debug!("memo table invalidated: p = {} -> {}", self.memo.p(), p);
            self.memo.reset(p);
        }
        &mut self.memo
    }
}
