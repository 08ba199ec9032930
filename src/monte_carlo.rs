//! Monte Carlo estimate of the connectivity probability.
//!
//! The estimate is the fraction of sampled G(N, p) instances that are
//! connected. With `k` connected samples out of `n` trials the standard error is
//! `sqrt(p̂ (1 - p̂) / n)`, at most `0.0016` for the default `100_000` trials.
//!
//! ## Parallelism and reproducibility
//!
//! Trials are split into fixed-size chunks that run on the rayon pool. Chunk
//! `c` draws from the ChaCha8 stream `c` of the estimator's seed and only its
//! connected count is reduced, so the result depends on the seed and chunk size
//! but not on the number of threads or the scheduling order.
//!
//! ## Common random numbers
//!
//! The seed is fixed when the estimator is built (drawn at random if the
//! configuration leaves it unset). Every evaluation replays the same streams,
//! and since each pair consumes one draw regardless of `p`, the sampled graphs
//! are nested in `p`. The estimate is then a non-decreasing step function of
//! `p`, which is what a root search over `p` needs.

use std::fmt;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphSampler, SamplingModel, Traversal};
use crate::stats::{proportion_std_error, wilson_interval, ConfidenceInterval};
use crate::types::EstimationRequest;

/// Default number of sampled graphs per estimate.
pub const DEFAULT_TRIALS: usize = 100_000;

/// Default number of trials per parallel work unit.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Configuration for Monte Carlo estimation.
#[derive(Debug, Clone)]
pub struct MonteCarloConfig {
    /// Number of sampled graphs
    pub trials: usize,
    /// Random seed (None for random)
    pub seed: Option<u64>,
    /// Trials per parallel chunk (0 for the default)
    pub chunk_size: usize,
    /// Edge sampling model
    pub model: SamplingModel,
    /// Confidence level for intervals (e.g., 0.95)
    pub confidence: f64,
}

impl MonteCarloConfig {
    /// Create a new configuration with defaults.
    pub fn new(trials: usize) -> Self {
        Self {
            trials,
            seed: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            model: SamplingModel::default(),
            confidence: 0.95,
        }
    }

    /// Set the number of trials.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the sampling model.
    pub fn with_model(mut self, model: SamplingModel) -> Self {
        self.model = model;
        self
    }

    /// Set the confidence level.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TRIALS)
    }
}

/// Result of one Monte Carlo estimate.
#[derive(Debug, Clone)]
pub struct MonteCarloEstimate {
    pub n: usize,
    pub p: f64,
    pub trials: usize,
    /// Number of connected samples
    pub connected: u64,
    /// `connected / trials`
    pub probability: f64,
    /// Standard error of `probability`
    pub std_error: f64,
    /// Wilson score interval for the true probability
    pub ci: ConfidenceInterval,
}

impl fmt::Display for MonteCarloEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P(G({}, {}) connected) ≈ {:.5} ± {:.5} {} over {} trials",
            self.n, self.p, self.probability, self.std_error, self.ci, self.trials
        )
    }
}

/// Sampling estimator of the connectivity probability.
#[derive(Debug, Clone)]
pub struct MonteCarloEstimator {
    config: MonteCarloConfig,
    seed: u64,
}

impl Default for MonteCarloEstimator {
    fn default() -> Self {
        Self::new(MonteCarloConfig::default())
    }
}

impl MonteCarloEstimator {
    pub fn new(config: MonteCarloConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self { config, seed }
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// The seed all evaluations replay.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Estimates `P(n, p)` with the configured number of trials.
    pub fn estimate(&self, n: usize, p: f64) -> Result<MonteCarloEstimate> {
        self.estimate_with_trials(n, p, self.config.trials)
    }

    /// Estimates `P(n, p)` from exactly `trials` samples.
    pub fn estimate_with_trials(&self, n: usize, p: f64, trials: usize) -> Result<MonteCarloEstimate> {
        EstimationRequest::new(n, p)?;
        if trials == 0 {
            return Err(Error::invalid("trials", "number of trials must be positive"));
        }

        let chunk_size = if self.config.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.config.chunk_size
        };
        let n_chunks = trials.div_ceil(chunk_size);

        debug!(
            "estimate(n = {}, p = {}, trials = {}, chunks = {}, model = {})",
            n, p, trials, n_chunks, self.config.model
        );

        let connected: u64 = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * chunk_size;
                let end = (start + chunk_size).min(trials);
                self.run_chunk(n, p, chunk as u64, end - start)
            })
            .sum();

        let ci = wilson_interval(connected, trials as u64, self.config.confidence)?;

        Ok(MonteCarloEstimate {
            n,
            p,
            trials,
            connected,
            probability: connected as f64 / trials as f64,
            std_error: proportion_std_error(connected, trials as u64),
            ci,
        })
    }

    fn run_chunk(&self, n: usize, p: f64, chunk: u64, len: usize) -> u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(chunk);

        let sampler = GraphSampler::new(self.config.model);
        let mut graph = Graph::new(n);
        let mut traversal = Traversal::default();

        let mut connected = 0;
        for _ in 0..len {
            sampler.sample_into(&mut graph, n, p, &mut rng);
            if traversal.is_connected(&graph) {
                connected += 1;
            }
        }
        connected
    }
}

/// Estimates `P(n, p)` from `trials` samples with a fresh random seed.
pub fn connected_probability(n: usize, p: f64, trials: usize) -> Result<f64> {
    let estimator = MonteCarloEstimator::new(MonteCarloConfig::new(trials));
    Ok(estimator.estimate(n, p)?.probability)
}
