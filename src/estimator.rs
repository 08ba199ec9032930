//! Estimator abstraction and explicit estimator selection.
//!
//! The inverter only needs `P(n, p)` as a function of `p`, so both estimators
//! implement [`ConnectivityEstimator`]. [`EstimatorKind`] names an estimator
//! together with its configuration; [`Estimator`] is the built instance.

use crate::error::Result;
use crate::exact::{ExactConfig, ExactEstimator};
use crate::monte_carlo::{MonteCarloConfig, MonteCarloEstimator};

/// Forward query `(n, p) -> P(G(n, p) is connected)`.
pub trait ConnectivityEstimator {
    fn connected_probability(&mut self, n: usize, p: f64) -> Result<f64>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl ConnectivityEstimator for ExactEstimator {
    fn connected_probability(&mut self, n: usize, p: f64) -> Result<f64> {
        ExactEstimator::connected_probability(self, n, p)
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

impl ConnectivityEstimator for MonteCarloEstimator {
    fn connected_probability(&mut self, n: usize, p: f64) -> Result<f64> {
        Ok(self.estimate(n, p)?.probability)
    }

    fn name(&self) -> &'static str {
        "monte-carlo"
    }
}

/// Which estimator to use, with its configuration.
#[derive(Debug, Clone)]
pub enum EstimatorKind {
    Exact(ExactConfig),
    MonteCarlo(MonteCarloConfig),
}

impl Default for EstimatorKind {
    fn default() -> Self {
        EstimatorKind::Exact(ExactConfig::default())
    }
}

/// A built estimator of either kind.
pub enum Estimator {
    Exact(ExactEstimator),
    MonteCarlo(MonteCarloEstimator),
}

impl Estimator {
    pub fn new(kind: EstimatorKind) -> Self {
        match kind {
            EstimatorKind::Exact(config) => Estimator::Exact(ExactEstimator::new(config)),
            EstimatorKind::MonteCarlo(config) => Estimator::MonteCarlo(MonteCarloEstimator::new(config)),
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(EstimatorKind::default())
    }
}

impl From<ExactEstimator> for Estimator {
    fn from(estimator: ExactEstimator) -> Self {
        Estimator::Exact(estimator)
    }
}

impl From<MonteCarloEstimator> for Estimator {
    fn from(estimator: MonteCarloEstimator) -> Self {
        Estimator::MonteCarlo(estimator)
    }
}

impl ConnectivityEstimator for Estimator {
    fn connected_probability(&mut self, n: usize, p: f64) -> Result<f64> {
        match self {
            Estimator::Exact(e) => ConnectivityEstimator::connected_probability(e, n, p),
            Estimator::MonteCarlo(e) => ConnectivityEstimator::connected_probability(e, n, p),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Estimator::Exact(e) => e.name(),
            Estimator::MonteCarlo(e) => e.name(),
        }
    }
}

/// One-shot forward query with the selected estimator.
pub fn connected_probability(kind: &EstimatorKind, n: usize, p: f64) -> Result<f64> {
    Estimator::new(kind.clone()).connected_probability(n, p)
}
