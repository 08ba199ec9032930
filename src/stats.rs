//! Interval estimates for Monte Carlo proportions.
//!
//! A Monte Carlo connectivity estimate is a binomial proportion `p̂ = k / n`.
//! Its standard error is `sqrt(p̂(1 - p̂) / n)`; the confidence interval uses
//! the Wilson score construction, which stays inside `[0, 1]` and does not
//! collapse to a point when `p̂` is `0` or `1`.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Error, Result};

/// A confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64, confidence: f64) -> Self {
        Self { lower, upper, confidence }
    }

    /// Interval width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is within the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl std::fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.4}, {:.4}] ({:.0}% CI)", self.lower, self.upper, self.confidence * 100.0)
    }
}

/// Checks that `confidence` lies in `(0, 1)`.
pub fn check_confidence(confidence: f64) -> Result<()> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(Error::invalid(
            "confidence",
            format!("confidence level must be in (0, 1), got {}", confidence),
        ));
    }
    Ok(())
}

/// Two-sided standard normal quantile for the given confidence level.
pub fn z_score(confidence: f64) -> Result<f64> {
    check_confidence(confidence)?;
    let alpha = 1.0 - confidence;
    Ok(Normal::standard().inverse_cdf(1.0 - alpha / 2.0))
}

/// Standard error of a binomial proportion.
pub fn proportion_std_error(successes: u64, trials: u64) -> f64 {
    if trials == 0 {
        return f64::NAN;
    }
    let p = successes as f64 / trials as f64;
    (p * (1.0 - p) / trials as f64).sqrt()
}

/// Wilson score interval for `successes` out of `trials`.
pub fn wilson_interval(successes: u64, trials: u64, confidence: f64) -> Result<ConfidenceInterval> {
    if trials == 0 {
        return Err(Error::invalid("trials", "must be positive"));
    }
    if successes > trials {
        return Err(Error::invalid(
            "successes",
            format!("{} successes out of {} trials", successes, trials),
        ));
    }

    let z = z_score(confidence)?;
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;

    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let margin = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    Ok(ConfidenceInterval::new(
        (center - margin).max(0.0),
        (center + margin).min(1.0),
        confidence,
    ))
}
