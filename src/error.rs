//! Error taxonomy shared by the estimators and the inverter.

/// Errors produced by forward and inverse connectivity queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An argument is outside its valid domain.
    ///
    /// Raised for `N < 1`, an edge probability outside `[0, 1]`, a target
    /// probability outside `(0, 1)`, or an unusable configuration value.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// The objective does not change sign on `[0, 1]`.
    #[error("root is not bracketed on [0, 1]: f(0) = {f_lo}, f(1) = {f_hi}")]
    RootNotBracketed {
        /// Objective value at the lower end.
        f_lo: f64,
        /// Objective value at the upper end.
        f_hi: f64,
    },

    /// An intermediate exact probability left `[0, 1]` beyond the tolerance, or
    /// came out of `1 - Σ` with too few correct digits.
    #[error("numerical instability at N = {n}, p = {p}: intermediate probability {value} is not accurate")]
    NumericalInstability {
        /// Vertex count at which the check failed.
        n: usize,
        /// Edge probability of the query.
        p: f64,
        /// The offending value.
        value: f64,
    },

    /// The linear scan reached `p = 1` without hitting the target.
    #[error("target probability {target} is unreachable for N = {n}: P(N, 1) = {max}")]
    InversionUnreachable {
        /// Vertex count.
        n: usize,
        /// Requested target probability.
        target: f64,
        /// Probability attained at `p = 1`.
        max: f64,
    },

    /// Brent's method exhausted its iteration budget.
    #[error("root search did not converge within {iterations} iterations (best p = {best})")]
    NoConvergence {
        /// Iterations performed.
        iterations: usize,
        /// Best abscissa found so far.
        best: f64,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
