//! # gnp-rs: connectivity of Erdős–Rényi random graphs
//!
//! **`gnp-rs`** computes the probability that a random graph G(N, p) is connected,
//! where each of the `N(N-1)/2` possible edges is present independently with
//! probability `p`, and inverts it: for a target probability, it finds the edge
//! probability at which G(N, p) becomes connected that often.
//!
//! ## Estimators
//!
//! - **Exact**: a memoized recurrence over the size of the component containing
//!   vertex `0`, evaluated in log space. See [`exact`]. Where the recurrence
//!   cancels catastrophically it falls back to the exploration process in
//!   [`exploration`].
//! - **Monte Carlo**: the fraction of sampled graphs that are connected, in
//!   parallel and with reproducible seeds. See [`monte_carlo`].
//!
//! Both implement [`ConnectivityEstimator`][crate::estimator::ConnectivityEstimator],
//! the only thing the inverter needs.
//!
//! ## Inversion
//!
//! [`find_p`][crate::invert::find_p] solves `P(N, p) = target` for `p` with either
//! a fixed-step linear scan or Brent's method. See [`invert`].
//!
//! ## Quick Start
//!
//! ```rust
//! use gnp_rs::exact::ExactEstimator;
//! use gnp_rs::invert::{find_p, SearchStrategy};
//!
//! let mut exact = ExactEstimator::default();
//!
//! // P(G(4, 1/2) is connected) = 38/64
//! let prob = exact.connected_probability(4, 0.5)?;
//! assert!((prob - 38.0 / 64.0).abs() < 1e-12);
//!
//! // Edge probability at which G(20, p) is connected half of the time
//! let p = find_p(&mut exact, 20, 0.5, &SearchStrategy::brent())?;
//! assert!((exact.connected_probability(20, p)? - 0.5).abs() < 1e-6);
//! # Ok::<(), gnp_rs::error::Error>(())
//! ```
//!
//! ## Other Components
//!
//! - **[`counting`]**: exact counts of connected labeled graphs (arbitrary precision).
//! - **[`approx`]**: the isolated-vertex approximation `exp(-N (1-p)^(N-1))`.
//! - **[`curve`]**: `f(N)` series for plotting.

pub mod approx;
pub mod cache;
pub mod counting;
pub mod curve;
pub mod error;
pub mod estimator;
pub mod exact;
pub mod exploration;
pub mod graph;
pub mod invert;
pub mod monte_carlo;
pub mod stats;
pub mod types;
pub mod utils;
