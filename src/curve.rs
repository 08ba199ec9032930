//! Series over the number of vertices, for plotting.

use log::info;

use crate::error::Result;
use crate::estimator::ConnectivityEstimator;
use crate::invert::{find_p, SearchStrategy};

/// `f(N)`: the edge probability at which `P(N, p) = target`, for each `N` in `ns`.
pub fn threshold_curve<E>(
    estimator: &mut E,
    ns: impl IntoIterator<Item = usize>,
    target: f64,
    strategy: &SearchStrategy,
) -> Result<Vec<(usize, f64)>>
where
    E: ConnectivityEstimator + ?Sized,
{
    let mut curve = Vec::new();
    for n in ns {
        let p = find_p(estimator, n, target, strategy)?;
        info!("f({}) = {:.6}", n, p);
        curve.push((n, p));
    }
    Ok(curve)
}

/// `P(N, p)` at a fixed `p`, for each `N` in `ns`.
pub fn probability_curve<E>(
    estimator: &mut E,
    ns: impl IntoIterator<Item = usize>,
    p: f64,
) -> Result<Vec<(usize, f64)>>
where
    E: ConnectivityEstimator + ?Sized,
{
    ns.into_iter()
        .map(|n| Ok((n, estimator.connected_probability(n, p)?)))
        .collect()
}
