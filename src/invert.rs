//! Inverse query: the edge probability that achieves a target connectivity.
//!
//! Given an estimator and a target `t ∈ (0, 1)`, find `p ∈ [0, 1]` with
//! `P(n, p) = t`. Both strategies rely on `P(n, ·)` being non-decreasing in
//! `p`; neither checks it.
//!
//! | Strategy | Evaluations | Resolution | Failure |
//! |----------|-------------|------------|---------|
//! | [`SearchStrategy::LinearScan`] | up to `1 / step` | `step` | [`Error::InversionUnreachable`] |
//! | [`SearchStrategy::Brent`] | `O(log(1 / xtol))` typical | `xtol + rtol·p` | [`Error::RootNotBracketed`], [`Error::NoConvergence`] |
//!
//! The linear scan returns the first grid point `k · step` whose probability
//! reaches the target, so it overshoots the true root by less than one step.
//! Brent's method works on `f(p) = P(n, p) - t` over `[0, 1]` and combines
//! inverse quadratic interpolation, secant steps and bisection.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::estimator::ConnectivityEstimator;
use crate::types::InversionRequest;

/// Default grid step of the linear scan.
pub const DEFAULT_STEP: f64 = 0.01;

/// Configuration of the linear scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScanConfig {
    /// Grid spacing, in `(0, 1]`
    pub step: f64,
}

impl LinearScanConfig {
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    fn validate(&self) -> Result<()> {
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(Error::invalid("step", format!("scan step must be in (0, 1], got {}", self.step)));
        }
        Ok(())
    }
}

impl Default for LinearScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

/// Configuration of Brent's method.
///
/// The search stops once the bracket half-width drops below
/// `(xtol + rtol · |x|) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentConfig {
    /// Absolute tolerance
    pub xtol: f64,
    /// Relative tolerance
    pub rtol: f64,
    /// Iteration cap
    pub max_iterations: usize,
}

impl BrentConfig {
    /// Set the absolute tolerance.
    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.xtol = xtol;
        self
    }

    /// Set the relative tolerance.
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.xtol > 0.0) {
            return Err(Error::invalid("xtol", format!("must be positive, got {}", self.xtol)));
        }
        if !(self.rtol >= 0.0) {
            return Err(Error::invalid("rtol", format!("must be non-negative, got {}", self.rtol)));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("max_iterations", "must be positive"));
        }
        Ok(())
    }
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

/// How to search for `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStrategy {
    LinearScan(LinearScanConfig),
    Brent(BrentConfig),
}

impl SearchStrategy {
    /// Linear scan with the default step.
    pub fn linear_scan() -> Self {
        SearchStrategy::LinearScan(LinearScanConfig::default())
    }

    /// Brent's method with the default tolerances.
    pub fn brent() -> Self {
        SearchStrategy::Brent(BrentConfig::default())
    }
}

impl Default for SearchStrategy {
    fn default() -> Self {
        Self::brent()
    }
}

/// A located root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Abscissa of the root
    pub x: f64,
    /// Number of objective evaluations spent
    pub evaluations: usize,
}

/// Finds `p` such that `estimator(n, p) ≈ target`.
pub fn find_p<E>(estimator: &mut E, n: usize, target: f64, strategy: &SearchStrategy) -> Result<f64>
where
    E: ConnectivityEstimator + ?Sized,
{
    let request = InversionRequest::new(n, target)?;
    Ok(invert(estimator, request, strategy)?.x)
}

/// Solves a validated inverse query and reports the search cost.
pub fn invert<E>(estimator: &mut E, request: InversionRequest, strategy: &SearchStrategy) -> Result<Root>
where
    E: ConnectivityEstimator + ?Sized,
{
    debug!("invert({}) with {} estimator, {:?}", request, estimator.name(), strategy);
    let root = match strategy {
        SearchStrategy::LinearScan(config) => linear_scan(estimator, request, config)?,
        SearchStrategy::Brent(config) => brent_search(estimator, request, config)?,
    };
    debug!("invert({}) -> p = {} after {} evaluations", request, root.x, root.evaluations);
    Ok(root)
}

/// First grid point `k · step` (clamped to 1) where the estimate reaches the target.
pub fn linear_scan<E>(estimator: &mut E, request: InversionRequest, config: &LinearScanConfig) -> Result<Root>
where
    E: ConnectivityEstimator + ?Sized,
{
    config.validate()?;
    let (n, target) = (request.n(), request.target());

    let mut k: usize = 0;
    loop {
        // Grid points are computed from `k`, not accumulated, to avoid drift.
        let p = (k as f64 * config.step).min(1.0);
        let value = estimator.connected_probability(n, p)?;
        trace!("linear_scan: P({}, {}) = {}", n, p, value);

        if value >= target {
            return Ok(Root { x: p, evaluations: k + 1 });
        }
        if p >= 1.0 {
            return Err(Error::InversionUnreachable { n, target, max: value });
        }
        k += 1;
    }
}

/// Brent's method on `f(p) = estimator(n, p) - target` over `[0, 1]`.
pub fn brent_search<E>(estimator: &mut E, request: InversionRequest, config: &BrentConfig) -> Result<Root>
where
    E: ConnectivityEstimator + ?Sized,
{
    let (n, target) = (request.n(), request.target());
    brentq(|p| Ok(estimator.connected_probability(n, p)? - target), 0.0, 1.0, config)
}

/// Finds a zero of `f` in `[a, b]`, where `f(a)` and `f(b)` differ in sign.
///
/// Keeps a bracketing pair `(xcur, xblk)` with `f(xcur)` the smaller in
/// magnitude, and proposes an interpolation step (secant, or inverse quadratic
/// when three distinct points are available). The step is accepted only if it
/// is small compared to the previous step and the bisection step; otherwise the
/// bracket is bisected.
pub fn brentq<F>(mut f: F, a: f64, b: f64, config: &BrentConfig) -> Result<Root>
where
    F: FnMut(f64) -> Result<f64>,
{
    config.validate()?;

    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre)?;
    let mut fcur = f(xcur)?;
    let mut evaluations = 2;

    if fpre * fcur > 0.0 {
        return Err(Error::RootNotBracketed { f_lo: fpre, f_hi: fcur });
    }
    if fpre == 0.0 {
        return Ok(Root { x: xpre, evaluations });
    }
    if fcur == 0.0 {
        return Ok(Root { x: xcur, evaluations });
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iteration in 0..config.max_iterations {
        if fpre * fcur < 0.0 {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.xtol + config.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            trace!("brentq: converged at {} after {} iterations", xcur, iteration);
            return Ok(Root { x: xcur, evaluations });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = f(xcur)?;
        evaluations += 1;
        trace!("brentq: iteration {}: f({}) = {}", iteration, xcur, fcur);
    }

    Err(Error::NoConvergence {
        iterations: config.max_iterations,
        best: xcur,
    })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::exact::{self, ExactEstimator};

    /// An estimator that never exceeds `cap`.
    struct Capped {
        cap: f64,
    }

    impl ConnectivityEstimator for Capped {
        fn connected_probability(&mut self, _n: usize, p: f64) -> Result<f64> {
            Ok(self.cap * p)
        }

        fn name(&self) -> &'static str {
            "capped"
        }
    }

    #[test]
    fn test_brentq_polynomial() {
        let root = brentq(|x| Ok(x * x - 0.25), 0.0, 1.0, &BrentConfig::default()).unwrap();
        assert!((root.x - 0.5).abs() < 1e-11);
    }

    #[test]
    fn test_brentq_transcendental() {
        let root = brentq(|x| Ok(x.cos() - x), 0.0, 1.0, &BrentConfig::default()).unwrap();
        assert!((root.x - 0.739_085_133_215_160_6).abs() < 1e-11);
        assert!(root.evaluations < 20, "{} evaluations", root.evaluations);
    }

    #[test]
    fn test_brentq_endpoint_root() {
        let root = brentq(|x| Ok(x), 0.0, 1.0, &BrentConfig::default()).unwrap();
        assert_eq!(root.x, 0.0);
        assert_eq!(root.evaluations, 2);

        let root = brentq(|x| Ok(x - 1.0), 0.0, 1.0, &BrentConfig::default()).unwrap();
        assert_eq!(root.x, 1.0);
    }

    #[test]
    fn test_brentq_not_bracketed() {
        let err = brentq(|x| Ok(x + 1.0), 0.0, 1.0, &BrentConfig::default()).unwrap_err();
        assert_eq!(err, Error::RootNotBracketed { f_lo: 1.0, f_hi: 2.0 });
    }

    #[test]
    fn test_brentq_iteration_cap() {
        let config = BrentConfig::default().with_max_iterations(2);
        let err = brentq(|x| Ok(x.cos() - x), 0.0, 1.0, &config).unwrap_err();
        assert!(matches!(err, Error::NoConvergence { iterations: 2, .. }));
    }

    #[test]
    fn test_brentq_propagates_errors() {
        let err = brentq(|_| Err(Error::invalid("p", "boom")), 0.0, 1.0, &BrentConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "p", .. }));
    }

    #[test]
    fn test_brentq_invalid_config() {
        assert!(brentq(|x| Ok(x - 0.5), 0.0, 1.0, &BrentConfig::default().with_xtol(0.0)).is_err());
        assert!(brentq(|x| Ok(x - 0.5), 0.0, 1.0, &BrentConfig::default().with_rtol(-1.0)).is_err());
        assert!(brentq(|x| Ok(x - 0.5), 0.0, 1.0, &BrentConfig::default().with_max_iterations(0)).is_err());
    }

    #[test]
    fn test_brent_three_vertices() {
        // P(3, p) = 3p^2 - 2p^3 = 1/2 at p = 1/2
        let mut exact = ExactEstimator::default();
        let p = find_p(&mut exact, 3, 0.5, &SearchStrategy::brent()).unwrap();
        assert!((p - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_brent_round_trip() {
        let mut exact = ExactEstimator::default();
        for n in [4, 8, 15] {
            for target in [0.2, 0.5, 0.9] {
                let p = find_p(&mut exact, n, target, &SearchStrategy::brent()).unwrap();
                let back = exact::connected_probability(n, p).unwrap();
                assert!((back - target).abs() < 1e-9, "n = {}, target = {}: p = {}, P = {}", n, target, p, back);
            }
        }
    }

    #[test]
    fn test_linear_scan_three_vertices() {
        let mut exact = ExactEstimator::default();
        // P(3, 0.46) = 0.4401, P(3, 0.47) = 0.4551
        let p = find_p(&mut exact, 3, 0.45, &SearchStrategy::linear_scan()).unwrap();
        assert!((p - 0.47).abs() < 1e-9, "p = {}", p);
    }

    #[test]
    fn test_linear_scan_first_crossing() {
        let mut exact = ExactEstimator::default();
        let request = InversionRequest::new(10, 0.5).unwrap();
        let root = linear_scan(&mut exact, request, &LinearScanConfig::default()).unwrap();

        assert!(exact.connected_probability(10, root.x).unwrap() >= 0.5);
        assert!(exact.connected_probability(10, root.x - 0.01).unwrap() < 0.5);
        assert_eq!(root.evaluations, (root.x / 0.01).round() as usize + 1);
    }

    #[test]
    fn test_brent_cheaper_than_linear_scan() {
        let mut exact = ExactEstimator::default();
        let request = InversionRequest::new(12, 0.8).unwrap();
        let scan = linear_scan(&mut exact, request, &LinearScanConfig::default()).unwrap();
        let brent = brent_search(&mut exact, request, &BrentConfig::default()).unwrap();
        assert!(brent.evaluations < scan.evaluations);
        assert!((scan.x - brent.x).abs() <= 0.01 + 1e-12);
    }

    #[test]
    fn test_unreachable_target() {
        let mut capped = Capped { cap: 0.4 };
        let err = find_p(&mut capped, 5, 0.5, &SearchStrategy::linear_scan()).unwrap_err();
        assert_eq!(
            err,
            Error::InversionUnreachable {
                n: 5,
                target: 0.5,
                max: 0.4
            }
        );

        let err = find_p(&mut capped, 5, 0.5, &SearchStrategy::brent()).unwrap_err();
        assert!(matches!(err, Error::RootNotBracketed { .. }));
    }

    #[test]
    fn test_single_vertex() {
        // P(1, p) = 1 everywhere: the scan stops at once, Brent has no sign change.
        let mut exact = ExactEstimator::default();
        assert_eq!(find_p(&mut exact, 1, 0.5, &SearchStrategy::linear_scan()).unwrap(), 0.0);
        assert!(matches!(
            find_p(&mut exact, 1, 0.5, &SearchStrategy::brent()),
            Err(Error::RootNotBracketed { .. })
        ));
    }

    #[test]
    fn test_invalid_request() {
        let mut exact = ExactEstimator::default();
        for target in [0.0, 1.0, -0.2, 1.2, f64::NAN] {
            assert!(find_p(&mut exact, 5, target, &SearchStrategy::brent()).is_err());
        }
        assert!(find_p(&mut exact, 0, 0.5, &SearchStrategy::brent()).is_err());

        let zero_step = SearchStrategy::LinearScan(LinearScanConfig::new(0.0));
        assert!(matches!(
            find_p(&mut exact, 5, 0.5, &zero_step),
            Err(Error::InvalidArgument { name: "step", .. })
        ));
    }
}
