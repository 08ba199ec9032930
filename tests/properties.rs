//! End-to-end properties of the estimators and the inverter.
//!
//! Tests cover value ranges, monotonicity, agreement between the exact and
//! sampling estimators, inversion round trips, and the traversal extremes.

use gnp_rs::approx;
use gnp_rs::counting;
use gnp_rs::estimator::{ConnectivityEstimator, Estimator, EstimatorKind};
use gnp_rs::exact::{self, ExactEstimator};
use gnp_rs::exploration::connected_probability_by_exploration;
use gnp_rs::graph::{Graph, Traversal};
use gnp_rs::invert::{find_p, SearchStrategy};
use gnp_rs::monte_carlo::{MonteCarloConfig, MonteCarloEstimator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

// ─── Exact Estimator ───────────────────────────────────────────────────────────

#[test]
fn exact_in_unit_interval() {
    let mut exact = ExactEstimator::default();
    for n in 1..=40 {
        for k in 0..=20 {
            let p = k as f64 / 20.0;
            let value = exact.connected_probability(n, p).unwrap();
            assert!((0.0..=1.0).contains(&value), "P({}, {}) = {}", n, p, value);
        }
    }
}

#[test]
fn exact_base_cases() {
    let mut exact = ExactEstimator::default();
    for &p in &[0.0, 0.25, 0.5, 1.0] {
        assert_eq!(exact.connected_probability(1, p).unwrap(), 1.0);
        assert_eq!(exact.connected_probability(2, p).unwrap(), p);
    }
}

#[test]
fn exact_monotone_in_p() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut exact = ExactEstimator::default();
    for _ in 0..500 {
        let n = rng.random_range(1..=12);
        let a: f64 = rng.random_range(0.0..=1.0);
        let b: f64 = rng.random_range(0.0..=1.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = exact.connected_probability(n, lo).unwrap();
        let p_hi = exact.connected_probability(n, hi).unwrap();
        assert!(p_lo <= p_hi + 1e-9, "P({}, {}) = {} > P({}, {}) = {}", n, lo, p_lo, n, hi, p_hi);
    }
}

#[test]
fn exact_matches_counting() {
    let expected = [1u64, 1, 4, 38, 728, 26704];
    let counts = counting::connected_graph_counts(6).unwrap();
    for (count, want) in counts.iter().zip(expected) {
        assert_eq!(*count, num_bigint::BigUint::from(want));
    }

    for n in 1..=10 {
        for p in PS {
            let a = exact::connected_probability(n, p).unwrap();
            let b = counting::connected_probability_by_counting(n, p).unwrap();
            assert!((a - b).abs() < 1e-10, "n = {}, p = {}: {} vs {}", n, p, a, b);
        }
    }
}

// ─── Monte Carlo Estimator ─────────────────────────────────────────────────────

#[test]
fn monte_carlo_agrees_with_exact() {
    let mc = MonteCarloEstimator::new(MonteCarloConfig::new(100_000).with_seed(12345));
    for n in 2..=8 {
        for p in PS {
            let estimate = mc.estimate(n, p).unwrap();
            let want = exact::connected_probability(n, p).unwrap();
            assert!(
                (estimate.probability - want).abs() < 0.02,
                "n = {}, p = {}: {} vs exact {}",
                n,
                p,
                estimate,
                want
            );
        }
    }
}

#[test]
fn monte_carlo_reproducible() {
    let config = MonteCarloConfig::new(30_000).with_seed(77);
    let a = MonteCarloEstimator::new(config.clone()).estimate(9, 0.3).unwrap();
    let b = MonteCarloEstimator::new(config).estimate(9, 0.3).unwrap();
    assert_eq!(a.connected, b.connected);
}

#[test]
fn monte_carlo_monotone_in_p() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mc = MonteCarloEstimator::new(MonteCarloConfig::new(2_000).with_seed(5));
    for _ in 0..50 {
        let n = rng.random_range(2..=10);
        let a: f64 = rng.random_range(0.0..=1.0);
        let b: f64 = rng.random_range(0.0..=1.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c_lo = mc.estimate(n, lo).unwrap().connected;
        let c_hi = mc.estimate(n, hi).unwrap().connected;
        assert!(c_lo <= c_hi, "n = {}: {} connected at p = {}, {} at p = {}", n, c_lo, lo, c_hi, hi);
    }
}

// ─── Inversion ─────────────────────────────────────────────────────────────────

#[test]
fn inversion_round_trip() {
    let mut exact = ExactEstimator::default();
    for n in [3, 5, 10, 20] {
        for target in [0.3, 0.5, 0.8] {
            let p = find_p(&mut exact, n, target, &SearchStrategy::brent()).unwrap();
            let back = exact.connected_probability(n, p).unwrap();
            assert!((back - target).abs() < 1e-3, "n = {}, target = {}: P({}) = {}", n, target, p, back);
        }
    }
}

#[test]
fn linear_scan_agrees_with_brent() {
    let mut exact = ExactEstimator::default();
    for n in [3, 5, 10, 20, 40] {
        for target in [0.1, 0.3, 0.5, 0.8, 0.95] {
            let scan = find_p(&mut exact, n, target, &SearchStrategy::linear_scan()).unwrap();
            let brent = find_p(&mut exact, n, target, &SearchStrategy::brent()).unwrap();
            assert!((scan - brent).abs() <= 0.01 + 1e-9, "n = {}, target = {}: {} vs {}", n, target, scan, brent);
            // The scan returns the first grid point at or past the root.
            assert!(scan >= brent - 1e-9);
        }
    }
}

#[test]
fn inversion_boundaries() {
    let mut exact = ExactEstimator::default();
    // (N, f(N) at 0.999, f(N) at 0.001)
    let cases = [(3, 0.981630, 0.018370), (5, 0.881680, 0.056506), (8, 0.723149, 0.074059)];
    for (n, high_want, low_want) in cases {
        let high = find_p(&mut exact, n, 0.999, &SearchStrategy::brent()).unwrap();
        assert!((high - high_want).abs() < 1e-5, "f({}) at 0.999 = {}", n, high);
        assert!((exact.connected_probability(n, high).unwrap() - 0.999).abs() < 1e-9);

        let low = find_p(&mut exact, n, 1e-3, &SearchStrategy::brent()).unwrap();
        assert!((low - low_want).abs() < 1e-5, "f({}) at 0.001 = {}", n, low);
        assert!((exact.connected_probability(n, low).unwrap() - 1e-3).abs() < 1e-11);
    }
}

#[test]
fn inversion_at_tiny_target() {
    let mut exact = ExactEstimator::default();
    let p = find_p(&mut exact, 35, 1e-8, &SearchStrategy::brent()).unwrap();
    assert!((p - 0.026404402).abs() < 1e-8, "f(35) at 1e-8 = {}", p);

    let value = connected_probability_by_exploration(35, p).unwrap();
    assert!((value - 1e-8).abs() < 1e-14, "P(35, {}) = {:e}", p, value);
}

#[test]
fn inversion_with_monte_carlo() {
    let mut exact = ExactEstimator::default();
    let mut mc = Estimator::new(EstimatorKind::MonteCarlo(MonteCarloConfig::new(20_000).with_seed(31)));
    assert_eq!(mc.name(), "monte-carlo");

    let want = find_p(&mut exact, 10, 0.5, &SearchStrategy::brent()).unwrap();
    let got = find_p(&mut mc, 10, 0.5, &SearchStrategy::linear_scan()).unwrap();
    assert!((got - want).abs() < 0.02, "{} vs exact {}", got, want);
}

#[test]
fn threshold_decreases_with_n() {
    let mut exact = ExactEstimator::default();
    let mut last = 1.0;
    for n in (10..=100).step_by(10) {
        let p = find_p(&mut exact, n, 0.5, &SearchStrategy::brent()).unwrap();
        assert!(p < last);
        last = p;

        if n >= 40 {
            let rough = approx::threshold_approx(n, 0.5).unwrap();
            assert!((p - rough).abs() < 0.1 * p, "n = {}: {} vs approx {}", n, p, rough);
        }
    }
}

// ─── Traversal ─────────────────────────────────────────────────────────────────

#[test]
fn complete_graph_connected() {
    let mut traversal = Traversal::default();
    for n in 1..=30 {
        assert!(traversal.is_connected(&Graph::complete(n)), "n = {}", n);
    }
}

#[test]
fn empty_graph_disconnected() {
    let mut traversal = Traversal::default();
    assert!(traversal.is_connected(&Graph::new(1)));
    for n in 2..=30 {
        assert!(!traversal.is_connected(&Graph::new(n)), "n = {}", n);
    }
}
