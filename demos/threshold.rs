use std::time::Instant;

use clap::{Parser, ValueEnum};

use gnp_rs::approx;
use gnp_rs::curve::{probability_curve, threshold_curve};
use gnp_rs::exact::ExactEstimator;
use gnp_rs::invert::{invert, SearchStrategy};
use gnp_rs::monte_carlo::{MonteCarloConfig, MonteCarloEstimator};
use gnp_rs::types::InversionRequest;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print f(N) from every estimator and strategy.
    Curve,
    /// Time the linear scan against Brent's method.
    Timing,
    /// Mean round-trip error |P(N, f(N)) - target|.
    Error,
    /// Print P(N, p) for a fixed p.
    Probability,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// What to compute.
    #[arg(value_enum, default_value = "curve")]
    mode: Mode,

    /// Smallest number of vertices.
    #[clap(long, value_name = "INT", default_value = "2")]
    from: usize,

    /// Largest number of vertices.
    #[clap(long, value_name = "INT", default_value = "40")]
    to: usize,

    /// Target probability of being connected.
    #[clap(long, value_name = "FLOAT", default_value = "0.5")]
    target: f64,

    /// Edge probability for `probability` mode.
    #[clap(short, value_name = "FLOAT", default_value = "0.5")]
    p: f64,

    /// Monte Carlo trials per estimate (0 to skip Monte Carlo).
    #[clap(long, value_name = "INT", default_value = "20000")]
    trials: usize,

    /// Monte Carlo seed.
    #[clap(long, value_name = "INT")]
    seed: Option<u64>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let ns = args.from..=args.to;
    let mut exact = ExactEstimator::default();

    match args.mode {
        Mode::Curve => {
            let brent = threshold_curve(&mut exact, ns.clone(), args.target, &SearchStrategy::brent())?;
            let scan = threshold_curve(&mut exact, ns.clone(), args.target, &SearchStrategy::linear_scan())?;

            let mc = if args.trials > 0 {
                let mut config = MonteCarloConfig::new(args.trials);
                config.seed = args.seed;
                let mut mc = MonteCarloEstimator::new(config);
                println!("Monte Carlo seed = {}", mc.seed());
                Some(threshold_curve(&mut mc, ns.clone(), args.target, &SearchStrategy::linear_scan())?)
            } else {
                None
            };

            println!("f(N) = p such that P(G(N, p) connected) = {}", args.target);
            for (i, &(n, p)) in brent.iter().enumerate() {
                let rough = approx::threshold_approx(n, args.target)?;
                print!("N={:>4} | brent={:.6} | scan={:.2} | approx={:.6}", n, p, scan[i].1, rough);
                if let Some(mc) = &mc {
                    print!(" | monte-carlo={:.2}", mc[i].1);
                }
                println!();
            }
        }
        Mode::Timing => {
            for strategy in [SearchStrategy::linear_scan(), SearchStrategy::brent()] {
                let mut estimator = ExactEstimator::default();
                let start = Instant::now();
                let mut evaluations = 0;
                for n in ns.clone() {
                    let root = invert(&mut estimator, InversionRequest::new(n, args.target)?, &strategy)?;
                    evaluations += root.evaluations;
                }
                println!(
                    "{:?}: {} evaluations in {:.3} s",
                    strategy,
                    evaluations,
                    start.elapsed().as_secs_f64()
                );
            }
        }
        Mode::Error => {
            let curve = threshold_curve(&mut exact, ns, args.target, &SearchStrategy::brent())?;
            let mut sum = 0.0;
            for &(n, p) in &curve {
                sum += (exact.connected_probability(n, p)? - args.target).abs();
            }
            println!("Mean round-trip error: {:e}", sum / curve.len().max(1) as f64);
        }
        Mode::Probability => {
            let curve = probability_curve(&mut exact, ns, args.p)?;
            for (n, value) in curve {
                let rough = approx::connected_probability_approx(n, args.p)?;
                println!("N={:>4} | P={:.6} | approx={:.6}", n, value, rough);
            }
        }
    }

    println!("cache: {}", exact.cache());
    println!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
