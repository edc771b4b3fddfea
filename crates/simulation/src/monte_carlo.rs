//! Bootstrap Monte Carlo over empirical trade returns.
//!
//! A batch draws many independent trajectories from the same return sample,
//! compounds each under a fixed stake fraction and summarizes the spread of
//! drawdowns and final returns. A sweep repeats the batch across stake
//! fractions to trace the risk/return frontier.

use crate::config::{BootstrapConfig, check_stake_fraction};
use crate::equity::EquityCurve;
use crate::error::SimulationError;
use crate::resample::{BootstrapResampler, ReturnPathGenerator};
use crate::rng::derive_seed;
use crate::summary::{BatchSummary, FractionSummary, TrialOutcome};
use pma_domain::value_objects::return_sample::ReturnSample;
use rayon::prelude::*;
use tracing::{debug, info};

/// Salt separating sweep batch seeds from the primary batch's trial seeds.
const SWEEP_STREAM: u64 = 0x5357_4545_5000_0000;

/// Runs one trajectory from `generator` and measures it.
pub fn simulate_trial<G: ReturnPathGenerator>(
    generator: &mut G,
    trades_per_run: usize,
    stake_fraction: f64,
    keep_trajectory: bool,
) -> TrialOutcome {
    let draws = generator.generate(trades_per_run);
    let curve = EquityCurve::compound(&draws, stake_fraction);
    TrialOutcome {
        max_drawdown: curve.max_drawdown(),
        final_return: curve.final_return(),
        trajectory: keep_trajectory.then_some(curve.values),
    }
}

/// Simulates `config.batch_size` bootstrap trajectories at `config.stake_fraction`.
///
/// Trial `i` draws from a generator seeded with `(config.seed, i)`, so the
/// summary is identical across runs and thread counts.
///
/// # Errors
/// [`SimulationError::InvalidParameter`] for a bad configuration and
/// [`SimulationError::InsufficientData`] for a sample below
/// `config.min_sample_size`. Both are checked before any trial runs.
pub fn simulate_batch(
    returns: &ReturnSample,
    config: &BootstrapConfig,
) -> Result<BatchSummary, SimulationError> {
    config.validate()?;
    config.validate_sample(returns)?;

    info!(
        sample = returns.len(),
        trials = config.batch_size,
        trades_per_run = config.trades_per_run,
        stake_fraction = config.stake_fraction,
        "Running bootstrap batch"
    );

    let summary = run_batch(
        returns,
        config.trades_per_run,
        config.batch_size,
        config.stake_fraction,
        config.seed,
        config.retained_trajectories,
    )?;

    info!(
        median_drawdown_pct = summary.median_drawdown_pct,
        p95_drawdown_pct = summary.p95_drawdown_pct,
        median_return_pct = summary.median_return_pct,
        profitable_fraction = summary.profitable_fraction,
        "Bootstrap batch complete"
    );
    Ok(summary)
}

/// Runs an independent batch of `config.sweep_batch_size` trials per fraction.
///
/// Rows come back in the order of `fractions`.
///
/// # Errors
/// Fails before simulating if the configuration, the sample, the fraction list
/// (empty) or any fraction (outside (0, 1]) is invalid.
pub fn sweep_stake_fraction(
    returns: &ReturnSample,
    fractions: &[f64],
    config: &BootstrapConfig,
) -> Result<Vec<FractionSummary>, SimulationError> {
    config.validate()?;
    config.validate_sample(returns)?;
    if fractions.is_empty() {
        return Err(SimulationError::InvalidParameter(
            "sweep needs at least one stake fraction".to_string(),
        ));
    }
    for &fraction in fractions {
        check_stake_fraction(fraction)?;
    }

    info!(
        fractions = fractions.len(),
        trials = config.sweep_batch_size,
        "Running stake fraction sweep"
    );

    let sweep_seed = derive_seed(config.seed, SWEEP_STREAM);
    fractions
        .iter()
        .enumerate()
        .map(|(k, &fraction)| -> Result<FractionSummary, SimulationError> {
            let batch = run_batch(
                returns,
                config.trades_per_run,
                config.sweep_batch_size,
                fraction,
                derive_seed(sweep_seed, k as u64),
                0,
            )?;
            debug!(
                fraction,
                median_return_pct = batch.median_return_pct,
                "Sweep fraction done"
            );
            Ok(FractionSummary::from(&batch))
        })
        .collect()
}

/// `count` evenly spaced values from `start` to `end` inclusive.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

fn run_batch(
    returns: &ReturnSample,
    trades_per_run: usize,
    batch_size: usize,
    stake_fraction: f64,
    seed: u64,
    retained: usize,
) -> Result<BatchSummary, SimulationError> {
    let sample = returns.values();
    let outcomes = (0..batch_size)
        .into_par_iter()
        .map(|i| -> Result<TrialOutcome, SimulationError> {
            let mut resampler = BootstrapResampler::new(sample, seed, i as u64)?;
            Ok(simulate_trial(
                &mut resampler,
                trades_per_run,
                stake_fraction,
                i < retained,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BatchSummary::from_outcomes(
        outcomes,
        stake_fraction,
        trades_per_run,
    ))
}

/// Bootstrap runner bound to one return sample.
///
/// Caps the trajectory length to the sample size, as a trajectory longer than
/// the history it resamples from overstates the horizon.
pub struct MonteCarloRunner {
    pub sample: ReturnSample,
    pub config: BootstrapConfig,
}

impl MonteCarloRunner {
    #[must_use]
    pub fn new(sample: ReturnSample, config: BootstrapConfig) -> Self {
        let mut config = config;
        if !sample.is_empty() {
            config.trades_per_run = config.trades_per_run.min(sample.len());
        }
        Self { sample, config }
    }

    /// Runs the primary batch.
    ///
    /// # Errors
    /// See [`simulate_batch`].
    pub fn run(&self) -> Result<BatchSummary, SimulationError> {
        simulate_batch(&self.sample, &self.config)
    }

    /// Sweeps the given stake fractions.
    ///
    /// # Errors
    /// See [`sweep_stake_fraction`].
    pub fn sweep(&self, fractions: &[f64]) -> Result<Vec<FractionSummary>, SimulationError> {
        sweep_stake_fraction(&self.sample, fractions, &self.config)
    }
}
