//! Bootstrap simulation configuration.
//!
//! Defaults size a batch for stable percentile estimates while keeping each
//! trajectory close to a realistic trading horizon.

use crate::error::SimulationError;
use pma_domain::value_objects::return_sample::ReturnSample;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of draws composing one trajectory.
pub const DEFAULT_TRADES_PER_RUN: usize = 200;
/// Trajectories per stake fraction in the primary batch.
pub const DEFAULT_BATCH_SIZE: usize = 5000;
/// Trajectories per stake fraction in a sensitivity sweep.
pub const DEFAULT_SWEEP_BATCH_SIZE: usize = 1000;
pub const DEFAULT_STAKE_FRACTION: f64 = 0.05;
pub const DEFAULT_SEED: u64 = 42;
/// Smallest return sample accepted.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 100;
/// Trajectories kept verbatim for presentation.
pub const DEFAULT_RETAINED_TRAJECTORIES: usize = 50;

/// Configuration for a bootstrap batch and its stake-fraction sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Draws per trajectory.
    pub trades_per_run: usize,
    /// Trajectories in the primary batch.
    pub batch_size: usize,
    /// Trajectories per fraction in a sweep.
    pub sweep_batch_size: usize,
    /// Fraction of current equity staked on each trade, in (0, 1].
    pub stake_fraction: f64,
    /// Seed every random draw derives from.
    pub seed: u64,
    /// Minimum number of returns a sample must hold.
    pub min_sample_size: usize,
    /// Number of leading trajectories returned with the summary.
    pub retained_trajectories: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            trades_per_run: DEFAULT_TRADES_PER_RUN,
            batch_size: DEFAULT_BATCH_SIZE,
            sweep_batch_size: DEFAULT_SWEEP_BATCH_SIZE,
            stake_fraction: DEFAULT_STAKE_FRACTION,
            seed: DEFAULT_SEED,
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            retained_trajectories: DEFAULT_RETAINED_TRAJECTORIES,
        }
    }
}

impl BootstrapConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of draws per trajectory.
    #[must_use]
    pub fn with_trades_per_run(mut self, trades: usize) -> Self {
        self.trades_per_run = trades;
        self
    }

    /// Sets the primary batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the batch size used for each fraction of a sweep.
    #[must_use]
    pub fn with_sweep_batch_size(mut self, batch_size: usize) -> Self {
        self.sweep_batch_size = batch_size;
        self
    }

    /// Sets the stake fraction.
    #[must_use]
    pub fn with_stake_fraction(mut self, fraction: f64) -> Self {
        self.stake_fraction = fraction;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the minimum sample size.
    #[must_use]
    pub fn with_min_sample_size(mut self, min: usize) -> Self {
        self.min_sample_size = min;
        self
    }

    /// Sets how many trajectories are kept for presentation.
    #[must_use]
    pub fn with_retained_trajectories(mut self, count: usize) -> Self {
        self.retained_trajectories = count;
        self
    }

    /// Checks counts and the stake fraction.
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trades_per_run == 0 {
            return Err(SimulationError::InvalidParameter(
                "trades_per_run must be positive".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(SimulationError::InvalidParameter(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.sweep_batch_size == 0 {
            return Err(SimulationError::InvalidParameter(
                "sweep_batch_size must be positive".to_string(),
            ));
        }
        check_stake_fraction(self.stake_fraction)
    }

    /// Checks that a sample is large enough to simulate from.
    ///
    /// An empty sample always fails, whatever `min_sample_size` is.
    ///
    /// # Errors
    /// Returns [`SimulationError::InsufficientData`].
    pub fn validate_sample(&self, sample: &ReturnSample) -> Result<(), SimulationError> {
        let required = self.min_sample_size.max(1);
        if sample.len() < required {
            return Err(SimulationError::InsufficientData {
                required,
                available: sample.len(),
            });
        }
        Ok(())
    }
}

/// Checks that `fraction` lies in (0, 1].
///
/// # Errors
/// Returns [`SimulationError::InvalidParameter`] otherwise, including for NaN.
pub fn check_stake_fraction(fraction: f64) -> Result<(), SimulationError> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "stake fraction {fraction} outside (0, 1]"
        )))
    }
}
