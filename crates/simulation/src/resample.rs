use crate::error::SimulationError;
use crate::rng::trial_rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

/// Produces the sequence of per-trade returns one trajectory compounds over.
pub trait ReturnPathGenerator {
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

/// Draws returns uniformly at random, with replacement, from an empirical sample.
pub struct BootstrapResampler<'a> {
    sample: &'a [f64],
    index: Uniform<usize>,
    rng: StdRng,
}

impl<'a> BootstrapResampler<'a> {
    /// Creates a resampler for trial `trial` of the batch seeded with `seed`.
    ///
    /// # Errors
    /// Returns [`SimulationError::InsufficientData`] for an empty sample.
    pub fn new(sample: &'a [f64], seed: u64, trial: u64) -> Result<Self, SimulationError> {
        let index = Uniform::new(0, sample.len()).map_err(|_| SimulationError::InsufficientData {
            required: 1,
            available: sample.len(),
        })?;
        Ok(Self {
            sample,
            index,
            rng: trial_rng(seed, trial),
        })
    }
}

impl ReturnPathGenerator for BootstrapResampler<'_> {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        (0..steps)
            .map(|_| self.sample[self.index.sample(&mut self.rng)])
            .collect()
    }
}

/// Replays a fixed sequence of returns, truncated to the requested length.
pub struct DeterministicReturnPath {
    pub returns: Vec<f64>,
}

impl DeterministicReturnPath {
    pub fn new(returns: Vec<f64>) -> Self {
        Self { returns }
    }
}

impl ReturnPathGenerator for DeterministicReturnPath {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        self.returns.iter().copied().take(steps).collect()
    }
}
