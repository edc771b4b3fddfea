//! Bootstrap risk simulation for stake sizing.
//!
//! Resamples empirical per-trade returns into compounding equity
//! trajectories and summarizes their drawdown and return distributions,
//! for a single stake fraction or across a sweep of fractions.

pub mod config;
pub mod equity;
pub mod error;
pub mod monte_carlo;
pub mod prelude;
pub mod resample;
pub mod rng;
pub mod summary;
