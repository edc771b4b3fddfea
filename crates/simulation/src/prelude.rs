//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use pma_simulation::prelude::*;
//! ```

// Configuration
pub use crate::config::{BootstrapConfig, check_stake_fraction};

// Equity curves
pub use crate::equity::{EquityCurve, INITIAL_EQUITY};

// Errors
pub use crate::error::SimulationError;

// Monte Carlo
pub use crate::monte_carlo::{
    MonteCarloRunner, linspace, simulate_batch, simulate_trial, sweep_stake_fraction,
};

// Return path generators
pub use crate::resample::{BootstrapResampler, DeterministicReturnPath, ReturnPathGenerator};

// Summaries
pub use crate::summary::{BatchSummary, FractionSummary, TrialOutcome};
