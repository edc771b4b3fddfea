//! Per-trial outcomes and their batch-level summaries.

use pma_domain::metrics::{percentile, sorted};
use serde::{Deserialize, Serialize};

/// Result of one bootstrap trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Largest peak-to-trough decline, in [0, 1].
    pub max_drawdown: f64,
    /// Final equity minus one.
    pub final_return: f64,
    /// Equity values, kept only for presentation trials.
    pub trajectory: Option<Vec<f64>>,
}

/// Distribution of outcomes across one batch at a single stake fraction.
///
/// Percentage fields are fractions times 100, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub stake_fraction: f64,
    pub trades_per_run: usize,
    pub median_drawdown_pct: f64,
    pub p95_drawdown_pct: f64,
    pub median_return_pct: f64,
    pub p5_return_pct: f64,
    pub p95_return_pct: f64,
    /// Share of trials ending at or above break-even.
    pub profitable_fraction: f64,
    pub sample_trajectories: Vec<Vec<f64>>,
    pub trial_count: usize,
    /// Max drawdown of every trial, in trial order.
    #[serde(skip)]
    pub max_drawdowns: Vec<f64>,
    /// Final return of every trial, in trial order.
    #[serde(skip)]
    pub final_returns: Vec<f64>,
}

impl BatchSummary {
    /// Aggregates trial outcomes, which must be in trial order.
    #[must_use]
    pub fn from_outcomes(
        outcomes: Vec<TrialOutcome>,
        stake_fraction: f64,
        trades_per_run: usize,
    ) -> Self {
        let trial_count = outcomes.len();
        let mut max_drawdowns = Vec::with_capacity(trial_count);
        let mut final_returns = Vec::with_capacity(trial_count);
        let mut sample_trajectories = Vec::new();

        for outcome in outcomes {
            max_drawdowns.push(outcome.max_drawdown);
            final_returns.push(outcome.final_return);
            if let Some(trajectory) = outcome.trajectory {
                sample_trajectories.push(trajectory);
            }
        }

        let drawdowns_sorted = sorted(&max_drawdowns);
        let returns_sorted = sorted(&final_returns);
        let profitable = final_returns.iter().filter(|&&r| r >= 0.0).count();
        let profitable_fraction = if trial_count == 0 {
            0.0
        } else {
            profitable as f64 / trial_count as f64
        };

        Self {
            stake_fraction,
            trades_per_run,
            median_drawdown_pct: percentile(&drawdowns_sorted, 50.0) * 100.0,
            p95_drawdown_pct: percentile(&drawdowns_sorted, 95.0) * 100.0,
            median_return_pct: percentile(&returns_sorted, 50.0) * 100.0,
            p5_return_pct: percentile(&returns_sorted, 5.0) * 100.0,
            p95_return_pct: percentile(&returns_sorted, 95.0) * 100.0,
            profitable_fraction,
            sample_trajectories,
            trial_count,
            max_drawdowns,
            final_returns,
        }
    }
}

/// One row of a stake-fraction sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionSummary {
    pub stake_fraction_pct: f64,
    pub median_return_pct: f64,
    pub p5_return_pct: f64,
    pub p95_return_pct: f64,
}

impl From<&BatchSummary> for FractionSummary {
    fn from(batch: &BatchSummary) -> Self {
        Self {
            stake_fraction_pct: batch.stake_fraction * 100.0,
            median_return_pct: batch.median_return_pct,
            p5_return_pct: batch.p5_return_pct,
            p95_return_pct: batch.p95_return_pct,
        }
    }
}
