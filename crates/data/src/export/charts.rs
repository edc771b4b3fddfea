//! Chart payloads for the web viewer.
//!
//! Percentages are rounded to 2 decimals and equity points to 4, half away
//! from zero, so the files stay small and diff cleanly between runs.

use chrono::{DateTime, Utc};
use pma_domain::metrics::calibration::{CalibrationCurve, LongshotBin};
use pma_domain::enums::Platform;
use pma_domain::metrics::concentration::{LorenzCurve, SizeDistribution};
use pma_domain::metrics::maker_taker::MakerTakerComparison;
use pma_domain::metrics::overview::DatasetOverview;
use pma_domain::value_objects::signal::SignalStats;
use pma_simulation::summary::{BatchSummary, FractionSummary};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Points kept when downsampling a Lorenz curve.
pub const LORENZ_POINTS: usize = 500;

/// Rounds `value` to `dp` decimals, half away from zero.
///
/// Values that cannot be represented as a decimal (NaN, infinities) pass through.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

fn round_all(values: &[f64], dp: u32) -> Vec<f64> {
    values.iter().map(|&v| round_dp(v, dp)).collect()
}

fn pct_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&v| round_dp(v * 100.0, 2)).collect()
}

/// Headline numbers of the signal a return sample was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalStatsRecord {
    pub avg_return_pct: f64,
    pub win_rate_pct: f64,
    pub implied_prob_pct: f64,
    pub edge_pp: f64,
    pub n_trades: usize,
}

impl From<&SignalStats> for SignalStatsRecord {
    fn from(stats: &SignalStats) -> Self {
        Self {
            avg_return_pct: round_dp(stats.avg_return * 100.0, 2),
            win_rate_pct: round_dp(stats.win_rate * 100.0, 2),
            implied_prob_pct: round_dp(stats.implied_prob * 100.0, 2),
            edge_pp: round_dp(stats.edge * 100.0, 2),
            n_trades: stats.trade_count,
        }
    }
}

/// Bootstrap batch, its sweep and the raw distributions behind them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloChart {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub sweep: Vec<FractionSummary>,
    /// Max drawdown of every trial, in percent.
    pub drawdowns: Vec<f64>,
    /// Final return of every trial, in percent.
    pub final_returns: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SignalStatsRecord>,
}

impl MonteCarloChart {
    /// Builds the payload, rounding every reported number.
    #[must_use]
    pub fn new(
        summary: &BatchSummary,
        sweep: &[FractionSummary],
        stats: Option<&SignalStats>,
    ) -> Self {
        let rounded = BatchSummary {
            stake_fraction: summary.stake_fraction,
            trades_per_run: summary.trades_per_run,
            median_drawdown_pct: round_dp(summary.median_drawdown_pct, 2),
            p95_drawdown_pct: round_dp(summary.p95_drawdown_pct, 2),
            median_return_pct: round_dp(summary.median_return_pct, 2),
            p5_return_pct: round_dp(summary.p5_return_pct, 2),
            p95_return_pct: round_dp(summary.p95_return_pct, 2),
            profitable_fraction: round_dp(summary.profitable_fraction, 4),
            sample_trajectories: summary
                .sample_trajectories
                .iter()
                .map(|t| round_all(t, 4))
                .collect(),
            trial_count: summary.trial_count,
            max_drawdowns: Vec::new(),
            final_returns: Vec::new(),
        };

        let sweep = sweep
            .iter()
            .map(|row| FractionSummary {
                stake_fraction_pct: round_dp(row.stake_fraction_pct, 2),
                median_return_pct: round_dp(row.median_return_pct, 2),
                p5_return_pct: round_dp(row.p5_return_pct, 2),
                p95_return_pct: round_dp(row.p95_return_pct, 2),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            summary: rounded,
            sweep,
            drawdowns: pct_all(&summary.max_drawdowns),
            final_returns: pct_all(&summary.final_returns),
            stats: stats.map(SignalStatsRecord::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongshotRow {
    pub price: u32,
    pub implied_prob_pct: f64,
    pub actual_win_rate_pct: f64,
    pub ev_per_dollar: f64,
    pub total_contracts: u64,
}

/// Calibration scatter plus the low-price longshot view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationChart {
    pub generated_at: DateTime<Utc>,
    pub price: Vec<u32>,
    /// Observed win rate per price, in percent.
    pub win_rate: Vec<f64>,
    pub total_trades: Vec<u64>,
    pub mean_absolute_error_pp: f64,
    pub longshot: Vec<LongshotRow>,
}

impl CalibrationChart {
    #[must_use]
    pub fn new(curve: &CalibrationCurve, longshot: &[LongshotBin]) -> Self {
        Self {
            generated_at: Utc::now(),
            price: curve.bins.iter().map(|b| b.price_cents).collect(),
            win_rate: curve
                .bins
                .iter()
                .map(|b| round_dp(b.win_rate() * 100.0, 3))
                .collect(),
            total_trades: curve.bins.iter().map(|b| b.positions).collect(),
            mean_absolute_error_pp: round_dp(curve.mean_absolute_error() * 100.0, 3),
            longshot: longshot
                .iter()
                .map(|bin| LongshotRow {
                    price: bin.price_cents,
                    implied_prob_pct: round_dp(bin.implied_prob() * 100.0, 2),
                    actual_win_rate_pct: round_dp(
                        bin.yes_taker_win_rate.unwrap_or_else(|| bin.implied_prob()) * 100.0,
                        2,
                    ),
                    ev_per_dollar: round_dp(bin.ev_per_dollar(), 4),
                    total_contracts: bin.contracts,
                })
                .collect(),
        }
    }
}

/// Trade size concentration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationChart {
    pub generated_at: DateTime<Utc>,
    pub lorenz_pct_trades: Vec<f64>,
    pub lorenz_pct_volume: Vec<f64>,
    pub median: f64,
    pub mean: f64,
    pub p99: f64,
    pub gini: f64,
    /// Percent of largest trades carrying half of all volume.
    pub top_pct_half_volume: f64,
}

impl ConcentrationChart {
    #[must_use]
    pub fn new(sizes: &[u64]) -> Self {
        let curve = LorenzCurve::from_sizes(sizes).downsample(LORENZ_POINTS);
        let dist = SizeDistribution::from_sizes(sizes);
        Self {
            generated_at: Utc::now(),
            lorenz_pct_trades: pct_all(&curve.trade_share),
            lorenz_pct_volume: pct_all(&curve.volume_share),
            median: dist.median,
            mean: round_dp(dist.mean, 1),
            p99: dist.p99,
            gini: round_dp(dist.gini, 4),
            top_pct_half_volume: round_dp(dist.top_share_for_half_volume * 100.0, 1),
        }
    }
}

/// Excess return and P&L of takers and makers per price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MakerTakerChart {
    pub generated_at: DateTime<Utc>,
    pub price: Vec<u32>,
    /// Win rate minus price, in percentage points.
    pub taker_excess: Vec<f64>,
    pub maker_excess: Vec<f64>,
    /// P&L in contracts, rounded to whole contracts.
    pub taker_pnl: Vec<f64>,
    pub maker_pnl: Vec<f64>,
    pub total_taker_pnl: f64,
    pub total_maker_pnl: f64,
}

impl MakerTakerChart {
    #[must_use]
    pub fn new(comparison: &MakerTakerComparison) -> Self {
        let rows = &comparison.rows;
        Self {
            generated_at: Utc::now(),
            price: rows.iter().map(|r| r.price_cents).collect(),
            taker_excess: rows
                .iter()
                .map(|r| round_dp(r.taker_excess() * 100.0, 4))
                .collect(),
            maker_excess: rows
                .iter()
                .map(|r| round_dp(r.maker_excess() * 100.0, 4))
                .collect(),
            taker_pnl: rows.iter().map(|r| round_dp(r.taker.pnl, 0)).collect(),
            maker_pnl: rows.iter().map(|r| round_dp(r.maker.pnl, 0)).collect(),
            total_taker_pnl: round_dp(comparison.total_taker_pnl, 0),
            total_maker_pnl: round_dp(comparison.total_maker_pnl, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformRow {
    pub platform: Platform,
    pub trades: u64,
    pub contracts: u64,
    pub markets_traded: u64,
}

/// Dataset size per platform and market resolution counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewChart {
    pub generated_at: DateTime<Utc>,
    pub platforms: Vec<PlatformRow>,
    pub markets_listed: u64,
    pub markets_resolved: u64,
    pub resolved_yes: u64,
    pub resolved_no: u64,
}

impl OverviewChart {
    #[must_use]
    pub fn new(overview: &DatasetOverview) -> Self {
        Self {
            generated_at: Utc::now(),
            platforms: overview
                .platforms
                .iter()
                .map(|p| PlatformRow {
                    platform: p.platform,
                    trades: p.trades,
                    contracts: p.contracts,
                    markets_traded: p.markets_traded,
                })
                .collect(),
            markets_listed: overview.markets_listed,
            markets_resolved: overview.markets_resolved,
            resolved_yes: overview.resolved_yes,
            resolved_no: overview.resolved_no,
        }
    }
}
