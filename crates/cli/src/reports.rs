//! Individual reports. Each prints a summary table and publishes its chart.

use crate::args::SimulationArgs;
use anyhow::{Context, Result};
use pma_data::export::{
    CalibrationChart, ConcentrationChart, MakerTakerChart, MonteCarloChart, OverviewChart,
    ReportSink, publish_chart,
};
use pma_domain::entities::{Market, ResolvedPosition, Trade};
use pma_domain::metrics::calibration::{CalibrationCurve, longshot_bias};
use pma_domain::metrics::concentration::SizeDistribution;
use pma_domain::metrics::maker_taker::MakerTakerComparison;
use pma_domain::metrics::overview::DatasetOverview;
use pma_domain::value_objects::return_sample::ReturnSample;
use pma_domain::value_objects::signal::SignalStats;
use pma_simulation::prelude::*;
use prettytable::{Table, row};
use tracing::info;

/// Highest price, in cents, shown in the longshot view.
pub const LONGSHOT_MAX_CENTS: u32 = 20;

pub fn monte_carlo(
    sample: ReturnSample,
    stats: Option<&SignalStats>,
    args: &SimulationArgs,
    sink: &dyn ReportSink,
) -> Result<()> {
    let runner = MonteCarloRunner::new(sample, args.config());
    let summary = runner.run().context("bootstrap batch failed")?;
    let fractions = linspace(args.sweep_start, args.sweep_end, args.sweep_steps);
    let sweep = runner.sweep(&fractions).context("stake fraction sweep failed")?;

    let mut table = Table::new();
    table.add_row(row!["Metric", "Value"]);
    if let Some(stats) = stats {
        table.add_row(row!["Signal trades", stats.trade_count]);
        table.add_row(row!["Win rate", format!("{:.2}%", stats.win_rate * 100.0)]);
        table.add_row(row!["Implied prob", format!("{:.2}%", stats.implied_prob * 100.0)]);
        table.add_row(row!["Edge", format!("{:+.2}pp", stats.edge * 100.0)]);
    }
    table.add_row(row!["Stake fraction", format!("{:.2}%", summary.stake_fraction * 100.0)]);
    table.add_row(row!["Trades per run", summary.trades_per_run]);
    table.add_row(row!["Trials", summary.trial_count]);
    table.add_row(row!["Median max drawdown", format!("{:.2}%", summary.median_drawdown_pct)]);
    table.add_row(row!["P95 max drawdown", format!("{:.2}%", summary.p95_drawdown_pct)]);
    table.add_row(row!["Median return", format!("{:.2}%", summary.median_return_pct)]);
    table.add_row(row!["P5 return", format!("{:.2}%", summary.p5_return_pct)]);
    table.add_row(row!["P95 return", format!("{:.2}%", summary.p95_return_pct)]);
    table.add_row(row![
        "Profitable runs",
        format!("{:.1}%", summary.profitable_fraction * 100.0)
    ]);
    table.printstd();

    let mut frontier = Table::new();
    frontier.add_row(row!["Stake", "P5", "Median", "P95"]);
    for fraction in &sweep {
        frontier.add_row(row![
            format!("{:.1}%", fraction.stake_fraction_pct),
            format!("{:.2}%", fraction.p5_return_pct),
            format!("{:.2}%", fraction.median_return_pct),
            format!("{:.2}%", fraction.p95_return_pct)
        ]);
    }
    frontier.printstd();

    let chart = MonteCarloChart::new(&summary, &sweep, stats);
    publish_chart(sink, "monte_carlo_kelly", &chart)?;
    info!("Monte Carlo report complete");
    Ok(())
}

pub fn calibration(positions: &[ResolvedPosition], sink: &dyn ReportSink) -> Result<()> {
    anyhow::ensure!(!positions.is_empty(), "no resolved positions to calibrate");

    let curve = CalibrationCurve::from_positions(positions);
    let longshot = longshot_bias(positions, LONGSHOT_MAX_CENTS);

    let mut table = Table::new();
    table.add_row(row!["Price", "Implied", "YES taker", "NO taker", "EV per $", "Contracts"]);
    for bin in &longshot {
        table.add_row(row![
            format!("{}c", bin.price_cents),
            format!("{:.1}%", bin.implied_prob() * 100.0),
            rate(bin.yes_taker_win_rate),
            rate(bin.no_taker_win_rate),
            format!("{:.3}", bin.ev_per_dollar()),
            bin.contracts
        ]);
    }
    table.printstd();
    info!(
        positions = curve.total_positions(),
        mean_absolute_error = curve.mean_absolute_error(),
        "Calibration computed"
    );

    publish_chart(sink, "calibration", &CalibrationChart::new(&curve, &longshot))?;
    Ok(())
}

pub fn concentration(trades: &[Trade], sink: &dyn ReportSink) -> Result<()> {
    let sizes: Vec<u64> = trades.iter().map(|t| t.count).collect();
    let dist = SizeDistribution::from_sizes(&sizes);
    anyhow::ensure!(dist.trades > 0, "no trades with a positive size");

    let mut table = Table::new();
    table.add_row(row!["Metric", "Value"]);
    table.add_row(row!["Trades", dist.trades]);
    table.add_row(row!["Median size", format!("{:.0}", dist.median)]);
    table.add_row(row!["Mean size", format!("{:.1}", dist.mean)]);
    table.add_row(row!["P99 size", format!("{:.0}", dist.p99)]);
    table.add_row(row!["Gini", format!("{:.4}", dist.gini)]);
    table.add_row(row![
        "Largest trades holding half the volume",
        format!("{:.1}%", dist.top_share_for_half_volume * 100.0)
    ]);
    table.printstd();

    publish_chart(sink, "trade_size_concentration", &ConcentrationChart::new(&sizes))?;
    Ok(())
}

pub fn overview(trades: &[Trade], markets: &[Market], sink: &dyn ReportSink) -> Result<()> {
    let overview = DatasetOverview::from_records(trades, markets);

    let mut table = Table::new();
    table.add_row(row!["Platform", "Trades", "Contracts", "Markets traded"]);
    for activity in &overview.platforms {
        table.add_row(row![
            activity.platform,
            activity.trades,
            activity.contracts,
            activity.markets_traded
        ]);
    }
    table.add_row(row![
        "total",
        overview.total_trades(),
        overview.total_contracts(),
        ""
    ]);
    table.printstd();
    info!(
        markets_listed = overview.markets_listed,
        resolved = overview.markets_resolved,
        resolved_yes = overview.resolved_yes,
        resolved_no = overview.resolved_no,
        "Markets summarized"
    );

    publish_chart(sink, "dataset_overview", &OverviewChart::new(&overview))?;
    Ok(())
}

pub fn maker_taker(positions: &[ResolvedPosition], sink: &dyn ReportSink) -> Result<()> {
    let comparison = MakerTakerComparison::from_positions(positions);
    anyhow::ensure!(
        !comparison.rows.is_empty(),
        "no price level with both taker and maker positions"
    );

    let mut table = Table::new();
    table.add_row(row!["Role", "P&L (contracts)"]);
    table.add_row(row!["Taker", format!("{:+.0}", comparison.total_taker_pnl)]);
    table.add_row(row!["Maker", format!("{:+.0}", comparison.total_maker_pnl)]);
    table.printstd();

    publish_chart(sink, "maker_vs_taker", &MakerTakerChart::new(&comparison))?;
    Ok(())
}

fn rate(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pma_data::DataError;
    use pma_data::resolve::resolve_positions;
    use pma_domain::enums::{MarketStatus, Platform, PositionRole, Side};
    use pma_domain::value_objects::price::Price;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemorySink {
        published: RefCell<Vec<(String, serde_json::Value)>>,
    }

    impl ReportSink for MemorySink {
        fn publish(&self, name: &str, payload: serde_json::Value) -> Result<(), DataError> {
            self.published.borrow_mut().push((name.to_string(), payload));
            Ok(())
        }
    }

    fn small_run() -> SimulationArgs {
        SimulationArgs {
            stake_fraction: 0.1,
            batch_size: 50,
            sweep_batch_size: 20,
            trades_per_run: 200,
            seed: 7,
            min_sample_size: 4,
            retained_trajectories: 3,
            sweep_start: 0.05,
            sweep_end: 0.2,
            sweep_steps: 4,
        }
    }

    #[test]
    fn test_monte_carlo_publishes_chart() {
        let sink = MemorySink::default();
        let sample = ReturnSample::new(vec![-1.0, 9.0, -1.0, -1.0, 0.5, -1.0]).unwrap();
        monte_carlo(sample, None, &small_run(), &sink).unwrap();

        let published = sink.published.borrow();
        assert_eq!(published.len(), 1);
        let (name, payload) = &published[0];
        assert_eq!(name, "monte_carlo_kelly");
        assert_eq!(payload["sweep"].as_array().unwrap().len(), 4);
        assert_eq!(payload["drawdowns"].as_array().unwrap().len(), 50);
        // Trajectory length is capped to the six available returns.
        assert_eq!(payload["summary"]["tradesPerRun"], 6);
    }

    #[test]
    fn test_monte_carlo_rejects_small_sample() {
        let sink = MemorySink::default();
        let sample = ReturnSample::new(vec![0.5, -1.0]).unwrap();
        let err = monte_carlo(sample, None, &small_run(), &sink).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimulationError>(),
            Some(SimulationError::InsufficientData { required: 4, available: 2 })
        ));
        assert!(sink.published.borrow().is_empty());
    }

    #[test]
    fn test_calibration_and_concentration() {
        let sink = MemorySink::default();
        let price = Price::from_cents(10).unwrap();
        let positions = vec![
            ResolvedPosition::new(Side::Yes, price, true, 4, PositionRole::Taker),
            ResolvedPosition::new(Side::Yes, price, false, 4, PositionRole::Taker),
        ];
        calibration(&positions, &sink).unwrap();
        assert!(calibration(&[], &sink).is_err());

        let trades = vec![Trade::new("A", 10, Side::Yes, 1), Trade::new("A", 20, Side::No, 9)];
        concentration(&trades, &sink).unwrap();

        let names: Vec<String> = sink.published.borrow().iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, vec!["calibration", "trade_size_concentration"]);
    }

    #[test]
    fn test_overview_and_maker_taker() {
        let sink = MemorySink::default();
        let trades = vec![
            Trade::new("KX-A", 10, Side::Yes, 4),
            Trade::new("KX-A", 10, Side::No, 2),
            Trade::new("0xabc", 60, Side::No, 3).with_platform(Platform::Polymarket),
        ];
        let markets = vec![Market::new("KX-A", MarketStatus::Finalized, Some(Side::Yes))];
        overview(&trades, &markets, &sink).unwrap();

        let positions = resolve_positions(&trades, &markets);
        maker_taker(&positions, &sink).unwrap();
        assert!(maker_taker(&[], &sink).is_err());

        let published = sink.published.borrow();
        assert_eq!(published[0].0, "dataset_overview");
        assert_eq!(published[0].1["platforms"].as_array().unwrap().len(), 2);
        assert_eq!(published[1].0, "maker_vs_taker");
        assert_eq!(published[1].1["total_taker_pnl"], 2.0);
    }
}
