//! Command line interface for prediction market trade analysis.
mod args;
mod reports;

use anyhow::{Context, Result};
use args::{Cli, Commands, DataArgs, OutputArgs};
use clap::Parser;
use dotenv::dotenv;
use pma_data::export::JsonChartWriter;
use pma_data::resolve::{SignalSelection, resolve_positions};
use pma_data::{JsonFileProvider, TradeDataProvider, load_returns};
use pma_domain::entities::{Market, Trade};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::MonteCarlo {
            returns,
            data,
            signal,
            simulation,
            output,
        } => {
            let sink = open_sink(&output)?;
            if let Some(path) = returns {
                let sample = load_returns(&path)?;
                info!(returns = sample.len(), "Loaded return sample");
                reports::monte_carlo(sample, None, &simulation, &sink)?;
            } else {
                let data = data
                    .into_required()
                    .context("pass either --returns or both --trades and --markets")?;
                let (trades, markets) = load(&data)?;
                let positions = resolve_positions(&trades, &markets);
                let selection = SignalSelection::select(&positions, signal.filter()?);
                reports::monte_carlo(
                    selection.sample,
                    Some(&selection.stats),
                    &simulation,
                    &sink,
                )?;
            }
        }
        Commands::Calibration { data, output } => {
            let sink = open_sink(&output)?;
            let (trades, markets) = load(&data)?;
            reports::calibration(&resolve_positions(&trades, &markets), &sink)?;
        }
        Commands::Overview { data, output } => {
            let sink = open_sink(&output)?;
            let (trades, markets) = load(&data)?;
            reports::overview(&trades, &markets, &sink)?;
        }
        Commands::MakerTaker { data, output } => {
            let sink = open_sink(&output)?;
            let (trades, markets) = load(&data)?;
            reports::maker_taker(&resolve_positions(&trades, &markets), &sink)?;
        }
        Commands::Concentration { data, output } => {
            let sink = open_sink(&output)?;
            let (trades, _) = load(&data)?;
            reports::concentration(&trades, &sink)?;
        }
        Commands::All {
            data,
            signal,
            simulation,
            output,
        } => {
            let sink = open_sink(&output)?;
            let filter = signal.filter()?;
            let (trades, markets) = load(&data)?;
            let positions = resolve_positions(&trades, &markets);

            let mut failed = 0usize;
            let mut record = |name: &str, outcome: Result<()>| {
                if let Err(e) = outcome {
                    error!(report = name, error = %format!("{e:#}"), "Report failed, continuing");
                    failed += 1;
                }
            };
            record("overview", reports::overview(&trades, &markets, &sink));
            record("calibration", reports::calibration(&positions, &sink));
            record("maker_taker", reports::maker_taker(&positions, &sink));
            record("concentration", reports::concentration(&trades, &sink));
            let selection = SignalSelection::select(&positions, filter);
            record(
                "monte_carlo",
                reports::monte_carlo(
                    selection.sample,
                    Some(&selection.stats),
                    &simulation,
                    &sink,
                ),
            );

            if failed > 0 {
                warn!(failed, "Some reports did not complete");
            } else {
                info!("All reports complete");
            }
        }
    }

    Ok(())
}

fn open_sink(output: &OutputArgs) -> Result<JsonChartWriter> {
    JsonChartWriter::new(&output.output_dir).with_context(|| {
        format!(
            "cannot prepare output directory {}",
            output.output_dir.display()
        )
    })
}

fn load(data: &DataArgs) -> Result<(Vec<Trade>, Vec<Market>)> {
    let provider = JsonFileProvider::new(&data.trades, &data.markets);
    Ok((provider.trades()?, provider.markets()?))
}
