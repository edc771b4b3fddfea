//! Command line arguments. Every option can also be set through a `PMA_*`
//! environment variable or a `.env` file.

use clap::{Args, Parser, Subcommand, ValueEnum};
use pma_domain::enums::Side;
use pma_domain::value_objects::signal::SignalFilter;
use pma_simulation::config::{
    BootstrapConfig, DEFAULT_BATCH_SIZE, DEFAULT_MIN_SAMPLE_SIZE, DEFAULT_RETAINED_TRAJECTORIES,
    DEFAULT_SEED, DEFAULT_STAKE_FRACTION, DEFAULT_SWEEP_BATCH_SIZE, DEFAULT_TRADES_PER_RUN,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pma")]
#[command(about = "Prediction market trade analysis and risk sizing", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap drawdown and return distributions for a stake fraction
    MonteCarlo {
        /// JSON array of per-trade returns; replaces --trades/--markets
        #[arg(long, env = "PMA_RETURNS", conflicts_with_all = ["trades", "markets"])]
        returns: Option<PathBuf>,

        #[command(flatten)]
        data: OptionalDataArgs,

        #[command(flatten)]
        signal: SignalArgs,

        #[command(flatten)]
        simulation: SimulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Win rate against price, and the longshot view of cheap contracts
    Calibration {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Trade and market counts per platform
    Overview {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Excess return and P&L of takers against makers
    MakerTaker {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Trade size distribution and volume concentration
    Concentration {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run every report, skipping any that fail
    All {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        signal: SignalArgs,

        #[command(flatten)]
        simulation: SimulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Clone)]
pub struct DataArgs {
    /// JSON array of trades
    #[arg(long, env = "PMA_TRADES")]
    pub trades: PathBuf,

    /// JSON array of markets
    #[arg(long, env = "PMA_MARKETS")]
    pub markets: PathBuf,
}

#[derive(Args, Clone)]
pub struct OptionalDataArgs {
    /// JSON array of trades
    #[arg(long, env = "PMA_TRADES", requires = "markets")]
    pub trades: Option<PathBuf>,

    /// JSON array of markets
    #[arg(long, env = "PMA_MARKETS", requires = "trades")]
    pub markets: Option<PathBuf>,
}

impl OptionalDataArgs {
    pub fn into_required(self) -> Option<DataArgs> {
        Some(DataArgs {
            trades: self.trades?,
            markets: self.markets?,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SideArg {
    Yes,
    No,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Yes => Side::Yes,
            SideArg::No => Side::No,
        }
    }
}

/// Which taker positions form the simulated signal.
#[derive(Args, Clone)]
pub struct SignalArgs {
    /// Side bought by the taker
    #[arg(long, value_enum, default_value = "yes", env = "PMA_SIDE")]
    pub side: SideArg,

    /// Lowest entry price in cents
    #[arg(long, default_value_t = 5, env = "PMA_MIN_PRICE")]
    pub min_price: u32,

    /// Highest entry price in cents
    #[arg(long, default_value_t = 15, env = "PMA_MAX_PRICE")]
    pub max_price: u32,
}

impl SignalArgs {
    pub fn filter(&self) -> anyhow::Result<SignalFilter> {
        Ok(SignalFilter::new(
            self.side.into(),
            self.min_price,
            self.max_price,
        )?)
    }
}

#[derive(Args, Clone)]
pub struct SimulationArgs {
    /// Fraction of equity staked per trade, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_STAKE_FRACTION, env = "PMA_STAKE_FRACTION")]
    pub stake_fraction: f64,

    /// Trajectories in the primary batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, env = "PMA_BATCH_SIZE")]
    pub batch_size: usize,

    /// Trajectories per fraction in the sweep
    #[arg(long, default_value_t = DEFAULT_SWEEP_BATCH_SIZE, env = "PMA_SWEEP_BATCH_SIZE")]
    pub sweep_batch_size: usize,

    /// Maximum draws per trajectory (capped to the sample size)
    #[arg(long, default_value_t = DEFAULT_TRADES_PER_RUN, env = "PMA_TRADES_PER_RUN")]
    pub trades_per_run: usize,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED, env = "PMA_SEED")]
    pub seed: u64,

    /// Smallest return sample accepted
    #[arg(long, default_value_t = DEFAULT_MIN_SAMPLE_SIZE, env = "PMA_MIN_SAMPLE_SIZE")]
    pub min_sample_size: usize,

    /// Trajectories kept for the equity curve chart
    #[arg(long, default_value_t = DEFAULT_RETAINED_TRAJECTORIES, env = "PMA_RETAINED_TRAJECTORIES")]
    pub retained_trajectories: usize,

    /// First stake fraction of the sweep
    #[arg(long, default_value_t = 0.01, env = "PMA_SWEEP_START")]
    pub sweep_start: f64,

    /// Last stake fraction of the sweep
    #[arg(long, default_value_t = 0.30, env = "PMA_SWEEP_END")]
    pub sweep_end: f64,

    /// Number of fractions in the sweep
    #[arg(long, default_value_t = 30, env = "PMA_SWEEP_STEPS")]
    pub sweep_steps: usize,
}

impl SimulationArgs {
    pub fn config(&self) -> BootstrapConfig {
        BootstrapConfig::new()
            .with_stake_fraction(self.stake_fraction)
            .with_batch_size(self.batch_size)
            .with_sweep_batch_size(self.sweep_batch_size)
            .with_trades_per_run(self.trades_per_run)
            .with_seed(self.seed)
            .with_min_sample_size(self.min_sample_size)
            .with_retained_trajectories(self.retained_trajectories)
    }
}

#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Directory chart JSON files are written to
    #[arg(long, default_value = "static/data/charts", env = "PMA_OUTPUT_DIR")]
    pub output_dir: PathBuf,
}
