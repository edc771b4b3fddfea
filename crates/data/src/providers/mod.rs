//! Sources of trade and market records.

mod json_file;

pub use json_file::{JsonFileProvider, load_returns};

use crate::error::DataError;
use pma_domain::entities::{Market, Trade};

/// Supplies the raw records an analysis runs over.
pub trait TradeDataProvider {
    /// Returns every trade.
    fn trades(&self) -> Result<Vec<Trade>, DataError>;

    /// Returns every market, settled or not.
    fn markets(&self) -> Result<Vec<Market>, DataError>;
}
