use super::TradeDataProvider;
use crate::error::DataError;
use pma_domain::entities::{Market, Trade};
use pma_domain::value_objects::return_sample::ReturnSample;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads trades and markets from two files, each holding a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    trades_path: PathBuf,
    markets_path: PathBuf,
}

impl JsonFileProvider {
    /// Creates a provider over the given files. Nothing is read until asked.
    #[must_use]
    pub fn new(trades_path: impl Into<PathBuf>, markets_path: impl Into<PathBuf>) -> Self {
        Self {
            trades_path: trades_path.into(),
            markets_path: markets_path.into(),
        }
    }
}

impl TradeDataProvider for JsonFileProvider {
    fn trades(&self) -> Result<Vec<Trade>, DataError> {
        let trades: Vec<Trade> = read_json(&self.trades_path)?;
        info!(count = trades.len(), path = %self.trades_path.display(), "Loaded trades");
        Ok(trades)
    }

    fn markets(&self) -> Result<Vec<Market>, DataError> {
        let markets: Vec<Market> = read_json(&self.markets_path)?;
        info!(count = markets.len(), path = %self.markets_path.display(), "Loaded markets");
        Ok(markets)
    }
}

/// Reads a JSON array of per-trade returns.
///
/// # Errors
/// Fails on I/O, malformed JSON, or a value below `-1`.
pub fn load_returns(path: &Path) -> Result<ReturnSample, DataError> {
    let values: Vec<f64> = read_json(path)?;
    let sample = ReturnSample::new(values)?;
    info!(count = sample.len(), path = %path.display(), "Loaded return sample");
    Ok(sample)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}
