//! Trade data loading and report export.
//!
//! Providers materialise trades, markets and return samples from JSON files;
//! [`resolve`] joins trades to settled markets; [`export`] turns simulation and
//! metric results into chart payloads behind a single [`export::ReportSink`].

pub mod error;
pub mod export;
pub mod providers;
pub mod resolve;

pub use error::DataError;
pub use providers::{JsonFileProvider, TradeDataProvider, load_returns};
