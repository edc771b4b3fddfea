//! Domain model for prediction market trade analysis.
//!
//! Trades, markets and the positions derived from them, the return sample
//! consumed by the risk simulator, and the descriptive metrics computed over
//! resolved positions.

pub mod entities;
pub mod enums;
pub mod error;
pub mod metrics;
pub mod value_objects;

pub use error::DomainError;
