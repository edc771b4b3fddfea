use thiserror::Error;

/// Errors raised when constructing domain values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A return below total loss or not a finite number.
    #[error("invalid return {value} at index {index}: returns must be finite and >= -1")]
    InvalidReturn { index: usize, value: f64 },

    /// A contract price outside the open interval (0, 100) cents.
    #[error("invalid price {0} cents: must be between 1 and 99")]
    InvalidPrice(u32),

    /// A price band whose bounds are reversed.
    #[error("invalid price band {min}..={max}")]
    InvalidPriceBand { min: u32, max: u32 },
}
