use pma_domain::DomainError;
use thiserror::Error;

/// Errors raised before a simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The return sample is too small to give meaningful percentiles.
    #[error("insufficient data: need at least {required} returns, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// A structurally invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
