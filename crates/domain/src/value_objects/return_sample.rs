//! Empirical per-trade returns.

use crate::entities::position::ResolvedPosition;
use crate::error::DomainError;
use serde::Serialize;

/// Immutable sample of per-trade fractional returns.
///
/// Each value is the profit or loss of a unit stake on one historical trade,
/// so every value is finite and at least `-1` (total loss).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSample {
    values: Vec<f64>,
}

impl ReturnSample {
    /// Creates a sample, rejecting values below `-1` or not finite.
    ///
    /// An empty sample is allowed here; consumers decide how many values
    /// they need.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidReturn`] for the first offending value.
    pub fn new(values: Vec<f64>) -> Result<Self, DomainError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < -1.0)
        {
            return Err(DomainError::InvalidReturn { index, value });
        }
        Ok(Self { values })
    }

    /// Builds the sample from resolved positions, one return per position.
    pub fn from_positions<'a, I>(positions: I) -> Self
    where
        I: IntoIterator<Item = &'a ResolvedPosition>,
    {
        Self {
            values: positions.into_iter().map(ResolvedPosition::unit_return).collect(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        crate::metrics::mean(&self.values)
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.values.iter().any(|v| v.to_bits() == value.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{PositionRole, Side};
    use crate::value_objects::price::Price;

    #[test]
    fn test_rejects_values_below_total_loss() {
        let err = ReturnSample::new(vec![0.5, -1.0, -1.5]).unwrap_err();
        assert_eq!(err, DomainError::InvalidReturn { index: 2, value: -1.5 });
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(ReturnSample::new(vec![f64::NAN]).is_err());
        assert!(ReturnSample::new(vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_total_loss_is_valid() {
        let sample = ReturnSample::new(vec![-1.0, 0.0, 2.0]).unwrap();
        assert_eq!(sample.len(), 3);
        assert!(sample.contains(-1.0));
        assert!(!sample.contains(1.0));
    }

    #[test]
    fn test_from_positions() {
        let positions = vec![
            ResolvedPosition::new(Side::Yes, Price::from_cents(10).unwrap(), true, 1, PositionRole::Taker),
            ResolvedPosition::new(Side::Yes, Price::from_cents(10).unwrap(), false, 1, PositionRole::Taker),
        ];
        let sample = ReturnSample::from_positions(&positions);
        assert_eq!(sample.len(), 2);
        assert!((sample.values()[0] - 9.0).abs() < 1e-12);
        assert_eq!(sample.values()[1], -1.0);
        assert!((sample.mean() - 4.0).abs() < 1e-12);
    }
}
