use crate::entities::position::ResolvedPosition;
use crate::enums::{PositionRole, Side};
use crate::error::DomainError;
use crate::metrics::mean;
use serde::{Deserialize, Serialize};

/// Selects the positions that make up a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalFilter {
    /// Side bought by the taker.
    pub side: Side,
    /// Lowest entry price in cents, inclusive.
    pub min_price: u32,
    /// Highest entry price in cents, inclusive.
    pub max_price: u32,
}

impl SignalFilter {
    /// Creates a filter for takers buying `side` between the given prices.
    ///
    /// # Errors
    /// Returns an error if `min_price > max_price`.
    pub fn new(side: Side, min_price: u32, max_price: u32) -> Result<Self, DomainError> {
        if min_price > max_price {
            return Err(DomainError::InvalidPriceBand {
                min: min_price,
                max: max_price,
            });
        }
        Ok(Self {
            side,
            min_price,
            max_price,
        })
    }

    /// YES takers paying 5 to 15 cents.
    #[must_use]
    pub fn longshot() -> Self {
        Self {
            side: Side::Yes,
            min_price: 5,
            max_price: 15,
        }
    }

    #[must_use]
    pub fn matches(&self, position: &ResolvedPosition) -> bool {
        let cents = position.price.to_cents();
        position.role == PositionRole::Taker
            && position.side == self.side
            && cents >= self.min_price
            && cents <= self.max_price
    }
}

impl Default for SignalFilter {
    fn default() -> Self {
        Self::longshot()
    }
}

/// Headline statistics of a signal's historical positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub trade_count: usize,
    /// Mean unit-stake return.
    pub avg_return: f64,
    /// Observed fraction of winning positions.
    pub win_rate: f64,
    /// Mean entry price as a probability.
    pub implied_prob: f64,
    /// `win_rate - implied_prob`.
    pub edge: f64,
}

impl SignalStats {
    #[must_use]
    pub fn from_positions(positions: &[&ResolvedPosition]) -> Self {
        if positions.is_empty() {
            return Self {
                trade_count: 0,
                avg_return: 0.0,
                win_rate: 0.0,
                implied_prob: 0.0,
                edge: 0.0,
            };
        }

        let returns: Vec<f64> = positions.iter().map(|p| p.unit_return()).collect();
        let wins: Vec<f64> = positions
            .iter()
            .map(|p| if p.won { 1.0 } else { 0.0 })
            .collect();
        let probs: Vec<f64> = positions.iter().map(|p| p.price.probability()).collect();

        let win_rate = mean(&wins);
        let implied_prob = mean(&probs);

        Self {
            trade_count: positions.len(),
            avg_return: mean(&returns),
            win_rate,
            implied_prob,
            edge: win_rate - implied_prob,
        }
    }
}
