use crate::entities::trade::Trade;
use crate::enums::{PositionRole, Side};
use crate::error::DomainError;
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

/// One side of a trade on a market whose outcome is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPosition {
    /// Contract side held.
    pub side: Side,
    /// Entry price of the held side.
    pub price: Price,
    pub won: bool,
    pub contracts: u64,
    pub role: PositionRole,
}

impl ResolvedPosition {
    pub fn new(side: Side, price: Price, won: bool, contracts: u64, role: PositionRole) -> Self {
        Self {
            side,
            price,
            won,
            contracts,
            role,
        }
    }

    /// Splits a trade into its taker and maker positions given the market outcome.
    pub fn pair_from_trade(trade: &Trade, outcome: Side) -> Result<[Self; 2], DomainError> {
        let taker_side = trade.taker_side;
        let maker_side = taker_side.opposite();
        Ok([
            Self::new(
                taker_side,
                trade.taker_price()?,
                taker_side == outcome,
                trade.count,
                PositionRole::Taker,
            ),
            Self::new(
                maker_side,
                trade.maker_price()?,
                maker_side == outcome,
                trade.count,
                PositionRole::Maker,
            ),
        ])
    }

    pub fn unit_return(&self) -> f64 {
        self.price.unit_return(self.won)
    }
}
