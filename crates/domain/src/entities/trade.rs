use crate::enums::{Platform, Side};
use crate::error::DomainError;
use crate::value_objects::price::Price;
use serde::{Deserialize, Serialize};

/// A single executed trade on a binary contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: String,
    /// Price of the YES side in cents.
    pub yes_price: u32,
    pub taker_side: Side,
    /// Number of contracts exchanged.
    pub count: u64,
    #[serde(default)]
    pub platform: Platform,
}

impl Trade {
    pub fn new(ticker: impl Into<String>, yes_price: u32, taker_side: Side, count: u64) -> Self {
        Self {
            ticker: ticker.into(),
            yes_price,
            taker_side,
            count,
            platform: Platform::default(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn price_of(&self, side: Side) -> Result<Price, DomainError> {
        let yes = Price::from_cents(self.yes_price)?;
        Ok(match side {
            Side::Yes => yes,
            Side::No => yes.complement(),
        })
    }

    /// Price paid by the taker for the side they bought.
    pub fn taker_price(&self) -> Result<Price, DomainError> {
        self.price_of(self.taker_side)
    }

    /// Price paid by the counterparty for the opposite side.
    pub fn maker_price(&self) -> Result<Price, DomainError> {
        self.price_of(self.taker_side.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_taker_and_maker_prices() {
        let trade = Trade::new("KXTEST-1", 12, Side::Yes, 10);
        assert_eq!(trade.taker_price().unwrap().value, dec!(0.12));
        assert_eq!(trade.maker_price().unwrap().value, dec!(0.88));

        let no_taker = Trade::new("KXTEST-1", 12, Side::No, 10);
        assert_eq!(no_taker.taker_price().unwrap().to_cents(), 88);
        assert_eq!(no_taker.maker_price().unwrap().to_cents(), 12);
    }

    #[test]
    fn test_invalid_price() {
        let trade = Trade::new("KXTEST-1", 100, Side::Yes, 1);
        assert_eq!(trade.taker_price(), Err(DomainError::InvalidPrice(100)));
    }

    #[test]
    fn test_deserialize_defaults_platform() {
        let json = r#"{"ticker":"A","yes_price":7,"taker_side":"yes","count":3}"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.platform, Platform::Kalshi);
        assert_eq!(trade.taker_side, Side::Yes);
        assert_eq!(trade.count, 3);
    }
}
