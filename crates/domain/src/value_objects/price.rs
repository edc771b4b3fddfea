use crate::error::DomainError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Contract price expressed as an implied probability in (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Builds a price from a quote in cents, rejecting 0 and anything >= 100.
    pub fn from_cents(cents: u32) -> Result<Self, DomainError> {
        if cents == 0 || cents >= 100 {
            return Err(DomainError::InvalidPrice(cents));
        }
        Ok(Self {
            value: Decimal::new(i64::from(cents), 2),
        })
    }

    pub fn to_cents(&self) -> u32 {
        (self.value * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or(0)
    }

    pub fn probability(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// Price of the opposite side of the same contract.
    pub fn complement(&self) -> Self {
        Self {
            value: Decimal::ONE - self.value,
        }
    }

    /// Fractional profit of a unit stake bought at this price, given the outcome.
    ///
    /// A winning contract pays out 1, so the gain is `(1 - p) / p`; a losing
    /// one is a total loss of `-1`.
    pub fn unit_return(&self, won: bool) -> f64 {
        if !won {
            return -1.0;
        }
        if self.value.is_zero() {
            return 0.0;
        }
        ((Decimal::ONE - self.value) / self.value)
            .to_f64()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents_bounds() {
        assert_eq!(Price::from_cents(5).unwrap().value, dec!(0.05));
        assert_eq!(Price::from_cents(99).unwrap().to_cents(), 99);
        assert_eq!(Price::from_cents(0), Err(DomainError::InvalidPrice(0)));
        assert_eq!(Price::from_cents(100), Err(DomainError::InvalidPrice(100)));
    }

    #[test]
    fn test_unit_return() {
        let p = Price::from_cents(10).unwrap();
        assert!((p.unit_return(true) - 9.0).abs() < 1e-12);
        assert_eq!(p.unit_return(false), -1.0);

        let even = Price::new(dec!(0.5));
        assert!((even.unit_return(true) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_complement() {
        let p = Price::from_cents(30).unwrap();
        assert_eq!(p.complement().value, dec!(0.70));
        assert_eq!(p.complement().to_cents(), 70);
    }
}
