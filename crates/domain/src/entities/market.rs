use crate::enums::{MarketStatus, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub ticker: String,
    pub status: MarketStatus,
    #[serde(default)]
    pub result: Option<Side>,
}

impl Market {
    pub fn new(ticker: impl Into<String>, status: MarketStatus, result: Option<Side>) -> Self {
        Self {
            ticker: ticker.into(),
            status,
            result,
        }
    }

    /// Winning side, only for finalized markets that settled YES or NO.
    pub fn outcome(&self) -> Option<Side> {
        match self.status {
            MarketStatus::Finalized => self.result,
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_requires_finalized() {
        let open = Market::new("A", MarketStatus::Active, Some(Side::Yes));
        assert_eq!(open.outcome(), None);

        let settled = Market::new("A", MarketStatus::Finalized, Some(Side::No));
        assert_eq!(settled.outcome(), Some(Side::No));
        assert!(settled.is_resolved());

        let voided = Market::new("A", MarketStatus::Finalized, None);
        assert!(!voided.is_resolved());
    }
}
