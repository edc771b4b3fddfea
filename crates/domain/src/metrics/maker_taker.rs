//! Returns of the passive and aggressive side of each trade, per price level.

use crate::entities::position::ResolvedPosition;
use crate::enums::PositionRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcomes of one role's positions at a single entry price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleStats {
    pub positions: u64,
    pub wins: u64,
    pub contracts: u64,
    /// Sum of `contracts * (won - price)`, in contracts.
    pub pnl: f64,
}

impl RoleStats {
    /// Adds one position and returns its P&L.
    fn record(&mut self, position: &ResolvedPosition) -> f64 {
        let won = if position.won { 1.0 } else { 0.0 };
        let pnl = position.contracts as f64 * (won - position.price.probability());
        self.positions += 1;
        self.wins += u64::from(position.won);
        self.contracts += position.contracts;
        self.pnl += pnl;
        pnl
    }

    /// Win rate minus the price paid, as a probability.
    pub fn excess_return(&self, price_cents: u32) -> f64 {
        if self.positions == 0 {
            return 0.0;
        }
        self.wins as f64 / self.positions as f64 - f64::from(price_cents) / 100.0
    }
}

/// Taker and maker outcomes at one price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakerTakerRow {
    pub price_cents: u32,
    pub taker: RoleStats,
    pub maker: RoleStats,
}

impl MakerTakerRow {
    pub fn taker_excess(&self) -> f64 {
        self.taker.excess_return(self.price_cents)
    }

    pub fn maker_excess(&self) -> f64 {
        self.maker.excess_return(self.price_cents)
    }
}

/// Side-by-side taker and maker returns across prices.
///
/// Rows cover prices in 1..=99 where both roles held positions. Totals cover
/// every position, so they cancel out: each contract one role gains, the
/// other loses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MakerTakerComparison {
    pub rows: Vec<MakerTakerRow>,
    pub total_taker_pnl: f64,
    pub total_maker_pnl: f64,
}

impl MakerTakerComparison {
    /// Groups each role's positions by the price that role paid.
    pub fn from_positions<'a, I>(positions: I) -> Self
    where
        I: IntoIterator<Item = &'a ResolvedPosition>,
    {
        let mut taker: BTreeMap<u32, RoleStats> = BTreeMap::new();
        let mut maker: BTreeMap<u32, RoleStats> = BTreeMap::new();
        let mut total_taker_pnl = 0.0;
        let mut total_maker_pnl = 0.0;

        for position in positions {
            let cents = position.price.to_cents();
            let (book, total) = match position.role {
                PositionRole::Taker => (&mut taker, &mut total_taker_pnl),
                PositionRole::Maker => (&mut maker, &mut total_maker_pnl),
            };
            *total += book.entry(cents).or_default().record(position);
        }

        let rows = taker
            .into_iter()
            .filter(|(cents, _)| (1..=99).contains(cents))
            .filter_map(|(price_cents, taker)| {
                maker.remove(&price_cents).map(|maker| MakerTakerRow {
                    price_cents,
                    taker,
                    maker,
                })
            })
            .collect();

        Self {
            rows,
            total_taker_pnl,
            total_maker_pnl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Trade;
    use crate::enums::Side;

    fn positions(trades: &[(Trade, Side)]) -> Vec<ResolvedPosition> {
        trades
            .iter()
            .flat_map(|(trade, outcome)| ResolvedPosition::pair_from_trade(trade, *outcome).unwrap())
            .collect()
    }

    #[test]
    fn test_rows_join_both_roles_by_price() {
        let positions = positions(&[
            (Trade::new("A", 10, Side::Yes, 4), Side::Yes),
            (Trade::new("B", 10, Side::No, 2), Side::Yes),
        ]);
        let comparison = MakerTakerComparison::from_positions(&positions);

        let prices: Vec<u32> = comparison.rows.iter().map(|r| r.price_cents).collect();
        assert_eq!(prices, vec![10, 90]);

        let cheap = &comparison.rows[0];
        assert_eq!(cheap.taker.positions, 1);
        assert_eq!(cheap.taker.contracts, 4);
        assert!((cheap.taker.pnl - 3.6).abs() < 1e-9);
        assert!((cheap.maker.pnl - 1.8).abs() < 1e-9);
        assert!((cheap.taker_excess() - 0.9).abs() < 1e-9);

        let dear = &comparison.rows[1];
        assert!((dear.taker_excess() + 0.9).abs() < 1e-9);
        assert!((dear.maker.pnl + 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_totals_cancel_out() {
        let positions = positions(&[
            (Trade::new("A", 10, Side::Yes, 4), Side::Yes),
            (Trade::new("B", 10, Side::No, 2), Side::Yes),
            (Trade::new("C", 63, Side::Yes, 7), Side::No),
            (Trade::new("D", 35, Side::No, 11), Side::No),
        ]);
        let comparison = MakerTakerComparison::from_positions(&positions);
        assert!((comparison.total_taker_pnl - (3.6 - 1.8 - 4.41 + 3.85)).abs() < 1e-9);
        assert!((comparison.total_taker_pnl + comparison.total_maker_pnl).abs() < 1e-9);
    }

    #[test]
    fn test_price_without_counterpart_is_dropped() {
        let taker_only = vec![ResolvedPosition::new(
            Side::Yes,
            crate::value_objects::price::Price::from_cents(20).unwrap(),
            false,
            3,
            PositionRole::Taker,
        )];
        let comparison = MakerTakerComparison::from_positions(&taker_only);
        assert!(comparison.rows.is_empty());
        assert!((comparison.total_taker_pnl + 0.6).abs() < 1e-9);
        assert_eq!(comparison.total_maker_pnl, 0.0);
    }

    #[test]
    fn test_empty_role_has_no_excess() {
        assert_eq!(RoleStats::default().excess_return(40), 0.0);
    }
}
