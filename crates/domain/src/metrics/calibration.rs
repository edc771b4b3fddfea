//! Price calibration: does a contract trading at `p` cents win `p`% of the time?

use crate::entities::position::ResolvedPosition;
use crate::enums::{PositionRole, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positions sharing one entry price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBin {
    pub price_cents: u32,
    pub positions: u64,
    pub wins: u64,
}

impl CalibrationBin {
    pub fn implied_prob(&self) -> f64 {
        f64::from(self.price_cents) / 100.0
    }

    pub fn win_rate(&self) -> f64 {
        if self.positions == 0 {
            return 0.0;
        }
        self.wins as f64 / self.positions as f64
    }

    /// Observed minus implied probability. Negative means the price was too high.
    pub fn deviation(&self) -> f64 {
        self.win_rate() - self.implied_prob()
    }
}

/// Win rate per price cent, ordered by price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCurve {
    pub bins: Vec<CalibrationBin>,
}

impl CalibrationCurve {
    /// Groups positions by entry price in cents (1..=99).
    pub fn from_positions<'a, I>(positions: I) -> Self
    where
        I: IntoIterator<Item = &'a ResolvedPosition>,
    {
        let mut grouped: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
        for position in positions {
            let cents = position.price.to_cents();
            if !(1..=99).contains(&cents) {
                continue;
            }
            let entry = grouped.entry(cents).or_insert((0, 0));
            entry.0 += 1;
            if position.won {
                entry.1 += 1;
            }
        }

        Self {
            bins: grouped
                .into_iter()
                .map(|(price_cents, (positions, wins))| CalibrationBin {
                    price_cents,
                    positions,
                    wins,
                })
                .collect(),
        }
    }

    pub fn total_positions(&self) -> u64 {
        self.bins.iter().map(|b| b.positions).sum()
    }

    /// Position-weighted mean absolute gap between win rate and price.
    pub fn mean_absolute_error(&self) -> f64 {
        let total = self.total_positions();
        if total == 0 {
            return 0.0;
        }
        self.bins
            .iter()
            .map(|b| b.deviation().abs() * b.positions as f64)
            .sum::<f64>()
            / total as f64
    }
}

/// Taker outcomes at one low YES price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongshotBin {
    pub price_cents: u32,
    pub trades: u64,
    pub contracts: u64,
    /// Win rate of YES takers; `None` when no YES taker traded at this price.
    pub yes_taker_win_rate: Option<f64>,
    pub no_taker_win_rate: Option<f64>,
}

impl LongshotBin {
    pub fn implied_prob(&self) -> f64 {
        f64::from(self.price_cents) / 100.0
    }

    /// Payout per dollar staked on YES; 1.0 is a fair price.
    ///
    /// Falls back to the implied probability when no YES taker traded here.
    pub fn ev_per_dollar(&self) -> f64 {
        let win_rate = self.yes_taker_win_rate.unwrap_or_else(|| self.implied_prob());
        win_rate / self.implied_prob()
    }
}

/// Taker win rates for YES prices from 1 up to `max_cents`, keyed on the YES price.
pub fn longshot_bias<'a, I>(positions: I, max_cents: u32) -> Vec<LongshotBin>
where
    I: IntoIterator<Item = &'a ResolvedPosition>,
{
    #[derive(Default)]
    struct Acc {
        trades: u64,
        contracts: u64,
        yes: (u64, u64),
        no: (u64, u64),
    }

    let mut grouped: BTreeMap<u32, Acc> = BTreeMap::new();
    for position in positions
        .into_iter()
        .filter(|p| p.role == PositionRole::Taker)
    {
        let yes_cents = match position.side {
            Side::Yes => position.price.to_cents(),
            Side::No => position.price.complement().to_cents(),
        };
        if yes_cents == 0 || yes_cents > max_cents {
            continue;
        }
        let acc = grouped.entry(yes_cents).or_default();
        acc.trades += 1;
        acc.contracts += position.contracts;
        let side_acc = match position.side {
            Side::Yes => &mut acc.yes,
            Side::No => &mut acc.no,
        };
        side_acc.0 += 1;
        if position.won {
            side_acc.1 += 1;
        }
    }

    let rate = |(n, wins): (u64, u64)| (n > 0).then(|| wins as f64 / n as f64);
    grouped
        .into_iter()
        .map(|(price_cents, acc)| LongshotBin {
            price_cents,
            trades: acc.trades,
            contracts: acc.contracts,
            yes_taker_win_rate: rate(acc.yes),
            no_taker_win_rate: rate(acc.no),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::price::Price;

    fn position(side: Side, cents: u32, won: bool, role: PositionRole) -> ResolvedPosition {
        ResolvedPosition::new(side, Price::from_cents(cents).unwrap(), won, 2, role)
    }

    #[test]
    fn test_calibration_bins_sorted_by_price() {
        let positions = vec![
            position(Side::Yes, 70, true, PositionRole::Taker),
            position(Side::No, 30, false, PositionRole::Maker),
            position(Side::Yes, 70, false, PositionRole::Taker),
            position(Side::Yes, 10, false, PositionRole::Taker),
        ];
        let curve = CalibrationCurve::from_positions(&positions);

        let prices: Vec<u32> = curve.bins.iter().map(|b| b.price_cents).collect();
        assert_eq!(prices, vec![10, 30, 70]);
        assert_eq!(curve.total_positions(), 4);

        let seventy = &curve.bins[2];
        assert_eq!(seventy.positions, 2);
        assert!((seventy.win_rate() - 0.5).abs() < 1e-12);
        assert!((seventy.deviation() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_calibration_has_zero_error() {
        let mut positions = Vec::new();
        for i in 0..4 {
            positions.push(position(Side::Yes, 25, i == 0, PositionRole::Taker));
        }
        let curve = CalibrationCurve::from_positions(&positions);
        assert!(curve.mean_absolute_error().abs() < 1e-12);
    }

    #[test]
    fn test_empty_curve() {
        let empty: Vec<ResolvedPosition> = Vec::new();
        let curve = CalibrationCurve::from_positions(&empty);
        assert!(curve.bins.is_empty());
        assert_eq!(curve.mean_absolute_error(), 0.0);
    }

    #[test]
    fn test_longshot_bias_groups_by_yes_price() {
        let positions = vec![
            position(Side::Yes, 5, false, PositionRole::Taker),
            position(Side::Yes, 5, false, PositionRole::Taker),
            // NO taker at 95 cents is a YES price of 5
            position(Side::No, 95, true, PositionRole::Taker),
            position(Side::Yes, 5, true, PositionRole::Maker),
            position(Side::Yes, 40, true, PositionRole::Taker),
        ];
        let bins = longshot_bias(&positions, 20);

        assert_eq!(bins.len(), 1);
        let bin = &bins[0];
        assert_eq!(bin.price_cents, 5);
        assert_eq!(bin.trades, 3);
        assert_eq!(bin.contracts, 6);
        assert_eq!(bin.yes_taker_win_rate, Some(0.0));
        assert_eq!(bin.no_taker_win_rate, Some(1.0));
        assert_eq!(bin.ev_per_dollar(), 0.0);
    }

    #[test]
    fn test_ev_falls_back_to_fair() {
        let bin = LongshotBin {
            price_cents: 3,
            trades: 1,
            contracts: 1,
            yes_taker_win_rate: None,
            no_taker_win_rate: Some(1.0),
        };
        assert!((bin.ev_per_dollar() - 1.0).abs() < 1e-12);
    }
}
