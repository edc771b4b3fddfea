//! Joins trades to the outcome of their market.

use pma_domain::entities::{Market, ResolvedPosition, Trade};
use pma_domain::enums::Side;
use pma_domain::value_objects::signal::{SignalFilter, SignalStats};
use pma_domain::value_objects::return_sample::ReturnSample;
use std::collections::HashMap;
use tracing::{info, warn};

/// Taker and maker positions of every trade on a settled market.
///
/// Trades on unsettled or unknown markets are dropped, as are trades whose
/// price is outside 1..=99 cents.
pub fn resolve_positions(trades: &[Trade], markets: &[Market]) -> Vec<ResolvedPosition> {
    let outcomes: HashMap<&str, Side> = markets
        .iter()
        .filter_map(|m| m.outcome().map(|side| (m.ticker.as_str(), side)))
        .collect();

    let mut positions = Vec::with_capacity(trades.len() * 2);
    let mut invalid = 0usize;
    for trade in trades {
        let Some(&outcome) = outcomes.get(trade.ticker.as_str()) else {
            continue;
        };
        match ResolvedPosition::pair_from_trade(trade, outcome) {
            Ok(pair) => positions.extend(pair),
            Err(_) => invalid += 1,
        }
    }

    if invalid > 0 {
        warn!(invalid, "Skipped trades with out-of-range prices");
    }
    info!(
        markets = outcomes.len(),
        positions = positions.len(),
        "Resolved trades against settled markets"
    );
    positions
}

/// Positions matching a signal, with their return sample and headline stats.
#[derive(Debug, Clone)]
pub struct SignalSelection {
    pub filter: SignalFilter,
    pub sample: ReturnSample,
    pub stats: SignalStats,
}

impl SignalSelection {
    pub fn select(positions: &[ResolvedPosition], filter: SignalFilter) -> Self {
        let matching: Vec<&ResolvedPosition> =
            positions.iter().filter(|p| filter.matches(p)).collect();
        Self {
            filter,
            sample: ReturnSample::from_positions(matching.iter().copied()),
            stats: SignalStats::from_positions(&matching),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pma_domain::enums::{MarketStatus, PositionRole};

    fn fixtures() -> (Vec<Trade>, Vec<Market>) {
        let trades = vec![
            Trade::new("WIN", 10, Side::Yes, 3),
            Trade::new("LOSE", 8, Side::Yes, 1),
            Trade::new("LOSE", 40, Side::No, 2),
            Trade::new("OPEN", 10, Side::Yes, 1),
            Trade::new("UNKNOWN", 10, Side::Yes, 1),
            Trade::new("WIN", 0, Side::Yes, 1),
        ];
        let markets = vec![
            Market::new("WIN", MarketStatus::Finalized, Some(Side::Yes)),
            Market::new("LOSE", MarketStatus::Finalized, Some(Side::No)),
            Market::new("OPEN", MarketStatus::Active, None),
        ];
        (trades, markets)
    }

    #[test]
    fn test_resolve_positions() {
        let (trades, markets) = fixtures();
        let positions = resolve_positions(&trades, &markets);

        // Three valid trades on settled markets, two positions each.
        assert_eq!(positions.len(), 6);
        let takers: Vec<&ResolvedPosition> = positions
            .iter()
            .filter(|p| p.role == PositionRole::Taker)
            .collect();
        assert_eq!(takers.len(), 3);
        assert!(takers[0].won);
        assert!(!takers[1].won);
        assert!(takers[2].won);
        // Wins and losses balance between the two sides of each trade.
        assert_eq!(positions.iter().filter(|p| p.won).count(), 3);
    }

    #[test]
    fn test_signal_selection() {
        let (trades, markets) = fixtures();
        let positions = resolve_positions(&trades, &markets);
        let selection = SignalSelection::select(&positions, SignalFilter::longshot());

        // YES takers at 10 and 8 cents.
        assert_eq!(selection.sample.len(), 2);
        assert_eq!(selection.stats.trade_count, 2);
        assert!((selection.stats.win_rate - 0.5).abs() < 1e-12);
        assert!((selection.stats.implied_prob - 0.09).abs() < 1e-12);
        assert!(selection.sample.contains(-1.0));
        assert!(selection.sample.contains(9.0));
    }
}
