//! Dataset size, per platform.

use crate::entities::{Market, Trade};
use crate::enums::{Platform, Side};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Trading activity on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformActivity {
    pub platform: Platform,
    pub trades: u64,
    pub contracts: u64,
    /// Distinct tickers traded.
    pub markets_traded: u64,
}

/// Counts of the trades and markets an analysis runs over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// One entry per platform with at least one trade, in platform order.
    pub platforms: Vec<PlatformActivity>,
    pub markets_listed: u64,
    pub markets_resolved: u64,
    pub resolved_yes: u64,
    pub resolved_no: u64,
}

impl DatasetOverview {
    pub fn from_records(trades: &[Trade], markets: &[Market]) -> Self {
        let mut grouped: BTreeMap<Platform, (u64, u64, HashSet<&str>)> = BTreeMap::new();
        for trade in trades {
            let entry = grouped.entry(trade.platform).or_default();
            entry.0 += 1;
            entry.1 += trade.count;
            entry.2.insert(trade.ticker.as_str());
        }

        let platforms = grouped
            .into_iter()
            .map(|(platform, (trades, contracts, tickers))| PlatformActivity {
                platform,
                trades,
                contracts,
                markets_traded: tickers.len() as u64,
            })
            .collect();

        let outcomes: Vec<Side> = markets.iter().filter_map(Market::outcome).collect();
        Self {
            platforms,
            markets_listed: markets.len() as u64,
            markets_resolved: outcomes.len() as u64,
            resolved_yes: outcomes.iter().filter(|&&s| s == Side::Yes).count() as u64,
            resolved_no: outcomes.iter().filter(|&&s| s == Side::No).count() as u64,
        }
    }

    pub fn total_trades(&self) -> u64 {
        self.platforms.iter().map(|p| p.trades).sum()
    }

    pub fn total_contracts(&self) -> u64 {
        self.platforms.iter().map(|p| p.contracts).sum()
    }

    /// Activity on `platform`, if it traded at all.
    pub fn platform(&self, platform: Platform) -> Option<&PlatformActivity> {
        self.platforms.iter().find(|p| p.platform == platform)
    }
}
