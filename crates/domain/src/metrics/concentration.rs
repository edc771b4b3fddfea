//! Volume concentration of trade sizes: Lorenz curve and Gini coefficient.

use super::{mean, percentile};
use serde::{Deserialize, Serialize};

/// Cumulative share of volume against cumulative share of trades,
/// trades ordered from smallest to largest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LorenzCurve {
    /// Fraction of trades, `(i + 1) / n`.
    pub trade_share: Vec<f64>,
    /// Fraction of total volume held by the smallest `i + 1` trades.
    pub volume_share: Vec<f64>,
}

impl LorenzCurve {
    /// Builds the curve from positive trade sizes. Zero sizes are ignored.
    pub fn from_sizes(sizes: &[u64]) -> Self {
        let mut sorted: Vec<u64> = sizes.iter().copied().filter(|&s| s > 0).collect();
        sorted.sort_unstable();

        let n = sorted.len();
        let total: f64 = sorted.iter().map(|&s| s as f64).sum();
        let mut trade_share = Vec::with_capacity(n);
        let mut volume_share = Vec::with_capacity(n);
        let mut running = 0.0;
        for (i, size) in sorted.iter().enumerate() {
            running += *size as f64;
            trade_share.push((i + 1) as f64 / n as f64);
            volume_share.push(if total > 0.0 { running / total } else { 0.0 });
        }

        Self {
            trade_share,
            volume_share,
        }
    }

    pub fn len(&self) -> usize {
        self.trade_share.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trade_share.is_empty()
    }

    /// Gini coefficient from the trapezoidal area under the curve.
    ///
    /// 0 means every trade has the same size; values approach 1 as volume
    /// concentrates in a single trade.
    pub fn gini(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mut area = 0.0;
        let mut prev_x = 0.0;
        let mut prev_y = 0.0;
        for (&x, &y) in self.trade_share.iter().zip(&self.volume_share) {
            area += (x - prev_x) * (y + prev_y) / 2.0;
            prev_x = x;
            prev_y = y;
        }
        1.0 - 2.0 * area
    }

    /// Share of trades, counted from the largest, that together carry half of all volume.
    pub fn top_share_for_half_volume(&self) -> f64 {
        let idx = self.volume_share.partition_point(|&v| v < 0.5);
        match self.trade_share.get(idx) {
            Some(share) => 1.0 - share,
            None => 0.0,
        }
    }

    /// Keeps every `len / max_points`-th point so the curve stays plottable.
    pub fn downsample(&self, max_points: usize) -> Self {
        let step = (self.len() / max_points.max(1)).max(1);
        Self {
            trade_share: self.trade_share.iter().step_by(step).copied().collect(),
            volume_share: self.volume_share.iter().step_by(step).copied().collect(),
        }
    }
}

/// Summary of a trade size distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeDistribution {
    pub trades: usize,
    pub median: f64,
    pub mean: f64,
    pub p99: f64,
    pub gini: f64,
    pub top_share_for_half_volume: f64,
}

impl SizeDistribution {
    pub fn from_sizes(sizes: &[u64]) -> Self {
        let curve = LorenzCurve::from_sizes(sizes);
        let mut values: Vec<f64> = sizes.iter().filter(|&&s| s > 0).map(|&s| s as f64).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Self {
            trades: values.len(),
            median: percentile(&values, 50.0),
            mean: mean(&values),
            p99: percentile(&values, 99.0),
            gini: curve.gini(),
            top_share_for_half_volume: curve.top_share_for_half_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_sizes_have_zero_gini() {
        let curve = LorenzCurve::from_sizes(&[5, 5, 5, 5]);
        assert!(curve.gini().abs() < 1e-12);
        assert_eq!(curve.volume_share, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_concentrated_sizes() {
        // One trade holds all but 3 units of volume.
        let curve = LorenzCurve::from_sizes(&[1, 1, 1, 997]);
        let gini = curve.gini();
        assert!(gini > 0.7 && gini < 0.75, "gini = {gini}");
        assert!((curve.top_share_for_half_volume() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_share_for_half_volume() {
        let curve = LorenzCurve::from_sizes(&[1, 1, 1, 1, 2, 2, 2, 10]);
        // Cumulative volume: 1,2,3,4,6,8,10,20 of 20; 0.5 first reached at index 6.
        let share = curve.top_share_for_half_volume();
        assert!((share - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sizes_ignored_and_empty() {
        let curve = LorenzCurve::from_sizes(&[0, 0]);
        assert!(curve.is_empty());
        assert_eq!(curve.gini(), 0.0);
        assert_eq!(curve.top_share_for_half_volume(), 0.0);
    }

    #[test]
    fn test_downsample() {
        let sizes: Vec<u64> = (1..=1000).collect();
        let curve = LorenzCurve::from_sizes(&sizes);
        let small = curve.downsample(100);
        assert_eq!(small.len(), 100);
        assert_eq!(small.trade_share[0], curve.trade_share[0]);
    }

    #[test]
    fn test_size_distribution() {
        let dist = SizeDistribution::from_sizes(&[1, 2, 3, 4, 100]);
        assert_eq!(dist.trades, 5);
        assert_eq!(dist.median, 3.0);
        assert_eq!(dist.mean, 22.0);
        assert!(dist.p99 > 90.0);
        assert!(dist.gini > 0.0);
    }
}
