//! Compounding equity trajectories and their drawdowns.

/// Equity every trajectory starts from.
pub const INITIAL_EQUITY: f64 = 1.0;

/// Portfolio value after each simulated trade, starting from [`INITIAL_EQUITY`].
#[derive(Debug, Clone, PartialEq)]
pub struct EquityCurve {
    pub values: Vec<f64>,
}

impl EquityCurve {
    /// Compounds `returns`, staking `stake_fraction` of current equity on each.
    ///
    /// Each step multiplies equity by `1 + r * stake_fraction`. With returns
    /// bounded below by `-1` and a fraction in (0, 1], equity never goes negative.
    #[must_use]
    pub fn compound(returns: &[f64], stake_fraction: f64) -> Self {
        let values = returns
            .iter()
            .scan(INITIAL_EQUITY, |equity, r| {
                *equity *= 1.0 + r * stake_fraction;
                Some(*equity)
            })
            .collect();
        Self { values }
    }

    /// Running peak, seeded with the initial equity.
    #[must_use]
    pub fn running_max(&self) -> Vec<f64> {
        self.values
            .iter()
            .scan(INITIAL_EQUITY, |peak, &v| {
                *peak = peak.max(v);
                Some(*peak)
            })
            .collect()
    }

    /// Relative decline from the running peak at each step.
    #[must_use]
    pub fn drawdowns(&self) -> Vec<f64> {
        self.values
            .iter()
            .zip(self.running_max())
            .map(|(&equity, peak)| drawdown(peak, equity))
            .collect()
    }

    /// Largest drawdown over the trajectory, in [0, 1].
    #[must_use]
    pub fn max_drawdown(&self) -> f64 {
        self.drawdowns().into_iter().fold(0.0, f64::max)
    }

    /// Last value minus the initial equity; zero for an empty trajectory.
    #[must_use]
    pub fn final_return(&self) -> f64 {
        self.values.last().map_or(0.0, |v| v - INITIAL_EQUITY)
    }
}

/// `(peak - equity) / peak`, or 0 when the peak itself is 0.
fn drawdown(peak: f64, equity: f64) -> f64 {
    if peak <= 0.0 {
        return 0.0;
    }
    (peak - equity) / peak
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_then_partial_recovery() {
        let curve = EquityCurve::compound(&[-1.0, 1.0], 0.5);
        assert_eq!(curve.values, vec![0.5, 0.75]);
        assert_eq!(curve.max_drawdown(), 0.5);
        assert_eq!(curve.final_return(), -0.25);
    }

    #[test]
    fn test_loss_then_recovery_to_break_even() {
        let curve = EquityCurve::compound(&[-1.0, 2.0], 0.5);
        assert_eq!(curve.values, vec![0.5, 1.0]);
        // The peak is the starting equity, not the first trajectory value.
        assert_eq!(curve.max_drawdown(), 0.5);
        assert_eq!(curve.final_return(), 0.0);
    }

    #[test]
    fn test_flat_sample_stays_flat() {
        let curve = EquityCurve::compound(&[0.0; 20], 0.3);
        assert!(curve.values.iter().all(|&v| v == 1.0));
        assert_eq!(curve.max_drawdown(), 0.0);
        assert_eq!(curve.final_return(), 0.0);
    }

    #[test]
    fn test_monotonic_gain_has_no_drawdown() {
        let curve = EquityCurve::compound(&[0.5, 0.1, 2.0], 0.1);
        assert_eq!(curve.max_drawdown(), 0.0);
        assert!(curve.final_return() > 0.0);
    }

    #[test]
    fn test_running_max_non_decreasing() {
        let curve = EquityCurve::compound(&[1.0, -1.0, -1.0, 3.0, -1.0, 0.5], 0.4);
        let peaks = curve.running_max();
        assert!(peaks.windows(2).all(|w| w[0] <= w[1]));
        assert!(peaks.iter().zip(&curve.values).all(|(p, v)| p >= v));
    }

    #[test]
    fn test_full_stake_wipeout() {
        let curve = EquityCurve::compound(&[-1.0, 2.0, 1.0], 1.0);
        assert_eq!(curve.values, vec![0.0, 0.0, 0.0]);
        assert_eq!(curve.max_drawdown(), 1.0);
        assert_eq!(curve.final_return(), -1.0);
    }

    #[test]
    fn test_zero_peak_convention() {
        assert_eq!(drawdown(0.0, 0.0), 0.0);
        assert_eq!(drawdown(2.0, 1.0), 0.5);
    }

    #[test]
    fn test_empty_curve() {
        let curve = EquityCurve::compound(&[], 0.5);
        assert!(curve.values.is_empty());
        assert_eq!(curve.max_drawdown(), 0.0);
        assert_eq!(curve.final_return(), 0.0);
    }
}
