//! Pearson's chi-square goodness-of-fit test.
//!
//! Critical values for 1 to 10 degrees of freedom come from the standard
//! table. Larger degrees of freedom use the Wilson-Hilferty approximation,
//! which is accurate to about 0.5% there.

/// Significance level of a test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Significance {
    /// 5%
    #[default]
    P05,
    /// 1%
    P01,
    /// 0.1%
    P001,
}

impl Significance {
    #[must_use]
    pub const fn alpha(self) -> f64 {
        match self {
            Self::P05 => 0.05,
            Self::P01 => 0.01,
            Self::P001 => 0.001,
        }
    }

    /// Upper-tail standard normal quantile for this level.
    const fn z(self) -> f64 {
        match self {
            Self::P05 => 1.644_854,
            Self::P01 => 2.326_348,
            Self::P001 => 3.090_232,
        }
    }

    const fn table(self) -> &'static [f64; 10] {
        match self {
            Self::P05 => &TABLE_P05,
            Self::P01 => &TABLE_P01,
            Self::P001 => &TABLE_P001,
        }
    }
}

const TABLE_P05: [f64; 10] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919, 18.307,
];
const TABLE_P01: [f64; 10] = [
    6.635, 9.210, 11.345, 13.277, 15.086, 16.812, 18.475, 20.090, 21.666, 23.209,
];
const TABLE_P001: [f64; 10] = [
    10.828, 13.816, 16.266, 18.467, 20.515, 22.458, 24.322, 26.124, 27.877, 29.588,
];

/// Computes Pearson's statistic `sum((o - e)^2 / e)`.
///
/// # Returns
///
/// * `Some(f64)` - if both slices have the same length and every expected count is positive
/// * `None` - otherwise
///
/// # Examples
///
/// ```
/// # use monty_stats::chi_square::statistic;
/// let chi2 = statistic(&[30, 70], &[50.0, 50.0]).unwrap();
/// assert!((chi2 - 16.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn statistic(observed: &[u64], expected: &[f64]) -> Option<f64> {
    if observed.len() != expected.len() || expected.iter().any(|&e| e.is_nan() || e <= 0.0) {
        return None;
    }
    let sum = observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| {
            let diff = o as f64 - e;
            diff * diff / e
        })
        .sum();
    Some(sum)
}

/// Returns the value the statistic must exceed to reject at `significance`.
///
/// # Panics
///
/// Panics if `degrees_of_freedom` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn critical_value(degrees_of_freedom: usize, significance: Significance) -> f64 {
    assert!(degrees_of_freedom > 0, "degrees of freedom must be positive");
    if let Some(&value) = significance.table().get(degrees_of_freedom - 1) {
        return value;
    }
    let k = degrees_of_freedom as f64;
    let a = 2.0 / (9.0 * k);
    k * (1.0 - a + significance.z() * a.sqrt()).powi(3)
}

/// Outcome of a goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodnessOfFit {
    /// Pearson's chi-square statistic.
    pub statistic: f64,
    /// Number of categories minus one.
    pub degrees_of_freedom: usize,
    /// Critical value at [`GoodnessOfFit::significance`].
    pub critical_value: f64,
    pub significance: Significance,
    /// Whether some expected count is below 5, where the chi-square
    /// approximation is unreliable.
    pub low_expected: bool,
}

impl GoodnessOfFit {
    /// Tests `observed` counts against `expected` counts.
    ///
    /// # Returns
    ///
    /// * `Some(GoodnessOfFit)` - if there are at least two categories and [`statistic`] succeeds
    /// * `None` - otherwise
    #[must_use]
    pub fn test(observed: &[u64], expected: &[f64], significance: Significance) -> Option<Self> {
        if observed.len() < 2 {
            return None;
        }
        let statistic = statistic(observed, expected)?;
        let degrees_of_freedom = observed.len() - 1;
        Some(Self {
            statistic,
            degrees_of_freedom,
            critical_value: critical_value(degrees_of_freedom, significance),
            significance,
            low_expected: expected.iter().any(|&e| e < 5.0),
        })
    }

    /// Returns whether the observed counts are consistent with the expected ones.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.statistic <= self.critical_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_rejects_mismatched_input() {
        assert_eq!(statistic(&[1, 2], &[1.0]), None);
        assert_eq!(statistic(&[1, 2], &[1.0, 0.0]), None);
        assert_eq!(statistic(&[], &[]), Some(0.0));
    }

    #[test]
    fn test_statistic_is_zero_on_exact_fit() {
        assert_eq!(statistic(&[10, 20, 30], &[10.0, 20.0, 30.0]), Some(0.0));
    }

    #[test]
    fn test_critical_value_table() {
        assert_eq!(critical_value(1, Significance::P05), 3.841);
        assert_eq!(critical_value(4, Significance::P001), 18.467);
        assert_eq!(critical_value(10, Significance::P01), 23.209);
    }

    #[test]
    fn test_critical_value_approximation() {
        // Published values: df=20 -> 31.410, df=99 -> 123.225 at 5%.
        assert!((critical_value(20, Significance::P05) - 31.410).abs() < 0.1);
        assert!((critical_value(99, Significance::P05) - 123.225).abs() < 0.3);
        assert!((critical_value(30, Significance::P001) - 59.703).abs() < 0.3);
    }

    #[test]
    fn test_critical_value_grows_with_strictness() {
        for dof in [1, 5, 10, 11, 50] {
            let p05 = critical_value(dof, Significance::P05);
            let p01 = critical_value(dof, Significance::P01);
            let p001 = critical_value(dof, Significance::P001);
            assert!(p05 < p01 && p01 < p001, "dof = {dof}");
        }
    }

    #[test]
    fn test_goodness_of_fit() {
        let fit = GoodnessOfFit::test(&[500, 500], &[500.0, 500.0], Significance::P05).unwrap();
        assert!(fit.is_consistent());
        assert_eq!(fit.degrees_of_freedom, 1);
        assert!(!fit.low_expected);

        let fit = GoodnessOfFit::test(&[900, 100], &[500.0, 500.0], Significance::P001).unwrap();
        assert!(!fit.is_consistent());

        let fit = GoodnessOfFit::test(&[3, 1], &[2.0, 2.0], Significance::P05).unwrap();
        assert!(fit.low_expected);

        assert!(GoodnessOfFit::test(&[5], &[5.0], Significance::P05).is_none());
    }
}
