/// z-score of the two-sided 95% normal interval.
const Z_95: f64 = 1.959_963_984_540_054;

/// Estimate of a binomial proportion from `successes` out of `trials`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionEstimate {
    /// Number of successes observed.
    pub successes: u64,
    /// Number of trials.
    pub trials: u64,
    /// Observed fraction of successes.
    pub rate: f64,
    /// Standard error of the observed fraction, `sqrt(p (1 - p) / n)`.
    pub std_error: f64,
    /// Lower bound of the 95% Wilson score interval.
    pub lower_95: f64,
    /// Upper bound of the 95% Wilson score interval.
    pub upper_95: f64,
}

impl ProportionEstimate {
    /// Computes the estimate.
    ///
    /// # Returns
    ///
    /// * `Some(ProportionEstimate)` - if `trials > 0` and `successes <= trials`
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// # use monty_stats::proportion::ProportionEstimate;
    /// let estimate = ProportionEstimate::new(50, 100).unwrap();
    /// assert_eq!(estimate.rate, 0.5);
    /// assert!((estimate.std_error - 0.05).abs() < 1e-12);
    /// assert!(estimate.lower_95 < 0.5 && 0.5 < estimate.upper_95);
    ///
    /// assert!(ProportionEstimate::new(0, 0).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(successes: u64, trials: u64) -> Option<Self> {
        if trials == 0 || successes > trials {
            return None;
        }
        let n = trials as f64;
        let p = successes as f64 / n;
        let std_error = (p * (1.0 - p) / n).sqrt();

        // Wilson score interval stays inside [0, 1] and behaves for p near 0 or 1.
        let z2 = Z_95 * Z_95;
        let denominator = 1.0 + z2 / n;
        let center = (p + z2 / (2.0 * n)) / denominator;
        let half_width = Z_95 * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

        Some(Self {
            successes,
            trials,
            rate: p,
            std_error,
            lower_95: (center - half_width).max(0.0),
            upper_95: (center + half_width).min(1.0),
        })
    }

    /// Returns whether `value` lies inside the 95% interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower_95..=self.upper_95).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_counts() {
        assert_eq!(ProportionEstimate::new(1, 0), None);
        assert_eq!(ProportionEstimate::new(11, 10), None);
    }

    #[test]
    fn test_interval_brackets_rate() {
        let estimate = ProportionEstimate::new(333, 1000).unwrap();
        assert!((estimate.rate - 0.333).abs() < 1e-12);
        assert!(estimate.lower_95 < estimate.rate);
        assert!(estimate.rate < estimate.upper_95);
        assert!(estimate.contains(1.0 / 3.0));
        assert!(!estimate.contains(0.5));
    }

    #[test]
    fn test_interval_at_extremes() {
        let none = ProportionEstimate::new(0, 20).unwrap();
        assert_eq!(none.rate, 0.0);
        assert_eq!(none.std_error, 0.0);
        assert_eq!(none.lower_95, 0.0);
        assert!(none.upper_95 > 0.0 && none.upper_95 < 0.2);

        let all = ProportionEstimate::new(20, 20).unwrap();
        assert_eq!(all.upper_95, 1.0);
        assert!(all.lower_95 > 0.8 && all.lower_95 < 1.0);
    }

    #[test]
    fn test_interval_narrows_with_trials() {
        let small = ProportionEstimate::new(30, 100).unwrap();
        let large = ProportionEstimate::new(3000, 10_000).unwrap();
        assert!(large.upper_95 - large.lower_95 < small.upper_95 - small.lower_95);
    }
}
