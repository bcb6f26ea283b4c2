use chrono::{DateTime, Utc};
use monty_engine::{Seed, Strategy, TrialBatch, TrialMode};
use monty_stats::{
    chi_square::{GoodnessOfFit, Significance},
    proportion::ProportionEstimate,
};
use serde::{Deserialize, Serialize};

/// Result of a headless simulation run, as written by `monty simulate --output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Timestamp when the report was created (ISO 8601 format)
    pub generated_at: DateTime<Utc>,
    /// Seed the simulation was run with; rerunning with it reproduces the batch
    pub seed: Seed,
    pub mode: TrialMode,
    pub batch: TrialBatch,
    pub stay: StrategyReport,
    pub switch: StrategyReport,
    /// Goodness-of-fit of the stay wins against the theoretical rate, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckReport>,
}

/// Win statistics of one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub wins: u64,
    pub win_rate: f64,
    pub std_error: f64,
    /// 95% Wilson score interval of the win rate
    pub ci95: [f64; 2],
    pub theoretical_win_rate: f64,
}

/// Chi-square test of the observed win/loss counts against theory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub statistic: f64,
    pub degrees_of_freedom: usize,
    pub critical_value: f64,
    pub alpha: f64,
    pub consistent: bool,
    /// Whether an expected count is below 5, making the test unreliable
    pub low_expected: bool,
}

impl SimulationReport {
    #[must_use]
    pub fn new(seed: Seed, batch: TrialBatch, check: Option<Significance>) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            mode: batch.mode,
            batch,
            stay: StrategyReport::new(&batch, Strategy::Stay),
            switch: StrategyReport::new(&batch, Strategy::Switch),
            check: check.and_then(|significance| CheckReport::new(&batch, significance)),
        }
    }

    #[must_use]
    pub fn strategy(&self, strategy: Strategy) -> &StrategyReport {
        match strategy {
            Strategy::Stay => &self.stay,
            Strategy::Switch => &self.switch,
        }
    }
}

impl StrategyReport {
    fn new(batch: &TrialBatch, strategy: Strategy) -> Self {
        let wins = batch.wins(strategy);
        let win_rate = batch.win_rate(strategy);
        let (std_error, ci95) = ProportionEstimate::new(wins, batch.trial_count).map_or(
            (0.0, [win_rate, win_rate]),
            |estimate| (estimate.std_error, [estimate.lower_95, estimate.upper_95]),
        );
        Self {
            wins,
            win_rate,
            std_error,
            ci95,
            theoretical_win_rate: batch.theoretical_win_rate(strategy),
        }
    }
}

impl CheckReport {
    /// Tests stay wins and stay losses against `1/n` and `(n-1)/n` of the trials.
    #[expect(clippy::cast_precision_loss)]
    fn new(batch: &TrialBatch, significance: Significance) -> Option<Self> {
        let trials = batch.trial_count as f64;
        let stay = batch.theoretical_win_rate(Strategy::Stay);
        let observed = [batch.stay_wins, batch.trial_count - batch.stay_wins];
        let expected = [trials * stay, trials * (1.0 - stay)];
        let fit = GoodnessOfFit::test(&observed, &expected, significance)?;
        Some(Self {
            statistic: fit.statistic,
            degrees_of_freedom: fit.degrees_of_freedom,
            critical_value: fit.critical_value,
            alpha: significance.alpha(),
            consistent: fit.is_consistent(),
            low_expected: fit.low_expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use monty_engine::TrialSimulator;

    use super::*;

    fn batch_seed() -> Seed {
        Seed::from_bytes([8; 16])
    }

    fn report(check: Option<Significance>) -> SimulationReport {
        let seed = batch_seed();
        let batch = TrialSimulator::with_seed(seed).run(3, 3_000).unwrap();
        SimulationReport::new(seed, batch, check)
    }

    #[test]
    fn test_strategy_reports() {
        let report = report(None);
        assert_eq!(report.stay.wins + report.switch.wins, 3_000);
        for strategy in Strategy::ALL {
            let stats = report.strategy(strategy);
            assert!(stats.ci95[0] <= stats.win_rate && stats.win_rate <= stats.ci95[1]);
            assert!(stats.std_error > 0.0);
        }
        assert!(report.check.is_none());
    }

    #[test]
    fn test_check_accepts_fair_simulation() {
        let check = report(Some(Significance::P001)).check.unwrap();
        assert_eq!(check.degrees_of_freedom, 1);
        assert!(check.consistent, "chi2 = {}", check.statistic);
        assert!(!check.low_expected);
    }

    #[test]
    fn test_check_rejects_skewed_counts() {
        let mut batch = report(None).batch;
        batch.stay_wins = 1_500;
        batch.switch_wins = 1_500;
        let check = SimulationReport::new(batch_seed(), batch, Some(Significance::P05))
            .check
            .unwrap();
        assert!(!check.consistent);
        assert!((check.statistic - 375.0).abs() < 1e-9);
    }

    #[test]
    fn test_check_flags_small_expected_counts() {
        let seed = batch_seed();
        let batch = TrialSimulator::with_seed(seed).run(1000, 100).unwrap();
        let check = SimulationReport::new(seed, batch, Some(Significance::P05))
            .check
            .unwrap();
        assert!(check.low_expected);
        assert!((check.alpha - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report(None)).unwrap();
        for key in ["generated_at", "seed", "mode", "batch", "stay", "switch"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("check").is_none());
        assert_eq!(json["mode"], "shortcut");
        assert_eq!(json["seed"], "08080808080808080808080808080808");

        let back: SimulationReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.batch.trial_count, 3_000);
    }
}
