use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use monty_engine::{DoorCount, Seed, Strategy, TrialMode, TrialSimulator};
use monty_stats::chi_square::Significance;
use rand::Rng as _;

use crate::{
    logging,
    schema::report::{SimulationReport, StrategyReport},
    util::{self, Output},
};

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of doors (at least 3)
    #[clap(long, default_value_t = DoorCount::CLASSIC)]
    pub(crate) doors: DoorCount,
    /// Number of trials to run
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) trials: u64,
    /// How each trial is played
    #[clap(long, value_enum, default_value_t = TrialModeArg::Shortcut)]
    mode: TrialModeArg,
    /// Seed (32 hex characters); a random seed is used when omitted
    #[clap(long)]
    seed: Option<Seed>,
    /// Write the JSON report to this file ("-" for stdout)
    #[clap(long)]
    output: Option<PathBuf>,
    /// Test the stay wins against theory at the given significance level
    #[clap(long, value_enum, num_args = 0..=1, default_missing_value = "0.05")]
    check: Option<SignificanceArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TrialModeArg {
    /// Draw prize and pick; the host's reveal is implied
    Shortcut,
    /// Play every trial as a complete round
    FullRound,
}

impl From<TrialModeArg> for TrialMode {
    fn from(arg: TrialModeArg) -> Self {
        match arg {
            TrialModeArg::Shortcut => TrialMode::Shortcut,
            TrialModeArg::FullRound => TrialMode::FullRound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SignificanceArg {
    #[value(name = "0.05")]
    P05,
    #[value(name = "0.01")]
    P01,
    #[value(name = "0.001")]
    P001,
}

impl From<SignificanceArg> for Significance {
    fn from(arg: SignificanceArg) -> Self {
        match arg {
            SignificanceArg::P05 => Significance::P05,
            SignificanceArg::P01 => Significance::P01,
            SignificanceArg::P001 => Significance::P001,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        doors,
        trials,
        mode,
        seed,
        output,
        check,
    } = arg;

    logging::init_tracing("info");

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, %doors, trials, ?mode, "starting simulation");

    let batch = TrialSimulator::with_seed(seed)
        .mode((*mode).into())
        .run(doors.get(), *trials)
        .context("Failed to run the simulation")?;
    let report = SimulationReport::new(seed, batch, check.map(Into::into));

    let written = if summary_to_stderr(output.as_deref()) {
        write_summary(&mut io::stderr().lock(), &report)
    } else {
        write_summary(&mut io::stdout().lock(), &report)
    };
    written.context("Failed to write the summary")?;

    if let Some(path) = output {
        let mut output = Output::from_output_path(path.clone())?;
        output.write_json(&report)?;
        tracing::info!(path = %output.display_path(), "report saved");
    }

    ensure_consistent(&report)
}

/// Keeps stdout clean for the JSON report when it goes there.
fn summary_to_stderr(output: Option<&Path>) -> bool {
    output.is_some_and(util::is_stdout_path)
}

/// Fails when a requested check rejected the simulated counts.
fn ensure_consistent(report: &SimulationReport) -> anyhow::Result<()> {
    if let Some(check) = &report.check
        && !check.consistent
    {
        anyhow::bail!(
            "simulated stay wins are not consistent with the theoretical rate \
             (chi-square {:.3} > {:.3})",
            check.statistic,
            check.critical_value
        );
    }
    Ok(())
}

/// Writes the human-readable summary of `report`.
pub(crate) fn write_summary<W>(writer: &mut W, report: &SimulationReport) -> io::Result<()>
where
    W: Write,
{
    let batch = &report.batch;
    writeln!(
        writer,
        "{} trials with {} doors ({} mode, seed {})",
        batch.trial_count, batch.door_count, batch.mode, report.seed
    )?;
    writeln!(writer)?;
    for strategy in Strategy::ALL {
        writeln!(
            writer,
            "{}",
            strategy_line(strategy, report.strategy(strategy))
        )?;
    }

    if let Some(check) = &report.check {
        writeln!(writer)?;
        writeln!(
            writer,
            "chi-square {:.3} (dof {}, critical {:.3} at alpha {}): {}",
            check.statistic,
            check.degrees_of_freedom,
            check.critical_value,
            check.alpha,
            if check.consistent {
                "consistent with theory"
            } else {
                "NOT consistent with theory"
            }
        )?;
        if check.low_expected {
            writeln!(
                writer,
                "warning: an expected count is below 5, the test is unreliable"
            )?;
        }
    }
    Ok(())
}

fn strategy_line(strategy: Strategy, stats: &StrategyReport) -> String {
    format!(
        "{:<7}{} {:>6.2}% (95% CI {:.2}%-{:.2}%, theory {:.2}%)",
        strategy.to_string(),
        bar(stats.win_rate),
        stats.win_rate * 100.0,
        stats.ci95[0] * 100.0,
        stats.ci95[1] * 100.0,
        stats.theoretical_win_rate * 100.0,
    )
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(rate: f64) -> String {
    let filled = ((rate.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(doors: usize, trials: u64, check: Option<Significance>) -> SimulationReport {
        let batch = TrialSimulator::with_seed(batch_seed())
            .run(doors, trials)
            .unwrap();
        SimulationReport::new(batch_seed(), batch, check)
    }

    fn batch_seed() -> Seed {
        Seed::from_bytes([3; 16])
    }

    fn render(report: &SimulationReport) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn summary(check: Option<Significance>) -> String {
        render(&report(3, 2_000, check))
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(bar(1.0), "█".repeat(BAR_WIDTH));
        assert_eq!(bar(0.5).chars().filter(|&c| c == '█').count(), BAR_WIDTH / 2);
        assert_eq!(bar(1.5).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_summary_lists_both_strategies() {
        let text = summary(None);
        assert!(text.starts_with("2000 trials with 3 doors (shortcut mode, seed "));
        assert!(text.contains("theory 33.33%"));
        assert!(text.contains("theory 66.67%"));
        assert!(!text.contains("chi-square"));
    }

    #[test]
    fn test_summary_with_check() {
        let text = summary(Some(Significance::P001));
        assert!(text.contains("chi-square"));
        assert!(text.contains("consistent with theory"));
        assert!(!text.contains("NOT consistent"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn test_skewed_counts_fail_the_check() {
        let mut batch = report(3, 3_000, None).batch;
        batch.stay_wins = 1_500;
        batch.switch_wins = 1_500;
        let skewed = SimulationReport::new(batch_seed(), batch, Some(Significance::P05));

        assert!(!skewed.check.unwrap().consistent);
        assert!(render(&skewed).contains("NOT consistent with theory"));
        let err = ensure_consistent(&skewed).unwrap_err();
        assert!(err.to_string().contains("not consistent"));
    }

    #[test]
    fn test_fair_or_unchecked_runs_pass() {
        assert!(ensure_consistent(&report(3, 2_000, None)).is_ok());
        assert!(ensure_consistent(&report(3, 2_000, Some(Significance::P001))).is_ok());
    }

    #[test]
    fn test_small_expected_counts_print_warning() {
        let report = report(1000, 100, Some(Significance::P05));
        assert!(report.check.unwrap().low_expected);
        assert!(render(&report).contains("warning: an expected count is below 5"));
    }

    #[test]
    fn test_summary_moves_to_stderr_for_stdout_report() {
        assert!(summary_to_stderr(Some(Path::new("-"))));
        assert!(!summary_to_stderr(Some(Path::new("report.json"))));
        assert!(!summary_to_stderr(None));
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(
            TrialMode::from(TrialModeArg::FullRound),
            TrialMode::FullRound
        );
        assert_eq!(
            Significance::from(SignificanceArg::P001),
            Significance::P001
        );
    }
}
