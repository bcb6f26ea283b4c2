use std::path::PathBuf;

use anyhow::Context as _;
use monty_engine::{TrialBatch, TrialSimulator};

use crate::{logging, schema::report::SimulationReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct VerifyArg {
    /// Path to a report written by `simulate --output` (JSON format)
    report_file: PathBuf,
}

pub(crate) fn run(arg: &VerifyArg) -> anyhow::Result<()> {
    let VerifyArg { report_file } = arg;

    logging::init_tracing("info");

    let report: SimulationReport = util::read_json_file("simulation report", report_file)?;
    tracing::info!(path = %report_file.display(), seed = %report.seed, "report loaded");

    let rerun = rerun(&report)?;
    if !reproduces(&report.batch, &rerun) {
        anyhow::bail!(
            "report does not reproduce: recorded stay/switch wins {}/{}, rerun gave {}/{}",
            report.batch.stay_wins,
            report.batch.switch_wins,
            rerun.stay_wins,
            rerun.switch_wins,
        );
    }
    println!(
        "{}: reproduced {} trials with seed {}",
        report_file.display(),
        rerun.trial_count,
        report.seed
    );
    Ok(())
}

/// Compares the counts; rates are derived and may lose precision in JSON.
fn reproduces(recorded: &TrialBatch, rerun: &TrialBatch) -> bool {
    (
        recorded.door_count,
        recorded.mode,
        recorded.trial_count,
        recorded.stay_wins,
        recorded.switch_wins,
    ) == (
        rerun.door_count,
        rerun.mode,
        rerun.trial_count,
        rerun.stay_wins,
        rerun.switch_wins,
    )
}

/// Runs the simulation the report describes again.
fn rerun(report: &SimulationReport) -> anyhow::Result<TrialBatch> {
    let batch = &report.batch;
    TrialSimulator::with_seed(report.seed)
        .mode(report.mode)
        .run(batch.door_count.get(), batch.trial_count)
        .context("Failed to rerun the simulation")
}
