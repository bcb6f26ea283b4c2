use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg, verify::VerifyArg};

mod play;
mod simulate;
mod verify;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Compare staying and switching over many simulated rounds
    Simulate(#[clap(flatten)] SimulateArg),
    /// Rerun a saved simulation report and check that it reproduces
    Verify(#[clap(flatten)] VerifyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Verify(arg) => verify::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["monty"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_simulate_args() {
        let args = CommandArgs::try_parse_from([
            "monty", "simulate", "--doors", "100", "--trials", "500", "--mode", "full-round",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate");
        };
        assert_eq!(arg.doors.get(), 100);
        assert_eq!(arg.trials, 500);
    }

    #[test]
    fn test_rejects_too_few_doors() {
        assert!(CommandArgs::try_parse_from(["monty", "play", "--doors", "2"]).is_err());
    }
}
