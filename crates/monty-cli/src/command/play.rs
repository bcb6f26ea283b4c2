use anyhow::Context as _;
use monty_engine::{DoorCount, Seed};

use crate::{
    logging,
    text::Language,
    tui::{self, ScreenStack},
    view::screens::HomeScreen,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of doors to start with (at least 3)
    #[clap(long, default_value_t = DoorCount::CLASSIC)]
    pub(crate) doors: DoorCount,
    /// Language of the user interface
    #[clap(long, value_enum, default_value_t = Language::English)]
    lang: Language,
    /// Seed (32 hex characters) for reproducible games
    #[clap(long)]
    seed: Option<Seed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { doors, lang, seed } = arg;

    // stderr shares the terminal with the alternate screen
    logging::init_tracing("warn");
    tracing::info!(%doors, ?lang, "starting interactive game");

    let mut stack = ScreenStack::new(Box::new(HomeScreen::new(*lang, *doors, *seed)));
    tui::run(&mut stack).context("Failed to run the terminal UI")?;
    Ok(())
}
