use std::{iter::Sum, ops::AddAssign};

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{DoorCount, Round, RoundError, Seed, SimulationError, Strategy};

/// How a simulated trial is played.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TrialMode {
    /// Draw the prize and the pick independently and compare them.
    ///
    /// Staying wins iff the pick is the prize and switching wins otherwise,
    /// which holds for every door count under the host rule of [`Round`].
    #[default]
    #[display("shortcut")]
    Shortcut,
    /// Play every trial through a [`Round`], host reveal included, and
    /// resolve the same reveal once with each strategy.
    #[display("full-round")]
    FullRound,
}

/// Raw win counts from a number of trials.
///
/// Tallies from independent runs can be added together in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialTally {
    pub trials: u64,
    pub stay_wins: u64,
    pub switch_wins: u64,
}

impl TrialTally {
    fn record(&mut self, stay_win: bool, switch_win: bool) {
        self.trials += 1;
        self.stay_wins += u64::from(stay_win);
        self.switch_wins += u64::from(switch_win);
    }
}

impl AddAssign for TrialTally {
    fn add_assign(&mut self, rhs: Self) {
        self.trials += rhs.trials;
        self.stay_wins += rhs.stay_wins;
        self.switch_wins += rhs.switch_wins;
    }
}

impl Sum for TrialTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, tally| {
            acc += tally;
            acc
        })
    }
}

/// Aggregate result of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialBatch {
    pub door_count: DoorCount,
    pub mode: TrialMode,
    pub trial_count: u64,
    pub stay_wins: u64,
    pub switch_wins: u64,
    pub stay_win_rate: f64,
    pub switch_win_rate: f64,
}

impl TrialBatch {
    /// Builds a batch from a non-empty tally.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_tally(
        door_count: DoorCount,
        mode: TrialMode,
        tally: TrialTally,
    ) -> Result<Self, SimulationError> {
        if tally.trials == 0 {
            return Err(SimulationError::InvalidTrialCount);
        }
        let trials = tally.trials as f64;
        Ok(Self {
            door_count,
            mode,
            trial_count: tally.trials,
            stay_wins: tally.stay_wins,
            switch_wins: tally.switch_wins,
            stay_win_rate: tally.stay_wins as f64 / trials,
            switch_win_rate: tally.switch_wins as f64 / trials,
        })
    }

    #[must_use]
    pub fn wins(&self, strategy: Strategy) -> u64 {
        match strategy {
            Strategy::Stay => self.stay_wins,
            Strategy::Switch => self.switch_wins,
        }
    }

    #[must_use]
    pub fn win_rate(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Stay => self.stay_win_rate,
            Strategy::Switch => self.switch_win_rate,
        }
    }

    /// Returns the exact win probability of `strategy` for this door count.
    #[must_use]
    pub fn theoretical_win_rate(&self, strategy: Strategy) -> f64 {
        theoretical_win_rate(self.door_count, strategy)
    }
}

/// Exact win probability: `1/n` for staying and `(n-1)/n` for switching.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn theoretical_win_rate(door_count: DoorCount, strategy: Strategy) -> f64 {
    let n = door_count.get() as f64;
    match strategy {
        Strategy::Stay => 1.0 / n,
        Strategy::Switch => (n - 1.0) / n,
    }
}

/// Runs independent randomized trials comparing staying and switching.
///
/// # Example
///
/// ```
/// use monty_engine::{Seed, TrialSimulator};
///
/// let mut simulator = TrialSimulator::with_seed(Seed::ZERO);
/// let batch = simulator.run(3, 10_000).unwrap();
///
/// assert_eq!(batch.trial_count, 10_000);
/// assert!(batch.switch_win_rate > batch.stay_win_rate);
/// ```
#[derive(Debug, Clone)]
pub struct TrialSimulator {
    rng: Pcg32,
    mode: TrialMode,
}

impl Default for TrialSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialSimulator {
    /// Creates a simulator with a random seed, in [`TrialMode::Shortcut`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: Seed) -> Self {
        Self {
            rng: seed.rng(),
            mode: TrialMode::default(),
        }
    }

    #[must_use]
    pub fn mode(self, mode: TrialMode) -> Self {
        Self { mode, ..self }
    }

    /// Runs `trial_count` trials with `door_count` doors.
    ///
    /// Inputs are validated before any trial is drawn.
    pub fn run(
        &mut self,
        door_count: usize,
        trial_count: u64,
    ) -> Result<TrialBatch, SimulationError> {
        if trial_count == 0 {
            return Err(SimulationError::InvalidTrialCount);
        }
        let door_count = DoorCount::new(door_count).map_err(SimulationError::InvalidDoorCount)?;

        let tally = self.tally(door_count, trial_count)?;
        let batch = TrialBatch::from_tally(door_count, self.mode, tally)?;
        tracing::info!(
            %door_count,
            trial_count,
            mode = %self.mode,
            stay_win_rate = batch.stay_win_rate,
            switch_win_rate = batch.switch_win_rate,
            "simulation finished"
        );
        Ok(batch)
    }

    /// Plays `trials` trials and returns the raw counts.
    ///
    /// Only [`TrialMode::FullRound`] can fail, when a round rejects a
    /// transition.
    pub fn tally(
        &mut self,
        door_count: DoorCount,
        trials: u64,
    ) -> Result<TrialTally, RoundError> {
        let mut tally = TrialTally::default();
        for _ in 0..trials {
            let (stay_win, switch_win) = match self.mode {
                TrialMode::Shortcut => self.shortcut_trial(door_count),
                TrialMode::FullRound => self.full_round_trial(door_count)?,
            };
            tally.record(stay_win, switch_win);
        }
        Ok(tally)
    }

    fn shortcut_trial(&mut self, door_count: DoorCount) -> (bool, bool) {
        let prize_door = self.rng.random_range(door_count.doors());
        let user_pick = self.rng.random_range(door_count.doors());
        (
            Strategy::Stay.wins(user_pick, prize_door),
            Strategy::Switch.wins(user_pick, prize_door),
        )
    }

    fn full_round_trial(&mut self, door_count: DoorCount) -> Result<(bool, bool), RoundError> {
        let mut round = Round::with_seed(door_count, self.rng.random());
        let user_pick = self.rng.random_range(door_count.doors());
        round.pick(user_pick)?;

        let stay = round.clone().decide(Strategy::Stay)?;
        let switch = round.decide(Strategy::Switch)?;
        Ok((stay.win, switch.win))
    }
}

/// Runs `trial_count` trials with a randomly seeded [`TrialSimulator`].
pub fn run_trials(door_count: usize, trial_count: u64) -> Result<TrialBatch, SimulationError> {
    TrialSimulator::new().run(door_count, trial_count)
}
