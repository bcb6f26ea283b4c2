use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    DoorCount, Round, RoundError, RoundView, Score, Seed, SimulationError, Strategy, TrialBatch,
    TrialMode, TrialSimulator,
};

/// Interactive game session: the current round, the score and the door count.
///
/// This is the surface an event-driven shell talks to. Each method is one
/// synchronous transition; a failed transition leaves the session unchanged.
/// The score survives new rounds and door count changes until
/// [`GameSession::reset_score`] is called.
///
/// # Example
///
/// ```
/// use monty_engine::{DoorCount, GameSession, Seed, Strategy};
///
/// let mut session = GameSession::with_seed(DoorCount::CLASSIC, Seed::ZERO);
/// session.pick(1).unwrap();
/// let view = session.decide(Strategy::Switch).unwrap();
///
/// assert!(view.phase.is_resolved());
/// assert_eq!(session.score().played(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    rng: Pcg32,
    round: Round,
    score: Score,
    trial_mode: TrialMode,
}

impl GameSession {
    /// Creates a session with a random seed.
    #[must_use]
    pub fn new(door_count: DoorCount) -> Self {
        Self::with_seed(door_count, rand::rng().random())
    }

    /// Like [`Self::new`], but every round and simulation is derived from `seed`.
    #[must_use]
    pub fn with_seed(door_count: DoorCount, seed: Seed) -> Self {
        let mut rng = seed.rng();
        let round = Round::with_seed(door_count, rng.random());
        Self {
            rng,
            round,
            score: Score::new(),
            trial_mode: TrialMode::default(),
        }
    }

    #[must_use]
    pub fn door_count(&self) -> DoorCount {
        self.round.door_count()
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn view(&self) -> RoundView {
        self.round.view()
    }

    /// Discards the current round and starts a fresh one with `door_count` doors.
    pub fn new_round(&mut self, door_count: DoorCount) -> RoundView {
        self.round = Round::with_seed(door_count, self.rng.random());
        tracing::debug!(%door_count, "new round");
        self.round.view()
    }

    /// Starts a fresh round with the current door count.
    pub fn restart(&mut self) -> RoundView {
        self.new_round(self.door_count())
    }

    pub fn pick(&mut self, door: usize) -> Result<RoundView, RoundError> {
        self.round.pick(door)?;
        Ok(self.round.view())
    }

    /// Resolves the round and records the outcome in the score.
    pub fn decide(&mut self, strategy: Strategy) -> Result<RoundView, RoundError> {
        self.round.decide(strategy)?;
        self.round.record_outcome(&mut self.score);
        Ok(self.round.view())
    }

    /// Like [`Self::decide`], naming the final door instead of the strategy.
    pub fn decide_door(&mut self, door: usize) -> Result<RoundView, RoundError> {
        self.round.decide_door(door)?;
        self.round.record_outcome(&mut self.score);
        Ok(self.round.view())
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    pub fn reset_score(&mut self) {
        self.score.reset();
        tracing::debug!("score reset");
    }

    #[must_use]
    pub fn trial_mode(&self) -> TrialMode {
        self.trial_mode
    }

    pub fn set_trial_mode(&mut self, mode: TrialMode) {
        self.trial_mode = mode;
    }

    /// Runs a simulation in the session's trial mode, seeded from this session.
    ///
    /// The current round and the score are not touched.
    pub fn run_trials(
        &mut self,
        door_count: usize,
        trial_count: u64,
    ) -> Result<TrialBatch, SimulationError> {
        TrialSimulator::with_seed(self.rng.random())
            .mode(self.trial_mode)
            .run(door_count, trial_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Phase;

    fn session() -> GameSession {
        GameSession::with_seed(DoorCount::CLASSIC, Seed::from_bytes([11; 16]))
    }

    #[test]
    fn test_round_cycle_updates_score_once() {
        let mut session = session();
        let prize = session.round().prize_door();

        let view = session.pick(prize).unwrap();
        assert_eq!(view.phase, Phase::AwaitingDecision);
        assert_eq!(view.prize_door, None);

        let view = session.decide(Strategy::Stay).unwrap();
        assert_eq!(view.win, Some(true));
        assert_eq!(view.prize_door, Some(prize));

        // Redraws and repeated decisions do not count again.
        let _ = session.view();
        assert!(session.decide(Strategy::Switch).is_err());
        assert_eq!(session.score().wins(), 1);
        assert_eq!(session.score().losses(), 0);
    }

    #[test]
    fn test_failed_pick_keeps_state() {
        let mut session = session();
        let before = session.view();
        assert!(matches!(
            session.pick(0),
            Err(RoundError::InvalidDoor { door: 0, .. })
        ));
        assert!(session.pick(4).is_err());
        assert_eq!(session.view(), before);
    }

    #[test]
    fn test_new_round_keeps_score() {
        let mut session = session();
        let prize = session.round().prize_door();
        session.pick(prize).unwrap();
        session.decide(Strategy::Switch).unwrap();
        assert_eq!(session.score().losses(), 1);

        let hundred = DoorCount::new(100).unwrap();
        let view = session.new_round(hundred);
        assert_eq!(view.phase, Phase::AwaitingPick);
        assert_eq!(session.door_count(), hundred);
        assert_eq!(session.score().played(), 1);

        session.reset_score();
        assert_eq!(session.score(), Score::new());
    }

    #[test]
    fn test_decide_door() {
        let mut session = session();
        let view = session.pick(1).unwrap();
        let closed = view.closed_alternative.unwrap();
        let view = session.decide_door(closed).unwrap();
        assert_eq!(view.final_pick, Some(closed));
        assert_eq!(session.score().played(), 1);
    }

    #[test]
    fn test_run_trials_leaves_round_alone() {
        let mut session = session();
        session.pick(1).unwrap();
        let before = session.view();

        let batch = session.run_trials(3, 1_000).unwrap();
        assert_eq!(batch.trial_count, 1_000);
        assert_eq!(batch.mode, TrialMode::Shortcut);
        assert_eq!(session.view(), before);
        assert_eq!(
            session.run_trials(3, 0),
            Err(SimulationError::InvalidTrialCount)
        );

        session.set_trial_mode(TrialMode::FullRound);
        let batch = session.run_trials(100, 200).unwrap();
        assert_eq!(batch.mode, TrialMode::FullRound);
        assert_eq!(session.view(), before);
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = session();
        let mut b = session();
        for _ in 0..10 {
            assert_eq!(a.round().prize_door(), b.round().prize_door());
            a.restart();
            b.restart();
        }
    }
}
