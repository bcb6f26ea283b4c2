use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{DoorCount, RoundError, Score, Seed};

/// Phase of a [`Round`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum Phase {
    #[display("awaiting a pick")]
    AwaitingPick,
    #[display("awaiting a decision")]
    AwaitingDecision,
    #[display("resolved")]
    Resolved,
}

/// Decision taken after the host reveal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum Strategy {
    Stay,
    Switch,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Stay, Self::Switch];

    /// Returns whether this strategy wins given the initial pick.
    ///
    /// Staying wins exactly when the first pick was right; switching wins
    /// exactly when it was wrong, because the host always leaves the prize
    /// closed in that case.
    #[must_use]
    pub const fn wins(self, user_pick: usize, prize_door: usize) -> bool {
        match self {
            Self::Stay => user_pick == prize_door,
            Self::Switch => user_pick != prize_door,
        }
    }
}

/// Result of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub strategy: Strategy,
    pub user_pick: usize,
    pub final_pick: usize,
    pub prize_door: usize,
    pub win: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundState {
    AwaitingPick,
    AwaitingDecision {
        user_pick: usize,
        closed_alternative: usize,
    },
    Resolved {
        user_pick: usize,
        closed_alternative: usize,
        strategy: Strategy,
    },
}

impl RoundState {
    const fn phase(self) -> Phase {
        match self {
            Self::AwaitingPick => Phase::AwaitingPick,
            Self::AwaitingDecision { .. } => Phase::AwaitingDecision,
            Self::Resolved { .. } => Phase::Resolved,
        }
    }

    const fn picks(self) -> Option<(usize, usize)> {
        match self {
            Self::AwaitingPick => None,
            Self::AwaitingDecision {
                user_pick,
                closed_alternative,
            }
            | Self::Resolved {
                user_pick,
                closed_alternative,
                ..
            } => Some((user_pick, closed_alternative)),
        }
    }
}

/// A single round of the game.
///
/// # Phases
///
/// 1. [`Phase::AwaitingPick`] - The prize is hidden; [`Round::pick`] selects a door
/// 2. [`Phase::AwaitingDecision`] - The host has opened every door except the
///    pick and one closed alternative; [`Round::decide`] stays or switches
/// 3. [`Phase::Resolved`] - Terminal; the outcome is fixed
///
/// # Host reveal
///
/// The host never opens the prize door or the picked door. When the pick is
/// wrong, the door left closed is the prize door. When the pick is right, the
/// door left closed is drawn uniformly from the other doors. Only that second
/// case consumes randomness.
///
/// The revealed set is not stored: it is every door except the pick and the
/// closed alternative, so exactly one door besides the pick stays closed for
/// any door count.
#[derive(Debug, Clone)]
pub struct Round {
    rng: Pcg32,
    door_count: DoorCount,
    prize_door: usize,
    state: RoundState,
    recorded: bool,
}

impl Round {
    /// Creates a round with a random seed.
    #[must_use]
    pub fn new(door_count: DoorCount) -> Self {
        Self::with_seed(door_count, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a deterministic round.
    #[must_use]
    pub fn with_seed(door_count: DoorCount, seed: Seed) -> Self {
        let mut rng = seed.rng();
        let prize_door = rng.random_range(door_count.doors());
        Self::from_parts(rng, door_count, prize_door)
    }

    /// Creates a round whose prize is behind `prize_door`.
    ///
    /// The seed still drives the host's choice when the pick is right.
    pub fn with_prize(
        door_count: DoorCount,
        prize_door: usize,
        seed: Seed,
    ) -> Result<Self, RoundError> {
        if !door_count.contains(prize_door) {
            return Err(RoundError::InvalidDoor {
                door: prize_door,
                door_count,
            });
        }
        Ok(Self::from_parts(seed.rng(), door_count, prize_door))
    }

    fn from_parts(rng: Pcg32, door_count: DoorCount, prize_door: usize) -> Self {
        Self {
            rng,
            door_count,
            prize_door,
            state: RoundState::AwaitingPick,
            recorded: false,
        }
    }

    #[must_use]
    pub fn door_count(&self) -> DoorCount {
        self.door_count
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Returns the prize door.
    ///
    /// Renderers should go through [`Self::view`], which hides the prize until
    /// the round is resolved.
    #[must_use]
    pub fn prize_door(&self) -> usize {
        self.prize_door
    }

    #[must_use]
    pub fn user_pick(&self) -> Option<usize> {
        self.state.picks().map(|(user_pick, _)| user_pick)
    }

    /// Returns the door the host left closed besides the pick.
    #[must_use]
    pub fn closed_alternative(&self) -> Option<usize> {
        self.state.picks().map(|(_, closed)| closed)
    }

    /// Returns the doors opened by the host, in ascending order.
    ///
    /// Empty until a door has been picked.
    pub fn revealed_doors(&self) -> impl Iterator<Item = usize> + '_ {
        let door_count = self.door_count;
        self.state
            .picks()
            .into_iter()
            .flat_map(move |(user_pick, closed)| {
                door_count
                    .doors()
                    .filter(move |&door| door != user_pick && door != closed)
            })
    }

    #[must_use]
    pub fn is_revealed(&self, door: usize) -> bool {
        self.state.picks().is_some_and(|(user_pick, closed)| {
            self.door_count.contains(door) && door != user_pick && door != closed
        })
    }

    #[must_use]
    pub fn final_pick(&self) -> Option<usize> {
        self.outcome().map(|outcome| outcome.final_pick)
    }

    /// Returns the outcome once the round is resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            RoundState::Resolved {
                user_pick,
                closed_alternative,
                strategy,
            } => Some(self.resolve(user_pick, closed_alternative, strategy)),
            _ => None,
        }
    }

    fn resolve(&self, user_pick: usize, closed_alternative: usize, strategy: Strategy) -> Outcome {
        let final_pick = match strategy {
            Strategy::Stay => user_pick,
            Strategy::Switch => closed_alternative,
        };
        Outcome {
            strategy,
            user_pick,
            final_pick,
            prize_door: self.prize_door,
            win: final_pick == self.prize_door,
        }
    }

    /// Returns whether the final pick hides the prize, once resolved.
    #[must_use]
    pub fn is_win(&self) -> Option<bool> {
        self.outcome().map(|outcome| outcome.win)
    }

    /// Picks a door and lets the host open all but one of the others.
    pub fn pick(&mut self, door: usize) -> Result<(), RoundError> {
        self.expect_phase(Phase::AwaitingPick)?;
        self.check_door(door)?;

        let closed_alternative =
            choose_closed_alternative(&mut self.rng, self.door_count, door, self.prize_door);
        self.state = RoundState::AwaitingDecision {
            user_pick: door,
            closed_alternative,
        };
        tracing::debug!(
            door_count = %self.door_count,
            user_pick = door,
            closed_alternative,
            "host opened doors"
        );
        Ok(())
    }

    /// Stays with the pick or switches to the closed alternative.
    pub fn decide(&mut self, strategy: Strategy) -> Result<Outcome, RoundError> {
        let RoundState::AwaitingDecision {
            user_pick,
            closed_alternative,
        } = self.state
        else {
            return Err(self.unexpected_phase(Phase::AwaitingDecision));
        };
        self.state = RoundState::Resolved {
            user_pick,
            closed_alternative,
            strategy,
        };
        let outcome = self.resolve(user_pick, closed_alternative, strategy);
        tracing::debug!(?outcome, "round resolved");
        Ok(outcome)
    }

    /// Decides by naming the final door instead of a strategy.
    ///
    /// `door` must be the pick (stay) or the closed alternative (switch).
    /// Doors out of range or already opened by the host are rejected.
    pub fn decide_door(&mut self, door: usize) -> Result<Outcome, RoundError> {
        self.expect_phase(Phase::AwaitingDecision)?;
        let strategy = match self.state.picks() {
            Some((user_pick, _)) if door == user_pick => Strategy::Stay,
            Some((_, closed)) if door == closed => Strategy::Switch,
            _ => {
                return Err(RoundError::InvalidDoor {
                    door,
                    door_count: self.door_count,
                });
            }
        };
        self.decide(strategy)
    }

    /// Adds the outcome to `score` the first time it is called on a resolved round.
    ///
    /// Returns whether the score changed. Later calls, and calls before the
    /// round is resolved, leave `score` untouched.
    pub fn record_outcome(&mut self, score: &mut Score) -> bool {
        if self.recorded {
            return false;
        }
        let Some(win) = self.is_win() else {
            return false;
        };
        score.record(win);
        self.recorded = true;
        true
    }

    #[must_use]
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Returns a read-only projection suitable for rendering.
    #[must_use]
    pub fn view(&self) -> RoundView {
        let phase = self.phase();
        RoundView {
            door_count: self.door_count,
            phase,
            user_pick: self.user_pick(),
            revealed_doors: self.revealed_doors().collect(),
            closed_alternative: self.closed_alternative(),
            final_pick: self.final_pick(),
            prize_door: phase.is_resolved().then_some(self.prize_door),
            win: self.is_win(),
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), RoundError> {
        if self.phase() != expected {
            return Err(self.unexpected_phase(expected));
        }
        Ok(())
    }

    fn unexpected_phase(&self, expected: Phase) -> RoundError {
        RoundError::UnexpectedPhase {
            expected,
            actual: self.phase(),
        }
    }

    fn check_door(&self, door: usize) -> Result<(), RoundError> {
        if !self.door_count.contains(door) {
            return Err(RoundError::InvalidDoor {
                door,
                door_count: self.door_count,
            });
        }
        Ok(())
    }
}

/// Chooses the one door (besides the pick) the host leaves closed.
fn choose_closed_alternative<R>(
    rng: &mut R,
    door_count: DoorCount,
    user_pick: usize,
    prize_door: usize,
) -> usize
where
    R: Rng + ?Sized,
{
    if user_pick != prize_door {
        return prize_door;
    }
    // Uniform over the `door_count - 1` doors other than the pick.
    let door = rng.random_range(1..door_count.get());
    if door >= user_pick { door + 1 } else { door }
}

/// Read-only projection of a [`Round`].
///
/// The prize door is only present once the round is resolved, so a renderer
/// holding a view cannot leak the answer early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub door_count: DoorCount,
    pub phase: Phase,
    pub user_pick: Option<usize>,
    pub revealed_doors: Vec<usize>,
    pub closed_alternative: Option<usize>,
    pub final_pick: Option<usize>,
    pub prize_door: Option<usize>,
    pub win: Option<bool>,
}

impl RoundView {
    #[must_use]
    pub fn is_revealed(&self, door: usize) -> bool {
        self.revealed_doors.binary_search(&door).is_ok()
    }
}
