//! Game engine for the Monty Hall paradox.
//!
//! The crate models the puzzle as a small state machine plus a Monte Carlo
//! simulator:
//!
//! - [`Round`] - A single round: pick a door, watch the host reveal goats, stay or switch
//! - [`Score`] - Wins and losses accumulated across rounds
//! - [`GameSession`] - Current round, score and door count for an interactive shell
//! - [`TrialSimulator`] - Repeated randomized trials comparing the two strategies
//! - [`Seed`] - Seed for deterministic prize placement and host choices
//!
//! # Example
//!
//! ```
//! use monty_engine::{DoorCount, Round, Seed, Strategy};
//!
//! let mut round = Round::with_prize(DoorCount::CLASSIC, 2, Seed::ZERO).unwrap();
//! round.pick(1).unwrap();
//!
//! // The host must leave the prize door closed when the pick is wrong.
//! assert_eq!(round.closed_alternative(), Some(2));
//! assert_eq!(round.revealed_doors().collect::<Vec<_>>(), [3]);
//!
//! let outcome = round.decide(Strategy::Switch).unwrap();
//! assert!(outcome.win);
//! ```

pub use self::{door::*, round::*, score::*, seed::*, session::*, simulation::*};

mod door;
mod round;
mod score;
mod seed;
mod session;
mod simulation;

/// Error returned by [`Round`] transitions.
///
/// A failed transition never modifies the round.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RoundError {
    #[display("door {door} is not available (doors are numbered 1 to {door_count})")]
    InvalidDoor { door: usize, door_count: DoorCount },
    #[display("round is {actual}, but this action requires {expected}")]
    UnexpectedPhase { expected: Phase, actual: Phase },
}

/// Error returned by [`TrialSimulator::run`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("trial count must be positive")]
    InvalidTrialCount,
    #[display("{_0}")]
    InvalidDoorCount(DoorCountError),
    /// A full-round trial was rejected by the round.
    #[display("{_0}")]
    Round(RoundError),
}

impl From<RoundError> for SimulationError {
    fn from(err: RoundError) -> Self {
        Self::Round(err)
    }
}
