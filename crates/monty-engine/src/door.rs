use std::{num::ParseIntError, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of doors in a game, always at least [`DoorCount::MIN`].
///
/// Doors are numbered from 1 to the count, inclusive.
///
/// # Example
///
/// ```
/// use monty_engine::DoorCount;
///
/// let count = DoorCount::new(5).unwrap();
/// assert!(count.contains(5));
/// assert!(!count.contains(0));
/// assert!(DoorCount::new(2).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct DoorCount(usize);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("door count must be at least 3, got {count}")]
pub struct DoorCountError {
    pub count: usize,
}

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ParseDoorCountError {
    #[display("invalid number: {_0}")]
    Number(ParseIntError),
    #[display("{_0}")]
    Count(DoorCountError),
}

impl DoorCount {
    /// Smallest door count for which the puzzle makes sense.
    pub const MIN: usize = 3;

    /// The classic three-door game.
    pub const CLASSIC: Self = Self(3);

    /// Door counts offered by the interactive game.
    pub const PRESETS: [Self; 3] = [Self(3), Self(100), Self(1000)];

    pub const fn new(count: usize) -> Result<Self, DoorCountError> {
        if count < Self::MIN {
            return Err(DoorCountError { count });
        }
        Ok(Self(count))
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns whether `door` is a valid door number for this count.
    #[must_use]
    pub const fn contains(self, door: usize) -> bool {
        door >= 1 && door <= self.0
    }

    /// Returns all door numbers, `1..=count`.
    #[must_use]
    pub const fn doors(self) -> RangeInclusive<usize> {
        1..=self.0
    }

    /// Returns the next preset larger than `self`, wrapping to the smallest one.
    #[must_use]
    pub fn next_preset(self) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| *preset > self)
            .unwrap_or(Self::PRESETS[0])
    }
}

impl Default for DoorCount {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl TryFrom<usize> for DoorCount {
    type Error = DoorCountError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<DoorCount> for usize {
    fn from(count: DoorCount) -> Self {
        count.0
    }
}

impl FromStr for DoorCount {
    type Err = ParseDoorCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.trim().parse::<usize>()?;
        Ok(Self::new(count)?)
    }
}
