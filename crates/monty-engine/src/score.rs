use serde::{Deserialize, Serialize};

/// Wins and losses accumulated across rounds.
///
/// The score outlives individual rounds and is only cleared by
/// [`Score::reset`]. Rounds add to it through
/// [`Round::record_outcome`](crate::Round::record_outcome), which counts each
/// resolved round exactly once.
///
/// # Example
///
/// ```
/// use monty_engine::Score;
///
/// let mut score = Score::new();
/// score.record(true);
/// score.record(false);
/// score.record(true);
///
/// assert_eq!(score.wins(), 2);
/// assert_eq!(score.played(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    wins: u64,
    losses: u64,
}

impl Score {
    /// Creates a score with no rounds played.
    #[must_use]
    pub const fn new() -> Self {
        Self { wins: 0, losses: 0 }
    }

    #[must_use]
    pub const fn wins(&self) -> u64 {
        self.wins
    }

    #[must_use]
    pub const fn losses(&self) -> u64 {
        self.losses
    }

    /// Returns the number of resolved rounds counted so far.
    #[must_use]
    pub const fn played(&self) -> u64 {
        self.wins + self.losses
    }

    /// Returns the fraction of rounds won, or `None` before the first round.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        let played = self.played();
        (played > 0).then(|| self.wins as f64 / played as f64)
    }

    pub const fn record(&mut self, win: bool) {
        if win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }

    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_rate() {
        let mut score = Score::new();
        assert_eq!(score.win_rate(), None);

        score.record(true);
        score.record(false);
        score.record(false);
        score.record(true);
        assert_eq!(score.win_rate(), Some(0.5));
    }

    #[test]
    fn test_reset() {
        let mut score = Score::new();
        score.record(true);
        score.record(false);
        score.reset();
        assert_eq!(score, Score::default());
        assert_eq!(score.played(), 0);
    }
}
