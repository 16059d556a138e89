//! Score keeping
//!
//! The high score lives only in memory for the lifetime of the process.

/// Current score and best score across rounds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    /// Men knocked down this round
    pub score: u32,
    /// Best round so far (never decreases)
    pub high_score: u32,
    /// Rounds finished this session
    pub rounds_played: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hit
    pub fn record_hit(&mut self) {
        self.score += 1;
    }

    /// Close the round: bank the score if it's a new best, then zero it.
    /// Returns the finished round's score.
    pub fn end_round(&mut self) -> u32 {
        let finished = self.score;
        if finished > self.high_score {
            log::info!("New high score: {}", finished);
            self.high_score = finished;
        }
        self.score = 0;
        self.rounds_played += 1;
        finished
    }

    /// Whether the HUD should show the high score
    pub fn has_high_score(&self) -> bool {
        self.high_score > 0
    }
}
