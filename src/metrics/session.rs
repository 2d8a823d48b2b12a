use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// Stats for the current sitting. Nothing here outlives the process.
pub struct SessionMetrics {
    pub round_start: Instant,
    pub round_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    pub rounds_won: u32,
    round_open: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            round_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            rounds_won: 0,
            round_open: true,
        }
    }

    /// Refresh the round timer. The clock stops once the round ends.
    pub fn update(&mut self) {
        if self.round_open {
            self.round_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.round_time = Duration::ZERO;
        self.round_open = true;
    }

    pub fn on_round_end(&mut self, status: GameStatus, final_score: u32) {
        if !self.round_open {
            return;
        }
        self.update();
        self.round_open = false;

        self.rounds_played += 1;
        if status == GameStatus::Won {
            self.rounds_won += 1;
        }
        self.best_score = self.best_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
