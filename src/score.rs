//! Line counter and scoring following modern Tetris guidelines

use serde::Serialize;
use std::time::Duration;

/// Scoring calculation
#[derive(Debug, Clone, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Total lines deleted
    pub lines: u32,
    start_level: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Score {
    pub fn new(start_level: u32) -> Self {
        let start_level = start_level.max(1);
        Self {
            points: 0,
            level: start_level,
            lines: 0,
            start_level,
        }
    }

    /// Count deleted lines and add their score, returns the points awarded
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        let base_score = match lines {
            0 => return 0,
            1 => 100,
            2 => 300,
            3 => 500,
            _ => 800,
        };
        let score = base_score * self.level as u64;
        self.points += score;

        self.lines += lines;

        // Update level (every 10 lines)
        self.level = self.lines / 10 + self.start_level;

        score
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64;
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }

    /// Time per row of gravity at the current level
    pub fn gravity_interval(&self) -> Duration {
        // Tetris Guideline gravity formula
        // Level 1: 1 second per row, faster every level until it caps at 20
        let level = self.level.min(20) as f64;
        Duration::from_secs_f64((0.8 - ((level - 1.0) * 0.007)).powf(level - 1.0))
    }
}
