use serde::Serialize;
use std::time::{Duration, Instant};

/// Totals reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub games_played: u32,
    pub high_score: u32,
    pub last_score: u32,
    pub total_ticks: u64,
}

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub last_score: u32,
    pub games_played: u32,
    pub game_ticks: u64,
    pub total_ticks: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            last_score: 0,
            games_played: 0,
            game_ticks: 0,
            total_ticks: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_tick(&mut self) {
        self.game_ticks += 1;
        self.total_ticks += 1;
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.game_ticks = 0;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.games_played += 1;
        self.last_score = final_score;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            games_played: self.games_played,
            high_score: self.high_score,
            last_score: self.last_score,
            total_ticks: self.total_ticks,
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
