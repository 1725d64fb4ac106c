//! Elo rating bookkeeping for engine configurations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rating every configuration starts from.
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for rating updates; higher means more volatile.
pub const K_FACTOR: f64 = 32.0;

/// Result of a single game, from the first player's perspective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Aggregate result of a match, from the first player's perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn record(&mut self, game: GameResult) {
        match game {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 per win, half per draw, normalized; 0.5 for an empty match.
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// One finished match, kept for later inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: String,
    pub player2: String,
    pub result: MatchResult,
    pub elo_change: f64,
}

/// Ratings table persisted between arena runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EloTracker {
    pub ratings: HashMap<String, f64>,
    pub games_played: HashMap<String, u32>,
    pub history: Vec<MatchRecord>,
}

impl EloTracker {
    pub fn load(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
        serde_json::from_str(&contents).map_err(|e| format!("failed to parse {path}: {e}"))
    }

    pub fn save(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize ratings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("failed to write {path}: {e}"))
    }

    pub fn rating(&mut self, player: &str) -> f64 {
        *self.ratings.entry(player.to_string()).or_insert(DEFAULT_ELO)
    }

    /// Probability-like expected score of `player1` against `player2`.
    pub fn expected_score(&mut self, player1: &str, player2: &str) -> f64 {
        let r1 = self.rating(player1);
        let r2 = self.rating(player2);
        1.0 / (1.0 + 10.0_f64.powf((r2 - r1) / 400.0))
    }

    pub fn apply_match(&mut self, player1: &str, player2: &str, result: &MatchResult) {
        let expected = self.expected_score(player1, player2);
        let actual = result.score();
        let games = result.total_games() as f64;
        let elo_change = K_FACTOR * games * (actual - expected);

        let r1 = self.rating(player1);
        let r2 = self.rating(player2);
        self.ratings.insert(player1.to_string(), r1 + elo_change);
        self.ratings.insert(player2.to_string(), r2 - elo_change);

        *self.games_played.entry(player1.to_string()).or_insert(0) += result.total_games();
        *self.games_played.entry(player2.to_string()).or_insert(0) += result.total_games();

        self.history.push(MatchRecord {
            player1: player1.to_string(),
            player2: player2.to_string(),
            result: result.clone(),
            elo_change,
        });
    }

    /// Entries sorted by rating, best first.
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }

    pub fn print_leaderboard(&self) {
        println!();
        println!("=== Arena Leaderboard ===");
        println!("{:<20} {:>8} {:>8}", "Engine", "Elo", "Games");
        println!("{}", "-".repeat(38));
        for (name, rating, games) in self.leaderboard() {
            println!("{:<20} {:>8.1} {:>8}", name, rating, games);
        }
        println!();
    }
}
