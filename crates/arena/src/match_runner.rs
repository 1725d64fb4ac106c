//! Plays engine-vs-engine matches between search configurations.

use chess_rules::{Position, Terminal};
use chess_search::{Engine, SearchConfig};

use crate::elo::{GameResult, MatchResult};

/// A named search configuration, e.g. `d4` for a depth-4 searcher.
#[derive(Debug, Clone)]
pub struct EngineSpec {
    pub name: String,
    pub depth: u32,
}

impl EngineSpec {
    /// Parse a spec of the form `d<depth>`, depth 1..=12.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let depth: u32 = spec
            .strip_prefix('d')
            .and_then(|d| d.parse().ok())
            .ok_or_else(|| format!("bad engine spec '{spec}' (expected e.g. d2, d5)"))?;
        if !(1..=12).contains(&depth) {
            return Err(format!("depth {depth} out of range 1..=12"));
        }
        Ok(EngineSpec {
            name: spec.to_string(),
            depth,
        })
    }

    /// Fresh engine for one game; a small table keeps per-game setup cheap.
    pub fn build(&self) -> Engine {
        Engine::with_config(SearchConfig {
            max_depth: self.depth,
            time_limit: None,
            tt_entries: 1 << 16,
        })
    }
}

/// Knobs for a match between two specs.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub num_games: u32,
    /// Half-move cap per game before adjudicating a draw.
    pub max_moves: u32,
    /// Swap colors every game so neither spec always moves first.
    pub alternate_colors: bool,
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            num_games: 10,
            max_moves: 200,
            alternate_colors: true,
            verbose: true,
        }
    }
}

/// Outcome of one game from White's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Run a match; the result is from `first`'s perspective.
pub fn run_match(first: &EngineSpec, second: &EngineSpec, config: &MatchConfig) -> MatchResult {
    let mut result = MatchResult::default();

    for game in 0..config.num_games {
        let first_is_white = !config.alternate_colors || game % 2 == 0;
        let outcome = if first_is_white {
            play_game(first, second, config.max_moves)
        } else {
            play_game(second, first, config.max_moves)
        };

        let from_first = match (outcome, first_is_white) {
            (GameOutcome::Draw, _) => GameResult::Draw,
            (GameOutcome::WhiteWins, true) | (GameOutcome::BlackWins, false) => GameResult::Win,
            _ => GameResult::Loss,
        };
        result.record(from_first);

        if config.verbose {
            let colors = if first_is_white { "W-B" } else { "B-W" };
            let tag = match from_first {
                GameResult::Win => "1-0",
                GameResult::Loss => "0-1",
                GameResult::Draw => "1/2",
            };
            println!(
                "Game {}/{} ({colors}): {tag}  running {}-{}-{}",
                game + 1,
                config.num_games,
                result.wins,
                result.losses,
                result.draws
            );
        }
    }

    result
}

fn play_game(white: &EngineSpec, black: &EngineSpec, max_moves: u32) -> GameOutcome {
    let mut pos = Position::startpos();
    let mut white_engine = white.build();
    let mut black_engine = black.build();

    for _ in 0..max_moves {
        if let Some(terminal) = pos.terminal() {
            return match terminal {
                Terminal::WhiteMated => GameOutcome::BlackWins,
                Terminal::BlackMated => GameOutcome::WhiteWins,
                Terminal::WhiteStalemated | Terminal::BlackStalemated => GameOutcome::Draw,
            };
        }
        if pos.is_draw().is_some() {
            return GameOutcome::Draw;
        }

        let white_to_play = pos.white_to_play();
        let engine = if white_to_play {
            &mut white_engine
        } else {
            &mut black_engine
        };
        match engine.solve(&mut pos, white_to_play) {
            Some(mv) => {
                pos.make_move(mv);
            }
            // No move with no terminal flagged: treat as a dead game.
            None => return GameOutcome::Draw,
        }
    }

    // Neither side got anywhere within the cap.
    GameOutcome::Draw
}
