//! Arena: automated match harness.
//!
//! Pits differently configured searchers against each other, tracks
//! win/loss/draw tallies and Elo ratings, and persists the ratings table
//! as JSON between runs.

mod elo;
mod match_runner;

use std::env;
use std::process::ExitCode;

use elo::EloTracker;
use match_runner::{EngineSpec, MatchConfig, run_match};

const RATINGS_PATH: &str = "arena_elo.json";

fn print_usage() {
    println!("Arena match runner");
    println!();
    println!("Usage:");
    println!("  arena match <spec1> <spec2> [--games N] [--max-moves M]");
    println!("  arena leaderboard");
    println!();
    println!("An engine spec names a search depth, e.g. d2 or d5.");
    println!();
    println!("Examples:");
    println!("  arena match d2 d4 --games 20");
    println!("  arena leaderboard");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "match" => cmd_match(&args[2..]),
        "leaderboard" | "elo" => cmd_leaderboard(),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn cmd_match(args: &[String]) -> ExitCode {
    if args.len() < 2 {
        eprintln!("Error: match requires two engine specs");
        print_usage();
        return ExitCode::FAILURE;
    }

    let (first, second) = match (EngineSpec::parse(&args[0]), EngineSpec::parse(&args[1])) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = MatchConfig::default();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                if let Some(n) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config.num_games = n;
                    i += 1;
                }
            }
            "--max-moves" => {
                if let Some(n) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    config.max_moves = n;
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    println!("=== Match: {} vs {} ===", first.name, second.name);
    println!("Games: {}", config.num_games);
    println!();

    let result = run_match(&first, &second, &config);

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws",
        first.name, result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut tracker = EloTracker::load(RATINGS_PATH).unwrap_or_default();
    tracker.apply_match(&first.name, &second.name, &result);
    tracker.print_leaderboard();
    if let Err(e) = tracker.save(RATINGS_PATH) {
        eprintln!("Warning: {e}");
    }

    ExitCode::SUCCESS
}

fn cmd_leaderboard() -> ExitCode {
    match EloTracker::load(RATINGS_PATH) {
        Ok(tracker) => {
            tracker.print_leaderboard();
            ExitCode::SUCCESS
        }
        Err(_) => {
            println!("No arena data found. Run some matches first!");
            ExitCode::SUCCESS
        }
    }
}
