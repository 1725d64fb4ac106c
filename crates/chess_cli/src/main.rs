//! Interactive chess CLI.
//!
//! The computer takes one side (Black unless `--white` is given) and the
//! human enters one SAN move per line on their turn. Per-depth search
//! telemetry is printed while the engine thinks. Exit code 0 on game
//! completion or quit, 1 on bad arguments.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use chess_rules::{Position, Terminal, move_from_san, move_to_san};
use chess_search::{Engine, SearchConfig, SearchReport};

struct Options {
    computer_is_white: bool,
    depth: u32,
    time_secs: u64,
    fen: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            computer_is_white: false,
            depth: 8,
            time_secs: 200,
            fen: None,
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {program} [--white | --black] [--depth N] [--time SECONDS] [--fen FEN]");
    println!();
    println!("  --white         computer plays White");
    println!("  --black         computer plays Black (default)");
    println!("  --depth N       iterative-deepening depth cap (default 8)");
    println!("  --time SECONDS  per-move time budget (default 200)");
    println!("  --fen FEN       start from this position instead of the initial one");
    println!();
    println!("On your turn, enter one SAN move per line (e.g. e4, Nf3, O-O, e8=Q).");
    println!("Coordinate moves like e2e4 work too. 'quit' ends the game.");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--white" => opts.computer_is_white = true,
            "--black" => opts.computer_is_white = false,
            "--depth" => {
                i += 1;
                opts.depth = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .ok_or("--depth expects a number")?;
            }
            "--time" => {
                i += 1;
                opts.time_secs = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .ok_or("--time expects a number of seconds")?;
            }
            "--fen" => {
                i += 1;
                opts.fen = Some(args.get(i).ok_or("--fen expects a position")?.clone());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(opts)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        print_usage(&args[0]);
        return ExitCode::SUCCESS;
    }

    let opts = match parse_args(&args[1..]) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage(&args[0]);
            return ExitCode::FAILURE;
        }
    };

    let mut pos = match &opts.fen {
        Some(fen) => match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Position::startpos(),
    };

    let mut engine = Engine::with_config(SearchConfig {
        max_depth: opts.depth,
        time_limit: Some(Duration::from_secs(opts.time_secs)),
        ..Default::default()
    });

    run_game(&mut pos, &mut engine, opts.computer_is_white);
    ExitCode::SUCCESS
}

fn print_report(report: &SearchReport) {
    println!(
        "Depth: {}, Score: {:.2}, Time: {:.2}s, Nodes Evaluated: {}, knps: {:.1}",
        report.depth,
        report.score as f64 / 100.0,
        report.elapsed.as_secs_f64(),
        report.nodes,
        report.knps()
    );
}

fn run_game(pos: &mut Position, engine: &mut Engine, computer_is_white: bool) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if let Some(terminal) = pos.terminal() {
            match terminal {
                Terminal::WhiteMated => println!("White is checkmated. Black wins!"),
                Terminal::BlackMated => println!("Black is checkmated. White wins!"),
                Terminal::WhiteStalemated | Terminal::BlackStalemated => {
                    println!("Stalemate. It's a draw!")
                }
            }
            return;
        }
        if let Some(reason) = pos.is_draw() {
            println!("Draw due to {reason}.");
            return;
        }

        let white_to_play = pos.white_to_play();
        let side = if white_to_play { "White" } else { "Black" };

        if white_to_play == computer_is_white {
            let Some(mv) = engine.solve_with(pos, white_to_play, print_report) else {
                // Terminal positions are handled above; nothing to play.
                return;
            };
            // Render before applying: SAN needs the pre-move position.
            let san = move_to_san(pos, mv);
            pos.make_move(mv);
            println!("Computer ({side}) plays: {san}");
        } else {
            print!("{pos}");
            print!("Your move ({side}): ");
            io::stdout().flush().ok();

            let Some(Ok(line)) = lines.next() else {
                // EOF on stdin ends the game.
                return;
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == "quit" {
                return;
            }
            match move_from_san(pos, input) {
                Ok(mv) => {
                    pos.make_move(mv);
                }
                Err(_) => {
                    println!("Invalid move. Try again.");
                    continue;
                }
            }
        }

        print!("{pos}");
    }
}
