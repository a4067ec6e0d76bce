//! Self-play driver: `arbor_chess [plies] [depth]`.

use std::process::ExitCode;

use arbor_chess::board::{format_line, Board, NoProgress, SearchError, SearchParams};
use arbor_chess::{MoveSelector, OpeningBook, SearchEngine};

const DEFAULT_PLIES: u32 = 40;

fn parse_arg(args: &[String], index: usize, default: u32) -> Result<u32, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("expected a number, got '{raw}'")),
        None => Ok(default),
    }
}

fn run(plies: u32, depth: u32) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SearchEngine::new(SearchParams {
        depth,
        ..SearchParams::default()
    });
    let mut player = OpeningBook::new(engine)?;
    let mut board = Board::new();

    for _ in 0..plies {
        let side = board.to_move();
        let outcome = match player.select_move(&mut board, side, depth, &NoProgress) {
            Ok(outcome) => outcome,
            Err(SearchError::NoLegalMoves) => break,
            Err(err) => return Err(err.into()),
        };
        log::info!(
            "{:>3}. {side} {} ({}, {} nodes)",
            board.game_ply() / 2 + 1,
            outcome.best,
            outcome.value,
            outcome.nodes
        );
        board.play(&outcome.best)?;
        if outcome.best.status().is_terminal() {
            break;
        }
    }

    println!("{}", format_line(&board.history()));
    println!("{}", board.to_fen());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let limits = parse_arg(&args, 1, DEFAULT_PLIES)
        .and_then(|plies| parse_arg(&args, 2, SearchParams::default().depth).map(|depth| (plies, depth)));
    let (plies, depth) = match limits {
        Ok(limits) => limits,
        Err(msg) => {
            eprintln!("usage: arbor_chess [plies] [depth]: {msg}");
            return ExitCode::FAILURE;
        }
    };

    match run(plies, depth) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
