use std::time::{Duration, Instant};

use chess_core::board::{parse_fen, parse_move_text, Position};
use chess_core::perft::{divide, perft};
use clap::Parser;

/// Perft driver for `chess_core`.
///
/// Runs perft on the move generator to check it for correctness and measure
/// its performance.
#[derive(Parser, Debug)]
struct Args {
    /// Starting position of the board.
    ///
    /// Expects either the string "startpos" or a valid position in
    /// Forsyth-Edwards Notation (FEN). Additional alterations to the position
    /// can be specified via the `--moves` option.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: Position,

    /// Additional moves to play before running perft.
    ///
    /// Plays the specified moves on top of the position specified with
    /// `--position` before running perft. Can be used to quickly test
    /// variations on a position.
    ///
    /// Moves should consist of the starting square in algebraic notation
    /// followed by the ending square in algebraic notation, plus an optional
    /// promotion target as a lowercase letter, e.g. `d2d4`, `e7e8q`.
    #[arg(short, long, num_args(0..))]
    moves: Vec<String>,

    /// Depth to search to.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..), default_value_t = 6)]
    depth: u8,

    /// Breaks down the node count at `depth` by root move, instead of
    /// printing the cumulative count at every depth from 1 up to `depth`.
    /// Used to localize a perft mismatch against a reference engine one
    /// root move at a time.
    #[arg(long)]
    divide: bool,
}

fn parse_position(s: &str) -> Result<Position, String> {
    if s == "startpos" {
        Ok(Position::starting_position())
    } else {
        parse_fen(s).map_err(|e| format!("expected `startpos` or a valid FEN string: {e}"))
    }
}

fn play_moves(position: &mut Position, move_texts: &[String]) -> Result<(), String> {
    for text in move_texts {
        let legal = position.legal_moves();
        let mv = parse_move_text(text, &legal).map_err(|e| {
            format!(
                "move `{text}` is not legal in this position ({}): {e}",
                position.to_fen()
            )
        })?;
        position
            .make_move(mv, chess_core::board::MoveMode::AllMoves)
            .expect("a move drawn from legal_moves() is always accepted by make_move");
    }
    Ok(())
}

fn run_cumulative(mut position: Position, max_depth: usize) {
    let mut total_time = Duration::ZERO;
    let mut last_depth_time = Duration::ZERO;
    let mut total_nodes = 0u64;

    for depth in 0..=max_depth {
        let start = Instant::now();
        let nodes = perft(&mut position, depth);
        let elapsed = start.elapsed();

        println!(
            "depth {depth}: {nodes} nodes in {:.3}s",
            elapsed.as_secs_f64()
        );

        total_time += elapsed;
        last_depth_time = elapsed;
        total_nodes += nodes;
    }

    println!();
    let nodes_per_second = total_nodes as f64 / last_depth_time.as_secs_f64().max(f64::EPSILON);
    println!(
        "total nodes: {total_nodes}\ttotal time: {:.3}s\tnodes/sec: {:.0}",
        total_time.as_secs_f64(),
        nodes_per_second
    );
}

fn run_divide(mut position: Position, depth: usize) {
    let breakdown = divide(&mut position, depth);
    let mut total = 0u64;
    for (mv, nodes) in &breakdown {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!();
    println!("nodes searched: {total}");
}

fn main() -> Result<(), String> {
    env_logger::init();

    let Args {
        position,
        moves,
        depth,
        divide,
    } = Args::parse();

    let mut position = position;
    play_moves(&mut position, &moves)?;

    if divide {
        run_divide(position, depth as usize);
    } else {
        run_cumulative(position, depth as usize);
    }

    Ok(())
}
