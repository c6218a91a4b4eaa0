//! Batch perft regression runner.
//!
//! Reads a perft-suite text file (one FEN plus `;`-separated `Dn nodes`
//! pairs per line, the format used across the Rust chess ecosystem for
//! regression-testing move generators) and reports pass/fail per line,
//! exiting non-zero on any mismatch.

use std::{process::ExitCode, time::Instant};

use chess_core::board::parse_fen;
use chess_core::perft::perft;
use log::error;

#[derive(Debug, Clone)]
struct TestCase {
    fen: String,
    expected_nodes_by_depth: Vec<u64>,
}

fn parse_test_cases(text: &str) -> Vec<TestCase> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (fen, results) = line
                .split_once(" ;")
                .unwrap_or_else(|| panic!("malformed perft-suite line: {line}"));

            let expected_nodes_by_depth = results
                .split(" ;")
                .map(|field| {
                    let (_, nodes) = field
                        .split_once(' ')
                        .unwrap_or_else(|| panic!("malformed perft-suite field: {field}"));
                    nodes
                        .parse()
                        .unwrap_or_else(|_| panic!("not a node count: {nodes}"))
                })
                .collect();

            TestCase {
                fen: fen.to_string(),
                expected_nodes_by_depth,
            }
        })
        .collect()
}

fn run_test_case(id: usize, case: &TestCase) -> bool {
    println!("test case {id}: {}", case.fen);

    let mut position = match parse_fen(&case.fen) {
        Ok(position) => position,
        Err(e) => {
            error!("failed to parse FEN on line {id}: {e}");
            println!("  -- FEN PARSE ERROR: {e}");
            return false;
        }
    };

    let mut failed = false;
    for (i, &expected) in case.expected_nodes_by_depth.iter().enumerate() {
        let depth = i + 1;
        let received = perft(&mut position, depth);
        if received == expected {
            println!("  depth {depth}: {received} nodes, ok");
        } else {
            failed = true;
            println!("  depth {depth}: expected {expected}, got {received} -- MISMATCH");
        }
    }

    !failed
}

fn main() -> ExitCode {
    env_logger::init();

    let test_cases = parse_test_cases(include_str!("perftsuite.txt"));
    let mut failed_cases = Vec::new();

    let start = Instant::now();
    for (i, case) in test_cases.iter().enumerate() {
        let id = i + 1;
        if !run_test_case(id, case) {
            failed_cases.push(id);
        }
    }
    let elapsed = start.elapsed();

    println!("ran {} test cases in {:.3}s", test_cases.len(), elapsed.as_secs_f64());

    if failed_cases.is_empty() {
        println!("all test cases passed");
        ExitCode::SUCCESS
    } else {
        println!(
            "failing cases: {}",
            failed_cases
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        ExitCode::FAILURE
    }
}
