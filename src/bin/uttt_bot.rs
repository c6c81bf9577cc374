//! Line-based turn loop
//!
//! Each turn reads the opponent's last move as `row col` (`-1 -1` when this
//! side opens the game), then a count of valid actions followed by that many
//! `row col` lines, which are read and ignored. The chosen move is written to
//! stdout as `row col`; diagnostics go to stderr through `env_logger`.
//!
//! Usage: `uttt-bot [negamax|mcts] [budget_ms] [depth]`

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use log::{debug, error, info};

use ultimate_ttt::{Algorithm, Engine, Player, SearchConfig};

/// Per-turn budget used by MCTS when none is given
const DEFAULT_MCTS_BUDGET_MS: u64 = 90;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let algorithm = match args.first() {
        Some(name) => name.parse()?,
        None => Algorithm::Negamax,
    };
    let mut budget = args
        .get(1)
        .map(|ms| ms.parse::<u64>())
        .transpose()?
        .map(Duration::from_millis);
    let depth = args
        .get(2)
        .map(|d| d.parse::<u32>())
        .transpose()?
        .unwrap_or(3);

    let config = SearchConfig::default()
        .with_algorithm(algorithm)
        .with_depth(depth);
    if algorithm == Algorithm::MonteCarlo {
        budget = budget.or(Some(Duration::from_millis(DEFAULT_MCTS_BUDGET_MS)));
    }
    info!("playing with {:?}, depth {}, budget {:?}", algorithm, depth, budget);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut engine: Option<Engine> = None;

    while let Some(line) = lines.next() {
        let (row, col) = parse_pair(&line?)?;
        let valid_actions: usize = next_line(&mut lines)?.trim().parse()?;
        for _ in 0..valid_actions {
            next_line(&mut lines)?;
        }

        let opening = (row, col) == (-1, -1);
        if engine.is_none() {
            let first = if opening { Player::Me } else { Player::Opponent };
            engine = Some(Engine::new_game(first, config.clone())?);
        }
        let current = engine.as_mut().ok_or("engine not initialised")?;

        if !opening {
            current.advance_coordinate(row, col)?;
        }
        let play = match budget {
            Some(budget) => current.choose_move_within(budget)?,
            None => current.choose_move()?,
        };

        let (row, col) = play.to_coordinate();
        writeln!(out, "{} {}", row, col)?;
        out.flush()?;

        debug!("{}", current.get_statistics().summary());
        debug!("board after our move:\n{}", current.position().board());
    }

    Ok(())
}

fn next_line<B: BufRead>(lines: &mut io::Lines<B>) -> Result<String, Box<dyn Error>> {
    Ok(lines.next().ok_or("unexpected end of input")??)
}

fn parse_pair(line: &str) -> Result<(i32, i32), Box<dyn Error>> {
    let mut parts = line.split_whitespace();
    let row = parts.next().ok_or("missing row")?.parse()?;
    let col = parts.next().ok_or("missing column")?.parse()?;
    Ok((row, col))
}
