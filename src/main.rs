use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::{style, Stylize};
use rand::{rngs::StdRng, SeedableRng};
use slider_ida::{Board, Error, Goal, Move, Outcome, Solver, SolverConfig};
use tracing_subscriber::EnvFilter;

/// Solve a sliding-tile puzzle in the fewest moves with IDA*
#[derive(Parser)]
#[command(name = "slider-ida")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of cells on the board, blank included
    #[arg(short, long, required_unless_present = "random")]
    size: Option<usize>,

    /// 1-based cell of the blank in the goal layout (-1 puts it last)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    blank_rank: i64,

    /// Initial layout in row-major order with 0 as the blank (read from stdin when omitted)
    #[arg(conflicts_with = "random")]
    tiles: Vec<u32>,

    /// Solve a random solvable board with this side length instead
    #[arg(long, value_name = "SIDE", conflicts_with = "size")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Give up once the cost bound passes this value
    #[arg(long, default_value_t = SolverConfig::default().max_threshold)]
    max_threshold: usize,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Search even when the parity check rules the goal out
    #[arg(long)]
    no_parity_check: bool,

    /// Print the board after every move
    #[arg(long)]
    show: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (start, goal) = load(cli)?;

    let time_limit = cli
        .time_limit
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --time-limit")?;
    let config = SolverConfig {
        max_threshold: cli.max_threshold,
        time_limit,
        check_solvability: !cli.no_parity_check,
    };
    let solver = Solver::new(start, goal)?.with_config(config);

    match solver.solve() {
        Outcome::Solved(solution) => {
            println!("{}", solution.len());
            for movement in &solution.moves {
                println!("{movement}");
            }
            if cli.show {
                replay(solver.start(), &solution.moves);
            }
            Ok(ExitCode::SUCCESS)
        }
        other => {
            println!("no solution");
            eprintln!("{}", reason(&other));
            Ok(ExitCode::from(1))
        }
    }
}

fn load(cli: &Cli) -> Result<(Board, Goal)> {
    let rank = blank_rank(cli.blank_rank);

    if let Some(side) = cli.random {
        let size = side
            .checked_mul(side)
            .with_context(|| format!("--random {side} is too large a side length"))?;
        let goal = Goal::with_blank_rank(size, rank)?;
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let start = Board::shuffled(&goal, &mut rng);
        eprintln!("start:\n{start}");
        return Ok((start, goal));
    }

    let size = cli.size.context("--size is required")?;
    let tiles = if cli.tiles.is_empty() {
        read_tiles()?
    } else {
        cli.tiles.clone()
    };
    if tiles.len() != size {
        return Err(Error::LengthMismatch {
            expected: size,
            got: tiles.len(),
        }
        .into());
    }

    let goal = Goal::with_blank_rank(size, rank)?;
    let start = Board::new(tiles)?;
    Ok((start, goal))
}

/// Zero, negative and oversized ranks all mean "blank last".
fn blank_rank(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&rank| rank > 0)
}

fn read_tiles() -> Result<Vec<u32>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read tiles from stdin")?;

    input
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .with_context(|| format!("invalid tile '{token}'"))
        })
        .collect()
}

fn reason(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Solved(_) => String::new(),
        Outcome::Unsolvable => "the start layout has the wrong parity for this goal".to_string(),
        Outcome::Exhausted => "every move sequence runs into a cycle".to_string(),
        Outcome::BoundExceeded { threshold } => {
            format!("cost bound {threshold} is over --max-threshold")
        }
        Outcome::TimedOut { threshold } => {
            format!("time limit reached before searching cost bound {threshold}")
        }
    }
}

fn replay(start: &Board, moves: &[Move]) {
    let mut board = start.clone();
    println!();
    print!("{}", render(&board, None));

    for &movement in moves {
        let Some(next) = board.apply(movement) else {
            break;
        };
        let moved = next.tiles()[board.blank()];
        println!("\n{movement}");
        print!("{}", render(&next, Some(moved)));
        board = next;
    }
}

fn render(board: &Board, highlight: Option<u32>) -> String {
    let width = board.tiles().len().saturating_sub(1).to_string().len();
    let mut out = String::new();

    for row in board.tiles().chunks(board.side()) {
        for &tile in row {
            let cell = if tile == 0 {
                " ".repeat(width)
            } else {
                format!("{tile:>width$}")
            };
            if highlight == Some(tile) {
                out.push_str(&style(cell).bold().yellow().to_string());
            } else {
                out.push_str(&cell);
            }
            out.push(' ');
        }
        out.push('\n');
    }

    out
}
