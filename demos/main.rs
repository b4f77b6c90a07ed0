//! mazepath: carve a board, search it step by step, print it as ASCII.
//!
//! ```text
//! mazepath --cols 30 --rows 12 --algorithm bi-astar --frames 50
//! mazepath --scatter 0.3 --algorithm greedy --seed 7
//! RUST_LOG=debug mazepath --algorithm dijkstra
//! ```

use std::process::ExitCode;

use clap::Parser;
use mazepath_core::{Cell, CellState, Grid};
use mazepath_gen::{MazeGen, board_size};
use mazepath_paths::{Algorithm, DEFAULT_TURN_PENALTY, Metric, Search, SearchConfig, Step};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::{Rng, RngExt};
use tracing::{error, info};

/// Largest maze side, in rooms, the demo accepts.
const MAX_ROOMS: i64 = 2048;

#[derive(Parser, Debug)]
#[command(name = "mazepath")]
#[command(about = "Step-by-step grid search over generated mazes")]
struct Args {
    /// Maze width in rooms (the board is 2·cols + 1 squares wide)
    #[arg(
        long,
        default_value_t = 20,
        value_parser = clap::value_parser!(i32).range(1..=MAX_ROOMS)
    )]
    cols: i32,

    /// Maze height in rooms
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(i32).range(1..=MAX_ROOMS)
    )]
    rows: i32,

    /// dijkstra, astar, greedy, bi-dijkstra, bi-astar or bi-greedy
    #[arg(long, short, default_value = "astar")]
    algorithm: Algorithm,

    /// Edge cost metric (manhattan or euclidean)
    #[arg(long, default_value = "manhattan")]
    cost: Metric,

    /// Heuristic metric (manhattan or euclidean)
    #[arg(long, default_value = "manhattan")]
    heuristic: Metric,

    /// Extra cost per bend in the route
    #[arg(long, default_value_t = DEFAULT_TURN_PENALTY)]
    turn_penalty: f64,

    /// RNG seed; a random one is picked and printed when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Search a bordered open board with this wall density instead of a maze
    #[arg(long)]
    scatter: Option<f64>,

    /// Print the board every N expansions (0 prints only the final board)
    #[arg(long, default_value_t = 0)]
    frames: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("seed {seed}");

    let (mut grid, start, goal) = build_board(&args, StdRng::seed_from_u64(seed));
    let config = SearchConfig::default()
        .with_cost(args.cost)
        .with_heuristic(args.heuristic)
        .with_turn_penalty(args.turn_penalty);

    let mut search = match Search::new(&grid, start, goal, args.algorithm, config) {
        Ok(search) => search,
        Err(e) => {
            error!("cannot start search: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut marks = 0usize;
    let mut count = |_: Cell, _: CellState| marks += 1;
    let outcome = loop {
        match search.step(&mut grid, Some(&mut count)) {
            Ok(Step::Pending) => {
                if args.frames > 0 && search.expanded() % args.frames == 0 {
                    println!("-- {} expansions --\n{grid}", search.expanded());
                }
            }
            Ok(done) => break done,
            Err(e) => {
                error!("search failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    println!("{grid}");
    println!("seed {seed}, {marks} marks reported");
    match outcome {
        Step::Found(path) => println!(
            "{}: {} -> {} in {} cells, {} turns, cost {:.2}, {} expansions",
            args.algorithm,
            path.start(),
            path.goal(),
            path.len(),
            path.turns(),
            path.cost(),
            search.expanded()
        ),
        _ => println!(
            "{}: {goal} unreachable from {start} after {} expansions",
            args.algorithm,
            search.expanded()
        ),
    }
    ExitCode::SUCCESS
}

/// The board to search and its two endpoints.
fn build_board<R: Rng>(args: &Args, rng: R) -> (Grid, Cell, Cell) {
    let mut mg = MazeGen::new(rng);
    match args.scatter {
        Some(density) => {
            let (w, h) = board_size(args.cols, args.rows);
            let mut grid = Grid::bordered(w, h);
            let (start, goal) = (Cell::new(1, 1), Cell::new(w - 2, h - 2));
            mg.scatter(&mut grid, density, &[start, goal]);
            (grid, start, goal)
        }
        None => {
            let maze = mg.carve(args.cols, args.rows);
            (maze.grid, maze.entrance, maze.exit)
        }
    }
}
