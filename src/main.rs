use clap::Parser;
use n_puzzle_solver::{parse_state, Algorithm, Heuristic, PuzzleState, Solver, SolverError};
use tracing_subscriber::EnvFilter;

// Format: one row per line or rows separated by `/`,
// tiles separated by spaces or commas, 0 or `.` is the blank.
const EXAMPLES: &[&str] = &[
    "
1 2 3
4 0 6
7 5 8
",
    "
8 6 7
2 5 4
3 0 1
",
    "
 5  1  2  4
 9  6  3  8
13 10  7 11
 0 14 15 12
",
];

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve sliding-tile N-puzzles", long_about = None)]
struct Args {
    /// Search algorithm: bfs, dfs or astar
    #[clap(short, long, default_value = "astar")]
    algorithm: Algorithm,

    /// Heuristic: hamming, manhattan, euclidean or linearConflicts
    #[clap(short = 'e', long, default_value = "manhattan")]
    heuristic: Heuristic,

    /// Only report whether the board is solvable
    #[clap(long)]
    check_only: bool,

    /// Board to solve, e.g. "1 2 3/4 0 6/7 5 8"; runs the built-in examples when omitted
    board: Option<String>,
}

fn run(board: &PuzzleState, args: &Args) -> Result<(), SolverError> {
    let solver = Solver::new(board.size())?;

    println!("----");
    println!("Source:");
    println!("{}", board);
    println!("----");

    if !solver.is_solvable(board) {
        println!("Not solvable");
        return Ok(());
    }
    if args.check_only {
        println!("Solvable");
        return Ok(());
    }

    let solution = solver.solve(board, args.algorithm, args.heuristic)?;
    println!(
        "Found a solution in {} moves with {}/{}:",
        solution.path.len(),
        args.algorithm,
        args.heuristic
    );
    println!(
        "Explored {} nodes (expanded {}, max depth {}) in {:?}.",
        solution.nodes_explored, solution.nodes_expanded, solution.max_depth, solution.time_taken
    );
    let moves: Vec<String> = solution.path.iter().map(ToString::to_string).collect();
    println!("{}", moves.join(" "));
    println!("----");
    println!();

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let boards: Result<Vec<PuzzleState>, SolverError> = match &args.board {
        Some(board) => parse_state(board).map(|b| vec![b]),
        None => EXAMPLES.iter().map(|s| parse_state(s)).collect(),
    };

    let outcome = boards.and_then(|boards| boards.iter().try_for_each(|board| run(board, &args)));
    if let Err(err) = outcome {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
