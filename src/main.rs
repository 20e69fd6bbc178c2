use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use npuzzle::config::DEFAULT_CONFIG_FILE;
use npuzzle::{
    build_solver, Algorithm, Board, Config, ConfigError, Direction, HeuristicKind, Metrics,
    PuzzleError, Shuffler, Solver,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve the sliding N-puzzle with BFS or A*", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ./npuzzle.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board dimension N
    #[arg(short = 'n', long)]
    dimension: Option<usize>,

    /// Number of random legal moves used to shuffle the solved board
    #[arg(short, long)]
    moves: Option<usize>,

    /// Seed for the shuffle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Explicit start board, row-major, e.g. "1,2,3,4,5,6,7,0,8"
    #[arg(short, long, conflicts_with_all = ["dimension", "moves", "seed"])]
    tiles: Option<String>,

    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    #[arg(long, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Give up after expanding this many states
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Run BFS and A* with every heuristic on the same board
    #[arg(long)]
    compare: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    decision_basis: String,
    moves: Option<Vec<Direction>>,
    replay_solved: bool,
    metrics: Metrics,
}

fn load_config(args: &Args) -> Result<Config> {
    load_config_with_default(args, Path::new(DEFAULT_CONFIG_FILE))
}

// A missing default file means defaults; anything else wrong with it is an error.
fn load_config_with_default(args: &Args, default_path: &Path) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match Config::load(default_path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to load config from {}", default_path.display())
                })
            }
        },
    };

    if let Some(n) = args.dimension {
        config.board.dimension = n;
    }
    if let Some(moves) = args.moves {
        config.board.shuffle_moves = moves;
    }
    if args.seed.is_some() {
        config.board.seed = args.seed;
    }
    if let Some(algorithm) = args.algorithm {
        config.solver.algorithm = algorithm;
    }
    if let Some(heuristic) = args.heuristic {
        config.solver.heuristic = heuristic;
    }
    if args.max_nodes.is_some() {
        config.solver.max_nodes = args.max_nodes;
    }

    config.validate()?;
    Ok(config)
}

fn start_board(args: &Args, config: &Config) -> Result<Board> {
    if let Some(tiles) = &args.tiles {
        let board = Board::parse(tiles)?;
        if !board.is_solvable() {
            bail!(PuzzleError::Unsolvable);
        }
        return Ok(board);
    }

    let mut shuffler = match config.board.seed {
        Some(seed) => Shuffler::from_seed(seed),
        None => Shuffler::from_entropy(),
    };
    Ok(shuffler.shuffled(config.board.dimension, config.board.shuffle_moves)?)
}

fn run(solver: &mut dyn Solver, board: &Board) -> Report {
    let moves = solver.solve(board);

    let mut replay = board.clone();
    let replay_solved = moves
        .as_deref()
        .is_some_and(|m| replay.apply_moves(m) && replay.is_solved());

    Report {
        decision_basis: solver.decision_basis(),
        moves,
        replay_solved,
        metrics: solver.metrics(),
    }
}

fn print_report(report: &Report) {
    println!("{}", report.decision_basis);
    match &report.moves {
        Some(moves) => {
            let listed: Vec<String> = moves.iter().map(Direction::to_string).collect();
            println!("Solution ({} moves): {}", moves.len(), listed.join(" "));
            println!("Replay reaches goal: {}", report.replay_solved);
        }
        None => println!("No solution found"),
    }
    print!("{}", report.metrics);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("npuzzle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let board = start_board(&args, &config)?;
    let limits = config.solver.limits();

    let mut solvers: Vec<Box<dyn Solver>> = if args.compare {
        std::iter::once(build_solver(Algorithm::Bfs, HeuristicKind::default(), limits))
            .chain(
                HeuristicKind::ALL
                    .into_iter()
                    .map(|h| build_solver(Algorithm::AStar, h, limits)),
            )
            .collect()
    } else {
        vec![build_solver(
            config.solver.algorithm,
            config.solver.heuristic,
            limits,
        )]
    };

    let reports: Vec<Report> = solvers
        .iter_mut()
        .map(|solver| run(solver.as_mut(), &board))
        .collect();

    if args.json {
        #[derive(Serialize)]
        struct Output<'a> {
            start: Vec<Vec<u8>>,
            runs: &'a [Report],
        }
        let output = Output {
            start: board.grid(),
            runs: &reports,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Start ({}x{}):", board.dimension(), board.dimension());
        println!("{board}");
        for report in &reports {
            print_report(report);
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "npuzzle",
            "-n",
            "4",
            "--moves",
            "12",
            "--algorithm",
            "bfs",
            "--heuristic",
            "linear-conflict",
            "--max-nodes",
            "100",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.board.dimension, 4);
        assert_eq!(config.board.shuffle_moves, 12);
        assert_eq!(config.solver.algorithm, Algorithm::Bfs);
        assert_eq!(config.solver.heuristic, HeuristicKind::LinearConflict);
        assert_eq!(config.solver.max_nodes, Some(100));
    }

    #[test]
    fn out_of_range_dimension_is_rejected() {
        let args = Args::try_parse_from(["npuzzle", "-n", "1"]).unwrap();
        assert!(load_config(&args).is_err());
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("npuzzle-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn malformed_default_config_is_an_error() {
        let args = Args::try_parse_from(["npuzzle"]).unwrap();

        let bad_values = scratch_file("bad-values.toml", "[board]\ndimension = 12\n");
        let err = load_config_with_default(&args, &bad_values).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));

        let bad_syntax = scratch_file("bad-syntax.toml", "[solver]\nheuristic = \"bogus\"\n");
        let err = load_config_with_default(&args, &bad_syntax).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Toml(_))
        ));

        std::fs::remove_file(bad_values).unwrap();
        std::fs::remove_file(bad_syntax).unwrap();
    }

    #[test]
    fn missing_default_config_falls_back_to_defaults() {
        let args = Args::try_parse_from(["npuzzle", "--seed", "9"]).unwrap();
        let missing = std::env::temp_dir().join("npuzzle-no-such-config.toml");
        let config = load_config_with_default(&args, &missing).unwrap();
        assert_eq!(config.board.dimension, 3);
        assert_eq!(config.board.seed, Some(9));
    }

    #[test]
    fn default_config_file_is_read() {
        let args = Args::try_parse_from(["npuzzle", "--heuristic", "hamming"]).unwrap();
        let path = scratch_file("good.toml", "[board]\ndimension = 4\n");
        let config = load_config_with_default(&args, &path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(config.board.dimension, 4);
        assert_eq!(config.solver.heuristic, HeuristicKind::Hamming);
    }

    #[test]
    fn tiles_conflict_with_shuffle_flags() {
        assert!(Args::try_parse_from(["npuzzle", "--tiles", "1,2,3,0", "--seed", "3"]).is_err());
    }

    #[test]
    fn unsolvable_tiles_are_rejected() {
        let args = Args::try_parse_from(["npuzzle", "--tiles", "2,1,3,0"]).unwrap();
        let config = load_config(&args).unwrap();
        let err = start_board(&args, &config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PuzzleError>(),
            Some(&PuzzleError::Unsolvable)
        );
    }

    #[test]
    fn report_replays_solution() {
        let board = Board::parse("1 2 3 4 5 6 7 0 8").unwrap();
        let mut solver = build_solver(Algorithm::AStar, HeuristicKind::Manhattan, Default::default());
        let report = run(solver.as_mut(), &board);
        assert_eq!(report.moves, Some(vec![Direction::Right]));
        assert!(report.replay_solved);
        assert_eq!(report.metrics.count("path_cost"), Some(1));
    }
}
