//! Sliding N-puzzle solvers.
//!
//! ```
//! use npuzzle::{AStarSolver, Board, Direction, HeuristicKind, Solver};
//!
//! let mut board = Board::new(3).unwrap();
//! board.apply_move(Direction::Up);
//! board.apply_move(Direction::Left);
//!
//! let mut solver = AStarSolver::new(HeuristicKind::Manhattan);
//! let moves = solver.solve(&board).unwrap();
//! assert_eq!(moves, vec![Direction::Right, Direction::Down]);
//!
//! assert!(board.apply_moves(&moves));
//! assert!(board.is_solved());
//! ```

pub mod config;
pub mod error;
pub mod logic;
pub mod shuffle;
pub mod solver;

pub use config::Config;
pub use error::{ConfigError, PuzzleError};
pub use logic::heuristic;
pub use logic::{
    AStarSolver, Board, BreadthFirstSolver, Direction, HeuristicKind, State, MAX_DIMENSION,
    MIN_DIMENSION,
};
pub use shuffle::{Shuffler, DEFAULT_SHUFFLE_MOVES};
pub use solver::{build_solver, Algorithm, MetricValue, Metrics, Outcome, SearchLimits, Solver};
