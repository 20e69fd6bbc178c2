//! Run configuration loaded from TOML.
//!
//! ```
//! use npuzzle::{Algorithm, Config, HeuristicKind};
//!
//! let config = Config::from_toml_str(r#"
//!     [board]
//!     dimension = 4
//!     seed = 42
//!
//!     [solver]
//!     algorithm = "a_star"
//!     heuristic = "linear_conflict"
//!     max_nodes = 500000
//! "#).unwrap();
//!
//! assert_eq!(config.board.dimension, 4);
//! assert_eq!(config.board.shuffle_moves, 1000);
//! assert_eq!(config.solver.algorithm, Algorithm::AStar);
//! assert_eq!(config.solver.heuristic, HeuristicKind::LinearConflict);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logic::{HeuristicKind, MAX_DIMENSION, MIN_DIMENSION};
use crate::shuffle::DEFAULT_SHUFFLE_MOVES;
use crate::solver::{Algorithm, SearchLimits};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "npuzzle.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,

    #[serde(default)]
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BoardConfig {
    /// Grid dimension N, in `2..=9`.
    pub dimension: usize,

    /// Random legal moves applied to the solved board.
    pub shuffle_moves: usize,

    /// Seed for reproducible shuffles.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            dimension: 3,
            shuffle_moves: DEFAULT_SHUFFLE_MOVES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    pub algorithm: Algorithm,

    /// Ignored by BFS.
    pub heuristic: HeuristicKind,

    /// Expansion budget; unlimited when absent.
    pub max_nodes: Option<u64>,
}

impl SolverConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: self.max_nodes,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.board.dimension;
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
            return Err(ConfigError::Invalid(format!(
                "board.dimension must be between {MIN_DIMENSION} and {MAX_DIMENSION}, got {n}"
            )));
        }
        if self.solver.max_nodes == Some(0) {
            return Err(ConfigError::Invalid(
                "solver.max_nodes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
