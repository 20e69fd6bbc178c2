use thiserror::Error;

/// Errors raised while building or validating a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("board dimension {0} is outside the supported range 2..=9")]
    InvalidDimension(usize),

    #[error("expected {expected} tiles for this dimension, found {found}")]
    WrongTileCount { expected: usize, found: usize },

    #[error("tile {tile} is out of range for a board of {cells} cells")]
    TileOutOfRange { tile: u8, cells: usize },

    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),

    #[error("board cannot be reached from the solved configuration")]
    Unsolvable,

    #[error("could not parse tile list: {0}")]
    ParseTiles(String),

    #[error("unknown direction `{0}`")]
    ParseDirection(String),
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
