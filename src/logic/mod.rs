//! A [`Direction`] always names where the empty cell goes, never a tile.

mod a_star;
mod bfs;
pub mod heuristic;
mod tree;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

pub use a_star::AStarSolver;
pub use bfs::BreadthFirstSolver;
pub use heuristic::{Hamming, Heuristic, HeuristicKind, LinearConflict, Manhattan};

pub const MIN_DIMENSION: usize = 2;
pub const MAX_DIMENSION: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn reverse(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn step(&self, n: usize, row: usize, col: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Up => row.checked_sub(1).map(|r| (r, col)),
            Direction::Down => (row + 1 < n).then_some((row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => (col + 1 < n).then_some((row, col + 1)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(PuzzleError::ParseDirection(s.to_string())),
        }
    }
}

/// Row-major snapshot of a board; clones share one buffer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(Arc<[u8]>);

#[derive(Clone, Debug)]
pub struct Successor {
    pub direction: Direction,
    pub state: State,
    pub tile: u8,
    // flat indices; `from` is the new empty cell
    pub from: usize,
    pub to: usize,
}

impl State {
    pub fn goal(n: usize) -> Self {
        let cells = n * n;
        let tiles: Vec<u8> = (1..cells).map(|v| v as u8).chain(std::iter::once(0)).collect();
        State(tiles.into())
    }

    pub fn tiles(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn empty_index(&self) -> usize {
        self.0.iter().position(|&v| v == 0).unwrap_or_default()
    }

    /// Every state one legal move away, in [`Direction::ALL`] order.
    pub fn successors(&self, n: usize) -> impl Iterator<Item = Successor> + '_ {
        let empty = self.empty_index();
        let (row, col) = (empty / n, empty % n);

        Direction::ALL.into_iter().filter_map(move |direction| {
            let (r, c) = direction.step(n, row, col)?;
            let neighbour = r * n + c;
            let mut tiles = self.0.to_vec();
            tiles.swap(empty, neighbour);
            Some(Successor {
                direction,
                tile: self.0[neighbour],
                state: State(tiles.into()),
                from: neighbour,
                to: empty,
            })
        })
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(","))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Vec<u8>,
    empty: (usize, usize),
}

impl Board {
    pub fn new(n: usize) -> Result<Self, PuzzleError> {
        check_dimension(n)?;
        Ok(Board {
            n,
            tiles: State::goal(n).tiles().to_vec(),
            empty: (n - 1, n - 1),
        })
    }

    /// Builds a board from `n*n` row-major values, rejecting anything that is
    /// not a permutation of `0..n*n`.
    pub fn from_tiles(n: usize, tiles: Vec<u8>) -> Result<Self, PuzzleError> {
        check_dimension(n)?;
        let cells = n * n;
        if tiles.len() != cells {
            return Err(PuzzleError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        let mut empty = 0;
        for (index, &tile) in tiles.iter().enumerate() {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(PuzzleError::TileOutOfRange { tile, cells })?;
            if *slot {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            *slot = true;
            if tile == 0 {
                empty = index;
            }
        }

        Ok(Board {
            n,
            tiles,
            empty: (empty / n, empty % n),
        })
    }

    /// Comma or whitespace separated; the dimension is inferred from the count.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let tiles = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>()
                    .map_err(|e| PuzzleError::ParseTiles(format!("`{s}`: {e}")))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let n = (1..=MAX_DIMENSION)
            .find(|n| n * n == tiles.len())
            .ok_or_else(|| {
                PuzzleError::ParseTiles(format!(
                    "{} tiles do not form a square board",
                    tiles.len()
                ))
            })?;
        Self::from_tiles(n, tiles)
    }

    pub fn from_state(n: usize, state: &State) -> Result<Self, PuzzleError> {
        Self::from_tiles(n, state.tiles().to_vec())
    }

    pub fn state(&self) -> State {
        State(self.tiles.as_slice().into())
    }

    pub fn dimension(&self) -> usize {
        self.n
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * self.n + col]
    }

    pub fn grid(&self) -> Vec<Vec<u8>> {
        self.tiles.chunks(self.n).map(<[u8]>::to_vec).collect()
    }

    pub fn empty_cell(&self) -> (usize, usize) {
        self.empty
    }

    pub fn legal_moves(&self) -> Vec<Direction> {
        let (row, col) = self.empty;
        Direction::ALL
            .into_iter()
            .filter(|d| d.step(self.n, row, col).is_some())
            .collect()
    }

    /// Slides the empty cell one step. Returns `false` and leaves the board
    /// untouched when that would leave the grid.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let (row, col) = self.empty;
        let Some((new_row, new_col)) = direction.step(self.n, row, col) else {
            return false;
        };

        self.tiles.swap(row * self.n + col, new_row * self.n + new_col);
        self.empty = (new_row, new_col);
        true
    }

    pub fn apply_moves(&mut self, moves: &[Direction]) -> bool {
        moves.iter().all(|&m| self.apply_move(m))
    }

    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &v)| if i == last { v == 0 } else { v as usize == i + 1 })
    }

    /// Inversion-parity test. Only boards that pass can be reached from the
    /// solved configuration.
    pub fn is_solvable(&self) -> bool {
        let inversions: usize = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < v)
                    .count()
            })
            .sum();

        if self.n % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.empty.0) % 2 == 1
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.n * self.n - 1).to_string().len();
        for row in self.tiles.chunks(self.n) {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{v:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

fn check_dimension(n: usize) -> Result<(), PuzzleError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&n) {
        Ok(())
    } else {
        Err(PuzzleError::InvalidDimension(n))
    }
}
