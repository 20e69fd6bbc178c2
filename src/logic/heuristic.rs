//! Tile `v` belongs at flat index `v - 1`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub trait Heuristic {
    fn name(&self) -> &'static str;

    fn estimate(&self, tiles: &[u8], n: usize) -> u32;

    /// Estimate for a child reached by sliding `tile` from flat index `from`
    /// to `to`, given the parent's estimate. Falls back to a full recount.
    fn estimate_successor(
        &self,
        _parent_h: u32,
        tiles: &[u8],
        n: usize,
        _tile: u8,
        _from: usize,
        _to: usize,
    ) -> u32 {
        self.estimate(tiles, n)
    }
}

#[inline]
fn tile_distance(tile: u8, index: usize, n: usize) -> u32 {
    let target = tile as usize - 1;
    let rows = (index / n).abs_diff(target / n);
    let cols = (index % n).abs_diff(target % n);
    (rows + cols) as u32
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn estimate(&self, tiles: &[u8], n: usize) -> u32 {
        tiles
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| tile_distance(v, i, n))
            .sum()
    }

    fn estimate_successor(
        &self,
        parent_h: u32,
        _tiles: &[u8],
        n: usize,
        tile: u8,
        from: usize,
        to: usize,
    ) -> u32 {
        // A single move shifts exactly one tile by one cell.
        let before = tile_distance(tile, from, n);
        let after = tile_distance(tile, to, n);
        (parent_h + after) - before
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Hamming;

impl Heuristic for Hamming {
    fn name(&self) -> &'static str {
        "hamming"
    }

    fn estimate(&self, tiles: &[u8], _n: usize) -> u32 {
        tiles
            .iter()
            .enumerate()
            .filter(|&(i, &v)| v != 0 && v as usize != i + 1)
            .count() as u32
    }
}

/// Manhattan distance plus two moves for every tile that has to step out of
/// its home row (or column) so the remaining tiles of that line can pass each
/// other.
///
/// Per line this charges `k - lis`, where `k` counts the tiles already in
/// their home line and `lis` is the longest run of them whose goal positions
/// are increasing. When conflicts are disjoint pairs this is exactly two per
/// reversed pair.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearConflict;

impl LinearConflict {
    fn conflicts(tiles: &[u8], n: usize) -> u32 {
        let mut extra = 0;
        let mut line = Vec::with_capacity(n);

        for row in 0..n {
            line.clear();
            for col in 0..n {
                let v = tiles[row * n + col];
                if v != 0 && (v as usize - 1) / n == row {
                    line.push((v as usize - 1) % n);
                }
            }
            extra += line.len() - longest_increasing(&line);
        }

        for col in 0..n {
            line.clear();
            for row in 0..n {
                let v = tiles[row * n + col];
                if v != 0 && (v as usize - 1) % n == col {
                    line.push((v as usize - 1) / n);
                }
            }
            extra += line.len() - longest_increasing(&line);
        }

        2 * extra as u32
    }
}

fn longest_increasing(values: &[usize]) -> usize {
    let mut tails: Vec<usize> = Vec::with_capacity(values.len());
    for &v in values {
        let slot = tails.partition_point(|&t| t < v);
        if slot == tails.len() {
            tails.push(v);
        } else {
            tails[slot] = v;
        }
    }
    tails.len()
}

impl Heuristic for LinearConflict {
    fn name(&self) -> &'static str {
        "linear_conflict"
    }

    fn estimate(&self, tiles: &[u8], n: usize) -> u32 {
        Manhattan.estimate(tiles, n) + Self::conflicts(tiles, n)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Hamming,
    LinearConflict,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::Manhattan,
        HeuristicKind::Hamming,
        HeuristicKind::LinearConflict,
    ];
}

impl Heuristic for HeuristicKind {
    fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => Manhattan.name(),
            HeuristicKind::Hamming => Hamming.name(),
            HeuristicKind::LinearConflict => LinearConflict.name(),
        }
    }

    fn estimate(&self, tiles: &[u8], n: usize) -> u32 {
        match self {
            HeuristicKind::Manhattan => Manhattan.estimate(tiles, n),
            HeuristicKind::Hamming => Hamming.estimate(tiles, n),
            HeuristicKind::LinearConflict => LinearConflict.estimate(tiles, n),
        }
    }

    fn estimate_successor(
        &self,
        parent_h: u32,
        tiles: &[u8],
        n: usize,
        tile: u8,
        from: usize,
        to: usize,
    ) -> u32 {
        match self {
            HeuristicKind::Manhattan => {
                Manhattan.estimate_successor(parent_h, tiles, n, tile, from, to)
            }
            HeuristicKind::Hamming => Hamming.estimate(tiles, n),
            HeuristicKind::LinearConflict => LinearConflict.estimate(tiles, n),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Board, Direction, State};

    #[test]
    fn zero_on_goal() {
        for n in 2..=9 {
            let goal = State::goal(n);
            for kind in HeuristicKind::ALL {
                assert_eq!(kind.estimate(goal.tiles(), n), 0, "{kind} on {n}x{n}");
            }
        }
    }

    #[test]
    fn one_move_from_goal() {
        let mut board = Board::new(3).unwrap();
        board.apply_move(Direction::Left);
        let tiles = board.tiles();
        assert_eq!(Manhattan.estimate(tiles, 3), 1);
        assert_eq!(Hamming.estimate(tiles, 3), 1);
        assert_eq!(LinearConflict.estimate(tiles, 3), 1);
    }

    #[test]
    fn manhattan_hand_computed() {
        // 8 and 1 have swapped places: (0,0) <-> (2,1), three steps each.
        let tiles = [8, 2, 3, 4, 5, 6, 7, 1, 0];
        assert_eq!(Manhattan.estimate(&tiles, 3), 6);
        assert_eq!(Hamming.estimate(&tiles, 3), 2);
    }

    #[test]
    fn linear_conflict_single_pair() {
        // 2 and 1 are both in row 0 but reversed.
        let tiles = [2, 1, 3, 4, 5, 6, 7, 8, 0];
        assert_eq!(Manhattan.estimate(&tiles, 3), 2);
        assert_eq!(LinearConflict.estimate(&tiles, 3), 4);
    }

    #[test]
    fn linear_conflict_chain_counts_tiles_not_pairs() {
        // Row 0 holds 3, 2, 1: three reversed pairs, but only two tiles must leave.
        let tiles = [3, 2, 1, 4, 5, 6, 7, 8, 0];
        assert_eq!(Manhattan.estimate(&tiles, 3), 4);
        assert_eq!(LinearConflict.estimate(&tiles, 3), 8);
    }

    #[test]
    fn linear_conflict_rows_and_columns_add_up() {
        // 2/1 reversed in row 0, 8/4 reversed in column 3.
        let tiles = [2, 1, 3, 8, 5, 6, 7, 4, 9, 10, 11, 12, 13, 14, 15, 0];
        let manhattan = Manhattan.estimate(&tiles, 4);
        assert_eq!(manhattan, 4);
        assert_eq!(LinearConflict.estimate(&tiles, 4), manhattan + 4);
    }

    #[test]
    fn incremental_manhattan_matches_recount() {
        let mut board = Board::new(4).unwrap();
        board.apply_moves(&[
            Direction::Up,
            Direction::Left,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ]);
        let state = board.state();
        let parent_h = Manhattan.estimate(state.tiles(), 4);

        for successor in state.successors(4) {
            let incremental = Manhattan.estimate_successor(
                parent_h,
                successor.state.tiles(),
                4,
                successor.tile,
                successor.from,
                successor.to,
            );
            assert_eq!(incremental, Manhattan.estimate(successor.state.tiles(), 4));
        }
    }

    #[test]
    fn longest_increasing_run() {
        assert_eq!(longest_increasing(&[]), 0);
        assert_eq!(longest_increasing(&[0, 1, 2]), 3);
        assert_eq!(longest_increasing(&[2, 1, 0]), 1);
        assert_eq!(longest_increasing(&[2, 0, 1]), 2);
    }

    #[test]
    fn kind_names_are_stable() {
        let names: Vec<&str> = HeuristicKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["manhattan", "hamming", "linear_conflict"]);
    }
}
