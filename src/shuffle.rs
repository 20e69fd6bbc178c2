use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::PuzzleError;
use crate::logic::{Board, Direction};

pub const DEFAULT_SHUFFLE_MOVES: usize = 1000;

/// Random walk from the given board, so the result stays solvable.
pub struct Shuffler<R: Rng> {
    rng: R,
}

impl Shuffler<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Shuffler::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Shuffler::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Shuffler<R> {
    pub fn new(rng: R) -> Self {
        Shuffler { rng }
    }

    /// Applies `moves` moves, each drawn uniformly from the legal ones, and
    /// returns them in order.
    pub fn shuffle(&mut self, board: &mut Board, moves: usize) -> Vec<Direction> {
        let mut applied = Vec::with_capacity(moves);
        for _ in 0..moves {
            let legal = board.legal_moves();
            if let Some(&direction) = legal.choose(&mut self.rng) {
                board.apply_move(direction);
                applied.push(direction);
            }
        }
        applied
    }

    /// A fresh solved board of dimension `n` after `moves` random moves.
    pub fn shuffled(&mut self, n: usize, moves: usize) -> Result<Board, PuzzleError> {
        let mut board = Board::new(n)?;
        self.shuffle(&mut board, moves);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        let a = Shuffler::from_seed(7).shuffled(4, 200).unwrap();
        let b = Shuffler::from_seed(7).shuffled(4, 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_shuffle_move_is_legal() {
        let mut board = Board::new(3).unwrap();
        let moves = Shuffler::from_seed(1).shuffle(&mut board, DEFAULT_SHUFFLE_MOVES);
        assert_eq!(moves.len(), DEFAULT_SHUFFLE_MOVES);

        let mut replay = Board::new(3).unwrap();
        assert!(replay.apply_moves(&moves));
        assert_eq!(replay, board);
        assert!(board.is_solvable());
    }

    #[test]
    fn undoing_the_shuffle_solves_the_board() {
        let mut board = Board::new(5).unwrap();
        let moves = Shuffler::from_seed(99).shuffle(&mut board, 300);
        let undo: Vec<Direction> = moves.iter().rev().map(Direction::reverse).collect();
        assert!(board.apply_moves(&undo));
        assert!(board.is_solved());
    }

    #[test]
    fn zero_moves_leaves_board_solved() {
        let board = Shuffler::from_seed(3).shuffled(3, 0).unwrap();
        assert!(board.is_solved());
    }
}
