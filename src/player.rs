//! Kriegspiel player views.
//!
//! A player only sees their own pieces. Every square holding an opponent
//! piece is replaced with the masked cell `O`; empty squares stay visible.

use std::fmt;

use fastrand::Rng;

use crate::board::{Board, Cell, Piece, Side};

/// Mask every opponent piece of `side` on `board`.
pub fn mask(board: &Board, side: Side) -> Board {
    let mut view = *board;
    for (r, c, cell) in board.squares() {
        if cell.is_side(side.opponent()) {
            view.set(r, c, Cell::Masked);
        }
    }
    view
}

/// One side's masked view of a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub side: Side,
    pub board: Board,
}

impl PlayerView {
    pub fn new(board: &Board, side: Side) -> Self {
        Self {
            side,
            board: mask(board, side),
        }
    }

    /// Squares that are not masked, in row-major order.
    pub fn visible_squares(&self) -> Vec<(usize, usize)> {
        self.board
            .squares()
            .filter(|&(_, _, cell)| cell != Cell::Masked)
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// The player's own pieces with their squares.
    pub fn own_pieces(&self) -> Vec<(usize, usize, Piece)> {
        self.board
            .pieces()
            .filter(|&(_, _, p)| p.side == self.side)
            .collect()
    }

    /// Pick one of the player's pieces uniformly at random.
    pub fn choose_piece(&self, rng: &mut Rng) -> Option<(usize, usize, Piece)> {
        let pieces = self.own_pieces();
        if pieces.is_empty() {
            return None;
        }
        Some(pieces[rng.usize(..pieces.len())])
    }
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
