//! Per-piece move generation.
//!
//! Moves are generated for a single piece at a time and are pseudo-legal:
//! a move may leave the mover's own king capturable, and there is no
//! castling, en-passant, double step or promotion.
//!
//! Knights, kings and sliders exclude destinations holding a piece of
//! `to_move` (the side whose turn it is), not of the moving piece itself.
//! The two only differ when generating for the side that is not on move,
//! which is what the check detector in [`crate::position`] does.

use std::fmt;

use crate::board::{Board, Cell, Piece, PieceKind, Side};
use crate::constants::{BISHOP_RAYS, KING_DELTAS, KNIGHT_DELTAS, PAWN_CAPTURE_COLS, ROOK_RAYS};

/// A relocation from `(src_row, src_col)` to `(dst_row, dst_col)`.
///
/// Captures are implied by the destination being occupied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub src_row: usize,
    pub src_col: usize,
    pub dst_row: usize,
    pub dst_col: usize,
}

impl Move {
    pub const fn new(src_row: usize, src_col: usize, dst_row: usize, dst_col: usize) -> Self {
        Self {
            src_row,
            src_col,
            dst_row,
            dst_col,
        }
    }
}

impl From<(usize, usize, usize, usize)> for Move {
    fn from((sr, sc, dr, dc): (usize, usize, usize, usize)) -> Self {
        Move::new(sr, sc, dr, dc)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.src_row, self.src_col, self.dst_row, self.dst_col
        )
    }
}

/// Generate the moves of `piece` standing on `(row, col)`.
pub fn piece_moves(
    board: &Board,
    row: usize,
    col: usize,
    piece: Piece,
    to_move: Side,
) -> Vec<Move> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, row, col, piece.side, &mut moves),
        PieceKind::Knight => step_moves(board, row, col, &KNIGHT_DELTAS, to_move, &mut moves),
        PieceKind::Bishop => slide_moves(board, row, col, &BISHOP_RAYS, to_move, &mut moves),
        PieceKind::Rook => slide_moves(board, row, col, &ROOK_RAYS, to_move, &mut moves),
        PieceKind::Queen => {
            slide_moves(board, row, col, &BISHOP_RAYS, to_move, &mut moves);
            slide_moves(board, row, col, &ROOK_RAYS, to_move, &mut moves);
        }
        PieceKind::King => step_moves(board, row, col, &KING_DELTAS, to_move, &mut moves),
    }
    moves
}

/// Row direction a pawn of `side` advances in.
#[inline]
pub fn pawn_direction(side: Side) -> isize {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

/// One step forward onto an empty square, then diagonal captures (left, right).
pub fn pawn_moves(board: &Board, row: usize, col: usize, side: Side, moves: &mut Vec<Move>) {
    let dr = pawn_direction(side);
    if let Some((r, c, Cell::Empty)) = board.offset(row, col, dr, 0) {
        moves.push(Move::new(row, col, r, c));
    }
    for dc in PAWN_CAPTURE_COLS {
        if let Some((r, c, cell)) = board.offset(row, col, dr, dc) {
            if cell.is_side(side.opponent()) {
                moves.push(Move::new(row, col, r, c));
            }
        }
    }
}

/// Single-step jumps (knight, king) onto any square not held by `to_move`.
pub fn step_moves(
    board: &Board,
    row: usize,
    col: usize,
    deltas: &[(isize, isize)],
    to_move: Side,
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in deltas {
        if let Some((r, c, cell)) = board.offset(row, col, dr, dc) {
            if !cell.is_side(to_move) {
                moves.push(Move::new(row, col, r, c));
            }
        }
    }
}

/// Sliding moves along each ray until the edge or the first occupied square.
///
/// The first occupied square is included unless it holds a piece of `to_move`.
pub fn slide_moves(
    board: &Board,
    row: usize,
    col: usize,
    rays: &[(isize, isize)],
    to_move: Side,
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in rays {
        let (mut r, mut c) = (row, col);
        while let Some((nr, nc, cell)) = board.offset(r, c, dr, dc) {
            match cell {
                Cell::Empty => moves.push(Move::new(row, col, nr, nc)),
                _ if cell.is_side(to_move) => break,
                _ => {
                    moves.push(Move::new(row, col, nr, nc));
                    break;
                }
            }
            r = nr;
            c = nc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, row: usize, col: usize, token: &str) {
        board.set(row, col, Cell::from_token(token).unwrap());
    }

    fn piece(token: &str) -> Piece {
        Cell::from_token(token).unwrap().piece().unwrap()
    }

    #[test]
    fn test_white_pawn_push_and_capture() {
        let mut board = Board::new();
        place(&mut board, 6, 3, "WP");
        place(&mut board, 5, 2, "BN");
        let moves = piece_moves(&board, 6, 3, piece("WP"), Side::White);
        assert_eq!(moves, vec![Move::new(6, 3, 5, 3), Move::new(6, 3, 5, 2)]);
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let mut board = Board::new();
        place(&mut board, 1, 0, "BP");
        place(&mut board, 2, 1, "WP");
        let moves = piece_moves(&board, 1, 0, piece("BP"), Side::Black);
        assert_eq!(moves, vec![Move::new(1, 0, 2, 0), Move::new(1, 0, 2, 1)]);
    }

    #[test]
    fn test_pawn_blocked_and_no_friendly_capture() {
        let mut board = Board::new();
        place(&mut board, 6, 3, "WP");
        place(&mut board, 5, 3, "BP");
        place(&mut board, 5, 4, "WN");
        let moves = piece_moves(&board, 6, 3, piece("WP"), Side::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        let mut board = Board::new();
        place(&mut board, 0, 4, "WP");
        assert!(piece_moves(&board, 0, 4, piece("WP"), Side::White).is_empty());
    }

    #[test]
    fn test_knight_in_corner() {
        let mut board = Board::new();
        place(&mut board, 7, 0, "WN");
        let moves = piece_moves(&board, 7, 0, piece("WN"), Side::White);
        assert_eq!(moves, vec![Move::new(7, 0, 5, 1), Move::new(7, 0, 6, 2)]);
    }

    #[test]
    fn test_knight_uses_side_to_move_for_exclusion() {
        let mut board = Board::new();
        place(&mut board, 7, 0, "WN");
        place(&mut board, 5, 1, "WP");
        place(&mut board, 6, 2, "BP");

        // On White's turn the friendly pawn blocks the jump.
        let moves = piece_moves(&board, 7, 0, piece("WN"), Side::White);
        assert_eq!(moves, vec![Move::new(7, 0, 6, 2)]);

        // On Black's turn the same knight may land on its own pawn but not the black one.
        let moves = piece_moves(&board, 7, 0, piece("WN"), Side::Black);
        assert_eq!(moves, vec![Move::new(7, 0, 5, 1)]);
    }

    #[test]
    fn test_rook_stops_at_first_piece() {
        let mut board = Board::new();
        place(&mut board, 4, 4, "WR");
        place(&mut board, 2, 4, "BP");
        place(&mut board, 4, 6, "WP");
        let moves = piece_moves(&board, 4, 4, piece("WR"), Side::White);
        assert_eq!(
            moves,
            vec![
                // up: empty, then capture
                Move::new(4, 4, 3, 4),
                Move::new(4, 4, 2, 4),
                // down
                Move::new(4, 4, 5, 4),
                Move::new(4, 4, 6, 4),
                Move::new(4, 4, 7, 4),
                // left
                Move::new(4, 4, 4, 3),
                Move::new(4, 4, 4, 2),
                Move::new(4, 4, 4, 1),
                Move::new(4, 4, 4, 0),
                // right: blocked by own pawn on (4, 6)
                Move::new(4, 4, 4, 5),
            ]
        );
    }

    #[test]
    fn test_bishop_ray_order() {
        let mut board = Board::new();
        place(&mut board, 7, 2, "WA");
        place(&mut board, 5, 4, "BQ");
        let moves = piece_moves(&board, 7, 2, piece("WA"), Side::White);
        assert_eq!(
            moves,
            vec![
                Move::new(7, 2, 6, 1),
                Move::new(7, 2, 5, 0),
                Move::new(7, 2, 6, 3),
                Move::new(7, 2, 5, 4),
            ]
        );
    }

    #[test]
    fn test_queen_is_bishop_then_rook() {
        let mut board = Board::new();
        place(&mut board, 3, 3, "BQ");
        let queen = piece_moves(&board, 3, 3, piece("BQ"), Side::Black);

        let mut expected = Vec::new();
        slide_moves(&board, 3, 3, &BISHOP_RAYS, Side::Black, &mut expected);
        slide_moves(&board, 3, 3, &ROOK_RAYS, Side::Black, &mut expected);
        assert_eq!(queen, expected);
        assert_eq!(queen.len(), 27);
    }

    #[test]
    fn test_king_in_center_and_edge() {
        let mut board = Board::new();
        place(&mut board, 4, 4, "WK");
        assert_eq!(piece_moves(&board, 4, 4, piece("WK"), Side::White).len(), 8);

        let mut board = Board::new();
        place(&mut board, 0, 4, "BK");
        place(&mut board, 1, 4, "BP");
        let moves = piece_moves(&board, 0, 4, piece("BK"), Side::Black);
        assert_eq!(
            moves,
            vec![
                Move::new(0, 4, 0, 3),
                Move::new(0, 4, 0, 5),
                Move::new(0, 4, 1, 3),
                Move::new(0, 4, 1, 5),
            ]
        );
    }

    #[test]
    fn test_masked_squares_are_capturable() {
        let mut board = Board::new();
        place(&mut board, 4, 4, "WK");
        place(&mut board, 3, 4, "O");
        let moves = piece_moves(&board, 4, 4, piece("WK"), Side::White);
        assert!(moves.contains(&Move::new(4, 4, 3, 4)));
    }
}
