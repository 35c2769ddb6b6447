//! Game state: board plus side to move.
//!
//! States are values. [`GameState::make_move`] returns a new state and never
//! touches the receiver, so states can be shared freely between search tree
//! nodes and rollout workers.

use std::fmt;

use thiserror::Error;

use crate::board::{Board, Cell, Piece, PieceKind, Side};
use crate::movegen::{Move, pawn_moves, piece_moves};

/// Reasons a move cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("illegal move {0}: coordinates out of range")]
    OutOfBounds(Move),
    #[error("illegal move {0}: no piece on source square")]
    EmptySource(Move),
}

/// A chess position: the board and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub current_player: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// An empty board with White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::White)
    }

    pub fn from_board(board: Board, current_player: Side) -> Self {
        Self {
            board,
            current_player,
        }
    }

    /// All moves for the pieces of `side`, in row-major board order.
    ///
    /// Non-pawn exclusion of friendly squares is tested against
    /// `current_player`; see [`crate::movegen`].
    pub fn get_legal_moves(&self, side: Side) -> Vec<Move> {
        self.board
            .pieces()
            .filter(|&(_, _, p)| p.side == side)
            .flat_map(|(r, c, p)| piece_moves(&self.board, r, c, p, self.current_player))
            .collect()
    }

    /// Moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.get_legal_moves(self.current_player)
    }

    /// Apply a move, returning the resulting state.
    ///
    /// # Errors
    /// - [`MoveError::OutOfBounds`] if any coordinate is off the board
    /// - [`MoveError::EmptySource`] if the source square holds no piece
    pub fn make_move(&self, mv: Move) -> Result<GameState, MoveError> {
        let src = self
            .board
            .get(mv.src_row, mv.src_col)
            .ok_or(MoveError::OutOfBounds(mv))?;
        if self.board.get(mv.dst_row, mv.dst_col).is_none() {
            return Err(MoveError::OutOfBounds(mv));
        }
        if src.piece().is_none() {
            return Err(MoveError::EmptySource(mv));
        }
        Ok(self.apply(mv))
    }

    /// Apply a move produced by move generation without validating it.
    pub(crate) fn apply(&self, mv: Move) -> GameState {
        let mut board = self.board;
        let moving = board.get(mv.src_row, mv.src_col).unwrap_or_default();
        board.set(mv.dst_row, mv.dst_col, moving);
        board.set(mv.src_row, mv.src_col, Cell::Empty);
        GameState {
            board,
            current_player: self.current_player.opponent(),
        }
    }

    pub fn has_king(&self, side: Side) -> bool {
        self.board.contains(Piece::new(side, PieceKind::King))
    }

    pub fn king_square(&self, side: Side) -> Option<(usize, usize)> {
        self.board.find(Piece::new(side, PieceKind::King))
    }

    /// The game ends as soon as either king has been captured.
    pub fn is_game_over(&self) -> bool {
        !self.has_king(Side::White) || !self.has_king(Side::Black)
    }

    /// Result from `side`'s point of view: -1 if its king is gone, +1 if the
    /// opponent's king is gone, 0 otherwise.
    pub fn evaluate(&self, side: Side) -> f64 {
        if !self.has_king(side) {
            -1.0
        } else if !self.has_king(side.opponent()) {
            1.0
        } else {
            0.0
        }
    }

    /// True if a piece of the side to move attacks the opponent's king.
    ///
    /// Only the first piece found of each kind (knight, pawn, bishop, rook,
    /// queen) is tested, and the king itself is never considered. The pawn is
    /// generated with the opponent's direction and capture rule, so it can
    /// only ever capture its own side and never gives check. The result is
    /// informational and does not restrict move generation.
    pub fn is_king_in_check(&self) -> bool {
        let me = self.current_player;
        let Some(target) = self.king_square(me.opponent()) else {
            return false;
        };
        const ATTACKERS: [PieceKind; 5] = [
            PieceKind::Knight,
            PieceKind::Pawn,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ];
        ATTACKERS.iter().any(|&kind| {
            let piece = Piece::new(me, kind);
            let Some((r, c)) = self.board.find(piece) else {
                return false;
            };
            let moves = if kind == PieceKind::Pawn {
                let mut moves = Vec::new();
                pawn_moves(&self.board, r, c, me.opponent(), &mut moves);
                moves
            } else {
                piece_moves(&self.board, r, c, piece, me)
            };
            moves.iter().any(|m| (m.dst_row, m.dst_col) == target)
        })
    }

    /// True if the opponent is not in check, still has a king, and has no moves.
    pub fn is_stalemate(&self) -> bool {
        if self.is_king_in_check() {
            return false;
        }
        let opponent = self.current_player.opponent();
        self.has_king(opponent) && self.get_legal_moves(opponent).is_empty()
    }

    pub fn piece_count(&self) -> usize {
        self.board.piece_count()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rows: &[&str], to_move: Side) -> GameState {
        let board: Board = rows.join("\n").parse().unwrap();
        GameState::from_board(board, to_move)
    }

    const KINGS_ONLY: [&str; 8] = [
        ". . . . BK . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . . . . .",
        ". . . . WK . . .",
    ];

    #[test]
    fn test_empty_state() {
        let s = GameState::new();
        assert_eq!(s.current_player, Side::White);
        assert!(s.is_game_over());
        assert!(s.legal_moves().is_empty());
    }

    #[test]
    fn test_make_move_flips_player_and_keeps_receiver() {
        let s = state(&KINGS_ONLY, Side::White);
        let before = s.board;
        let next = s.make_move(Move::new(7, 4, 6, 4)).unwrap();
        assert_eq!(s.board, before);
        assert_eq!(next.current_player, Side::Black);
        assert_eq!(next.board.get(7, 4), Some(Cell::Empty));
        assert_eq!(
            next.board.get(6, 4),
            Some(Cell::Piece(Piece::new(Side::White, PieceKind::King)))
        );
    }

    #[test]
    fn test_make_move_rejects_bad_moves() {
        let s = state(&KINGS_ONLY, Side::White);
        assert_eq!(
            s.make_move(Move::new(8, 0, 0, 0)),
            Err(MoveError::OutOfBounds(Move::new(8, 0, 0, 0)))
        );
        assert_eq!(
            s.make_move(Move::new(7, 4, 7, 9)),
            Err(MoveError::OutOfBounds(Move::new(7, 4, 7, 9)))
        );
        assert_eq!(
            s.make_move(Move::new(3, 3, 2, 3)),
            Err(MoveError::EmptySource(Move::new(3, 3, 2, 3)))
        );
    }

    #[test]
    fn test_capture_removes_piece() {
        let mut rows = KINGS_ONLY;
        rows[1] = ". . . . WQ . . .";
        let s = state(&rows, Side::White);
        let next = s.make_move(Move::new(1, 4, 0, 4)).unwrap();
        assert_eq!(next.piece_count(), s.piece_count() - 1);
        assert!(next.is_game_over());
        assert_eq!(next.evaluate(Side::White), 1.0);
        assert_eq!(next.evaluate(Side::Black), -1.0);
    }

    #[test]
    fn test_evaluate_ongoing_is_zero() {
        let s = state(&KINGS_ONLY, Side::White);
        assert!(!s.is_game_over());
        assert_eq!(s.evaluate(Side::White), 0.0);
        assert_eq!(s.evaluate(Side::Black), 0.0);
    }

    #[test]
    fn test_get_legal_moves_for_side_not_on_move() {
        let s = state(&KINGS_ONLY, Side::White);
        let black = s.get_legal_moves(Side::Black);
        assert_eq!(black.len(), 5);
        assert!(black.iter().all(|m| (m.src_row, m.src_col) == (0, 4)));
    }

    #[test]
    fn test_king_in_check_by_rook() {
        let mut rows = KINGS_ONLY;
        rows[4] = ". . . . WR . . .";
        assert!(state(&rows, Side::White).is_king_in_check());
        // Black to move: White's rook is not considered.
        assert!(!state(&rows, Side::Black).is_king_in_check());
    }

    #[test]
    fn test_pawn_never_gives_check() {
        let mut rows = KINGS_ONLY;
        rows[1] = ". . . WP . . . .";
        let s = state(&rows, Side::White);
        // The pawn really can take the king in play.
        assert!(s.legal_moves().contains(&Move::new(1, 3, 0, 4)));
        assert!(!s.is_king_in_check());

        let mut rows = KINGS_ONLY;
        rows[6] = ". . . . . BP . .";
        let s = state(&rows, Side::Black);
        assert!(s.legal_moves().contains(&Move::new(6, 5, 7, 4)));
        assert!(!s.is_king_in_check());
    }

    #[test]
    fn test_check_only_uses_first_piece_of_each_kind() {
        let mut rows = KINGS_ONLY;
        // The first rook (row 3) is blocked by its own pawn; the second rook
        // on row 5 would give check but is never examined.
        rows[2] = ". . . . WP . . .";
        rows[3] = ". . . . WR . . .";
        rows[5] = "WR . . . . . . .";
        rows[0] = "BK . . . . . . .";
        let s = state(&rows, Side::White);
        assert!(!s.is_king_in_check());
    }

    #[test]
    fn test_stalemate() {
        // Black king hemmed in by White knights that do not attack it.
        let rows = [
            "BK WN . . . . . .",
            "WN WN . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . WK .",
        ];
        let s = state(&rows, Side::White);
        assert!(!s.is_king_in_check());
        assert!(s.is_stalemate());

        assert!(!state(&KINGS_ONLY, Side::White).is_stalemate());

        let mut rows = KINGS_ONLY;
        rows[0] = ". . . . . . . .";
        assert!(!state(&rows, Side::White).is_stalemate());
    }

    #[test]
    fn test_display_matches_board() {
        let s = state(&KINGS_ONLY, Side::White);
        assert_eq!(s.to_string(), KINGS_ONLY.join("\n"));
    }
}
