//! Constants for board geometry, piece movement tables, and search parameters.
//!
//! Move tables are expressed as `(row_delta, col_delta)` pairs. Row 0 is the
//! top of the board (Black's back rank), so White pawns move towards
//! decreasing row indices.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Always 8 for chess.
pub const N: usize = 8;

// =============================================================================
// Movement Tables
// =============================================================================

/// Knight jumps, clockwise starting from two up and one right.
pub const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];

/// King steps, row-major around the king.
pub const KING_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Diagonal rays (bishop, first half of the queen).
pub const BISHOP_RAYS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal rays (rook, second half of the queen).
pub const ROOK_RAYS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Pawn capture columns, checked left then right.
pub const PAWN_CAPTURE_COLS: [isize; 2] = [-1, 1];

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of search iterations per move.
pub const N_SIMS: usize = 1000;

/// Default UCB1 exploration weight.
pub const EXPLORATION_WEIGHT: f64 = 1.0;

/// Progress report period (number of iterations between debug logs).
pub const REPORT_PERIOD: usize = 200;

// =============================================================================
// Cell Labels
// =============================================================================

/// Empty square.
pub const EMPTY: &str = ".";

/// Square hidden from a player view.
pub const MASKED: &str = "O";
