//! 8x8 board representation with text parsing and rendering.
//!
//! Each square holds a [`Cell`]: empty (`.`), masked (`O`, only in player
//! views), or a piece written as `{side}{kind}` such as `WK` or `BA`.
//! Rows are stored top to bottom, row 0 being Black's back rank.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{EMPTY, MASKED, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn label(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }

    pub fn from_label(c: char) -> Option<Side> {
        match c {
            'W' => Some(Side::White),
            'B' => Some(Side::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Side::White),
            "b" | "black" => Ok(Side::Black),
            _ => Err(format!("unknown side '{s}', expected W or B")),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Board label of the piece kind. Bishops are written as `A`.
    pub fn label(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'A',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_label(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'A' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.label(), self.kind.label())
    }
}

/// Contents of a single square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Opponent square hidden from a player view.
    Masked,
    Piece(Piece),
}

impl Cell {
    /// Parse a board token (`.`, `O`, or a two-character piece code).
    pub fn from_token(token: &str) -> Option<Cell> {
        match token {
            EMPTY => return Some(Cell::Empty),
            MASKED => return Some(Cell::Masked),
            _ => {}
        }
        let mut chars = token.chars();
        let side = Side::from_label(chars.next()?)?;
        let kind = PieceKind::from_label(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Cell::Piece(Piece::new(side, kind)))
    }

    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Piece(p) => Some(p),
            _ => None,
        }
    }

    /// True if the square holds a piece of `side`.
    pub fn is_side(self, side: Side) -> bool {
        matches!(self, Cell::Piece(p) if p.side == side)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str(EMPTY),
            Cell::Masked => f.write_str(MASKED),
            Cell::Piece(p) => write!(f, "{p}"),
        }
    }
}

/// Errors raised while building a board from text.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("failed to read board file: {0}")]
    Io(#[from] std::io::Error),
    #[error("board must have 8 rows, found {found}")]
    RowCount { found: usize },
    #[error("row {row} must have 8 columns, found {found}")]
    ColumnCount { row: usize, found: usize },
    #[error("unrecognized token '{token}' at row {row}, column {col}")]
    UnknownToken {
        row: usize,
        col: usize,
        token: String,
    },
}

/// An 8x8 grid of cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a row-major token grid.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[T]>,
        T: AsRef<str>,
    {
        if rows.len() != N {
            return Err(BoardError::RowCount { found: rows.len() });
        }
        let mut board = Board::new();
        for (row, tokens) in rows.iter().enumerate() {
            let tokens = tokens.as_ref();
            if tokens.len() != N {
                return Err(BoardError::ColumnCount {
                    row,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.iter().enumerate() {
                let token = token.as_ref();
                board.cells[row][col] =
                    Cell::from_token(token).ok_or_else(|| BoardError::UnknownToken {
                        row,
                        col,
                        token: token.to_string(),
                    })?;
            }
        }
        Ok(board)
    }

    /// Load a board from a text file of 8 lines with 8 tokens each.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        fs::read_to_string(path)?.parse()
    }

    /// Get the cell at `(row, col)`, or `None` when off the board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= N || col >= N {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Get the cell at `(row + dr, col + dc)`, or `None` when off the board.
    #[inline]
    pub fn offset(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
    ) -> Option<(usize, usize, Cell)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.get(r, c).map(|cell| (r, c, cell))
    }

    /// Overwrite a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < N && col < N {
            self.cells[row][col] = cell;
        }
    }

    /// Iterate over every square in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &cell)| (r, c, cell)))
    }

    /// Iterate over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.squares()
            .filter_map(|(r, c, cell)| cell.piece().map(|p| (r, c, p)))
    }

    /// Find the first square (row-major) holding `piece`.
    pub fn find(&self, piece: Piece) -> Option<(usize, usize)> {
        self.pieces()
            .find(|&(_, _, p)| p == piece)
            .map(|(r, c, _)| (r, c))
    }

    pub fn contains(&self, piece: Piece) -> bool {
        self.find(piece).is_some()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse 8 lines of 8 whitespace-separated tokens.
    ///
    /// Trailing blank lines are ignored. A blank line anywhere else counts
    /// as a row with no tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<&str>> = s
            .lines()
            .map(|line| line.split_whitespace().collect())
            .collect();
        while rows.last().is_some_and(|tokens| tokens.is_empty()) {
            rows.pop();
        }
        Board::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
