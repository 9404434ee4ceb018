use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

mod ascii;

pub use ascii::DiagramError;

/// A square on the 8x8 grid. Row 0 is White's back rank, row 7 is Black's.
/// Ordering is row-major so board iteration is deterministic.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Position {
        if row > 7 || col > 7 {
            panic!("position out of bounds: ({}, {})", row, col);
        }
        Position { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Steps by the given deltas, or `None` if that walks off the board.
    pub fn offset(self, row_delta: i8, col_delta: i8) -> Option<Position> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        write!(f, "{}{}", file, self.row + 1)
    }
}

#[derive(
    Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize,
)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row delta a pawn of this color advances by.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank this color's pawns start on.
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank this color's pawns promote on.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank this color's officers start on.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

#[derive(
    Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, Deserialize, Serialize,
)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl From<PieceKind> for char {
    fn from(kind: PieceKind) -> char {
        match kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = DiagramError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'p' => Ok(PieceKind::Pawn),
            'n' => Ok(PieceKind::Knight),
            'b' => Ok(PieceKind::Bishop),
            'r' => Ok(PieceKind::Rook),
            'q' => Ok(PieceKind::Queen),
            'k' => Ok(PieceKind::King),
            _ => Err(DiagramError::UnknownPiece(value)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ChessPiece {
    pub kind: PieceKind,
    pub color: Color,
}

impl ChessPiece {
    pub fn new(kind: PieceKind, color: Color) -> ChessPiece {
        ChessPiece { kind, color }
    }
}

/// A piece together with the square it stands on. Transient: used when
/// assembling boards and as movement-generation input, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedPiece {
    pub position: Position,
    pub piece: ChessPiece,
}

impl PlacedPiece {
    pub fn new(position: Position, piece: ChessPiece) -> PlacedPiece {
        PlacedPiece { position, piece }
    }
}

/// Immutable occupancy map. Every transition returns a new `Board`;
/// previously handed-out snapshots are never touched.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Board {
    squares: BTreeMap<Position, ChessPiece>,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: BTreeMap::new(),
        }
    }

    pub fn piece_at(&self, position: Position) -> Option<ChessPiece> {
        self.squares.get(&position).copied()
    }

    /// Like [`piece_at`](Board::piece_at), restricted to one color.
    pub fn piece_of(&self, position: Position, color: Color) -> Option<ChessPiece> {
        self.piece_at(position).filter(|piece| piece.color == color)
    }

    pub fn with_piece_added(&self, placed: PlacedPiece) -> Board {
        let mut squares = self.squares.clone();
        squares.insert(placed.position, placed.piece);
        Board { squares }
    }

    pub fn with_piece_removed(&self, position: Position) -> Board {
        let mut squares = self.squares.clone();
        squares.remove(&position);
        Board { squares }
    }

    /// Moves whatever stands on `from` onto `to`, replacing any capture.
    /// A vacant `from` leaves the board unchanged; callers check occupancy.
    pub fn with_piece_moved(&self, from: Position, to: Position) -> Board {
        let mut squares = self.squares.clone();
        if let Some(piece) = squares.remove(&from) {
            squares.insert(to, piece);
        }
        Board { squares }
    }

    /// All occupied squares in row-major order.
    pub fn placed_pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.squares
            .iter()
            .map(|(&position, &piece)| PlacedPiece { position, piece })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.placed_pieces()
            .filter(move |placed| placed.piece.color == color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|placed| placed.piece.kind == PieceKind::King)
            .map(|placed| placed.position)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(64 + 7);
        for row in (0..8).rev() {
            for col in 0..8 {
                let ch = match self.piece_at(Position::new(row, col)) {
                    Some(piece) if piece.color == Color::White => {
                        char::from(piece.kind).to_ascii_uppercase()
                    }
                    Some(piece) => char::from(piece.kind),
                    None => '.',
                };
                board_str.push(ch);
            }
            if row != 0 {
                board_str.push('\n');
            }
        }
        write!(f, "{}", board_str)
    }
}
