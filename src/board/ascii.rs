//! Text diagrams for boards: eight rows of `pnbrqk`/`PNBRQK`/`.` characters,
//! Black's back rank first, matching the `Display` output. Used by tests to
//! spell out fixture positions.

use crate::board::{Board, ChessPiece, Color, PieceKind, PlacedPiece, Position};

#[derive(thiserror::Error, Debug)]
pub enum DiagramError {
    #[error("char -> piece: got {0}")]
    UnknownPiece(char),

    #[error("rows: want 8 got {0}")]
    RowCount(usize),

    #[error("row {0}: want 8 squares got {1}")]
    RowWidth(usize, usize),
}

impl Board {
    pub fn from_ascii(diagram: &str) -> Result<Board, DiagramError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != 8 {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (line_idx, line) in rows.iter().enumerate() {
            if line.chars().count() != 8 {
                return Err(DiagramError::RowWidth(line_idx, line.chars().count()));
            }
            let row = 7 - line_idx as u8;
            for (col, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::try_from(ch.to_ascii_lowercase())?;
                let color = if ch.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                board = board.with_piece_added(PlacedPiece::new(
                    Position::new(row, col as u8),
                    ChessPiece::new(kind, color),
                ));
            }
        }
        Ok(board)
    }
}
