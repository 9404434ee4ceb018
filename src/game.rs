use std::fmt;
use std::iter;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::board::{Board, Color};
use crate::command::Command;

/// Stateless player identity; two players are the same player iff they play
/// the same color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Player {
    color: Color,
}

impl Player {
    pub fn new(color: Color) -> Player {
        Player { color }
    }

    pub fn color(self) -> Color {
        self.color
    }
}

/// Game status for the player to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Deserialize, Serialize)]
pub enum Status {
    InProgress,
    Check,
    Checkmate,
    Stalemate,
}

/// The unit handed to consumers: the snapshot a command produced together
/// with the command that produced it. Also the game's recorded history
/// token; en-passant eligibility reads the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub game: ChessGame,
    pub command: Command,
}

/// An immutable game snapshot. Commands produce new snapshots; nothing is
/// ever mutated in place, so shared read-only access is always safe.
#[derive(Clone, Eq)]
pub struct ChessGame {
    board: Board,
    active: Color,
    last_update: Option<Arc<Update>>,
}

impl ChessGame {
    pub fn new(board: Board) -> ChessGame {
        ChessGame {
            board,
            active: Color::White,
            last_update: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        Player::new(self.active)
    }

    pub fn passive_player(&self) -> Player {
        Player::new(self.active.opposite())
    }

    pub fn with_board(&self, board: Board) -> ChessGame {
        ChessGame {
            board,
            active: self.active,
            last_update: self.last_update.clone(),
        }
    }

    pub fn with_turn_ended(&self) -> ChessGame {
        ChessGame {
            board: self.board.clone(),
            active: self.active.opposite(),
            last_update: self.last_update.clone(),
        }
    }

    pub fn with_last_update(&self, update: Update) -> ChessGame {
        ChessGame {
            board: self.board.clone(),
            active: self.active,
            last_update: Some(Arc::new(update)),
        }
    }

    pub fn last_update(&self) -> Option<&Update> {
        self.last_update.as_deref()
    }

    /// Recorded updates, newest first.
    pub fn history(&self) -> impl Iterator<Item = &Update> {
        iter::successors(self.last_update.as_deref(), |update| {
            update.game.last_update.as_deref()
        })
    }
}

// Manually implement PartialEq for ChessGame because we want to ignore the
// recorded history: two snapshots with equal boards and the same side to
// move are the same position.
impl PartialEq for ChessGame {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.active == other.active
    }
}

impl fmt::Display for ChessGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.active)
    }
}

impl fmt::Debug for ChessGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
