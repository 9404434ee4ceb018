use crate::board::{ChessPiece, PieceKind, PlacedPiece, Position};
use crate::game::{ChessGame, Update};

/// A single executable state transition over a game snapshot.
///
/// `execute` returns `None` when a precondition fails (occupied destination,
/// missing piece, ...). That is an ordinary outcome during speculative move
/// generation, not a fault, so there is no error type here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Move the active player's piece from `from` to `to`, capturing
    /// whatever enemy piece stands on `to`.
    Move { from: Position, to: Position },
    /// Vacate a square (the en-passant victim's square).
    Remove { at: Position },
    /// Replace the active player's pawn at `at` with a promoted piece.
    Promote { at: Position, kind: PieceKind },
    /// Reposition king and rook in one step. Remove-both-then-add-both so
    /// that overlapping origins and destinations (Chess960) stay sound.
    Castle {
        king_from: Position,
        king_to: Position,
        rook_from: Position,
        rook_to: Position,
    },
    /// Run the first command and, only on success, the second against its
    /// result.
    Sequence(Box<Command>, Box<Command>),
    /// Swap which player is active.
    EndTurn,
    /// Store an `Update` holding the current snapshot and the carried
    /// command onto the produced game, so the next move can consult it.
    RecordLastUpdate(Box<Command>),
}

impl Command {
    pub fn then(self, next: Command) -> Command {
        Command::Sequence(Box::new(self), Box::new(next))
    }

    pub fn execute(&self, game: &ChessGame) -> Option<ChessGame> {
        let active = game.active_player().color();
        match self {
            Command::Move { from, to } => {
                game.board().piece_of(*from, active)?;
                if game.board().piece_of(*to, active).is_some() {
                    return None;
                }
                Some(game.with_board(game.board().with_piece_moved(*from, *to)))
            }
            Command::Remove { at } => {
                game.board().piece_at(*at)?;
                Some(game.with_board(game.board().with_piece_removed(*at)))
            }
            Command::Promote { at, kind } => {
                if matches!(kind, PieceKind::Pawn | PieceKind::King) {
                    return None;
                }
                let pawn = game.board().piece_of(*at, active)?;
                if pawn.kind != PieceKind::Pawn {
                    return None;
                }
                let promoted = PlacedPiece::new(*at, ChessPiece::new(*kind, active));
                Some(game.with_board(game.board().with_piece_added(promoted)))
            }
            Command::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                let king = game.board().piece_of(*king_from, active)?;
                let rook = game.board().piece_of(*rook_from, active)?;
                if king.kind != PieceKind::King || rook.kind != PieceKind::Rook {
                    return None;
                }
                let board = game
                    .board()
                    .with_piece_removed(*king_from)
                    .with_piece_removed(*rook_from)
                    .with_piece_added(PlacedPiece::new(*king_to, king))
                    .with_piece_added(PlacedPiece::new(*rook_to, rook));
                Some(game.with_board(board))
            }
            Command::Sequence(first, second) => {
                first.execute(game).and_then(|next| second.execute(&next))
            }
            Command::EndTurn => Some(game.with_turn_ended()),
            Command::RecordLastUpdate(command) => Some(game.with_last_update(Update {
                game: game.clone(),
                command: (**command).clone(),
            })),
        }
    }

    /// The square the moving piece starts on, if this command moves one.
    /// Lets the presentation layer describe and animate an `Update`.
    pub fn source(&self) -> Option<Position> {
        match self {
            Command::Move { from, .. } => Some(*from),
            Command::Castle { king_from, .. } => Some(*king_from),
            Command::Promote { at, .. } => Some(*at),
            Command::Sequence(first, second) => first.source().or_else(|| second.source()),
            Command::RecordLastUpdate(command) => command.source(),
            Command::Remove { .. } | Command::EndTurn => None,
        }
    }

    /// The square the moving piece ends on, if this command moves one.
    pub fn destination(&self) -> Option<Position> {
        match self {
            Command::Move { to, .. } => Some(*to),
            Command::Castle { king_to, .. } => Some(*king_to),
            Command::Promote { at, .. } => Some(*at),
            Command::Sequence(first, second) => {
                first.destination().or_else(|| second.destination())
            }
            Command::RecordLastUpdate(command) => command.destination(),
            Command::Remove { .. } | Command::EndTurn => None,
        }
    }
}
