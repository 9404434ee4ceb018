//! The engine's outer contract: create a game, classify its status, and
//! enumerate the legal moves from a square.

mod chess960;

pub use chess960::Chess960;

use log::{debug, trace};

use crate::board::{Board, ChessPiece, Color, PieceKind, PlacedPiece, Position};
use crate::command::Command;
use crate::game::{ChessGame, Status, Update};
use crate::move_gen;
use crate::threat;

pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub trait Rulebook {
    fn create_game(&mut self) -> ChessGame;

    fn status(&self, game: &ChessGame) -> Status {
        game_status(game)
    }

    fn updates(&self, game: &ChessGame, position: Position) -> Vec<Update> {
        legal_updates(game, position)
    }
}

/// Classic chess: the fixed RNBQKBNR back rank.
#[derive(Clone, Copy, Debug, Default)]
pub struct Standard;

impl Rulebook for Standard {
    fn create_game(&mut self) -> ChessGame {
        ChessGame::new(starting_board(STANDARD_BACK_RANK))
    }
}

/// Both armies from one back-rank layout: officers on each color's back
/// rank, pawns on each second rank, mirrored file-for-file.
pub(crate) fn starting_board(back_rank: [PieceKind; 8]) -> Board {
    let mut board = Board::empty();
    for color in [Color::White, Color::Black] {
        let pawn_row = color.pawn_start_row();
        for (col, &kind) in back_rank.iter().enumerate() {
            board = board
                .with_piece_added(PlacedPiece::new(
                    Position::new(color.back_row(), col as u8),
                    ChessPiece::new(kind, color),
                ))
                .with_piece_added(PlacedPiece::new(
                    Position::new(pawn_row, col as u8),
                    ChessPiece::new(PieceKind::Pawn, color),
                ));
        }
    }
    board
}

/// Legal moves for the active player's piece at `position`; empty if no
/// piece of the active color stands there.
///
/// Each candidate is wrapped as candidate -> end turn -> record, executed
/// speculatively, and kept only when it executes and does not leave the
/// mover's own king attacked. Candidate order is preserved.
pub fn legal_updates(game: &ChessGame, position: Position) -> Vec<Update> {
    let active = game.active_player().color();
    let Some(piece) = game.board().piece_of(position, active) else {
        return Vec::new();
    };

    let candidates = move_gen::candidate_commands(game, PlacedPiece::new(position, piece));
    trace!("{} candidates for {} at {}", candidates.len(), piece.kind, position);

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let wrapped = candidate.clone().then(
                Command::EndTurn.then(Command::RecordLastUpdate(Box::new(candidate.clone()))),
            );
            let next = wrapped.execute(game)?;
            // The mover is the passive player after the turn swap.
            if threat::is_in_check(&next, next.passive_player()) {
                return None;
            }
            Some(Update {
                game: next,
                command: candidate,
            })
        })
        .collect()
}

/// Status of the active player: no legal move anywhere means the game is
/// over, and the king's attack state picks between the two ends.
pub fn game_status(game: &ChessGame) -> Status {
    let attacked = threat::is_in_check(game, game.active_player());
    let any_legal_move = game
        .board()
        .pieces_of(game.active_player().color())
        .any(|placed| !legal_updates(game, placed.position).is_empty());

    let status = match (any_legal_move, attacked) {
        (true, true) => Status::Check,
        (true, false) => Status::InProgress,
        (false, true) => Status::Checkmate,
        (false, false) => Status::Stalemate,
    };
    if matches!(status, Status::Checkmate | Status::Stalemate) {
        debug!("game over: {} for {}", status, game.active_player().color());
    }
    status
}
