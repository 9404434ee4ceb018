use crate::board::{PieceKind, PlacedPiece, Position};
use crate::command::Command;
use crate::game::{ChessGame, Update};

/// The en-passant capture for this pawn, if the game's last recorded update
/// was an enemy pawn double-step landing right next to it. The window is one
/// move wide: any other recorded update ends eligibility.
pub fn en_passant_commands(game: &ChessGame, pawn: PlacedPiece) -> Option<Command> {
    let landing = double_step_landing(game.last_update()?)?;

    if landing.row() != pawn.position.row() {
        return None;
    }
    if landing.col().abs_diff(pawn.position.col()) != 1 {
        return None;
    }

    let victim = game.board().piece_at(landing)?;
    if victim.color == pawn.piece.color || victim.kind != PieceKind::Pawn {
        return None;
    }

    let col_delta = landing.col() as i8 - pawn.position.col() as i8;
    let capture_square = pawn
        .position
        .offset(pawn.piece.color.pawn_direction(), col_delta)?;

    Some(
        Command::Move {
            from: pawn.position,
            to: capture_square,
        }
        .then(Command::Remove { at: landing }),
    )
}

/// Where the last move's pawn landed, if that move was a two-square advance.
fn double_step_landing(update: &Update) -> Option<Position> {
    let Command::Move { from, to } = &update.command else {
        return None;
    };
    if from.col() != to.col() || from.row().abs_diff(to.row()) != 2 {
        return None;
    }
    let mover = update.game.board().piece_at(*to)?;
    if mover.kind != PieceKind::Pawn {
        return None;
    }
    Some(*to)
}
