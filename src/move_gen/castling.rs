use crate::board::{PieceKind, PlacedPiece, Position};
use crate::command::Command;
use crate::game::ChessGame;
use crate::threat::is_attacked;

/// Zero, one, or two castle commands for this king.
///
/// King and rook are identified by role, not by file, so Chess960 back ranks
/// work unchanged: king-side means the rook's file is greater than the
/// king's, and the destinations are always files 6/5 (king side) and 2/3
/// (queen side).
pub fn castling_commands(game: &ChessGame, king: PlacedPiece) -> Vec<Command> {
    let color = king.piece.color;
    let back_row = color.back_row();

    if king.position.row() != back_row || square_touched(game, king.position) {
        return Vec::new();
    }

    game.board()
        .pieces_of(color)
        .filter(|placed| {
            placed.piece.kind == PieceKind::Rook
                && placed.position.row() == back_row
                && !square_touched(game, placed.position)
        })
        .filter_map(|rook| castle_command(game, king.position, rook.position))
        .collect()
}

fn castle_command(game: &ChessGame, king_from: Position, rook_from: Position) -> Option<Command> {
    let board = game.board();
    let king_color = board.piece_at(king_from)?.color;
    let back_row = king_from.row();

    let king_side = rook_from.col() > king_from.col();
    let (king_to_col, rook_to_col) = if king_side { (6, 5) } else { (2, 3) };
    let king_to = Position::new(back_row, king_to_col);
    let rook_to = Position::new(back_row, rook_to_col);

    // Everything strictly between king and rook must be empty.
    let (low, high) = ordered(king_from.col(), rook_from.col());
    for col in low + 1..high {
        if board.piece_at(Position::new(back_row, col)).is_some() {
            return None;
        }
    }

    // Neither destination may hold a third piece. In Chess960 a destination
    // can sit outside the king-rook span.
    for target in [king_to, rook_to] {
        if board.piece_at(target).is_some() && target != king_from && target != rook_from {
            return None;
        }
    }

    // The king's current square and every square it crosses, destination
    // included, must be unattacked; crossed squares must also be clear.
    let (path_low, path_high) = ordered(king_from.col(), king_to_col);
    for col in path_low..=path_high {
        let square = Position::new(back_row, col);
        if is_attacked(board, king_color.opposite(), square) {
            return None;
        }
        if board.piece_at(square).is_some() && square != king_from && square != rook_from {
            return None;
        }
    }

    Some(Command::Castle {
        king_from,
        king_to,
        rook_from,
        rook_to,
    })
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether any recorded move ever touched this square. A piece standing on a
/// never-touched square is the piece that started the game there; a touch
/// means it moved, returned, or was captured, all of which end castling
/// eligibility. Capture of a home rook counts because the capture touches
/// its square.
fn square_touched(game: &ChessGame, position: Position) -> bool {
    game.history()
        .any(|update| command_touches(&update.command, position))
}

fn command_touches(command: &Command, position: Position) -> bool {
    match command {
        Command::Move { from, to } => *from == position || *to == position,
        Command::Remove { at } | Command::Promote { at, .. } => *at == position,
        Command::Castle {
            king_from,
            king_to,
            rook_from,
            rook_to,
        } => [king_from, king_to, rook_from, rook_to].contains(&&position),
        Command::Sequence(first, second) => {
            command_touches(first, position) || command_touches(second, position)
        }
        Command::RecordLastUpdate(inner) => command_touches(inner, position),
        Command::EndTurn => false,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::board::Board;

    fn king_placed(game: &ChessGame, row: u8, col: u8) -> PlacedPiece {
        let position = Position::new(row, col);
        PlacedPiece::new(position, game.board().piece_at(position).unwrap())
    }

    fn apply(game: &ChessGame, from: Position, to: Position) -> ChessGame {
        let mve = Command::Move { from, to };
        mve.clone()
            .then(Command::EndTurn.then(Command::RecordLastUpdate(Box::new(mve))))
            .execute(game)
            .unwrap()
    }

    #[test]
    fn test_both_sides_available() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )?);
        let commands = castling_commands(&game, king_placed(&game, 0, 4));

        assert_eq!(commands.len(), 2);
        assert!(commands.contains(&Command::Castle {
            king_from: Position::new(0, 4),
            king_to: Position::new(0, 2),
            rook_from: Position::new(0, 0),
            rook_to: Position::new(0, 3),
        }));
        assert!(commands.contains(&Command::Castle {
            king_from: Position::new(0, 4),
            king_to: Position::new(0, 6),
            rook_from: Position::new(0, 7),
            rook_to: Position::new(0, 5),
        }));
        Ok(())
    }

    #[test]
    fn test_blocked_between_squares() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R..QK.NR
            ",
        )?);
        // Queen blocks the queen side, knight the king side.
        assert!(castling_commands(&game, king_placed(&game, 0, 4)).is_empty());
        Ok(())
    }

    #[test]
    fn test_attacked_traversal_square() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            .....r..
            R...K..R
            ",
        )?);
        // The black rook on f2 covers f1 (king side path) but none of the
        // queen-side path squares c1/d1/e1.
        let commands = castling_commands(&game, king_placed(&game, 0, 4));
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].destination(), Some(Position::new(0, 2)));
        Ok(())
    }

    #[test]
    fn test_king_in_check_forbids_castling() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ....q...
            R...K..R
            ",
        )?);
        assert!(castling_commands(&game, king_placed(&game, 0, 4)).is_empty());
        Ok(())
    }

    #[test]
    fn test_moved_rook_loses_its_side() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )?);
        // White rook h1-g1, Black rook h8-g8, both rooks return home. The
        // home squares are touched, so the king side is gone for both.
        let game = apply(&game, Position::new(0, 7), Position::new(0, 6));
        let game = apply(&game, Position::new(7, 7), Position::new(7, 6));
        let game = apply(&game, Position::new(0, 6), Position::new(0, 7));
        let game = apply(&game, Position::new(7, 6), Position::new(7, 7));

        let white = castling_commands(&game, king_placed(&game, 0, 4));
        assert_eq!(white.len(), 1);
        assert_eq!(white[0].destination(), Some(Position::new(0, 2)));

        let black = castling_commands(&game, king_placed(&game, 7, 4));
        assert_eq!(black.len(), 1);
        assert_eq!(black[0].destination(), Some(Position::new(7, 2)));
        Ok(())
    }

    #[test]
    fn test_moved_king_loses_both_sides() -> TestResult {
        let game = ChessGame::new(Board::from_ascii(
            "
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
            ",
        )?);
        let game = apply(&game, Position::new(0, 4), Position::new(1, 4));
        let game = apply(&game, Position::new(7, 4), Position::new(7, 3));
        let game = apply(&game, Position::new(1, 4), Position::new(0, 4));

        assert!(castling_commands(&game, king_placed(&game, 0, 4)).is_empty());
        Ok(())
    }

    #[test]
    fn test_chess960_overlapping_queen_side() -> TestResult {
        // King already inside the destination span: king b1, rook a1.
        let game = ChessGame::new(Board::from_ascii(
            "
            rk......
            ........
            ........
            ........
            ........
            ........
            ........
            RK......
            ",
        )?);
        let commands = castling_commands(&game, king_placed(&game, 0, 1));

        assert_eq!(commands.len(), 1);
        let next = commands[0].execute(&game).expect("castle should execute");
        assert_eq!(
            next.board().piece_at(Position::new(0, 2)).map(|p| p.kind),
            Some(PieceKind::King)
        );
        assert_eq!(
            next.board().piece_at(Position::new(0, 3)).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        Ok(())
    }

    #[test]
    fn test_chess960_bystander_on_destination() -> TestResult {
        // Queen-side rook destination d1 is occupied by a bishop that sits
        // outside the king-rook span.
        let game = ChessGame::new(Board::from_ascii(
            "
            rk.b....
            ........
            ........
            ........
            ........
            ........
            ........
            RK.B....
            ",
        )?);
        assert!(castling_commands(&game, king_placed(&game, 0, 1)).is_empty());
        Ok(())
    }
}
