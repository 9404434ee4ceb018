//! Square-attack analysis. Works on raw per-kind attack geometry with no
//! legality filtering, so check detection never recurses into its own
//! king-safety question.

use crate::board::{Board, Color, PieceKind, PlacedPiece, Position};
use crate::game::{ChessGame, Player};
use crate::move_gen::{leap_targets, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

/// Whether any piece of `by` attacks `target`. Pawns attack their two
/// forward diagonals whether or not those squares are occupied; pushes never
/// attack anything.
pub fn is_attacked(board: &Board, by: Color, target: Position) -> bool {
    board
        .pieces_of(by)
        .any(|placed| attacks(board, placed, target))
}

fn attacks(board: &Board, placed: PlacedPiece, target: Position) -> bool {
    let from = placed.position;
    match placed.piece.kind {
        PieceKind::Pawn => {
            let forward = placed.piece.color.pawn_direction();
            [-1, 1]
                .into_iter()
                .filter_map(|dc| from.offset(forward, dc))
                .any(|diag| diag == target)
        }
        PieceKind::Knight => leap_targets(from, &KNIGHT_OFFSETS).contains(&target),
        PieceKind::King => leap_targets(from, &KING_OFFSETS).contains(&target),
        PieceKind::Bishop => ray_reaches(board, from, &BISHOP_DIRECTIONS, target),
        PieceKind::Rook => ray_reaches(board, from, &ROOK_DIRECTIONS, target),
        PieceKind::Queen => {
            ray_reaches(board, from, &BISHOP_DIRECTIONS, target)
                || ray_reaches(board, from, &ROOK_DIRECTIONS, target)
        }
    }
}

fn ray_reaches(
    board: &Board,
    from: Position,
    directions: &[(i8, i8); 4],
    target: Position,
) -> bool {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            if next == target {
                return true;
            }
            if board.piece_at(next).is_some() {
                break;
            }
            current = next;
        }
    }
    false
}

/// Whether the player's king currently stands on an attacked square.
pub fn is_in_check(game: &ChessGame, player: Player) -> bool {
    let color = player.color();
    let Some(king_square) = game.board().king_position(color) else {
        debug_assert!(false, "no {} king on the board\n{}", color, game.board());
        return false;
    };
    is_attacked(game.board(), color.opposite(), king_square)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use testresult::TestResult;

    use super::*;
    use crate::game::ChessGame;

    const MIXED: &str = "
        ....k...
        ........
        ..n.....
        ........
        ......b.
        ........
        .R......
        ....K...
    ";

    #[test_case(Color::Black, 1, 4, true ; "bishop ray hits e2")]
    #[test_case(Color::Black, 3, 4, false ; "empty center square unreached")]
    #[test_case(Color::Black, 3, 3, true ; "knight reaches d4")]
    #[test_case(Color::Black, 6, 4, true ; "king guards e7")]
    #[test_case(Color::White, 1, 7, true ; "rook along rank 2")]
    #[test_case(Color::White, 7, 1, true ; "rook along b file")]
    #[test_case(Color::White, 0, 0, false ; "rook does not reach diagonally")]
    fn test_is_attacked(by: Color, row: u8, col: u8, want: bool) -> TestResult {
        let board = Board::from_ascii(MIXED)?;
        assert_eq!(is_attacked(&board, by, Position::new(row, col)), want);
        Ok(())
    }

    #[test]
    fn test_slider_ray_stops_at_blocker() -> TestResult {
        let board = Board::from_ascii(
            "
            ....k...
            ........
            ........
            ....P...
            ........
            ........
            ........
            ....R...
            ",
        )?;
        // Own pawn on e5 shields everything beyond it.
        assert!(is_attacked(&board, Color::White, Position::new(3, 4)));
        assert!(is_attacked(&board, Color::White, Position::new(4, 4)));
        assert!(!is_attacked(&board, Color::White, Position::new(5, 4)));
        Ok(())
    }

    #[test]
    fn test_pawn_attacks_diagonals_only() -> TestResult {
        let board = Board::from_ascii(
            "
            ....k...
            ........
            ........
            ........
            ........
            ........
            ....P...
            ....K...
            ",
        )?;
        assert!(is_attacked(&board, Color::White, Position::new(2, 3)));
        assert!(is_attacked(&board, Color::White, Position::new(2, 5)));
        // The push square is not attacked, even though the pawn may move there.
        assert!(!is_attacked(&board, Color::White, Position::new(2, 4)));
        Ok(())
    }

    #[test_case("
        ....k...
        ........
        ........
        ........
        ........
        ........
        ....r...
        ....K...
    ", Color::White, true ; "rook gives check")]
    #[test_case("
        ....k...
        ........
        ........
        ........
        ........
        ........
        ....P...
        ....K...
    ", Color::White, false ; "no attacker is no check")]
    #[test_case("
        ....k...
        ........
        ........
        ........
        ........
        ...N....
        ........
        ....K...
    ", Color::Black, false ; "knight not reaching the king")]
    #[test_case("
        ....k...
        ......N.
        ........
        ........
        ........
        ........
        ........
        ....K...
    ", Color::Black, true ; "knight gives check")]
    fn test_is_in_check(diagram: &str, player_color: Color, want: bool) -> TestResult {
        let game = ChessGame::new(Board::from_ascii(diagram)?);
        assert_eq!(is_in_check(&game, Player::new(player_color)), want);
        Ok(())
    }
}
