use crate::board::{Color, PieceKind, Position};
use crate::command::Command;

/// Kinds a pawn may promote to, in enumeration order.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Commands for one pawn advance. An advance onto the farthest rank fans out
/// into one command per promotable kind; any other advance is a plain move.
pub fn advance_commands(from: Position, to: Position, color: Color) -> Vec<Command> {
    if to.row() != color.promotion_row() {
        return vec![Command::Move { from, to }];
    }

    PROMOTION_KINDS
        .iter()
        .map(|&kind| Command::Move { from, to }.then(Command::Promote { at: to, kind }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Color::White, 6, 7 ; "white to rank 8")]
    #[test_case(Color::Black, 1, 0 ; "black to rank 1")]
    fn test_fan_out_on_farthest_rank(color: Color, from_row: u8, to_row: u8) {
        let from = Position::new(from_row, 2);
        let to = Position::new(to_row, 2);

        let commands = advance_commands(from, to, color);

        assert_eq!(commands.len(), PROMOTION_KINDS.len());
        for (command, &kind) in commands.iter().zip(PROMOTION_KINDS.iter()) {
            assert_eq!(command.source(), Some(from));
            assert_eq!(command.destination(), Some(to));
            assert_eq!(
                *command,
                Command::Move { from, to }.then(Command::Promote { at: to, kind })
            );
        }
    }

    #[test]
    fn test_plain_advance_stays_single() {
        let from = Position::new(4, 4);
        let to = Position::new(5, 4);
        assert_eq!(
            advance_commands(from, to, Color::White),
            vec![Command::Move { from, to }]
        );
    }
}
