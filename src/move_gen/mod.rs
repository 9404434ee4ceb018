//! Candidate command generation: every geometrically reachable,
//! occupancy-legal destination for a piece. Whether a candidate leaves the
//! mover's own king attacked is the caller's filter, not ours.

pub mod castling;
pub mod en_passant;
pub mod promotion;

use arrayvec::ArrayVec;

use crate::board::{Board, PieceKind, PlacedPiece, Position};
use crate::command::Command;
use crate::game::ChessGame;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// All candidate commands for one piece, in a fixed generation order so that
/// enumeration stays deterministic.
pub fn candidate_commands(game: &ChessGame, placed: PlacedPiece) -> Vec<Command> {
    let board = game.board();
    match placed.piece.kind {
        PieceKind::Pawn => pawn_commands(game, placed),
        PieceKind::Knight => leap_commands(board, placed, &KNIGHT_OFFSETS),
        PieceKind::Bishop => ray_commands(board, placed, &BISHOP_DIRECTIONS),
        PieceKind::Rook => ray_commands(board, placed, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            let mut commands = ray_commands(board, placed, &BISHOP_DIRECTIONS);
            commands.extend(ray_commands(board, placed, &ROOK_DIRECTIONS));
            commands
        }
        PieceKind::King => {
            let mut commands = leap_commands(board, placed, &KING_OFFSETS);
            commands.extend(castling::castling_commands(game, placed));
            commands
        }
    }
}

pub(crate) fn leap_targets(from: Position, offsets: &[(i8, i8); 8]) -> ArrayVec<Position, 8> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

fn leap_commands(board: &Board, placed: PlacedPiece, offsets: &[(i8, i8); 8]) -> Vec<Command> {
    leap_targets(placed.position, offsets)
        .into_iter()
        .filter(|&to| board.piece_of(to, placed.piece.color).is_none())
        .map(|to| Command::Move {
            from: placed.position,
            to,
        })
        .collect()
}

fn ray_commands(board: &Board, placed: PlacedPiece, directions: &[(i8, i8); 4]) -> Vec<Command> {
    let mut commands = Vec::new();
    for &(dr, dc) in directions {
        let mut current = placed.position;
        while let Some(next) = current.offset(dr, dc) {
            match board.piece_at(next) {
                None => {
                    commands.push(Command::Move {
                        from: placed.position,
                        to: next,
                    });
                    current = next;
                }
                Some(blocker) => {
                    if blocker.color != placed.piece.color {
                        commands.push(Command::Move {
                            from: placed.position,
                            to: next,
                        });
                    }
                    break;
                }
            }
        }
    }
    commands
}

fn pawn_commands(game: &ChessGame, placed: PlacedPiece) -> Vec<Command> {
    let board = game.board();
    let color = placed.piece.color;
    let from = placed.position;
    let forward = color.pawn_direction();

    let mut advances: ArrayVec<Position, 4> = ArrayVec::new();

    if let Some(one) = from.offset(forward, 0) {
        if board.piece_at(one).is_none() {
            advances.push(one);
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(forward, 0) {
                    if board.piece_at(two).is_none() {
                        advances.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diag) = from.offset(forward, dc) {
            if board.piece_of(diag, color.opposite()).is_some() {
                advances.push(diag);
            }
        }
    }

    let mut commands: Vec<Command> = advances
        .into_iter()
        .flat_map(|to| promotion::advance_commands(from, to, color))
        .collect();
    commands.extend(en_passant::en_passant_commands(game, placed));
    commands
}
