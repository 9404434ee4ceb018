use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{starting_board, Rulebook};
use crate::board::PieceKind;
use crate::game::ChessGame;

/// Fischer random chess: the back rank is drawn fresh for every created
/// game, subject to the opposite-color-bishops and king-between-rooks
/// constraints.
///
/// The rulebook owns its random source. Draws go through `&mut self`, so an
/// instance cannot be shared across threads without external
/// synchronization; the generator is per-instance, never process-wide.
#[derive(Debug)]
pub struct Chess960 {
    rng: StdRng,
}

impl Chess960 {
    pub fn new() -> Chess960 {
        Chess960 {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded constructor: the same seed reproduces the same sequence of
    /// generated back ranks, draw for draw.
    pub fn from_seed(seed: u64) -> Chess960 {
        Chess960 {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws in a fixed order so each pick shrinks the candidate set the
    /// same way for a given seed: light-square bishop, dark-square bishop,
    /// queen, two knights, then the leftover three files ascending become
    /// rook, king, rook.
    fn back_rank(&mut self) -> [PieceKind; 8] {
        // Every slot is overwritten before the array is returned.
        let mut layout = [PieceKind::Pawn; 8];
        let mut open: Vec<usize> = (0..8).collect();

        for parity in [0, 1] {
            let candidates: Vec<usize> = open
                .iter()
                .copied()
                .filter(|file| file % 2 == parity)
                .collect();
            let file = candidates[self.rng.random_range(0..candidates.len())];
            layout[file] = PieceKind::Bishop;
            open.retain(|&f| f != file);
        }

        for kind in [PieceKind::Queen, PieceKind::Knight, PieceKind::Knight] {
            let pick = self.rng.random_range(0..open.len());
            layout[open.remove(pick)] = kind;
        }

        // `open` kept its ascending order, which puts the king strictly
        // between the rooks.
        layout[open[0]] = PieceKind::Rook;
        layout[open[1]] = PieceKind::King;
        layout[open[2]] = PieceKind::Rook;

        debug_assert!(
            layout.iter().filter(|&&k| k == PieceKind::Pawn).count() == 0,
            "back rank left a slot unassigned: {:?}",
            layout
        );
        layout
    }
}

impl Default for Chess960 {
    fn default() -> Self {
        Chess960::new()
    }
}

impl Rulebook for Chess960 {
    fn create_game(&mut self) -> ChessGame {
        let layout = self.back_rank();
        debug!("back rank: {:?}", layout);
        ChessGame::new(starting_board(layout))
    }
}
