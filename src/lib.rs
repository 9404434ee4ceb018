pub mod board;
pub mod command;
pub mod game;
pub mod move_gen;
pub mod rulebook;
pub mod threat;
