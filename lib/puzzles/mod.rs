//! Small combinatorial and checksum puzzles.

pub mod queens;
pub mod ident;
