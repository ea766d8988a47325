//! Reference games for the twoply search engine.

mod error;
mod nim;
mod tictactoe;
mod tree;

pub use error::GameError;
pub use nim::{Nim, NimMoves, Take};
pub use tictactoe::{Placement, TicTacToe, TicTacToeMoves};
pub use tree::{Branch, GameTree, TreeMoves};
