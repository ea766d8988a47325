//! Core game abstractions: players, game states, moves, generators and deadlines.

mod deadline;
mod error;
mod game;
mod perft;
mod player;

pub use deadline::{Deadline, Unlimited};
pub use error::DeadlineExpired;
pub use game::{GameMove, GameState, MoveGenerator, Scores};
pub use perft::{divide, perft};
pub use player::Player;
