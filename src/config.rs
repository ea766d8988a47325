//! Command-line configuration for a self-play match.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Which reference game to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    #[value(name = "tictactoe")]
    TicTacToe,
    Nim,
}

/// Self-play settings.
#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play with the twoply alpha-beta engine", long_about = None)]
pub struct MatchConfig {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameKind::TicTacToe)]
    pub game: GameKind,

    /// Starting position: a board such as "x../.o./..." or heaps such as "3,4,5"
    #[arg(long)]
    pub position: Option<String>,

    /// Search depth in plies
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(1..))]
    pub depth: u8,

    /// Time budget per move, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub movetime_ms: u64,

    /// Maximum number of objects a Nim move may take
    #[arg(long)]
    pub max_take: Option<u32>,

    /// Stop the match after this many moves
    #[arg(long, default_value_t = 200)]
    pub max_moves: u32,
}

impl MatchConfig {
    /// Time budget per move.
    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.movetime_ms)
    }
}
