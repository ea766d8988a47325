//! Tic-tac-toe on a 3x3 board.

use std::fmt;
use std::str::FromStr;

use twoply_core::{GameMove, GameState, MoveGenerator, Player, Scores};

use crate::error::GameError;

/// The eight winning lines, as cell indices (row-major, 0 = top-left).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Base score awarded to the winner; remaining depth is added on top so that
/// earlier wins score higher.
const WIN_SCORE: f64 = 10.0;

/// A tic-tac-toe position. [`Player::One`] plays `x` and moves first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    cells: [Option<Player>; 9],
    to_move: Player,
}

impl TicTacToe {
    /// The empty board with `x` to move.
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            to_move: Player::One,
        }
    }

    /// Contents of the cell at `index` (0..9, row-major).
    pub fn cell(&self, index: usize) -> Option<Player> {
        self.cells[index]
    }

    /// The player who has completed a line, if any.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(p) if self.cells[b] == Some(p) && self.cells[c] == Some(p) => Some(p),
            _ => None,
        })
    }

    /// Return `true` if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Return `true` if the game is over (a win or a full board).
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Number of lines still winnable by `player` that already hold one of its marks.
    fn open_lines(&self, player: Player) -> usize {
        LINES
            .iter()
            .filter(|line| {
                let mut own = 0;
                for &i in line.iter() {
                    match self.cells[i] {
                        Some(p) if p == player => own += 1,
                        Some(_) => return false,
                        None => {}
                    }
                }
                own > 0
            })
            .count()
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    fn evaluate(&self, depth: u8) -> Scores {
        let mut scores = [0.0; Player::COUNT];
        match self.winner() {
            Some(winner) => scores[winner.index()] = WIN_SCORE + f64::from(depth),
            None => {
                for player in Player::ALL {
                    scores[player.index()] = self.open_lines(player) as f64;
                }
            }
        }
        scores
    }

    fn current_player(&self) -> Player {
        self.to_move
    }
}

/// Place the mover's mark on an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement(pub u8);

impl GameMove<TicTacToe> for Placement {
    fn apply(&self, state: &mut TicTacToe) {
        state.cells[self.0 as usize] = Some(state.to_move);
        state.to_move = !state.to_move;
    }

    fn undo(&self, state: &mut TicTacToe) {
        state.cells[self.0 as usize] = None;
        state.to_move = !state.to_move;
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.0 % 3) as char;
        let rank = 3 - self.0 / 3;
        write!(f, "{file}{rank}")
    }
}

/// Generates every empty cell, in index order, until the game is decided.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToeMoves;

impl MoveGenerator<TicTacToe> for TicTacToeMoves {
    type Move = Placement;

    fn generate(&self, state: &TicTacToe) -> Vec<Placement> {
        if state.winner().is_some() {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&i| state.cells[i as usize].is_none())
            .map(Placement)
            .collect()
    }
}

impl FromStr for TicTacToe {
    type Err = GameError;

    /// Parse nine cells (`x`, `o`, `.` or `-`), optionally split into rows by
    /// `/` or whitespace. The side to move follows from the mark counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; 9];
        let mut found = 0;

        for ch in s.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            let cell = match ch {
                'x' | 'X' => Some(Player::One),
                'o' | 'O' => Some(Player::Two),
                '.' | '-' => None,
                _ => return Err(GameError::InvalidCell { character: ch }),
            };
            if found < cells.len() {
                cells[found] = cell;
            }
            found += 1;
        }

        if found != cells.len() {
            return Err(GameError::WrongCellCount { found });
        }

        let crosses = cells.iter().filter(|c| **c == Some(Player::One)).count();
        let noughts = cells.iter().filter(|c| **c == Some(Player::Two)).count();
        let to_move = if crosses == noughts {
            Player::One
        } else if crosses == noughts + 1 {
            Player::Two
        } else {
            return Err(GameError::ImpossibleCounts { crosses, noughts });
        };

        Ok(Self { cells, to_move })
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                write!(f, "/")?;
            }
            let ch = match cell {
                Some(Player::One) => 'x',
                Some(Player::Two) => 'o',
                None => '.',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
