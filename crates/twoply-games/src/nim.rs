//! Nim under normal play: whoever takes the last object wins.

use std::fmt;
use std::str::FromStr;

use twoply_core::{GameMove, GameState, MoveGenerator, Player, Scores};

use crate::error::GameError;

/// Score credited to the side a non-terminal position favours.
const EDGE: f64 = 0.5;

/// A Nim position: heap sizes, an optional per-move take limit and the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nim {
    heaps: Vec<u32>,
    max_take: Option<u32>,
    to_move: Player,
}

impl Nim {
    /// Unrestricted Nim with [`Player::One`] to move.
    pub fn new(heaps: Vec<u32>) -> Result<Self, GameError> {
        if heaps.is_empty() {
            return Err(GameError::NoHeaps);
        }
        Ok(Self {
            heaps,
            max_take: None,
            to_move: Player::One,
        })
    }

    /// Limit every move to at most `max_take` objects (subtraction game).
    pub fn with_max_take(mut self, max_take: u32) -> Result<Self, GameError> {
        if max_take == 0 {
            return Err(GameError::ZeroMaxTake);
        }
        self.max_take = Some(max_take);
        Ok(self)
    }

    /// Current heap sizes.
    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// Return `true` once every heap is empty.
    pub fn is_over(&self) -> bool {
        self.heaps.iter().all(|&h| h == 0)
    }

    /// Xor of the per-heap Grundy values. Non-zero means the side to move wins.
    pub fn nim_sum(&self) -> u32 {
        self.heaps.iter().fold(0, |acc, &h| {
            let grundy = match self.max_take {
                Some(k) => h % (k + 1),
                None => h,
            };
            acc ^ grundy
        })
    }
}

impl GameState for Nim {
    fn evaluate(&self, depth: u8) -> Scores {
        let mut scores = [0.0; Player::COUNT];
        if self.is_over() {
            // The previous mover took the last object.
            scores[(!self.to_move).index()] = 1.0 + f64::from(depth);
        } else if self.nim_sum() != 0 {
            scores[self.to_move.index()] = EDGE;
        } else {
            scores[(!self.to_move).index()] = EDGE;
        }
        scores
    }

    fn current_player(&self) -> Player {
        self.to_move
    }
}

/// Remove `count` objects from heap `heap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Take {
    pub heap: usize,
    pub count: u32,
}

impl GameMove<Nim> for Take {
    fn apply(&self, state: &mut Nim) {
        state.heaps[self.heap] -= self.count;
        state.to_move = !state.to_move;
    }

    fn undo(&self, state: &mut Nim) {
        state.heaps[self.heap] += self.count;
        state.to_move = !state.to_move;
    }
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.count, self.heap)
    }
}

/// Generates every legal take, heap by heap, smallest take first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NimMoves;

impl MoveGenerator<Nim> for NimMoves {
    type Move = Take;

    fn generate(&self, state: &Nim) -> Vec<Take> {
        let mut moves = Vec::new();
        for (heap, &size) in state.heaps.iter().enumerate() {
            let limit = state.max_take.map_or(size, |k| k.min(size));
            moves.extend((1..=limit).map(|count| Take { heap, count }));
        }
        moves
    }
}

impl FromStr for Nim {
    type Err = GameError;

    /// Parse comma-separated heap sizes, e.g. `"3,4,5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let heaps = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>().map_err(|_| GameError::InvalidHeap {
                    found: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Nim::new(heaps)
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, heap) in self.heaps.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{heap}")?;
        }
        Ok(())
    }
}
