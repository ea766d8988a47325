//! Capability traits the search is generic over.

use std::fmt;

use crate::player::Player;

/// Per-player scores, indexed by [`Player::index`].
pub type Scores = [f64; Player::COUNT];

/// A position of a two-player, strictly alternating, zero-sum game.
pub trait GameState {
    /// Static evaluation of this position.
    ///
    /// `depth` is the remaining search depth at the node being evaluated:
    /// 0 at the search horizon, larger for terminal positions reached early.
    fn evaluate(&self, depth: u8) -> Scores;

    /// The side to move.
    fn current_player(&self) -> Player;
}

/// An action that mutates a game state in place and can be taken back.
///
/// Every `apply` must be followed by exactly one `undo` of the same move on
/// the same state, with nothing else touching the state in between.
pub trait GameMove<G>: Clone + PartialEq + fmt::Debug {
    /// Play this move on `state`.
    fn apply(&self, state: &mut G);

    /// Restore `state` to what it was before the latest [`apply`](Self::apply).
    fn undo(&self, state: &mut G);
}

/// Produces the legal moves of a position.
pub trait MoveGenerator<G> {
    /// The move type produced by this generator.
    type Move: GameMove<G>;

    /// Legal moves for the side to move, in a stable order.
    ///
    /// An empty list means the position is terminal.
    fn generate(&self, state: &G) -> Vec<Self::Move>;
}
