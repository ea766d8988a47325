//! Errors raised while building game positions from text.

/// Errors that occur when parsing a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A tic-tac-toe board does not describe exactly 9 cells.
    #[error("expected 9 cells, found {found}")]
    WrongCellCount {
        /// Number of cells found.
        found: usize,
    },
    /// An unrecognized character appeared in a tic-tac-toe board.
    #[error("invalid cell character: '{character}'")]
    InvalidCell {
        /// The invalid character.
        character: char,
    },
    /// The number of crosses and noughts cannot arise from alternating play.
    #[error("impossible mark counts: {crosses} x, {noughts} o")]
    ImpossibleCounts {
        /// Number of `x` marks.
        crosses: usize,
        /// Number of `o` marks.
        noughts: usize,
    },
    /// A Nim position has no heaps at all.
    #[error("nim position has no heaps")]
    NoHeaps,
    /// A Nim heap size is not a valid number.
    #[error("invalid heap size: \"{found}\"")]
    InvalidHeap {
        /// The invalid heap string.
        found: String,
    },
    /// A Nim take limit of zero would leave no legal moves.
    #[error("maximum take must be at least 1")]
    ZeroMaxTake,
}
