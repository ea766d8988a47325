//! Minimax search with alpha-beta pruning and killer-line move ordering.

pub mod error;
pub mod search;

pub use error::SearchError;
pub use search::control::SearchControl;
pub use search::evaluated::EvaluatedMove;
pub use search::minimax::{SearchResult, minimax, score_from_evaluation};
pub use search::{SearchEngine, SearchStats};
