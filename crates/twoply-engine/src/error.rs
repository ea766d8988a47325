//! Search errors.

use twoply_core::DeadlineExpired;

/// Errors that can end a search without producing a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The deadline expired before the search completed. No partial result
    /// is available.
    #[error("search timed out: {source}")]
    Timeout {
        /// The deadline's expiry signal.
        #[from]
        source: DeadlineExpired,
    },

    /// An alpha-beta cutoff reached the root, whose window is unbounded.
    ///
    /// This is an engine bug (or a game reporting infinite scores), never a
    /// normal outcome.
    #[error("alpha-beta cutoff escaped the root window")]
    RootCutoff,
}
