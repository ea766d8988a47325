//! Search algorithms and move ordering.

pub mod control;
pub mod evaluated;
pub mod minimax;
pub mod ordering;

use tracing::{debug, warn};
use twoply_core::{Deadline, GameMove, GameState, MoveGenerator};

use crate::error::SearchError;
use evaluated::EvaluatedMove;
use minimax::minimax;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, leaves included.
    pub nodes: u64,
    /// Static evaluations performed.
    pub leaves: u64,
    /// Alpha-beta cutoffs.
    pub cutoffs: u64,
    /// Nodes where the previous line's move was found and tried first.
    pub killer_hits: u64,
}

/// Fixed-depth minimax searcher that remembers its last principal variation.
///
/// The remembered line orders moves on the next call, which increases
/// pruning without changing results. One engine serves one game: call
/// [`reset`](Self::reset) before reusing it on an unrelated position.
pub struct SearchEngine<M, D> {
    deadline: D,
    killer: Option<EvaluatedMove<M>>,
    stats: SearchStats,
}

impl<M, D: Deadline> SearchEngine<M, D> {
    /// Create an engine polling `deadline` before each explored move.
    pub fn new(deadline: D) -> Self {
        Self {
            deadline,
            killer: None,
            stats: SearchStats::default(),
        }
    }

    /// The deadline this engine polls.
    pub fn deadline(&self) -> &D {
        &self.deadline
    }

    /// Find the best move for the side to move in `state`, `max_depth` plies deep.
    ///
    /// Returns `Ok(None)` when there is nothing to search (a terminal root or
    /// `max_depth == 0`). On success the full line becomes the ordering hint
    /// for the next call; on error the previous hint is kept. `state` is
    /// restored before returning in every case.
    pub fn search<G, Gen>(
        &mut self,
        state: &mut G,
        generator: &Gen,
        max_depth: u8,
    ) -> Result<Option<M>, SearchError>
    where
        G: GameState,
        M: GameMove<G>,
        Gen: MoveGenerator<G, Move = M>,
    {
        let result = match minimax(
            state,
            generator,
            max_depth,
            self.killer.as_ref(),
            &self.deadline,
        ) {
            Ok(result) => result,
            Err(err) => {
                warn!(max_depth, error = %err, "search aborted");
                return Err(err);
            }
        };

        debug!(
            max_depth,
            value = result.value(),
            nodes = result.stats.nodes,
            leaves = result.stats.leaves,
            cutoffs = result.stats.cutoffs,
            killer_hits = result.stats.killer_hits,
            line = %result.best,
            "search complete"
        );

        self.stats = result.stats;
        let best_move = result.best.mv().cloned();
        self.killer = Some(result.best);
        Ok(best_move)
    }

    /// The line found by the last successful search.
    pub fn killer(&self) -> Option<&EvaluatedMove<M>> {
        self.killer.as_ref()
    }

    /// Moves of the last principal variation, best move first.
    pub fn principal_variation(&self) -> Vec<&M> {
        self.killer.as_ref().map_or_else(Vec::new, |k| k.line().collect())
    }

    /// Counters of the last successful search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Forget the remembered line, e.g. before starting a new game.
    pub fn reset(&mut self) {
        self.killer = None;
        self.stats = SearchStats::default();
    }
}

impl<M, D: std::fmt::Debug> std::fmt::Debug for SearchEngine<M, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("deadline", &self.deadline)
            .field("has_killer", &self.killer.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use twoply_core::{Player, Unlimited};
    use twoply_games::{Branch, GameTree, Nim, NimMoves, Placement, Take, TicTacToe, TicTacToeMoves, TreeMoves};

    use crate::search::control::SearchControl;

    fn engine<M>() -> SearchEngine<M, Unlimited> {
        SearchEngine::new(Unlimited)
    }

    #[test]
    fn picks_better_leaf_at_depth_one() {
        let mut tree = GameTree::new(Player::One);
        tree.add_child(GameTree::ROOT, [1.0, 0.0]);
        tree.add_child(GameTree::ROOT, [0.0, 1.0]);

        let mut engine = engine();
        let best = engine.search(&mut tree, &TreeMoves::new(), 1).unwrap();
        assert_eq!(best, Some(Branch(0)));
        assert_eq!(engine.killer().map(EvaluatedMove::value), Some(1.0));
    }

    #[test]
    fn player_two_minimises() {
        let mut tree = GameTree::new(Player::Two);
        tree.add_child(GameTree::ROOT, [1.0, 0.0]);
        tree.add_child(GameTree::ROOT, [0.0, 1.0]);

        let best = engine().search(&mut tree, &TreeMoves::new(), 1).unwrap();
        assert_eq!(best, Some(Branch(1)));
    }

    #[test]
    fn maximiser_takes_last_of_equal_leaves() {
        let mut tree = GameTree::new(Player::One);
        tree.add_child(GameTree::ROOT, [2.0, 0.0]);
        tree.add_child(GameTree::ROOT, [2.0, 0.0]);

        let best = engine().search(&mut tree, &TreeMoves::new(), 1).unwrap();
        assert_eq!(best, Some(Branch(1)));
    }

    #[test]
    fn minimiser_takes_first_of_equal_leaves() {
        let mut tree = GameTree::new(Player::Two);
        tree.add_child(GameTree::ROOT, [2.0, 0.0]);
        tree.add_child(GameTree::ROOT, [2.0, 0.0]);

        let best = engine().search(&mut tree, &TreeMoves::new(), 1).unwrap();
        assert_eq!(best, Some(Branch(0)));
    }

    #[test]
    fn terminal_root_returns_none() {
        let mut tree = GameTree::with_root_scores(Player::One, [3.0, 1.0]);
        let generator = TreeMoves::new();
        let mut engine = engine();
        let best = engine.search(&mut tree, &generator, 4).unwrap();
        assert_eq!(best, None);
        assert_eq!(generator.calls(), 1);
        assert_eq!(engine.killer().map(EvaluatedMove::value), Some(2.0));
        assert!(engine.principal_variation().is_empty());
    }

    #[test]
    fn stop_flag_set_before_search_times_out() {
        let stopped = Arc::new(AtomicBool::new(true));
        let mut engine = SearchEngine::new(SearchControl::new_infinite(stopped));
        let mut board = TicTacToe::new();
        let before = board.clone();

        let result = engine.search(&mut board, &TicTacToeMoves, 3);
        assert!(matches!(result, Err(SearchError::Timeout { .. })));
        assert_eq!(board, before);
        assert!(engine.killer().is_none());
    }

    #[test]
    fn timeout_keeps_previous_killer() {
        let stopped = Arc::new(AtomicBool::new(false));
        let mut engine = SearchEngine::new(SearchControl::new_infinite(Arc::clone(&stopped)));
        let mut board = TicTacToe::new();

        engine.search(&mut board, &TicTacToeMoves, 2).unwrap();
        let line: Vec<Placement> = engine.principal_variation().into_iter().copied().collect();
        assert_eq!(line.len(), 2);

        stopped.store(true, Ordering::Release);
        assert!(engine.search(&mut board, &TicTacToeMoves, 2).is_err());
        let kept: Vec<Placement> = engine.principal_variation().into_iter().copied().collect();
        assert_eq!(kept, line);
    }

    #[test]
    fn completes_winning_line() {
        // x to move: a3 b3 are x, c3 completes the top row.
        let mut board: TicTacToe = "xx./oo./...".parse().unwrap();
        let best = engine().search(&mut board, &TicTacToeMoves, 3).unwrap();
        assert_eq!(best, Some(Placement(2)));
    }

    #[test]
    fn blocks_opponent_line() {
        // o to move must block the top row at c3.
        let mut board: TicTacToe = "xx./o../...".parse().unwrap();
        let best = engine().search(&mut board, &TicTacToeMoves, 2).unwrap();
        assert_eq!(best, Some(Placement(2)));
    }

    #[test]
    fn nim_finds_zero_nim_sum_move() {
        // 3 ^ 4 ^ 5 = 2: the only winning move is taking 2 from the first heap.
        let mut nim: Nim = "3,4,5".parse().unwrap();
        let best = engine().search(&mut nim, &NimMoves, 2).unwrap();
        assert_eq!(best, Some(Take { heap: 0, count: 2 }));
    }

    #[test]
    fn reset_forgets_line() {
        let mut board = TicTacToe::new();
        let mut engine = engine();
        engine.search(&mut board, &TicTacToeMoves, 2).unwrap();
        assert!(engine.killer().is_some());
        assert!(engine.stats().nodes > 0);

        engine.reset();
        assert!(engine.killer().is_none());
        assert_eq!(engine.stats(), SearchStats::default());
    }

    #[test]
    fn repeated_search_with_killer_is_stable() {
        let mut board: TicTacToe = "x../.o./...".parse().unwrap();
        let mut engine = engine();
        let first = engine.search(&mut board, &TicTacToeMoves, 4).unwrap();
        let second = engine.search(&mut board, &TicTacToeMoves, 4).unwrap();
        assert_eq!(first, second);
        assert!(engine.stats().killer_hits > 0);
    }
}
