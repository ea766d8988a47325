//! Minimax with alpha-beta pruning and killer-line ordering.

use std::cmp::Ordering;

use tracing::{debug, error, trace};
use twoply_core::{Deadline, DeadlineExpired, GameMove, GameState, MoveGenerator, Player, Scores};

use crate::error::SearchError;
use crate::search::SearchStats;
use crate::search::evaluated::EvaluatedMove;
use crate::search::ordering::killer_first;

/// Reduce a per-player score pair to a single value from player one's
/// point of view.
#[inline]
pub fn score_from_evaluation(scores: Scores) -> f64 {
    scores[0] - scores[1]
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Root of the principal variation. Its move is the best move.
    pub best: EvaluatedMove<M>,
    /// Counters collected during the search.
    pub stats: SearchStats,
}

impl<M> SearchResult<M> {
    /// The chosen move, `None` if the root had nothing to explore.
    pub fn best_move(&self) -> Option<&M> {
        self.best.mv()
    }

    /// Minimax value of the root.
    pub fn value(&self) -> f64 {
        self.best.value()
    }
}

/// Outcome of evaluating one node.
#[derive(Debug)]
pub(super) enum Node<M> {
    /// The node's best move and value.
    Value(EvaluatedMove<M>),
    /// A bound crossed at this node; the parent discards it.
    Cutoff,
}

/// Search state threaded through the recursion.
pub(super) struct SearchContext<'a, D: ?Sized> {
    /// Cancellation source, polled before every move.
    pub deadline: &'a D,
    /// Depth the search started at.
    pub root_depth: u8,
    /// Counters.
    pub stats: SearchStats,
}

/// Search `state` to `depth` plies and return the principal variation.
///
/// `prior` is the line found by an earlier search; its moves are tried first
/// at the matching plies. It only affects how much is pruned, never the
/// result. Feed the returned [`SearchResult::best`] back in on the next call
/// to keep the ordering hint alive across turns.
///
/// `state` is identical to its input on return, whether the search
/// succeeded or not.
pub fn minimax<G, Gen, D>(
    state: &mut G,
    generator: &Gen,
    depth: u8,
    prior: Option<&EvaluatedMove<Gen::Move>>,
    deadline: &D,
) -> Result<SearchResult<Gen::Move>, SearchError>
where
    G: GameState,
    Gen: MoveGenerator<G>,
    D: Deadline + ?Sized,
{
    let mut ctx = SearchContext {
        deadline,
        root_depth: depth,
        stats: SearchStats::default(),
    };
    let maximizing = state.current_player() == Player::One;

    let node = evaluate(
        state,
        generator,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        maximizing,
        prior,
        &mut ctx,
    );

    match node {
        Ok(Node::Value(best)) => Ok(SearchResult {
            best,
            stats: ctx.stats,
        }),
        Ok(Node::Cutoff) => {
            error!(depth, "cutoff escaped the root window");
            Err(SearchError::RootCutoff)
        }
        Err(expired) => Err(expired.into()),
    }
}

/// Evaluate one node.
///
/// Returns [`Node::Cutoff`] when the node's own bound update closes the
/// window; every move applied here is undone before returning.
#[allow(clippy::too_many_arguments)]
pub(super) fn evaluate<G, Gen, D>(
    state: &mut G,
    generator: &Gen,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    prior: Option<&EvaluatedMove<Gen::Move>>,
    ctx: &mut SearchContext<'_, D>,
) -> Result<Node<Gen::Move>, DeadlineExpired>
where
    G: GameState,
    Gen: MoveGenerator<G>,
    D: Deadline + ?Sized,
{
    ctx.stats.nodes += 1;

    if depth == 0 {
        return Ok(Node::Value(leaf(state, depth, ctx)));
    }

    let mut moves = generator.generate(state);

    // Terminal position
    if moves.is_empty() {
        return Ok(Node::Value(leaf(state, depth, ctx)));
    }

    if let Some(killer) = prior.and_then(EvaluatedMove::mv)
        && killer_first(&mut moves, killer)
    {
        ctx.stats.killer_hits += 1;
    }
    let reply_hint = prior.and_then(EvaluatedMove::best_reply);

    let mut evaluated: Vec<EvaluatedMove<Gen::Move>> = Vec::with_capacity(moves.len());

    for mv in moves {
        ctx.deadline.check()?;

        mv.apply(state);
        let child = evaluate(
            state,
            generator,
            depth - 1,
            alpha,
            beta,
            !maximizing,
            reply_hint,
            ctx,
        );
        mv.undo(state);

        let reply = match child? {
            Node::Value(reply) => reply,
            // The reply cannot improve on what this node is already offered.
            Node::Cutoff => continue,
        };

        let value = reply.value();
        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if beta <= alpha {
            ctx.stats.cutoffs += 1;
            trace!(depth, alpha, beta, "cutoff");
            return Ok(Node::Cutoff);
        }

        evaluated.push(EvaluatedMove::with_reply(mv, reply));
    }

    if evaluated.is_empty() {
        // Every reply fell outside the window inherited from above, so this
        // node's value lies beyond the failing bound; report that bound and
        // let the parent prune it.
        let bound = if maximizing { alpha } else { beta };
        return Ok(Node::Value(EvaluatedMove::leaf(bound)));
    }

    // Stable: equal values keep generation order.
    evaluated.sort_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal));

    if depth == ctx.root_depth {
        debug!(
            candidates = %evaluated
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "root moves"
        );
    }

    let pick = if maximizing { evaluated.len() - 1 } else { 0 };
    Ok(Node::Value(evaluated.swap_remove(pick)))
}

fn leaf<G, M, D>(state: &G, depth: u8, ctx: &mut SearchContext<'_, D>) -> EvaluatedMove<M>
where
    G: GameState,
    D: ?Sized,
{
    ctx.stats.leaves += 1;
    EvaluatedMove::leaf(score_from_evaluation(state.evaluate(depth)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use twoply_core::Unlimited;
    use twoply_games::{Branch, GameTree, TreeMoves};

    /// Expires after `n` successful polls.
    struct PollBudget(Cell<u32>);

    impl Deadline for PollBudget {
        fn check(&self) -> Result<(), DeadlineExpired> {
            match self.0.get() {
                0 => Err(DeadlineExpired),
                n => {
                    self.0.set(n - 1);
                    Ok(())
                }
            }
        }
    }

    /// Two-ply tree with player one to move at the root.
    ///
    /// ```text
    ///            root (max)
    ///        /       |        \
    ///      a(min)   b(min)    c(min)
    ///     / \       / \       / \
    ///    3   5     6   9     1   8
    /// ```
    fn two_level_tree() -> GameTree {
        let mut tree = GameTree::new(Player::One);
        for pair in [[3.0, 5.0], [6.0, 9.0], [1.0, 8.0]] {
            let node = tree.add_child(GameTree::ROOT, [0.0, 0.0]);
            for v in pair {
                tree.add_child(node, [v, 0.0]);
            }
        }
        tree
    }

    #[test]
    fn reduction_is_difference() {
        assert_eq!(score_from_evaluation([1.0, 0.0]), 1.0);
        assert_eq!(score_from_evaluation([0.0, 1.0]), -1.0);
        assert_eq!(score_from_evaluation([4.5, 1.5]), 3.0);
    }

    #[test]
    fn two_level_minimax_value() {
        let mut tree = two_level_tree();
        let result = minimax(&mut tree, &TreeMoves::new(), 2, None, &Unlimited).unwrap();
        assert_eq!(result.best_move(), Some(&Branch(1)));
        assert_eq!(result.value(), 6.0);
        assert_eq!(
            result.best.line().copied().collect::<Vec<_>>(),
            vec![Branch(1), Branch(0)]
        );
    }

    #[test]
    fn pruning_skips_refuted_sibling() {
        // c's first leaf (1) already refutes c, so its second leaf is never reached.
        let mut tree = two_level_tree();
        let result = minimax(&mut tree, &TreeMoves::new(), 2, None, &Unlimited).unwrap();
        assert_eq!(result.stats.cutoffs, 1);
        assert_eq!(result.stats.leaves, 5);
    }

    #[test]
    fn depth_zero_is_a_leaf() {
        let mut tree = GameTree::with_root_scores(Player::One, [2.0, 0.5]);
        tree.add_child(GameTree::ROOT, [9.0, 0.0]);
        let result = minimax(&mut tree, &TreeMoves::new(), 0, None, &Unlimited).unwrap();
        assert_eq!(result.best_move(), None);
        assert_eq!(result.value(), 1.5);
    }

    #[test]
    fn killer_hint_is_promoted() {
        let mut tree = two_level_tree();
        let generator = TreeMoves::new();
        let first = minimax(&mut tree, &generator, 2, None, &Unlimited).unwrap();
        assert_eq!(first.stats.killer_hits, 0);

        let second = minimax(&mut tree, &generator, 2, Some(&first.best), &Unlimited).unwrap();
        assert!(second.stats.killer_hits >= 1);
        assert_eq!(second.best_move(), first.best_move());
        assert_eq!(second.value(), first.value());
    }

    #[test]
    fn timeout_mid_search_restores_state() {
        let mut tree = two_level_tree();
        let before = tree.clone();
        // Expires on the first leaf below `b`.
        let budget = PollBudget(Cell::new(4));
        let result = minimax(&mut tree, &TreeMoves::new(), 2, None, &budget);
        assert!(matches!(result, Err(SearchError::Timeout { .. })));
        assert_eq!(tree, before);
    }

    #[test]
    fn infinite_score_triggers_root_cutoff() {
        let mut tree = GameTree::new(Player::One);
        tree.add_child(GameTree::ROOT, [f64::INFINITY, 0.0]);
        let result = minimax(&mut tree, &TreeMoves::new(), 1, None, &Unlimited);
        assert_eq!(result.unwrap_err(), SearchError::RootCutoff);
    }
}
