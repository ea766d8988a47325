//! An explicit game tree with a score pair on every node.
//!
//! Useful for exercising a search on hand-built or randomly generated trees:
//! every node carries its own static evaluation, and the generator counts how
//! often it is asked for moves.

use std::cell::Cell;

use twoply_core::{GameMove, GameState, MoveGenerator, Player, Scores};

#[derive(Debug, Clone, PartialEq)]
struct TreeNode {
    scores: Scores,
    children: Vec<usize>,
}

/// An arena-allocated game tree plus a cursor (the path from the root to the
/// current node).
#[derive(Debug, Clone, PartialEq)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    path: Vec<usize>,
    root_player: Player,
}

impl GameTree {
    /// Index of the root node.
    pub const ROOT: usize = 0;

    /// A tree holding only a root with scores `[0, 0]`.
    pub fn new(root_player: Player) -> Self {
        Self::with_root_scores(root_player, [0.0, 0.0])
    }

    /// A tree holding only a root with the given scores.
    pub fn with_root_scores(root_player: Player, scores: Scores) -> Self {
        Self {
            nodes: vec![TreeNode {
                scores,
                children: Vec::new(),
            }],
            path: vec![Self::ROOT],
            root_player,
        }
    }

    /// Append a child to `parent` and return its node index.
    ///
    /// Children are generated in insertion order.
    pub fn add_child(&mut self, parent: usize, scores: Scores) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TreeNode {
            scores,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// Replace the scores of `node`.
    pub fn set_scores(&mut self, node: usize, scores: Scores) {
        self.nodes[node].scores = scores;
    }

    /// Scores stored on `node`.
    pub fn scores(&self, node: usize) -> Scores {
        self.nodes[node].scores
    }

    /// Child node indices of `node`, in generation order.
    pub fn children(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the tree has no node besides the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The node the cursor is on.
    pub fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Number of moves played from the root to reach the current node.
    pub fn ply(&self) -> usize {
        self.path.len() - 1
    }
}

impl GameState for GameTree {
    fn evaluate(&self, _depth: u8) -> Scores {
        self.nodes[self.current()].scores
    }

    fn current_player(&self) -> Player {
        if self.ply() % 2 == 0 {
            self.root_player
        } else {
            !self.root_player
        }
    }
}

/// Descend into the child at this position of the current node's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Branch(pub usize);

impl GameMove<GameTree> for Branch {
    fn apply(&self, state: &mut GameTree) {
        let child = state.nodes[state.current()].children[self.0];
        state.path.push(child);
    }

    fn undo(&self, state: &mut GameTree) {
        state.path.pop();
    }
}

/// Generates one [`Branch`] per child and counts its invocations.
#[derive(Debug, Default)]
pub struct TreeMoves {
    calls: Cell<u64>,
}

impl TreeMoves {
    /// A generator with a zeroed call counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`generate`](MoveGenerator::generate) has run.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl MoveGenerator<GameTree> for TreeMoves {
    type Move = Branch;

    fn generate(&self, state: &GameTree) -> Vec<Branch> {
        self.calls.set(self.calls.get() + 1);
        (0..state.children(state.current()).len()).map(Branch).collect()
    }
}
