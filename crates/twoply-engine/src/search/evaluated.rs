//! Evaluated moves and the principal-variation chains they form.

use std::fmt;

/// A move paired with its minimax value and the best reply beneath it.
///
/// Following [`best_reply`](Self::best_reply) from a root yields the
/// principal variation down to the search horizon. A node without a move is
/// a leaf: either the horizon or a terminal position.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedMove<M> {
    mv: Option<M>,
    value: f64,
    best_reply: Option<Box<EvaluatedMove<M>>>,
}

impl<M> EvaluatedMove<M> {
    /// A leaf valued by static evaluation.
    pub fn leaf(value: f64) -> Self {
        Self {
            mv: None,
            value,
            best_reply: None,
        }
    }

    /// `mv` leading to the position evaluated by `reply`, carrying its value.
    pub fn with_reply(mv: M, reply: EvaluatedMove<M>) -> Self {
        Self {
            mv: Some(mv),
            value: reply.value,
            best_reply: Some(Box::new(reply)),
        }
    }

    /// The move played at this node, `None` for a leaf.
    pub fn mv(&self) -> Option<&M> {
        self.mv.as_ref()
    }

    /// The minimax value, from player one's point of view.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The best continuation below this move.
    pub fn best_reply(&self) -> Option<&EvaluatedMove<M>> {
        self.best_reply.as_deref()
    }

    /// Return `true` if this node carries no move.
    pub fn is_leaf(&self) -> bool {
        self.mv.is_none()
    }

    /// Consume the node and return its move.
    pub fn into_move(self) -> Option<M> {
        self.mv
    }

    /// The moves of the principal variation, starting with this node's own.
    pub fn line(&self) -> Line<'_, M> {
        Line { next: Some(self) }
    }
}

/// Iterator over the moves of a principal variation.
pub struct Line<'a, M> {
    next: Option<&'a EvaluatedMove<M>>,
}

impl<'a, M> Iterator for Line<'a, M> {
    type Item = &'a M;

    fn next(&mut self) -> Option<&'a M> {
        while let Some(node) = self.next {
            self.next = node.best_reply();
            if let Some(mv) = node.mv() {
                return Some(mv);
            }
        }
        None
    }
}

impl<M: fmt::Debug> fmt::Display for EvaluatedMove<M> {
    /// Formats as `value [mv1 mv2 ...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.value)?;
        for (i, mv) in self.line().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{mv:?}")?;
        }
        write!(f, "]")
    }
}
