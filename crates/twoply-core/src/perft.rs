//! Perft (performance test) for move generator and apply/undo verification.

use tracing::debug;

use crate::game::{GameMove, MoveGenerator};

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Terminal positions above the
/// horizon count as a single leaf. `state` is restored before returning.
pub fn perft<G, Gen>(state: &mut G, generator: &Gen, depth: u8) -> u64
where
    Gen: MoveGenerator<G>,
{
    if depth == 0 {
        return 1;
    }

    let moves = generator.generate(state);
    if moves.is_empty() {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in &moves {
        mv.apply(state);
        nodes += perft(state, generator, depth - 1);
        mv.undo(state);
    }
    nodes
}

/// Run perft with a per-move breakdown, in generation order.
pub fn divide<G, Gen>(state: &mut G, generator: &Gen, depth: u8) -> Vec<(Gen::Move, u64)>
where
    Gen: MoveGenerator<G>,
{
    let moves = generator.generate(state);
    let results: Vec<(Gen::Move, u64)> = moves
        .into_iter()
        .map(|mv| {
            mv.apply(state);
            let count = perft(state, generator, depth.saturating_sub(1));
            mv.undo(state);
            (mv, count)
        })
        .collect();
    debug!(depth, moves = results.len(), "divide complete");
    results
}
