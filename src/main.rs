mod config;

use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use twoply_core::{GameMove, GameState, MoveGenerator, Player};
use twoply_engine::{SearchControl, SearchEngine, SearchError};
use twoply_games::{Nim, NimMoves, TicTacToe, TicTacToeMoves};

use config::{GameKind, MatchConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MatchConfig::parse();
    info!(?config, "twoply starting");

    match config.game {
        GameKind::TicTacToe => {
            let board = match config.position.as_deref() {
                Some(position) => position
                    .parse::<TicTacToe>()
                    .with_context(|| format!("invalid tic-tac-toe position \"{position}\""))?,
                None => TicTacToe::new(),
            };
            play(board, &TicTacToeMoves, &config)
        }
        GameKind::Nim => {
            let position = config.position.as_deref().unwrap_or("3,4,5");
            let mut nim = position
                .parse::<Nim>()
                .with_context(|| format!("invalid Nim position \"{position}\""))?;
            if let Some(max_take) = config.max_take {
                nim = nim.with_max_take(max_take)?;
            }
            play(nim, &NimMoves, &config)
        }
    }
}

/// Play a full game, one engine per side, and print the final position.
fn play<G, Gen>(mut state: G, generator: &Gen, config: &MatchConfig) -> Result<()>
where
    G: GameState + Display,
    Gen: MoveGenerator<G>,
    Gen::Move: Display,
{
    let stop = Arc::new(AtomicBool::new(false));
    let mut engines = Player::ALL.map(|_| {
        SearchEngine::new(SearchControl::new_deferred(Arc::clone(&stop), config.move_time()))
    });

    for ply in 0..config.max_moves {
        let player = state.current_player();
        let engine = &mut engines[player.index()];

        let Some(mv) = best_move(engine, &mut state, generator, config.depth)? else {
            info!(ply, "no legal moves left");
            break;
        };

        let value = engine.killer().map_or(0.0, |k| k.value());
        mv.apply(&mut state);
        info!(
            ply,
            %player,
            mv = %mv,
            value,
            nodes = engine.stats().nodes,
            position = %state,
            "move played"
        );
    }

    let scores = state.evaluate(0);
    println!("{state}");
    println!("final scores: {} - {}", scores[0], scores[1]);
    Ok(())
}

/// Search at `depth`, retrying one ply shallower each time the clock runs out.
fn best_move<G, Gen>(
    engine: &mut SearchEngine<Gen::Move, SearchControl>,
    state: &mut G,
    generator: &Gen,
    depth: u8,
) -> Result<Option<Gen::Move>>
where
    G: GameState,
    Gen: MoveGenerator<G>,
{
    let mut depth = depth;
    loop {
        engine.deadline().activate();
        match engine.search(state, generator, depth) {
            Ok(mv) => return Ok(mv),
            Err(SearchError::Timeout { .. }) if depth > 1 => {
                warn!(depth, "search timed out, retrying shallower");
                depth -= 1;
            }
            Err(err) => return Err(err).context("search failed"),
        }
    }
}
