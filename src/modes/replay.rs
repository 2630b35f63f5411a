//! Headless replay
//!
//! Feeds a scripted list of turns through the engine, one per tick, with a
//! seeded apple placer. The same script and seed always produce the same
//! final state.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::game::{ApplePlacer, Direction, GameConfig, GameEngine, GameState};

/// Parse a move script such as `"EESSW"`. Whitespace is ignored.
pub fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(index, letter)| match Direction::from_letter(letter) {
            Some(direction) => Ok(direction),
            None => bail!("Unknown move '{letter}' at position {index}, expected one of N, S, E, W"),
        })
        .collect()
}

/// Summary of a finished replay, printed as JSON by the replay command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub state: GameState,
    pub ticks: u32,
    pub apples_eaten: u32,
    pub crashes: u32,
    pub rejected_moves: u32,
}

pub struct ReplayMode<P> {
    engine: GameEngine,
    placer: P,
    moves: Vec<Direction>,
    ticks: u32,
}

impl<P: ApplePlacer> ReplayMode<P> {
    pub fn new(config: GameConfig, placer: P, moves: Vec<Direction>, ticks: u32) -> Self {
        Self {
            engine: GameEngine::new(config),
            placer,
            moves,
            ticks,
        }
    }

    /// Run every tick. Tick `i` first offers scripted move `i` (if any) and
    /// then advances the state.
    pub fn run(&mut self) -> ReplayReport {
        let mut state = self.engine.initial_state();
        let mut apples_eaten = 0;
        let mut crashes = 0;
        let mut rejected_moves = 0;

        for tick in 0..self.ticks {
            if let Some(&direction) = self.moves.get(tick as usize) {
                let queued = self.engine.add_move(&state, direction);
                if queued == state {
                    tracing::debug!(tick, ?direction, "Move rejected");
                    rejected_moves += 1;
                }
                state = queued;
            }

            let result = self.engine.step(&state, &mut self.placer);
            if result.info.ate_apple {
                apples_eaten += 1;
            }
            if result.info.crashed {
                tracing::debug!(tick, length = state.snake.len(), "Snake crashed");
                crashes += 1;
            }
            state = result.state;

            tracing::trace!(tick, head = ?state.snake.head(), apple = ?state.apple, "Tick");
        }

        tracing::info!(
            ticks = self.ticks,
            length = state.snake.len(),
            apples_eaten,
            crashes,
            rejected_moves,
            "Replay finished"
        );

        ReplayReport {
            state,
            ticks: self.ticks,
            apples_eaten,
            crashes,
            rejected_moves,
        }
    }
}
