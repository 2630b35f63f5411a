//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! States are immutable values: the engine only ever builds new ones.

pub mod action;
pub mod config;
pub mod engine;
pub mod placer;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, MoveQueue};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use placer::{ApplePlacer, RandomPlacer};
pub use state::{GameState, Position, Snake};
