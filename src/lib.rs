//! Torus Snake - a snake game on a wrap-around board
//!
//! This library provides:
//! - A pure state-transition engine (game module)
//! - Keyboard mapping for the terminal front end (input module)
//! - Board rendering with ratatui (render module)
//! - Session metrics (metrics module)
//! - Interactive and headless replay drivers (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
