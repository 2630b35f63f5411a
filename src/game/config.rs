use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns on the board
    pub cols: i32,
    /// Number of rows on the board
    pub rows: i32,
    /// Cell where the head appears when the snake has no segments
    pub snake_start: Position,
    /// Apple position in a fresh game
    pub apple_start: Position,
    /// Milliseconds between ticks (presenter only; the engine ignores it)
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 14,
            snake_start: Position::new(2, 2),
            apple_start: Position::new(16, 2),
            tick_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the board is usable: at least 2x2, start cells on the board,
    /// and a non-zero tick.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.cols >= 2 && self.rows >= 2,
            "Board must be at least 2x2, got {}x{}",
            self.cols,
            self.rows
        );
        ensure!(
            self.contains(self.snake_start),
            "Snake start {:?} is outside the {}x{} board",
            self.snake_start,
            self.cols,
            self.rows
        );
        ensure!(
            self.contains(self.apple_start),
            "Apple start {:?} is outside the {}x{} board",
            self.apple_start,
            self.cols,
            self.rows
        );
        ensure!(self.tick_ms > 0, "Tick interval must be positive");
        Ok(())
    }

    fn contains(&self, pos: Position) -> bool {
        (0..self.cols).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 20);
        assert_eq!(config.rows, 14);
        assert_eq!(config.snake_start, Position::new(2, 2));
        assert_eq!(config.apple_start, Position::new(16, 2));
        assert_eq!(config.tick_ms, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(30, 25);
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 25);
        assert_eq!(config.tick_ms, 50);
    }

    #[test]
    fn test_validate_rejects_tiny_board() {
        let mut config = GameConfig::new(1, 14);
        config.snake_start = Position::new(0, 0);
        config.apple_start = Position::new(0, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_offboard_start() {
        // Default apple sits at column 16
        let config = GameConfig::new(10, 10);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Apple start"));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "cols": 30, "tick_ms": 80 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 14);
        assert_eq!(config.tick_ms, 80);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
