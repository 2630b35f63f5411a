use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{ApplePlacer, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal.
///
/// Owns the only mutable copy of the current state; the engine just maps
/// one state to the next.
pub struct HumanMode {
    engine: GameEngine,
    placer: Box<dyn ApplePlacer + Send>,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, placer: Box<dyn ApplePlacer + Send>) -> Self {
        let engine = GameEngine::new(config);
        let state = engine.initial_state();

        Self {
            engine,
            placer,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        tracing::info!(
            cols = self.state.cols,
            rows = self.state.rows,
            tick_ms = self.engine.config().tick_ms,
            "Game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        tracing::info!(
            best_length = self.metrics.best_length,
            crashes = self.metrics.crashes,
            "Game finished"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_ms);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            self.apply_key_action(self.input_handler.handle_key_event(key));
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.state = self.engine.add_move(&self.state, direction);
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let before = self.state.snake.len();
        let result = self.engine.step(&self.state, &mut self.placer);
        self.state = result.state;

        // An empty snake after a non-empty one is the only crash signal
        if before > 0 && self.state.snake.is_empty() {
            tracing::info!(length = before, "Snake crashed");
            self.metrics.on_crash(before);
        } else {
            self.metrics.on_length(self.state.snake.len());
        }

        if result.info.ate_apple {
            tracing::debug!(
                length = self.state.snake.len(),
                apple_x = self.state.apple.x,
                apple_y = self.state.apple.y,
                "Apple eaten"
            );
        }
    }

    fn reset_game(&mut self) {
        tracing::info!(length = self.state.snake.len(), "Game restarted");
        self.state = self.engine.initial_state();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, RandomPlacer};

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), Box::new(RandomPlacer::seeded(11)))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state.snake.is_empty());
        assert_eq!(mode.state, mode.engine.initial_state());
    }

    #[test]
    fn test_turn_is_queued() {
        let mut mode = mode();
        mode.apply_key_action(KeyAction::Turn(Direction::South));
        mode.apply_key_action(KeyAction::Turn(Direction::West));

        assert_eq!(
            mode.state.moves.to_vec(),
            vec![Direction::East, Direction::South, Direction::West]
        );
    }

    #[test]
    fn test_ticks_move_snake() {
        let mut mode = mode();
        mode.update_game();
        mode.update_game();

        assert_eq!(mode.state.snake.body, vec![Position::new(3, 2)]);
        assert_eq!(mode.metrics.best_length, 1);
    }

    #[test]
    fn test_crash_is_counted() {
        let mut mode = mode();
        mode.state.snake.body = vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)];
        mode.state.moves = crate::game::MoveQueue::new(Direction::West);

        mode.update_game();

        assert!(mode.state.snake.is_empty());
        assert_eq!(mode.metrics.crashes, 1);
        assert_eq!(mode.metrics.best_length, 3);

        // Next tick bootstraps a new head
        mode.update_game();
        assert_eq!(mode.state.snake.len(), 1);
        assert_eq!(mode.metrics.crashes, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.update_game();
        mode.apply_key_action(KeyAction::Turn(Direction::North));
        mode.apply_key_action(KeyAction::Restart);

        assert_eq!(mode.state, mode.engine.initial_state());
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        mode.apply_key_action(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
