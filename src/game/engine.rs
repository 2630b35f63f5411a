use super::{
    action::{Direction, MoveQueue},
    config::GameConfig,
    placer::ApplePlacer,
    state::{GameState, Position, Snake},
};

/// What happened during a tick, for presenters that want to react to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the head landed on the apple
    pub ate_apple: bool,
    /// Whether the head ran into the body (the snake is now empty)
    pub crashed: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub state: GameState,
    pub info: StepInfo,
}

/// The game engine. Holds only immutable configuration; every operation
/// takes a state by reference and returns a new one.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: no snake yet, heading east, apple at its start cell
    pub fn initial_state(&self) -> GameState {
        GameState::new(
            self.config.cols,
            self.config.rows,
            MoveQueue::new(Direction::East),
            Snake::empty(),
            self.config.apple_start,
        )
    }

    /// Advance the game by one tick.
    ///
    /// Every field of the new state is derived from `state` alone, never
    /// from another freshly computed field.
    pub fn next_state<P: ApplePlacer + ?Sized>(
        &self,
        state: &GameState,
        placer: &mut P,
    ) -> GameState {
        GameState {
            cols: state.cols,
            rows: state.rows,
            moves: self.next_moves(state),
            snake: self.next_snake(state),
            apple: self.next_apple(state, placer),
        }
    }

    /// Queue `direction` unless it would reverse the current heading.
    /// Rejected moves return an unchanged copy of `state`.
    pub fn add_move(&self, state: &GameState, direction: Direction) -> GameState {
        if !self.valid_move(direction, state) {
            return state.clone();
        }

        GameState {
            moves: state.moves.pushed(direction),
            ..state.clone()
        }
    }

    /// [`next_state`](Self::next_state) plus what happened on the way
    pub fn step<P: ApplePlacer + ?Sized>(&self, state: &GameState, placer: &mut P) -> StepResult {
        let info = StepInfo {
            ate_apple: !self.will_crash(state) && self.will_eat(state),
            crashed: self.will_crash(state),
        };

        StepResult {
            state: self.next_state(state, placer),
            info,
        }
    }

    /// Heading applied this tick
    pub fn next_move_delta(&self, state: &GameState) -> Direction {
        state.moves.current()
    }

    /// Where the head goes next. An empty snake restarts at the start cell,
    /// folded onto the state's own board.
    pub fn next_head(&self, state: &GameState) -> Position {
        match state.snake.head() {
            None => self
                .config
                .snake_start
                .wrapped_by(Position::new(0, 0), state.cols, state.rows),
            Some(head) => {
                head.wrapped_in_direction(self.next_move_delta(state), state.cols, state.rows)
            }
        }
    }

    pub fn will_eat(&self, state: &GameState) -> bool {
        self.next_head(state) == state.apple
    }

    /// Whether the next head hits any current segment, tail included
    pub fn will_crash(&self, state: &GameState) -> bool {
        state.snake.occupies(self.next_head(state))
    }

    pub fn next_snake(&self, state: &GameState) -> Snake {
        if self.will_crash(state) {
            return Snake::empty();
        }

        state
            .snake
            .advanced(self.next_head(state), self.will_eat(state))
    }

    /// Respawn the apple if it gets eaten.
    ///
    /// The draw covers `[0, cols-1) x [0, rows-1)` and may land on the body.
    pub fn next_apple<P: ApplePlacer + ?Sized>(&self, state: &GameState, placer: &mut P) -> Position {
        if !self.will_eat(state) {
            return state.apple;
        }

        placer.place((state.cols - 1).max(1), (state.rows - 1).max(1))
    }

    pub fn next_moves(&self, state: &GameState) -> MoveQueue {
        state.moves.advanced()
    }

    /// A move is valid unless it points straight back along the current heading
    pub fn valid_move(&self, direction: Direction, state: &GameState) -> bool {
        !state.moves.current().is_opposite(direction)
    }
}
