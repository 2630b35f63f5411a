use serde::{Deserialize, Serialize};

use super::action::{Direction, MoveQueue};

/// A position on the game grid, also used as a movement delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by a delta, wrapping around a `cols` x `rows` torus.
    ///
    /// Uses euclidean remainder so stepping left of column 0 lands on
    /// `cols - 1` rather than a negative index.
    pub fn wrapped_by(&self, delta: Position, cols: i32, rows: i32) -> Self {
        Self {
            x: (self.x + delta.x).rem_euclid(cols),
            y: (self.y + delta.y).rem_euclid(rows),
        }
    }

    /// Move position one step in a direction on a wrapping grid
    pub fn wrapped_in_direction(&self, direction: Direction, cols: i32, rows: i32) -> Self {
        self.wrapped_by(direction.delta(), cols, rows)
    }
}

/// The snake, head first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snake {
    pub body: Vec<Position>,
}

impl Snake {
    pub fn new(body: Vec<Position>) -> Self {
        Self { body }
    }

    /// Snake with no segments, as before the first tick or right after a crash
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// New snake with `head` prepended; the last segment is dropped unless growing
    pub fn advanced(&self, head: Position, grow: bool) -> Self {
        let keep = if grow {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };

        let mut body = Vec::with_capacity(keep + 1);
        body.push(head);
        body.extend_from_slice(&self.body[..keep]);
        Self { body }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

/// Complete game state. Treated as an immutable value: every transition
/// builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub cols: i32,
    pub rows: i32,
    pub moves: MoveQueue,
    pub snake: Snake,
    pub apple: Position,
}

impl GameState {
    pub fn new(cols: i32, rows: i32, moves: MoveQueue, snake: Snake, apple: Position) -> Self {
        Self {
            cols,
            rows,
            moves,
            snake,
            apple,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrapping() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrapped_by(Position::new(1, 0), 20, 14), Position::new(6, 5));
        assert_eq!(pos.wrapped_by(Position::new(0, -1), 20, 14), Position::new(5, 4));

        let corner = Position::new(0, 0);
        assert_eq!(
            corner.wrapped_in_direction(Direction::West, 20, 14),
            Position::new(19, 0)
        );
        assert_eq!(
            corner.wrapped_in_direction(Direction::North, 20, 14),
            Position::new(0, 13)
        );

        let far = Position::new(19, 13);
        assert_eq!(
            far.wrapped_in_direction(Direction::East, 20, 14),
            Position::new(0, 13)
        );
        assert_eq!(
            far.wrapped_in_direction(Direction::South, 20, 14),
            Position::new(19, 0)
        );
    }

    #[test]
    fn test_snake_advance() {
        let snake = Snake::new(vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ]);

        let moved = snake.advanced(Position::new(6, 5), false);
        assert_eq!(moved.len(), 3);
        assert_eq!(moved.head(), Some(Position::new(6, 5)));
        assert_eq!(moved.body.last(), Some(&Position::new(4, 5)));

        let grown = snake.advanced(Position::new(6, 5), true);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown.body.last(), Some(&Position::new(3, 5)));

        // Input untouched
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_empty_snake_advance() {
        let started = Snake::empty().advanced(Position::new(2, 2), false);
        assert_eq!(started.body, vec![Position::new(2, 2)]);
    }

    #[test]
    fn test_occupancy() {
        let snake = Snake::new(vec![Position::new(5, 5), Position::new(4, 5)]);
        assert!(snake.occupies(Position::new(5, 5))); // head
        assert!(snake.occupies(Position::new(4, 5))); // body
        assert!(!snake.occupies(Position::new(10, 10)));
        assert_eq!(Snake::empty().head(), None);
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            20,
            14,
            MoveQueue::new(Direction::East),
            Snake::empty(),
            Position::new(16, 2),
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 13)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 14)));
    }
}
