use serde::{Deserialize, Serialize};

use super::state::Position;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns true if turning from self to other would reverse the snake onto itself
    pub fn is_opposite(&self, other: Direction) -> bool {
        let a = self.delta();
        let b = other.delta();
        a.x + b.x == 0 && a.y + b.y == 0
    }

    /// Returns the unit delta for moving in this direction
    pub fn delta(&self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Parse a single compass letter (`N`, `S`, `E`, `W`, either case)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

/// Pending moves, oldest first. Never empty.
///
/// The first entry is the heading applied on the next tick; later entries
/// are buffered input waiting for their own tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct MoveQueue {
    current: Direction,
    pending: Vec<Direction>,
}

impl MoveQueue {
    /// Queue holding a single heading
    pub fn new(current: Direction) -> Self {
        Self {
            current,
            pending: Vec::new(),
        }
    }

    /// Build a queue from a list; `None` if the list is empty
    pub fn from_moves(moves: &[Direction]) -> Option<Self> {
        let (&current, pending) = moves.split_first()?;
        Some(Self {
            current,
            pending: pending.to_vec(),
        })
    }

    /// Heading consumed by the next tick
    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn len(&self) -> usize {
        1 + self.pending.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        std::iter::once(self.current).chain(self.pending.iter().copied())
    }

    /// Copy of this queue with `direction` appended at the back
    pub fn pushed(&self, direction: Direction) -> Self {
        let mut pending = self.pending.clone();
        pending.push(direction);
        Self {
            current: self.current,
            pending,
        }
    }

    /// Copy of this queue after one tick: drops the consumed heading unless
    /// it is the only one left, in which case it keeps steering.
    pub fn advanced(&self) -> Self {
        match self.pending.split_first() {
            Some((&next, rest)) => Self {
                current: next,
                pending: rest.to_vec(),
            },
            None => self.clone(),
        }
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.iter().collect()
    }
}

impl From<MoveQueue> for Vec<Direction> {
    fn from(queue: MoveQueue) -> Self {
        queue.to_vec()
    }
}

impl TryFrom<Vec<Direction>> for MoveQueue {
    type Error = &'static str;

    fn try_from(moves: Vec<Direction>) -> Result<Self, Self::Error> {
        MoveQueue::from_moves(&moves).ok_or("move queue must not be empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::North.is_opposite(Direction::South));
        assert!(Direction::South.is_opposite(Direction::North));
        assert!(Direction::West.is_opposite(Direction::East));
        assert!(Direction::East.is_opposite(Direction::West));

        assert!(!Direction::North.is_opposite(Direction::West));
        assert!(!Direction::North.is_opposite(Direction::East));
        assert!(!Direction::East.is_opposite(Direction::East));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.delta(), Position::new(0, -1));
        assert_eq!(Direction::South.delta(), Position::new(0, 1));
        assert_eq!(Direction::West.delta(), Position::new(-1, 0));
        assert_eq!(Direction::East.delta(), Position::new(1, 0));
    }

    #[test]
    fn test_from_letter() {
        assert_eq!(Direction::from_letter('n'), Some(Direction::North));
        assert_eq!(Direction::from_letter('W'), Some(Direction::West));
        assert_eq!(Direction::from_letter('x'), None);
    }

    #[test]
    fn test_queue_push_keeps_order() {
        let queue = MoveQueue::new(Direction::East)
            .pushed(Direction::North)
            .pushed(Direction::West);

        assert_eq!(
            queue.to_vec(),
            vec![Direction::East, Direction::North, Direction::West]
        );
        assert_eq!(queue.current(), Direction::East);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_queue_advance() {
        let queue = MoveQueue::new(Direction::East).pushed(Direction::North);

        let once = queue.advanced();
        assert_eq!(once.to_vec(), vec![Direction::North]);

        // Last heading persists
        let twice = once.advanced();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_queue_from_empty_list() {
        assert!(MoveQueue::from_moves(&[]).is_none());
        assert!(serde_json::from_str::<MoveQueue>("[]").is_err());
    }

    #[test]
    fn test_queue_json_shape() {
        let queue = MoveQueue::new(Direction::East).pushed(Direction::South);
        let json = serde_json::to_string(&queue).unwrap();
        assert_eq!(json, r#"["East","South"]"#);
    }
}
