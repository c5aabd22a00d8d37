//! # Game Module
//!
//! Core game state management, world representation, and entity systems.
//!
//! This module contains the fundamental building blocks of the Tombs roguelike:
//! - The grid of tiles and the world/depth counter
//! - The entity arena and the components attached to actors and items
//! - Actions, consumables and AI strategies
//! - The turn engine, message log and save files

pub mod actions;
pub mod ai;
pub mod color;
pub mod components;
pub mod consumables;
pub mod entities;
pub mod messages;
pub mod save;
pub mod state;
pub mod world;

pub use actions::*;
pub use ai::*;
pub use color::Rgb;
pub use components::*;
pub use consumables::*;
pub use entities::*;
pub use messages::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on a floor.
///
/// # Examples
///
/// ```
/// use tombs::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Chebyshev distance to another position.
    ///
    /// This is the number of 8-way steps between the two cells and is the
    /// metric used for melee reach and area effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, -4);
    /// assert_eq!(pos1.chebyshev_distance(pos2), 4);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// The eight compass steps a piece can take on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// Unit step for this direction; y grows downwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Southwest.to_delta(), Position::new(-1, 1));
    /// ```
    pub fn to_delta(self) -> Position {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::Northeast => (1, -1),
            Direction::East => (1, 0),
            Direction::Southeast => (1, 1),
            Direction::South => (0, 1),
            Direction::Southwest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, -1),
        };
        Position::new(dx, dy)
    }

    /// All directions, clockwise from north.
    pub fn all() -> [Direction; 8] {
        use Direction::*;
        [North, Northeast, East, Southeast, South, Southwest, West, Northwest]
    }

    pub fn is_diagonal(self) -> bool {
        let delta = self.to_delta();
        delta.x != 0 && delta.y != 0
    }
}

/// Handle for an entity stored in the [`EntityArena`].
///
/// Handles are assigned sequentially and never reused within one game, so
/// ordering by handle is ordering by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_chebyshev_distance() {
        let pos = Position::new(2, 2);
        assert_eq!(pos.chebyshev_distance(Position::new(2, 2)), 0);
        assert_eq!(pos.chebyshev_distance(Position::new(3, 3)), 1);
        assert_eq!(pos.chebyshev_distance(Position::new(7, 4)), 5);
        assert_eq!(pos.chebyshev_distance(Position::new(-1, 8)), 6);
    }

    #[test]
    fn test_position_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.adjacent_positions();
        assert_eq!(adjacent.len(), 8);
        assert!(adjacent.contains(&Position::new(4, 4)));
        assert!(adjacent.contains(&Position::new(6, 6)));
        assert!(!adjacent.contains(&pos));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_directions_are_distinct_unit_steps() {
        let deltas: Vec<Position> = Direction::all().iter().map(|d| d.to_delta()).collect();
        for (i, delta) in deltas.iter().enumerate() {
            assert_eq!(delta.chebyshev_distance(Position::origin()), 1);
            assert!(!deltas[i + 1..].contains(delta));
        }
        assert_eq!(Direction::all().iter().filter(|d| d.is_diagonal()).count(), 4);
    }

    #[test]
    fn test_entity_id_ordering() {
        assert!(EntityId(1) < EntityId(2));
        assert_eq!(EntityId(7).to_string(), "#7");
    }
}
