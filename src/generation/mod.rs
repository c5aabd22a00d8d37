//! # Generation Module
//!
//! Procedural content generation: floor layouts, monsters and items.
//!
//! Floors are carved by [`RoomCorridorGenerator`]; what lives on them is drawn
//! from depth-gated tables in [`encounters`] and [`items`].

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config;
use crate::game::Position;
use crate::{TombsError, TombsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters every floor is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    pub map_width: i32,
    pub map_height: i32,
    /// Number of room placement attempts per floor
    pub max_rooms: u32,
    /// Smallest room side, walls included
    pub room_min_size: i32,
    /// Largest room side, walls included
    pub room_max_size: i32,
    /// Upper bound on the per-room monster count at any depth
    pub max_monsters_per_room: u32,
    /// Upper bound on the per-room item count at any depth
    pub max_items_per_room: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert!(config.room_min_size >= 3);
    /// assert!(config.room_max_size >= config.room_min_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::DEFAULT_DUNGEON_WIDTH,
            map_height: config::DEFAULT_DUNGEON_HEIGHT,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            max_monsters_per_room: 5,
            max_items_per_room: 2,
        }
    }

    /// Creates a configuration for testing with smaller, simpler floors.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 30,
            max_rooms: 8,
            room_min_size: 4,
            room_max_size: 7,
            max_monsters_per_room: 5,
            max_items_per_room: 2,
        }
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> TombsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every floor generated from this config gets at least one room.
    ///
    /// The first room attempt never collides with anything, so it is enough that
    /// one attempt is made and that any sampled room fits on the map.
    pub fn validate(&self) -> TombsResult<()> {
        if self.max_rooms == 0 {
            return Err(TombsError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        if self.room_min_size < 3 {
            return Err(TombsError::InvalidConfig(format!(
                "room_min_size {} leaves no interior",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(TombsError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.room_max_size >= self.map_width || self.room_max_size >= self.map_height {
            return Err(TombsError::InvalidConfig(format!(
                "rooms up to {} do not fit a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room. `(x1, y1)` and `(x2, y2)` are opposite wall corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    /// Creates a room anchored at `(x, y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{Position, Room};
    ///
    /// let room = Room::new(10, 10, 6, 6);
    /// assert_eq!(room.center(), Position::new(13, 13));
    /// assert!(room.intersects(&Room::new(12, 12, 6, 6)));
    /// assert!(!room.intersects(&Room::new(30, 30, 6, 6)));
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Carvable cells: everything inside the one-cell wall border.
    pub fn inner(&self) -> impl Iterator<Item = Position> {
        let (x1, x2, y2) = (self.x1, self.x2, self.y2);
        ((self.y1 + 1)..y2).flat_map(move |y| ((x1 + 1)..x2).map(move |x| Position::new(x, y)))
    }

    pub fn contains_inner(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// Bounding-box overlap test with inclusive bounds.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Helpers shared by the content tables.
pub mod utils {
    use crate::generation::GenerationConfig;
    use rand::distributions::{Distribution, WeightedIndex};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Creates the RNG a game with `config` starts from.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Value of the last threshold at or below `depth`, or 0 if none applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::generation::utils::step_value;
    ///
    /// let table = [(1, 2), (4, 3), (6, 5)];
    /// assert_eq!(step_value(&table, 0), 0);
    /// assert_eq!(step_value(&table, 3), 2);
    /// assert_eq!(step_value(&table, 9), 5);
    /// ```
    pub fn step_value(table: &[(u32, u32)], depth: u32) -> u32 {
        table
            .iter()
            .take_while(|(threshold, _)| *threshold <= depth)
            .last()
            .map_or(0, |(_, value)| *value)
    }

    /// Weights of every entry unlocked at `depth`.
    ///
    /// Thresholds are visited in ascending order; a later threshold replaces the
    /// weight of an entry an earlier one introduced.
    pub fn eligible_weights<T: Copy + PartialEq>(
        table: &[(u32, &[(T, u32)])],
        depth: u32,
    ) -> Vec<(T, u32)> {
        let mut weights: Vec<(T, u32)> = Vec::new();
        for (_, entries) in table.iter().take_while(|(threshold, _)| *threshold <= depth) {
            for &(entry, weight) in entries.iter() {
                match weights.iter_mut().find(|(existing, _)| *existing == entry) {
                    Some(slot) => slot.1 = weight,
                    None => weights.push((entry, weight)),
                }
            }
        }
        weights
    }

    /// Draws `count` entries with replacement, proportionally to weight.
    pub fn choose_weighted<T: Copy, R: Rng>(weights: &[(T, u32)], count: u32, rng: &mut R) -> Vec<T> {
        if count == 0 {
            return Vec::new();
        }
        let Ok(distribution) = WeightedIndex::new(weights.iter().map(|(_, w)| *w)) else {
            return Vec::new();
        };
        (0..count)
            .map(|_| weights[distribution.sample(rng)].0)
            .collect()
    }
}
