//! # World Representation
//!
//! Tiles, the per-floor [`Grid`], and the [`World`] that tracks depth and the
//! parameters used to generate each new floor.

use crate::game::color::{self, Rgb};
use crate::game::{EntityId, Position};
use crate::generation::GenerationConfig;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Base light background of floor tiles before per-cell jitter.
const FLOOR_LIGHT_BG: Rgb = Rgb::new(200, 180, 50);

/// Standard deviation of the per-channel floor jitter.
const FLOOR_JITTER_SIGMA: f64 = 10.0;

/// How a tile looks in one lighting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGraphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl TileGraphic {
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Graphic for cells that have never been seen.
pub const SHROUD: TileGraphic = TileGraphic::new(' ', color::WHITE, color::BLACK);

/// Static properties of one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether actors can stand here
    pub walkable: bool,
    /// Whether this tile lets light through
    pub transparent: bool,
    /// Appearance when explored but out of view
    pub dark: TileGraphic,
    /// Appearance when in view
    pub light: TileGraphic,
}

impl Tile {
    pub fn wall() -> Self {
        Self {
            walkable: false,
            transparent: false,
            dark: TileGraphic::new('#', Rgb::new(100, 100, 100), Rgb::new(0, 0, 100)),
            light: TileGraphic::new('#', color::WHITE, Rgb::new(130, 110, 50)),
        }
    }

    pub fn floor() -> Self {
        Self {
            walkable: true,
            transparent: true,
            dark: TileGraphic::new(' ', color::WHITE, Rgb::new(50, 50, 150)),
            light: TileGraphic::new(' ', color::WHITE, FLOOR_LIGHT_BG),
        }
    }

    /// A floor tile whose lit background is jittered with Gaussian noise.
    pub fn random_floor<R: Rng>(rng: &mut R) -> Self {
        let mut jitter = |channel: u8| {
            let noise: f64 = rng.sample(StandardNormal);
            (channel as f64 + noise * FLOOR_JITTER_SIGMA)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        let bg = Rgb::new(
            jitter(FLOOR_LIGHT_BG.0),
            jitter(FLOOR_LIGHT_BG.1),
            jitter(FLOOR_LIGHT_BG.2),
        );

        let mut tile = Self::floor();
        tile.light.bg = bg;
        tile
    }

    pub fn down_stairs() -> Self {
        Self {
            walkable: true,
            transparent: true,
            dark: TileGraphic::new('>', Rgb::new(0, 0, 100), Rgb::new(50, 50, 150)),
            light: TileGraphic::new('>', color::WHITE, FLOOR_LIGHT_BG),
        }
    }
}

/// One dungeon floor: tiles, lighting state and the handles of entities lying on it.
///
/// Dimensions are fixed at construction. Tiles are only rewritten by the
/// generator; during play only the visibility masks and the entity list change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    /// The single cell that leads to the next floor
    pub downstairs: Option<Position>,
    /// Entities owned by this floor, in placement order
    pub entities: Vec<EntityId>,
}

impl Grid {
    /// Creates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{Grid, Position};
    ///
    /// let grid = Grid::new(10, 5);
    /// assert!(grid.in_bounds(Position::new(9, 4)));
    /// assert!(!grid.in_bounds(Position::new(10, 0)));
    /// assert!(!grid.is_walkable(Position::new(3, 3)));
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let cells = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); cells],
            visible: vec![false; cells],
            explored: vec![false; cells],
            downstairs: None,
            entities: Vec::new(),
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Overwrites a cell. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).map_or(false, |t| t.walkable)
    }

    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile(pos).map_or(false, |t| t.transparent)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.index(pos).map_or(false, |i| self.visible[i])
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.index(pos).map_or(false, |i| self.explored[i])
    }

    /// Replaces the visible set and folds it into the explored set.
    pub fn set_visible(&mut self, visible: Vec<bool>) {
        debug_assert_eq!(visible.len(), self.tiles.len());
        for (explored, &seen) in self.explored.iter_mut().zip(&visible) {
            *explored |= seen;
        }
        self.visible = visible;
    }

    /// Iterates every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    pub fn add_entity(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    /// Removes an entity handle from the floor, returning whether it was present.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&e| e != id);
        before != self.entities.len()
    }

    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }
}

/// Depth tracking plus the parameters every new floor is generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub generation: GenerationConfig,
    /// Depth of the floor currently being played, starting at 1
    pub current_floor: u32,
}

impl World {
    pub fn new(generation: GenerationConfig) -> Self {
        Self {
            generation,
            current_floor: 0,
        }
    }
}
