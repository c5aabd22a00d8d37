//! # Dungeon Generation
//!
//! Room-and-corridor floor layouts.
//!
//! Rooms are placed at random and dropped if they overlap an earlier one. Each
//! accepted room is joined to the previous one by an L-shaped tunnel, stocked
//! with monsters and items for the current depth, and the stairs end up in the
//! center of the last room placed.

use crate::game::{EntityArena, EntityId, Grid, Position, Tile};
use crate::generation::utils::choose_weighted;
use crate::generation::{
    item_weights, max_items_for_floor, max_monsters_for_floor, monster_weights, GenerationConfig,
    Room,
};
use crate::utils::bresenham_line;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;

/// A generated floor together with the rooms it was carved from.
#[derive(Debug, Clone)]
pub struct GeneratedFloor {
    pub grid: Grid,
    /// Accepted rooms in placement order
    pub rooms: Vec<Room>,
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates floors by:
/// 1. Placing rooms randomly, rejecting any that overlap
/// 2. Connecting each room to the previous one with an L-shaped tunnel
/// 3. Spawning depth-appropriate monsters and items in every room
/// 4. Putting the down stairs in the last room
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use tombs::{Entity, EntityArena, GenerationConfig, RoomCorridorGenerator};
    ///
    /// let mut entities = EntityArena::new();
    /// let player = entities.insert(Entity::player());
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let grid = RoomCorridorGenerator::new().generate(
    ///     &GenerationConfig::for_testing(1),
    ///     1,
    ///     player,
    ///     &mut entities,
    ///     &mut rng,
    /// );
    /// assert!(grid.downstairs.is_some());
    /// assert!(grid.is_walkable(entities[player].position));
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Generates floor `depth` and places `player` in the first room.
    pub fn generate(
        &self,
        config: &GenerationConfig,
        depth: u32,
        player: EntityId,
        entities: &mut EntityArena,
        rng: &mut StdRng,
    ) -> Grid {
        self.generate_floor(config, depth, player, entities, rng).grid
    }

    /// Like [`generate`](Self::generate), but also returns the accepted rooms.
    pub fn generate_floor(
        &self,
        config: &GenerationConfig,
        depth: u32,
        player: EntityId,
        entities: &mut EntityArena,
        rng: &mut StdRng,
    ) -> GeneratedFloor {
        let mut grid = Grid::new(config.map_width, config.map_height);
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..config.max_rooms {
            let width = rng.gen_range(config.room_min_size..=config.room_max_size);
            let height = rng.gen_range(config.room_min_size..=config.room_max_size);
            let x = rng.gen_range(0..=config.map_width - width - 1);
            let y = rng.gen_range(0..=config.map_height - height - 1);
            let room = Room::new(x, y, width, height);

            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            for position in room.inner() {
                grid.set_tile(position, Tile::random_floor(rng));
            }

            match rooms.last() {
                None => {
                    entities[player].position = room.center();
                    grid.add_entity(player);
                }
                Some(previous) => {
                    for position in tunnel_between(previous.center(), room.center(), rng) {
                        grid.set_tile(position, Tile::random_floor(rng));
                    }
                }
            }

            self.populate_room(&room, &mut grid, depth, config, entities, rng);
            grid.downstairs = Some(room.center());
            rooms.push(room);
        }

        match grid.downstairs {
            Some(stairs) => grid.set_tile(stairs, Tile::down_stairs()),
            None => warn!("Floor {depth} has no rooms; check the generation config"),
        }
        debug!(
            "Generated floor {depth}: {} rooms, {} entities",
            rooms.len(),
            grid.entities.len()
        );

        GeneratedFloor { grid, rooms }
    }

    /// Spawns monsters and items on random interior cells of `room`.
    ///
    /// A spawn whose cell is already occupied by anything is dropped, not moved.
    fn populate_room(
        &self,
        room: &Room,
        grid: &mut Grid,
        depth: u32,
        config: &GenerationConfig,
        entities: &mut EntityArena,
        rng: &mut StdRng,
    ) {
        let monster_cap = max_monsters_for_floor(depth).min(config.max_monsters_per_room);
        let item_cap = max_items_for_floor(depth).min(config.max_items_per_room);
        let monster_count = rng.gen_range(0..=monster_cap);
        let item_count = rng.gen_range(0..=item_cap);

        let monsters = choose_weighted(&monster_weights(depth), monster_count, rng);
        let items = choose_weighted(&item_weights(depth), item_count, rng);
        let spawns = monsters
            .into_iter()
            .map(|kind| kind.build())
            .chain(items.into_iter().map(|kind| kind.build()));

        for template in spawns {
            let position = Position::new(
                rng.gen_range(room.x1 + 1..=room.x2 - 1),
                rng.gen_range(room.y1 + 1..=room.y2 - 1),
            );
            let occupied = grid
                .entities
                .iter()
                .any(|&id| entities[id].position == position);
            if occupied {
                debug!("Dropped {} spawn at occupied {:?}", template.name, position);
                continue;
            }
            let id = entities.insert(template.at(position));
            grid.add_entity(id);
        }
    }
}

/// Cells of an L-shaped tunnel from `start` to `end`, both ends included.
///
/// The corner is `(end.x, start.y)` or `(start.x, end.y)` with equal odds.
pub fn tunnel_between<R: Rng>(start: Position, end: Position, rng: &mut R) -> Vec<Position> {
    let corner = if rng.gen_bool(0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };
    let mut cells = bresenham_line(start, corner);
    cells.extend(bresenham_line(corner, end).into_iter().skip(1));
    cells
}
