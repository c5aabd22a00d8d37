//! # Entities
//!
//! Everything that can be placed on a floor or carried: actors and items.
//! Entities live in an [`EntityArena`] and are referred to by [`EntityId`];
//! a [`Grid`](crate::Grid) or an [`Inventory`] owns an entity by holding its
//! handle, never the entity itself.

use crate::config;
use crate::game::color::{self, Rgb};
use crate::game::{Ai, Consumable, EntityId, Equipment, Equippable, Fighter, Inventory, Level, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

/// Draw order. Lower ranks are drawn first so actors paint over corpses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// Parts only actors carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// `None` once the actor is dead
    pub ai: Option<Ai>,
    pub fighter: Fighter,
    pub inventory: Inventory,
    pub level: Level,
    pub equipment: Equipment,
}

/// Parts only items carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Actor(Actor),
    Item(Item),
}

/// A placeable thing. `position` is only meaningful while a grid owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    /// Builds a living actor. Actors always block movement.
    pub fn new_actor(name: &str, glyph: char, color: Rgb, actor: Actor) -> Self {
        Self {
            position: Position::origin(),
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(actor),
        }
    }

    /// Builds an item. Items never block movement.
    pub fn new_item(name: &str, glyph: char, color: Rgb, item: Item) -> Self {
        Self {
            position: Position::origin(),
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(item),
        }
    }

    /// The player template.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::Entity;
    ///
    /// let player = Entity::player();
    /// assert!(player.is_alive());
    /// assert_eq!(player.actor().unwrap().fighter.hp(), 30);
    /// ```
    pub fn player() -> Self {
        Self::new_actor(
            "Player",
            '@',
            color::WHITE,
            Actor {
                ai: Some(Ai::hostile()),
                fighter: Fighter::new(30, 2, 5),
                inventory: Inventory::new(config::PLAYER_INVENTORY_CAPACITY),
                level: Level::new(200, 150, 0),
                equipment: Equipment::default(),
            },
        )
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn item(&self) -> Option<&Item> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    /// An actor is alive while it has an AI.
    pub fn is_alive(&self) -> bool {
        self.actor().map_or(false, |actor| actor.ai.is_some())
    }

    /// Rewrites a dead actor as its corpse.
    pub(crate) fn become_corpse(&mut self) {
        self.glyph = '%';
        self.color = Rgb::new(191, 0, 0);
        self.blocks_movement = false;
        self.render_order = RenderOrder::Corpse;
        self.name = format!("remains of {}", self.name);
        if let Some(actor) = self.actor_mut() {
            actor.ai = None;
        }
    }
}

/// Owner of every entity in the game, keyed by handle.
///
/// Iteration is in handle order, which keeps turn resolution deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityArena {
    next_id: u32,
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entity and returns its fresh handle.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(&id, entity)| (id, entity))
    }

    /// Actor parts of `id`. Panics if `id` is not an actor.
    pub fn actor(&self, id: EntityId) -> &Actor {
        match self[id].actor() {
            Some(actor) => actor,
            None => panic!("entity {id} is not an actor"),
        }
    }

    /// Mutable actor parts of `id`. Panics if `id` is not an actor.
    pub fn actor_mut(&mut self, id: EntityId) -> &mut Actor {
        match self[id].actor_mut() {
            Some(actor) => actor,
            None => panic!("entity {id} is not an actor"),
        }
    }

    /// Sum of (power, defense) bonuses from equipped items.
    pub fn equipment_bonus(&self, equipment: &Equipment) -> (i32, i32) {
        equipment
            .equipped()
            .filter_map(|item| self.get(item)?.item()?.equippable)
            .fold((0, 0), |(power, defense), e| {
                (power + e.power_bonus, defense + e.defense_bonus)
            })
    }

    /// Effective attack power: base plus equipment.
    pub fn power(&self, id: EntityId) -> i32 {
        let actor = self.actor(id);
        actor.fighter.base_power + self.equipment_bonus(&actor.equipment).0
    }

    /// Effective defense: base plus equipment.
    pub fn defense(&self, id: EntityId) -> i32 {
        let actor = self.actor(id);
        actor.fighter.base_defense + self.equipment_bonus(&actor.equipment).1
    }
}

impl Index<EntityId> for EntityArena {
    type Output = Entity;

    fn index(&self, id: EntityId) -> &Entity {
        match self.entities.get(&id) {
            Some(entity) => entity,
            None => panic!("entity {id} is not in the arena"),
        }
    }
}

impl IndexMut<EntityId> for EntityArena {
    fn index_mut(&mut self, id: EntityId) -> &mut Entity {
        match self.entities.get_mut(&id) {
            Some(entity) => entity,
            None => panic!("entity {id} is not in the arena"),
        }
    }
}
