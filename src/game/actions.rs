//! # Actions
//!
//! Every change an actor makes to the world goes through an [`Action`]: an acting
//! entity plus an [`ActionKind`]. `perform` either applies the whole change or
//! returns [`Impossible`] and leaves the world untouched.

use crate::game::color;
use crate::game::{EntityId, GameState, Position};
use serde::{Deserialize, Serialize};

/// A recoverable rejection: the action does not apply to the current state.
///
/// The reason is shown to the player verbatim; no turn is consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Impossible(pub String);

impl Impossible {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Outcome of [`Action::perform`].
pub type ActionResult = Result<(), Impossible>;

/// What an action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Pass the turn
    Wait,
    /// Step by a delta
    Movement { dx: i32, dy: i32 },
    /// Attack the actor at a delta
    Melee { dx: i32, dy: i32 },
    /// Attack if an actor is in the way, otherwise step
    Bump { dx: i32, dy: i32 },
    /// Pick up an item lying on the actor's cell
    Pickup,
    /// Put a carried item on the floor
    Drop { item: EntityId },
    /// Toggle a carried item in or out of its equipment slot
    Equip { item: EntityId },
    /// Activate a carried consumable, optionally at a target cell
    UseItem { item: EntityId, target: Option<Position> },
    /// Descend when standing on the stairs
    TakeStairs,
}

/// An [`ActionKind`] bound to the entity performing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn wait(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Wait)
    }

    pub fn movement(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Movement { dx, dy })
    }

    pub fn melee(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Melee { dx, dy })
    }

    pub fn bump(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Bump { dx, dy })
    }

    pub fn pickup(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Pickup)
    }

    pub fn drop_item(actor: EntityId, item: EntityId) -> Self {
        Self::new(actor, ActionKind::Drop { item })
    }

    pub fn equip(actor: EntityId, item: EntityId) -> Self {
        Self::new(actor, ActionKind::Equip { item })
    }

    pub fn use_item(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Self::new(actor, ActionKind::UseItem { item, target })
    }

    pub fn take_stairs(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::TakeStairs)
    }

    /// Validates and applies the action against `state`.
    pub fn perform(&self, state: &mut GameState) -> ActionResult {
        let actor = self.actor;
        match self.kind {
            ActionKind::Wait => Ok(()),
            ActionKind::Movement { dx, dy } => perform_movement(state, actor, Position::new(dx, dy)),
            ActionKind::Melee { dx, dy } => perform_melee(state, actor, Position::new(dx, dy)),
            ActionKind::Bump { dx, dy } => {
                let delta = Position::new(dx, dy);
                let destination = state.entities[actor].position + delta;
                if state.actor_at(destination).is_some() {
                    perform_melee(state, actor, delta)
                } else {
                    perform_movement(state, actor, delta)
                }
            }
            ActionKind::Pickup => perform_pickup(state, actor),
            ActionKind::Drop { item } => perform_drop(state, actor, item),
            ActionKind::Equip { item } => perform_equip(state, actor, item),
            ActionKind::UseItem { item, target } => perform_use(state, actor, item, target),
            ActionKind::TakeStairs => perform_take_stairs(state, actor),
        }
    }
}

fn perform_movement(state: &mut GameState, actor: EntityId, delta: Position) -> ActionResult {
    let destination = state.entities[actor].position + delta;
    if !state.grid.in_bounds(destination)
        || !state.grid.is_walkable(destination)
        || state.blocking_entity_at(destination).is_some()
    {
        return Err(Impossible::new("That way is blocked."));
    }
    state.entities[actor].position = destination;
    Ok(())
}

fn perform_melee(state: &mut GameState, actor: EntityId, delta: Position) -> ActionResult {
    let destination = state.entities[actor].position + delta;
    let target = state
        .actor_at(destination)
        .ok_or_else(|| Impossible::new("Nothing to attack."))?;

    let damage = state.entities.power(actor) - state.entities.defense(target);
    let description = format!(
        "{} attacks {}",
        capitalize(&state.entities[actor].name),
        state.entities[target].name
    );
    let attack_color = if actor == state.player_id {
        color::PLAYER_ATTACK
    } else {
        color::ENEMY_ATTACK
    };

    if damage > 0 {
        state.log(
            format!("{description} for {damage} hit points."),
            attack_color,
        );
        state.apply_damage(target, damage, Some(actor));
    } else {
        state.log(format!("{description} but does no damage."), attack_color);
    }
    Ok(())
}

fn perform_pickup(state: &mut GameState, actor: EntityId) -> ActionResult {
    let position = state.entities[actor].position;
    let item = *state
        .items_at(position)
        .first()
        .ok_or_else(|| Impossible::new("There is nothing here to pick up."))?;

    if state.entities.actor(actor).inventory.is_full() {
        return Err(Impossible::new("Your inventory is full."));
    }

    state.grid.remove_entity(item);
    state.entities.actor_mut(actor).inventory.items.push(item);
    let name = state.entities[item].name.clone();
    state.log(format!("You picked up the {name}!"), color::WHITE);
    Ok(())
}

fn ensure_carried(state: &GameState, actor: EntityId, item: EntityId) -> ActionResult {
    if state.entities.actor(actor).inventory.contains(item) {
        Ok(())
    } else {
        Err(Impossible::new("You are not carrying that."))
    }
}

fn perform_drop(state: &mut GameState, actor: EntityId, item: EntityId) -> ActionResult {
    ensure_carried(state, actor, item)?;

    if state.entities.actor(actor).equipment.is_equipped(item) {
        state.toggle_equip(actor, item, true);
    }

    let position = state.entities[actor].position;
    state.entities.actor_mut(actor).inventory.remove(item);
    state.entities[item].position = position;
    state.grid.add_entity(item);

    let name = state.entities[item].name.clone();
    state.log(format!("You dropped the {name}."), color::WHITE);
    Ok(())
}

fn perform_equip(state: &mut GameState, actor: EntityId, item: EntityId) -> ActionResult {
    ensure_carried(state, actor, item)?;
    let equippable = state.entities[item].item().and_then(|i| i.equippable);
    if equippable.is_none() {
        let name = &state.entities[item].name;
        return Err(Impossible::new(format!("The {name} cannot be equipped.")));
    }
    state.toggle_equip(actor, item, true);
    Ok(())
}

fn perform_use(
    state: &mut GameState,
    actor: EntityId,
    item: EntityId,
    target: Option<Position>,
) -> ActionResult {
    ensure_carried(state, actor, item)?;
    let consumable = match state.entities[item].item().and_then(|i| i.consumable) {
        Some(consumable) => consumable,
        None => {
            let name = &state.entities[item].name;
            return Err(Impossible::new(format!("The {name} cannot be used.")));
        }
    };

    let target = target.unwrap_or(state.entities[actor].position);
    consumable.activate(state, actor, item, target)?;

    state.entities.actor_mut(actor).inventory.remove(item);
    state.entities.remove(item);
    Ok(())
}

fn perform_take_stairs(state: &mut GameState, actor: EntityId) -> ActionResult {
    if state.grid.downstairs != Some(state.entities[actor].position) {
        return Err(Impossible::new("There are no stairs here."));
    }
    state.descend();
    state.log("You descend the staircase.", color::DESCEND);
    Ok(())
}

/// Upper-cases the first character of a display name.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Ai, Entity, Equipment, Fighter, Grid, Inventory, Level, Tile};
    use crate::generation::ItemKind;
    use crate::Rgb;

    /// A 10x10 open room (walls on the border) with the player at (2, 2).
    fn arena_state() -> GameState {
        let mut grid = Grid::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                grid.set_tile(Position::new(x, y), Tile::floor());
            }
        }
        GameState::from_parts(grid, Entity::player().at(Position::new(2, 2)), 1)
    }

    fn dummy(hp: i32, defense: i32, power: i32) -> Entity {
        Entity::new_actor(
            "dummy",
            'd',
            Rgb::new(1, 2, 3),
            Actor {
                ai: Some(Ai::hostile()),
                fighter: Fighter::new(hp, defense, power),
                inventory: Inventory::new(0),
                level: Level::new(0, 0, 10),
                equipment: Equipment::default(),
            },
        )
    }

    #[test]
    fn test_wait_always_succeeds() {
        let mut state = arena_state();
        let player = state.player_id;
        assert!(Action::wait(player).perform(&mut state).is_ok());
    }

    #[test]
    fn test_movement_into_wall_is_blocked() {
        let mut state = arena_state();
        let player = state.player_id;
        state.entities[player].position = Position::new(1, 1);
        let result = Action::movement(player, -1, 0).perform(&mut state);
        assert_eq!(result, Err(Impossible::new("That way is blocked.")));
        assert_eq!(state.entities[player].position, Position::new(1, 1));
    }

    #[test]
    fn test_movement_out_of_bounds_is_blocked() {
        let mut state = arena_state();
        let player = state.player_id;
        state.grid.set_tile(Position::new(0, 2), Tile::floor());
        state.entities[player].position = Position::new(0, 2);
        assert!(Action::movement(player, -1, 0).perform(&mut state).is_err());
        assert_eq!(state.entities[player].position, Position::new(0, 2));
    }

    #[test]
    fn test_movement_into_blocking_entity_is_blocked() {
        let mut state = arena_state();
        let player = state.player_id;
        state.spawn(dummy(5, 0, 0), Position::new(3, 2));
        assert!(Action::movement(player, 1, 0).perform(&mut state).is_err());
        assert_eq!(state.entities[player].position, Position::new(2, 2));
    }

    #[test]
    fn test_movement_steps() {
        let mut state = arena_state();
        let player = state.player_id;
        Action::movement(player, 1, 1).perform(&mut state).unwrap();
        assert_eq!(state.entities[player].position, Position::new(3, 3));
    }

    #[test]
    fn test_melee_damage_is_power_minus_defense() {
        let mut state = arena_state();
        let player = state.player_id;
        state.entities.actor_mut(player).fighter = Fighter::new(10, 0, 5);
        let target = state.spawn(dummy(10, 2, 0), Position::new(3, 2));

        Action::melee(player, 1, 0).perform(&mut state).unwrap();
        assert_eq!(state.entities.actor(target).fighter.hp(), 7);
        assert_eq!(
            state.messages.last().unwrap().text,
            "Player attacks dummy for 3 hit points."
        );
    }

    #[test]
    fn test_harmless_melee_still_succeeds() {
        let mut state = arena_state();
        let player = state.player_id;
        state.entities.actor_mut(player).fighter = Fighter::new(10, 0, 1);
        let target = state.spawn(dummy(10, 4, 0), Position::new(3, 2));

        assert!(Action::melee(player, 1, 0).perform(&mut state).is_ok());
        assert_eq!(state.entities.actor(target).fighter.hp(), 10);
        assert!(state.messages.last().unwrap().text.ends_with("but does no damage."));
    }

    #[test]
    fn test_melee_without_target_fails() {
        let mut state = arena_state();
        let player = state.player_id;
        assert_eq!(
            Action::melee(player, 1, 0).perform(&mut state),
            Err(Impossible::new("Nothing to attack."))
        );
    }

    #[test]
    fn test_bump_attacks_or_moves() {
        let mut state = arena_state();
        let player = state.player_id;
        let target = state.spawn(dummy(10, 0, 0), Position::new(3, 2));
        Action::bump(player, 1, 0).perform(&mut state).unwrap();
        assert_eq!(state.entities[player].position, Position::new(2, 2));
        assert!(state.entities.actor(target).fighter.hp() < 10);

        Action::bump(player, 0, 1).perform(&mut state).unwrap();
        assert_eq!(state.entities[player].position, Position::new(2, 3));
    }

    #[test]
    fn test_killing_blow_makes_corpse_and_awards_xp() {
        let mut state = arena_state();
        let player = state.player_id;
        let target = state.spawn(dummy(1, 0, 0), Position::new(3, 2));
        Action::bump(player, 1, 0).perform(&mut state).unwrap();

        let corpse = &state.entities[target];
        assert!(!corpse.is_alive());
        assert!(!corpse.blocks_movement);
        assert_eq!(corpse.name, "remains of dummy");
        assert_eq!(state.entities.actor(player).level.current_xp, 10);

        // The corpse no longer blocks the way
        Action::bump(player, 1, 0).perform(&mut state).unwrap();
        assert_eq!(state.entities[player].position, Position::new(3, 2));
    }

    #[test]
    fn test_pickup_nothing_here() {
        let mut state = arena_state();
        let player = state.player_id;
        assert_eq!(
            Action::pickup(player).perform(&mut state),
            Err(Impossible::new("There is nothing here to pick up."))
        );
    }

    #[test]
    fn test_pickup_with_full_inventory_fails() {
        let mut state = arena_state();
        let player = state.player_id;
        state.entities.actor_mut(player).inventory = Inventory::new(1);
        let carried = state.entities.insert(ItemKind::HealthPotion.build());
        state.entities.actor_mut(player).inventory.items.push(carried);
        let floor_item = state.spawn(ItemKind::Dagger.build(), Position::new(2, 2));

        assert_eq!(
            Action::pickup(player).perform(&mut state),
            Err(Impossible::new("Your inventory is full."))
        );
        assert_eq!(state.entities.actor(player).inventory.items, vec![carried]);
        assert!(state.grid.contains_entity(floor_item));
    }

    #[test]
    fn test_pickup_and_drop_transfer_ownership() {
        let mut state = arena_state();
        let player = state.player_id;
        let potion = state.spawn(ItemKind::HealthPotion.build(), Position::new(2, 2));

        Action::pickup(player).perform(&mut state).unwrap();
        assert!(!state.grid.contains_entity(potion));
        assert!(state.entities.actor(player).inventory.contains(potion));

        state.entities[player].position = Position::new(5, 5);
        Action::drop_item(player, potion).perform(&mut state).unwrap();
        assert!(state.grid.contains_entity(potion));
        assert!(!state.entities.actor(player).inventory.contains(potion));
        assert_eq!(state.entities[potion].position, Position::new(5, 5));
    }

    #[test]
    fn test_drop_unequips_first() {
        let mut state = arena_state();
        let player = state.player_id;
        let sword = state.entities.insert(ItemKind::Sword.build());
        state.entities.actor_mut(player).inventory.items.push(sword);
        Action::equip(player, sword).perform(&mut state).unwrap();
        assert_eq!(state.entities.power(player), 9);

        Action::drop_item(player, sword).perform(&mut state).unwrap();
        assert_eq!(state.entities.actor(player).equipment.weapon, None);
        assert_eq!(state.entities.power(player), 5);
    }

    #[test]
    fn test_equip_swaps_occupied_slot() {
        let mut state = arena_state();
        let player = state.player_id;
        let dagger = state.entities.insert(ItemKind::Dagger.build());
        let sword = state.entities.insert(ItemKind::Sword.build());
        let inventory = &mut state.entities.actor_mut(player).inventory;
        inventory.items.extend([dagger, sword]);

        Action::equip(player, dagger).perform(&mut state).unwrap();
        Action::equip(player, sword).perform(&mut state).unwrap();
        assert_eq!(state.entities.actor(player).equipment.weapon, Some(sword));
        assert_eq!(state.entities.power(player), 9);

        // Equipping the same item again takes it off
        Action::equip(player, sword).perform(&mut state).unwrap();
        assert_eq!(state.entities.actor(player).equipment.weapon, None);
        assert_eq!(state.messages.last().unwrap().text, "You remove the Sword.");
    }

    #[test]
    fn test_equip_rejects_non_equippable() {
        let mut state = arena_state();
        let player = state.player_id;
        let potion = state.entities.insert(ItemKind::HealthPotion.build());
        state.entities.actor_mut(player).inventory.items.push(potion);
        assert!(Action::equip(player, potion).perform(&mut state).is_err());
    }

    #[test]
    fn test_use_removes_consumed_item() {
        let mut state = arena_state();
        let player = state.player_id;
        let potion = state.entities.insert(ItemKind::HealthPotion.build());
        state.entities.actor_mut(player).inventory.items.push(potion);
        state.entities.actor_mut(player).fighter.set_hp(20);

        Action::use_item(player, potion, None).perform(&mut state).unwrap();
        assert_eq!(state.entities.actor(player).fighter.hp(), 24);
        assert!(!state.entities.contains(potion));
        assert!(state.entities.actor(player).inventory.items.is_empty());
    }

    #[test]
    fn test_failed_use_keeps_item() {
        let mut state = arena_state();
        let player = state.player_id;
        let potion = state.entities.insert(ItemKind::HealthPotion.build());
        state.entities.actor_mut(player).inventory.items.push(potion);

        assert_eq!(
            Action::use_item(player, potion, None).perform(&mut state),
            Err(Impossible::new("Your health is already full."))
        );
        assert!(state.entities.actor(player).inventory.contains(potion));
    }

    #[test]
    fn test_take_stairs_requires_stairs() {
        let mut state = arena_state();
        let player = state.player_id;
        assert_eq!(
            Action::take_stairs(player).perform(&mut state),
            Err(Impossible::new("There are no stairs here."))
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("orc"), "Orc");
        assert_eq!(capitalize(""), "");
    }
}
