//! # Consumables
//!
//! Single-use item effects. Each variant validates its own target and either
//! applies the effect or fails with [`Impossible`]; removing the spent item is
//! left to the `UseItem` action.

use crate::game::color;
use crate::game::{ActionResult, Ai, EntityId, GameState, Impossible, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    /// Restore hit points to the user
    Healing { amount: i32 },
    /// Strike the nearest visible actor within range
    LightningDamage { damage: i32, max_range: i32 },
    /// Scramble the AI of the actor at the target cell
    Confusion { turns: i32 },
    /// Burn every actor strictly closer than `radius` to the target cell
    FireCube { damage: i32, radius: i32 },
}

impl Consumable {
    /// Whether the player must pick a cell before this can be used.
    pub fn needs_target(&self) -> bool {
        matches!(self, Consumable::Confusion { .. } | Consumable::FireCube { .. })
    }

    /// Radius to highlight while targeting, for area effects.
    pub fn area_radius(&self) -> Option<i32> {
        match self {
            Consumable::FireCube { radius, .. } => Some(*radius),
            _ => None,
        }
    }

    /// Applies the effect of `item`, used by `user`, at `target`.
    pub fn activate(
        &self,
        state: &mut GameState,
        user: EntityId,
        item: EntityId,
        target: Position,
    ) -> ActionResult {
        match *self {
            Consumable::Healing { amount } => heal(state, user, item, amount),
            Consumable::LightningDamage { damage, max_range } => {
                lightning(state, user, damage, max_range)
            }
            Consumable::Confusion { turns } => confuse(state, user, target, turns),
            Consumable::FireCube { damage, radius } => fire_cube(state, user, target, damage, radius),
        }
    }
}

fn heal(state: &mut GameState, user: EntityId, item: EntityId, amount: i32) -> ActionResult {
    let recovered = state.entities.actor_mut(user).fighter.heal(amount);
    if recovered == 0 {
        return Err(Impossible::new("Your health is already full."));
    }
    let name = state.entities[item].name.clone();
    state.log(
        format!("You consume the {name}, and recover {recovered} HP!"),
        color::HEALTH_RECOVERED,
    );
    Ok(())
}

fn lightning(state: &mut GameState, user: EntityId, damage: i32, max_range: i32) -> ActionResult {
    let origin = state.entities[user].position;
    let mut closest: Option<(EntityId, i32)> = None;

    for candidate in state.living_actors() {
        if candidate == user {
            continue;
        }
        let position = state.entities[candidate].position;
        if !state.grid.is_visible(position) {
            continue;
        }
        let distance = origin.chebyshev_distance(position);
        if distance > max_range {
            continue;
        }
        if closest.map_or(true, |(_, best)| distance < best) {
            closest = Some((candidate, distance));
        }
    }

    let (target, _) = closest.ok_or_else(|| Impossible::new("No enemy is close enough to strike."))?;
    let name = state.entities[target].name.clone();
    state.log(
        format!("A lightning bolt strikes the {name} with a loud thunder, for {damage} damage!"),
        color::WHITE,
    );
    state.apply_damage(target, damage, Some(user));
    Ok(())
}

fn confuse(state: &mut GameState, user: EntityId, target: Position, turns: i32) -> ActionResult {
    if !state.grid.is_visible(target) {
        return Err(Impossible::new("You cannot target an area that you cannot see."));
    }
    let victim = state
        .actor_at(target)
        .ok_or_else(|| Impossible::new("You must select an enemy to target."))?;
    if victim == user {
        return Err(Impossible::new("You cannot confuse yourself!"));
    }

    let name = state.entities[victim].name.clone();
    state.log(
        format!("The eyes of the {name} look vacant, as it starts to stumble around!"),
        color::STATUS_EFFECT_APPLIED,
    );
    let actor = state.entities.actor_mut(victim);
    if let Some(previous) = actor.ai.take() {
        actor.ai = Some(Ai::confused(previous, turns));
    }
    Ok(())
}

fn fire_cube(
    state: &mut GameState,
    user: EntityId,
    target: Position,
    damage: i32,
    radius: i32,
) -> ActionResult {
    if !state.grid.is_visible(target) {
        return Err(Impossible::new("You cannot target an area that you cannot see."));
    }

    let caught: Vec<EntityId> = state
        .living_actors()
        .into_iter()
        .filter(|&id| state.entities[id].position.chebyshev_distance(target) < radius)
        .collect();
    if caught.is_empty() {
        return Err(Impossible::new("There are no targets in the radius."));
    }

    for victim in caught {
        let name = state.entities[victim].name.clone();
        state.log(
            format!("The {name} is engulfed in a fiery explosion, taking {damage} damage!"),
            color::WHITE,
        );
        state.apply_damage(victim, damage, Some(user));
    }
    Ok(())
}
