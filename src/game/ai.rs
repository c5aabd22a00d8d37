//! # AI Strategies
//!
//! Decision procedures for non-player actors, invoked once per enemy turn.

use crate::game::color;
use crate::game::{Action, ActionResult, Direction, EntityId, GameState, Position};
use crate::utils::CostGrid;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Extra path cost for a cell occupied by a blocking entity.
const CROWD_COST: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Chase and attack the player while it is in view
    Hostile {
        /// Remaining waypoints toward the last place the player was seen
        path: Vec<Position>,
    },
    /// Stumble around at random until the counter runs out
    Confused {
        previous: Box<Ai>,
        turns_remaining: i32,
    },
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: Vec::new() }
    }

    /// Wraps `previous` in confusion for `turns` turns.
    pub fn confused(previous: Ai, turns: i32) -> Self {
        Ai::Confused {
            previous: Box::new(previous),
            turns_remaining: turns,
        }
    }

    /// Takes one turn for `actor`.
    ///
    /// The caller detaches this AI from the actor for the duration of the call
    /// and stores it back afterwards, so any strategy change made here (such as
    /// confusion wearing off) sticks.
    pub fn perform(&mut self, actor: EntityId, state: &mut GameState) -> ActionResult {
        if let Ai::Confused {
            previous,
            turns_remaining,
        } = self
        {
            if *turns_remaining <= 0 {
                let restored = std::mem::replace(previous.as_mut(), Ai::hostile());
                let name = state.entities[actor].name.clone();
                state.log(format!("The {name} is no longer confused."), color::WHITE);
                *self = restored;
                return Ok(());
            }
            *turns_remaining -= 1;
            let directions = Direction::all();
            let direction = directions[state.rng.gen_range(0..directions.len())];
            let delta = direction.to_delta();
            return Action::bump(actor, delta.x, delta.y).perform(state);
        }

        let Ai::Hostile { path } = self else {
            return Ok(());
        };
        hostile_turn(path, actor, state)
    }
}

fn hostile_turn(path: &mut Vec<Position>, actor: EntityId, state: &mut GameState) -> ActionResult {
    let position = state.entities[actor].position;
    let target = state.entities[state.player_id].position;
    let delta = target - position;

    if state.grid.is_visible(position) {
        if position.chebyshev_distance(target) <= 1 {
            return Action::melee(actor, delta.x, delta.y).perform(state);
        }
        *path = path_to(state, position, target);
    }

    if !path.is_empty() {
        let next = path.remove(0);
        let step = next - position;
        debug!("{} moves toward {:?}", state.entities[actor].name, next);
        return Action::movement(actor, step.x, step.y).perform(state);
    }

    Action::wait(actor).perform(state)
}

/// Cheapest route from `start` to `goal`, routing around crowds where it can.
pub fn path_to(state: &GameState, start: Position, goal: Position) -> Vec<Position> {
    let grid = &state.grid;
    let mut costs = CostGrid::new(grid.width, grid.height);
    for position in grid.positions() {
        if grid.is_walkable(position) {
            costs.set_cost(position, 1);
        }
    }
    for &id in &grid.entities {
        let entity = &state.entities[id];
        if entity.blocks_movement {
            costs.add_cost(entity.position, CROWD_COST);
        }
    }
    costs.path(start, goal)
}
