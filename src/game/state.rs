//! # Game State Management
//!
//! [`GameState`] is the explicit context every action, consumable and AI works
//! against: the current floor, the entity arena, the player handle, the message
//! log and the turn state machine.
//!
//! A player turn runs as one synchronous step:
//!
//! ```text
//! AwaitingInput -> ResolvingPlayerAction -> ResolvingEnemyTurns
//!               -> RecomputingVisibility -> AwaitingInput | LevelUp | GameOver
//! ```
//!
//! An action that fails with [`Impossible`] snaps straight back to
//! `AwaitingInput`: no enemy moves, visibility is untouched, no turn is counted.

use crate::config;
use crate::game::color::{self, Rgb};
use crate::game::{
    Action, EquipmentSlot, Entity, EntityArena, EntityId, Grid, Impossible, MessageLog, Position,
    World,
};
use crate::generation::utils::create_rng;
use crate::generation::{GenerationConfig, ItemKind, RoomCorridorGenerator};
use crate::utils::compute_fov;
use crate::{TombsError, TombsResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

const WELCOME_MESSAGE: &str = "Hello and welcome, adventurer, to yet another dungeon!";

/// Where the turn state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingInput,
    ResolvingPlayerAction,
    ResolvingEnemyTurns,
    RecomputingVisibility,
    /// The player must pick a stat before acting again
    LevelUp,
    /// The player is dead; only quitting remains
    GameOver,
}

/// Result of handing a player action to [`GameState::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The action applied and a full turn resolved
    Completed,
    /// The action did not apply; no turn passed
    Rejected(Impossible),
    /// Actions are not accepted in this phase
    NotAccepted(TurnPhase),
}

/// Stat to improve when leveling up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpChoice {
    /// +20 max hp
    Constitution,
    /// +1 power
    Strength,
    /// +1 defense
    Agility,
}

fn placeholder_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

/// The complete state of one game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub world: World,
    /// The floor being played
    pub grid: Grid,
    /// Every entity on the floor or in an inventory
    pub entities: EntityArena,
    pub player_id: EntityId,
    pub messages: MessageLog,
    pub phase: TurnPhase,
    /// Completed turns since the game started
    pub turn_number: u64,
    pub rng_seed: u64,
    #[serde(skip, default = "placeholder_rng")]
    pub rng: StdRng,
}

impl GameState {
    /// Starts a new game on floor 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::{GameState, GenerationConfig, TurnPhase};
    ///
    /// let state = GameState::new_game(GenerationConfig::new(7)).unwrap();
    /// assert_eq!(state.world.current_floor, 1);
    /// assert_eq!(state.phase, TurnPhase::AwaitingInput);
    /// ```
    pub fn new_game(generation: GenerationConfig) -> TombsResult<Self> {
        generation.validate()?;

        let seed = generation.seed;
        let rng = create_rng(&generation);
        let mut entities = EntityArena::new();
        let player_id = entities.insert(Entity::player());
        let mut state = Self {
            grid: Grid::new(generation.map_width, generation.map_height),
            world: World::new(generation),
            entities,
            player_id,
            messages: MessageLog::new(),
            phase: TurnPhase::AwaitingInput,
            turn_number: 0,
            rng_seed: seed,
            rng,
        };

        state.descend();
        state.equip_starting_kit();
        state.log(WELCOME_MESSAGE, color::WELCOME_TEXT);
        info!("Started a new game with seed {seed}");
        Ok(state)
    }

    /// Builds a state around a prepared grid with the player already positioned.
    ///
    /// Used for scripted scenarios; no floor is generated and the player carries
    /// nothing.
    pub fn from_parts(mut grid: Grid, player: Entity, depth: u32) -> Self {
        let mut entities = EntityArena::new();
        let player_id = entities.insert(player);
        grid.add_entity(player_id);

        let mut world = World::new(GenerationConfig::new(0));
        world.current_floor = depth;

        let mut state = Self {
            world,
            grid,
            entities,
            player_id,
            messages: MessageLog::new(),
            phase: TurnPhase::AwaitingInput,
            turn_number: 0,
            rng_seed: 0,
            rng: placeholder_rng(),
        };
        state.update_fov();
        state
    }

    /// Re-derives the RNG after loading; the stream itself is not saved.
    pub(crate) fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.rng_seed ^ self.turn_number.rotate_left(32));
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player_id]
    }

    pub fn depth(&self) -> u32 {
        self.world.current_floor
    }

    pub fn log(&mut self, text: impl Into<String>, color: Rgb) {
        self.messages.add_message(text, color);
    }

    /// Places an entity on the current floor and returns its handle.
    pub fn spawn(&mut self, entity: Entity, position: Position) -> EntityId {
        let id = self.entities.insert(entity.at(position));
        self.grid.add_entity(id);
        id
    }

    pub fn blocking_entity_at(&self, position: Position) -> Option<EntityId> {
        self.grid.entities.iter().copied().find(|&id| {
            let entity = &self.entities[id];
            entity.blocks_movement && entity.position == position
        })
    }

    /// The living actor standing at `position`, if any.
    pub fn actor_at(&self, position: Position) -> Option<EntityId> {
        self.grid.entities.iter().copied().find(|&id| {
            let entity = &self.entities[id];
            entity.is_alive() && entity.position == position
        })
    }

    /// Items lying on the floor at `position`, in placement order.
    pub fn items_at(&self, position: Position) -> Vec<EntityId> {
        self.grid
            .entities
            .iter()
            .copied()
            .filter(|&id| {
                let entity = &self.entities[id];
                entity.item().is_some() && entity.position == position
            })
            .collect()
    }

    /// Living actors on the current floor, in placement order.
    pub fn living_actors(&self) -> Vec<EntityId> {
        self.grid
            .entities
            .iter()
            .copied()
            .filter(|&id| self.entities[id].is_alive())
            .collect()
    }

    /// Floor entities in draw order: corpses, then items, then actors.
    pub fn render_entities(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self
            .grid
            .entities
            .iter()
            .map(|&id| &self.entities[id])
            .collect();
        entities.sort_by_key(|entity| entity.render_order);
        entities
    }

    /// Deals damage and resolves death if hp reaches zero.
    ///
    /// `source` is credited with the victim's experience reward.
    pub fn apply_damage(&mut self, target: EntityId, amount: i32, source: Option<EntityId>) {
        let actor = self.entities.actor_mut(target);
        let was_alive = actor.ai.is_some();
        if actor.fighter.take_damage(amount) && was_alive {
            self.die(target, source);
        }
    }

    /// Writes an actor's hp, clamped to `[0, max_hp]`.
    ///
    /// Reaching zero while alive kills the actor, exactly as lethal damage would.
    pub fn set_hp(&mut self, target: EntityId, value: i32) {
        let actor = self.entities.actor_mut(target);
        let was_alive = actor.ai.is_some();
        if actor.fighter.set_hp(value) && was_alive {
            self.die(target, None);
        }
    }

    fn die(&mut self, victim: EntityId, killer: Option<EntityId>) {
        let name = self.entities[victim].name.clone();
        if victim == self.player_id {
            self.log("You died!", color::PLAYER_DIE);
        } else {
            self.log(format!("{name} is dead!"), color::ENEMY_DIE);
        }
        info!("{name} ({victim}) died");
        self.entities[victim].become_corpse();

        let Some(killer) = killer.filter(|&k| k != victim) else {
            return;
        };
        let xp = self.entities.actor(victim).level.xp_given;
        let Some(level) = self
            .entities
            .get_mut(killer)
            .and_then(|entity| entity.actor_mut())
            .map(|actor| &mut actor.level)
        else {
            return;
        };
        if level.add_xp(xp) {
            let advance = level.requires_level_up().then(|| level.current_level + 1);
            self.log(format!("You gain {xp} experience points."), color::WHITE);
            if let Some(next) = advance {
                self.log(format!("You advance to level {next}!"), color::WHITE);
            }
        }
    }

    /// Moves an equippable item into its slot, or out of it if already there.
    pub fn toggle_equip(&mut self, actor: EntityId, item: EntityId, announce: bool) {
        let Some(equippable) = self.entities[item].item().and_then(|i| i.equippable) else {
            return;
        };
        let slot = equippable.slot;
        let current = self.entities.actor(actor).equipment.item_in(slot);

        if current == Some(item) {
            self.unequip(actor, slot, announce);
            return;
        }
        if current.is_some() {
            self.unequip(actor, slot, announce);
        }
        self.entities
            .actor_mut(actor)
            .equipment
            .set(slot, Some(item));
        if announce {
            let name = self.entities[item].name.clone();
            self.log(format!("You equip the {name}."), color::WHITE);
        }
    }

    fn unequip(&mut self, actor: EntityId, slot: EquipmentSlot, announce: bool) {
        let equipment = &mut self.entities.actor_mut(actor).equipment;
        let Some(item) = equipment.item_in(slot) else {
            return;
        };
        equipment.set(slot, None);
        if announce {
            let name = self.entities[item].name.clone();
            self.log(format!("You remove the {name}."), color::WHITE);
        }
    }

    fn equip_starting_kit(&mut self) {
        let player = self.player_id;
        for kind in [ItemKind::Dagger, ItemKind::LeatherArmor] {
            let item = self.entities.insert(kind.build());
            self.entities.actor_mut(player).inventory.items.push(item);
            self.toggle_equip(player, item, false);
        }
    }

    /// Replaces the current floor with a freshly generated, deeper one.
    ///
    /// Everything on the old floor is discarded; only the player and what the
    /// player carries survive.
    pub fn descend(&mut self) {
        self.world.current_floor += 1;
        let depth = self.world.current_floor;

        for id in std::mem::take(&mut self.grid.entities) {
            if id != self.player_id {
                self.discard(id);
            }
        }

        self.grid = RoomCorridorGenerator::new().generate(
            &self.world.generation,
            depth,
            self.player_id,
            &mut self.entities,
            &mut self.rng,
        );
        self.update_fov();
        info!(
            "Entered floor {depth} with {} entities",
            self.grid.entities.len()
        );
    }

    fn discard(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.remove(id) {
            if let Some(actor) = entity.actor() {
                for &item in &actor.inventory.items {
                    self.entities.remove(item);
                }
            }
        }
    }

    /// Recomputes what the player can see and folds it into the explored map.
    pub fn update_fov(&mut self) {
        let origin = self.entities[self.player_id].position;
        let grid = &self.grid;
        let visible = compute_fov(
            grid.width,
            grid.height,
            origin,
            config::FOV_RADIUS,
            |p| grid.is_transparent(p),
        );
        self.grid.set_visible(visible);
    }

    /// Runs one turn for every living non-player actor on the floor.
    ///
    /// Failures are skipped so one bad decision never stops the batch.
    pub fn handle_enemy_turns(&mut self) {
        let enemies: Vec<EntityId> = self
            .living_actors()
            .into_iter()
            .filter(|&id| id != self.player_id)
            .collect();

        for id in enemies {
            // Killed earlier in this batch
            let Some(mut ai) = self.entities.actor_mut(id).ai.take() else {
                continue;
            };
            if let Err(reason) = ai.perform(id, self) {
                debug!("{} ({id}) could not act: {reason}", self.entities[id].name);
            }
            let actor = self.entities.actor_mut(id);
            actor.ai = Some(ai);
            // Damage taken while the AI was detached could not resolve death
            if actor.fighter.hp() == 0 {
                self.die(id, None);
            }
        }
    }

    /// Resolves one player action through the whole turn.
    pub fn submit(&mut self, action: Action) -> TurnOutcome {
        if self.phase != TurnPhase::AwaitingInput {
            return TurnOutcome::NotAccepted(self.phase);
        }

        self.phase = TurnPhase::ResolvingPlayerAction;
        if let Err(impossible) = action.perform(self) {
            self.log(impossible.0.clone(), color::IMPOSSIBLE);
            self.phase = TurnPhase::AwaitingInput;
            return TurnOutcome::Rejected(impossible);
        }

        self.phase = TurnPhase::ResolvingEnemyTurns;
        self.handle_enemy_turns();

        self.phase = TurnPhase::RecomputingVisibility;
        self.update_fov();
        self.turn_number += 1;

        self.phase = self.settled_phase();
        if self.phase == TurnPhase::GameOver {
            info!("Game over after {} turns", self.turn_number);
        }
        TurnOutcome::Completed
    }

    fn settled_phase(&self) -> TurnPhase {
        let actor = self.entities.actor(self.player_id);
        if actor.fighter.hp() == 0 {
            TurnPhase::GameOver
        } else if actor.level.requires_level_up() {
            TurnPhase::LevelUp
        } else {
            TurnPhase::AwaitingInput
        }
    }

    /// Spends banked experience on one stat.
    pub fn choose_level_up(&mut self, choice: LevelUpChoice) -> TombsResult<()> {
        if self.phase != TurnPhase::LevelUp {
            return Err(TombsError::InvalidState(
                "no level up is pending".to_string(),
            ));
        }

        let actor = self.entities.actor_mut(self.player_id);
        actor.level.increase_level();
        let message = match choice {
            LevelUpChoice::Constitution => {
                actor.fighter.increase_max_hp(20);
                "Your health improves!"
            }
            LevelUpChoice::Strength => {
                actor.fighter.base_power += 1;
                "You feel stronger!"
            }
            LevelUpChoice::Agility => {
                actor.fighter.base_defense += 1;
                "Your movements are getting swifter!"
            }
        };
        self.log(message, color::WHITE);
        self.phase = self.settled_phase();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Fighter, Tile};
    use crate::generation::MonsterKind;

    fn room_state() -> GameState {
        let mut grid = Grid::new(20, 12);
        for y in 1..11 {
            for x in 1..19 {
                grid.set_tile(Position::new(x, y), Tile::floor());
            }
        }
        GameState::from_parts(grid, Entity::player().at(Position::new(3, 3)), 1)
    }

    #[test]
    fn test_new_game_places_player_and_kit() {
        let state = GameState::new_game(GenerationConfig::new(99)).unwrap();
        let player = state.player();
        assert!(state.grid.contains_entity(state.player_id));
        assert!(state.grid.is_walkable(player.position));
        assert!(state.grid.is_visible(player.position));

        let actor = player.actor().unwrap();
        assert_eq!(actor.inventory.items.len(), 2);
        assert!(actor.equipment.weapon.is_some());
        assert!(actor.equipment.armor.is_some());
        // Dagger +2 power, leather armor +1 defense
        assert_eq!(state.entities.power(state.player_id), 7);
        assert_eq!(state.entities.defense(state.player_id), 3);
        assert_eq!(state.messages.last().unwrap().text, WELCOME_MESSAGE);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut generation = GenerationConfig::new(1);
        generation.max_rooms = 0;
        assert!(matches!(
            GameState::new_game(generation),
            Err(TombsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejected_action_consumes_no_turn() {
        let mut state = room_state();
        let player = state.player_id;
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(8, 3));
        state.update_fov();

        let outcome = state.submit(Action::melee(player, 1, 0));
        assert_eq!(outcome, TurnOutcome::Rejected(Impossible::new("Nothing to attack.")));
        assert_eq!(state.turn_number, 0);
        assert_eq!(state.phase, TurnPhase::AwaitingInput);
        assert_eq!(state.entities[orc].position, Position::new(8, 3));
        assert_eq!(state.messages.last().unwrap().color, color::IMPOSSIBLE);
    }

    #[test]
    fn test_completed_turn_runs_enemies() {
        let mut state = room_state();
        let player = state.player_id;
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(8, 3));
        state.update_fov();

        assert_eq!(state.submit(Action::wait(player)), TurnOutcome::Completed);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.entities[orc].position.x, 7);
    }

    #[test]
    fn test_harmless_attack_still_passes_the_turn() {
        let mut state = room_state();
        let player = state.player_id;
        state.entities.actor_mut(player).fighter = Fighter::new(30, 10, 0);
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(4, 3));
        state.update_fov();

        assert_eq!(state.submit(Action::bump(player, 1, 0)), TurnOutcome::Completed);
        assert_eq!(state.entities.actor(orc).fighter.hp(), 10);
        assert_eq!(state.turn_number, 1);
    }

    #[test]
    fn test_player_death_ends_game() {
        let mut state = room_state();
        let player = state.player_id;
        state.set_hp(player, 1);
        state.spawn(MonsterKind::Troll.build(), Position::new(4, 3));
        state.update_fov();

        state.submit(Action::wait(player));
        assert_eq!(state.phase, TurnPhase::GameOver);
        assert!(!state.player().is_alive());
        assert_eq!(state.player().glyph, '%');
        assert!(matches!(
            state.submit(Action::wait(player)),
            TurnOutcome::NotAccepted(TurnPhase::GameOver)
        ));
    }

    #[test]
    fn test_level_up_flow() {
        let mut state = room_state();
        let player = state.player_id;
        state.entities.actor_mut(player).level.current_xp = 400;

        state.submit(Action::wait(player));
        assert_eq!(state.phase, TurnPhase::LevelUp);
        assert!(matches!(
            state.submit(Action::wait(player)),
            TurnOutcome::NotAccepted(TurnPhase::LevelUp)
        ));

        state.choose_level_up(LevelUpChoice::Strength).unwrap();
        let actor = state.entities.actor(player);
        assert_eq!(actor.level.current_level, 2);
        assert_eq!(actor.level.current_xp, 50);
        assert_eq!(actor.fighter.base_power, 6);
        assert_eq!(state.phase, TurnPhase::AwaitingInput);
        assert!(state.choose_level_up(LevelUpChoice::Agility).is_err());
    }

    #[test]
    fn test_constitution_raises_and_heals() {
        let mut state = room_state();
        let player = state.player_id;
        state.entities.actor_mut(player).level.current_xp = 351;
        state.phase = TurnPhase::LevelUp;
        state.choose_level_up(LevelUpChoice::Constitution).unwrap();
        let fighter = &state.entities.actor(player).fighter;
        assert_eq!(fighter.max_hp(), 50);
        assert_eq!(fighter.hp(), 50);
    }

    #[test]
    fn test_killing_grants_xp_and_announces_level() {
        let mut state = room_state();
        let player = state.player_id;
        state.entities.actor_mut(player).level.current_xp = 300;
        let troll = state.spawn(MonsterKind::Troll.build(), Position::new(4, 3));
        state.set_hp(troll, 1);

        state.apply_damage(troll, 5, Some(player));
        assert_eq!(state.entities.actor(player).level.current_xp, 400);
        let texts: Vec<_> = state.messages.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Troll is dead!", "You gain 100 experience points.", "You advance to level 2!"]
        );
    }

    #[test]
    fn test_death_triggers_once() {
        let mut state = room_state();
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(4, 3));
        state.apply_damage(orc, 50, None);
        state.apply_damage(orc, 50, None);
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_zeroing_hp_kills_the_actor() {
        let mut state = room_state();
        let player = state.player_id;
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(5, 5));

        state.set_hp(orc, 0);
        let corpse = &state.entities[orc];
        assert!(!corpse.is_alive());
        assert!(!corpse.blocks_movement);
        assert_eq!(corpse.glyph, '%');
        assert_eq!(corpse.name, "remains of Orc");
        assert_eq!(state.messages.last().unwrap().text, "Orc is dead!");

        // The corpse takes no turn and no longer blocks the way
        state.submit(Action::wait(player));
        assert_eq!(state.blocking_entity_at(Position::new(5, 5)), None);
        state.set_hp(orc, 0);
        let deaths = state
            .messages
            .messages()
            .iter()
            .filter(|m| m.text == "Orc is dead!")
            .count();
        assert_eq!(deaths, 1);
        assert_eq!(state.messages.messages().last().unwrap().count, 1);
    }

    #[test]
    fn test_enemy_batch_buries_actors_left_at_zero_hp() {
        let mut state = room_state();
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(15, 10));
        // A raw write bypasses death resolution
        state.entities.actor_mut(orc).fighter.set_hp(0);

        state.handle_enemy_turns();
        let orc = &state.entities[orc];
        assert!(!orc.is_alive());
        assert!(!orc.blocks_movement);
        assert_eq!(orc.render_order, crate::game::RenderOrder::Corpse);
        assert_eq!(state.messages.last().unwrap().text, "Orc is dead!");
    }

    #[test]
    fn test_render_order() {
        let mut state = room_state();
        let orc = state.spawn(MonsterKind::Orc.build(), Position::new(5, 5));
        state.spawn(ItemKind::HealthPotion.build(), Position::new(6, 6));
        state.apply_damage(orc, 50, None);
        let orders: Vec<_> = state.render_entities().iter().map(|e| e.render_order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
        assert_eq!(orders.first(), Some(&crate::game::RenderOrder::Corpse));
    }

    #[test]
    fn test_descend_replaces_floor_and_keeps_inventory() {
        let mut state = GameState::new_game(GenerationConfig::new(5)).unwrap();
        let player = state.player_id;
        let old_floor: Vec<EntityId> = state
            .grid
            .entities
            .iter()
            .copied()
            .filter(|&id| id != player)
            .collect();
        let carried = state.entities.actor(player).inventory.items.clone();

        let stairs = state.grid.downstairs.unwrap();
        state.entities[player].position = stairs;
        assert_eq!(state.submit(Action::take_stairs(player)), TurnOutcome::Completed);

        assert_eq!(state.depth(), 2);
        assert!(old_floor.iter().all(|&id| !state.entities.contains(id)));
        assert_eq!(state.entities.actor(player).inventory.items, carried);
        assert!(carried.iter().all(|&id| state.entities.contains(id)));
        assert!(state.grid.contains_entity(player));
    }
}
