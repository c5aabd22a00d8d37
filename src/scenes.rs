//! # Scene Management System
//!
//! Routes player intents to whichever screen is on top (main menu, dungeon,
//! inventory, targeting, level-up, character sheet, game over) and draws it.
//!
//! Scene logic never touches the window directly, so transitions can be driven
//! from tests with plain [`PlayerInput`] values.

use crate::game::color;
use crate::game::{Action, EntityId, GameState, LevelUpChoice, Position, TurnPhase};
use crate::generation::GenerationConfig;
use crate::input::{
    dungeon_command, inventory_command, menu_letter, Command, InputHandler, InputMode,
    InventoryPurpose, PlayerInput,
};
use crate::rendering::{MacroquadDisplay, UI};
use crate::utils::clamp_i32;
use crate::TombsError;
use log::{debug, error, info, warn};
use macroquad::prelude::*;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    /// Normal gameplay
    Dungeon,
    Inventory(InventoryPurpose),
    /// Picking a cell for a targeted item
    Targeting { item: EntityId, cursor: Position },
    LevelUp,
    CharacterScreen,
    GameOver,
}

/// Tells the outer loop whether to keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSignal {
    Continue,
    Quit,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    scene: Scene,
    state: Option<GameState>,
    generation: GenerationConfig,
    /// Draw a fresh seed for every new game instead of reusing the configured one
    pub random_seeds: bool,
    save_path: PathBuf,
    popup: Option<String>,
    display: MacroquadDisplay,
    ui: UI,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a scene manager showing the main menu.
    pub fn new(generation: GenerationConfig, save_path: impl Into<PathBuf>) -> Self {
        let display = MacroquadDisplay::new(generation.map_width, generation.map_height);
        let input_handler = InputHandler::new().with_cell_size(display.cell_vec());
        Self {
            scene: Scene::MainMenu,
            state: None,
            generation,
            random_seeds: false,
            save_path: save_path.into(),
            popup: None,
            display,
            ui: UI::new(),
            input_handler,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn game(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    /// Notice shown over the main menu, if any.
    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    /// Which bindings the current scene listens to.
    pub fn input_mode(&self) -> InputMode {
        match self.scene {
            Scene::MainMenu | Scene::Inventory(_) | Scene::LevelUp => InputMode::Menu,
            Scene::Targeting { .. } => InputMode::Targeting,
            Scene::Dungeon | Scene::CharacterScreen | Scene::GameOver => InputMode::Dungeon,
        }
    }

    /// Runs the main scene loop until the player quits or closes the window.
    pub async fn run(&mut self) {
        prevent_quit();
        loop {
            if is_quit_requested() {
                info!("Window closed");
                self.save_live_game();
                break;
            }
            if let Some(input) = self.input_handler.get_input(self.input_mode()) {
                if self.handle_input(input) == SceneSignal::Quit {
                    break;
                }
            }
            self.render();
            next_frame().await;
        }
    }

    /// Applies one intent to the current scene.
    pub fn handle_input(&mut self, input: PlayerInput) -> SceneSignal {
        match self.scene {
            Scene::MainMenu => return self.main_menu_input(input),
            Scene::Dungeon => self.dungeon_input(input),
            Scene::Inventory(purpose) => self.inventory_input(input, purpose),
            Scene::Targeting { item, cursor } => self.targeting_input(input, item, cursor),
            Scene::LevelUp => self.level_up_input(input),
            Scene::CharacterScreen => self.scene = Scene::Dungeon,
            Scene::GameOver => {
                if input == PlayerInput::Cancel {
                    self.abandon_dead_game();
                }
            }
        }
        SceneSignal::Continue
    }

    fn main_menu_input(&mut self, input: PlayerInput) -> SceneSignal {
        self.popup = None;
        match input {
            PlayerInput::Select(index) => match menu_letter(index) {
                'n' => self.start_new_game(),
                'c' => self.continue_game(),
                'q' => return SceneSignal::Quit,
                _ => {}
            },
            PlayerInput::Cancel => return SceneSignal::Quit,
            _ => {}
        }
        SceneSignal::Continue
    }

    fn start_new_game(&mut self) {
        let mut generation = self.generation.clone();
        if self.random_seeds {
            generation.seed = ::rand::random();
        }
        match GameState::new_game(generation) {
            Ok(state) => {
                self.state = Some(state);
                self.scene = Scene::Dungeon;
            }
            Err(e) => {
                error!("Could not start a new game: {e}");
                self.popup = Some(format!("Failed to start a new game: {e}"));
            }
        }
    }

    fn continue_game(&mut self) {
        match GameState::load_from_file(&self.save_path) {
            Ok(state) => {
                self.scene = scene_for_phase(state.phase);
                self.state = Some(state);
            }
            Err(TombsError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                self.popup = Some("No saved game to load.".to_string());
            }
            Err(e) => {
                self.popup = Some(format!("Failed to load save: {e}"));
            }
        }
    }

    fn dungeon_input(&mut self, input: PlayerInput) {
        let Some(state) = self.state.as_ref() else {
            self.scene = Scene::MainMenu;
            return;
        };
        match dungeon_command(input, state.player_id) {
            Some(Command::Perform(action)) => self.perform(action),
            Some(Command::OpenInventory(purpose)) => self.scene = Scene::Inventory(purpose),
            Some(Command::OpenCharacterScreen) => self.scene = Scene::CharacterScreen,
            Some(Command::SaveAndExit) => {
                self.save_live_game();
                self.state = None;
                self.scene = Scene::MainMenu;
            }
            Some(Command::BeginTargeting(_)) | None => {}
        }
    }

    fn inventory_input(&mut self, input: PlayerInput, purpose: InventoryPurpose) {
        let Some(state) = self.state.as_mut() else {
            self.scene = Scene::MainMenu;
            return;
        };
        let index = match input {
            PlayerInput::Select(index) => index,
            PlayerInput::Cancel => {
                self.scene = Scene::Dungeon;
                return;
            }
            _ => return,
        };

        let player = state.player_id;
        let Some(&item) = state.entities.actor(player).inventory.items.get(index) else {
            state.log("Invalid entry.", color::INVALID);
            return;
        };
        match inventory_command(state, player, item, purpose) {
            Command::Perform(action) => self.perform(action),
            Command::BeginTargeting(item) => {
                let cursor = state.player().position;
                state.log("Select a target location.", color::NEEDS_TARGET);
                self.scene = Scene::Targeting { item, cursor };
            }
            _ => self.scene = Scene::Dungeon,
        }
    }

    fn targeting_input(&mut self, input: PlayerInput, item: EntityId, cursor: Position) {
        let Some(state) = self.state.as_ref() else {
            self.scene = Scene::MainMenu;
            return;
        };
        let player = state.player_id;
        match input {
            PlayerInput::Move(direction) => {
                let moved = cursor + direction.to_delta();
                let cursor = Position::new(
                    clamp_i32(moved.x, 0, state.grid.width - 1),
                    clamp_i32(moved.y, 0, state.grid.height - 1),
                );
                self.scene = Scene::Targeting { item, cursor };
            }
            PlayerInput::Confirm => self.perform(Action::use_item(player, item, Some(cursor))),
            PlayerInput::Target(position) if state.grid.in_bounds(position) => {
                self.perform(Action::use_item(player, item, Some(position)))
            }
            PlayerInput::Cancel => self.scene = Scene::Dungeon,
            _ => {}
        }
    }

    fn level_up_input(&mut self, input: PlayerInput) {
        let Some(state) = self.state.as_mut() else {
            self.scene = Scene::MainMenu;
            return;
        };
        let choice = match input {
            PlayerInput::Select(0) => LevelUpChoice::Constitution,
            PlayerInput::Select(1) => LevelUpChoice::Strength,
            PlayerInput::Select(2) => LevelUpChoice::Agility,
            PlayerInput::Select(_) => {
                state.log("Invalid entry.", color::INVALID);
                return;
            }
            _ => return,
        };
        if let Err(e) = state.choose_level_up(choice) {
            error!("Level up rejected: {e}");
        }
        self.scene = scene_for_phase(state.phase);
    }

    /// Submits a player action and follows the turn engine to the next scene.
    fn perform(&mut self, action: Action) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let outcome = state.submit(action);
        debug!("{:?} -> {:?}", action.kind, outcome);
        self.scene = scene_for_phase(state.phase);
    }

    /// Saves the current game unless the player is dead.
    fn save_live_game(&self) {
        let Some(state) = &self.state else {
            return;
        };
        if state.phase == TurnPhase::GameOver {
            return;
        }
        if let Err(e) = state.save_to_file(&self.save_path) {
            error!("Failed to save game to {}: {e}", self.save_path.display());
        }
    }

    /// Drops a finished game and its save so it cannot be continued.
    fn abandon_dead_game(&mut self) {
        match std::fs::remove_file(&self.save_path) {
            Ok(()) => info!("Removed save file {}", self.save_path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove {}: {e}", self.save_path.display()),
        }
        self.state = None;
        self.scene = Scene::MainMenu;
    }

    /// Draws the current scene.
    pub fn render(&self) {
        let Some(state) = self.state.as_ref().filter(|_| self.scene != Scene::MainMenu) else {
            clear_background(BLACK);
            self.ui.draw_main_menu(&self.display, self.popup());
            return;
        };

        self.display.render_game(state);
        match self.scene {
            Scene::Inventory(purpose) => self.ui.draw_inventory(&self.display, state, purpose),
            Scene::Targeting { item, cursor } => {
                let radius = state
                    .entities
                    .get(item)
                    .and_then(|entity| entity.item())
                    .and_then(|details| details.consumable)
                    .and_then(|consumable| consumable.area_radius());
                self.display.render_targeting(cursor, radius);
            }
            Scene::LevelUp => self.ui.draw_level_up(&self.display, state),
            Scene::CharacterScreen => self.ui.draw_character_screen(&self.display, state),
            Scene::GameOver => self.ui.draw_game_over(&self.display),
            Scene::MainMenu | Scene::Dungeon => {}
        }
    }
}

/// The screen that matches where the turn engine settled.
fn scene_for_phase(phase: TurnPhase) -> Scene {
    match phase {
        TurnPhase::LevelUp => Scene::LevelUp,
        TurnPhase::GameOver => Scene::GameOver,
        _ => Scene::Dungeon,
    }
}
