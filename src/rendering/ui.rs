//! # User Interface Elements
//!
//! Menus and overlay screens drawn on top of the map: the main menu, inventory
//! lists, the level-up choice, the character sheet and popups.
//!
//! The text of every screen is built by plain functions so it can be checked
//! without opening a window.

use crate::game::color;
use crate::game::{EntityId, GameState};
use crate::input::{menu_letter, InventoryPurpose};
use crate::rendering::MacroquadDisplay;

pub const MAIN_MENU_TITLE: &str = "TOMBS OF THE ANCIENT KINGS";
pub const MAIN_MENU_OPTIONS: [&str; 3] = ["[N] Play a new game", "[C] Continue last game", "[Q] Quit"];

/// Menu title for an inventory screen.
pub fn inventory_title(purpose: InventoryPurpose) -> &'static str {
    match purpose {
        InventoryPurpose::Use => "Select an item to use",
        InventoryPurpose::Drop => "Select an item to drop",
    }
}

/// Lettered inventory lines, equipped items marked with `(E)`.
pub fn inventory_lines(state: &GameState, actor: EntityId) -> Vec<String> {
    let actor_parts = state.entities.actor(actor);
    actor_parts
        .inventory
        .items
        .iter()
        .enumerate()
        .map(|(index, &item)| {
            let name = &state.entities[item].name;
            if actor_parts.equipment.is_equipped(item) {
                format!("({}) {name} (E)", menu_letter(index))
            } else {
                format!("({}) {name}", menu_letter(index))
            }
        })
        .collect()
}

/// The three stat choices, showing the current value of each.
pub fn level_up_lines(state: &GameState) -> [String; 3] {
    let fighter = &state.entities.actor(state.player_id).fighter;
    [
        format!("a) Constitution (+20 HP, from {})", fighter.max_hp()),
        format!("b) Strength (+1 attack, from {})", fighter.base_power),
        format!("c) Agility (+1 defense, from {})", fighter.base_defense),
    ]
}

pub fn character_lines(state: &GameState) -> Vec<String> {
    let player = state.player_id;
    let level = &state.entities.actor(player).level;
    vec![
        format!("Level: {}", level.current_level),
        format!("XP: {}", level.current_xp),
        format!("XP for next Level: {}", level.experience_to_next_level()),
        format!("Attack: {}", state.entities.power(player)),
        format!("Defense: {}", state.entities.defense(player)),
    ]
}

/// Overlay screens.
pub struct UI {
    /// Left edge of side menus, in cells
    pub menu_x: i32,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self { menu_x: 2 }
    }

    pub fn draw_main_menu(&self, display: &MacroquadDisplay, popup: Option<&str>) {
        let middle = display.rows() / 2;
        display.draw_centered(middle - 4, MAIN_MENU_TITLE, color::MENU_TITLE);
        for (row, option) in MAIN_MENU_OPTIONS.iter().enumerate() {
            display.draw_centered(middle - 1 + row as i32, option, color::MENU_TEXT);
        }
        if let Some(text) = popup {
            self.draw_popup(display, text);
        }
    }

    /// Draws a titled list in a framed box.
    pub fn draw_menu(&self, display: &MacroquadDisplay, title: &str, lines: &[String]) {
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(0) as i32
            + 4;
        let height = lines.len().max(1) as i32 + 2;
        display.draw_frame(self.menu_x, 0, width, height);
        display.draw_text_at(self.menu_x + 1, 0, title, color::MENU_TITLE);
        if lines.is_empty() {
            display.draw_text_at(self.menu_x + 1, 1, "(Empty)", color::MENU_TEXT);
        }
        for (row, line) in lines.iter().enumerate() {
            display.draw_text_at(self.menu_x + 1, row as i32 + 1, line, color::MENU_TEXT);
        }
    }

    pub fn draw_inventory(
        &self,
        display: &MacroquadDisplay,
        state: &GameState,
        purpose: InventoryPurpose,
    ) {
        let lines = inventory_lines(state, state.player_id);
        self.draw_menu(display, inventory_title(purpose), &lines);
    }

    pub fn draw_level_up(&self, display: &MacroquadDisplay, state: &GameState) {
        let mut lines = vec!["Congratulations! You level up!".to_string()];
        lines.push("Select an attribute to increase.".to_string());
        lines.extend(level_up_lines(state));
        self.draw_menu(display, "Level Up", &lines);
    }

    pub fn draw_character_screen(&self, display: &MacroquadDisplay, state: &GameState) {
        self.draw_menu(display, "Character Information", &character_lines(state));
    }

    pub fn draw_game_over(&self, display: &MacroquadDisplay) {
        let middle = display.rows() / 2;
        display.draw_centered(middle, "You have died. Press Escape.", color::PLAYER_DIE);
    }

    /// Draws a one-line notice in the middle of the screen.
    pub fn draw_popup(&self, display: &MacroquadDisplay, text: &str) {
        let width = text.chars().count() as i32 + 4;
        let x = ((display.map_width - width) / 2).max(0);
        let y = display.rows() / 2 + 4;
        display.draw_frame(x, y - 1, width, 3);
        display.draw_text_at(x + 2, y, text, color::ERROR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Entity, Grid, Position, Tile};
    use crate::generation::ItemKind;

    fn carrying(kinds: &[ItemKind]) -> GameState {
        let mut grid = Grid::new(8, 8);
        grid.set_tile(Position::new(2, 2), Tile::floor());
        let mut state = GameState::from_parts(grid, Entity::player().at(Position::new(2, 2)), 1);
        let player = state.player_id;
        for kind in kinds {
            let item = state.entities.insert(kind.build());
            state.entities.actor_mut(player).inventory.items.push(item);
        }
        state
    }

    #[test]
    fn test_inventory_lines_mark_equipment() {
        let mut state = carrying(&[ItemKind::HealthPotion, ItemKind::Dagger]);
        let player = state.player_id;
        let dagger = state.entities.actor(player).inventory.items[1];
        state.toggle_equip(player, dagger, false);

        assert_eq!(
            inventory_lines(&state, player),
            vec!["(a) Health Potion".to_string(), "(b) Dagger (E)".to_string()]
        );
    }

    #[test]
    fn test_level_up_lines_show_current_stats() {
        let state = carrying(&[]);
        let lines = level_up_lines(&state);
        assert_eq!(lines[0], "a) Constitution (+20 HP, from 30)");
        assert_eq!(lines[1], "b) Strength (+1 attack, from 5)");
        assert_eq!(lines[2], "c) Agility (+1 defense, from 2)");
    }

    #[test]
    fn test_character_lines_include_equipment() {
        let mut state = carrying(&[ItemKind::Sword]);
        let player = state.player_id;
        let sword = state.entities.actor(player).inventory.items[0];
        state.toggle_equip(player, sword, false);
        let lines = character_lines(&state);
        assert_eq!(lines[2], "XP for next Level: 350");
        assert_eq!(lines[3], "Attack: 9");
        assert_eq!(lines[4], "Defense: 2");
    }
}
