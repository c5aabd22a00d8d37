//! # Input Module
//!
//! Input handling for player interactions.
//!
//! Raw keyboard and mouse events are decoded here into [`PlayerInput`]
//! intents. What an intent means depends on the screen that receives it; the
//! [`commands`] module turns dungeon intents into game actions.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, Position};
use macroquad::prelude::*;

/// Which family of bindings is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Walking around the dungeon
    Dungeon,
    /// A lettered menu is open
    Menu,
    /// Picking a cell for a targeted item
    Targeting,
}

/// Player intents decoded from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step, attack or nudge the targeting cursor
    Move(Direction),
    /// Pass the turn
    Wait,
    PickUp,
    /// Open the use/equip menu
    OpenInventory,
    /// Open the drop menu
    OpenDropMenu,
    /// Take the stairs down
    Descend,
    CharacterScreen,
    /// Back out of the current screen
    Cancel,
    Confirm,
    /// Pick the menu entry with this zero-based letter index
    Select(usize),
    /// A map cell chosen with the mouse
    Target(Position),
}

const LETTER_KEYS: [KeyCode; 26] = [
    KeyCode::A,
    KeyCode::B,
    KeyCode::C,
    KeyCode::D,
    KeyCode::E,
    KeyCode::F,
    KeyCode::G,
    KeyCode::H,
    KeyCode::I,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
    KeyCode::M,
    KeyCode::N,
    KeyCode::O,
    KeyCode::P,
    KeyCode::Q,
    KeyCode::R,
    KeyCode::S,
    KeyCode::T,
    KeyCode::U,
    KeyCode::V,
    KeyCode::W,
    KeyCode::X,
    KeyCode::Y,
    KeyCode::Z,
];

/// Menu letter for a zero-based entry index.
pub fn menu_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Input handler for processing player commands.
///
/// Polls macroquad once per frame and returns at most one intent.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjklyubn)
    pub vi_keys_enabled: bool,
    /// Size of one map cell on screen, for mouse targeting
    pub cell_size: Vec2,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.vi_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
            cell_size: Vec2::new(16.0, 16.0),
        }
    }

    pub fn with_cell_size(mut self, cell_size: Vec2) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Gets the current input if any bound key was pressed this frame.
    pub fn get_input(&self, mode: InputMode) -> Option<PlayerInput> {
        if mode == InputMode::Targeting && is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            return Some(PlayerInput::Target(self.screen_to_cell(x, y)));
        }

        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        get_keys_pressed()
            .into_iter()
            .find_map(|key| self.translate_key(mode, key, shift))
    }

    pub fn screen_to_cell(&self, x: f32, y: f32) -> Position {
        Position::new(
            (x / self.cell_size.x).floor() as i32,
            (y / self.cell_size.y).floor() as i32,
        )
    }

    /// Maps one key press to an intent for the given mode.
    pub fn translate_key(&self, mode: InputMode, key: KeyCode, shift: bool) -> Option<PlayerInput> {
        match key {
            KeyCode::Escape => return Some(PlayerInput::Cancel),
            KeyCode::Enter | KeyCode::KpEnter => return Some(PlayerInput::Confirm),
            _ => {}
        }

        if mode == InputMode::Menu {
            return LETTER_KEYS
                .iter()
                .position(|&letter| letter == key)
                .map(PlayerInput::Select);
        }

        if let Some(direction) = self.direction_for(key) {
            return Some(PlayerInput::Move(direction));
        }
        if mode == InputMode::Targeting {
            return None;
        }

        match key {
            KeyCode::Period if shift => Some(PlayerInput::Descend),
            KeyCode::Period | KeyCode::Kp5 | KeyCode::Space => Some(PlayerInput::Wait),
            KeyCode::G | KeyCode::Comma => Some(PlayerInput::PickUp),
            KeyCode::I => Some(PlayerInput::OpenInventory),
            KeyCode::D => Some(PlayerInput::OpenDropMenu),
            KeyCode::C => Some(PlayerInput::CharacterScreen),
            _ => None,
        }
    }

    fn direction_for(&self, key: KeyCode) -> Option<Direction> {
        let direction = match key {
            KeyCode::Up | KeyCode::Kp8 => Direction::North,
            KeyCode::Down | KeyCode::Kp2 => Direction::South,
            KeyCode::Left | KeyCode::Kp4 => Direction::West,
            KeyCode::Right | KeyCode::Kp6 => Direction::East,
            KeyCode::Home | KeyCode::Kp7 => Direction::Northwest,
            KeyCode::PageUp | KeyCode::Kp9 => Direction::Northeast,
            KeyCode::End | KeyCode::Kp1 => Direction::Southwest,
            KeyCode::PageDown | KeyCode::Kp3 => Direction::Southeast,
            _ if self.vi_keys_enabled => match key {
                KeyCode::K => Direction::North,
                KeyCode::J => Direction::South,
                KeyCode::H => Direction::West,
                KeyCode::L => Direction::East,
                KeyCode::Y => Direction::Northwest,
                KeyCode::U => Direction::Northeast,
                KeyCode::B => Direction::Southwest,
                KeyCode::N => Direction::Southeast,
                _ => return None,
            },
            _ => return None,
        };
        Some(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dungeon_bindings() {
        let handler = InputHandler::new();
        let key = |k, shift| handler.translate_key(InputMode::Dungeon, k, shift);

        assert_eq!(key(KeyCode::Up, false), Some(PlayerInput::Move(Direction::North)));
        assert_eq!(key(KeyCode::N, false), Some(PlayerInput::Move(Direction::Southeast)));
        assert_eq!(key(KeyCode::Kp7, false), Some(PlayerInput::Move(Direction::Northwest)));
        assert_eq!(key(KeyCode::Period, false), Some(PlayerInput::Wait));
        assert_eq!(key(KeyCode::Period, true), Some(PlayerInput::Descend));
        assert_eq!(key(KeyCode::G, false), Some(PlayerInput::PickUp));
        assert_eq!(key(KeyCode::D, false), Some(PlayerInput::OpenDropMenu));
        assert_eq!(key(KeyCode::Escape, false), Some(PlayerInput::Cancel));
        assert_eq!(key(KeyCode::F5, false), None);
    }

    #[test]
    fn test_menu_bindings_are_letters() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.translate_key(InputMode::Menu, KeyCode::A, false),
            Some(PlayerInput::Select(0))
        );
        assert_eq!(
            handler.translate_key(InputMode::Menu, KeyCode::K, false),
            Some(PlayerInput::Select(10))
        );
        assert_eq!(handler.translate_key(InputMode::Menu, KeyCode::Up, false), None);
        assert_eq!(menu_letter(10), 'k');
    }

    #[test]
    fn test_targeting_only_moves_the_cursor() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.translate_key(InputMode::Targeting, KeyCode::H, false),
            Some(PlayerInput::Move(Direction::West))
        );
        assert_eq!(handler.translate_key(InputMode::Targeting, KeyCode::G, false), None);
        assert_eq!(
            handler.translate_key(InputMode::Targeting, KeyCode::Enter, false),
            Some(PlayerInput::Confirm)
        );
    }

    #[test]
    fn test_vi_keys_can_be_disabled() {
        let mut handler = InputHandler::new();
        handler.vi_keys_enabled = false;
        assert_eq!(handler.translate_key(InputMode::Dungeon, KeyCode::H, false), None);
        assert_eq!(
            handler.translate_key(InputMode::Dungeon, KeyCode::Left, false),
            Some(PlayerInput::Move(Direction::West))
        );
    }

    #[test]
    fn test_screen_to_cell() {
        let handler = InputHandler::new().with_cell_size(Vec2::new(10.0, 20.0));
        assert_eq!(handler.screen_to_cell(35.0, 41.0), Position::new(3, 2));
    }
}
