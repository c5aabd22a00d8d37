//! # Tombs Roguelike
//!
//! A turn-based dungeon crawler: procedurally generated floors, monsters that hunt
//! the player, scrolls and potions, equipment, and character levels.
//!
//! ## Architecture Overview
//!
//! - **Game State**: a single [`GameState`] owns the current floor, the entity arena,
//!   the message log and the turn state machine
//! - **Entity Arena**: every placed thing lives in an [`EntityArena`] keyed by
//!   [`EntityId`]; grids and inventories only hold handles
//! - **Action System**: closed [`ActionKind`] variants, each validated by one
//!   `perform` that either mutates state or returns [`Impossible`]
//! - **Generation System**: room-and-corridor floors populated from depth tables
//! - **Rendering System**: macroquad glyph rendering of the frame data the core exposes

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

pub use game::{
    Action, ActionKind, ActionResult, Ai, Consumable, Direction, Entity, EntityArena, EntityId,
    EntityKind, Equipment, EquipmentSlot, Equippable, Fighter, GameState, Grid, Impossible,
    Inventory, Level, LevelUpChoice, Message, MessageLog, Position, RenderOrder, Rgb, Tile,
    TileGraphic, TurnOutcome, TurnPhase, World,
};

pub use generation::{GenerationConfig, ItemKind, MonsterKind, Room, RoomCorridorGenerator};

pub use rendering::{MacroquadDisplay, UI};

pub use scenes::{Scene, SceneManager, SceneSignal};

/// Core error type for the Tombs game engine.
///
/// Recoverable per-action failures never use this type; they travel as
/// [`Impossible`] through [`ActionResult`].
#[derive(thiserror::Error, Debug)]
pub enum TombsError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (configuration) serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Binary save blob could not be encoded or decoded
    #[error("Save encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// Generation parameters cannot produce a playable floor
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Tombs codebase.
pub type TombsResult<T> = Result<T, TombsError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: i32 = 80;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: i32 = 43;

    /// Radius of the player's field of view
    pub const FOV_RADIUS: i32 = 8;

    /// Number of item slots the player starts with
    pub const PLAYER_INVENTORY_CAPACITY: usize = 26;

    /// Default save file, relative to the working directory
    pub const SAVE_FILE: &str = "savegame.sav";

    /// Initial window size in pixels
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;

    /// Messages shown in the in-game log panel
    pub const VISIBLE_MESSAGES: usize = 5;
}
