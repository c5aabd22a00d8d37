//! # Colors
//!
//! Plain RGB triples used by tiles, entities and the message log, plus the
//! named palette the rest of the game draws from.

use serde::{Deserialize, Serialize};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Scales every channel by `factor`, saturating at the channel bounds.
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self(scale(self.0), scale(self.1), scale(self.2))
    }
}

pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

pub const PLAYER_ATTACK: Rgb = Rgb::new(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATTACK: Rgb = Rgb::new(0xFF, 0xC0, 0xC0);
pub const NEEDS_TARGET: Rgb = Rgb::new(0x3F, 0xFF, 0xFF);
pub const STATUS_EFFECT_APPLIED: Rgb = Rgb::new(0x3F, 0xFF, 0x3F);
pub const DESCEND: Rgb = Rgb::new(0x9F, 0x3F, 0xFF);

pub const PLAYER_DIE: Rgb = Rgb::new(0xFF, 0x30, 0x30);
pub const ENEMY_DIE: Rgb = Rgb::new(0xFF, 0xA0, 0x30);

pub const INVALID: Rgb = Rgb::new(0xFF, 0xFF, 0x00);
pub const IMPOSSIBLE: Rgb = Rgb::new(0x80, 0x80, 0x80);
pub const ERROR: Rgb = Rgb::new(0xFF, 0x40, 0x40);

pub const WELCOME_TEXT: Rgb = Rgb::new(0x20, 0xA0, 0xFF);
pub const HEALTH_RECOVERED: Rgb = Rgb::new(0x00, 0xFF, 0x00);

pub const BAR_TEXT: Rgb = WHITE;
pub const BAR_FILLED: Rgb = Rgb::new(0x00, 0x60, 0x00);
pub const BAR_EMPTY: Rgb = Rgb::new(0x40, 0x10, 0x10);

pub const MENU_TITLE: Rgb = Rgb::new(0xFF, 0xFF, 0x3F);
pub const MENU_TEXT: Rgb = WHITE;
