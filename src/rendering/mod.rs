//! # Rendering Module
//!
//! Character-grid rendering with macroquad. The core never calls into this
//! module; it only reads the game state each frame.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
