//! # Utilities Module
//!
//! Grid geometry, field of view and pathfinding used by the game core.

pub mod fov;
pub mod math;
pub mod pathfinding;

pub use fov::*;
pub use math::*;
pub use self::pathfinding::*;
