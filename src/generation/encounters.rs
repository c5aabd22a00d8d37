//! # Encounter Generation
//!
//! Monster templates and the depth tables that decide how many of them, and
//! which kinds, appear in each room.

use crate::game::{Actor, Ai, Entity, Equipment, Fighter, Inventory, Level, Rgb};
use crate::generation::utils::{eligible_weights, step_value};
use serde::{Deserialize, Serialize};

/// Most monsters a room may hold, by minimum depth.
pub const MAX_MONSTERS_BY_FLOOR: &[(u32, u32)] = &[(1, 2), (4, 3), (6, 5)];

/// Spawn weights by minimum depth; later rows override earlier ones.
pub const MONSTER_CHANCES: &[(u32, &[(MonsterKind, u32)])] = &[
    (0, &[(MonsterKind::Orc, 80)]),
    (3, &[(MonsterKind::Troll, 15)]),
    (5, &[(MonsterKind::Troll, 30)]),
    (7, &[(MonsterKind::Troll, 60)]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Orc,
    Troll,
}

impl MonsterKind {
    /// Builds a fresh monster of this kind at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::MonsterKind;
    ///
    /// let troll = MonsterKind::Troll.build();
    /// assert_eq!(troll.name, "Troll");
    /// assert_eq!(troll.actor().unwrap().level.xp_given, 100);
    /// ```
    pub fn build(self) -> Entity {
        let (name, glyph, color, fighter, xp_given) = match self {
            MonsterKind::Orc => ("Orc", 'o', Rgb::new(63, 127, 63), Fighter::new(10, 0, 3), 35),
            MonsterKind::Troll => ("Troll", 'T', Rgb::new(0, 127, 0), Fighter::new(16, 1, 4), 100),
        };
        Entity::new_actor(
            name,
            glyph,
            color,
            Actor {
                ai: Some(Ai::hostile()),
                fighter,
                inventory: Inventory::new(0),
                level: Level::new(0, 150, xp_given),
                equipment: Equipment::default(),
            },
        )
    }
}

pub fn max_monsters_for_floor(depth: u32) -> u32 {
    step_value(MAX_MONSTERS_BY_FLOOR, depth)
}

pub fn monster_weights(depth: u32) -> Vec<(MonsterKind, u32)> {
    eligible_weights(MONSTER_CHANCES, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_caps_by_depth() {
        assert_eq!(max_monsters_for_floor(1), 2);
        assert_eq!(max_monsters_for_floor(3), 2);
        assert_eq!(max_monsters_for_floor(4), 3);
        assert_eq!(max_monsters_for_floor(10), 5);
    }

    #[test]
    fn test_troll_weight_grows_with_depth() {
        assert_eq!(monster_weights(2), vec![(MonsterKind::Orc, 80)]);
        assert_eq!(
            monster_weights(3),
            vec![(MonsterKind::Orc, 80), (MonsterKind::Troll, 15)]
        );
        assert_eq!(
            monster_weights(8),
            vec![(MonsterKind::Orc, 80), (MonsterKind::Troll, 60)]
        );
    }

    #[test]
    fn test_templates_are_alive_and_blocking() {
        for kind in [MonsterKind::Orc, MonsterKind::Troll] {
            let monster = kind.build();
            assert!(monster.is_alive());
            assert!(monster.blocks_movement);
            assert!(monster.actor().unwrap().fighter.is_at_full_health());
        }
    }
}
