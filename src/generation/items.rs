//! # Item Generation
//!
//! Item templates and their depth tables.

use crate::game::{Consumable, Entity, Equippable, Item, Rgb};
use crate::generation::utils::{eligible_weights, step_value};
use serde::{Deserialize, Serialize};

/// Most items a room may hold, by minimum depth.
pub const MAX_ITEMS_BY_FLOOR: &[(u32, u32)] = &[(1, 1), (4, 2)];

/// Spawn weights by minimum depth; later rows override earlier ones.
pub const ITEM_CHANCES: &[(u32, &[(ItemKind, u32)])] = &[
    (0, &[(ItemKind::HealthPotion, 35)]),
    (2, &[(ItemKind::ConfusionScroll, 10)]),
    (4, &[(ItemKind::LightningScroll, 25), (ItemKind::Sword, 5)]),
    (
        6,
        &[
            (ItemKind::FireCubeScroll, 25),
            (ItemKind::ChainMail, 15),
            (ItemKind::Sword, 5),
        ],
    ),
];

const SCROLL_GLYPH: char = '~';
const BLADE_COLOR: Rgb = Rgb::new(0, 191, 255);
const ARMOR_COLOR: Rgb = Rgb::new(139, 69, 19);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    ConfusionScroll,
    LightningScroll,
    FireCubeScroll,
    Dagger,
    Sword,
    LeatherArmor,
    ChainMail,
}

impl ItemKind {
    /// Builds a fresh item of this kind at the origin.
    pub fn build(self) -> Entity {
        let consumable = |name: &str, glyph: char, color: Rgb, effect: Consumable| {
            Entity::new_item(
                name,
                glyph,
                color,
                Item {
                    consumable: Some(effect),
                    equippable: None,
                },
            )
        };
        let gear = |name: &str, glyph: char, color: Rgb, equippable: Equippable| {
            Entity::new_item(
                name,
                glyph,
                color,
                Item {
                    consumable: None,
                    equippable: Some(equippable),
                },
            )
        };

        match self {
            ItemKind::HealthPotion => consumable(
                "Health Potion",
                '!',
                Rgb::new(127, 0, 255),
                Consumable::Healing { amount: 4 },
            ),
            ItemKind::ConfusionScroll => consumable(
                "Confusion Scroll",
                SCROLL_GLYPH,
                Rgb::new(207, 63, 255),
                Consumable::Confusion { turns: 10 },
            ),
            ItemKind::LightningScroll => consumable(
                "Lightning Scroll",
                SCROLL_GLYPH,
                Rgb::new(255, 255, 0),
                Consumable::LightningDamage { damage: 20, max_range: 5 },
            ),
            ItemKind::FireCubeScroll => consumable(
                "Firecube Scroll",
                SCROLL_GLYPH,
                Rgb::new(255, 0, 0),
                Consumable::FireCube { damage: 12, radius: 3 },
            ),
            ItemKind::Dagger => gear("Dagger", '/', BLADE_COLOR, Equippable::weapon(2)),
            ItemKind::Sword => gear("Sword", '/', BLADE_COLOR, Equippable::weapon(4)),
            ItemKind::LeatherArmor => gear("Leather Armor", '[', ARMOR_COLOR, Equippable::armor(1)),
            ItemKind::ChainMail => gear("Chain Mail", '[', ARMOR_COLOR, Equippable::armor(3)),
        }
    }
}

pub fn max_items_for_floor(depth: u32) -> u32 {
    step_value(MAX_ITEMS_BY_FLOOR, depth)
}

pub fn item_weights(depth: u32) -> Vec<(ItemKind, u32)> {
    eligible_weights(ITEM_CHANCES, depth)
}
