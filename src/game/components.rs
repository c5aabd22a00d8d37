//! # Components
//!
//! Capability data attached to actors and items. Components never reach back to
//! their owner; anything that needs the owner (death, equipment bonuses, log
//! messages) goes through [`GameState`](crate::GameState).

use crate::game::EntityId;
use serde::{Deserialize, Serialize};

/// Combat statistics.
///
/// `hp` is kept in `[0, max_hp]` by every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    max_hp: i32,
    hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::Fighter;
    ///
    /// let mut fighter = Fighter::new(30, 2, 5);
    /// assert_eq!(fighter.hp(), 30);
    /// assert_eq!(fighter.heal(10), 0);
    ///
    /// let broken = Fighter::new(-3, 0, 0);
    /// assert_eq!(broken.max_hp(), 0);
    /// ```
    pub fn new(hp: i32, base_defense: i32, base_power: i32) -> Self {
        let max_hp = hp.max(0);
        Self {
            max_hp,
            hp: max_hp,
            base_defense,
            base_power,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_at_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Writes hp, clamped. Returns true if hp is now zero.
    ///
    /// Death is resolved by the caller; outside the crate hp is written
    /// through [`GameState::set_hp`](crate::GameState::set_hp).
    pub(crate) fn set_hp(&mut self, value: i32) -> bool {
        self.hp = value.clamp(0, self.max_hp);
        self.hp == 0
    }

    /// Subtracts `amount` from hp. Returns true if hp is now zero.
    pub(crate) fn take_damage(&mut self, amount: i32) -> bool {
        self.set_hp(self.hp - amount)
    }

    /// Restores up to `amount` hp and returns how much was actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_at_full_health() {
            return 0;
        }
        let before = self.hp;
        self.set_hp(self.hp + amount.max(0));
        self.hp - before
    }

    /// Raises max hp and heals by the same amount.
    pub fn increase_max_hp(&mut self, amount: i32) {
        self.max_hp += amount;
        self.set_hp(self.hp + amount);
    }
}

/// Carried items, by handle.
///
/// Capacity is enforced by the pickup action, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<EntityId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    /// Removes an item handle, returning whether it was carried.
    pub fn remove(&mut self, item: EntityId) -> bool {
        match self.items.iter().position(|&i| i == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Experience and character level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub current_level: u32,
    pub current_xp: u32,
    /// Zero disables experience gain entirely
    pub level_up_base: u32,
    pub level_up_factor: u32,
    /// Experience awarded to whoever kills this actor
    pub xp_given: u32,
}

impl Level {
    pub fn new(level_up_base: u32, level_up_factor: u32, xp_given: u32) -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base,
            level_up_factor,
            xp_given,
        }
    }

    /// Experience that must be exceeded to reach the next level.
    ///
    /// # Examples
    ///
    /// ```
    /// use tombs::Level;
    ///
    /// let level = Level::new(200, 150, 0);
    /// assert_eq!(level.experience_to_next_level(), 350);
    /// ```
    pub fn experience_to_next_level(&self) -> u32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.current_xp > self.experience_to_next_level()
    }

    /// Banks experience. Returns false when nothing was gained.
    pub fn add_xp(&mut self, xp: u32) -> bool {
        if xp == 0 || self.level_up_base == 0 {
            return false;
        }
        self.current_xp += xp;
        true
    }

    /// Spends the threshold's worth of experience on one level.
    pub fn increase_level(&mut self) {
        self.current_xp = self
            .current_xp
            .saturating_sub(self.experience_to_next_level());
        self.current_level += 1;
    }
}

/// Which slot an equippable item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// Stat bonuses an item grants while equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipmentSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

impl Equippable {
    pub fn weapon(power_bonus: i32) -> Self {
        Self {
            slot: EquipmentSlot::Weapon,
            power_bonus,
            defense_bonus: 0,
        }
    }

    pub fn armor(defense_bonus: i32) -> Self {
        Self {
            slot: EquipmentSlot::Armor,
            power_bonus: 0,
            defense_bonus,
        }
    }
}

/// Handles of the items an actor currently has equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<EntityId>,
    pub armor: Option<EntityId>,
}

impl Equipment {
    pub fn item_in(&self, slot: EquipmentSlot) -> Option<EntityId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<EntityId>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
        }
    }

    pub fn is_equipped(&self, item: EntityId) -> bool {
        self.weapon == Some(item) || self.armor == Some(item)
    }

    pub fn equipped(&self) -> impl Iterator<Item = EntityId> {
        self.weapon.into_iter().chain(self.armor)
    }
}
