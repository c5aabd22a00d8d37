//! # Command Definitions
//!
//! Turns decoded intents into what the dungeon screen should do next: submit
//! an action, or open another screen first.

use crate::game::{Action, EntityId, GameState};
use crate::input::PlayerInput;

/// What an inventory menu was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryPurpose {
    /// Use consumables, toggle equipment
    Use,
    Drop,
}

/// The dungeon screen's response to one intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit this action to the turn engine
    Perform(Action),
    OpenInventory(InventoryPurpose),
    OpenCharacterScreen,
    /// Pick a cell for this item before using it
    BeginTargeting(EntityId),
    /// Save and return to the main menu
    SaveAndExit,
}

/// Maps an intent on the dungeon screen to a command.
///
/// # Examples
///
/// ```
/// use tombs::{dungeon_command, Action, Command, Direction, EntityId, PlayerInput};
///
/// let player = EntityId(0);
/// let command = dungeon_command(PlayerInput::Move(Direction::East), player);
/// assert_eq!(command, Some(Command::Perform(Action::bump(player, 1, 0))));
/// ```
pub fn dungeon_command(input: PlayerInput, player: EntityId) -> Option<Command> {
    let command = match input {
        PlayerInput::Move(direction) => {
            let delta = direction.to_delta();
            Command::Perform(Action::bump(player, delta.x, delta.y))
        }
        PlayerInput::Wait => Command::Perform(Action::wait(player)),
        PlayerInput::PickUp => Command::Perform(Action::pickup(player)),
        PlayerInput::Descend => Command::Perform(Action::take_stairs(player)),
        PlayerInput::OpenInventory => Command::OpenInventory(InventoryPurpose::Use),
        PlayerInput::OpenDropMenu => Command::OpenInventory(InventoryPurpose::Drop),
        PlayerInput::CharacterScreen => Command::OpenCharacterScreen,
        PlayerInput::Cancel => Command::SaveAndExit,
        PlayerInput::Confirm | PlayerInput::Select(_) | PlayerInput::Target(_) => return None,
    };
    Some(command)
}

/// Maps picking `item` from an inventory menu to a command.
///
/// Equipment toggles, targeted consumables go to targeting first, anything
/// else is used directly and left for the action to accept or refuse.
pub fn inventory_command(
    state: &GameState,
    player: EntityId,
    item: EntityId,
    purpose: InventoryPurpose,
) -> Command {
    if purpose == InventoryPurpose::Drop {
        return Command::Perform(Action::drop_item(player, item));
    }

    let Some(details) = state.entities.get(item).and_then(|entity| entity.item()) else {
        return Command::Perform(Action::use_item(player, item, None));
    };
    if details.equippable.is_some() {
        return Command::Perform(Action::equip(player, item));
    }
    match details.consumable {
        Some(consumable) if consumable.needs_target() => Command::BeginTargeting(item),
        _ => Command::Perform(Action::use_item(player, item, None)),
    }
}
