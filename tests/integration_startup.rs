//! Integration test to ensure a game can start up without errors.

use tombs::{
    GameState, GenerationConfig, ItemKind, TombsError, TombsResult, TurnPhase,
};

#[test]
fn test_basic_startup() -> TombsResult<()> {
    let game_state = GameState::new_game(GenerationConfig::new(12345))?;

    assert_eq!(game_state.turn_number, 0);
    assert_eq!(game_state.depth(), 1);
    assert_eq!(game_state.phase, TurnPhase::AwaitingInput);
    assert!(game_state.entities.contains(game_state.player_id));
    assert!(game_state.grid.contains_entity(game_state.player_id));

    // The player stands on a walkable, lit cell
    let position = game_state.player().position;
    assert!(game_state.grid.is_walkable(position));
    assert!(game_state.grid.is_visible(position));
    assert!(game_state.grid.is_explored(position));

    Ok(())
}

#[test]
fn test_player_starts_equipped() -> TombsResult<()> {
    let game_state = GameState::new_game(GenerationConfig::new(2024))?;
    let player = game_state.player_id;
    let actor = game_state.entities.actor(player);

    let names: Vec<&str> = actor
        .inventory
        .items
        .iter()
        .map(|&id| game_state.entities[id].name.as_str())
        .collect();
    assert_eq!(names, vec!["Dagger", "Leather Armor"]);
    assert!(actor.inventory.items.iter().all(|&id| actor.equipment.is_equipped(id)));
    assert_eq!(actor.fighter.hp(), 30);
    assert_eq!(game_state.entities.power(player), 5 + 2);
    assert_eq!(game_state.entities.defense(player), 2 + 1);

    // Starting kit names match the templates
    assert_eq!(ItemKind::Dagger.build().name, "Dagger");
    Ok(())
}

#[test]
fn test_same_seed_same_game() -> TombsResult<()> {
    let a = GameState::new_game(GenerationConfig::new(777))?;
    let b = GameState::new_game(GenerationConfig::new(777))?;
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.entities, b.entities);

    let c = GameState::new_game(GenerationConfig::new(778))?;
    assert_ne!(a.grid, c.grid);
    Ok(())
}

#[test]
fn test_config_file_startup() -> TombsResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("small.json");
    std::fs::write(
        &path,
        r#"{
            "seed": 5,
            "map_width": 30,
            "map_height": 20,
            "max_rooms": 4,
            "room_min_size": 4,
            "room_max_size": 6,
            "max_monsters_per_room": 1,
            "max_items_per_room": 0
        }"#,
    )?;

    let config = GenerationConfig::from_json_file(&path)?;
    let game_state = GameState::new_game(config)?;
    assert_eq!(game_state.grid.width, 30);
    assert_eq!(game_state.grid.height, 20);

    // No item was allowed to spawn on the floor
    let floor_items = game_state
        .grid
        .entities
        .iter()
        .filter(|&&id| game_state.entities[id].item().is_some())
        .count();
    assert_eq!(floor_items, 0);
    Ok(())
}

#[test]
fn test_unplayable_config_is_refused() {
    let mut config = GenerationConfig::new(1);
    config.room_max_size = 60;
    config.map_height = 43;
    match GameState::new_game(config) {
        Err(TombsError::InvalidConfig(reason)) => assert!(reason.contains("fit")),
        other => panic!("expected an invalid config error, got {:?}", other.map(|_| ())),
    }
}
