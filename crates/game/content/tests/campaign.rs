//! Plays the bundled data directory through the core controller.

use std::path::PathBuf;

use skirmish_content::ContentFactory;
use skirmish_core::{Capability, EquipSlot, SelectMode};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn bundled_content_parses() {
    let factory = ContentFactory::new(data_dir());

    let config = factory.load_config().unwrap();
    assert_eq!(config.game_seed, 24301);

    let skills = factory.load_skills().unwrap();
    assert_eq!(skills.len(), 4);
    assert_eq!(skills.get("whirlwind").unwrap().target.select, SelectMode::Aoe);

    let village = factory.load_scene("village").unwrap();
    assert_eq!(village.board.len(), 2);

    let forest = factory.load_scene("forest").unwrap();
    assert_eq!(forest.parent.as_deref(), Some("village"));
    assert!(forest.validate().is_ok());
}

#[test]
fn village_board_is_equipped() {
    let mut game = ContentFactory::new(data_dir()).build_game().unwrap();
    let reply = game.load_scene("village", false);
    assert!(reply.success, "{}", reply.message);

    let state = game.get_state();
    assert_eq!(state.title.as_deref(), Some("Village Square"));

    let knight = &state.board[0];
    assert_eq!(knight.attack, 5);
    assert_eq!(knight.defense, 1);
    assert_eq!(knight.armor_class, 11);
    assert!(
        knight
            .equipment
            .iter()
            .all(|(slot, _)| *slot != EquipSlot::RightHand)
    );

    let cleric = &state.board[1];
    assert_eq!(cleric.stamina, 4);
    assert_eq!(cleric.tags, vec![Capability::NoCounter]);
}

#[test]
fn travel_and_return_keep_the_party() {
    let mut game = ContentFactory::new(data_dir()).build_game().unwrap();
    assert!(game.load_scene("village", false).success);
    let party: Vec<_> = game.get_state().board.iter().map(|v| v.token).collect();

    assert!(game.load_scene("forest", true).success);
    let forest = game.get_state();
    assert_eq!(forest.title.as_deref(), Some("Dark Forest"));
    assert_eq!(forest.board.iter().map(|v| v.token).collect::<Vec<_>>(), party);
    assert_eq!(forest.enemies.len(), 2);

    assert!(game.go_back().success);
    let village = game.get_state();
    assert_eq!(village.scene.as_deref(), Some("village"));
    assert_eq!(village.board.iter().map(|v| v.token).collect::<Vec<_>>(), party);
}
