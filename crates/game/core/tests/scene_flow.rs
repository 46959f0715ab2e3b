//! Scene lifecycle: loading, transitions, on-clear latching and back-navigation.

mod common;

use common::{ally, enemy, enter, on_clear, scene, scripted_game};
use skirmish_core::{
    CombatConfig, Effect, EnemySpec, LogKind, MemorySceneSource, ResourceItem, SceneTemplate,
};

fn gate_and_hall() -> MemorySceneSource {
    let gate = SceneTemplate {
        title: Some("The Gate".to_string()),
        on_clear: on_clear("hall", true),
        ..scene(
            vec![
                ally("Knight", 3, 10, &["strike", "whirlwind"]),
                ally("Archer", 2, 8, &["volley"]),
            ],
            vec![enemy("Rat", 1, 0)],
        )
    };
    let hall = SceneTemplate {
        title: Some("The Hall".to_string()),
        parent: Some("gate".to_string()),
        ..scene(
            vec![ally("Stranger", 9, 99, &[])],
            vec![enemy("Ogre", 30, 5), enemy("Imp", 4, 1)],
        )
    };
    MemorySceneSource::new()
        .with_scene("gate", gate)
        .with_scene("hall", hall)
}

#[test]
fn clearing_carries_the_board_forward() {
    let mut game = scripted_game(gate_and_hall(), vec![20, 1]);
    enter(&mut game, "gate");
    let roster: Vec<_> = game
        .get_state()
        .board
        .iter()
        .map(|view| (view.token, view.name.clone()))
        .collect();

    let reply = game.attack_enemy(0, 0);
    assert!(reply.success, "{}", reply.message);

    let state = game.get_state();
    assert_eq!(state.scene.as_deref(), Some("hall"));
    assert_eq!(state.transitions, 1);
    let after: Vec<_> = state
        .board
        .iter()
        .map(|view| (view.token, view.name.clone()))
        .collect();
    assert_eq!(after, roster, "same allies, same order, same ids");
    assert!(!state.board[0].can_attack, "per-turn flags survive the move");

    let enemies: Vec<&str> = state.enemies.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(enemies, vec!["Ogre", "Imp"]);
    assert!(
        state
            .enemies
            .iter()
            .all(|e| roster.iter().all(|(token, _)| token.id != e.token.id)),
        "new enemies get fresh ids"
    );
}

#[test]
fn fresh_load_replaces_the_board() {
    let mut game = scripted_game(gate_and_hall(), vec![]);
    enter(&mut game, "gate");
    enter(&mut game, "hall");

    let state = game.get_state();
    assert_eq!(state.board.len(), 1);
    assert_eq!(state.board[0].name, "Stranger");
    assert_eq!(state.board[0].stamina, CombatConfig::DEFAULT_STAMINA);
    assert_eq!(state.title.as_deref(), Some("The Hall"));
}

#[test]
fn on_clear_fires_exactly_once() {
    let camp = SceneTemplate {
        on_clear: on_clear("nowhere", false),
        ..scene(vec![ally("Knight", 3, 10, &[])], vec![])
    };
    let mut game = scripted_game(MemorySceneSource::new().with_scene("camp", camp), vec![]);
    enter(&mut game, "camp");
    assert_eq!(game.get_state().transitions, 0, "loading never fires the hook");

    game.end_turn();
    game.end_turn();
    game.end_turn();

    let state = game.get_state();
    assert_eq!(state.transitions, 1);
    assert_eq!(state.scene.as_deref(), Some("camp"), "failed transition stays put");
    assert_eq!(state.turn, 4);

    let errors: Vec<_> = game
        .pop_logs()
        .into_iter()
        .filter(|entry| entry.kind == LogKind::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text.contains("nowhere"));
}

#[test]
fn killing_blow_then_end_turn_fires_on_clear_once() {
    let camp = SceneTemplate {
        on_clear: on_clear("nowhere", false),
        ..scene(vec![ally("Knight", 3, 10, &[])], vec![enemy("Rat", 1, 0)])
    };
    let mut game = scripted_game(MemorySceneSource::new().with_scene("camp", camp), vec![20, 1]);
    enter(&mut game, "camp");

    let reply = game.attack_enemy(0, 0);
    assert!(reply.success, "{}", reply.message);
    assert_eq!(game.get_state().transitions, 1, "the kill fires the hook");

    game.end_turn();
    game.end_turn();

    let state = game.get_state();
    assert_eq!(state.transitions, 1);
    assert_eq!(state.scene.as_deref(), Some("camp"));
    assert!(state.enemies.is_empty());
    let failures = game
        .pop_logs()
        .into_iter()
        .filter(|entry| entry.kind == LogKind::Error)
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn failed_loads_leave_state_untouched() {
    let broken = scene(vec![ally("Knight", 3, 10, &[])], vec![enemy("Ghost", 0, 2)]);
    let mut game = scripted_game(gate_and_hall().with_scene("broken", broken), vec![]);
    enter(&mut game, "gate");
    let before = game.get_state();

    let missing = game.load_scene("cellar", false);
    assert!(!missing.success);
    assert!(missing.message.contains("not found"));
    assert_eq!(game.get_state(), before);

    let malformed = game.load_scene("broken", false);
    assert!(!malformed.success);
    assert!(malformed.message.contains("malformed"));
    assert_eq!(game.get_state(), before);
}

#[test]
fn go_back_returns_to_parent_with_the_board() {
    let mut game = scripted_game(gate_and_hall(), vec![]);

    let nothing = game.go_back();
    assert!(!nothing.success);
    assert!(nothing.message.contains("no scene"));

    enter(&mut game, "gate");
    let orphan = game.go_back();
    assert!(!orphan.success);
    assert!(orphan.message.contains("no parent"));

    let roster: Vec<_> = game.get_state().board.iter().map(|v| v.token).collect();
    assert!(game.load_scene("hall", true).success);
    assert!(game.go_back().success);

    let state = game.get_state();
    assert_eq!(state.scene.as_deref(), Some("gate"));
    assert_eq!(state.board.iter().map(|v| v.token).collect::<Vec<_>>(), roster);
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].hp, 1, "enemies are rebuilt from the template");
}

#[test]
fn death_hook_can_change_scene() {
    let boss = EnemySpec {
        on_death: vec![
            Effect::message("The warlord falls."),
            Effect::transition("epilogue", true),
        ],
        ..enemy("Warlord", 2, 0)
    };
    let throne = SceneTemplate {
        on_clear: on_clear("elsewhere", false),
        ..scene(vec![ally("Knight", 3, 10, &[])], vec![boss])
    };
    let epilogue = SceneTemplate {
        title: Some("Epilogue".to_string()),
        ..SceneTemplate::default()
    };
    let source = MemorySceneSource::new()
        .with_scene("throne", throne)
        .with_scene("epilogue", epilogue);
    let mut game = scripted_game(source, vec![20, 3]);
    enter(&mut game, "throne");

    assert!(game.attack_enemy(0, 0).success);

    let state = game.get_state();
    assert_eq!(state.scene.as_deref(), Some("epilogue"));
    assert_eq!(state.transitions, 1, "on-clear does not also fire");
    assert_eq!(state.board[0].name, "Knight");
    assert!(state.enemies.is_empty());

    let texts: Vec<String> = game.pop_logs().into_iter().map(|e| e.text).collect();
    let falls = texts.iter().position(|t| t == "The warlord falls.");
    let entered = texts.iter().position(|t| t == "Entered Epilogue.");
    assert!(falls.is_some() && entered.is_some());
    assert!(falls < entered);
}

#[test]
fn loot_lands_in_resources() {
    let chest = EnemySpec {
        on_death: vec![Effect::DropLoot],
        drops: vec![ResourceItem::new("Gold", "currency", 25)],
        ..enemy("Mimic", 1, 0)
    };
    let source = MemorySceneSource::new().with_scene(
        "vault",
        SceneTemplate {
            resources: vec![ResourceItem::new("Torch", "tool", 1)],
            ..scene(
                vec![ally("Knight", 3, 10, &[])],
                vec![chest, enemy("Bat", 5, 0)],
            )
        },
    );
    let mut game = scripted_game(source, vec![20, 1]);
    enter(&mut game, "vault");

    assert!(game.attack_enemy(0, 0).success);

    let state = game.get_state();
    let names: Vec<&str> = state.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Torch", "Gold"]);
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].name, "Bat");
}

#[test]
fn new_turn_readies_the_board() {
    let source = MemorySceneSource::new().with_scene(
        "pit",
        scene(
            vec![ally("Knight", 3, 10, &["whirlwind"])],
            vec![enemy("Slime", 20, 0), enemy("Slime", 20, 0)],
        ),
    );
    let mut game = scripted_game(source, vec![8, 1, 1]);
    enter(&mut game, "pit");

    assert!(game.attack_enemy(0, 0).success);
    assert!(game.use_skill("whirlwind", 0, None).success);
    let spent = game.get_state();
    assert!(!spent.board[0].can_attack);
    assert_eq!(spent.board[0].stamina, 0);

    game.end_turn();
    let ready = game.get_state();
    assert!(ready.board[0].can_attack);
    assert_eq!(ready.board[0].stamina, CombatConfig::DEFAULT_STAMINA);
    assert_eq!(ready.turn, 2);
}
