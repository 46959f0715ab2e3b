#![allow(dead_code)]

use skirmish_core::{
    BoardSpec, CombatConfig, EnemySpec, Game, MemorySceneSource, OnClear, ClearAction,
    SceneTemplate, ScriptedDice,
};

/// Routes engine diagnostics to the test writer. `RUST_LOG=debug` shows rolls.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ally(name: &str, atk: u32, hp: u32, skills: &[&str]) -> BoardSpec {
    BoardSpec {
        atk,
        hp,
        name: Some(name.to_string()),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..BoardSpec::default()
    }
}

pub fn enemy(name: &str, hp: u32, attack: u32) -> EnemySpec {
    EnemySpec {
        name: name.to_string(),
        hp,
        attack,
        ..EnemySpec::default()
    }
}

pub fn scene(board: Vec<BoardSpec>, enemies: Vec<EnemySpec>) -> SceneTemplate {
    SceneTemplate {
        board,
        enemies,
        ..SceneTemplate::default()
    }
}

pub fn on_clear(to: &str, preserve_board: bool) -> Option<OnClear> {
    Some(OnClear {
        action: ClearAction::Transition,
        to: to.to_string(),
        preserve_board,
    })
}

/// A game over `source` whose first rolls are forced.
pub fn scripted_game(source: MemorySceneSource, rolls: Vec<u32>) -> Game {
    init_tracing();
    Game::new(CombatConfig::default(), Box::new(source))
        .with_dice(Box::new(ScriptedDice::new(rolls)))
}

/// Loads `path` and panics if it fails.
pub fn enter(game: &mut Game, path: &str) {
    let reply = game.load_scene(path, false);
    assert!(reply.success, "loading {path}: {}", reply.message);
    game.pop_logs();
}
