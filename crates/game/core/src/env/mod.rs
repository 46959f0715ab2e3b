//! Collaborators the engine consults but does not own the state of: dice and
//! scene templates.

mod rng;
mod scenes;

pub use rng::{Dice, PcgRng, RngOracle, ScriptedDice, SeededDice, compute_seed};
pub use scenes::{
    BoardSpec, ClearAction, EnemySpec, MemorySceneSource, OnClear, SceneError, SceneSource,
    SceneTemplate, SceneTransition,
};
