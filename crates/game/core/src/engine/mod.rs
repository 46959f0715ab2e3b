//! Scene/turn controller.
//!
//! [`Game`] owns every piece of match state: the battlefield zones, the
//! loaded scene, the turn counter, the dice, the skill catalog and the
//! pending presentation log. There is no global battlefield; a match is
//! single-owner and runs each call to completion.
//!
//! Player-facing operations return an [`ActionReply`] instead of an error.
//! The failure reason is also appended to the log queue as an `error` entry.

mod actions;
mod errors;
mod scene;
mod snapshot;
mod turns;

pub use errors::ActionError;
pub use snapshot::{CombatantView, GameSnapshot, TargetingSnapshot};

use crate::action::{SkillCatalog, TargetingSession};
use crate::config::CombatConfig;
use crate::env::{Dice, OnClear, SceneSource, SeededDice};
use crate::error::GameError;
use crate::events::EntityEvent;
use crate::log::{LogEntry, LogQueue};
use crate::state::Battlefield;

/// `(success, message)` outcome of a player action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReply {
    pub success: bool,
    pub message: String,
}

impl ActionReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Metadata of the active scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LoadedScene {
    pub path: String,
    pub title: Option<String>,
    pub on_clear: Option<OnClear>,
    pub parent: Option<String>,
    /// Set once the on-clear hook has fired for this load.
    pub cleared: bool,
}

/// A single match.
pub struct Game {
    config: CombatConfig,
    field: Battlefield,
    scene: Option<LoadedScene>,
    turn: u32,
    dice: Box<dyn Dice>,
    skills: SkillCatalog,
    scenes: Box<dyn SceneSource>,
    log: LogQueue,
    events: Vec<EntityEvent>,
    session: Option<TargetingSession>,
    next_id: u32,
    transitions: u32,
}

impl Game {
    /// Creates a match with seeded dice and the built-in skill catalog.
    ///
    /// No scene is loaded; call [`Game::load_scene`] first.
    pub fn new(config: CombatConfig, scenes: Box<dyn SceneSource>) -> Self {
        let dice = Box::new(SeededDice::new(config.game_seed));
        Self {
            config,
            field: Battlefield::default(),
            scene: None,
            turn: 1,
            dice,
            skills: SkillCatalog::builtin(),
            scenes,
            log: LogQueue::new(),
            events: Vec::new(),
            session: None,
            next_id: 1,
            transitions: 0,
        }
    }

    /// Replaces the dice stream (scripted rolls for tests and replays).
    pub fn with_dice(mut self, dice: Box<dyn Dice>) -> Self {
        self.dice = dice;
        self
    }

    pub fn with_skills(mut self, skills: SkillCatalog) -> Self {
        self.skills = skills;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.field
    }

    pub fn skills(&self) -> &SkillCatalog {
        &self.skills
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Number of scene transitions (on-clear and on-death) fired so far.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Path of the loaded scene.
    pub fn scene_path(&self) -> Option<&str> {
        self.scene.as_ref().map(|s| s.path.as_str())
    }

    /// Interactive targeting session in progress, if any.
    pub fn active_targeting(&self) -> Option<&TargetingSession> {
        self.session.as_ref()
    }

    /// Takes every pending presentation log entry, oldest first.
    pub fn pop_logs(&mut self) -> Vec<LogEntry> {
        self.log.drain()
    }

    /// Takes every pending entity notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<EntityEvent> {
        std::mem::take(&mut self.events)
    }

    /// Converts an operation result into a reply, logging failures.
    fn reply(&mut self, operation: &str, result: Result<String, ActionError>) -> ActionReply {
        match result {
            Ok(message) => ActionReply::ok(message),
            Err(err) => {
                tracing::warn!(
                    operation,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    error = %err,
                    "action rejected"
                );
                let message = err.to_string();
                self.log.error(message.clone());
                ActionReply::fail(message)
            }
        }
    }

    /// Drops stale tokens from the active session after a battlefield change.
    fn revalidate_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let state = session.revalidate(&self.field);
            if state.is_terminal() {
                tracing::debug!(skill = session.skill(), %state, "targeting session closed");
                self.session = None;
            }
        }
    }
}
