//! Scene templates and the source that produces them.
//!
//! A [`SceneTemplate`] is plain data. The core never parses files: a
//! [`SceneSource`] implementation (file-backed in `skirmish-content`,
//! in-memory here) hands templates to the engine, which instantiates them
//! into zones.

use std::collections::HashMap;

use crate::action::Effect;
use crate::config::CombatConfig;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{
    AbilityScores, Capability, Combatant, EntityId, Equipment, Item, ResourceItem,
};

/// Failures while producing or instantiating a scene.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("scene '{path}' not found")]
    NotFound { path: String },

    #[error("scene '{path}' is malformed: {reason}")]
    Malformed { path: String, reason: String },

    #[error("failed to load scene '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("the current scene has no parent to return to")]
    NoParent,
}

impl GameError for SceneError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::NoParent => ErrorSeverity::Validation,
            Self::Malformed { .. } | Self::LoadFailed { .. } => ErrorSeverity::Internal,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoParent => ErrorKind::InvalidState,
            _ => ErrorKind::SceneLoadFailure,
        }
    }
}

/// A requested change of the active scene.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneTransition {
    pub to: String,
    pub preserve_board: bool,
}

/// Ally entry of a scene template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSpec {
    pub atk: u32,
    pub hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Capability>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stamina: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Option<AbilityScores>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<Item>,
}

impl BoardSpec {
    /// Builds the ally. `index` names unnamed entries.
    pub fn instantiate(
        &self,
        id: EntityId,
        index: usize,
        config: &CombatConfig,
    ) -> Result<Combatant, String> {
        let equipment = self
            .equipment
            .iter()
            .cloned()
            .fold(Equipment::builder(), |builder, item| builder.item(item))
            .build()
            .map_err(|e| e.to_string())?;
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| format!("Ally {}", index + 1));

        let mut builder = Combatant::builder(id, name)
            .attack(self.atk)
            .hp(self.hp)
            .stamina(self.stamina.unwrap_or(config.default_stamina))
            .tags(self.tags.iter().copied().collect())
            .skills(self.skills.iter().cloned())
            .equipment(equipment);
        if let Some(abilities) = &self.abilities {
            builder = builder.abilities(abilities.clone());
        }
        Ok(builder.build())
    }
}

/// Enemy entry of a scene template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_death: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub drops: Vec<ResourceItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Capability>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Option<AbilityScores>,
}

impl EnemySpec {
    pub fn instantiate(&self, id: EntityId) -> Combatant {
        let mut builder = Combatant::builder(id, self.name.clone())
            .attack(self.attack)
            .hp(self.hp)
            .tags(self.tags.iter().copied().collect());
        if let Some(abilities) = &self.abilities {
            builder = builder.abilities(abilities.clone());
        }
        for effect in &self.on_death {
            builder = builder.on_death(effect.clone());
        }
        for item in &self.drops {
            builder = builder.drop_item(item.clone());
        }
        builder.build()
    }
}

/// Action run when the enemy zone empties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ClearAction {
    #[default]
    Transition,
}

/// On-clear hook of a scene template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnClear {
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: ClearAction,
    pub to: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preserve_board: bool,
}

impl OnClear {
    pub fn transition(&self) -> SceneTransition {
        match self.action {
            ClearAction::Transition => SceneTransition {
                to: self.to.clone(),
                preserve_board: self.preserve_board,
            },
        }
    }
}

/// Declarative description of one scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneTemplate {
    pub title: Option<String>,
    pub board: Vec<BoardSpec>,
    pub enemies: Vec<EnemySpec>,
    pub resources: Vec<ResourceItem>,
    pub on_clear: Option<OnClear>,
    #[cfg_attr(feature = "serde", serde(alias = "back_to"))]
    pub parent: Option<String>,
}

impl SceneTemplate {
    /// Rejects templates that would produce an unplayable scene.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(entry) = self.board.iter().position(|b| b.hp == 0) {
            return Err(format!("board entry {entry} has no hp"));
        }
        if let Some(enemy) = self.enemies.iter().find(|e| e.hp == 0) {
            return Err(format!("enemy '{}' has no hp", enemy.name));
        }
        if self.enemies.iter().any(|e| e.name.trim().is_empty()) {
            return Err("enemy without a name".to_string());
        }
        let dangling = self
            .enemies
            .iter()
            .flat_map(|e| e.on_death.iter())
            .filter_map(Effect::scene_transition)
            .chain(self.on_clear.as_ref().map(OnClear::transition))
            .any(|t| t.to.trim().is_empty());
        if dangling {
            return Err("transition without a destination".to_string());
        }
        if self.parent.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("empty parent scene".to_string());
        }
        Ok(())
    }
}

/// Producer of scene templates.
pub trait SceneSource {
    fn load(&self, path: &str) -> Result<SceneTemplate, SceneError>;
}

/// Scene source backed by a map, for tests and embedded content.
#[derive(Clone, Debug, Default)]
pub struct MemorySceneSource {
    scenes: HashMap<String, SceneTemplate>,
}

impl MemorySceneSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, path: impl Into<String>, template: SceneTemplate) -> Self {
        self.insert(path, template);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, template: SceneTemplate) {
        self.scenes.insert(path.into(), template);
    }
}

impl SceneSource for MemorySceneSource {
    fn load(&self, path: &str) -> Result<SceneTemplate, SceneError> {
        self.scenes
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::NotFound {
                path: path.to_string(),
            })
    }
}
