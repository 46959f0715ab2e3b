//! Deterministic combat rules for a turn-based party-vs-monsters game.
//!
//! `skirmish-core` defines the canonical rules (combatants, equipment,
//! skill targeting, combat resolution, scene and turn lifecycle) and exposes
//! plain APIs that presentation layers and content tools build on. All match
//! state is owned by [`engine::Game`]; the core performs no file I/O and
//! installs no logging subscriber.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod log;
pub mod state;

pub use action::{
    Effect, Fallback, SelectMode, SkillCatalog, SkillDef, SkillEffect, SkillTargetSpec,
    TargetPredicate, TargetView, TargetingError, TargetingSession, TargetingStart,
    TargetingState, TeamFilter,
};
pub use combat::{AttackOutcome, AttackReport, CombatError, CombatResolver, SkillReport};
pub use config::CombatConfig;
pub use engine::{ActionError, ActionReply, CombatantView, Game, GameSnapshot, TargetingSnapshot};
pub use env::{
    BoardSpec, ClearAction, Dice, EnemySpec, MemorySceneSource, OnClear, SceneError,
    SceneSource, SceneTemplate, SceneTransition, ScriptedDice, SeededDice,
};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use events::{EntityEvent, EventSink, NoopSink};
pub use log::{LogEntry, LogKind, LogMeta, LogQueue};
pub use state::{
    AbilityScores, Battlefield, Capability, CapabilitySet, Combatant, CombatantBuilder,
    EntityId, EquipError, EquipSlot, Equipment, EquipmentBuilder, Item, ItemKind,
    ResourceItem, Side, StaminaError, TargetToken, TokenParseError, Zone,
};
