//! Read-only state snapshot handed to presentation layers.

use crate::action::{TargetingSession, TargetingState};
use crate::config::CombatConfig;
use crate::state::{Capability, Combatant, EquipSlot, ResourceItem, Side, TargetToken};

use super::Game;

/// Presentation view of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub token: TargetToken,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub stamina: u32,
    pub stamina_max: u32,
    pub attack: u32,
    pub defense: i32,
    pub armor_class: i32,
    pub can_attack: bool,
    pub tags: Vec<Capability>,
    pub skills: Vec<String>,
    pub equipment: Vec<(EquipSlot, String)>,
}

impl CombatantView {
    pub fn new(side: Side, combatant: &Combatant, config: &CombatConfig) -> Self {
        Self {
            token: TargetToken::new(side, combatant.id),
            name: combatant.name.clone(),
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            stamina: combatant.stamina(),
            stamina_max: combatant.stamina_max(),
            attack: combatant.total_attack(),
            defense: combatant.total_defense(),
            armor_class: combatant.armor_class(config.base_armor_class),
            can_attack: combatant.can_attack,
            tags: combatant.tags.labels(),
            skills: combatant.skills.clone(),
            equipment: combatant
                .equipment()
                .items()
                .map(|(slot, item)| (slot, item.name.clone()))
                .collect(),
        }
    }
}

/// Presentation view of an interactive targeting session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingSnapshot {
    pub skill: String,
    pub source: TargetToken,
    pub state: TargetingState,
    pub candidates: Vec<TargetToken>,
    pub selected: Vec<TargetToken>,
}

impl From<&TargetingSession> for TargetingSnapshot {
    fn from(session: &TargetingSession) -> Self {
        Self {
            skill: session.skill().to_string(),
            source: session.source(),
            state: session.state(),
            candidates: session.candidates().to_vec(),
            selected: session.selected().to_vec(),
        }
    }
}

/// Everything a renderer needs to draw the current match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub scene: Option<String>,
    pub title: Option<String>,
    pub parent: Option<String>,
    pub turn: u32,
    pub transitions: u32,
    pub enemies: Vec<CombatantView>,
    pub board: Vec<CombatantView>,
    pub resources: Vec<ResourceItem>,
    pub targeting: Option<TargetingSnapshot>,
}

impl Game {
    pub fn get_state(&self) -> GameSnapshot {
        let view = |side: Side| -> Vec<CombatantView> {
            self.field
                .zone(side)
                .iter()
                .map(|c| CombatantView::new(side, c, &self.config))
                .collect()
        };
        GameSnapshot {
            scene: self.scene.as_ref().map(|s| s.path.clone()),
            title: self.scene.as_ref().and_then(|s| s.title.clone()),
            parent: self.scene.as_ref().and_then(|s| s.parent.clone()),
            turn: self.turn,
            transitions: self.transitions,
            enemies: view(Side::Enemy),
            board: view(Side::Ally),
            resources: self.field.resources.clone(),
            targeting: self.session.as_ref().map(TargetingSnapshot::from),
        }
    }
}
