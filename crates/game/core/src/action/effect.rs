//! Scripted effects attached to combatants.
//!
//! On-death hooks are data, not callables: each hook is an [`Effect`]
//! variant with its payload. The single interpreter lives in
//! [`crate::combat::death`], which applies them in declaration order.

use crate::env::SceneTransition;

/// The actual effect to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Effect {
    /// Move the owner's `drops` into the resources zone.
    DropLoot,

    /// Deal fixed damage to whoever landed the killing blow.
    Retaliate { damage: u32 },

    /// Heal every surviving member of the owner's zone.
    HealAllies { amount: u32 },

    /// Replace the active scene.
    Transition { to: String, preserve_board: bool },

    /// Emit an informational log line.
    Message { text: String },
}

impl Effect {
    pub fn transition(to: impl Into<String>, preserve_board: bool) -> Self {
        Self::Transition {
            to: to.into(),
            preserve_board,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// Scene change requested by this effect, if any.
    pub fn scene_transition(&self) -> Option<SceneTransition> {
        match self {
            Self::Transition { to, preserve_board } => Some(SceneTransition {
                to: to.clone(),
                preserve_board: *preserve_board,
            }),
            _ => None,
        }
    }
}
