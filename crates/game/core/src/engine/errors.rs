//! Error types for player-facing engine operations.

use crate::action::TargetingError;
use crate::combat::CombatError;
use crate::env::SceneError;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{Side, StaminaError};

/// Errors surfaced while executing a player action.
///
/// Every variant is reported as a failed [`ActionReply`](super::ActionReply);
/// a failed action never consumes stamina or an attack flag.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("no {side} at position {index}")]
    NoSuchCombatant { side: Side, index: usize },

    #[error("{name} has already attacked this turn")]
    AlreadyAttacked { name: String },

    #[error("unknown skill '{skill}'")]
    UnknownSkill { skill: String },

    #[error("{name} does not know {skill}")]
    SkillNotKnown { name: String, skill: String },

    #[error("{reason}")]
    InvalidSkill { skill: String, reason: String },

    #[error("choose a target for {skill}")]
    TargetRequired { skill: String },

    #[error("no targeting in progress")]
    NoActiveSession,

    #[error("no scene is loaded")]
    NoScene,

    #[error(transparent)]
    Targeting(#[from] TargetingError),

    #[error(transparent)]
    Stamina(#[from] StaminaError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Targeting(err) => err.severity(),
            Self::Stamina(err) => err.severity(),
            Self::Combat(err) => err.severity(),
            Self::Scene(err) => err.severity(),
            Self::AlreadyAttacked { .. } | Self::TargetRequired { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Targeting(err) => err.kind(),
            Self::Stamina(err) => err.kind(),
            Self::Combat(err) => err.kind(),
            Self::Scene(err) => err.kind(),
            Self::NoSuchCombatant { .. } | Self::TargetRequired { .. } => ErrorKind::InvalidTarget,
            Self::AlreadyAttacked { .. } | Self::NoActiveSession | Self::NoScene => {
                ErrorKind::InvalidState
            }
            Self::UnknownSkill { .. }
            | Self::SkillNotKnown { .. }
            | Self::InvalidSkill { .. } => ErrorKind::UnknownSkill,
        }
    }
}
