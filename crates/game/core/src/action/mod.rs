//! Skills, their targeting rules and scripted effects.
//!
//! Skills are data: a [`SkillDef`] pairs a [`SkillTargetSpec`] with a
//! [`SkillEffect`]. Target resolution runs through a [`TargetingSession`],
//! and the resolved targets are handed to the combat resolver.

mod effect;
mod session;
mod skill;
mod targeting;

pub use effect::Effect;
pub use session::{TargetView, TargetingError, TargetingSession, TargetingStart, TargetingState};
pub use skill::{SkillCatalog, SkillDef, SkillEffect};
pub use targeting::{Fallback, SelectMode, SkillTargetSpec, TargetPredicate, TeamFilter};
