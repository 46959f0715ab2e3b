//! Targeting specification for skills.
//!
//! A [`SkillTargetSpec`] describes who a skill may target, relative to the
//! side of the caster, and how the targets are chosen:
//! - None: no selection; the skill resolves on its caster
//! - Single: exactly one pick, a new pick replaces the old one
//! - Multi: between `min_targets` and `max_targets` picks
//! - Aoe: every candidate, no selection step

use crate::state::{Capability, Combatant};

/// Which side(s) a skill may reach, relative to the caster.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TeamFilter {
    Enemy,
    Ally,
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    #[strum(serialize = "self")]
    SelfOnly,
    Any,
}

/// How targets are selected.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectMode {
    None,
    Single,
    Multi,
    Aoe,
}

/// What to do when no target was supplied or no candidate exists.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Fallback {
    /// Pick a live target at random.
    Random,
    /// Fail the action.
    Cancel,
    /// Hand the choice back to the player through an interactive session.
    Prompt,
}

/// Filter a candidate must pass.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetPredicate {
    /// hp > 0.
    Alive,
    /// Alive and not tagged untargetable.
    Attackable,
    /// hp < max_hp.
    Wounded,
    /// Has not attacked yet this turn.
    Ready,
}

impl TargetPredicate {
    pub fn matches(&self, combatant: &Combatant) -> bool {
        match self {
            Self::Alive => combatant.is_alive(),
            Self::Attackable => {
                combatant.is_alive() && !combatant.has_tag(Capability::Untargetable)
            }
            Self::Wounded => combatant.is_wounded(),
            Self::Ready => combatant.can_attack,
        }
    }
}

/// Complete targeting rules for one skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillTargetSpec {
    pub team: TeamFilter,
    pub select: SelectMode,
    pub min_targets: u8,
    pub max_targets: u8,
    pub exclude_self: bool,
    pub fallback: Fallback,
    pub predicates: Vec<TargetPredicate>,
}

impl SkillTargetSpec {
    /// Returns true if the combatant passes every predicate.
    ///
    /// Dead combatants never pass: a token is only a candidate while its
    /// combatant is alive.
    pub fn accepts(&self, combatant: &Combatant) -> bool {
        combatant.is_alive() && self.predicates.iter().all(|p| p.matches(combatant))
    }

    pub fn requires_selection(&self) -> bool {
        matches!(self.select, SelectMode::Single | SelectMode::Multi)
    }

    /// Creates a basic single-enemy targeting spec.
    pub fn single_enemy() -> Self {
        Self::default()
    }

    /// Creates a targeting spec hitting every live enemy.
    pub fn aoe_enemies() -> Self {
        Self {
            select: SelectMode::Aoe,
            min_targets: 0,
            max_targets: 0,
            ..Self::default()
        }
    }

    /// Creates a spec picking between `min` and `max` enemies.
    pub fn multi_enemy(min: u8, max: u8) -> Self {
        Self {
            select: SelectMode::Multi,
            min_targets: min,
            max_targets: max,
            ..Self::default()
        }
    }

    /// Creates a single wounded-ally spec (heals).
    pub fn wounded_ally() -> Self {
        Self {
            team: TeamFilter::Ally,
            predicates: vec![TargetPredicate::Alive, TargetPredicate::Wounded],
            ..Self::default()
        }
    }

    /// Creates a self-only spec with no selection step.
    pub fn self_only() -> Self {
        Self {
            team: TeamFilter::SelfOnly,
            select: SelectMode::None,
            min_targets: 0,
            max_targets: 0,
            predicates: vec![TargetPredicate::Alive],
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn excluding_self(mut self) -> Self {
        self.exclude_self = true;
        self
    }
}

impl Default for SkillTargetSpec {
    fn default() -> Self {
        Self {
            team: TeamFilter::Enemy,
            select: SelectMode::Single,
            min_targets: 1,
            max_targets: 1,
            exclude_self: false,
            fallback: Fallback::Cancel,
            predicates: vec![TargetPredicate::Attackable],
        }
    }
}
