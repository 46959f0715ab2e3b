//! Interactive target selection.
//!
//! A [`TargetingSession`] walks `Idle -> Selecting -> Confirmable ->
//! {Executed | Cancelled}`. It only ever reads the battlefield through
//! [`TargetView`]; nothing is mutated until [`TargetingSession::confirm`]
//! hands the final target list to the combat resolver.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::Dice;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{Battlefield, Combatant, Side, TargetToken};

use super::skill::SkillDef;
use super::targeting::{Fallback, SelectMode, SkillTargetSpec, TeamFilter};

/// Read-only access to the combatants a session can target.
pub trait TargetView {
    /// Combatants on one side, in zone order.
    fn roster(&self, side: Side) -> &[Combatant];

    fn lookup(&self, token: TargetToken) -> Option<&Combatant> {
        self.roster(token.side).iter().find(|c| c.id == token.id)
    }
}

impl TargetView for Battlefield {
    fn roster(&self, side: Side) -> &[Combatant] {
        self.zone(side).as_slice()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetingState {
    Idle,
    Selecting,
    Confirmable,
    Cancelled,
    Executed,
}

impl TargetingState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Executed)
    }
}

/// Errors raised by targeting operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("cannot {operation} while targeting is {state}")]
    InvalidState {
        operation: &'static str,
        state: TargetingState,
    },

    #[error("{token} is not a valid target")]
    InvalidTarget { token: TargetToken },

    #[error("at most {max} targets may be selected")]
    TooManyTargets { max: usize },

    #[error("no valid targets for {skill}")]
    NoCandidates { skill: String },

    #[error("caster {token} is not on the battlefield")]
    SourceNotFound { token: TargetToken },
}

impl GameError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoCandidates { .. } => ErrorSeverity::Recoverable,
            Self::SourceNotFound { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            _ => ErrorKind::InvalidTarget,
        }
    }
}

/// Outcome of [`TargetingSession::begin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetingStart {
    /// The skill has no selection step; it resolves on its caster.
    Immediate,
    Session(TargetingSession),
}

/// Selection state for one skill use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetingSession {
    source: TargetToken,
    skill: String,
    spec: SkillTargetSpec,
    state: TargetingState,
    candidates: Vec<TargetToken>,
    selected: ArrayVec<TargetToken, { CombatConfig::MAX_TARGETS }>,
    /// Candidates came from the random fallback pool and only need to stay alive.
    relaxed: bool,
}

impl TargetingSession {
    fn idle(source: TargetToken, skill: &SkillDef) -> Self {
        Self {
            source,
            skill: skill.id.clone(),
            spec: skill.target.clone(),
            state: TargetingState::Idle,
            candidates: Vec::new(),
            selected: ArrayVec::new(),
            relaxed: false,
        }
    }

    /// Resolves the skill's targeting rules against the current battlefield.
    ///
    /// `dice` is only consulted by the random fallback.
    pub fn begin(
        view: &dyn TargetView,
        source: TargetToken,
        skill: &SkillDef,
        dice: &mut dyn Dice,
    ) -> Result<TargetingStart, TargetingError> {
        match view.lookup(source) {
            Some(caster) if caster.is_alive() => {}
            _ => return Err(TargetingError::SourceNotFound { token: source }),
        }

        if skill.target.select == SelectMode::None {
            return Ok(TargetingStart::Immediate);
        }

        let mut session = Self::idle(source, skill);
        session.candidates = session.collect(view, |spec, c| spec.accepts(c));

        if session.candidates.is_empty() {
            if session.spec.fallback != Fallback::Random {
                return Err(TargetingError::NoCandidates {
                    skill: session.skill,
                });
            }
            let pool = session.collect(view, |_, c| c.is_alive());
            if pool.is_empty() {
                return Err(TargetingError::NoCandidates {
                    skill: session.skill,
                });
            }
            let chosen = pool[dice.pick_index(pool.len())];
            tracing::debug!(skill = %session.skill, target = %chosen, "random fallback target");
            session.candidates = vec![chosen];
            session.selected.push(chosen);
            session.relaxed = true;
            session.state = TargetingState::Confirmable;
            return Ok(TargetingStart::Session(session));
        }

        session.state = if session.spec.select == SelectMode::Aoe {
            TargetingState::Confirmable
        } else {
            TargetingState::Selecting
        };
        Ok(TargetingStart::Session(session))
    }

    fn collect(
        &self,
        view: &dyn TargetView,
        keep: impl Fn(&SkillTargetSpec, &Combatant) -> bool,
    ) -> Vec<TargetToken> {
        let own = self.source.side;
        let sides: &[Side] = match self.spec.team {
            TeamFilter::Enemy => &[own.opposite()],
            TeamFilter::Ally | TeamFilter::SelfOnly => &[own],
            TeamFilter::Any => &[own, own.opposite()],
        };
        let mut tokens = Vec::new();
        for &side in sides {
            for combatant in view.roster(side) {
                let token = TargetToken::new(side, combatant.id);
                let is_source = token == self.source;
                if self.spec.team == TeamFilter::SelfOnly && !is_source {
                    continue;
                }
                if self.spec.exclude_self && is_source {
                    continue;
                }
                if keep(&self.spec, combatant) {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    pub fn source(&self) -> TargetToken {
        self.source
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    pub fn spec(&self) -> &SkillTargetSpec {
        &self.spec
    }

    pub fn state(&self) -> TargetingState {
        self.state
    }

    pub fn candidates(&self) -> &[TargetToken] {
        &self.candidates
    }

    pub fn selected(&self) -> &[TargetToken] {
        &self.selected
    }

    fn max_targets(&self) -> usize {
        match self.spec.select {
            SelectMode::Single => 1,
            _ => usize::from(self.spec.max_targets.max(1)).min(CombatConfig::MAX_TARGETS),
        }
    }

    fn min_targets(&self) -> usize {
        match self.spec.select {
            SelectMode::Single => 1,
            _ => usize::from(self.spec.min_targets),
        }
    }

    fn ensure_selectable(&self, operation: &'static str) -> Result<(), TargetingError> {
        let selectable = matches!(
            self.state,
            TargetingState::Selecting | TargetingState::Confirmable
        ) && self.spec.requires_selection();
        if selectable {
            Ok(())
        } else {
            Err(TargetingError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn settle(&mut self) {
        let count = self.selected.len();
        self.state = if count >= self.min_targets().max(1) && count <= self.max_targets() {
            TargetingState::Confirmable
        } else {
            TargetingState::Selecting
        };
    }

    /// Adds a target. A single-select session replaces its previous pick.
    pub fn pick(&mut self, token: TargetToken) -> Result<TargetingState, TargetingError> {
        self.ensure_selectable("pick")?;
        if !self.candidates.contains(&token) {
            return Err(TargetingError::InvalidTarget { token });
        }

        if self.spec.select == SelectMode::Single {
            self.selected.clear();
        }
        if !self.selected.contains(&token) {
            if self.selected.len() >= self.max_targets() {
                return Err(TargetingError::TooManyTargets {
                    max: self.max_targets(),
                });
            }
            self.selected.push(token);
        }
        self.settle();
        Ok(self.state)
    }

    pub fn unpick(&mut self, token: TargetToken) -> Result<TargetingState, TargetingError> {
        self.ensure_selectable("unpick")?;
        let index = self
            .selected
            .iter()
            .position(|t| *t == token)
            .ok_or(TargetingError::InvalidTarget { token })?;
        self.selected.remove(index);
        self.settle();
        Ok(self.state)
    }

    /// Picks random candidates until the minimum is met (at least one).
    pub fn auto_pick(&mut self, dice: &mut dyn Dice) -> Result<TargetingState, TargetingError> {
        self.ensure_selectable("auto-pick")?;
        let wanted = self.min_targets().max(1).min(self.max_targets());
        while self.selected.len() < wanted {
            let open: Vec<TargetToken> = self
                .candidates
                .iter()
                .copied()
                .filter(|t| !self.selected.contains(t))
                .collect();
            if open.is_empty() {
                break;
            }
            let token = open[dice.pick_index(open.len())];
            self.pick(token)?;
        }
        Ok(self.state)
    }

    /// Drops tokens whose combatant died or left its zone.
    pub fn revalidate(&mut self, view: &dyn TargetView) -> TargetingState {
        if self.state.is_terminal() {
            return self.state;
        }
        if !view.lookup(self.source).is_some_and(Combatant::is_alive) {
            tracing::debug!(skill = %self.skill, "caster gone, cancelling targeting");
            self.clear(TargetingState::Cancelled);
            return self.state;
        }

        let relaxed = self.relaxed;
        let spec = &self.spec;
        let valid = |token: &TargetToken| {
            view.lookup(*token)
                .is_some_and(|c| if relaxed { c.is_alive() } else { spec.accepts(c) })
        };
        self.candidates.retain(|t| valid(t));
        let candidates = &self.candidates;
        self.selected.retain(|t| candidates.contains(t));

        if self.candidates.is_empty() {
            self.clear(TargetingState::Cancelled);
        } else if self.spec.select == SelectMode::Aoe {
            self.state = TargetingState::Confirmable;
        } else if self.selected.is_empty() && self.min_targets() > 0 {
            self.state = TargetingState::Selecting;
        } else {
            self.settle();
        }
        self.state
    }

    /// Returns the final ordered targets and marks the session executed.
    pub fn confirm(&mut self) -> Result<Vec<TargetToken>, TargetingError> {
        if self.state != TargetingState::Confirmable {
            return Err(TargetingError::InvalidState {
                operation: "confirm",
                state: self.state,
            });
        }
        let targets = if self.spec.select == SelectMode::Aoe && !self.relaxed {
            self.candidates.clone()
        } else {
            self.selected.to_vec()
        };
        self.state = TargetingState::Executed;
        Ok(targets)
    }

    pub fn cancel(&mut self) -> Result<(), TargetingError> {
        if self.state.is_terminal() {
            return Err(TargetingError::InvalidState {
                operation: "cancel",
                state: self.state,
            });
        }
        self.clear(TargetingState::Cancelled);
        Ok(())
    }

    fn clear(&mut self, state: TargetingState) {
        self.candidates.clear();
        self.selected.clear();
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{SkillCatalog, SkillEffect};
    use crate::env::{ScriptedDice, SeededDice};
    use crate::state::{EntityId, Zone};

    fn field() -> Battlefield {
        let enemies: Zone = (10..13)
            .map(|id| {
                Combatant::builder(EntityId(id), format!("Goblin {id}"))
                    .hp(5)
                    .attack(1)
                    .build()
            })
            .collect();
        let board: Zone = [
            Combatant::builder(EntityId(1), "Knight").hp(10).attack(3).build(),
            Combatant::builder(EntityId(2), "Cleric").hp(8).current_hp(4).build(),
        ]
        .into_iter()
        .collect();
        Battlefield::new(enemies, board, Vec::new())
    }

    fn knight() -> TargetToken {
        TargetToken::ally(EntityId(1))
    }

    fn start(field: &Battlefield, skill: &str) -> TargetingSession {
        let catalog = SkillCatalog::builtin();
        let skill = catalog.get(skill).unwrap();
        match TargetingSession::begin(field, knight(), skill, &mut SeededDice::new(1)).unwrap() {
            TargetingStart::Session(session) => session,
            TargetingStart::Immediate => panic!("expected a session"),
        }
    }

    #[test]
    fn single_pick_replaces_previous() {
        let field = field();
        let mut session = start(&field, "strike");
        assert_eq!(session.state(), TargetingState::Selecting);
        assert_eq!(session.candidates().len(), 3);

        session.pick(TargetToken::enemy(EntityId(10))).unwrap();
        let state = session.pick(TargetToken::enemy(EntityId(11))).unwrap();
        assert_eq!(state, TargetingState::Confirmable);
        assert_eq!(session.selected(), &[TargetToken::enemy(EntityId(11))]);
    }

    #[test]
    fn multi_respects_bounds() {
        let field = field();
        let mut session = start(&field, "volley");
        session.pick(TargetToken::enemy(EntityId(10))).unwrap();
        session.pick(TargetToken::enemy(EntityId(12))).unwrap();
        assert_eq!(
            session.pick(TargetToken::enemy(EntityId(11))),
            Err(TargetingError::TooManyTargets { max: 2 })
        );

        session.unpick(TargetToken::enemy(EntityId(10))).unwrap();
        assert_eq!(session.confirm().unwrap(), vec![TargetToken::enemy(EntityId(12))]);
        assert_eq!(session.state(), TargetingState::Executed);
    }

    #[test]
    fn non_candidates_are_rejected() {
        let field = field();
        let mut session = start(&field, "strike");
        let err = session.pick(knight()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
        assert!(session.selected().is_empty());
    }

    #[test]
    fn aoe_is_immediately_confirmable() {
        let field = field();
        let mut session = start(&field, "whirlwind");
        assert_eq!(session.state(), TargetingState::Confirmable);
        assert!(matches!(
            session.pick(TargetToken::enemy(EntityId(10))),
            Err(TargetingError::InvalidState { .. })
        ));
        assert_eq!(session.confirm().unwrap().len(), 3);
    }

    #[test]
    fn self_skill_needs_no_session() {
        let field = field();
        let catalog = SkillCatalog::builtin();
        let start = TargetingSession::begin(
            &field,
            knight(),
            catalog.get("second_wind").unwrap(),
            &mut SeededDice::new(1),
        );
        assert_eq!(start, Ok(TargetingStart::Immediate));
    }

    #[test]
    fn wounded_ally_filter() {
        let field = field();
        let session = start(&field, "heal");
        assert_eq!(session.candidates(), &[TargetToken::ally(EntityId(2))]);
    }

    #[test]
    fn revalidate_drops_removed_selection() {
        let mut field = field();
        let mut session = start(&field, "strike");
        session.pick(TargetToken::enemy(EntityId(11))).unwrap();

        field.enemies.remove(EntityId(11));
        assert_eq!(session.revalidate(&field), TargetingState::Selecting);
        assert!(session.selected().is_empty());
        assert!(!session.candidates().contains(&TargetToken::enemy(EntityId(11))));

        field.enemies = Zone::new();
        assert_eq!(session.revalidate(&field), TargetingState::Cancelled);
    }

    #[test]
    fn empty_candidates_follow_fallback() {
        let mut field = field();
        field.enemies = Zone::new();
        let catalog = SkillCatalog::builtin();
        let strike = catalog.get("strike").unwrap();
        let err = TargetingSession::begin(&field, knight(), strike, &mut SeededDice::new(1));
        assert!(matches!(err, Err(TargetingError::NoCandidates { .. })));

        // Random fallback falls back to any live member of the filtered team.
        let healer_spec = SkillDef::new("mend", "Mend", SkillEffect::Heal { amount: 1 })
            .targeting(SkillTargetSpec::wounded_ally().with_fallback(Fallback::Random));
        let mut full = field.clone();
        full.board = [Combatant::builder(EntityId(1), "Knight").hp(10).build()]
            .into_iter()
            .collect();
        let start =
            TargetingSession::begin(&full, knight(), &healer_spec, &mut ScriptedDice::new([1]))
                .unwrap();
        let TargetingStart::Session(mut session) = start else {
            panic!("expected a session");
        };
        assert_eq!(session.state(), TargetingState::Confirmable);
        assert_eq!(session.confirm().unwrap(), vec![knight()]);
    }

    #[test]
    fn cancel_only_from_live_states() {
        let field = field();
        let mut session = start(&field, "strike");
        session.cancel().unwrap();
        assert_eq!(session.state(), TargetingState::Cancelled);
        assert!(session.cancel().is_err());
        assert!(session.confirm().is_err());
    }

    #[test]
    fn dead_caster_cannot_begin() {
        let mut field = field();
        field
            .board
            .find_mut(EntityId(1))
            .unwrap()
            .take_damage(99, &mut crate::events::NoopSink);
        let catalog = SkillCatalog::builtin();
        let err = TargetingSession::begin(
            &field,
            knight(),
            catalog.get("strike").unwrap(),
            &mut SeededDice::new(1),
        );
        assert_eq!(err, Err(TargetingError::SourceNotFound { token: knight() }));
    }
}
