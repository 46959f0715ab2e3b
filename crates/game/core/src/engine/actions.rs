//! Player actions: attacks, skills and interactive targeting.

use crate::action::{
    Fallback, SelectMode, SkillDef, SkillEffect, TargetPredicate, TargetingError,
    TargetingSession, TargetingStart, TargetingState,
};
use crate::combat::{AttackReport, CombatResolver, SkillReport};
use crate::env::SceneTransition;
use crate::log::{LogEntry, LogKind, LogMeta};
use crate::state::{Side, TargetToken};

use super::{ActionError, ActionReply, Game};

impl Game {
    /// Basic attack from the ally at `source_idx` on the enemy at `target_idx`.
    pub fn attack_enemy(&mut self, source_idx: usize, target_idx: usize) -> ActionReply {
        let result = self.try_attack(source_idx, target_idx);
        self.reply("attack_enemy", result)
    }

    /// Uses a skill from the ally at `source_idx`.
    ///
    /// `target` is required for single- and multi-select skills unless the
    /// skill's fallback picks one. Area and self skills ignore it.
    pub fn use_skill(
        &mut self,
        skill: &str,
        source_idx: usize,
        target: Option<TargetToken>,
    ) -> ActionReply {
        let result = self.try_use_skill(skill, source_idx, target);
        self.reply("use_skill", result)
    }

    /// Opens an interactive targeting session, replacing any open one.
    ///
    /// Skills without a selection step resolve immediately.
    pub fn begin_targeting(&mut self, skill: &str, source_idx: usize) -> ActionReply {
        let result = self.try_begin_targeting(skill, source_idx);
        self.reply("begin_targeting", result)
    }

    pub fn pick_target(&mut self, token: TargetToken) -> ActionReply {
        let result = self
            .session
            .as_mut()
            .ok_or(ActionError::NoActiveSession)
            .and_then(|session| Ok(session.pick(token)?))
            .map(|state| selection_message(state, token, "selected"));
        self.reply("pick_target", result)
    }

    pub fn unpick_target(&mut self, token: TargetToken) -> ActionReply {
        let result = self
            .session
            .as_mut()
            .ok_or(ActionError::NoActiveSession)
            .and_then(|session| Ok(session.unpick(token)?))
            .map(|state| selection_message(state, token, "released"));
        self.reply("unpick_target", result)
    }

    /// Resolves the open session's skill on its selected targets.
    pub fn confirm_targeting(&mut self) -> ActionReply {
        let result = self.try_confirm_targeting();
        self.reply("confirm_targeting", result)
    }

    pub fn cancel_targeting(&mut self) -> ActionReply {
        let result = match self.session.take() {
            Some(mut session) => session
                .cancel()
                .map(|()| format!("{} cancelled.", session.skill()))
                .map_err(ActionError::from),
            None => Err(ActionError::NoActiveSession),
        };
        self.reply("cancel_targeting", result)
    }

    fn ally_token(&self, index: usize) -> Result<TargetToken, ActionError> {
        self.field
            .token_at(Side::Ally, index)
            .filter(|token| self.field.combatant(*token).is_some_and(|c| c.is_alive()))
            .ok_or(ActionError::NoSuchCombatant {
                side: Side::Ally,
                index,
            })
    }

    fn try_attack(&mut self, source_idx: usize, target_idx: usize) -> Result<String, ActionError> {
        let source = self.ally_token(source_idx)?;
        let target = self
            .field
            .token_at(Side::Enemy, target_idx)
            .ok_or(ActionError::NoSuchCombatant {
                side: Side::Enemy,
                index: target_idx,
            })?;
        self.ensure_can_attack(source)?;
        let defender = self.field.combatant(target);
        if !defender.is_some_and(|c| TargetPredicate::Attackable.matches(c)) {
            return Err(TargetingError::InvalidTarget { token: target }.into());
        }

        let report = self.resolver().execute_attack(source, target)?;
        let message = attack_message(&report);
        self.settle(report.transition.as_ref());
        Ok(message)
    }

    fn ensure_can_attack(&self, source: TargetToken) -> Result<(), ActionError> {
        match self.field.combatant(source) {
            Some(c) if c.can_attack => Ok(()),
            Some(c) => Err(ActionError::AlreadyAttacked {
                name: c.name.clone(),
            }),
            None => Err(TargetingError::SourceNotFound { token: source }.into()),
        }
    }

    /// Checks that `source` may pay for and use `skill` right now.
    fn precheck(&self, source: TargetToken, skill: &str) -> Result<SkillDef, ActionError> {
        let def = self
            .skills
            .get(skill)
            .cloned()
            .ok_or_else(|| ActionError::UnknownSkill {
                skill: skill.to_string(),
            })?;
        def.validate().map_err(|reason| ActionError::InvalidSkill {
            skill: def.id.clone(),
            reason,
        })?;
        let caster = self
            .field
            .combatant(source)
            .ok_or(TargetingError::SourceNotFound { token: source })?;
        if !caster.skills.iter().any(|known| known == &def.id) {
            return Err(ActionError::SkillNotKnown {
                name: caster.name.clone(),
                skill: def.id,
            });
        }
        if def.effect.is_attack() {
            self.ensure_can_attack(source)?;
        }
        if caster.stamina() < def.stamina_cost {
            return Err(crate::state::StaminaError {
                required: def.stamina_cost,
                available: caster.stamina(),
            }
            .into());
        }
        Ok(def)
    }

    fn try_use_skill(
        &mut self,
        skill: &str,
        source_idx: usize,
        target: Option<TargetToken>,
    ) -> Result<String, ActionError> {
        let source = self.ally_token(source_idx)?;
        let def = self.precheck(source, skill)?;

        let start = TargetingSession::begin(&self.field, source, &def, &mut *self.dice)?;
        let targets = match start {
            TargetingStart::Immediate => vec![source],
            TargetingStart::Session(mut session) => {
                if session.state() == TargetingState::Selecting {
                    match target {
                        Some(token) => {
                            session.pick(token)?;
                        }
                        None => match def.target.fallback {
                            Fallback::Random => {
                                session.auto_pick(&mut *self.dice)?;
                            }
                            Fallback::Cancel => {
                                return Err(ActionError::TargetRequired { skill: def.id });
                            }
                            Fallback::Prompt => {
                                tracing::debug!(skill = %def.id, "prompting for targets");
                                self.session = Some(session);
                                return Err(ActionError::TargetRequired { skill: def.id });
                            }
                        },
                    }
                }
                if session.state() != TargetingState::Confirmable {
                    return Err(ActionError::TargetRequired { skill: def.id });
                }
                session.confirm()?
            }
        };
        self.resolve_skill(source, &def, &targets)
    }

    fn try_begin_targeting(&mut self, skill: &str, source_idx: usize) -> Result<String, ActionError> {
        let source = self.ally_token(source_idx)?;
        let def = self.precheck(source, skill)?;
        if let Some(mut previous) = self.session.take() {
            let _ = previous.cancel();
        }

        match TargetingSession::begin(&self.field, source, &def, &mut *self.dice)? {
            TargetingStart::Immediate => self.resolve_skill(source, &def, &[source]),
            TargetingStart::Session(session) => {
                let message = format!(
                    "{}: {} candidate(s), {}.",
                    def.name,
                    session.candidates().len(),
                    session.state()
                );
                self.session = Some(session);
                Ok(message)
            }
        }
    }

    fn try_confirm_targeting(&mut self) -> Result<String, ActionError> {
        let session = self.session.as_mut().ok_or(ActionError::NoActiveSession)?;
        let state = session.revalidate(&self.field);
        let source = session.source();
        let skill = session.skill().to_string();
        if state.is_terminal() {
            self.session = None;
            return Err(TargetingError::NoCandidates { skill }.into());
        }

        // Nothing is consumed until the checks pass.
        let def = self.precheck(source, &skill)?;
        let session = self.session.as_mut().ok_or(ActionError::NoActiveSession)?;
        let targets = session.confirm()?;
        self.session = None;
        self.resolve_skill(source, &def, &targets)
    }

    fn resolver(&mut self) -> CombatResolver<'_> {
        CombatResolver::new(
            &mut self.field,
            &mut *self.dice,
            &self.config,
            &mut self.events,
            &mut self.log,
        )
    }

    /// Pays the cost and applies the skill's effect to confirmed targets.
    fn resolve_skill(
        &mut self,
        source: TargetToken,
        def: &SkillDef,
        targets: &[TargetToken],
    ) -> Result<String, ActionError> {
        let caster = self
            .field
            .combatant_mut(source)
            .ok_or(TargetingError::SourceNotFound { token: source })?;
        let caster_name = caster.name.clone();
        caster.spend_stamina(def.stamina_cost, &mut self.events)?;
        self.log.push(
            LogEntry::new(LogKind::Skill, format!("{caster_name} uses {}.", def.name)).with_meta(
                LogMeta {
                    source: Some(source.id),
                    ..LogMeta::default()
                },
            ),
        );
        tracing::debug!(skill = %def.id, %source, targets = targets.len(), "resolving skill");

        let (message, transition) = match &def.effect {
            SkillEffect::Attack => {
                let area = def.target.select == SelectMode::Aoe;
                let mut resolver = self.resolver();
                let mut lines = Vec::new();
                let mut transition = None;
                for &target in targets {
                    // Area attacks draw no counters.
                    let report = if area {
                        resolver.execute_area_attack(source, target)?
                    } else {
                        resolver.execute_attack(source, target)?
                    };
                    lines.push(attack_message(&report));
                    transition = report.transition;
                    let attacker_down = report.deaths.contains(&source);
                    if transition.is_some() || attacker_down {
                        break;
                    }
                }
                (lines.join(" "), transition)
            }
            SkillEffect::Damage { amount } => {
                let report = self.resolver().execute_aoe(source, targets, *amount)?;
                (skill_message(&def.name, "damage", &report), report.transition)
            }
            SkillEffect::Heal { amount } => {
                let mut combined = SkillReport::default();
                let mut resolver = self.resolver();
                for &target in targets {
                    let report = resolver.heal(source, target, *amount)?;
                    combined.effects.extend(report.effects);
                }
                (skill_message(&def.name, "healing", &combined), None)
            }
        };

        self.settle(transition.as_ref());
        Ok(message)
    }

    /// Post-resolution bookkeeping: a requested transition wins, otherwise
    /// the on-clear hook is checked. The open session is revalidated either way.
    fn settle(&mut self, transition: Option<&SceneTransition>) {
        match transition {
            Some(transition) => self.apply_transition(transition),
            None => {
                self.check_clear();
            }
        }
        self.revalidate_session();
    }
}

fn attack_message(report: &AttackReport) -> String {
    let total = i64::from(report.roll.roll) + i64::from(report.roll.bonus);
    let mut message = match report.roll.damage {
        Some(damage) => format!(
            "Hit for {damage} damage (rolled {total} vs AC {}).",
            report.roll.armor_class
        ),
        None => format!("Missed (rolled {total} vs AC {}).", report.roll.armor_class),
    };
    if let Some(counter) = report.counter_damage {
        message.push_str(&format!(" Took {counter} counter damage."));
    }
    if !report.deaths.is_empty() {
        message.push_str(&format!(" {} defeated.", report.deaths.len()));
    }
    message
}

fn skill_message(name: &str, noun: &str, report: &SkillReport) -> String {
    format!(
        "{name} dealt {} {noun} across {} target(s).",
        report.total(),
        report.effects.len()
    )
}

fn selection_message(state: TargetingState, token: TargetToken, verb: &str) -> String {
    match state {
        TargetingState::Confirmable => format!("{token} {verb}; ready to confirm."),
        _ => format!("{token} {verb}."),
    }
}
