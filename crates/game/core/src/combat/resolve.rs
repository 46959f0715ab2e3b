//! Stateful combat resolution over a battlefield.

use crate::config::CombatConfig;
use crate::env::Dice;
use crate::events::EventSink;
use crate::log::{LogEntry, LogKind, LogMeta, LogQueue};
use crate::state::{Battlefield, Combatant, TargetToken};

use super::damage::{calculate_damage, counter_damage, damage_die};
use super::result::{AttackReport, CombatError, EffectReport, SkillReport, roll_attack};

/// Applies attacks and skill effects to a battlefield.
///
/// The resolver borrows everything it touches for the duration of one
/// action. It never changes scenes itself: an on-death transition is returned
/// in the report and the caller loads the scene.
pub struct CombatResolver<'a> {
    pub(super) field: &'a mut Battlefield,
    pub(super) dice: &'a mut dyn Dice,
    pub(super) config: &'a CombatConfig,
    pub(super) sink: &'a mut dyn EventSink,
    pub(super) log: &'a mut LogQueue,
    pub(super) deaths: Vec<TargetToken>,
}

fn find_living(field: &Battlefield, token: TargetToken) -> Result<&Combatant, CombatError> {
    let combatant = field
        .combatant(token)
        .ok_or(CombatError::MissingCombatant { token })?;
    if !combatant.is_alive() {
        return Err(CombatError::Defeated { token });
    }
    Ok(combatant)
}

fn find_living_mut(
    field: &mut Battlefield,
    token: TargetToken,
) -> Result<&mut Combatant, CombatError> {
    let combatant = field
        .combatant_mut(token)
        .ok_or(CombatError::MissingCombatant { token })?;
    if !combatant.is_alive() {
        return Err(CombatError::Defeated { token });
    }
    Ok(combatant)
}

impl<'a> CombatResolver<'a> {
    pub fn new(
        field: &'a mut Battlefield,
        dice: &'a mut dyn Dice,
        config: &'a CombatConfig,
        sink: &'a mut dyn EventSink,
        log: &'a mut LogQueue,
    ) -> Self {
        Self {
            field,
            dice,
            config,
            sink,
            log,
            deaths: Vec::new(),
        }
    }

    /// Resolves a standard attack: to-hit, damage, counter-attack, death.
    ///
    /// The attacker's `can_attack` flag is cleared whether the attack hits or
    /// misses.
    pub fn execute_attack(
        &mut self,
        attacker: TargetToken,
        defender: TargetToken,
    ) -> Result<AttackReport, CombatError> {
        self.attack_one(attacker, defender, true)
    }

    /// One strike of an area attack: rolled like a standard attack, but the
    /// defender never counters.
    pub fn execute_area_attack(
        &mut self,
        attacker: TargetToken,
        defender: TargetToken,
    ) -> Result<AttackReport, CombatError> {
        self.attack_one(attacker, defender, false)
    }

    fn attack_one(
        &mut self,
        attacker: TargetToken,
        defender: TargetToken,
        counters: bool,
    ) -> Result<AttackReport, CombatError> {
        let (roll, counter, attacker_name, defender_name, hp_before) = {
            let source = find_living(self.field, attacker)?;
            let target = find_living(self.field, defender)?;
            let roll = roll_attack(source, target, &mut *self.dice, self.config);
            (
                roll,
                counters.then(|| counter_damage(source, target)).flatten(),
                source.name.clone(),
                target.name.clone(),
                target.hp(),
            )
        };
        find_living_mut(self.field, attacker)?.can_attack = false;
        tracing::debug!(
            %attacker,
            %defender,
            roll = roll.roll,
            bonus = roll.bonus,
            ac = roll.armor_class,
            outcome = %roll.outcome,
            "attack roll"
        );

        let mut report = AttackReport {
            attacker,
            defender,
            roll,
            hp_before,
            hp_after: hp_before,
            counter_damage: None,
            deaths: Vec::new(),
            transition: None,
        };
        let meta =
            LogMeta::between(attacker.id, defender.id).with_roll(roll.roll, roll.armor_class);

        let Some(damage) = roll.damage else {
            self.log.push(
                LogEntry::new(
                    LogKind::Attack,
                    format!(
                        "{attacker_name} attacks {defender_name} and misses ({} vs AC {}).",
                        i64::from(roll.roll) + i64::from(roll.bonus),
                        roll.armor_class
                    ),
                )
                .with_meta(meta),
            );
            return Ok(report);
        };

        let target = find_living_mut(self.field, defender)?;
        let defender_died = target.take_damage(damage, &mut *self.sink);
        report.hp_after = target.hp();
        self.log.push(
            LogEntry::new(
                LogKind::Attack,
                format!("{attacker_name} hits {defender_name} for {damage} damage."),
            )
            .with_meta(meta.with_hp(damage, hp_before, report.hp_after)),
        );

        // The counter lands before either death resolves.
        let mut attacker_died = false;
        if let Some(counter) = counter {
            let source = find_living_mut(self.field, attacker)?;
            let before = source.hp();
            attacker_died = source.take_damage(counter, &mut *self.sink);
            let after = source.hp();
            report.counter_damage = Some(counter);
            tracing::debug!(%defender, %attacker, counter, "counter-attack");
            self.log.push(
                LogEntry::new(
                    LogKind::Attack,
                    format!("{defender_name} strikes back at {attacker_name} for {counter} damage."),
                )
                .with_meta(LogMeta::between(defender.id, attacker.id).with_hp(counter, before, after)),
            );
        }

        if defender_died {
            report.transition = self.handle_death(defender, Some(attacker), 0);
        }
        if attacker_died && report.transition.is_none() {
            report.transition = self.handle_death(attacker, Some(defender), 0);
        }
        report.deaths = std::mem::take(&mut self.deaths);
        Ok(report)
    }

    /// Direct damage from a skill: no to-hit roll and no counter-attack.
    ///
    /// With `amount = None` the damage die is sized by the source's total
    /// attack; either way defense mitigates it.
    pub fn strike(
        &mut self,
        source: TargetToken,
        target: TargetToken,
        amount: Option<u32>,
    ) -> Result<SkillReport, CombatError> {
        let mut report = SkillReport::default();
        self.strike_one(source, target, amount, &mut report)?;
        report.deaths = std::mem::take(&mut self.deaths);
        Ok(report)
    }

    /// Damages every target of a fixed snapshot independently.
    ///
    /// Targets that died or left their zone since the snapshot are skipped.
    /// Resolution stops early if a death hook changes the scene.
    pub fn execute_aoe(
        &mut self,
        source: TargetToken,
        targets: &[TargetToken],
        amount: Option<u32>,
    ) -> Result<SkillReport, CombatError> {
        find_living(self.field, source)?;
        let mut report = SkillReport::default();
        for &target in targets {
            if find_living(self.field, target).is_err() {
                tracing::debug!(%target, "aoe target gone, skipping");
                continue;
            }
            self.strike_one(source, target, amount, &mut report)?;
            if report.transition.is_some() {
                break;
            }
        }
        report.deaths = std::mem::take(&mut self.deaths);
        Ok(report)
    }

    fn strike_one(
        &mut self,
        source: TargetToken,
        target: TargetToken,
        amount: Option<u32>,
        report: &mut SkillReport,
    ) -> Result<(), CombatError> {
        let caster = find_living(self.field, source)?;
        let bonus = caster.damage_bonus();
        let source_name = caster.name.clone();
        let base = match amount {
            Some(fixed) => fixed,
            None => self.dice.roll(damage_die(caster.total_attack())),
        };

        let victim = find_living_mut(self.field, target)?;
        let damage = calculate_damage(base, bonus, victim.total_defense(), self.config);
        let hp_before = victim.hp();
        let died = victim.take_damage(damage, &mut *self.sink);
        let hp_after = victim.hp();
        let victim_name = victim.name.clone();

        report.effects.push(EffectReport {
            target,
            amount: damage,
            hp_before,
            hp_after,
        });
        self.log.push(
            LogEntry::new(
                LogKind::Skill,
                format!("{source_name} deals {damage} damage to {victim_name}."),
            )
            .with_meta(LogMeta::between(source.id, target.id).with_hp(damage, hp_before, hp_after)),
        );

        if died {
            report.transition = self.handle_death(target, Some(source), 0);
        }
        Ok(())
    }

    /// Restores hp on one target, clamped at its max. Never reduces hp.
    pub fn heal(
        &mut self,
        source: TargetToken,
        target: TargetToken,
        amount: u32,
    ) -> Result<SkillReport, CombatError> {
        let source_name = find_living(self.field, source)?.name.clone();
        let patient = find_living_mut(self.field, target)?;
        let hp_before = patient.hp();
        let healed = patient.heal(amount, &mut *self.sink);
        let hp_after = patient.hp();
        let patient_name = patient.name.clone();

        self.log.push(
            LogEntry::new(
                LogKind::Heal,
                format!("{source_name} restores {healed} hp to {patient_name}."),
            )
            .with_meta(LogMeta::between(source.id, target.id).with_hp(healed, hp_before, hp_after)),
        );
        Ok(SkillReport {
            effects: vec![EffectReport {
                target,
                amount: healed,
                hp_before,
                hp_after,
            }],
            ..SkillReport::default()
        })
    }
}
