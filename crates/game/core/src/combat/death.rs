//! Death handling and the on-death effect interpreter.
//!
//! When a combatant drops to zero hp its `on_death` effects run in order
//! while it is still in its zone, then it is removed. A `Transition` effect
//! ends processing immediately: the scene it belonged to is about to be
//! replaced, so the entity is left where it is and no further bookkeeping
//! runs for it.

use crate::action::Effect;
use crate::config::CombatConfig;
use crate::env::SceneTransition;
use crate::log::{LogEntry, LogKind, LogMeta};
use crate::state::TargetToken;

use super::resolve::CombatResolver;

impl CombatResolver<'_> {
    /// Runs `dead`'s hooks and removes it from its zone.
    ///
    /// `killer` receives `Retaliate` damage. `depth` counts chained deaths
    /// (a retaliation that kills the killer runs the killer's hooks too) and
    /// is capped at [`CombatConfig::MAX_DEATH_CHAIN`].
    pub(super) fn handle_death(
        &mut self,
        dead: TargetToken,
        killer: Option<TargetToken>,
        depth: usize,
    ) -> Option<SceneTransition> {
        let (name, hooks) = match self.field.combatant(dead) {
            Some(combatant) => (combatant.name.clone(), combatant.on_death.clone()),
            None => return None,
        };
        tracing::debug!(entity = %dead, hooks = hooks.len(), depth, "handling death");
        self.deaths.push(dead);
        self.log.push(
            LogEntry::new(LogKind::Info, format!("{name} is defeated.")).with_meta(LogMeta {
                target: Some(dead.id),
                ..LogMeta::default()
            }),
        );

        if depth >= CombatConfig::MAX_DEATH_CHAIN {
            tracing::warn!(entity = %dead, depth, "death chain too deep, skipping hooks");
        } else {
            for hook in &hooks {
                if let Some(transition) = self.apply_hook(hook, dead, &name, killer, depth) {
                    tracing::info!(entity = %dead, to = %transition.to, "death hook requests scene change");
                    return Some(transition);
                }
            }
        }

        self.field.zone_mut(dead.side).remove(dead.id);
        None
    }

    fn apply_hook(
        &mut self,
        hook: &Effect,
        owner: TargetToken,
        owner_name: &str,
        killer: Option<TargetToken>,
        depth: usize,
    ) -> Option<SceneTransition> {
        match hook {
            Effect::DropLoot => {
                let drops = self
                    .field
                    .combatant_mut(owner)
                    .map(|c| std::mem::take(&mut c.drops))
                    .unwrap_or_default();
                for item in &drops {
                    self.log
                        .info(format!("{owner_name} drops {} ({}).", item.name, item.kind));
                }
                self.field.resources.extend(drops);
                None
            }
            Effect::Retaliate { damage } => {
                let killer = killer?;
                let target = self.field.combatant_mut(killer).filter(|c| c.is_alive())?;
                let before = target.hp();
                let died = target.take_damage(*damage, &mut *self.sink);
                let after = target.hp();
                let target_name = target.name.clone();
                self.log.push(
                    LogEntry::new(
                        LogKind::Attack,
                        format!("{owner_name} lashes out at {target_name} for {damage} damage."),
                    )
                    .with_meta(LogMeta::between(owner.id, killer.id).with_hp(*damage, before, after)),
                );
                if died {
                    return self.handle_death(killer, Some(owner), depth + 1);
                }
                None
            }
            Effect::HealAllies { amount } => {
                let zone = self.field.zone_mut(owner.side);
                let mut healed = Vec::new();
                for ally in zone.iter_mut() {
                    if ally.id == owner.id || !ally.is_alive() {
                        continue;
                    }
                    let before = ally.hp();
                    let restored = ally.heal(*amount, &mut *self.sink);
                    if restored > 0 {
                        healed.push((ally.id, ally.name.clone(), restored, before, ally.hp()));
                    }
                }
                for (id, ally_name, restored, before, after) in healed {
                    self.log.push(
                        LogEntry::new(
                            LogKind::Heal,
                            format!("{owner_name}'s passing restores {restored} hp to {ally_name}."),
                        )
                        .with_meta(LogMeta::between(owner.id, id).with_hp(restored, before, after)),
                    );
                }
                None
            }
            Effect::Transition { .. } => hook.scene_transition(),
            Effect::Message { text } => {
                self.log.info(text.clone());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::events::EntityEvent;
    use crate::log::LogQueue;
    use crate::state::{Battlefield, Combatant, EntityId, Zone};

    fn run(
        field: &mut Battlefield,
        dead: TargetToken,
        killer: Option<TargetToken>,
    ) -> (Option<SceneTransition>, Vec<TargetToken>) {
        let mut dice = ScriptedDice::new(Vec::new());
        let config = CombatConfig::default();
        let mut events: Vec<EntityEvent> = Vec::new();
        let mut log = LogQueue::new();
        let mut resolver = CombatResolver::new(field, &mut dice, &config, &mut events, &mut log);
        let transition = resolver.handle_death(dead, killer, 0);
        (transition, std::mem::take(&mut resolver.deaths))
    }

    #[test]
    fn transition_leaves_entity_in_place() {
        let boss = Combatant::builder(EntityId(10), "Lich")
            .hp(5)
            .current_hp(0)
            .on_death(Effect::message("The crypt trembles."))
            .on_death(Effect::transition("crypt_depths", true))
            .on_death(Effect::DropLoot)
            .build();
        let mut field = Battlefield::new([boss].into_iter().collect(), Zone::new(), Vec::new());

        let (transition, deaths) = run(&mut field, TargetToken::enemy(EntityId(10)), None);
        assert_eq!(
            transition,
            Some(SceneTransition {
                to: "crypt_depths".into(),
                preserve_board: true
            })
        );
        assert_eq!(deaths.len(), 1);
        assert_eq!(field.enemies.len(), 1);
    }

    #[test]
    fn retaliation_can_chain_into_killer_death() {
        let bomb = Combatant::builder(EntityId(10), "Bomb")
            .hp(1)
            .current_hp(0)
            .on_death(Effect::Retaliate { damage: 5 })
            .build();
        let squire = Combatant::builder(EntityId(1), "Squire").hp(4).build();
        let mut field = Battlefield::new(
            [bomb].into_iter().collect(),
            [squire].into_iter().collect(),
            Vec::new(),
        );

        let (transition, deaths) = run(
            &mut field,
            TargetToken::enemy(EntityId(10)),
            Some(TargetToken::ally(EntityId(1))),
        );
        assert!(transition.is_none());
        assert_eq!(
            deaths,
            vec![TargetToken::enemy(EntityId(10)), TargetToken::ally(EntityId(1))]
        );
        assert!(field.enemies.is_empty());
        assert!(field.board.is_empty());
    }

    #[test]
    fn heal_allies_skips_the_dead() {
        let shaman = Combatant::builder(EntityId(10), "Shaman")
            .hp(3)
            .current_hp(0)
            .on_death(Effect::HealAllies { amount: 3 })
            .build();
        let brute = Combatant::builder(EntityId(11), "Brute").hp(9).current_hp(4).build();
        let fallen = Combatant::builder(EntityId(12), "Fallen").hp(9).current_hp(0).build();
        let mut field = Battlefield::new(
            [shaman, brute, fallen].into_iter().collect(),
            Zone::new(),
            Vec::new(),
        );

        run(&mut field, TargetToken::enemy(EntityId(10)), None);
        assert_eq!(field.enemies.find(EntityId(11)).unwrap().hp(), 7);
        assert_eq!(field.enemies.find(EntityId(12)).unwrap().hp(), 0);
        assert!(!field.enemies.contains(EntityId(10)));
    }
}
