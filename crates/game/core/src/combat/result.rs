//! Combat result types and the pure attack roll.

use crate::config::CombatConfig;
use crate::env::{Dice, SceneTransition};
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{Combatant, TargetToken};

use super::damage::{calculate_damage, damage_die};
use super::hit::check_hit;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    /// Attack missed the target.
    Miss,
    /// Attack hit the target.
    Hit,
}

/// Dice results of an attack before anything is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRoll {
    pub roll: u32,
    pub bonus: i32,
    pub armor_class: i32,
    pub outcome: AttackOutcome,
    /// Mitigated damage; `None` on a miss.
    pub damage: Option<u32>,
}

/// Roll to-hit and, on a hit, damage.
///
/// The damage die is only rolled on a hit, so a miss consumes exactly one
/// roll from the stream.
pub fn roll_attack(
    attacker: &Combatant,
    defender: &Combatant,
    dice: &mut dyn Dice,
    config: &CombatConfig,
) -> AttackRoll {
    let roll = dice.roll(config.to_hit_die);
    let bonus = attacker.to_hit_bonus();
    let armor_class = defender.armor_class(config.base_armor_class);

    if !check_hit(roll, bonus, armor_class) {
        return AttackRoll {
            roll,
            bonus,
            armor_class,
            outcome: AttackOutcome::Miss,
            damage: None,
        };
    }

    let rolled = dice.roll(damage_die(attacker.total_attack()));
    let damage = calculate_damage(
        rolled,
        attacker.damage_bonus(),
        defender.total_defense(),
        config,
    );
    AttackRoll {
        roll,
        bonus,
        armor_class,
        outcome: AttackOutcome::Hit,
        damage: Some(damage),
    }
}

/// Everything an attack resolution did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: TargetToken,
    pub defender: TargetToken,
    pub roll: AttackRoll,
    pub hp_before: u32,
    pub hp_after: u32,
    /// Damage dealt back to the attacker, if the defender countered.
    pub counter_damage: Option<u32>,
    /// Combatants that died during resolution, in order.
    pub deaths: Vec<TargetToken>,
    /// Scene change requested by an on-death hook.
    pub transition: Option<SceneTransition>,
}

impl AttackReport {
    pub fn is_hit(&self) -> bool {
        self.roll.outcome == AttackOutcome::Hit
    }
}

/// Hp change applied to one target by a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectReport {
    pub target: TargetToken,
    pub amount: u32,
    pub hp_before: u32,
    pub hp_after: u32,
}

/// Result of resolving a skill over its targets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillReport {
    pub effects: Vec<EffectReport>,
    pub deaths: Vec<TargetToken>,
    pub transition: Option<SceneTransition>,
}

impl SkillReport {
    /// Total hp moved across every target.
    pub fn total(&self) -> u32 {
        self.effects.iter().map(|e| e.amount).sum()
    }
}

/// A resolver was pointed at a combatant that is not on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("{token} is not on the battlefield")]
    MissingCombatant { token: TargetToken },

    #[error("{token} is already defeated")]
    Defeated { token: TargetToken },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidTarget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedDice;
    use crate::state::EntityId;

    #[test]
    fn miss_consumes_a_single_roll() {
        let attacker = Combatant::builder(EntityId(1), "Knight").hp(10).attack(3).build();
        let defender = Combatant::builder(EntityId(2), "Goblin").hp(5).build();
        let mut dice = ScriptedDice::new([4, 3]);

        let result = roll_attack(&attacker, &defender, &mut dice, &CombatConfig::default());
        assert_eq!(result.outcome, AttackOutcome::Miss);
        assert_eq!(result.damage, None);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn hit_rolls_damage_die() {
        let attacker = Combatant::builder(EntityId(1), "Knight").hp(10).attack(3).build();
        let defender = Combatant::builder(EntityId(2), "Goblin").hp(5).build();
        let mut dice = ScriptedDice::new([15, 3]);

        let result = roll_attack(&attacker, &defender, &mut dice, &CombatConfig::default());
        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.armor_class, 10);
        assert_eq!(result.damage, Some(3));
    }
}
