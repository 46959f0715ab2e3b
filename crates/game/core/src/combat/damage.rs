//! Damage calculation.

use crate::config::CombatConfig;
use crate::state::{Capability, Combatant};

/// Number of sides on the damage die of an attacker.
///
/// The die is sized by total attack, with a d1 floor so that an unarmed
/// zero-attack hit still rolls.
pub fn damage_die(total_attack: u32) -> u32 {
    total_attack.max(1)
}

/// Calculate damage after mitigation.
///
/// # Formula
///
/// ```text
/// raw = rolled + damage_bonus
/// final = max(min_damage, raw - max(0, defense))
/// ```
pub fn calculate_damage(rolled: u32, damage_bonus: i32, defense: i32, config: &CombatConfig) -> u32 {
    let raw = i64::from(rolled) + i64::from(damage_bonus) - i64::from(defense.max(0));
    let floor = i64::from(config.min_damage);
    u32::try_from(raw.max(floor)).unwrap_or(u32::MAX)
}

/// Counter-attack damage from a defender that was hit.
///
/// The counter never rolls: it deals the defender's full total attack, read
/// before the hit lands, so a defender killed by the hit still strikes back.
/// No counter when the defender has zero attack or the attacker is tagged
/// `no_counter`.
pub fn counter_damage(attacker: &Combatant, defender: &Combatant) -> Option<u32> {
    let damage = defender.total_attack();
    if damage == 0 || attacker.has_tag(Capability::NoCounter) {
        return None;
    }
    Some(damage)
}
