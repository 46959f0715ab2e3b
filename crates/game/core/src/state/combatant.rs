//! Combatant - the entity model shared by allies and enemies.

use crate::action::Effect;
use crate::events::{EntityEvent, EventSink};

use super::equipment::{EquipError, EquipSlot, Equipment, Item};
use super::stats::AbilityScores;
use super::tags::{Capability, CapabilitySet};
use super::zone::ResourceItem;
use super::EntityId;

/// Not enough stamina to pay a cost.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("needs {required} stamina but only {available} remains")]
pub struct StaminaError {
    pub required: u32,
    pub available: u32,
}

impl crate::error::GameError for StaminaError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Recoverable
    }

    fn kind(&self) -> crate::error::ErrorKind {
        crate::error::ErrorKind::InsufficientStamina
    }
}

/// A single participant in combat.
///
/// # Invariants
///
/// - `0 <= hp <= max_hp`
/// - `0 <= stamina <= stamina_max`
///
/// Pools are private and only change through the mutation methods, each of
/// which reports to an [`EventSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub base_attack: u32,
    hp: u32,
    max_hp: u32,
    stamina: u32,
    stamina_max: u32,
    /// Cleared by any attack attempt, restored at the start of the owner's turn.
    pub can_attack: bool,
    pub tags: CapabilitySet,
    pub skills: Vec<String>,
    pub abilities: Option<AbilityScores>,
    equipment: Equipment,
    /// Hooks interpreted when this combatant dies, before it leaves its zone.
    pub on_death: Vec<Effect>,
    /// Loot moved to the resources zone by a `DropLoot` hook.
    pub drops: Vec<ResourceItem>,
}

impl Combatant {
    pub fn builder(id: EntityId, name: impl Into<String>) -> CombatantBuilder {
        CombatantBuilder::new(id, name)
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn stamina_max(&self) -> u32 {
        self.stamina_max
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_wounded(&self) -> bool {
        self.hp < self.max_hp
    }

    pub fn has_tag(&self, capability: Capability) -> bool {
        self.tags.has(capability)
    }

    /// Base attack plus equipment attack, never below zero.
    pub fn total_attack(&self) -> u32 {
        let total = i64::from(self.base_attack) + i64::from(self.equipment.total_attack());
        u32::try_from(total.max(0)).unwrap_or(u32::MAX)
    }

    /// Equipment defense.
    pub fn total_defense(&self) -> i32 {
        self.equipment.total_defense()
    }

    /// Armor class: explicit override, else `base + defense + dex modifier`.
    pub fn armor_class(&self, base_armor_class: i32) -> i32 {
        match &self.abilities {
            Some(AbilityScores {
                armor_class: Some(ac),
                ..
            }) => *ac,
            Some(block) => base_armor_class + self.total_defense() + block.dex_modifier(),
            None => base_armor_class + self.total_defense(),
        }
    }

    /// Bonus added to the to-hit die.
    pub fn to_hit_bonus(&self) -> i32 {
        self.abilities
            .as_ref()
            .map_or(0, |block| block.attack_bonus + block.str_modifier())
    }

    /// Flat bonus added to rolled damage.
    pub fn damage_bonus(&self) -> i32 {
        self.abilities.as_ref().map_or(0, |block| block.damage_bonus)
    }

    /// Applies damage, flooring hp at zero.
    ///
    /// Returns true if the combatant is dead afterwards.
    pub fn take_damage(&mut self, amount: u32, sink: &mut dyn EventSink) -> bool {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        if self.hp != before {
            sink.emit(EntityEvent::HpChanged {
                entity: self.id,
                before,
                after: self.hp,
            });
            if self.hp == 0 {
                sink.emit(EntityEvent::Died { entity: self.id });
            }
        }
        self.hp == 0
    }

    /// Restores hp, clamped at `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32, sink: &mut dyn EventSink) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        if self.hp != before {
            sink.emit(EntityEvent::HpChanged {
                entity: self.id,
                before,
                after: self.hp,
            });
        }
        self.hp - before
    }

    /// Resets stamina to its maximum.
    pub fn refill_stamina(&mut self, sink: &mut dyn EventSink) {
        self.set_stamina(self.stamina_max, sink);
    }

    /// Pays a stamina cost. Fails without mutation if the pool is too small.
    pub fn spend_stamina(&mut self, amount: u32, sink: &mut dyn EventSink) -> Result<(), StaminaError> {
        if amount > self.stamina {
            return Err(StaminaError {
                required: amount,
                available: self.stamina,
            });
        }
        self.set_stamina(self.stamina - amount, sink);
        Ok(())
    }

    fn set_stamina(&mut self, value: u32, sink: &mut dyn EventSink) {
        let before = self.stamina;
        self.stamina = value.min(self.stamina_max);
        if self.stamina != before {
            sink.emit(EntityEvent::StaminaChanged {
                entity: self.id,
                before,
                after: self.stamina,
            });
        }
    }

    /// Equips an item into its default slot, returning displaced items.
    pub fn equip(&mut self, item: Item, sink: &mut dyn EventSink) -> Result<Vec<Item>, EquipError> {
        let slot = item.default_slot();
        self.equip_to(item, slot, sink)
    }

    /// Equips an item into an explicit slot, returning displaced items.
    pub fn equip_to(
        &mut self,
        item: Item,
        slot: EquipSlot,
        sink: &mut dyn EventSink,
    ) -> Result<Vec<Item>, EquipError> {
        let name = item.name.clone();
        let displaced = self.equipment.equip_to(item, slot)?;
        sink.emit(EntityEvent::Equipped {
            entity: self.id,
            slot,
            item: name,
        });
        Ok(displaced)
    }

    /// Clears a slot, returning its item.
    pub fn unequip(&mut self, slot: EquipSlot, sink: &mut dyn EventSink) -> Option<Item> {
        let item = self.equipment.unequip(slot)?;
        sink.emit(EntityEvent::Unequipped {
            entity: self.id,
            slot,
            item: item.name.clone(),
        });
        Some(item)
    }
}

/// Builder for constructing combatants.
///
/// Starting pools are clamped into range at [`build`](Self::build).
pub struct CombatantBuilder {
    id: EntityId,
    name: String,
    base_attack: u32,
    hp: Option<u32>,
    max_hp: u32,
    stamina_max: u32,
    tags: CapabilitySet,
    skills: Vec<String>,
    abilities: Option<AbilityScores>,
    equipment: Equipment,
    on_death: Vec<Effect>,
    drops: Vec<ResourceItem>,
}

impl CombatantBuilder {
    fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base_attack: 0,
            hp: None,
            max_hp: 1,
            stamina_max: 0,
            tags: CapabilitySet::empty(),
            skills: Vec::new(),
            abilities: None,
            equipment: Equipment::empty(),
            on_death: Vec::new(),
            drops: Vec::new(),
        }
    }

    pub fn attack(mut self, base_attack: u32) -> Self {
        self.base_attack = base_attack;
        self
    }

    /// Sets max hp; the combatant starts at full health unless [`current_hp`](Self::current_hp) is given.
    pub fn hp(mut self, max_hp: u32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn current_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn stamina(mut self, stamina_max: u32) -> Self {
        self.stamina_max = stamina_max;
        self
    }

    pub fn tag(mut self, capability: Capability) -> Self {
        self.tags.grant(capability);
        self
    }

    pub fn tags(mut self, tags: CapabilitySet) -> Self {
        self.tags |= tags;
        self
    }

    pub fn skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.skills.extend(skills);
        self
    }

    pub fn abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = Some(abilities);
        self
    }

    pub fn equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn on_death(mut self, effect: Effect) -> Self {
        self.on_death.push(effect);
        self
    }

    pub fn drop_item(mut self, item: ResourceItem) -> Self {
        self.drops.push(item);
        self
    }

    pub fn build(self) -> Combatant {
        let hp = self.hp.unwrap_or(self.max_hp).min(self.max_hp);
        Combatant {
            id: self.id,
            name: self.name,
            base_attack: self.base_attack,
            hp,
            max_hp: self.max_hp,
            stamina: self.stamina_max,
            stamina_max: self.stamina_max,
            can_attack: true,
            tags: self.tags,
            skills: self.skills,
            abilities: self.abilities,
            equipment: self.equipment,
            on_death: self.on_death,
            drops: self.drops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopSink;
    use crate::state::ItemKind;

    fn knight() -> Combatant {
        Combatant::builder(EntityId(1), "Knight")
            .attack(3)
            .hp(10)
            .stamina(3)
            .build()
    }

    #[test]
    fn damage_floors_at_zero_and_reports_death() {
        let mut knight = knight();
        let mut events = Vec::new();

        assert!(!knight.take_damage(4, &mut events));
        assert_eq!(knight.hp(), 6);
        assert!(knight.take_damage(50, &mut events));
        assert_eq!(knight.hp(), 0);

        assert_eq!(
            events,
            vec![
                EntityEvent::HpChanged { entity: EntityId(1), before: 10, after: 6 },
                EntityEvent::HpChanged { entity: EntityId(1), before: 6, after: 0 },
                EntityEvent::Died { entity: EntityId(1) },
            ]
        );

        // Already dead: still reports death, emits nothing new.
        assert!(knight.take_damage(1, &mut events));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut knight = knight();
        knight.take_damage(3, &mut NoopSink);
        assert_eq!(knight.heal(10, &mut NoopSink), 3);
        assert_eq!(knight.hp(), 10);
        assert_eq!(knight.heal(5, &mut NoopSink), 0);
    }

    #[test]
    fn spend_stamina_fails_without_mutation() {
        let mut knight = knight();
        let mut events = Vec::new();

        knight.spend_stamina(2, &mut events).unwrap();
        assert_eq!(knight.stamina(), 1);

        let err = knight.spend_stamina(2, &mut events).unwrap_err();
        assert_eq!(err, StaminaError { required: 2, available: 1 });
        assert_eq!(knight.stamina(), 1);
        assert_eq!(events.len(), 1);

        knight.refill_stamina(&mut events);
        assert_eq!(knight.stamina(), 3);
        assert_eq!(
            events.last(),
            Some(&EntityEvent::StaminaChanged { entity: EntityId(1), before: 1, after: 3 })
        );
    }

    #[test]
    fn totals_include_equipment() {
        let mut knight = knight();
        let sword = Item::new("Sword", ItemKind::OneHanded).with_attack(2);
        let shield = Item::new("Shield", ItemKind::Shield)
            .with_defense(2)
            .with_hand(EquipSlot::RightHand);
        knight.equip(sword, &mut NoopSink).unwrap();
        knight.equip(shield, &mut NoopSink).unwrap();

        assert_eq!(knight.total_attack(), 5);
        assert_eq!(knight.total_defense(), 2);
        assert_eq!(knight.armor_class(10), 12);
    }

    #[test]
    fn armor_class_uses_dex_or_override() {
        let nimble = Combatant::builder(EntityId(2), "Rogue")
            .hp(8)
            .abilities(AbilityScores::new(10, 16, 10, 10, 10, 10, 1))
            .build();
        assert_eq!(nimble.armor_class(10), 13);

        let warded = Combatant::builder(EntityId(3), "Golem")
            .hp(8)
            .abilities(AbilityScores::default().with_armor_class(18))
            .build();
        assert_eq!(warded.armor_class(10), 18);
    }

    #[test]
    fn builder_clamps_starting_hp() {
        let hurt = Combatant::builder(EntityId(4), "Scout")
            .hp(5)
            .current_hp(9)
            .build();
        assert_eq!(hurt.hp(), 5);
    }
}
