//! Equipment system for combatants.
//!
//! Three slots: left hand (the weapon position), right hand (off-hand) and
//! armor. Equipment owns the items it holds; displaced items are handed back
//! to the caller, which is responsible for re-absorbing them (the engine does
//! not keep an inventory).
//!
//! # Slot rules
//!
//! - Armor always replaces whatever is in the armor slot.
//! - A two-handed weapon occupies the left hand and evicts the right hand.
//! - While a two-handed weapon is held, one-handed items and shields are
//!   rejected in either hand.
//! - A failed equip never mutates the equipment.

/// Equipment slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    LeftHand,
    RightHand,
    Armor,
}

/// What kind of item this is, which decides the slots it may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    OneHanded,
    TwoHanded,
    Shield,
    Armor,
}

/// An equippable item with flat attack and defense bonuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    /// Hand used by [`Equipment::equip`] for one-handed items and shields.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hand: Option<EquipSlot>,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            attack: 0,
            defense: 0,
            hand: None,
        }
    }

    pub fn with_attack(mut self, attack: i32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_hand(mut self, hand: EquipSlot) -> Self {
        self.hand = Some(hand);
        self
    }

    pub fn is_two_handed(&self) -> bool {
        self.kind == ItemKind::TwoHanded
    }

    /// Slot used when no explicit slot is requested.
    pub fn default_slot(&self) -> EquipSlot {
        match self.kind {
            ItemKind::Armor => EquipSlot::Armor,
            ItemKind::TwoHanded => EquipSlot::LeftHand,
            ItemKind::OneHanded | ItemKind::Shield => match self.hand {
                Some(EquipSlot::RightHand) => EquipSlot::RightHand,
                _ => EquipSlot::LeftHand,
            },
        }
    }
}

/// Equipment rule violations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    /// Item kind cannot go into the requested slot at all.
    #[error("{item} cannot be placed in the {slot} slot")]
    WrongSlot { item: String, slot: EquipSlot },

    /// A two-handed weapon blocks both hands.
    #[error("{item} cannot be equipped while {held} is held in both hands")]
    TwoHandedOccupied { item: String, held: String },
}

impl crate::error::GameError for EquipError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn kind(&self) -> crate::error::ErrorKind {
        crate::error::ErrorKind::SlotConflict
    }
}

/// Equipment state for a combatant.
///
/// Fields are private so the two-handed invariant cannot be bypassed: when
/// the left hand holds a two-handed item the right hand is always empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Equipment {
    left_hand: Option<Item>,
    right_hand: Option<Item>,
    armor: Option<Item>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    /// Item in a slot, if any.
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::LeftHand => self.left_hand.as_ref(),
            EquipSlot::RightHand => self.right_hand.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    pub fn left_hand(&self) -> Option<&Item> {
        self.left_hand.as_ref()
    }

    pub fn right_hand(&self) -> Option<&Item> {
        self.right_hand.as_ref()
    }

    pub fn armor(&self) -> Option<&Item> {
        self.armor.as_ref()
    }

    /// Returns true if the left hand holds a two-handed item.
    pub fn holds_two_handed(&self) -> bool {
        self.left_hand.as_ref().is_some_and(Item::is_two_handed)
    }

    /// Occupied slots with their items.
    pub fn items(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        [
            (EquipSlot::LeftHand, self.left_hand.as_ref()),
            (EquipSlot::RightHand, self.right_hand.as_ref()),
            (EquipSlot::Armor, self.armor.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, item)| item.map(|item| (slot, item)))
    }

    /// Sum of attack bonuses over occupied slots.
    pub fn total_attack(&self) -> i32 {
        self.items().map(|(_, item)| item.attack).sum()
    }

    /// Sum of defense bonuses over occupied slots.
    pub fn total_defense(&self) -> i32 {
        self.items().map(|(_, item)| item.defense).sum()
    }

    /// Equips an item into its default slot.
    ///
    /// Returns every displaced item (previous occupant, evicted off-hand).
    pub fn equip(&mut self, item: Item) -> Result<Vec<Item>, EquipError> {
        let slot = item.default_slot();
        self.equip_to(item, slot)
    }

    /// Equips an item into an explicit slot.
    ///
    /// Returns every displaced item. On error nothing changes.
    pub fn equip_to(&mut self, item: Item, slot: EquipSlot) -> Result<Vec<Item>, EquipError> {
        match (item.kind, slot) {
            (ItemKind::Armor, EquipSlot::Armor) => Ok(self.armor.replace(item).into_iter().collect()),
            (ItemKind::Armor, _) | (_, EquipSlot::Armor) | (ItemKind::TwoHanded, EquipSlot::RightHand) => {
                Err(EquipError::WrongSlot {
                    item: item.name,
                    slot,
                })
            }
            (ItemKind::TwoHanded, EquipSlot::LeftHand) => {
                let mut displaced: Vec<Item> = self.left_hand.replace(item).into_iter().collect();
                displaced.extend(self.right_hand.take());
                Ok(displaced)
            }
            (ItemKind::OneHanded | ItemKind::Shield, hand) => {
                if let Some(held) = self.left_hand.as_ref().filter(|held| held.is_two_handed()) {
                    return Err(EquipError::TwoHandedOccupied {
                        item: item.name,
                        held: held.name.clone(),
                    });
                }
                let target = if hand == EquipSlot::LeftHand {
                    &mut self.left_hand
                } else {
                    &mut self.right_hand
                };
                Ok(target.replace(item).into_iter().collect())
            }
        }
    }

    /// Clears a slot, returning its item if one was equipped.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        match slot {
            EquipSlot::LeftHand => self.left_hand.take(),
            EquipSlot::RightHand => self.right_hand.take(),
            EquipSlot::Armor => self.armor.take(),
        }
    }
}

/// Builder for constructing equipment.
///
/// Items are equipped in the order given, with the same rules as
/// [`Equipment::equip`]; the first violation aborts the build.
#[derive(Default)]
pub struct EquipmentBuilder {
    items: Vec<(Item, Option<EquipSlot>)>,
}

impl EquipmentBuilder {
    /// Adds an item for its default slot.
    pub fn item(mut self, item: Item) -> Self {
        self.items.push((item, None));
        self
    }

    /// Adds an item for an explicit slot.
    pub fn item_in(mut self, item: Item, slot: EquipSlot) -> Self {
        self.items.push((item, Some(slot)));
        self
    }

    /// Builds the equipment. Displaced items are dropped.
    pub fn build(self) -> Result<Equipment, EquipError> {
        let mut equipment = Equipment::empty();
        for (item, slot) in self.items {
            let slot = slot.unwrap_or_else(|| item.default_slot());
            equipment.equip_to(item, slot)?;
        }
        Ok(equipment)
    }
}
