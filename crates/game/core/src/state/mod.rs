//! Battlefield state: combatants, their equipment and the zones that hold them.
//!
//! All zone state is owned by [`Battlefield`] and passed by reference; there
//! is no global battlefield.

mod combatant;
mod common;
mod equipment;
mod stats;
mod tags;
mod zone;

pub use combatant::{Combatant, CombatantBuilder, StaminaError};
pub use common::{EntityId, Side, TargetToken, TokenParseError};
pub use equipment::{EquipError, EquipSlot, Equipment, EquipmentBuilder, Item, ItemKind};
pub use stats::{AbilityScores, modifier};
pub use tags::{Capability, CapabilitySet};
pub use zone::{Battlefield, ResourceItem, Zone};
