//! Entity notifications for external observers.
//!
//! Every hp, stamina, death and equipment mutation on a [`Combatant`] is
//! reported to an [`EventSink`]. The engine collects them in a queue that
//! observers drain between calls; the core never stores them anywhere else.
//!
//! [`Combatant`]: crate::state::Combatant

use crate::state::{EntityId, EquipSlot};

/// A single observed mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityEvent {
    HpChanged {
        entity: EntityId,
        before: u32,
        after: u32,
    },
    StaminaChanged {
        entity: EntityId,
        before: u32,
        after: u32,
    },
    Died {
        entity: EntityId,
    },
    Equipped {
        entity: EntityId,
        slot: EquipSlot,
        item: String,
    },
    Unequipped {
        entity: EntityId,
        slot: EquipSlot,
        item: String,
    },
}

impl EntityEvent {
    /// Entity the event is about.
    pub fn entity(&self) -> EntityId {
        match self {
            Self::HpChanged { entity, .. }
            | Self::StaminaChanged { entity, .. }
            | Self::Died { entity }
            | Self::Equipped { entity, .. }
            | Self::Unequipped { entity, .. } => *entity,
        }
    }
}

/// Receiver of entity notifications.
pub trait EventSink {
    fn emit(&mut self, event: EntityEvent);
}

impl EventSink for Vec<EntityEvent> {
    fn emit(&mut self, event: EntityEvent) {
        self.push(event);
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _event: EntityEvent) {}
}
