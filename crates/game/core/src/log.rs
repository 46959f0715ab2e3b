//! Presentation log queue.
//!
//! Engine calls append human-readable entries; the presentation layer drains
//! them with [`LogQueue::drain`] between calls. Entries carry structured
//! [`LogMeta`] so a renderer can animate hp bars without parsing text.

use std::collections::VecDeque;

use crate::state::EntityId;

/// Category of a log entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    Attack,
    Skill,
    Heal,
    Info,
    Error,
}

/// Structured data attached to a log entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogMeta {
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub roll: Option<u32>,
    pub armor_class: Option<i32>,
    pub amount: Option<u32>,
    pub hp_before: Option<u32>,
    pub hp_after: Option<u32>,
}

impl LogMeta {
    pub fn between(source: EntityId, target: EntityId) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn with_roll(mut self, roll: u32, armor_class: i32) -> Self {
        self.roll = Some(roll);
        self.armor_class = Some(armor_class);
        self
    }

    pub fn with_hp(mut self, amount: u32, hp_before: u32, hp_after: u32) -> Self {
        self.amount = Some(amount);
        self.hp_before = Some(hp_before);
        self.hp_after = Some(hp_after);
        self
    }
}

/// A single presentation message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub kind: LogKind,
    pub text: String,
    pub meta: LogMeta,
}

impl LogEntry {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            meta: LogMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: LogMeta) -> Self {
        self.meta = meta;
        self
    }
}

/// FIFO of pending log entries.
#[derive(Clone, Debug, Default)]
pub struct LogQueue {
    entries: VecDeque<LogEntry>,
}

impl LogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LogEntry::new(LogKind::Info, text));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LogEntry::new(LogKind::Error, text));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes every pending entry in insertion order.
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut log = LogQueue::new();
        log.info("first");
        log.error("second");
        log.push(
            LogEntry::new(LogKind::Attack, "third")
                .with_meta(LogMeta::between(EntityId(1), EntityId(2)).with_hp(3, 10, 7)),
        );
        assert_eq!(log.len(), 3);

        let entries = log.drain();
        assert!(log.is_empty());
        let kinds: Vec<LogKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![LogKind::Info, LogKind::Error, LogKind::Attack]);
        assert_eq!(entries[2].meta.hp_after, Some(7));
        assert_eq!(LogKind::Heal.to_string(), "heal");
    }
}
