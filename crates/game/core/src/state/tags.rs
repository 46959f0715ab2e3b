//! Capability tags carried by combatants.
//!
//! Tags are a closed set: [`Capability`] names a single label (parsed from
//! data files as `snake_case`), [`CapabilitySet`] stores any combination of
//! them as bit flags.

use bitflags::bitflags;
use strum::IntoEnumIterator;

/// A single capability label.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Capability {
    /// Support archetype; purely descriptive. Any ally that knows a heal skill
    /// can cast it.
    Healer,
    /// Front-liner; purely descriptive for presentation and AI.
    Tank,
    /// Attacks by this combatant never provoke a counter-attack.
    NoCounter,
    /// Cannot be picked as the target of hostile actions.
    Untargetable,
    /// Boss monster; purely descriptive.
    Boss,
}

bitflags! {
    /// Set of [`Capability`] labels.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CapabilitySet: u8 {
        const HEALER       = 1 << 0;
        const TANK         = 1 << 1;
        const NO_COUNTER   = 1 << 2;
        const UNTARGETABLE = 1 << 3;
        const BOSS         = 1 << 4;
    }
}

impl Capability {
    pub const fn flag(self) -> CapabilitySet {
        match self {
            Capability::Healer => CapabilitySet::HEALER,
            Capability::Tank => CapabilitySet::TANK,
            Capability::NoCounter => CapabilitySet::NO_COUNTER,
            Capability::Untargetable => CapabilitySet::UNTARGETABLE,
            Capability::Boss => CapabilitySet::BOSS,
        }
    }
}

impl CapabilitySet {
    pub fn has(&self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    pub fn grant(&mut self, capability: Capability) {
        self.insert(capability.flag());
    }

    /// Labels present in this set, in declaration order.
    pub fn labels(&self) -> Vec<Capability> {
        Capability::iter().filter(|c| self.has(*c)).collect()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CapabilitySet::empty(), |set, c| set | c.flag())
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        capability.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_labels() {
        assert_eq!("no_counter".parse::<Capability>(), Ok(Capability::NoCounter));
        assert_eq!("Healer".parse::<Capability>(), Ok(Capability::Healer));
        assert!("flying".parse::<Capability>().is_err());
        assert_eq!(Capability::NoCounter.to_string(), "no_counter");
    }

    #[test]
    fn set_round_trips_labels() {
        let set: CapabilitySet = [Capability::Tank, Capability::NoCounter]
            .into_iter()
            .collect();
        assert!(set.has(Capability::Tank));
        assert!(set.has(Capability::NoCounter));
        assert!(!set.has(Capability::Healer));
        assert_eq!(set.labels(), vec![Capability::Tank, Capability::NoCounter]);
    }
}
