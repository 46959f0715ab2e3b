//! Zones and the battlefield that owns them.
//!
//! A zone is an ordered collection scoped to the current scene. The ally
//! board is the only zone that may outlive a scene (see `keep_board` on scene
//! load); enemies and resources are rebuilt on every load.

use super::{Combatant, EntityId, Side, TargetToken};

/// A non-combatant scene record: loot, pickups, scenery with a value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceItem {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub value: i32,
}

impl ResourceItem {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value,
        }
    }
}

/// Ordered collection of combatants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Zone {
    members: Vec<Combatant>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn as_slice(&self) -> &[Combatant] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.members.iter_mut()
    }

    pub fn push(&mut self, combatant: Combatant) {
        self.members.push(combatant);
    }

    /// Combatant at a display index.
    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn find(&self, id: EntityId) -> Option<&Combatant> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.find(id).is_some()
    }

    /// Removes a combatant, preserving the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        let index = self.members.iter().position(|c| c.id == id)?;
        Some(self.members.remove(index))
    }

    /// Removes every combatant at zero hp, returning their ids.
    pub fn remove_dead(&mut self) -> Vec<EntityId> {
        let dead = self
            .members
            .iter()
            .filter(|c| !c.is_alive())
            .map(|c| c.id)
            .collect();
        self.members.retain(Combatant::is_alive);
        dead
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.members.iter().map(|c| c.id).collect()
    }
}

impl FromIterator<Combatant> for Zone {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Every zone of the active scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Battlefield {
    pub enemies: Zone,
    pub board: Zone,
    pub resources: Vec<ResourceItem>,
}

impl Battlefield {
    pub fn new(enemies: Zone, board: Zone, resources: Vec<ResourceItem>) -> Self {
        Self {
            enemies,
            board,
            resources,
        }
    }

    pub fn zone(&self, side: Side) -> &Zone {
        match side {
            Side::Enemy => &self.enemies,
            Side::Ally => &self.board,
        }
    }

    pub fn zone_mut(&mut self, side: Side) -> &mut Zone {
        match side {
            Side::Enemy => &mut self.enemies,
            Side::Ally => &mut self.board,
        }
    }

    pub fn combatant(&self, token: TargetToken) -> Option<&Combatant> {
        self.zone(token.side).find(token.id)
    }

    pub fn combatant_mut(&mut self, token: TargetToken) -> Option<&mut Combatant> {
        self.zone_mut(token.side).find_mut(token.id)
    }

    /// Token for an ally or enemy by display index.
    pub fn token_at(&self, side: Side, index: usize) -> Option<TargetToken> {
        self.zone(side)
            .get(index)
            .map(|c| TargetToken::new(side, c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin(id: u32) -> Combatant {
        Combatant::builder(EntityId(id), format!("Goblin {id}"))
            .hp(4)
            .attack(1)
            .build()
    }

    #[test]
    fn remove_preserves_order() {
        let mut zone: Zone = (1..=4).map(goblin).collect();
        assert_eq!(zone.remove(EntityId(2)).map(|c| c.id), Some(EntityId(2)));
        assert_eq!(zone.ids(), vec![EntityId(1), EntityId(3), EntityId(4)]);
        assert!(zone.remove(EntityId(2)).is_none());
    }

    #[test]
    fn tokens_resolve_by_side() {
        let field = Battlefield::new((1..=2).map(goblin).collect(), Zone::new(), Vec::new());
        let token = field.token_at(Side::Enemy, 1).unwrap();
        assert_eq!(token, TargetToken::enemy(EntityId(2)));
        assert!(field.combatant(token).is_some());
        assert!(field.combatant(TargetToken::ally(EntityId(2))).is_none());
        assert!(field.token_at(Side::Ally, 0).is_none());
    }
}
