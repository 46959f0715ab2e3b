//! Skill definitions and the catalog that resolves skill ids.

use std::collections::BTreeMap;

use super::targeting::{Fallback, SelectMode, SkillTargetSpec, TeamFilter};

/// What a skill does to each resolved target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillEffect {
    /// Standard attack: to-hit roll, damage, counter-attack. Uses the
    /// caster's attack flag.
    Attack,

    /// Direct damage with mitigation, no to-hit roll and no counter.
    /// `None` rolls a die sized by the caster's total attack.
    Damage { amount: Option<u32> },

    /// Restore hp, clamped at max.
    Heal { amount: u32 },
}

impl SkillEffect {
    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Attack)
    }
}

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: SkillTargetSpec,
    pub effect: SkillEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stamina_cost: u32,
}

impl SkillDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: SkillEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            target: SkillTargetSpec::default(),
            effect,
            stamina_cost: 0,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn targeting(mut self, target: SkillTargetSpec) -> Self {
        self.target = target;
        self
    }

    pub fn cost(mut self, stamina_cost: u32) -> Self {
        self.stamina_cost = stamina_cost;
        self
    }

    /// Checks that the effect fits the targeting.
    ///
    /// An attack needs an opponent: `select: none` and `team: self` both
    /// resolve on the caster alone.
    pub fn validate(&self) -> Result<(), String> {
        if self.effect.is_attack()
            && (self.target.select == SelectMode::None || self.target.team == TeamFilter::SelfOnly)
        {
            return Err(format!("skill '{}' cannot attack its own caster", self.id));
        }
        Ok(())
    }
}

/// Catalog of skills keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: BTreeMap<String, SkillDef>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a skill, returning the previous definition.
    pub fn insert(&mut self, skill: SkillDef) -> Option<SkillDef> {
        self.skills.insert(skill.id.clone(), skill)
    }

    pub fn get(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.values()
    }

    /// Skills available when no catalog file is supplied.
    pub fn builtin() -> Self {
        [
            SkillDef::new("strike", "Strike", SkillEffect::Attack)
                .describe("A measured blow at a single enemy.")
                .targeting(SkillTargetSpec::single_enemy().with_fallback(Fallback::Random)),
            SkillDef::new("volley", "Volley", SkillEffect::Damage { amount: Some(2) })
                .describe("Loose arrows at up to two enemies.")
                .targeting(SkillTargetSpec::multi_enemy(1, 2).with_fallback(Fallback::Prompt))
                .cost(2),
            SkillDef::new("whirlwind", "Whirlwind", SkillEffect::Damage { amount: None })
                .describe("Spin through every enemy at once.")
                .targeting(SkillTargetSpec::aoe_enemies())
                .cost(3),
            SkillDef::new("heal", "Heal", SkillEffect::Heal { amount: 4 })
                .describe("Mend the wounds of one ally.")
                .targeting(SkillTargetSpec::wounded_ally())
                .cost(2),
            SkillDef::new("second_wind", "Second Wind", SkillEffect::Heal { amount: 3 })
                .describe("Catch your breath and recover a little health.")
                .targeting(SkillTargetSpec::self_only())
                .cost(1),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<SkillDef> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = SkillDef>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for skill in iter {
            catalog.insert(skill);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_ids() {
        let catalog = SkillCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        let whirlwind = catalog.get("whirlwind").unwrap();
        assert_eq!(whirlwind.target.select, SelectMode::Aoe);
        assert_eq!(whirlwind.stamina_cost, 3);
        assert!(catalog.get("fireball").is_none());
    }

    #[test]
    fn self_targeted_attacks_are_invalid() {
        let untargeted = SkillDef::new("flail", "Flail", SkillEffect::Attack)
            .targeting(SkillTargetSpec { select: SelectMode::None, ..SkillTargetSpec::default() });
        assert!(untargeted.validate().is_err());

        let selfish = SkillDef::new("flail", "Flail", SkillEffect::Attack)
            .targeting(SkillTargetSpec::self_only());
        assert!(selfish.validate().unwrap_err().contains("flail"));

        assert!(
            SkillDef::new("sweep", "Sweep", SkillEffect::Attack)
                .targeting(SkillTargetSpec::aoe_enemies())
                .validate()
                .is_ok()
        );
        assert!(SkillCatalog::builtin().iter().all(|skill| skill.validate().is_ok()));
    }

    #[test]
    fn insert_replaces_by_id() {
        let mut catalog = SkillCatalog::builtin();
        let previous = catalog.insert(SkillDef::new("heal", "Greater Heal", SkillEffect::Heal { amount: 9 }));
        assert_eq!(previous.map(|s| s.name), Some("Heal".to_string()));
        assert_eq!(catalog.get("heal").map(|s| s.name.as_str()), Some("Greater Heal"));
    }
}
