//! Ability scores - the optional d20-style stat block.
//!
//! Combatants without a block behave as if every modifier were zero and
//! their armor class comes purely from equipment.

/// Six attributes plus level, an armor-class override and flat bonuses.
///
/// - **STR** feeds the to-hit bonus
/// - **DEX** feeds armor class
/// - the remaining attributes are carried for content and presentation
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityScores {
    pub level: i32,
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
    /// Replaces the computed armor class entirely when present.
    pub armor_class: Option<i32>,
    /// Flat bonus added to to-hit rolls.
    pub attack_bonus: i32,
    /// Flat bonus added to damage rolls before mitigation.
    pub damage_bonus: i32,
}

impl AbilityScores {
    /// Create a block with the given attributes, no override and no bonuses.
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32, level: i32) -> Self {
        Self {
            level,
            str,
            dex,
            con,
            int,
            wis,
            cha,
            ..Self::default()
        }
    }

    pub fn with_armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = Some(armor_class);
        self
    }

    pub fn with_attack_bonus(mut self, bonus: i32) -> Self {
        self.attack_bonus = bonus;
        self
    }

    pub fn with_damage_bonus(mut self, bonus: i32) -> Self {
        self.damage_bonus = bonus;
        self
    }

    pub const fn str_modifier(&self) -> i32 {
        modifier(self.str)
    }

    pub const fn dex_modifier(&self) -> i32 {
        modifier(self.dex)
    }
}

impl Default for AbilityScores {
    /// Default stats: all 10 (average), level 1
    fn default() -> Self {
        Self {
            level: 1,
            str: 10,
            dex: 10,
            con: 10,
            int: 10,
            wis: 10,
            cha: 10,
            armor_class: None,
            attack_bonus: 0,
            damage_bonus: 0,
        }
    }
}

/// Ability modifier: floor((score - 10) / 2).
pub const fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}
