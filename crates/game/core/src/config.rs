/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Armor class of a defender with no defense and no dexterity modifier.
    pub base_armor_class: i32,

    /// Number of sides on the to-hit die.
    pub to_hit_die: u32,

    /// Damage floor applied after mitigation on every hit.
    pub min_damage: u32,

    /// Stamina pool given to board entries that do not declare one.
    pub default_stamina: u32,

    /// Seed for the default dice stream. Same seed, same rolls.
    pub game_seed: u64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on explicitly picked targets in a multi-select session.
    pub const MAX_TARGETS: usize = 16;
    /// Maximum depth of chained on-death hooks (a retaliation killing the killer, ...).
    pub const MAX_DEATH_CHAIN: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ARMOR_CLASS: i32 = 10;
    pub const DEFAULT_TO_HIT_DIE: u32 = 20;
    pub const DEFAULT_MIN_DAMAGE: u32 = 1;
    pub const DEFAULT_STAMINA: u32 = 3;
    pub const DEFAULT_GAME_SEED: u64 = 0x5EED;

    pub fn new() -> Self {
        Self {
            base_armor_class: Self::DEFAULT_BASE_ARMOR_CLASS,
            to_hit_die: Self::DEFAULT_TO_HIT_DIE,
            min_damage: Self::DEFAULT_MIN_DAMAGE,
            default_stamina: Self::DEFAULT_STAMINA,
            game_seed: Self::DEFAULT_GAME_SEED,
        }
    }

    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
