//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Pure functions**: [`check_hit`], [`calculate_damage`], [`counter_damage`]
//!   and [`roll_attack`] compute outcomes without touching state
//! - **Resolver**: [`CombatResolver`] applies outcomes to a battlefield, writes
//!   the presentation log and reports entity events
//! - **Death**: a single interpreter runs on-death [`Effect`](crate::action::Effect)s
//!
//! # Core Functions
//!
//! - `execute_attack`: to-hit, damage, counter-attack, death
//! - `strike` / `execute_aoe`: skill damage, no to-hit and no counters
//! - `heal`: hp restore clamped at max

mod damage;
mod death;
mod hit;
mod resolve;
mod result;

pub use damage::{calculate_damage, counter_damage, damage_die};
pub use hit::check_hit;
pub use resolve::CombatResolver;
pub use result::{
    AttackOutcome, AttackReport, AttackRoll, CombatError, EffectReport, SkillReport, roll_attack,
};
