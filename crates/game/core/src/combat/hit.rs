//! To-hit checks.

/// Check if an attack roll meets the defender's armor class.
///
/// # Formula
///
/// ```text
/// hit = roll + bonus >= armor_class
/// ```
pub fn check_hit(roll: u32, bonus: i32, armor_class: i32) -> bool {
    i64::from(roll) + i64::from(bonus) >= i64::from(armor_class)
}
