//! Attack damage from line clears
//!
//! ```text
//! damage = ceil(base[lines] * (1 + combo * 0.5))
//! ```
//!
//! `base` is [`BASE_DAMAGE`]; line counts outside 1..=4 deal nothing. The
//! half-step multiplier is computed in integers as
//! `ceil(base * (2 + combo) / 2)`.

use tetris_duel_types::BASE_DAMAGE;

/// Damage dealt to the opponent for one clearing lock
pub fn calculate_damage(lines_cleared: usize, combo: i32) -> u32 {
    if lines_cleared == 0 || lines_cleared >= BASE_DAMAGE.len() {
        return 0;
    }
    let base = BASE_DAMAGE[lines_cleared];
    let steps = combo.max(0) as u32;
    base.saturating_mul(steps.saturating_add(2)).div_ceil(2)
}

/// Display name of a clear
pub fn attack_name(lines_cleared: usize) -> &'static str {
    match lines_cleared {
        1 => "Single",
        2 => "Double",
        3 => "Triple",
        4 => "TETRIS!",
        _ => "",
    }
}
