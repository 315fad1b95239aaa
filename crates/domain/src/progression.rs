//! Progression curve.
//!
//! Pure functions that shape game feel: how much HP a level grants, how many
//! misses a session tolerates, how hard each miss hits, and how much EXP a
//! correct answer or a finished session is worth.
//!
//! Every function is total. Out-of-range inputs (non-positive levels,
//! negative miss allowances, empty sessions) are clamped to the nearest
//! sensible value instead of being rejected.
//!
//! # Curves
//!
//! ```text
//! MaxHP        30 ──(fast, lv 1..30)──> 300 ──(slow, lv 30..999)──> 999
//! ExpToNext    30 + 5·(lv-1)   for lv <= 99
//!              500 + 10·(lv-100) for lv >= 100
//! ```

use serde::{Deserialize, Serialize};

/// Fraction of the EXP earned from correct answers kept when a session fails.
pub const FAIL_EXP_FACTOR: f64 = 0.40;

/// Highest level of the early HP regime.
const EARLY_HP_CAP_LEVEL: i32 = 30;

/// HP granted at level 1.
const BASE_MAX_HP: i32 = 30;

/// HP reached at the end of the early regime.
const EARLY_MAX_HP: i32 = 300;

/// HP reached at level 999.
const LATE_MAX_HP: i32 = 999;

/// Level at which the EXP curve switches to its late-game pacing.
const LATE_EXP_LEVEL: i32 = 100;

fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Maximum HP for a level.
///
/// Levels 1..=30 interpolate linearly from 30 to 300 HP, levels above that
/// interpolate from 300 towards 999 HP at level 999.
///
/// ```
/// use english_quest_domain::progression::max_hp_for_level;
///
/// assert_eq!(max_hp_for_level(1), 30);
/// assert_eq!(max_hp_for_level(30), 300);
/// assert_eq!(max_hp_for_level(999), 999);
/// ```
pub fn max_hp_for_level(level: i32) -> i32 {
    let level = level.max(1);
    if level <= EARLY_HP_CAP_LEVEL {
        let span = f64::from(EARLY_MAX_HP - BASE_MAX_HP);
        return BASE_MAX_HP + round_to_i32(span * f64::from(level - 1) / 29.0);
    }
    let span = f64::from(LATE_MAX_HP - EARLY_MAX_HP);
    EARLY_MAX_HP + round_to_i32(span * f64::from(level - EARLY_HP_CAP_LEVEL) / 969.0)
}

/// Misses a session of `questions` questions tolerates before the player faints.
///
/// 20% of the session rounded up, never fewer than 2 for short sessions
/// (up to 10 questions) and never fewer than 1 otherwise.
pub fn allowed_misses(questions: i32) -> i32 {
    if questions <= 0 {
        return 1;
    }
    // ceil(N * 0.20) in integer arithmetic
    let base = (questions + 4) / 5;
    if questions <= 10 {
        base.max(2)
    } else {
        base.max(1)
    }
}

/// Damage dealt by one miss, sized so that `allowed + 1` misses always
/// bring a full-HP player to exactly zero.
pub fn damage_per_miss(max_hp: i32, allowed: i32) -> i32 {
    let allowed = allowed.max(0);
    let max_hp = max_hp.max(0);
    (max_hp + allowed) / (allowed + 1)
}

/// EXP tier of a level band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Band index, 1 through 6.
    pub index: u8,
    /// Multiplier applied to every per-question EXP award.
    pub multiplier: f64,
}

impl Tier {
    const fn new(index: u8, multiplier: f64) -> Self {
        Self { index, multiplier }
    }
}

/// Tier band for a level.
///
/// | Levels    | Tier | Multiplier |
/// |-----------|------|------------|
/// | 1..=19    | 1    | 1.0        |
/// | 20..=49   | 2    | 1.2        |
/// | 50..=99   | 3    | 1.5        |
/// | 100..=199 | 4    | 1.9        |
/// | 200..=399 | 5    | 2.4        |
/// | 400..     | 6    | 3.0        |
pub fn tier_for_level(level: i32) -> Tier {
    match level.max(1) {
        1..=19 => Tier::new(1, 1.0),
        20..=49 => Tier::new(2, 1.2),
        50..=99 => Tier::new(3, 1.5),
        100..=199 => Tier::new(4, 1.9),
        200..=399 => Tier::new(5, 2.4),
        _ => Tier::new(6, 3.0),
    }
}

/// EXP for one correct answer. Rare questions are worth double.
pub fn q_exp_for(base_exp: i32, tier_multiplier: f64, rare: bool) -> i32 {
    let rarity = if rare { 2.0 } else { 1.0 };
    round_to_i32(f64::from(base_exp) * tier_multiplier * rarity)
}

/// Flat bonus for finishing a session, regardless of how many answers were right.
pub fn clear_bonus(questions: i32, base_exp: i32, tier_multiplier: f64) -> i32 {
    round_to_i32(f64::from(questions * base_exp) * tier_multiplier * 0.5)
}

/// Multiplier for a perfect session of `questions` questions.
pub fn perfect_bonus_mul(questions: i32) -> f64 {
    1.20 + 0.01 * f64::from(questions)
}

/// Session EXP on clear: correct-answer EXP plus the clear bonus, boosted
/// by [`perfect_bonus_mul`] when every answer was right and the bonus is enabled.
pub fn session_exp_clear(
    sum_correct_exp: i32,
    clear_bonus: i32,
    all_correct: bool,
    questions: i32,
    perfect_enabled: bool,
) -> i32 {
    let total = sum_correct_exp + clear_bonus;
    if all_correct && perfect_enabled {
        round_to_i32(f64::from(total) * perfect_bonus_mul(questions))
    } else {
        total
    }
}

/// Session EXP on failure: a floored fraction of the correct-answer EXP.
pub fn session_exp_fail(sum_correct_exp: i32, fail_factor: f64) -> i32 {
    let fail_factor = fail_factor.max(0.0);
    (f64::from(sum_correct_exp) * fail_factor).floor() as i32
}

/// EXP needed to advance from `level` to the next level.
///
/// The curve deliberately drops from 520 (level 99) to 500 (level 100)
/// where the late-game pacing starts.
pub fn exp_to_next(level: i32) -> i32 {
    let level = level.max(1);
    if level < LATE_EXP_LEVEL {
        30 + 5 * (level - 1)
    } else {
        (level - LATE_EXP_LEVEL)
            .saturating_mul(10)
            .saturating_add(500)
    }
}
